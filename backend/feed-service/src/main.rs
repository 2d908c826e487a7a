use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use sqlx::PgPool;
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use feed_service::handlers;
use feed_service::services::MediaStore;
use feed_service::Config;

async fn health_check(pool: web::Data<PgPool>) -> HttpResponse {
    match sqlx::query("SELECT 1").fetch_one(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "feed-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": "feed-service"
        })),
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug,sqlx=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting feed-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    // Initialize database connection pool
    let pool = match feed_service::db::create_pool(&config.database).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Database pool creation failed: {}", e);
            eprintln!("ERROR: Failed to create database pool: {}", e);
            std::process::exit(1);
        }
    };

    sqlx::migrate!("./migrations").run(&pool).await.map_err(|e| {
        io::Error::new(
            io::ErrorKind::Other,
            format!("Failed to run database migrations: {e}"),
        )
    })?;
    tracing::info!("Database migrations applied");

    // Media storage directory for uploaded post files
    let media = MediaStore::new(&config.media);
    media.ensure_dir()?;

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    let app_config = config.clone();
    HttpServer::new(move || {
        // Build CORS configuration
        let mut cors = Cors::default();
        for origin in app_config.cors.allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(app_config.clone()))
            .app_data(web::Data::new(media.clone()))
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .route("/api/health", web::get().to(health_check))
            .service(
                web::scope("/api")
                    .route("/register", web::post().to(handlers::register))
                    .route("/login", web::post().to(handlers::login))
                    .route("/logout", web::post().to(handlers::logout))
                    .route("/profile", web::get().to(handlers::profile))
                    .route("/my-posts", web::get().to(handlers::my_posts))
                    .service(
                        web::resource("/posts")
                            .route(web::get().to(handlers::list_posts))
                            .route(web::post().to(handlers::create_post)),
                    )
                    .service(
                        web::resource("/posts/{post_id}")
                            .route(web::put().to(handlers::update_post))
                            .route(web::delete().to(handlers::delete_post)),
                    )
                    .service(
                        web::resource("/posts/{post_id}/comments")
                            .route(web::post().to(handlers::add_comment))
                            .route(web::get().to(handlers::get_comments)),
                    )
                    .route(
                        "/posts/{post_id}/reaction",
                        web::post().to(handlers::toggle_reaction),
                    ),
            )
    })
    .bind(&bind_address)?
    .run()
    .await
}
