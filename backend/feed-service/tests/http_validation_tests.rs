/// HTTP boundary tests
///
/// These exercise the paths that must be decided before any query runs:
/// request validation (400) and the authorization guard (401). The app is
/// wired with a lazily-connected pool, so a test that reached the database
/// would fail loudly instead of passing by accident.
use actix_web::{http::StatusCode, test, web, App};
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use feed_service::config::{
    AppConfig, AuthConfig, Config, CorsConfig, DatabaseConfig, MediaConfig,
};
use feed_service::handlers;
use feed_service::security::jwt;
use feed_service::services::MediaStore;

const TEST_SECRET: &str = "test-secret";

fn test_config(upload_dir: &str) -> Config {
    Config {
        app: AppConfig {
            env: "test".into(),
            host: "127.0.0.1".into(),
            port: 0,
        },
        cors: CorsConfig {
            allowed_origins: "http://localhost:3000".into(),
        },
        database: DatabaseConfig {
            url: "postgres://postgres@127.0.0.1/feed_test".into(),
            max_connections: 1,
            acquire_timeout_secs: 1,
        },
        auth: AuthConfig {
            jwt_secret: TEST_SECRET.into(),
            token_expiry_days: 30,
        },
        media: MediaConfig {
            upload_dir: upload_dir.into(),
        },
    }
}

macro_rules! test_app {
    ($config:expr) => {{
        let config = $config;
        let pool = PgPoolOptions::new()
            .connect_lazy(&config.database.url)
            .expect("lazy pool");
        let media = MediaStore::new(&config.media);

        test::init_service(
            App::new()
                .app_data(web::Data::new(pool))
                .app_data(web::Data::new(config))
                .app_data(web::Data::new(media))
                .service(
                    web::scope("/api")
                        .route("/register", web::post().to(handlers::register))
                        .route("/logout", web::post().to(handlers::logout))
                        .route("/profile", web::get().to(handlers::profile))
                        .route("/my-posts", web::get().to(handlers::my_posts))
                        .route(
                            "/posts/{post_id}/reaction",
                            web::post().to(handlers::toggle_reaction),
                        ),
                ),
        )
        .await
    }};
}

// ============================================================================
// Registration validation
// ============================================================================

#[actix_web::test]
async fn register_empty_body_returns_field_errors() {
    let tmp = tempfile::tempdir().unwrap();
    let app = test_app!(test_config(tmp.path().to_str().unwrap()));

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/register")
            .set_json(serde_json::json!({}))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("Name is required"));
    assert!(message.contains("Email is required"));
    assert!(message.contains("Password is required"));
}

#[actix_web::test]
async fn register_invalid_email_returns_400() {
    let tmp = tempfile::tempdir().unwrap();
    let app = test_app!(test_config(tmp.path().to_str().unwrap()));

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/register")
            .set_json(serde_json::json!({
                "name": "Alice",
                "email": "not-an-email",
                "password": "password123",
                "password_confirmation": "password123",
            }))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Please enter a valid email");
}

#[actix_web::test]
async fn register_password_mismatch_returns_400() {
    let tmp = tempfile::tempdir().unwrap();
    let app = test_app!(test_config(tmp.path().to_str().unwrap()));

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/register")
            .set_json(serde_json::json!({
                "name": "Alice",
                "email": "alice@x.com",
                "password": "password123",
                "password_confirmation": "password124",
            }))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Passwords do not match");
}

#[actix_web::test]
async fn register_short_password_returns_400() {
    let tmp = tempfile::tempdir().unwrap();
    let app = test_app!(test_config(tmp.path().to_str().unwrap()));

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/register")
            .set_json(serde_json::json!({
                "name": "Alice",
                "email": "alice@x.com",
                "password": "short",
                "password_confirmation": "short",
            }))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Password must be at least 8 characters");
}

// ============================================================================
// Authorization guard
// ============================================================================

#[actix_web::test]
async fn protected_routes_without_token_return_401() {
    let tmp = tempfile::tempdir().unwrap();
    let app = test_app!(test_config(tmp.path().to_str().unwrap()));

    for (method, uri) in [
        ("POST", "/api/logout"),
        ("GET", "/api/profile"),
        ("GET", "/api/my-posts"),
    ] {
        let req = match method {
            "POST" => test::TestRequest::post(),
            _ => test::TestRequest::get(),
        }
        .uri(uri)
        .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{method} {uri}");
    }
}

#[actix_web::test]
async fn non_bearer_authorization_scheme_returns_401() {
    let tmp = tempfile::tempdir().unwrap();
    let app = test_app!(test_config(tmp.path().to_str().unwrap()));

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/logout")
            .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn garbage_token_returns_401() {
    let tmp = tempfile::tempdir().unwrap();
    let app = test_app!(test_config(tmp.path().to_str().unwrap()));

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/logout")
            .insert_header(("Authorization", "Bearer definitely.not.ajwt"))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn token_signed_with_wrong_secret_returns_401() {
    let tmp = tempfile::tempdir().unwrap();
    let app = test_app!(test_config(tmp.path().to_str().unwrap()));

    let forged = jwt::generate_token("some-other-secret", Uuid::new_v4(), 30).unwrap();

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/logout")
            .insert_header(("Authorization", format!("Bearer {forged}")))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn reaction_toggle_without_token_returns_401() {
    let tmp = tempfile::tempdir().unwrap();
    let app = test_app!(test_config(tmp.path().to_str().unwrap()));

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/posts/{}/reaction", Uuid::new_v4()))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
