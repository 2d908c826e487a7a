/// Feed handlers - paginated post listings
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;

use crate::error::Result;
use crate::middleware::CurrentUser;
use crate::services::feed::{self, FeedService};

/// Raw pagination input; values are free-form strings so that non-numeric
/// input falls back to defaults instead of failing deserialization.
#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Global newsfeed
/// GET /api/posts
pub async fn list_posts(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    query: web::Query<FeedQuery>,
) -> Result<HttpResponse> {
    let (page, limit) = feed::normalize_pagination(query.page.as_deref(), query.limit.as_deref());
    let base_url = request_base_url(&req);

    let service = FeedService::new((**pool).clone());
    let feed_page = service.list_posts(&base_url, page, limit).await?;

    Ok(HttpResponse::Ok().json(feed_page))
}

/// Posts of the authenticated user
/// GET /api/my-posts
pub async fn my_posts(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    user: CurrentUser,
    query: web::Query<FeedQuery>,
) -> Result<HttpResponse> {
    let (page, limit) = feed::normalize_pagination(query.page.as_deref(), query.limit.as_deref());
    let base_url = request_base_url(&req);

    let service = FeedService::new((**pool).clone());
    let feed_page = service
        .list_user_posts(user.id(), &base_url, page, limit)
        .await?;

    Ok(HttpResponse::Ok().json(feed_page))
}

/// Caller-visible base URL, used to absolutize stored media filenames
fn request_base_url(req: &HttpRequest) -> String {
    let info = req.connection_info();
    format!("{}://{}", info.scheme(), info.host())
}
