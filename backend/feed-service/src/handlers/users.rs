/// User profile handlers
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::Config;
use crate::error::Result;
use crate::middleware::CurrentUser;
use crate::services::AuthService;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub profile_picture_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub post_count: i64,
    pub reaction_count: i64,
    pub comment_count: i64,
}

/// Profile of the authenticated user with activity counts
/// GET /api/profile
pub async fn profile(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    user: CurrentUser,
) -> Result<HttpResponse> {
    let service = AuthService::new((**pool).clone(), config.auth.clone());
    let summary = service.profile(user.0).await?;

    Ok(HttpResponse::Ok().json(ProfileResponse {
        id: summary.user.id,
        name: summary.user.name,
        email: summary.user.email,
        profile_picture_url: summary.user.profile_picture_url,
        created_at: summary.user.created_at,
        post_count: summary.post_count,
        reaction_count: summary.reaction_count,
        comment_count: summary.comment_count,
    }))
}
