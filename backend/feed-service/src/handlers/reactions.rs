/// Reaction handlers
use actix_web::{web, HttpResponse};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::middleware::CurrentUser;
use crate::services::{InteractionService, ReactionStatus};

#[derive(Debug, Serialize)]
pub struct ToggleReactionResponse {
    pub message: String,
    pub status: ReactionStatus,
    #[serde(rename = "reactionCount")]
    pub reaction_count: i64,
}

/// Toggle the caller's reaction on a post
/// POST /api/posts/{post_id}/reaction
///
/// The id is taken as a raw string so a malformed value is a 400 validation
/// failure rather than a routing miss.
pub async fn toggle_reaction(
    pool: web::Data<PgPool>,
    user: CurrentUser,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let post_id = Uuid::parse_str(path.trim())
        .map_err(|_| AppError::Validation("Invalid post ID".to_string()))?;

    let service = InteractionService::new((**pool).clone());
    let (status, reaction_count) = service.toggle_reaction(post_id, user.id()).await?;

    Ok(HttpResponse::Ok().json(ToggleReactionResponse {
        message: format!("Reaction {}", status.as_str()),
        status,
        reaction_count,
    }))
}
