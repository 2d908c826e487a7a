/// Comment handlers
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::middleware::CurrentUser;
use crate::models::CommentAuthor;
use crate::services::InteractionService;

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub post_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub user: CommentAuthor,
}

/// Body returned when a post exists but has no comments yet. The `data`
/// field is what distinguishes this from the missing-post body, which has
/// only `message`.
#[derive(Debug, Serialize)]
pub struct EmptyCommentsResponse {
    pub message: String,
    pub data: Vec<CommentResponse>,
}

/// Add a comment to a post
/// POST /api/posts/{post_id}/comments
pub async fn add_comment(
    pool: web::Data<PgPool>,
    user: CurrentUser,
    path: web::Path<Uuid>,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    let content = req.content.as_deref().unwrap_or("");

    let service = InteractionService::new((**pool).clone());
    let (comment, author) = service.add_comment(*path, &user.0, content).await?;

    Ok(HttpResponse::Created().json(CommentResponse {
        id: comment.id,
        post_id: comment.post_id,
        content: comment.content,
        created_at: comment.created_at,
        user: author,
    }))
}

/// List a post's comments, earliest first
/// GET /api/posts/{post_id}/comments
pub async fn get_comments(
    pool: web::Data<PgPool>,
    _user: CurrentUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = InteractionService::new((**pool).clone());
    let comments = service.list_comments(*path).await?;

    if comments.is_empty() {
        return Ok(HttpResponse::NotFound().json(EmptyCommentsResponse {
            message: "No comments found".to_string(),
            data: vec![],
        }));
    }

    let body: Vec<CommentResponse> = comments
        .into_iter()
        .map(|comment| CommentResponse {
            id: comment.id,
            post_id: comment.post_id,
            content: comment.content,
            created_at: comment.created_at,
            user: CommentAuthor {
                id: comment.author_id,
                name: comment.author_name,
                profile_picture_url: comment.author_profile_picture_url,
            },
        })
        .collect();

    Ok(HttpResponse::Ok().json(body))
}
