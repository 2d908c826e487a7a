/// Post handlers - create, edit, delete
use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use actix_web::{web, HttpResponse};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::middleware::CurrentUser;
use crate::models::Post;
use crate::services::{MediaStore, PostService, PostUpdate};

/// Multipart body for post creation and partial update: text fields plus
/// optional image/video parts.
#[derive(Debug, MultipartForm)]
pub struct PostForm {
    pub title: Option<Text<String>>,
    pub content: Option<Text<String>>,
    #[multipart(limit = "10MB")]
    pub image: Option<TempFile>,
    #[multipart(limit = "100MB")]
    pub video: Option<TempFile>,
}

#[derive(Debug, Serialize)]
pub struct UpdatePostResponse {
    pub message: String,
    pub post: Post,
}

#[derive(Debug, Serialize)]
pub struct DeletePostResponse {
    pub message: String,
}

/// Create a new post
/// POST /api/posts
pub async fn create_post(
    pool: web::Data<PgPool>,
    media: web::Data<MediaStore>,
    user: CurrentUser,
    MultipartForm(form): MultipartForm<PostForm>,
) -> Result<HttpResponse> {
    let title = form.title.map(Text::into_inner).unwrap_or_default();
    let content = form.content.map(Text::into_inner).unwrap_or_default();

    // Validate before touching the filesystem so a rejected request cannot
    // leave stray files behind.
    if title.trim().is_empty() || content.trim().is_empty() {
        return Err(AppError::Validation(
            "Please provide both title and content".to_string(),
        ));
    }
    check_media_kind(form.image.as_ref(), mime::IMAGE, "image")?;
    check_media_kind(form.video.as_ref(), mime::VIDEO, "video")?;

    let image = store_if_present(&media, form.image.as_ref()).await?;
    let video = store_if_present(&media, form.video.as_ref()).await?;

    let service = PostService::new((**pool).clone());
    let post = service
        .create_post(
            user.id(),
            &title,
            &content,
            image.as_deref(),
            video.as_deref(),
        )
        .await?;

    Ok(HttpResponse::Created().json(post))
}

/// Edit a post (owner only)
/// PUT /api/posts/{post_id}
pub async fn update_post(
    pool: web::Data<PgPool>,
    media: web::Data<MediaStore>,
    user: CurrentUser,
    path: web::Path<Uuid>,
    MultipartForm(form): MultipartForm<PostForm>,
) -> Result<HttpResponse> {
    check_media_kind(form.image.as_ref(), mime::IMAGE, "image")?;
    check_media_kind(form.video.as_ref(), mime::VIDEO, "video")?;

    let image = store_if_present(&media, form.image.as_ref()).await?;
    let video = store_if_present(&media, form.video.as_ref()).await?;

    let update = PostUpdate {
        title: form.title.map(Text::into_inner),
        content: form.content.map(Text::into_inner),
        image,
        video,
    };

    let service = PostService::new((**pool).clone());
    let post = service.edit_post(*path, user.id(), update).await?;

    Ok(HttpResponse::Ok().json(UpdatePostResponse {
        message: "Post updated successfully".to_string(),
        post,
    }))
}

/// Delete a post (owner only)
/// DELETE /api/posts/{post_id}
pub async fn delete_post(
    pool: web::Data<PgPool>,
    media: web::Data<MediaStore>,
    user: CurrentUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    service.delete_post(*path, user.id(), &media).await?;

    Ok(HttpResponse::Ok().json(DeletePostResponse {
        message: "Post deleted successfully".to_string(),
    }))
}

async fn store_if_present(
    media: &MediaStore,
    file: Option<&TempFile>,
) -> Result<Option<String>> {
    match file {
        Some(file) => Ok(Some(media.store(file).await?)),
        None => Ok(None),
    }
}

/// Reject a part whose declared content type does not match the field
fn check_media_kind(
    file: Option<&TempFile>,
    expected: mime::Name<'_>,
    field: &str,
) -> Result<()> {
    if let Some(file) = file {
        if let Some(content_type) = &file.content_type {
            if content_type.type_() != expected {
                return Err(AppError::Validation(format!(
                    "Please upload a valid {field} file"
                )));
            }
        }
    }
    Ok(())
}
