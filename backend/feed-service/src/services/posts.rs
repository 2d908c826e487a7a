/// Content store - post creation, owner-gated edit/delete, media lifecycle
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::post_repo;
use crate::error::{AppError, Result};
use crate::middleware::permissions;
use crate::models::Post;
use crate::services::media::MediaStore;

pub struct PostService {
    pool: PgPool,
}

/// Partial update for a post. Text fields are applied only when supplied
/// non-empty and different from the stored value; media references replace
/// the stored filename unconditionally when present. Replacement does not
/// remove the previously stored file (see DESIGN.md, known storage leak).
#[derive(Debug, Default)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
    pub video: Option<String>,
}

impl PostService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new post owned by `user_id`
    pub async fn create_post(
        &self,
        user_id: Uuid,
        title: &str,
        content: &str,
        image: Option<&str>,
        video: Option<&str>,
    ) -> Result<Post> {
        if title.trim().is_empty() || content.trim().is_empty() {
            return Err(AppError::Validation(
                "Please provide both title and content".to_string(),
            ));
        }

        let post = post_repo::create_post(&self.pool, user_id, title, content, image, video).await?;
        Ok(post)
    }

    /// Apply a partial update to an owned post
    ///
    /// Existence is checked before ownership: a missing post is 404 even for
    /// a caller who would not have owned it.
    pub async fn edit_post(&self, post_id: Uuid, user_id: Uuid, update: PostUpdate) -> Result<Post> {
        let mut post = post_repo::find_post_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

        permissions::check_post_update(user_id, &post)?;

        apply_update(&mut post, update);

        let updated = post_repo::update_post(&self.pool, &post).await?;
        Ok(updated)
    }

    /// Delete an owned post together with its comments and reactions
    ///
    /// Stored media files are removed first, best-effort: a failure there is
    /// logged and never aborts the delete. The comments, reactions, and the
    /// post row go in one transaction, so a crash cannot leave orphaned
    /// children behind a deleted post.
    pub async fn delete_post(&self, post_id: Uuid, user_id: Uuid, media: &MediaStore) -> Result<()> {
        let post = post_repo::find_post_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

        permissions::check_post_deletion(user_id, &post)?;

        if let Some(image) = &post.image {
            media.remove(image).await;
        }
        if let Some(video) = &post.video {
            media.remove(video).await;
        }

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM comments WHERE post_id = $1")
            .bind(post_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM reactions WHERE post_id = $1")
            .bind(post_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(post_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(%post_id, "Deleted post with its comments and reactions");
        Ok(())
    }
}

fn apply_update(post: &mut Post, update: PostUpdate) {
    if let Some(title) = update.title {
        if !title.is_empty() && title != post.title {
            post.title = title;
        }
    }

    if let Some(content) = update.content {
        if !content.is_empty() && content != post.content {
            post.content = content;
        }
    }

    if let Some(image) = update.image {
        post.image = Some(image);
    }

    if let Some(video) = update.video {
        post.video = Some(video);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_post() -> Post {
        Post {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Hello".into(),
            content: "World".into(),
            image: Some("old.png".into()),
            video: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_title_only_update_leaves_rest_unchanged() {
        let mut post = sample_post();
        apply_update(
            &mut post,
            PostUpdate {
                title: Some("New title".into()),
                ..Default::default()
            },
        );

        assert_eq!(post.title, "New title");
        assert_eq!(post.content, "World");
        assert_eq!(post.image.as_deref(), Some("old.png"));
        assert_eq!(post.video, None);
    }

    #[test]
    fn test_empty_text_fields_are_ignored() {
        let mut post = sample_post();
        apply_update(
            &mut post,
            PostUpdate {
                title: Some(String::new()),
                content: Some(String::new()),
                ..Default::default()
            },
        );

        assert_eq!(post.title, "Hello");
        assert_eq!(post.content, "World");
    }

    #[test]
    fn test_media_replaces_unconditionally() {
        let mut post = sample_post();
        apply_update(
            &mut post,
            PostUpdate {
                image: Some("new.png".into()),
                video: Some("clip.mp4".into()),
                ..Default::default()
            },
        );

        assert_eq!(post.image.as_deref(), Some("new.png"));
        assert_eq!(post.video.as_deref(), Some("clip.mp4"));
    }
}
