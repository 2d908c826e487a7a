/// Interaction subsystem - comments and reactions scoped to a post
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{comment_repo, post_repo, reaction_repo};
use crate::error::{is_unique_violation, AppError, Result};
use crate::models::{Comment, CommentAuthor, CommentWithAuthor, User};

/// Outcome of a reaction toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionStatus {
    Liked,
    Unliked,
}

impl ReactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionStatus::Liked => "liked",
            ReactionStatus::Unliked => "unliked",
        }
    }
}

/// Concurrent toggles can invalidate each other's read; a couple of retries
/// is enough for the survivor to observe a settled row state.
const TOGGLE_MAX_ATTEMPTS: u32 = 3;

pub struct InteractionService {
    pool: PgPool,
}

impl InteractionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Add a comment to an existing post
    pub async fn add_comment(
        &self,
        post_id: Uuid,
        author: &User,
        content: &str,
    ) -> Result<(Comment, CommentAuthor)> {
        if content.trim().is_empty() {
            return Err(AppError::Validation(
                "Comment content is required".to_string(),
            ));
        }

        if !post_repo::post_exists(&self.pool, post_id).await? {
            return Err(AppError::NotFound("Post not found".to_string()));
        }

        let comment = comment_repo::create_comment(&self.pool, post_id, author.id, content).await?;

        let author = CommentAuthor {
            id: author.id,
            name: author.name.clone(),
            profile_picture_url: author.profile_picture_url.clone(),
        };

        Ok((comment, author))
    }

    /// List a post's comments, earliest first
    ///
    /// Missing post is an error; an existing post with zero comments returns
    /// an empty list and the handler shapes the empty-result response.
    pub async fn list_comments(&self, post_id: Uuid) -> Result<Vec<CommentWithAuthor>> {
        if !post_repo::post_exists(&self.pool, post_id).await? {
            return Err(AppError::NotFound("Post not found".to_string()));
        }

        let comments = comment_repo::list_comments_with_authors(&self.pool, post_id).await?;
        Ok(comments)
    }

    /// Flip a user's reaction on a post and return the new state with the
    /// recomputed total.
    ///
    /// The read-then-write pair is inherently racy under concurrent toggles
    /// by the same user; the UNIQUE (post_id, user_id) constraint is the
    /// actual arbiter. A losing insert comes back as a unique violation and
    /// a losing delete affects zero rows - both re-read and retry instead of
    /// surfacing an error.
    pub async fn toggle_reaction(
        &self,
        post_id: Uuid,
        user_id: Uuid,
    ) -> Result<(ReactionStatus, i64)> {
        if !post_repo::post_exists(&self.pool, post_id).await? {
            return Err(AppError::NotFound("Post not found".to_string()));
        }

        let mut attempts = 0;
        let status = loop {
            attempts += 1;

            match reaction_repo::find_reaction(&self.pool, post_id, user_id).await? {
                Some(_) => {
                    let removed =
                        reaction_repo::delete_reaction(&self.pool, post_id, user_id).await?;
                    if removed > 0 {
                        break ReactionStatus::Unliked;
                    }
                    tracing::debug!(%post_id, %user_id, "Reaction vanished before delete, retrying toggle");
                }
                None => match reaction_repo::create_reaction(&self.pool, post_id, user_id).await {
                    Ok(_) => break ReactionStatus::Liked,
                    Err(err) if is_unique_violation(&err) => {
                        tracing::debug!(%post_id, %user_id, "Concurrent reaction insert won, retrying toggle");
                    }
                    Err(err) => return Err(err.into()),
                },
            }

            if attempts >= TOGGLE_MAX_ATTEMPTS {
                return Err(AppError::Internal(
                    "Reaction toggle did not settle".to_string(),
                ));
            }
        };

        let count = reaction_repo::count_reactions_by_post(&self.pool, post_id).await?;
        Ok((status, count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaction_status_wire_values() {
        assert_eq!(ReactionStatus::Liked.as_str(), "liked");
        assert_eq!(ReactionStatus::Unliked.as_str(), "unliked");
        assert_eq!(
            serde_json::to_value(ReactionStatus::Liked).unwrap(),
            serde_json::json!("liked")
        );
    }
}
