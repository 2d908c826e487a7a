/// Ownership-based permission checks
///
/// A post mutation is permitted only when the caller's identity equals the
/// post's owning user id. Existence is checked by the caller first, so these
/// fire after a 404 would have.
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::Post;

/// Verify the caller may update a post
pub fn check_post_update(user_id: Uuid, post: &Post) -> Result<()> {
    if post.user_id == user_id {
        Ok(())
    } else {
        Err(AppError::Unauthorized(
            "Not authorized to edit this post".to_string(),
        ))
    }
}

/// Verify the caller may delete a post
pub fn check_post_deletion(user_id: Uuid, post: &Post) -> Result<()> {
    if post.user_id == user_id {
        Ok(())
    } else {
        Err(AppError::Unauthorized(
            "Not authorized to delete this post".to_string(),
        ))
    }
}
