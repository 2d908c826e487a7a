/// Data models for the feed service
///
/// Entity structs mirror the database rows; projection structs define what
/// each read path is allowed to expose. `User::password_hash` never leaves
/// the process: every outward shape goes through `PublicUser` or one of the
/// author projections.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub profile_picture_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public projection of a user, safe for any response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub profile_picture_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            profile_picture_url: user.profile_picture_url,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub video: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Reaction {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Minimal author projection attached to comments
#[derive(Debug, Clone, Serialize)]
pub struct CommentAuthor {
    pub id: Uuid,
    pub name: String,
    pub profile_picture_url: Option<String>,
}

/// Author projection attached to feed entries
#[derive(Debug, Clone, Serialize)]
pub struct PostAuthor {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub profile_picture_url: Option<String>,
}

/// Flat row for a comment joined with its author columns
#[derive(Debug, Clone, FromRow)]
pub struct CommentWithAuthor {
    pub id: Uuid,
    pub post_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub author_id: Uuid,
    pub author_name: String,
    pub author_profile_picture_url: Option<String>,
}

/// Flat row for a post joined with its author columns
#[derive(Debug, Clone, FromRow)]
pub struct PostWithAuthor {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub video: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author_name: String,
    pub author_email: String,
    pub author_profile_picture_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_user_drops_credential() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Alice".into(),
            email: "alice@x.com".into(),
            password_hash: "$argon2id$...".into(),
            profile_picture_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let public = PublicUser::from(user.clone());
        let json = serde_json::to_value(&public).unwrap();

        assert_eq!(json["email"], "alice@x.com");
        assert!(json.get("password").is_none());
        assert!(json.get("password_hash").is_none());
    }
}
