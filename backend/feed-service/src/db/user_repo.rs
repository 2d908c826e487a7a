use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::User;

/// Create a new user
///
/// `email` must already be lower-cased by the caller; the unique index on
/// the column is what actually enforces one account per address.
pub async fn create_user(
    pool: &PgPool,
    name: &str,
    email: &str,
    password_hash: &str,
    profile_picture_url: Option<&str>,
) -> Result<User, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (name, email, password_hash, profile_picture_url)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, email, password_hash, profile_picture_url, created_at, updated_at
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(profile_picture_url)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Find a user by email, including the credential column
pub async fn find_user_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, password_hash, profile_picture_url, created_at, updated_at
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Check whether an email is already registered
pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
    let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1) AS exists")
        .bind(email)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<bool, _>("exists"))
}

/// Find a user by id
pub async fn find_user_by_id(pool: &PgPool, user_id: Uuid) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, password_hash, profile_picture_url, created_at, updated_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Activity counts for a profile: the user's posts, plus reactions and
/// comments received on those posts (not interactions made by the user).
pub async fn profile_counts(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<(i64, i64, i64), sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT
            (SELECT COUNT(*) FROM posts WHERE user_id = $1) AS post_count,
            (SELECT COUNT(*) FROM reactions
             WHERE post_id IN (SELECT id FROM posts WHERE user_id = $1)) AS reaction_count,
            (SELECT COUNT(*) FROM comments
             WHERE post_id IN (SELECT id FROM posts WHERE user_id = $1)) AS comment_count
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok((
        row.get::<i64, _>("post_count"),
        row.get::<i64, _>("reaction_count"),
        row.get::<i64, _>("comment_count"),
    ))
}
