use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::{Comment, CommentWithAuthor};

/// Create a new comment on a post
pub async fn create_comment(
    pool: &PgPool,
    post_id: Uuid,
    user_id: Uuid,
    content: &str,
) -> Result<Comment, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (post_id, user_id, content)
        VALUES ($1, $2, $3)
        RETURNING id, post_id, user_id, content, created_at
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .bind(content)
    .fetch_one(pool)
    .await?;

    Ok(comment)
}

/// All comments for a post, earliest first, with author columns joined in
pub async fn list_comments_with_authors(
    pool: &PgPool,
    post_id: Uuid,
) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
    let comments = sqlx::query_as::<_, CommentWithAuthor>(
        r#"
        SELECT c.id, c.post_id, c.content, c.created_at,
               u.id AS author_id, u.name AS author_name,
               u.profile_picture_url AS author_profile_picture_url
        FROM comments c
        JOIN users u ON u.id = c.user_id
        WHERE c.post_id = $1
        ORDER BY c.created_at ASC
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;

    Ok(comments)
}

/// Count comments for a post
pub async fn count_comments_by_post(pool: &PgPool, post_id: Uuid) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM comments WHERE post_id = $1")
        .bind(post_id)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count"))
}

/// Comment counts for multiple posts in one query
pub async fn count_comments_batch(
    pool: &PgPool,
    post_ids: &[Uuid],
) -> Result<Vec<(Uuid, i64)>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT post_id, COUNT(*) AS count
        FROM comments
        WHERE post_id = ANY($1)
        GROUP BY post_id
        "#,
    )
    .bind(post_ids)
    .fetch_all(pool)
    .await?;

    let counts = rows
        .into_iter()
        .map(|row| {
            let post_id: Uuid = row.get("post_id");
            let count: i64 = row.get("count");
            (post_id, count)
        })
        .collect();

    Ok(counts)
}
