use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::Reaction;

/// Find a user's reaction on a post, if any
pub async fn find_reaction(
    pool: &PgPool,
    post_id: Uuid,
    user_id: Uuid,
) -> Result<Option<Reaction>, sqlx::Error> {
    let reaction = sqlx::query_as::<_, Reaction>(
        r#"
        SELECT id, post_id, user_id, created_at
        FROM reactions
        WHERE post_id = $1 AND user_id = $2
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(reaction)
}

/// Insert a reaction
///
/// The UNIQUE (post_id, user_id) constraint rejects a concurrent duplicate;
/// callers inspect the error for a unique violation and retry the toggle.
pub async fn create_reaction(
    pool: &PgPool,
    post_id: Uuid,
    user_id: Uuid,
) -> Result<Reaction, sqlx::Error> {
    let reaction = sqlx::query_as::<_, Reaction>(
        r#"
        INSERT INTO reactions (post_id, user_id)
        VALUES ($1, $2)
        RETURNING id, post_id, user_id, created_at
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(reaction)
}

/// Delete a user's reaction on a post, returning the number of rows removed
pub async fn delete_reaction(
    pool: &PgPool,
    post_id: Uuid,
    user_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM reactions
        WHERE post_id = $1 AND user_id = $2
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Count reactions for a post
pub async fn count_reactions_by_post(pool: &PgPool, post_id: Uuid) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM reactions WHERE post_id = $1")
        .bind(post_id)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count"))
}

/// Reaction counts for multiple posts in one query
pub async fn count_reactions_batch(
    pool: &PgPool,
    post_ids: &[Uuid],
) -> Result<Vec<(Uuid, i64)>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT post_id, COUNT(*) AS count
        FROM reactions
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
