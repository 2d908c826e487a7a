use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::{Post, PostWithAuthor};

/// Create a new post
pub async fn create_post(
    pool: &PgPool,
    user_id: Uuid,
    title: &str,
    content: &str,
    image: Option<&str>,
    video: Option<&str>,
) -> Result<Post, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (user_id, title, content, image, video)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, user_id, title, content, image, video, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(title)
    .bind(content)
    .bind(image)
    .bind(video)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

/// Find a post by id
pub async fn find_post_by_id(pool: &PgPool, post_id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, user_id, title, content, image, video, created_at, updated_at
        FROM posts
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// Check whether a post exists
pub async fn post_exists(pool: &PgPool, post_id: Uuid) -> Result<bool, sqlx::Error> {
    let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1) AS exists")
        .bind(post_id)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<bool, _>("exists"))
}

/// Persist the mutable fields of a post
pub async fn update_post(pool: &PgPool, post: &Post) -> Result<Post, sqlx::Error> {
    let updated = sqlx::query_as::<_, Post>(
        r#"
        UPDATE posts
        SET title = $1, content = $2, image = $3, video = $4, updated_at = NOW()
        WHERE id = $5
        RETURNING id, user_id, title, content, image, video, created_at, updated_at
        "#,
    )
    .bind(&post.title)
    .bind(&post.content)
    .bind(post.image.as_deref())
    .bind(post.video.as_deref())
    .bind(post.id)
    .fetch_one(pool)
    .await?;

    Ok(updated)
}

/// Count all posts
pub async fn count_posts(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM posts")
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count"))
}

/// Count posts owned by a user
pub async fn count_posts_by_user(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM posts WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count"))
}

/// List posts newest-first with author columns joined in
pub async fn list_posts_with_authors(
    pool: &PgPool,
    limit: i64,
    offset: i64,
) -> Result<Vec<PostWithAuthor>, sqlx::Error> {
    let posts = sqlx::query_as::<_, PostWithAuthor>(
        r#"
        SELECT p.id, p.user_id, p.title, p.content, p.image, p.video,
               p.created_at, p.updated_at,
               u.name AS author_name, u.email AS author_email,
               u.profile_picture_url AS author_profile_picture_url
        FROM posts p
        JOIN users u ON u.id = p.user_id
        ORDER BY p.created_at DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// List one owner's posts newest-first with author columns joined in
pub async fn list_posts_by_user_with_authors(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<PostWithAuthor>, sqlx::Error> {
    let posts = sqlx::query_as::<_, PostWithAuthor>(
        r#"
        SELECT p.id, p.user_id, p.title, p.content, p.image, p.video,
               p.created_at, p.updated_at,
               u.name AS author_name, u.email AS author_email,
               u.profile_picture_url AS author_profile_picture_url
        FROM posts p
        JOIN users u ON u.id = p.user_id
        WHERE p.user_id = $1
        ORDER BY p.created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}
