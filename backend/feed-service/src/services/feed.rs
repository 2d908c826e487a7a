/// Feed aggregator - read-side composition of posts, counts, and authors
///
/// Counts are derived reads computed per response; nothing here writes or
/// caches. Per-page counting is batched into one grouped query per entity
/// kind rather than one query per post.
use std::collections::HashMap;

use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{comment_repo, post_repo, reaction_repo};
use crate::error::Result;
use crate::models::{PostAuthor, PostWithAuthor};
use crate::services::media;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

/// One feed entry: post fields, absolute media URLs, derived counts, author
#[derive(Debug, Serialize)]
pub struct FeedPost {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub video: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "commentCount")]
    pub comment_count: i64,
    #[serde(rename = "reactionCount")]
    pub reaction_count: i64,
    pub user: PostAuthor,
}

/// One page of the feed
#[derive(Debug, Serialize)]
pub struct FeedPage {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
    pub posts: Vec<FeedPost>,
}

/// Normalize raw query-string pagination values: absent, non-numeric, or
/// non-positive input falls back to the defaults.
pub fn normalize_pagination(page: Option<&str>, limit: Option<&str>) -> (i64, i64) {
    let page = page
        .and_then(|p| p.trim().parse::<i64>().ok())
        .filter(|p| *p >= 1)
        .unwrap_or(DEFAULT_PAGE);

    let limit = limit
        .and_then(|l| l.trim().parse::<i64>().ok())
        .filter(|l| *l >= 1)
        .unwrap_or(DEFAULT_LIMIT);

    (page, limit)
}

/// Page count for a total: ceil(total / limit)
pub fn total_pages(total: i64, limit: i64) -> i64 {
    (total + limit - 1) / limit
}

pub struct FeedService {
    pool: PgPool,
}

impl FeedService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Global feed, newest first
    pub async fn list_posts(&self, base_url: &str, page: i64, limit: i64) -> Result<FeedPage> {
        let total = post_repo::count_posts(&self.pool).await?;
        let offset = (page - 1) * limit;
        let rows = post_repo::list_posts_with_authors(&self.pool, limit, offset).await?;

        self.compose_page(base_url, page, limit, total, rows).await
    }

    /// One owner's feed, newest first
    pub async fn list_user_posts(
        &self,
        user_id: Uuid,
        base_url: &str,
        page: i64,
        limit: i64,
    ) -> Result<FeedPage> {
        let total = post_repo::count_posts_by_user(&self.pool, user_id).await?;
        let offset = (page - 1) * limit;
        let rows =
            post_repo::list_posts_by_user_with_authors(&self.pool, user_id, limit, offset).await?;

        self.compose_page(base_url, page, limit, total, rows).await
    }

    async fn compose_page(
        &self,
        base_url: &str,
        page: i64,
        limit: i64,
        total: i64,
        rows: Vec<PostWithAuthor>,
    ) -> Result<FeedPage> {
        let post_ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();

        let (comment_counts, reaction_counts) = if post_ids.is_empty() {
            (HashMap::new(), HashMap::new())
        } else {
            let comments: HashMap<Uuid, i64> = comment_repo::count_comments_batch(&self.pool, &post_ids)
                .await?
                .into_iter()
                .collect();
            let reactions: HashMap<Uuid, i64> = reaction_repo::count_reactions_batch(&self.pool, &post_ids)
                .await?
                .into_iter()
                .collect();
            (comments, reactions)
        };

        let posts = rows
            .into_iter()
            .map(|row| FeedPost {
                comment_count: comment_counts.get(&row.id).copied().unwrap_or(0),
                reaction_count: reaction_counts.get(&row.id).copied().unwrap_or(0),
                image: row.image.as_deref().map(|f| media::media_url(base_url, f)),
                video: row.video.as_deref().map(|f| media::media_url(base_url, f)),
                user: PostAuthor {
                    id: row.user_id,
                    name: row.author_name,
                    email: row.author_email,
                    profile_picture_url: row.author_profile_picture_url,
                },
                id: row.id,
                title: row.title,
                content: row.content,
                created_at: row.created_at,
                updated_at: row.updated_at,
            })
            .collect();

        Ok(FeedPage {
            page,
            limit,
            total,
            total_pages: total_pages(total, limit),
            posts,
        })
    }
}
