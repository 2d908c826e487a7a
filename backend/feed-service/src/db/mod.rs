/// Database access layer
///
/// Repository modules expose one async function per query over `&PgPool`.
/// Multi-statement work (the cascading post delete) lives in the service
/// layer where the transaction is owned.
pub mod comment_repo;
pub mod post_repo;
pub mod reaction_repo;
pub mod user_repo;

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use crate::config::DatabaseConfig;

/// Create the process-wide connection pool
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(&config.url)
        .await
}
