use std::sync::Arc;

use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

use super::memory::MemoryStore;
use super::postgres::PgStore;
use super::store::JobBoardStore;
use crate::config::Config;
use crate::error::Result;

pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(20)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Opens the configured store, applying migrations for PostgreSQL.
pub async fn connect_store(config: &Config) -> Result<Arc<dyn JobBoardStore>> {
    if config.uses_memory_store() {
        info!("Using in-memory store; data is lost on restart");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let pool = create_pool(&config.database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Database migrations applied");
    Ok(Arc::new(PgStore::new(pool)))
}
