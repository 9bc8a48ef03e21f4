use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::MySqlPool;
use sqlx::mysql::MySqlPoolOptions;
use tracing::info;

use crate::config::Config;
use crate::store::{MemoryStore, MySqlStore, Store, StoreBackend};

pub async fn init_db(database_url: &str, max_connections: u32) -> Result<MySqlPool> {
    let pool = MySqlPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(3))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    info!("Database ready");
    Ok(pool)
}

/// Build the store selected by `config`.
pub async fn init_store(config: &Config) -> Result<Arc<dyn Store>> {
    match config.store_backend {
        StoreBackend::Mysql => {
            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set when STORE_BACKEND=mysql")?;
            let pool = init_db(url, config.db_max_connections).await?;
            Ok(Arc::new(MySqlStore::new(pool)))
        }
        StoreBackend::Memory => {
            info!("Using in-memory store, data is not persisted");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
