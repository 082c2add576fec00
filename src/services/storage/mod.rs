//! Key-value persistence for plugin state.
//!
//! Each store is bound to one namespace at construction, so callers only
//! deal with short keys such as `muted_streams`.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use crate::bot::error::Error;
use crate::constants::defaults::PLUGIN_NAMESPACE;
use crate::db;

#[async_trait]
pub trait KvStore: Send + Sync {
    /// Fetch the value stored under `key`, if any
    async fn get(&self, key: &str) -> Result<Option<Value>, Error>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: Value) -> Result<(), Error>;

    /// Short backend name for logs
    fn backend(&self) -> &'static str;
}

/// Postgres when a database URL is configured, memory otherwise
pub async fn open(database_url: Option<&str>) -> Result<Arc<dyn KvStore>, Error> {
    match database_url {
        Some(url) => {
            let pool = db::pool::create_pool(url).await?;
            db::pool::run_migrations(&pool).await?;
            Ok(Arc::new(PgStore::new(pool, PLUGIN_NAMESPACE)))
        }
        None => {
            info!("DATABASE_URL not set, keeping mutes in memory");
            Ok(Arc::new(MemoryStore::new(PLUGIN_NAMESPACE)))
        }
    }
}
