use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use tracing::warn;

use crate::bot::error::Error;
use crate::db::queries::plugin_storage;
use crate::services::storage::KvStore;

/// Store backed by the `plugin_storage` table. Values are kept as JSON text.
pub struct PgStore {
    pool: PgPool,
    namespace: String,
}

impl PgStore {
    pub fn new(pool: PgPool, namespace: impl Into<String>) -> Self {
        Self {
            pool,
            namespace: namespace.into(),
        }
    }
}

#[async_trait]
impl KvStore for PgStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, Error> {
        match plugin_storage::get(&self.pool, &self.namespace, key).await? {
            Some(raw) => Ok(decode_value(&self.namespace, key, &raw)),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), Error> {
        let raw = serde_json::to_string(&value)?;
        plugin_storage::upsert(&self.pool, &self.namespace, key, &raw).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

/// Parse a stored row. Text that is not JSON reads as absent so the next
/// write can replace it.
fn decode_value(namespace: &str, key: &str, raw: &str) -> Option<Value> {
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring unreadable value for {}:{}: {}", namespace, key, e);
            None
        }
    }
}
