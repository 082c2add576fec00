use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use crate::bot::error::Error;
use crate::services::storage::KvStore;

/// Process-local store. State is lost on restart.
pub struct MemoryStore {
    namespace: String,
    /// "namespace:key" -> value
    entries: DashMap<String, Value>,
}

impl MemoryStore {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            entries: DashMap::new(),
        }
    }

    fn scoped(&self, key: &str) -> String {
        format!("{}:{}", self.namespace, key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, Error> {
        Ok(self.entries.get(&self.scoped(key)).map(|v| v.clone()))
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), Error> {
        self.entries.insert(self.scoped(key), value);
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
