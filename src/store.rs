//! Key-value store handed to plugins through [`PluginServices`](crate::factory::PluginServices).
//!
//! Plugins use it to persist small pieces of state (balances, peer info) across restarts.
//! The factory never reads or writes it.

use dashmap::DashMap;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store backend failure: {0}")]
    Backend(String),
}

#[async_trait::async_trait]
pub trait Store: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn put(&self, key: &str, value: String) -> Result<(), StoreError>;
    async fn del(&self, key: &str) -> Result<(), StoreError>;
}

/// In-process [`Store`]. Contents are lost when it is dropped.
#[derive(Debug, Default)]
pub struct MemoryStore(DashMap<String, String>);

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[async_trait::async_trait]
impl Store for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.0.get(key).map(|v| v.value().clone()))
    }

    async fn put(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.0.insert(key.to_string(), value);
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<(), StoreError> {
        self.0.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_put_get_del() {
        let store = MemoryStore::new();
        assert!(store.get("balance").await.unwrap().is_none());

        store.put("balance", "100".to_string()).await.unwrap();
        assert_eq!(store.get("balance").await.unwrap().as_deref(), Some("100"));
        assert_eq!(store.len(), 1);

        store.put("balance", "250".to_string()).await.unwrap();
        assert_eq!(store.get("balance").await.unwrap().as_deref(), Some("250"));

        store.del("balance").await.unwrap();
        assert!(store.get("balance").await.unwrap().is_none());
        assert!(store.is_empty());
    }
}
