//! Shared configuration slot
//!
//! Holds the single live configuration value for the application. The store is
//! a cloneable handle: every clone reads and writes the same slot, so it is
//! passed explicitly to whoever needs it instead of living in a global.

use std::sync::Arc;
use tokio::sync::RwLock;

/// Application-defined configuration value
pub type ConfigValue = serde_json::Value;

/// Handle to the shared configuration slot
///
/// Writes are last-write-wins; concurrent writers are not serialized.
#[derive(Clone, Default, Debug)]
pub struct ConfigStore {
    inner: Arc<RwLock<Option<ConfigValue>>>,
}

impl ConfigStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding a value
    pub fn with_value(value: ConfigValue) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(value))),
        }
    }

    /// Get a copy of the current value
    pub async fn get(&self) -> Option<ConfigValue> {
        self.inner.read().await.clone()
    }

    /// Replace the current value, returning the previous one
    pub async fn set(&self, value: ConfigValue) -> Option<ConfigValue> {
        self.inner.write().await.replace(value)
    }

    /// Remove the current value
    pub async fn clear(&self) -> Option<ConfigValue> {
        self.inner.write().await.take()
    }

    pub async fn is_set(&self) -> bool {
        self.inner.read().await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_starts_empty() {
        let store = ConfigStore::new();
        assert!(!store.is_set().await);
        assert_eq!(store.get().await, None);
    }

    #[tokio::test]
    async fn test_clones_share_slot() {
        let store = ConfigStore::new();
        let other = store.clone();

        other.set(json!({ "a": 1 })).await;
        assert_eq!(store.get().await, Some(json!({ "a": 1 })));

        store.clear().await;
        assert!(!other.is_set().await);
    }

    #[tokio::test]
    async fn test_set_returns_previous() {
        let store = ConfigStore::with_value(json!("old"));
        let previous = store.set(json!("new")).await;

        assert_eq!(previous, Some(json!("old")));
        assert_eq!(store.get().await, Some(json!("new")));
    }
}
