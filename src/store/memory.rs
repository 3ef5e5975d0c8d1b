//! In-process record store for tests and fixtures

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use super::{raw_id, RecordStore, StoreError};

/// Record store holding collections in memory.
///
/// Collections can be marked as failing, and reads can be slowed down to
/// exercise in-flight behaviour.
#[derive(Default)]
pub struct MemoryStore {
    collections: HashMap<String, Vec<Value>>,
    failing: HashSet<String>,
    delay: Duration,
    reads: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents of a collection
    pub fn with_collection(mut self, collection: &str, items: Vec<Value>) -> Self {
        self.collections.insert(collection.to_string(), items);
        self
    }

    /// Make every read of `collection` fail
    pub fn failing(mut self, collection: &str) -> Self {
        self.failing.insert(collection.to_string());
        self
    }

    /// Delay every read by `delay`
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of reads served so far, failed ones included
    pub fn reads(&self) -> u64 {
        self.reads.load(Ordering::Relaxed)
    }

    async fn begin_read(&self, collection: &str) -> Result<(), StoreError> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.failing.contains(collection) {
            return Err(StoreError::Unavailable(format!(
                "collection {} is offline",
                collection
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn get_all(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        self.begin_read(collection).await?;
        Ok(self.collections.get(collection).cloned().unwrap_or_default())
    }

    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
        self.begin_read(collection).await?;
        Ok(self
            .collections
            .get(collection)
            .and_then(|items| items.iter().find(|item| raw_id(item) == Some(id)))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_counts_reads_and_fails_on_demand() {
        let store = MemoryStore::new()
            .with_collection("testimonials", vec![json!({"_id": "t1"})])
            .failing("courses");

        assert_eq!(store.get_all("testimonials").await.unwrap().len(), 1);
        assert!(store.get_all("courses").await.is_err());
        assert!(store.get_all("facilities").await.unwrap().is_empty());
        assert_eq!(store.reads(), 3);
    }
}
