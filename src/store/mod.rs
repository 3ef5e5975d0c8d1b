//! Record store clients
//!
//! The content store is an external, read-only collection API with two
//! operations: read a whole collection, or read one record by `_id`.
//! [`RecordStore`] abstracts over where it lives; the typed helpers
//! [`fetch_all`] and [`fetch_by_id`] decode the raw JSON into [`Record`]s.

mod file;
mod http;
mod memory;

pub use file::FileStore;
pub use http::HttpStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::StoreBackend;
use crate::content::Record;
use crate::Site;

/// Errors raised while reading from a record store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The content API returned a non-success status.
    #[error("content API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// A collection snapshot could not be read from disk.
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The payload was not valid JSON or not in the expected shape.
    #[error("malformed store payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// The store refused to serve the read.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Read-only access to the content collections
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Short name used in logs
    fn backend_tag(&self) -> &'static str;

    /// Read every record of a collection, in store order
    async fn get_all(&self, collection: &str) -> Result<Vec<Value>, StoreError>;

    /// Read one record by `_id`; `None` when it does not exist
    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError>;
}

/// Build the store selected by the site configuration
pub fn open(site: &Site) -> Arc<dyn RecordStore> {
    let store = &site.config.store;
    match store.backend {
        StoreBackend::File => {
            let dir = site.base_dir.join(&store.data_dir);
            tracing::debug!("Using file store at {:?}", dir);
            Arc::new(FileStore::new(dir))
        }
        StoreBackend::Http => {
            tracing::debug!("Using HTTP store at {}", store.base_url);
            Arc::new(HttpStore::new(store.base_url.clone()))
        }
    }
}

/// Read and decode a whole collection.
///
/// Records that fail to decode are skipped with a warning so one bad
/// record never takes the page down.
pub async fn fetch_all<T: Record>(store: &dyn RecordStore) -> Result<Vec<T>, StoreError> {
    let raw = store.get_all(T::COLLECTION).await?;
    let total = raw.len();

    let records: Vec<T> = raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<T>(value) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(
                    collection = T::COLLECTION,
                    index,
                    "Skipping undecodable record: {}",
                    e
                );
                None
            }
        })
        .collect();

    tracing::debug!(
        collection = T::COLLECTION,
        backend = store.backend_tag(),
        "Fetched {} of {} records",
        records.len(),
        total
    );

    Ok(records)
}

/// Read and decode one record by id
pub async fn fetch_by_id<T: Record>(
    store: &dyn RecordStore,
    id: &str,
) -> Result<Option<T>, StoreError> {
    match store.get_by_id(T::COLLECTION, id).await? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Extract the item list from a collection payload.
///
/// Accepts `{"items": [...]}` as well as a bare array.
pub(crate) fn items_from_payload(payload: Value) -> Result<Vec<Value>, StoreError> {
    use serde::de::Error as _;

    match payload {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match map.remove("items") {
            Some(Value::Array(items)) => Ok(items),
            Some(Value::Null) | None => Ok(Vec::new()),
            Some(other) => Err(StoreError::Decode(serde_json::Error::custom(format!(
                "expected `items` to be an array, found {}",
                json_kind(&other)
            )))),
        },
        other => Err(StoreError::Decode(serde_json::Error::custom(format!(
            "expected an object or array, found {}",
            json_kind(&other)
        )))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// `_id` of a raw record, if it has one
pub(crate) fn raw_id(value: &Value) -> Option<&str> {
    value.get("_id").and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Course;
    use serde_json::json;

    #[test]
    fn test_items_from_payload() {
        let items = items_from_payload(json!({"items": [{"_id": "1"}]})).unwrap();
        assert_eq!(items.len(), 1);

        let items = items_from_payload(json!([{"_id": "1"}, {"_id": "2"}])).unwrap();
        assert_eq!(items.len(), 2);

        assert!(items_from_payload(json!({})).unwrap().is_empty());
        assert!(items_from_payload(json!({"items": "nope"})).is_err());
        assert!(items_from_payload(json!(42)).is_err());
    }

    #[tokio::test]
    async fn test_fetch_all_skips_bad_records() {
        let store = MemoryStore::new().with_collection(
            "courses",
            vec![
                json!({"_id": "1", "courseName": "MBA"}),
                json!({"courseName": "No id"}),
                json!("not a record"),
                json!({"_id": "2", "courseName": "BBA"}),
            ],
        );

        let courses = fetch_all::<Course>(&store).await.unwrap();
        let ids: Vec<_> = courses.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_fetch_by_id() {
        let store = MemoryStore::new()
            .with_collection("courses", vec![json!({"_id": "1", "courseName": "MBA"})]);

        let course = fetch_by_id::<Course>(&store, "1").await.unwrap().unwrap();
        assert_eq!(course.course_name.as_deref(), Some("MBA"));

        assert!(fetch_by_id::<Course>(&store, "999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_wrong_typed_optional_field_is_dropped_not_the_record() {
        let store = MemoryStore::new().with_collection(
            "courses",
            vec![json!({
                "_id": "odd",
                "courseName": 42,
                "courseImage": {"url": "x.jpg"},
                "programType": "PG"
            })],
        );

        let courses = fetch_all::<Course>(&store).await.unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].course_name, None);
        assert_eq!(courses[0].program_type.as_deref(), Some("PG"));

        let course = fetch_by_id::<Course>(&store, "odd").await.unwrap().unwrap();
        assert_eq!(course.course_image, None);
    }

    #[tokio::test]
    async fn test_fetch_propagates_failure() {
        let store = MemoryStore::new().failing("courses");
        let err = fetch_all::<Course>(&store).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }
}
