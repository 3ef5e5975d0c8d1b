//! Record store reading JSON snapshots from a directory

use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};

use super::{items_from_payload, raw_id, RecordStore, StoreError};

/// Record store reading `<dir>/<collection>.json`.
///
/// A missing file is an empty collection. Files are re-read on every call,
/// so edits show up on the next request.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store over the given data directory
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Path of the snapshot file for a collection
    pub fn collection_path(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{}.json", collection))
    }
}

#[async_trait]
impl RecordStore for FileStore {
    fn backend_tag(&self) -> &'static str {
        "file"
    }

    async fn get_all(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        let path = self.collection_path(collection);

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No snapshot for {} at {:?}", collection, path);
                return Ok(Vec::new());
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        items_from_payload(serde_json::from_str(&content)?)
    }

    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
        let items = self.get_all(collection).await?;
        Ok(items.into_iter().find(|item| raw_id(item) == Some(id)))
    }
}
