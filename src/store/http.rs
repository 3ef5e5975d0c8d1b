//! HTTP client for a remote content API.
//!
//! Reads collections with `GET {base}/collections/{collection}/items` and
//! single records with `GET {base}/collections/{collection}/items/{id}`.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::StatusCode;
use serde_json::Value;

use super::{items_from_payload, RecordStore, StoreError};

/// Record store backed by a remote content API
pub struct HttpStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStore {
    /// Create a client for the API rooted at `base_url`
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn collection_url(&self, collection: &str) -> String {
        format!(
            "{}/collections/{}/items",
            self.base_url,
            utf8_percent_encode(collection, NON_ALPHANUMERIC)
        )
    }

    fn item_url(&self, collection: &str, id: &str) -> String {
        format!(
            "{}/{}",
            self.collection_url(collection),
            utf8_percent_encode(id, NON_ALPHANUMERIC)
        )
    }

    /// Turn a non-success status into [`StoreError::Api`]
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(StoreError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl RecordStore for HttpStore {
    fn backend_tag(&self) -> &'static str {
        "http"
    }

    async fn get_all(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        let response = self
            .client
            .get(self.collection_url(collection))
            .send()
            .await?;
        let payload: Value = Self::ensure_success(response).await?.json().await?;
        items_from_payload(payload)
    }

    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
        let response = self
            .client
            .get(self.item_url(collection, id))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let payload: Value = Self::ensure_success(response).await?.json().await?;
        Ok(match payload {
            Value::Null => None,
            Value::Object(mut map) if map.contains_key("item") && !map.contains_key("_id") => {
                map.remove("item").filter(|v| !v.is_null())
            }
            other => Some(other),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let store = HttpStore::new("https://cms.example.com/api/".to_string());
        assert_eq!(
            store.collection_url("courses"),
            "https://cms.example.com/api/collections/courses/items"
        );
        assert_eq!(
            store.item_url("courses", "a b/1"),
            "https://cms.example.com/api/collections/courses/items/a%20b%2F1"
        );
    }

    #[tokio::test]
    async fn test_unreachable_host_is_request_error() {
        let store = HttpStore::new("http://127.0.0.1:9".to_string());
        let err = store.get_all("courses").await.unwrap_err();
        assert!(matches!(err, StoreError::Request(_)));
    }
}
