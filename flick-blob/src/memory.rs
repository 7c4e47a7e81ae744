use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::RwLock;
use tracing::debug;

use crate::{BlobError, BlobResult, BlobStore, PutResult};

const URL_SCHEME: &str = "mem://";

#[derive(Debug, Clone)]
struct StoredBlob {
    data: Bytes,
    #[allow(dead_code)]
    content_type: Option<String>,
}

/// In-memory blob store for testing and development.
///
/// URLs take the form `mem://{key}`.
#[derive(Clone, Default)]
pub struct MemoryBlobStore {
    blobs: Arc<RwLock<HashMap<String, StoredBlob>>>,
    quota_bytes: Option<u64>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap total stored bytes; puts past the cap fail with `QuotaExceeded`
    pub fn with_quota_bytes(mut self, quota: u64) -> Self {
        self.quota_bytes = Some(quota);
        self
    }

    /// Number of stored objects
    pub fn len(&self) -> usize {
        self.blobs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.read().is_empty()
    }

    fn stored_bytes(&self) -> u64 {
        self.blobs
            .read()
            .values()
            .map(|b| b.data.len() as u64)
            .sum()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(
        &self,
        key: &str,
        content_type: Option<&str>,
        payload: Bytes,
    ) -> BlobResult<PutResult> {
        if key.is_empty() {
            return Err(BlobError::invalid("empty blob key"));
        }

        if let Some(quota) = self.quota_bytes {
            if self.stored_bytes() + payload.len() as u64 > quota {
                return Err(BlobError::quota_exceeded(format!(
                    "{} bytes would exceed quota of {} bytes",
                    payload.len(),
                    quota
                )));
            }
        }

        let size_bytes = payload.len() as u64;
        let url = format!("{URL_SCHEME}{key}");

        self.blobs.write().insert(
            key.to_string(),
            StoredBlob {
                data: payload,
                content_type: content_type.map(str::to_string),
            },
        );
        debug!(key, size_bytes, "stored blob in memory");

        Ok(PutResult {
            url,
            size_bytes,
            etag: None,
        })
    }

    async fn get(&self, url: &str) -> BlobResult<Bytes> {
        let key = url
            .strip_prefix(URL_SCHEME)
            .ok_or_else(|| BlobError::invalid(format!("not a memory blob url: {url}")))?;

        self.blobs
            .read()
            .get(key)
            .map(|blob| blob.data.clone())
            .ok_or_else(|| BlobError::not_found(url))
    }

    async fn delete(&self, key: &str) -> BlobResult<()> {
        self.blobs.write().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let store = MemoryBlobStore::new();

        let put = store
            .put("posts/u/1.jpg", Some("image/jpeg"), Bytes::from_static(b"abc"))
            .await
            .unwrap();

        assert_eq!(put.url, "mem://posts/u/1.jpg");
        assert_eq!(put.size_bytes, 3);
        assert_eq!(&store.get(&put.url).await.unwrap()[..], b"abc");
    }

    #[tokio::test]
    async fn overwrite_is_tolerated() {
        let store = MemoryBlobStore::new();

        store
            .put("posts/u/1.jpg", None, Bytes::from_static(b"old"))
            .await
            .unwrap();
        let put = store
            .put("posts/u/1.jpg", None, Bytes::from_static(b"new"))
            .await
            .unwrap();

        assert_eq!(&store.get(&put.url).await.unwrap()[..], b"new");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn get_unknown_url_is_not_found() {
        let store = MemoryBlobStore::new();

        let err = store.get("mem://missing").await.unwrap_err();
        assert!(matches!(err, BlobError::NotFound { .. }));
    }

    #[tokio::test]
    async fn quota_is_enforced() {
        let store = MemoryBlobStore::new().with_quota_bytes(4);

        store
            .put("a", None, Bytes::from_static(b"12"))
            .await
            .unwrap();
        let err = store
            .put("b", None, Bytes::from_static(b"345"))
            .await
            .unwrap_err();

        assert!(matches!(err, BlobError::QuotaExceeded { .. }));
    }
}
