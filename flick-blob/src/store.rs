use async_trait::async_trait;
use bytes::Bytes;

use crate::BlobResult;

/// Core blob storage operations - must be implemented by all storage backends
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store a blob under `key` and return a durable URL for it.
    ///
    /// Overwrites any existing object at `key`. Keys are designed to be
    /// unique per upload, so overwrite is not expected in practice but must
    /// be tolerated, not rejected. On success the returned URL must be
    /// immediately fetchable by any client with read permission on the
    /// namespace.
    async fn put(
        &self,
        key: &str,
        content_type: Option<&str>,
        payload: Bytes,
    ) -> BlobResult<PutResult>;

    /// Fetch a blob by the durable URL `put` returned
    async fn get(&self, url: &str) -> BlobResult<Bytes>;

    /// Delete the blob at `key`. Used for per-author namespace cleanup.
    async fn delete(&self, key: &str) -> BlobResult<()>;
}

/// Result of a successful put operation
#[derive(Debug, Clone)]
pub struct PutResult {
    /// Durable fetch URL for the stored object
    pub url: String,
    pub size_bytes: u64,
    pub etag: Option<String>,
}
