use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;
use uuid::Uuid;

use crate::{BlobError, BlobResult, BlobStore, PutResult};

const URL_SCHEME: &str = "file://";

/// Filesystem-backed blob store.
///
/// Objects live under a root directory, keyed by their storage key; URLs
/// take the form `file://{root}/{key}`. Writes go to a temporary sibling
/// first and are renamed into place, so readers never observe a partial
/// object.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    /// Create a store rooted at `root`. The directory is created on first put.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve_key(&self, key: &str) -> BlobResult<PathBuf> {
        if key.is_empty() {
            return Err(BlobError::invalid("empty blob key"));
        }
        let relative = Path::new(key);
        let traversal = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if traversal {
            return Err(BlobError::invalid(format!(
                "blob key '{key}' escapes the store root"
            )));
        }
        Ok(self.root.join(relative))
    }

    fn resolve_url(&self, url: &str) -> BlobResult<PathBuf> {
        let path = url
            .strip_prefix(URL_SCHEME)
            .ok_or_else(|| BlobError::invalid(format!("not a file blob url: {url}")))?;
        let path = PathBuf::from(path);
        if !path.starts_with(&self.root) {
            return Err(BlobError::permission_denied(path.display().to_string()));
        }
        Ok(path)
    }

    fn map_io(key: &str, err: std::io::Error) -> BlobError {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => BlobError::permission_denied(key),
            _ => BlobError::Io { source: err },
        }
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn put(
        &self,
        key: &str,
        _content_type: Option<&str>,
        payload: Bytes,
    ) -> BlobResult<PutResult> {
        let path = self.resolve_key(key)?;
        let parent = path
            .parent()
            .ok_or_else(|| BlobError::invalid(format!("blob key '{key}' has no parent")))?;

        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| Self::map_io(key, e))?;

        // tmp-then-rename keeps concurrent readers off partial writes
        let tmp = parent.join(format!(".tmp-{}", Uuid::new_v4().simple()));
        tokio::fs::write(&tmp, &payload)
            .await
            .map_err(|e| Self::map_io(key, e))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| Self::map_io(key, e))?;

        let size_bytes = payload.len() as u64;
        debug!(key, size_bytes, "stored blob on filesystem");

        Ok(PutResult {
            url: format!("{URL_SCHEME}{}", path.display()),
            size_bytes,
            etag: None,
        })
    }

    async fn get(&self, url: &str) -> BlobResult<Bytes> {
        let path = self.resolve_url(url)?;
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(BlobError::not_found(url)),
            Err(e) => Err(Self::map_io(url, e)),
        }
    }

    async fn delete(&self, key: &str) -> BlobResult<()> {
        let path = self.resolve_key(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::map_io(key, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsBlobStore::new(dir.path());

        let put = store
            .put("posts/u/1.jpg", Some("image/jpeg"), Bytes::from_static(b"jpeg-bytes"))
            .await
            .unwrap();

        assert!(put.url.starts_with("file://"));
        assert_eq!(&store.get(&put.url).await.unwrap()[..], b"jpeg-bytes");
    }

    #[tokio::test]
    async fn traversal_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsBlobStore::new(dir.path());

        let err = store
            .put("../escape.jpg", None, Bytes::from_static(b"x"))
            .await
            .unwrap_err();
        assert!(matches!(err, BlobError::Invalid { .. }));
    }

    #[tokio::test]
    async fn urls_outside_root_are_denied() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsBlobStore::new(dir.path());

        let err = store.get("file:///etc/passwd").await.unwrap_err();
        assert!(matches!(err, BlobError::PermissionDenied { .. }));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsBlobStore::new(dir.path());

        store
            .put("posts/u/1.jpg", None, Bytes::from_static(b"x"))
            .await
            .unwrap();
        store.delete("posts/u/1.jpg").await.unwrap();
        store.delete("posts/u/1.jpg").await.unwrap();
    }
}
