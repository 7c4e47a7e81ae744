use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::RwLock;
use thiserror::Error;

/// Result type for media reads
pub type MediaResult<T> = Result<T, MediaError>;

/// Handle to a locally-picked media resource (camera roll entry, file path)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaHandle(pub String);

impl MediaHandle {
    /// Create from existing string
    pub fn from_string(handle: String) -> Self {
        Self(handle)
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MediaHandle {
    fn from(handle: &str) -> Self {
        Self(handle.to_string())
    }
}

impl std::fmt::Display for MediaHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors resolving a media handle to bytes
#[derive(Error, Debug)]
pub enum MediaError {
    #[error("no media behind handle '{handle}'")]
    NotFound { handle: String },

    #[error("permission to read '{handle}' was denied or revoked")]
    PermissionDenied { handle: String },

    #[error("media behind '{handle}' is unreadable: {message}")]
    Unreadable { handle: String, message: String },
}

/// A resolved local media payload, ready for upload
#[derive(Debug, Clone)]
pub struct MediaPayload {
    pub bytes: Bytes,
    pub content_type: Option<String>,
}

/// Resolves a locally-picked media handle into a binary payload.
///
/// This is the read side of the publish pipeline; permission may be revoked
/// between picking and reading, so every read can fail.
#[async_trait]
pub trait MediaSource: Send + Sync {
    async fn read(&self, handle: &MediaHandle) -> MediaResult<MediaPayload>;
}

/// Media source that treats handles as filesystem paths
#[derive(Debug, Clone, Default)]
pub struct FsMediaSource;

impl FsMediaSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MediaSource for FsMediaSource {
    async fn read(&self, handle: &MediaHandle) -> MediaResult<MediaPayload> {
        match tokio::fs::read(handle.as_str()).await {
            Ok(data) => Ok(MediaPayload {
                bytes: Bytes::from(data),
                content_type: content_type_for_path(handle.as_str()),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(MediaError::NotFound {
                handle: handle.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                Err(MediaError::PermissionDenied {
                    handle: handle.to_string(),
                })
            }
            Err(e) => Err(MediaError::Unreadable {
                handle: handle.to_string(),
                message: e.to_string(),
            }),
        }
    }
}

fn content_type_for_path(path: &str) -> Option<String> {
    let ext = Path::new(path).extension()?.to_str()?;
    let ct = match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => return None,
    };
    Some(ct.to_string())
}

/// In-memory media source for tests and development
#[derive(Clone, Default)]
pub struct MemoryMediaSource {
    media: Arc<RwLock<HashMap<String, MediaPayload>>>,
}

impl MemoryMediaSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a payload behind a handle
    pub fn with_media(
        self,
        handle: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
        content_type: impl Into<String>,
    ) -> Self {
        self.media.write().insert(
            handle.into(),
            MediaPayload {
                bytes: Bytes::from(bytes.into()),
                content_type: Some(content_type.into()),
            },
        );
        self
    }

    /// Drop a handle, simulating permission revoked mid-flow
    pub fn revoke(&self, handle: &str) {
        self.media.write().remove(handle);
    }
}

#[async_trait]
impl MediaSource for MemoryMediaSource {
    async fn read(&self, handle: &MediaHandle) -> MediaResult<MediaPayload> {
        self.media
            .read()
            .get(handle.as_str())
            .cloned()
            .ok_or_else(|| MediaError::NotFound {
                handle: handle.to_string(),
            })
    }
}
