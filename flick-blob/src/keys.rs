use chrono::{DateTime, Utc};
use flick_core::AuthorId;
use uuid::Uuid;

/// Strategy for generating blob keys
pub trait BlobKeyStrategy: Send + Sync {
    /// Generate a storage key for a post's media, unique per submission
    fn object_key(
        &self,
        author_id: &AuthorId,
        content_type: Option<&str>,
        at: DateTime<Utc>,
    ) -> String;
}

/// Default key strategy: `posts/{author_id}/{millis}-{random}.{ext}`.
///
/// The author prefix supports per-author cleanup and quota policy; the
/// millisecond timestamp plus random suffix keeps concurrent uploads from
/// the same or different users from ever colliding.
#[derive(Debug, Clone)]
pub struct AuthorKeyStrategy {
    prefix: String,
}

impl AuthorKeyStrategy {
    pub fn new() -> Self {
        Self {
            prefix: "posts".to_string(),
        }
    }

    /// Use a different top-level prefix
    pub fn with_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.prefix = prefix.into();
        self
    }
}

impl Default for AuthorKeyStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl BlobKeyStrategy for AuthorKeyStrategy {
    fn object_key(
        &self,
        author_id: &AuthorId,
        content_type: Option<&str>,
        at: DateTime<Utc>,
    ) -> String {
        format!(
            "{}/{}/{}-{}.{}",
            self.prefix,
            author_id,
            at.timestamp_millis(),
            Uuid::new_v4().simple(),
            extension_for_content_type(content_type),
        )
    }
}

/// Map a media content type to a storage key extension
pub fn extension_for_content_type(content_type: Option<&str>) -> &'static str {
    match content_type {
        Some("image/jpeg") => "jpg",
        Some("image/png") => "png",
        Some("image/gif") => "gif",
        Some("image/webp") => "webp",
        _ => "bin",
    }
}
