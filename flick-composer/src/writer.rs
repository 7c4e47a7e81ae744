use std::sync::Arc;

use chrono::Utc;
use flick_blob::{
    AuthorKeyStrategy, BlobConfig, BlobError, BlobKeyStrategy, BlobStore, MediaHandle, MediaSource,
};
use flick_core::{Identity, NewPost, PostId, DEFAULT_DISPLAY_NAME, MAX_CAPTION_CHARS};
use flick_store::PostCollection;
use tracing::{debug, info};

use crate::{PublishError, ValidationError};

/// Publishes a validated draft as a durable post.
///
/// All collaborators are injected at construction. The pipeline is
/// strictly sequential: read media, upload, and only append the record
/// once the upload has returned a durable URL, so no feed snapshot can
/// contain a post whose media is not yet fetchable. Any failure aborts
/// the whole operation with no partial record written, and nothing is
/// retried internally; retries are user-initiated.
pub struct PostWriter {
    media: Arc<dyn MediaSource>,
    blobs: Arc<dyn BlobStore>,
    posts: Arc<dyn PostCollection>,
    identity: Arc<dyn Identity>,
    keys: Arc<dyn BlobKeyStrategy>,
    config: BlobConfig,
}

impl PostWriter {
    pub fn new(
        media: Arc<dyn MediaSource>,
        blobs: Arc<dyn BlobStore>,
        posts: Arc<dyn PostCollection>,
        identity: Arc<dyn Identity>,
    ) -> Self {
        Self {
            media,
            blobs,
            posts,
            identity,
            keys: Arc::new(AuthorKeyStrategy::new()),
            config: BlobConfig::default(),
        }
    }

    /// Use a custom key strategy
    pub fn with_key_strategy<K: BlobKeyStrategy + 'static>(mut self, keys: K) -> Self {
        self.keys = Arc::new(keys);
        self
    }

    /// Use a custom blob config
    pub fn with_config(mut self, config: BlobConfig) -> Self {
        self.config = config;
        self
    }

    /// Publish a post: validate, read the media, upload it, then commit
    /// the record.
    pub async fn publish(
        &self,
        caption: &str,
        media: &MediaHandle,
    ) -> Result<PostId, PublishError> {
        let caption = caption.trim();
        if caption.is_empty() {
            return Err(ValidationError::MissingCaption.into());
        }
        let len = caption.chars().count();
        if len > MAX_CAPTION_CHARS {
            return Err(ValidationError::CaptionTooLong {
                len,
                max: MAX_CAPTION_CHARS,
            }
            .into());
        }

        // Never write a record with a null author
        let author_id = self
            .identity
            .user_id()
            .ok_or(ValidationError::NotAuthenticated)?;
        let author_name = self
            .identity
            .display_name()
            .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string());

        let payload = self.media.read(media).await?;
        if payload.bytes.len() as u64 > self.config.max_blob_bytes {
            return Err(PublishError::Upload(BlobError::invalid(format!(
                "media is {} bytes, the maximum is {}",
                payload.bytes.len(),
                self.config.max_blob_bytes
            ))));
        }

        let created_at = Utc::now();
        let key = self
            .keys
            .object_key(&author_id, payload.content_type.as_deref(), created_at);
        debug!(%media, key, size = payload.bytes.len(), "uploading post media");

        let put = self
            .blobs
            .put(&key, payload.content_type.as_deref(), payload.bytes)
            .await?;

        // The record is appended only now that the URL is durable
        let id = self
            .posts
            .add(NewPost {
                caption: caption.to_string(),
                media_url: put.url,
                author_id: author_id.clone(),
                author_name,
                created_at,
            })
            .await?;

        info!(post_id = %id, author_id = %author_id, "post published");
        Ok(id)
    }
}
