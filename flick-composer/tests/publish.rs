use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use flick_blob::{
    BlobError, BlobResult, BlobStore, MediaHandle, MemoryBlobStore, MemoryMediaSource, PutResult,
};
use flick_composer::{Composer, DraftStatus, PostWriter, PublishError, ValidationError};
use flick_core::{Identity, NewPost, PostId, StaticIdentity, DEFAULT_DISPLAY_NAME};
use flick_store::{MemoryPostStore, PostCollection, SnapshotStream, StoreError, StoreResult};

/// Test factory functions
fn test_media() -> Arc<MemoryMediaSource> {
    Arc::new(MemoryMediaSource::new().with_media("pic-1", b"jpeg-bytes".to_vec(), "image/jpeg"))
}

fn test_identity() -> Arc<StaticIdentity> {
    Arc::new(StaticIdentity::new("user-1").with_display_name("Ada"))
}

fn test_writer(
    blobs: Arc<dyn BlobStore>,
    posts: Arc<dyn PostCollection>,
    identity: Arc<dyn Identity>,
) -> PostWriter {
    PostWriter::new(test_media(), blobs, posts, identity)
}

/// Blob store that fails every put with a network error
struct FailingBlobStore;

#[async_trait]
impl BlobStore for FailingBlobStore {
    async fn put(&self, _key: &str, _ct: Option<&str>, _payload: Bytes) -> BlobResult<PutResult> {
        Err(BlobError::network("connection reset mid-upload"))
    }

    async fn get(&self, url: &str) -> BlobResult<Bytes> {
        Err(BlobError::not_found(url))
    }

    async fn delete(&self, _key: &str) -> BlobResult<()> {
        Ok(())
    }
}

/// Blob store wrapper that records when an upload has completed
struct RecordingBlobStore {
    inner: MemoryBlobStore,
    uploaded: Arc<AtomicBool>,
}

#[async_trait]
impl BlobStore for RecordingBlobStore {
    async fn put(&self, key: &str, ct: Option<&str>, payload: Bytes) -> BlobResult<PutResult> {
        let result = self.inner.put(key, ct, payload).await?;
        self.uploaded.store(true, Ordering::SeqCst);
        Ok(result)
    }

    async fn get(&self, url: &str) -> BlobResult<Bytes> {
        self.inner.get(url).await
    }

    async fn delete(&self, key: &str) -> BlobResult<()> {
        self.inner.delete(key).await
    }
}

/// Collection wrapper that panics if a record arrives before its upload
struct SequencedCollection {
    inner: MemoryPostStore,
    uploaded: Arc<AtomicBool>,
}

#[async_trait]
impl PostCollection for SequencedCollection {
    async fn add(&self, post: NewPost) -> StoreResult<PostId> {
        assert!(
            self.uploaded.load(Ordering::SeqCst),
            "record appended before its media upload completed"
        );
        self.inner.add(post).await
    }

    fn subscribe(&self) -> SnapshotStream {
        self.inner.subscribe()
    }
}

/// Collection that refuses every append
struct FailingCollection;

#[async_trait]
impl PostCollection for FailingCollection {
    async fn add(&self, _post: NewPost) -> StoreResult<PostId> {
        Err(StoreError::write("document append rejected"))
    }

    fn subscribe(&self) -> SnapshotStream {
        Box::pin(tokio_stream::empty())
    }
}

/// P1. Happy path: the published record is complete and its media fetchable
#[tokio::test]
async fn test_publish_commits_record_with_fetchable_media() {
    let blobs = Arc::new(MemoryBlobStore::new());
    let posts = Arc::new(MemoryPostStore::new());
    let writer = test_writer(blobs.clone(), posts.clone(), test_identity());

    // Act
    let id = writer
        .publish("  first roll of the day  ", &MediaHandle::from("pic-1"))
        .await
        .unwrap();

    // Assert: record shape
    let snapshot = posts.current();
    assert_eq!(snapshot.len(), 1);
    let record = &snapshot.posts()[0];
    assert_eq!(record.id, id);
    assert_eq!(record.caption, "first roll of the day");
    assert_eq!(record.author_id.as_str(), "user-1");
    assert_eq!(record.author_name, "Ada");
    assert_eq!(record.like_count, 0);
    assert!(record.comments.is_empty());

    // Assert: the stored URL resolves to the uploaded bytes
    let bytes = blobs.get(&record.media_url).await.unwrap();
    assert_eq!(&bytes[..], b"jpeg-bytes");
}

/// P2. Validation failures never touch storage
#[tokio::test]
async fn test_validation_failures_attempt_no_io() {
    let blobs = Arc::new(MemoryBlobStore::new());
    let posts = Arc::new(MemoryPostStore::new());
    let writer = test_writer(blobs.clone(), posts.clone(), test_identity());

    for caption in ["", "   "] {
        let err = writer
            .publish(caption, &MediaHandle::from("pic-1"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PublishError::Validation(ValidationError::MissingCaption)
        ));
    }

    assert!(blobs.is_empty());
    assert_eq!(posts.document_count(), 0);
}

/// P3. No author, no record
#[tokio::test]
async fn test_unauthenticated_publish_is_rejected() {
    let blobs = Arc::new(MemoryBlobStore::new());
    let posts = Arc::new(MemoryPostStore::new());
    let writer = test_writer(
        blobs.clone(),
        posts.clone(),
        Arc::new(StaticIdentity::anonymous()),
    );

    let err = writer
        .publish("hello", &MediaHandle::from("pic-1"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PublishError::Validation(ValidationError::NotAuthenticated)
    ));
    assert!(blobs.is_empty());
    assert_eq!(posts.document_count(), 0);
}

/// P4. Missing display name falls back, missing id does not
#[tokio::test]
async fn test_display_name_fallback() {
    let posts = Arc::new(MemoryPostStore::new());
    let writer = test_writer(
        Arc::new(MemoryBlobStore::new()),
        posts.clone(),
        Arc::new(StaticIdentity::new("user-1")),
    );

    writer
        .publish("no profile name", &MediaHandle::from("pic-1"))
        .await
        .unwrap();

    assert_eq!(posts.current().posts()[0].author_name, DEFAULT_DISPLAY_NAME);
}

/// P5. Upload failure aborts the whole operation: collection unchanged
#[tokio::test]
async fn test_upload_failure_writes_no_record() {
    let posts = Arc::new(MemoryPostStore::new());
    let writer = test_writer(Arc::new(FailingBlobStore), posts.clone(), test_identity());

    let err = writer
        .publish("doomed", &MediaHandle::from("pic-1"))
        .await
        .unwrap_err();

    assert!(matches!(err, PublishError::Upload(BlobError::Network { .. })));
    assert_eq!(posts.document_count(), 0);
    assert!(posts.current().is_empty());
}

/// P6. Unreadable media aborts before any upload
#[tokio::test]
async fn test_media_read_failure_writes_nothing() {
    let blobs = Arc::new(MemoryBlobStore::new());
    let posts = Arc::new(MemoryPostStore::new());
    let writer = test_writer(blobs.clone(), posts.clone(), test_identity());

    let err = writer
        .publish("gone", &MediaHandle::from("revoked-handle"))
        .await
        .unwrap_err();

    assert!(matches!(err, PublishError::MediaRead(_)));
    assert!(blobs.is_empty());
    assert_eq!(posts.document_count(), 0);
}

/// P7. Write failure after a successful upload leaves only an orphaned blob
#[tokio::test]
async fn test_write_failure_after_upload_is_surfaced() {
    let blobs = Arc::new(MemoryBlobStore::new());
    let writer = test_writer(blobs.clone(), Arc::new(FailingCollection), test_identity());

    let err = writer
        .publish("half way", &MediaHandle::from("pic-1"))
        .await
        .unwrap_err();

    assert!(matches!(err, PublishError::Write(StoreError::Write { .. })));
    // The uploaded blob is orphaned but harmless; it is not auto-cleaned
    assert_eq!(blobs.len(), 1);
}

/// P8. Upload strictly precedes the record append
#[tokio::test]
async fn test_record_is_appended_only_after_upload_returns() {
    let uploaded = Arc::new(AtomicBool::new(false));
    let blobs = Arc::new(RecordingBlobStore {
        inner: MemoryBlobStore::new(),
        uploaded: uploaded.clone(),
    });
    let posts = Arc::new(SequencedCollection {
        inner: MemoryPostStore::new(),
        uploaded,
    });
    let writer = test_writer(blobs, posts.clone(), test_identity());

    writer
        .publish("ordered", &MediaHandle::from("pic-1"))
        .await
        .unwrap();
}

/// P9. Oversized media is rejected before upload
#[tokio::test]
async fn test_oversized_media_is_rejected() {
    let blobs = Arc::new(MemoryBlobStore::new());
    let media = Arc::new(MemoryMediaSource::new().with_media(
        "huge",
        vec![0u8; 64],
        "image/jpeg",
    ));
    let writer = PostWriter::new(
        media,
        blobs.clone(),
        Arc::new(MemoryPostStore::new()),
        test_identity(),
    )
    .with_config(flick_blob::BlobConfig::new().with_max_blob_bytes(16));

    let err = writer
        .publish("too big", &MediaHandle::from("huge"))
        .await
        .unwrap_err();

    assert!(matches!(err, PublishError::Upload(BlobError::Invalid { .. })));
    assert!(blobs.is_empty());
}

/// C1. Composer drives the draft through the full lifecycle
#[tokio::test]
async fn test_composer_happy_path() {
    let posts = Arc::new(MemoryPostStore::new());
    let writer = test_writer(Arc::new(MemoryBlobStore::new()), posts.clone(), test_identity());
    let mut composer = Composer::new(writer);

    composer.select_media(MediaHandle::from("pic-1")).unwrap();
    composer.set_caption("via composer").unwrap();

    let id = composer.submit().await.unwrap();

    assert_eq!(composer.status(), DraftStatus::Succeeded);
    assert_eq!(posts.current().posts()[0].id, id);
}

/// C2. A failed submission is retryable with everything retained
#[tokio::test]
async fn test_composer_failure_then_retry() {
    let media = test_media();
    let posts = Arc::new(MemoryPostStore::new());
    let identity = test_identity();

    // First attempt against a dead network
    let writer = PostWriter::new(
        media.clone(),
        Arc::new(FailingBlobStore),
        posts.clone(),
        identity.clone(),
    );
    let mut composer = Composer::new(writer);
    composer.select_media(MediaHandle::from("pic-1")).unwrap();
    composer.set_caption("worth keeping").unwrap();

    let err = composer.submit().await.unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(composer.status(), DraftStatus::Failed);
    assert!(composer.error_message().is_some());
    assert_eq!(composer.draft().caption(), "worth keeping");

    // Validation errors, by contrast, are not retryable as-is
    let validation = PublishError::Validation(ValidationError::MissingCaption);
    assert!(!validation.is_retryable());
}
