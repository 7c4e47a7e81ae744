use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use flick_core::{Comment, NewPost, PostId, PostRecord};
use parking_lot::RwLock;
use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::{
    FeedSnapshot, PostCollection, SnapshotStream, StoreError, StoreResult, SubscriptionError,
};

/// In-memory post collection for testing and development.
///
/// Documents are held raw (`serde_json::Value`), the way a remote document
/// store delivers them, and validated into [`PostRecord`]s on every
/// snapshot rebuild. A document that fails validation is skipped with a
/// logged anomaly; it never reaches a subscriber.
pub struct MemoryPostStore {
    documents: Arc<RwLock<HashMap<PostId, Value>>>,
    revision: AtomicU64,
    snapshot_tx: watch::Sender<FeedSnapshot>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        let (snapshot_tx, _) = watch::channel(FeedSnapshot::default());
        Self {
            documents: Arc::new(RwLock::new(HashMap::new())),
            revision: AtomicU64::new(0),
            snapshot_tx,
        }
    }

    /// The snapshot a new subscriber would see right now
    pub fn current(&self) -> FeedSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Number of stored documents, malformed ones included
    pub fn document_count(&self) -> usize {
        self.documents.read().len()
    }

    /// Insert a raw document under an explicit id.
    ///
    /// Escape hatch for legacy migrations and tests; the document still
    /// passes through read-boundary validation before any subscriber
    /// sees it.
    pub fn insert_document(&self, id: PostId, document: Value) {
        let mut documents = self.documents.write();
        documents.insert(id, document);
        self.republish(&documents);
    }

    /// Remove a document, as a remote client or admin sweep would
    pub fn remove_document(&self, id: &PostId) {
        let mut documents = self.documents.write();
        if documents.remove(id).is_some() {
            self.republish(&documents);
        }
    }

    /// Overwrite the like counter on a post. Inert bookkeeping; the only
    /// feed-side effect is a fresh snapshot delivery.
    pub fn set_like_count(&self, id: &PostId, like_count: u64) -> StoreResult<()> {
        let mut documents = self.documents.write();
        let doc = documents
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found(id.as_str()))?;
        let obj = doc
            .as_object_mut()
            .ok_or_else(|| StoreError::write(format!("document '{id}' is not an object")))?;
        obj.insert("likeCount".to_string(), Value::from(like_count));
        self.republish(&documents);
        Ok(())
    }

    /// Append a comment to a post. Inert bookkeeping, as with likes.
    pub fn push_comment(&self, id: &PostId, comment: Comment) -> StoreResult<()> {
        let mut documents = self.documents.write();
        let doc = documents
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found(id.as_str()))?;

        let rendered = serde_json::to_value(&comment)
            .map_err(|e| StoreError::write(format!("unserializable comment: {e}")))?;
        let obj = doc
            .as_object_mut()
            .ok_or_else(|| StoreError::write(format!("document '{id}' is not an object")))?;
        match obj.get_mut("comments") {
            Some(Value::Array(comments)) => comments.push(rendered),
            _ => {
                obj.insert("comments".to_string(), Value::Array(vec![rendered]));
            }
        }
        self.republish(&documents);
        Ok(())
    }

    /// Rebuild the ordered snapshot and push it to every subscriber.
    /// Callers hold the document write lock, so revisions are monotone
    /// with content.
    fn republish(&self, documents: &HashMap<PostId, Value>) {
        let mut posts = Vec::with_capacity(documents.len());
        for (id, doc) in documents {
            match PostRecord::from_document(id.clone(), doc) {
                Ok(record) => posts.push(record),
                Err(err) => {
                    warn!(post_id = %id, error = %err, "skipping malformed post document");
                }
            }
        }

        let revision = self.revision.fetch_add(1, Ordering::SeqCst) + 1;
        let snapshot = FeedSnapshot::new(revision, posts);
        debug!(revision, posts = snapshot.len(), "republishing feed snapshot");
        self.snapshot_tx.send_replace(snapshot);
    }
}

impl Default for MemoryPostStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostCollection for MemoryPostStore {
    async fn add(&self, post: NewPost) -> StoreResult<PostId> {
        let id = PostId::new();
        let document = post.to_document();

        let mut documents = self.documents.write();
        documents.insert(id.clone(), document);
        self.republish(&documents);

        Ok(id)
    }

    fn subscribe(&self) -> SnapshotStream {
        let mut rx = self.snapshot_tx.subscribe();
        Box::pin(async_stream::stream! {
            loop {
                let snapshot = rx.borrow_and_update().clone();
                yield Ok(snapshot);
                if rx.changed().await.is_err() {
                    yield Err(SubscriptionError::Closed);
                    return;
                }
            }
        })
    }
}
