use std::pin::Pin;

use async_trait::async_trait;
use flick_core::{NewPost, PostId};
use futures_core::Stream;

use crate::{FeedSnapshot, StoreResult, SubscriptionError};

/// Lazy, infinite stream of full collection snapshots.
///
/// Yields the current snapshot immediately on subscribe, then one snapshot
/// per collection change. An `Err` item arrives at most once and terminates
/// the stream; it is not restartable, the consumer must subscribe again.
pub type SnapshotStream =
    Pin<Box<dyn Stream<Item = Result<FeedSnapshot, SubscriptionError>> + Send>>;

/// An append-only, subscribable collection of post records
#[async_trait]
pub trait PostCollection: Send + Sync {
    /// Append a record. The collection assigns and returns the id;
    /// `like_count` starts at zero and `comments` empty.
    async fn add(&self, post: NewPost) -> StoreResult<PostId>;

    /// Open a standing subscription delivering full ordered snapshots
    fn subscribe(&self) -> SnapshotStream;
}
