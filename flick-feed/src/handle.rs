use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use flick_store::FeedSnapshot;
use parking_lot::RwLock;
use tokio::task::JoinHandle;

/// State shared between a [`FeedHandle`] and its driver task
pub(crate) struct FeedShared {
    pub(crate) projection: RwLock<FeedSnapshot>,
    pub(crate) refreshing: AtomicBool,
    pub(crate) terminated: AtomicBool,
}

impl FeedShared {
    pub(crate) fn new() -> Self {
        Self {
            projection: RwLock::new(FeedSnapshot::default()),
            refreshing: AtomicBool::new(false),
            terminated: AtomicBool::new(false),
        }
    }
}

/// Handle to a standing feed subscription.
///
/// Dropping the handle does **not** tear the subscription down; call
/// [`unsubscribe`](Self::unsubscribe) exactly once when the consuming view
/// goes away, or the subscription lives for the rest of the process.
pub struct FeedHandle {
    shared: Arc<FeedShared>,
    task: JoinHandle<()>,
    unsubscribed: AtomicBool,
}

impl FeedHandle {
    pub(crate) fn new(shared: Arc<FeedShared>, task: JoinHandle<()>) -> Self {
        Self {
            shared,
            task,
            unsubscribed: AtomicBool::new(false),
        }
    }

    /// The projection as of the latest delivery. Empty until the first
    /// snapshot arrives.
    pub fn current(&self) -> FeedSnapshot {
        self.shared.projection.read().clone()
    }

    /// Stop the subscription. Idempotent: the second and later calls do
    /// nothing, and no snapshot is delivered after the first call.
    pub fn unsubscribe(&self) {
        if !self.unsubscribed.swap(true, Ordering::SeqCst) {
            self.task.abort();
            self.shared.terminated.store(true, Ordering::SeqCst);
            self.shared.refreshing.store(false, Ordering::SeqCst);
        }
    }

    /// Signal a user-initiated refresh.
    ///
    /// Delivery is push-based and already current, so no pull is issued;
    /// the refreshing flag simply clears on the next delivery. Carried
    /// as-is from the source UI, where the refresh control exists to run
    /// a spinner.
    pub fn refresh(&self) {
        if self.is_terminated() {
            // Nothing will ever clear it, so don't raise it
            return;
        }
        self.shared.refreshing.store(true, Ordering::SeqCst);
    }

    /// Whether a refresh gesture is still waiting for its next delivery
    pub fn is_refreshing(&self) -> bool {
        self.shared.refreshing.load(Ordering::SeqCst)
    }

    /// True once the subscription has ended: unsubscribed, stream
    /// exhausted, or a subscription error was delivered.
    pub fn is_terminated(&self) -> bool {
        self.shared.terminated.load(Ordering::SeqCst) || self.unsubscribed.load(Ordering::SeqCst)
    }
}
