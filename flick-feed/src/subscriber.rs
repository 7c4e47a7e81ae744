use std::sync::atomic::Ordering;
use std::sync::Arc;

use flick_store::{FeedSnapshot, PostCollection, SubscriptionError};
use futures_util::StreamExt;
use tracing::{debug, warn};

use crate::handle::{FeedHandle, FeedShared};

type ErrorHandler = Arc<dyn Fn(SubscriptionError) + Send + Sync>;

/// Opens standing subscriptions against a post collection.
///
/// The collection is injected at construction, so tests and alternative
/// backends drop in without touching the consumer.
pub struct FeedSubscriber {
    posts: Arc<dyn PostCollection>,
    on_error: Option<ErrorHandler>,
}

impl FeedSubscriber {
    pub fn new(posts: Arc<dyn PostCollection>) -> Self {
        Self {
            posts,
            on_error: None,
        }
    }

    /// Receive the terminal subscription error, if one ever arrives.
    /// Without a handler the error is logged and the subscription ends
    /// the same way.
    pub fn with_error_handler(
        mut self,
        handler: impl Fn(SubscriptionError) + Send + Sync + 'static,
    ) -> Self {
        self.on_error = Some(Arc::new(handler));
        self
    }

    /// Open a standing subscription and drive it from a background task.
    ///
    /// `on_snapshot` runs once per delivery with the full ordered snapshot
    /// after the shared projection has been replaced wholesale. Must be
    /// called within a Tokio runtime.
    pub fn subscribe<F>(&self, on_snapshot: F) -> FeedHandle
    where
        F: Fn(&FeedSnapshot) + Send + Sync + 'static,
    {
        let shared = Arc::new(FeedShared::new());
        let task_shared = Arc::clone(&shared);
        let on_error = self.on_error.clone();
        let mut stream = self.posts.subscribe();

        let task = tokio::spawn(async move {
            while let Some(item) = stream.next().await {
                match item {
                    Ok(snapshot) => {
                        // Authoritative replacement; nothing is merged
                        *task_shared.projection.write() = snapshot.clone();
                        task_shared.refreshing.store(false, Ordering::SeqCst);
                        debug!(
                            revision = snapshot.revision(),
                            posts = snapshot.len(),
                            "feed snapshot applied"
                        );
                        on_snapshot(&snapshot);
                    }
                    Err(err) => {
                        match &on_error {
                            Some(handler) => handler(err),
                            None => warn!(error = %err, "feed subscription terminated"),
                        }
                        break;
                    }
                }
            }
            task_shared.terminated.store(true, Ordering::SeqCst);
            task_shared.refreshing.store(false, Ordering::SeqCst);
        });

        FeedHandle::new(shared, task)
    }
}
