//! # flick-feed: the live feed projection
//!
//! `flick-feed` keeps a client-side, ordered view of the post collection in
//! sync as the backing store changes, without duplicate, missing, or
//! out-of-order entries, and without blocking the caller.
//!
//! A [`FeedSubscriber`] opens exactly one standing subscription against an
//! injected [`PostCollection`] and drives it from a background task. Each
//! delivered snapshot **replaces** the projection wholesale; there is no
//! merge or patch logic to get wrong. Consumers that need fine-grained
//! change events diff against their previous snapshot themselves.
//!
//! ```rust
//! use std::sync::Arc;
//! use flick_feed::FeedSubscriber;
//! use flick_store::MemoryPostStore;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let store = Arc::new(MemoryPostStore::new());
//! let handle = FeedSubscriber::new(store).subscribe(|snapshot| {
//!     println!("feed now has {} posts", snapshot.len());
//! });
//!
//! // ... screen teardown:
//! handle.unsubscribe();
//! # }
//! ```
//!
//! [`PostCollection`]: flick_store::PostCollection

mod handle;
mod subscriber;

pub use handle::FeedHandle;
pub use subscriber::FeedSubscriber;
