//! # flick-store: the subscribable post collection
//!
//! `flick-store` is the document side of the pipeline: an append-only
//! collection of post records that any number of clients observe through a
//! standing subscription.
//!
//! ## Delivery model
//!
//! The store is push-based and snapshot-oriented: every change to the
//! collection (insert, counter update, raw document injection) republishes
//! the **full current result set**, ordered by `created_at` descending with
//! ties broken by id ascending. Subscribers replace their view wholesale;
//! there is no diffing and no patch protocol, which sidesteps lost-update
//! and out-of-order-patch bugs at the cost of re-rendering per update.
//!
//! A subscription is a lazy, infinite stream of [`FeedSnapshot`]s. It
//! yields the current snapshot immediately, then one snapshot per change.
//! An error is delivered at most once, after which the stream is terminated
//! and the consumer must subscribe again.
//!
//! ## Validation boundary
//!
//! [`MemoryPostStore`] holds raw JSON documents, the shape legacy stores
//! actually contain. Documents are validated into typed [`PostRecord`]s at
//! the read boundary; a malformed document is skipped with a logged anomaly
//! and never reaches a projection.
//!
//! [`PostRecord`]: flick_core::PostRecord

mod collection;
mod error;
mod memory;
mod snapshot;

pub use collection::{PostCollection, SnapshotStream};
pub use error::{StoreError, StoreResult, SubscriptionError};
pub use memory::MemoryPostStore;
pub use snapshot::FeedSnapshot;
