//! # flick-blob: blob storage infrastructure for Flick
//!
//! `flick-blob` owns the binary half of the publish pipeline: getting a
//! locally-captured media payload into durable storage and handing back a
//! URL that is immediately fetchable by any authorized reader.
//!
//! ## Key pieces
//!
//! - **[`BlobStore`]**: the storage seam. `put` writes under a caller-chosen
//!   key (overwrite tolerated) and returns a durable URL; `get` resolves a
//!   URL back to bytes; `delete` supports per-author cleanup.
//! - **[`BlobKeyStrategy`]** / **[`AuthorKeyStrategy`]**: keys are prefixed
//!   by author id and suffixed with a timestamp plus a random component, so
//!   concurrent uploads never collide and an author's objects can be swept
//!   as one namespace.
//! - **[`MediaSource`]**: resolves a [`MediaHandle`] (a locally-picked
//!   image) into bytes before upload.
//! - **Backends**: [`MemoryBlobStore`] for tests and development,
//!   [`FsBlobStore`] for durable local storage with atomic writes.
//!
//! ## Quick start
//!
//! ```rust
//! use bytes::Bytes;
//! use flick_blob::{BlobStore, MemoryBlobStore};
//!
//! # #[tokio::main]
//! # async fn main() -> flick_blob::BlobResult<()> {
//! let store = MemoryBlobStore::new();
//! let put = store.put("posts/user-1/1.jpg", Some("image/jpeg"), Bytes::from_static(b"jpeg")).await?;
//!
//! // The returned URL is fetchable the moment put returns
//! let bytes = store.get(&put.url).await?;
//! assert_eq!(&bytes[..], b"jpeg");
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod fs;
mod keys;
mod media;
mod memory;
mod store;

pub use config::BlobConfig;
pub use error::{BlobError, BlobResult};
pub use fs::FsBlobStore;
pub use keys::{extension_for_content_type, AuthorKeyStrategy, BlobKeyStrategy};
pub use media::{
    FsMediaSource, MediaError, MediaHandle, MediaPayload, MediaResult, MediaSource,
    MemoryMediaSource,
};
pub use memory::MemoryBlobStore;
pub use store::{BlobStore, PutResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        BlobConfig, BlobError, BlobResult, BlobStore, MediaHandle, MediaSource, PutResult,
    };
}
