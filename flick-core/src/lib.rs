//! # flick-core: shared vocabulary for the Flick pipeline
//!
//! `flick-core` holds the types every other Flick crate speaks:
//!
//! - **Post schema**: [`PostRecord`], [`NewPost`], [`Comment`] and the
//!   strict document validation that sits between a raw stored document
//!   and the typed record the UI layer sees.
//! - **Ids**: [`PostId`] and [`AuthorId`] newtypes.
//! - **Identity seam**: the [`Identity`] trait supplying the current
//!   author, injected into the publish pipeline instead of reached
//!   through a global handle.
//! - **Feed ordering**: [`PostRecord::feed_cmp`], the single comparator
//!   (`created_at` descending, id ascending on ties) every snapshot
//!   producer uses, so projections are deterministic across backends.
//!
//! Storage backends live in `flick-blob` and `flick-store`; the publish
//! pipeline lives in `flick-composer`; the live feed in `flick-feed`.

mod identity;
mod ids;
mod post;

pub use identity::{Identity, StaticIdentity, DEFAULT_DISPLAY_NAME};
pub use ids::{AuthorId, PostId};
pub use post::{
    Comment, DocumentError, NewPost, PostRecord, MAX_CAPTION_CHARS,
};
