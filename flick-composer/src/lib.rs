//! # flick-composer: draft lifecycle and the publish pipeline
//!
//! `flick-composer` owns the write half of Flick: a small synchronous
//! state machine for the in-progress draft, and the strictly sequenced
//! pipeline that turns a submitted draft into a durable post.
//!
//! ## The load-bearing ordering
//!
//! [`PostWriter::publish`] reads the local media, uploads it, and only
//! appends the post record **after** the upload has returned a durable
//! URL. A concurrent feed subscriber can therefore never observe a post
//! whose media is not yet fetchable. Any failure along the way aborts the
//! whole operation with nothing written; retries are user-initiated, never
//! automatic, so a flaky network cannot duplicate a large media upload.
//!
//! ## Draft lifecycle
//!
//! ```text
//! Idle ──select_media──► MediaSelected ──begin_submit──► Submitting
//!                              ▲                             │
//!                              │ edit (caption/media kept)   ├─► Succeeded
//!                              └────────── Failed ◄──────────┘
//! ```
//!
//! While `Submitting`, caption and media are frozen; the UI is driven off
//! [`DraftStatus`], not polled. A failure returns the draft to an editable
//! state with everything retained for immediate resubmission.

mod composer;
mod draft;
mod error;
mod writer;

pub use composer::Composer;
pub use draft::{Draft, DraftStatus, Submission};
pub use error::{PublishError, ValidationError};
pub use writer::PostWriter;
