use flick_blob::{BlobError, MediaError};
use flick_store::StoreError;
use thiserror::Error;

use crate::DraftStatus;

/// Local validation failures. No I/O has been attempted; the draft is
/// untouched and the user can correct and resubmit immediately.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("select an image before sharing")]
    MissingMedia,

    #[error("add a caption before sharing")]
    MissingCaption,

    #[error("caption is {len} characters, the maximum is {max}")]
    CaptionTooLong { len: usize, max: usize },

    #[error("not signed in")]
    NotAuthenticated,

    #[error("not valid while the draft is {from:?}")]
    InvalidState { from: DraftStatus },
}

/// Why a publish attempt failed.
///
/// Everything except `Validation` happened mid-pipeline; in every case the
/// operation aborted as a whole and no partial post record was written.
#[derive(Error, Debug)]
pub enum PublishError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("could not read selected media: {0}")]
    MediaRead(#[from] MediaError),

    #[error("media upload failed: {0}")]
    Upload(#[from] BlobError),

    #[error("post record write failed: {0}")]
    Write(#[from] StoreError),
}

impl PublishError {
    /// Whether resubmitting the same draft could succeed.
    /// Validation failures need user correction first; everything else is
    /// a transient I/O outcome worth retrying as-is.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Validation(_))
    }
}
