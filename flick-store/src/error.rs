use flick_core::DocumentError;
use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors appending to or reading the post collection
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to append record: {message}")]
    Write { message: String },

    #[error("no post with id '{id}'")]
    NotFound { id: String },

    #[error("post collection is closed")]
    Closed,

    #[error("document validation failed: {0}")]
    Document(#[from] DocumentError),
}

impl StoreError {
    /// Create a write error
    pub fn write<S: Into<String>>(message: S) -> Self {
        Self::Write {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(id: S) -> Self {
        Self::NotFound { id: id.into() }
    }
}

/// Terminal failure of a standing subscription.
///
/// Delivered at most once; after it, the stream is over and must be
/// explicitly restarted by subscribing again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    #[error("post collection closed while subscribed")]
    Closed,

    #[error("subscription revoked: {message}")]
    Revoked { message: String },
}

impl SubscriptionError {
    /// Create a revoked error
    pub fn revoked<S: Into<String>>(message: S) -> Self {
        Self::Revoked {
            message: message.into(),
        }
    }
}
