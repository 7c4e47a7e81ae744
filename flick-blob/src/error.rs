use thiserror::Error;

/// Result type for blob operations
pub type BlobResult<T> = Result<T, BlobError>;

/// Errors that can occur during blob operations.
///
/// `Network`, `QuotaExceeded` and `PermissionDenied` surface verbatim to
/// the post writer; no variant is retried internally.
#[derive(Error, Debug)]
pub enum BlobError {
    #[error("network failure talking to blob store: {message}")]
    Network { message: String },

    #[error("storage quota exceeded: {message}")]
    QuotaExceeded { message: String },

    #[error("permission denied for '{key}'")]
    PermissionDenied { key: String },

    #[error("no blob at '{url}'")]
    NotFound { url: String },

    #[error("invalid request: {message}")]
    Invalid { message: String },

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl BlobError {
    /// Create a network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a quota exceeded error
    pub fn quota_exceeded<S: Into<String>>(message: S) -> Self {
        Self::QuotaExceeded {
            message: message.into(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied<S: Into<String>>(key: S) -> Self {
        Self::PermissionDenied { key: key.into() }
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(url: S) -> Self {
        Self::NotFound { url: url.into() }
    }

    /// Create an invalid request error
    pub fn invalid<S: Into<String>>(message: S) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}
