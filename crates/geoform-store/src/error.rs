//! Store error types.

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Failed to initialize the storage backend.
    #[error("store initialization failed: {0}")]
    Init(String),

    /// Document or file not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Handle rejected before touching the backend.
    #[error("invalid handle: {0}")]
    InvalidHandle(String),

    /// Document could not be encoded or decoded.
    #[error("codec failed for {path}: {source}")]
    Codec {
        /// Document path within the backend.
        path: String,
        /// Underlying serde error.
        source: serde_json::Error,
    },

    /// Backend-specific error.
    #[error("backend error: {0}")]
    Backend(opendal::Error),
}

impl StoreError {
    /// Creates a new initialization error.
    pub fn init(msg: impl Into<String>) -> Self {
        Self::Init(msg.into())
    }

    /// Creates a new not found error.
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound(path.into())
    }

    /// Creates a new invalid handle error.
    pub fn invalid_handle(handle: impl Into<String>) -> Self {
        Self::InvalidHandle(handle.into())
    }

    /// Creates a new codec error.
    pub fn codec(path: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Codec {
            path: path.into(),
            source,
        }
    }

    /// Whether this error is the not-found case.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<opendal::Error> for StoreError {
    fn from(err: opendal::Error) -> Self {
        use opendal::ErrorKind;

        match err.kind() {
            ErrorKind::NotFound => Self::NotFound(err.to_string()),
            _ => Self::Backend(err),
        }
    }
}
