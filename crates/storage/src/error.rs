//! Storage errors

use runledger_core::LedgerError;
use thiserror::Error;

/// Result alias for tree store operations.
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Failures raised by a tree store backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem failure
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File the operation touched
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Persisted data could not be decoded
    #[error("corrupt store file {path}: {reason}")]
    Corrupt {
        /// File that failed to decode
        path: String,
        /// Decoder message
        reason: String,
    },

    /// A value could not be encoded
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backend is not reachable
    #[error("store unavailable: {reason}")]
    Unavailable {
        /// Why the backend refused the call
        reason: String,
    },
}

impl From<StorageError> for LedgerError {
    fn from(err: StorageError) -> Self {
        let message = match &err {
            StorageError::Io { .. } => "tree store I/O failed",
            StorageError::Corrupt { .. } => "tree store data is corrupt",
            StorageError::Serialization(_) => "tree store could not encode value",
            StorageError::Unavailable { .. } => "tree store unavailable",
        };
        LedgerError::backend_with_source(message, err)
    }
}
