//! Executor error type.
//!
//! One variant per failure category a caller may need to tell apart. Each
//! carries a stable [`code`](Error::code) a transport can map to a status
//! without parsing messages. Client-facing messages are kept verbatim.

use thiserror::Error;

/// Errors returned by [`Executor`](crate::Executor) and [`Ledger`](crate::Ledger).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed request or rejected field value
    #[error("{reason}")]
    Validation {
        /// What was wrong
        reason: String,
    },

    /// Kind tag outside the supported enumeration
    #[error("Unsupported ingest kind: {kind}")]
    UnsupportedKind {
        /// The rejected kind string
        kind: String,
    },

    /// No run id at the top level nor inside the payload
    #[error("runId is required either at the top level or inside payload")]
    MissingRunId,

    /// Window bounds did not parse
    #[error("since and until must be valid ISO dates (YYYY-MM-DD)")]
    InvalidDateFormat {
        /// Raw `since`
        since: String,
        /// Raw `until`
        until: String,
    },

    /// Run was never written
    #[error("Run with id '{run_id}' not found")]
    RunNotFound {
        /// Requested run id
        run_id: String,
    },

    /// Stored data had the wrong JSON type
    #[error("unexpected data type at '{path}': expected object, got {actual}")]
    UnexpectedShape {
        /// Tree path that was read
        path: String,
        /// JSON type that was found
        actual: String,
    },

    /// Tree store failure
    #[error("backend failure: {reason}")]
    Backend {
        /// Failure description including its cause
        reason: String,
    },

    /// Missing or wrong bearer credential
    #[error("{reason}")]
    Unauthorized {
        /// Client-facing message
        reason: String,
    },

    /// Operation not allowed by the access mode
    #[error("access denied: {reason}")]
    AccessDenied {
        /// What was refused
        reason: String,
    },

    /// Configuration could not be loaded or used
    #[error("config error: {reason}")]
    Config {
        /// What was wrong
        reason: String,
    },

    /// Invariant violation inside the executor
    #[error("internal error: {reason}")]
    Internal {
        /// Description
        reason: String,
    },
}

impl Error {
    /// Stable machine-readable code for this error category.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Validation { .. } => "VALIDATION_ERROR",
            Error::UnsupportedKind { .. } => "UNSUPPORTED_KIND",
            Error::MissingRunId => "MISSING_RUN_ID",
            Error::InvalidDateFormat { .. } => "INVALID_DATE_FORMAT",
            Error::RunNotFound { .. } => "NOT_FOUND",
            Error::UnexpectedShape { .. } => "UNEXPECTED_SHAPE",
            Error::Backend { .. } => "BACKEND_FAILURE",
            Error::Unauthorized { .. } => "UNAUTHORIZED",
            Error::AccessDenied { .. } => "ACCESS_DENIED",
            Error::Config { .. } => "CONFIG_ERROR",
            Error::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// True when the caller's input caused the failure.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::Validation { .. }
                | Error::UnsupportedKind { .. }
                | Error::MissingRunId
                | Error::InvalidDateFormat { .. }
                | Error::RunNotFound { .. }
                | Error::Unauthorized { .. }
                | Error::AccessDenied { .. }
        )
    }
}
