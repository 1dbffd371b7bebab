//! Error taxonomy for the ingest ledger.
//!
//! Every failure surfaced by the core falls into one of a small set of
//! categories. Callers (the executor, a transport) match on the variant to
//! decide how to report it; nothing here is silently swallowed.
//!
//! | Variant | Raised when |
//! |---------|-------------|
//! | `Validation` | Request body is malformed or violates a field rule |
//! | `UnsupportedKind` | A kind string is not one of the fixed enumeration |
//! | `MissingRunId` | Neither the request nor the payload carries a run id |
//! | `InvalidDateFormat` | A window bound cannot be parsed as a date |
//! | `NotFound` | A single-run fetch names a run that was never written |
//! | `UnexpectedShape` | The backend returned a non-object where one is required |
//! | `Backend` | The tree store itself failed |

use thiserror::Error;

/// Result alias used throughout the core crates.
pub type LedgerResult<T> = std::result::Result<T, LedgerError>;

/// Errors produced by the normalization registry, window codec and run store.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The request body failed validation.
    #[error("validation failed: {reason}")]
    Validation {
        /// What was wrong with the request
        reason: String,
    },

    /// The kind tag is not one of the supported kinds.
    #[error("Unsupported ingest kind: {kind}")]
    UnsupportedKind {
        /// The rejected kind string
        kind: String,
    },

    /// No run id at the top level nor inside the payload.
    #[error("runId is required either at the top level or inside payload")]
    MissingRunId,

    /// A window bound could not be parsed.
    #[error("since and until must be valid ISO dates (YYYY-MM-DD)")]
    InvalidDateFormat {
        /// Raw `since` value as supplied
        since: String,
        /// Raw `until` value as supplied
        until: String,
    },

    /// The requested run does not exist.
    #[error("Run with id '{run_id}' not found")]
    NotFound {
        /// The run id that was looked up
        run_id: String,
    },

    /// The backend returned a value of the wrong JSON type.
    #[error("unexpected data type at '{path}': expected object, got {actual}")]
    UnexpectedShape {
        /// Tree path that was read
        path: String,
        /// JSON type name that was found
        actual: &'static str,
    },

    /// The tree store failed.
    #[error("backend failure: {message}")]
    Backend {
        /// Human-readable description
        message: String,
        /// Underlying cause, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl LedgerError {
    /// Create a validation error.
    pub fn validation(reason: impl Into<String>) -> Self {
        LedgerError::Validation {
            reason: reason.into(),
        }
    }

    /// Create an unsupported-kind error.
    pub fn unsupported_kind(kind: impl Into<String>) -> Self {
        LedgerError::UnsupportedKind { kind: kind.into() }
    }

    /// Create an invalid-date error carrying both raw bounds.
    pub fn invalid_date_format(since: impl Into<String>, until: impl Into<String>) -> Self {
        LedgerError::InvalidDateFormat {
            since: since.into(),
            until: until.into(),
        }
    }

    /// Create a not-found error for a run id.
    pub fn not_found(run_id: impl Into<String>) -> Self {
        LedgerError::NotFound {
            run_id: run_id.into(),
        }
    }

    /// Create an unexpected-shape error from the offending value.
    pub fn unexpected_shape(path: impl Into<String>, actual: &serde_json::Value) -> Self {
        LedgerError::UnexpectedShape {
            path: path.into(),
            actual: json_type_name(actual),
        }
    }

    /// Create a backend error without an underlying source.
    pub fn backend(message: impl Into<String>) -> Self {
        LedgerError::Backend {
            message: message.into(),
            source: None,
        }
    }

    /// Create a backend error wrapping a source error.
    pub fn backend_with_source<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        LedgerError::Backend {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// True for errors caused by caller input rather than the system.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            LedgerError::Validation { .. }
                | LedgerError::UnsupportedKind { .. }
                | LedgerError::MissingRunId
                | LedgerError::InvalidDateFormat { .. }
                | LedgerError::NotFound { .. }
        )
    }
}

/// Name of a JSON value's type, for error messages.
pub fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
