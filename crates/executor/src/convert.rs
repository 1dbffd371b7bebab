//! Error conversion from internal error types.
//!
//! Maps core, security and config errors onto the executor's [`Error`].

use crate::Error;
use runledger_core::LedgerError;
use runledger_engine::ConfigError;
use runledger_security::AuthError;

/// Convert a LedgerError to an executor Error.
///
/// Backend errors flatten their source chain into the reason so the
/// executor error stays cloneable.
impl From<LedgerError> for Error {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Validation { reason } => Error::Validation { reason },
            LedgerError::UnsupportedKind { kind } => Error::UnsupportedKind { kind },
            LedgerError::MissingRunId => Error::MissingRunId,
            LedgerError::InvalidDateFormat { since, until } => {
                Error::InvalidDateFormat { since, until }
            }
            LedgerError::NotFound { run_id } => Error::RunNotFound { run_id },
            LedgerError::UnexpectedShape { path, actual } => Error::UnexpectedShape {
                path,
                actual: actual.to_string(),
            },
            LedgerError::Backend { message, source } => {
                let reason = if let Some(ref src) = source {
                    format!("{}: {}", message, src)
                } else {
                    message
                };
                Error::Backend { reason }
            }
        }
    }
}

/// A missing server-side token is a deployment fault, not the caller's.
impl From<AuthError> for Error {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::NotConfigured => Error::Config {
                reason: err.to_string(),
            },
            AuthError::MissingCredentials | AuthError::InvalidToken => Error::Unauthorized {
                reason: err.to_string(),
            },
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Config {
            reason: err.to_string(),
        }
    }
}

/// Convert a core result to an executor Result.
pub fn convert_result<T>(result: runledger_core::LedgerResult<T>) -> crate::Result<T> {
    result.map_err(Error::from)
}
