//! Access control for Runledger.
//!
//! This crate provides the [`AccessMode`] and [`AccessPolicy`] types used to
//! decide whether a caller may use the ledger and whether writes are allowed.

#![warn(missing_docs)]

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Controls whether the ledger accepts ingests or is read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessMode {
    /// Allow both reads and writes (default).
    #[default]
    ReadWrite,
    /// Read-only mode, ingests are rejected.
    ReadOnly,
}

/// Authorization failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No bearer token is configured, so no caller can be authorized
    #[error("INGEST_TOKEN is not configured")]
    NotConfigured,
    /// No `Authorization` header, or not a bearer credential
    #[error("Missing Authorization header")]
    MissingCredentials,
    /// Bearer token does not match the configured one
    #[error("Invalid ingest token")]
    InvalidToken,
}

/// Who may call the ledger and what they may do.
///
/// Use the builder pattern to configure a policy:
///
/// ```
/// use runledger_security::{AccessMode, AccessPolicy};
///
/// let policy = AccessPolicy::new()
///     .bearer_token("s3cret")
///     .access_mode(AccessMode::ReadOnly);
/// assert!(policy.authorize(Some("Bearer s3cret")).is_ok());
/// assert!(!policy.allows_writes());
/// ```
#[derive(Clone, Default)]
pub struct AccessPolicy {
    /// The access mode for the ledger.
    pub access_mode: AccessMode,
    token: Option<String>,
}

impl AccessPolicy {
    /// Create a read-write policy with no bearer token.
    ///
    /// Such a policy rejects every [`authorize`](Self::authorize) call until a
    /// token is set. In-process callers that skip authorization are unaffected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the access mode.
    pub fn access_mode(mut self, mode: AccessMode) -> Self {
        self.access_mode = mode;
        self
    }

    /// Require `Authorization: Bearer <token>` on every call.
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// True if a non-empty bearer token is configured.
    pub fn requires_token(&self) -> bool {
        self.configured_token().is_some()
    }

    /// True unless the policy is read-only.
    pub fn allows_writes(&self) -> bool {
        self.access_mode == AccessMode::ReadWrite
    }

    /// Check an `Authorization` header value against the policy.
    ///
    /// Fails closed: with no token configured every caller is rejected with
    /// [`AuthError::NotConfigured`], before the header is looked at.
    pub fn authorize(&self, header: Option<&str>) -> Result<(), AuthError> {
        let Some(expected) = self.configured_token() else {
            tracing::error!(
                target: "runledger::security",
                "Rejected request: no ingest token configured"
            );
            return Err(AuthError::NotConfigured);
        };
        let provided = header
            .and_then(|h| h.strip_prefix("Bearer "))
            .ok_or(AuthError::MissingCredentials)?;
        if provided != expected {
            tracing::warn!(
                target: "runledger::security",
                "Rejected request with invalid ingest token"
            );
            return Err(AuthError::InvalidToken);
        }
        Ok(())
    }

    fn configured_token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }
}

impl std::fmt::Debug for AccessPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessPolicy")
            .field("access_mode", &self.access_mode)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
