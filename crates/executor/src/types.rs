//! Request and response types of the ingest contract.
//!
//! Field names on the wire are camelCase (`runId`); Rust fields are
//! snake_case.

use runledger_core::{IngestKind, LedgerError, LedgerResult, Payload};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

// =============================================================================
// Requests
// =============================================================================

/// Body of an ingest call.
///
/// Unknown top-level fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestRequest {
    /// Which canonical shape `payload` is normalized to
    pub kind: IngestKind,
    /// Explicit run id; falls back to `payload.runId`
    #[serde(rename = "runId", default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
    /// Raw payload, arbitrary nested JSON
    #[serde(default)]
    pub payload: Payload,
}

impl IngestRequest {
    /// Request with no explicit run id.
    pub fn new(kind: IngestKind, payload: Payload) -> Self {
        Self {
            kind,
            run_id: None,
            payload,
        }
    }

    /// Set the explicit run id.
    pub fn with_run_id(mut self, run_id: impl Into<String>) -> Self {
        self.run_id = Some(run_id.into());
        self
    }

    /// Parse a request body from JSON text.
    pub fn from_json(text: &str) -> LedgerResult<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| LedgerError::validation(format!("invalid JSON body: {}", e)))?;
        Self::from_value(value)
    }

    /// Parse a request body from a JSON value.
    ///
    /// # Errors
    ///
    /// - `UnsupportedKind` if `kind` is a string outside the enumeration
    /// - `Validation` for any other shape problem, including an empty `runId`
    pub fn from_value(value: Value) -> LedgerResult<Self> {
        if let Some(kind) = value.get("kind").and_then(Value::as_str) {
            IngestKind::from_str(kind)?;
        }
        let request: Self =
            serde_json::from_value(value).map_err(|e| LedgerError::validation(e.to_string()))?;
        if request.run_id.as_deref() == Some("") {
            return Err(LedgerError::validation("runId must not be empty"));
        }
        Ok(request)
    }
}

// =============================================================================
// Responses
// =============================================================================

/// Acknowledgement of a successful ingest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestResponse {
    /// Always `true`
    pub ok: bool,
    /// Kind that was stored
    pub kind: IngestKind,
    /// Run the payload was stored under
    #[serde(rename = "runId")]
    pub run_id: String,
}

impl IngestResponse {
    /// Successful response for `(kind, run_id)`.
    pub fn new(kind: IngestKind, run_id: impl Into<String>) -> Self {
        Self {
            ok: true,
            kind,
            run_id: run_id.into(),
        }
    }
}

/// One run with every kind record stored under it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResponse {
    /// Requested run id
    #[serde(rename = "runId")]
    pub run_id: String,
    /// Normalized payloads keyed by kind
    pub data: Payload,
}

/// Listing of runs, optionally filtered to a window.
///
/// `since` and `until` are present only on a windowed listing and echo the
/// caller's raw strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunsResponse {
    /// Raw lower bound of the window
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
    /// Raw upper bound of the window
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<String>,
    /// Runs keyed by run id
    pub runs: Payload,
}
