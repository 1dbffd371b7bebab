//! Ingest handler.
//!
//! Resolves the run id, normalizes the payload for its kind and replaces the
//! stored record at `(runId, kind)`.

use runledger_core::json::is_truthy;
use runledger_core::{normalize, LedgerError, LedgerResult, Payload};
use runledger_engine::RunStore;
use serde_json::Value;

use crate::convert::convert_result;
use crate::types::{IngestRequest, IngestResponse};
use crate::{Output, Result};

/// Key under which a payload may carry its own run id
const EMBEDDED_RUN_ID: &str = "runId";

/// Handle Ingest command.
pub fn ingest(store: &RunStore, request: IngestRequest) -> Result<Output> {
    let IngestRequest {
        kind,
        run_id,
        mut payload,
    } = request;
    let run_id = convert_result(resolve_run_id(run_id, &mut payload))?;
    let normalized = normalize(kind, payload);
    convert_result(store.upsert(&run_id, kind, normalized))?;
    Ok(Output::Ingested(IngestResponse::new(kind, run_id)))
}

/// Pick the explicit run id, else take `runId` out of the payload.
///
/// The embedded key is removed only when it is used as the fallback, so a
/// payload ingested with an explicit run id keeps its own `runId` field.
fn resolve_run_id(explicit: Option<String>, payload: &mut Payload) -> LedgerResult<String> {
    if let Some(run_id) = explicit.filter(|id| !id.is_empty()) {
        return Ok(run_id);
    }
    match payload.shift_remove(EMBEDDED_RUN_ID) {
        Some(value) if !is_truthy(&value) => Err(LedgerError::MissingRunId),
        Some(Value::String(run_id)) => Ok(run_id),
        Some(other) => Err(LedgerError::validation(format!(
            "payload.runId must be a string, got {}",
            runledger_core::error::json_type_name(&other)
        ))),
        None => Err(LedgerError::MissingRunId),
    }
}
