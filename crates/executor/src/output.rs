//! Outputs returned by the executor.

use crate::types::{IngestResponse, RunResponse, RunsResponse};
use runledger_core::IngestKind;
use serde::Serialize;

/// Result of a successful [`Command`](crate::Command).
///
/// Serializes as the bare response body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Output {
    /// Response to `Ingest`
    Ingested(IngestResponse),
    /// Response to `GetRun`
    Run(RunResponse),
    /// Response to `ListRuns`
    Runs(RunsResponse),
    /// Response to `Kinds`
    Kinds(Vec<IngestKind>),
}
