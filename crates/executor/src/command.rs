//! Commands accepted by the executor.

use crate::types::IngestRequest;

/// A single ledger operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Normalize and store one payload.
    Ingest {
        /// Parsed request body
        request: IngestRequest,
    },

    /// Fetch every kind record of one run.
    GetRun {
        /// Run to fetch
        run_id: String,
    },

    /// List runs, filtered to an exact window when both bounds are given.
    ListRuns {
        /// Raw lower bound
        since: Option<String>,
        /// Raw upper bound
        until: Option<String>,
    },

    /// List the supported kinds.
    Kinds,
}

impl Command {
    /// Short name used in logs and error messages
    pub fn name(&self) -> &'static str {
        match self {
            Command::Ingest { .. } => "Ingest",
            Command::GetRun { .. } => "GetRun",
            Command::ListRuns { .. } => "ListRuns",
            Command::Kinds => "Kinds",
        }
    }

    /// True if the command writes to the store
    pub fn is_write(&self) -> bool {
        matches!(self, Command::Ingest { .. })
    }
}
