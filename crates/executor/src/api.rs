//! Typed facade over the executor.
//!
//! Each method builds one [`Command`], runs it and unwraps the matching
//! [`Output`] variant.
//!
//! # Example
//!
//! ```text
//! use runledger_executor::Ledger;
//! use runledger_engine::LedgerConfig;
//!
//! let config = LedgerConfig::load("runledger.toml")?.with_env_overrides();
//! let ledger = Ledger::open(&config)?;
//!
//! ledger.ingest_json(body)?;
//! let weekly = ledger.runs(Some("2025-09-08"), Some("2025-09-14"))?;
//! ```

use std::sync::Arc;

use runledger_core::IngestKind;
use runledger_durability::FileTreeStore;
use runledger_engine::{LedgerConfig, RunStore};
use runledger_security::AccessPolicy;
use runledger_storage::TreeStore;

use crate::convert::convert_result;
use crate::types::{IngestRequest, IngestResponse, RunResponse, RunsResponse};
use crate::{Command, Error, Executor, Output, Result};

/// In-process handle to a ledger.
#[derive(Debug, Clone)]
pub struct Ledger {
    executor: Executor,
}

impl Ledger {
    /// Ledger over `backend` with the default root, read-write and without a
    /// bearer token.
    pub fn new(backend: Arc<dyn TreeStore>) -> Self {
        Self::with_policy(RunStore::new(backend), AccessPolicy::new())
    }

    /// Ledger over an existing run store with the given policy.
    pub fn with_policy(store: RunStore, policy: AccessPolicy) -> Self {
        Self {
            executor: Executor::new(store, policy),
        }
    }

    /// Open a file-backed ledger as described by `config`.
    pub fn open(config: &LedgerConfig) -> Result<Self> {
        let root = config.root_path()?;
        let backend = FileTreeStore::open(&config.data_path)
            .map_err(|e| Error::from(runledger_core::LedgerError::from(e)))?;
        tracing::info!(
            target: "runledger::executor",
            data_path = %config.data_path.display(),
            root = %root,
            access_mode = ?config.access_mode,
            "Opened ledger"
        );
        Ok(Self::with_policy(
            RunStore::with_root(Arc::new(backend), root),
            config.access_policy(),
        ))
    }

    /// The underlying executor, for transports that dispatch commands
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    // =========================================================================
    // Ingest
    // =========================================================================

    /// Normalize and store one payload.
    pub fn ingest(&self, request: IngestRequest) -> Result<IngestResponse> {
        match self.executor.execute(Command::Ingest { request })? {
            Output::Ingested(resp) => Ok(resp),
            _ => Err(Error::Internal {
                reason: "Unexpected output for Ingest".into(),
            }),
        }
    }

    /// Parse a JSON request body and ingest it.
    pub fn ingest_json(&self, body: &str) -> Result<IngestResponse> {
        let request = convert_result(IngestRequest::from_json(body))?;
        self.ingest(request)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Every kind record stored under `run_id`.
    pub fn run(&self, run_id: &str) -> Result<RunResponse> {
        match self.executor.execute(Command::GetRun {
            run_id: run_id.to_string(),
        })? {
            Output::Run(resp) => Ok(resp),
            _ => Err(Error::Internal {
                reason: "Unexpected output for GetRun".into(),
            }),
        }
    }

    /// All runs, or the runs whose window exactly equals `[since, until]`
    /// when both are given.
    pub fn runs(&self, since: Option<&str>, until: Option<&str>) -> Result<RunsResponse> {
        match self.executor.execute(Command::ListRuns {
            since: since.map(str::to_string),
            until: until.map(str::to_string),
        })? {
            Output::Runs(resp) => Ok(resp),
            _ => Err(Error::Internal {
                reason: "Unexpected output for ListRuns".into(),
            }),
        }
    }

    /// Supported ingest kinds.
    pub fn kinds(&self) -> Result<Vec<IngestKind>> {
        match self.executor.execute(Command::Kinds)? {
            Output::Kinds(kinds) => Ok(kinds),
            _ => Err(Error::Internal {
                reason: "Unexpected output for Kinds".into(),
            }),
        }
    }
}
