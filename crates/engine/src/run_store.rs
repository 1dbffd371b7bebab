//! Run store
//!
//! Stateless facade over an injected tree store. Normalized payloads live at
//! `{root}/{runId}/{kind}`; a run exists as soon as one kind has been
//! written under it and is never deleted here.
//!
//! # Design
//!
//! RunStore holds only an `Arc<dyn TreeStore>` and the root path. Clone is
//! cheap and every clone sees the same data. No operation retries; a backend
//! failure is returned to the caller as `LedgerError::Backend`.
//!
//! # Example
//!
//! ```
//! use runledger_core::{IngestKind, Payload};
//! use runledger_engine::RunStore;
//! use runledger_storage::MemoryTreeStore;
//! use std::sync::Arc;
//!
//! let store = RunStore::new(Arc::new(MemoryTreeStore::new()));
//! store.upsert("weekly_2025-09-08_2025-09-14", IngestKind::PipelineMetrics, Payload::new()).unwrap();
//! let runs = store.fetch_runs_in_window("2025-09-08", "2025-09-14").unwrap();
//! assert!(runs.contains_key("weekly_2025-09-08_2025-09-14"));
//! ```

use runledger_core::path::validate_segment;
use runledger_core::window::{extract_window, parse_date};
use runledger_core::{IngestKind, LedgerError, LedgerResult, Payload, TreePath};
use runledger_storage::TreeStore;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Root node under which runs are stored by default.
pub const DEFAULT_ROOT: &str = "runs";

/// Run-keyed view over a tree store.
#[derive(Clone)]
pub struct RunStore {
    backend: Arc<dyn TreeStore>,
    root: TreePath,
}

impl RunStore {
    /// Create a run store rooted at `runs`.
    pub fn new(backend: Arc<dyn TreeStore>) -> Self {
        Self::with_root(backend, TreePath::root().child(DEFAULT_ROOT))
    }

    /// Create a run store rooted at an arbitrary path.
    pub fn with_root(backend: Arc<dyn TreeStore>, root: TreePath) -> Self {
        Self { backend, root }
    }

    /// Root path of the run collection
    pub fn root(&self) -> &TreePath {
        &self.root
    }

    fn run_path(&self, run_id: &str) -> LedgerResult<TreePath> {
        validate_segment(run_id)
            .map_err(|e| LedgerError::validation(format!("invalid runId: {}", e)))?;
        Ok(self.root.clone().child(run_id))
    }

    /// Write a normalized payload, replacing whatever was stored for
    /// `(run_id, kind)`.
    ///
    /// # Errors
    ///
    /// - `Validation` if `run_id` is not a single path segment
    /// - `Backend` if the tree store fails
    pub fn upsert(&self, run_id: &str, kind: IngestKind, payload: Payload) -> LedgerResult<()> {
        let path = self.run_path(run_id)?.child(kind.as_str());
        self.backend.set(&path, Value::Object(payload))?;
        tracing::debug!(
            target: "runledger::engine",
            run_id = run_id,
            kind = %kind,
            "Upserted kind record"
        );
        Ok(())
    }

    /// Every kind record stored for a run, keyed by kind.
    ///
    /// Returns `None` if nothing was ever written under `run_id`.
    ///
    /// # Errors
    ///
    /// - `UnexpectedShape` if the run node is not an object
    /// - `Backend` if the tree store fails
    pub fn fetch_run(&self, run_id: &str) -> LedgerResult<Option<Payload>> {
        let path = self.run_path(run_id)?;
        match self.backend.get(&path)? {
            None | Some(Value::Null) => Ok(None),
            Some(value) => expect_object(&path, value).map(Some),
        }
    }

    /// Every run, keyed by run id. Empty if the root node is absent.
    ///
    /// # Errors
    ///
    /// - `UnexpectedShape` if the root node is not an object
    /// - `Backend` if the tree store fails
    pub fn fetch_all_runs(&self) -> LedgerResult<Payload> {
        match self.backend.get(&self.root)? {
            None | Some(Value::Null) => Ok(Map::new()),
            Some(value) => expect_object(&self.root, value),
        }
    }

    /// Runs whose id encodes exactly the window `[since, until]`.
    ///
    /// Both bounds are parsed as dates. A run matches only when its extracted
    /// start date equals `since` and its end date equals `until`; a run whose
    /// window merely overlaps or sits inside the query is excluded. Runs
    /// whose id carries no parseable window are skipped.
    ///
    /// # Errors
    ///
    /// - `InvalidDateFormat` if either bound fails to parse
    /// - `UnexpectedShape` / `Backend` as for [`fetch_all_runs`](Self::fetch_all_runs)
    pub fn fetch_runs_in_window(&self, since: &str, until: &str) -> LedgerResult<Payload> {
        let (since_date, until_date) = match (parse_date(since), parse_date(until)) {
            (Some(s), Some(u)) => (s, u),
            _ => return Err(LedgerError::invalid_date_format(since, until)),
        };

        let all_runs = self.fetch_all_runs()?;
        let total = all_runs.len();
        let matched: Payload = all_runs
            .into_iter()
            .filter(|(run_id, _)| match extract_window(run_id) {
                Some(window) => window.matches_exactly(since_date, until_date),
                None => {
                    tracing::trace!(
                        target: "runledger::engine",
                        run_id = run_id.as_str(),
                        "Run id carries no window"
                    );
                    false
                }
            })
            .collect();

        tracing::debug!(
            target: "runledger::engine",
            since = %since_date,
            until = %until_date,
            scanned = total,
            matched = matched.len(),
            "Window query"
        );
        Ok(matched)
    }
}

impl std::fmt::Debug for RunStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunStore").field("root", &self.root).finish()
    }
}

fn expect_object(path: &TreePath, value: Value) -> LedgerResult<Payload> {
    match value {
        Value::Object(map) => Ok(map),
        other => {
            tracing::warn!(
                target: "runledger::engine",
                path = %path,
                "Backend returned a non-object node"
            );
            Err(LedgerError::unexpected_shape(path.to_string(), &other))
        }
    }
}
