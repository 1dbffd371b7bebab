//! Runledger: a run-keyed ledger for analytics payloads.
//!
//! Upstream jobs ingest `(kind, runId, payload)` triples. Each payload is
//! normalized to the canonical shape of its kind and stored at
//! `runs/{runId}/{kind}` in a hierarchical tree store. Runs are read back one
//! at a time, all at once, or filtered by the date window encoded in their id.
//!
//! # Quick start
//!
//! ```
//! use runledger::{Ledger, MemoryTreeStore};
//! use std::sync::Arc;
//!
//! let ledger = Ledger::new(Arc::new(MemoryTreeStore::new()));
//! ledger
//!     .ingest_json(r#"{"kind": "pipeline_metrics", "runId": "weekly_2025-09-08_2025-09-14", "payload": {"open": 12}}"#)
//!     .unwrap();
//!
//! let weekly = ledger.runs(Some("2025-09-08"), Some("2025-09-14")).unwrap();
//! assert_eq!(weekly.runs.len(), 1);
//! ```
//!
//! For a persistent ledger, open one from a [`LedgerConfig`] with
//! [`Ledger::open`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod types;

pub use runledger_durability::FileTreeStore;
pub use runledger_engine::{LedgerConfig, RunStore};
pub use runledger_executor::{Command, Error, Executor, Ledger, Output, Result};
pub use runledger_storage::{MemoryTreeStore, TreeStore};
