//! Command execution layer for Runledger
//!
//! This crate is the ingest contract. A transport (HTTP handler, CLI, test)
//! turns its input into a [`Command`], hands it to the [`Executor`], and
//! renders the resulting [`Output`] or [`Error`].
//!
//! ```text
//! transport ──► Command ──► Executor ──► handlers ──► RunStore ──► TreeStore
//!                               │
//!                               └── AccessPolicy (token, read-only)
//! ```
//!
//! [`Ledger`] wraps the executor in a typed method-per-operation API for
//! in-process callers.
//!
//! # Example
//!
//! ```
//! use runledger_executor::{IngestRequest, Ledger};
//! use runledger_storage::MemoryTreeStore;
//! use std::sync::Arc;
//!
//! let ledger = Ledger::new(Arc::new(MemoryTreeStore::new()));
//! let resp = ledger
//!     .ingest_json(r#"{"kind": "pipeline_deals", "payload": {"runId": "R1", "deals": {"id": 1}}}"#)
//!     .unwrap();
//! assert_eq!(resp.run_id, "R1");
//! let run = ledger.run("R1").unwrap();
//! assert_eq!(run.data["pipeline_deals"]["deals"][0]["id"], 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod api;
mod command;
mod convert;
mod error;
mod executor;
mod handlers;
mod output;
pub mod types;

pub use api::Ledger;
pub use command::Command;
pub use convert::convert_result;
pub use error::Error;
pub use executor::Executor;
pub use output::Output;
pub use types::{IngestRequest, IngestResponse, RunResponse, RunsResponse};

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;
