//! Engine layer for Runledger
//!
//! This crate turns an injected [`TreeStore`](runledger_storage::TreeStore)
//! into the run store the ingest contract writes to and queries:
//! - `RunStore`: upsert, fetch-one, fetch-all and fetch-by-window
//! - `LedgerConfig`: file + environment configuration for opening a ledger
//!
//! The store handle is built once and passed in; there is no process-wide
//! singleton.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod run_store;

pub use config::{ConfigError, LedgerConfig, CONFIG_FILE_NAME};
pub use run_store::{RunStore, DEFAULT_ROOT};
