//! Public types for the Runledger API.
//!
//! This module re-exports types from internal crates with a clean public interface.

// ============================================================================
// Ingest contract
// ============================================================================

pub use runledger_executor::types::{IngestRequest, IngestResponse, RunResponse, RunsResponse};

// Kinds and payloads
pub use runledger_core::{IngestKind, Payload};

// Windows
pub use runledger_core::{extract_window, parse_date, parse_datetime, RunWindow};

// Tree addressing
pub use runledger_core::TreePath;

// ============================================================================
// Configuration and access control
// ============================================================================

pub use runledger_engine::ConfigError;
pub use runledger_security::{AccessMode, AccessPolicy, AuthError};

// Lower-layer errors for callers implementing their own TreeStore
pub use runledger_core::{LedgerError, LedgerResult};
pub use runledger_storage::{StorageError, StorageResult};
