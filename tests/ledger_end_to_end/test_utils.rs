//! Shared helpers for the end-to-end suite.

use runledger::types::Payload;
use runledger::{Ledger, MemoryTreeStore};
use serde_json::Value;
use std::sync::Arc;

/// Fresh ledger over an empty in-memory store, plus the store for inspection.
pub fn memory_ledger() -> (Arc<MemoryTreeStore>, Ledger) {
    let backend = Arc::new(MemoryTreeStore::new());
    (backend.clone(), Ledger::new(backend))
}

/// Ingest a body built with `json!`, panicking on failure.
pub fn ingest(ledger: &Ledger, body: Value) {
    ledger
        .ingest_json(&body.to_string())
        .unwrap_or_else(|e| panic!("ingest of {} failed: {}", body, e));
}

/// Object literal as a payload map.
pub fn payload(value: Value) -> Payload {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object literal, got {}", other),
    }
}
