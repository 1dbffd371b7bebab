//! Ledger End-to-End Test Suite
//!
//! Drives the public `runledger` API the way a transport would: request
//! bodies in, response bodies out, against both tree store backends.
//!
//! ## Modules
//!
//! - **ingest_contract**: run id resolution, normalization on ingest, error categories
//! - **run_queries**: single-run fetch, listings, exact-window filtering
//! - **access**: bearer tokens and read-only ledgers
//! - **persistence**: file-backed ledgers across reopen
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test ledger_end_to_end
//! ```

mod test_utils;

mod access;
mod ingest_contract;
mod persistence;
mod run_queries;
