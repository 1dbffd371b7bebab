//! Core types for Runledger
//!
//! This crate holds everything that does not touch a store:
//! - Kinds: the closed enumeration of payload kinds
//! - Normalization registry: the per-kind canonical-shape table
//! - Window codec: date parsing and run-id window extraction
//! - Tree paths and canonical JSON text
//! - The error taxonomy shared by every layer above

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod json;
pub mod kind;
pub mod normalize;
pub mod path;
pub mod window;

pub use error::{LedgerError, LedgerResult};
pub use kind::IngestKind;
pub use normalize::{normalize, normalize_named, normalize_value, KindSchema, Payload};
pub use path::TreePath;
pub use window::{extract_window, parse_date, parse_datetime, RunWindow};
