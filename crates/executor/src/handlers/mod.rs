//! Command handlers.
//!
//! Each handler takes the run store plus the command's fields and returns an
//! [`Output`](crate::Output). Access checks happen before dispatch.

pub mod ingest;
pub mod runs;
