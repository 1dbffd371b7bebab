//! Storage layer for Runledger
//!
//! The ledger persists into a hierarchical key-value tree addressed by
//! slash-separated paths. This crate defines the seam every backend
//! implements ([`TreeStore`]) and ships the in-memory backend used for
//! embedding and tests.
//!
//! # Contract
//!
//! - `get(path)` returns the subtree at `path`, or `None` if no node exists
//! - `set(path, value)` replaces the subtree at `path` wholesale; setting
//!   `null` deletes the node
//! - Intermediate nodes are created on write and pruned when emptied
//!
//! Backends own the atomicity of a single `set`; callers get no cross-path
//! guarantees.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod memory;
pub mod tree;

pub use error::{StorageError, StorageResult};
pub use memory::MemoryTreeStore;

use runledger_core::TreePath;
use serde_json::Value;
use std::sync::Arc;

/// A hierarchical key-value store.
///
/// Implementations must be shareable across threads; the ledger opens one
/// handle at startup and reuses it for every request.
pub trait TreeStore: Send + Sync {
    /// Read the subtree at `path`.
    fn get(&self, path: &TreePath) -> StorageResult<Option<Value>>;

    /// Replace the subtree at `path`. `Value::Null` deletes it.
    fn set(&self, path: &TreePath, value: Value) -> StorageResult<()>;
}

impl<T: TreeStore + ?Sized> TreeStore for Arc<T> {
    fn get(&self, path: &TreePath) -> StorageResult<Option<Value>> {
        (**self).get(path)
    }

    fn set(&self, path: &TreePath, value: Value) -> StorageResult<()> {
        (**self).set(path, value)
    }
}

impl<T: TreeStore + ?Sized> TreeStore for Box<T> {
    fn get(&self, path: &TreePath) -> StorageResult<Option<Value>> {
        (**self).get(path)
    }

    fn set(&self, path: &TreePath, value: Value) -> StorageResult<()> {
        (**self).set(path, value)
    }
}
