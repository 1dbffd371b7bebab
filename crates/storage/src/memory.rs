//! In-memory tree store
//!
//! The whole tree lives in one `serde_json::Value` behind a `RwLock`.
//! Reads share the lock; a `set` holds the write lock for the duration of a
//! single path replacement, which makes each `set` atomic.
//!
//! # Example
//!
//! ```
//! use runledger_storage::{MemoryTreeStore, TreeStore};
//! use serde_json::json;
//!
//! let store = MemoryTreeStore::new();
//! let path = "runs/R1/pipeline_metrics".parse().unwrap();
//! store.set(&path, json!({"open": 4})).unwrap();
//! assert_eq!(store.get(&path).unwrap(), Some(json!({"open": 4})));
//! ```

use crate::tree::{node_at, write_at};
use crate::{StorageResult, TreeStore};
use parking_lot::RwLock;
use runledger_core::TreePath;
use serde_json::{Map, Value};

/// Tree store held entirely in memory.
#[derive(Debug)]
pub struct MemoryTreeStore {
    root: RwLock<Value>,
}

impl MemoryTreeStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            root: RwLock::new(Value::Object(Map::new())),
        }
    }

    /// Create a store seeded with an existing tree.
    ///
    /// A non-object seed is treated as empty.
    pub fn from_tree(tree: Value) -> Self {
        let root = if tree.is_object() {
            tree
        } else {
            Value::Object(Map::new())
        };
        Self {
            root: RwLock::new(root),
        }
    }

    /// Clone of the entire tree
    pub fn snapshot(&self) -> Value {
        self.root.read().clone()
    }
}

impl Default for MemoryTreeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeStore for MemoryTreeStore {
    fn get(&self, path: &TreePath) -> StorageResult<Option<Value>> {
        let root = self.root.read();
        Ok(node_at(&root, path).cloned())
    }

    fn set(&self, path: &TreePath, value: Value) -> StorageResult<()> {
        let mut root = self.root.write();
        write_at(&mut root, path, value);
        tracing::trace!(target: "runledger::storage", path = %path, "set");
        Ok(())
    }
}
