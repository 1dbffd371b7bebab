//! File-backed tree store
//!
//! Keeps the tree in memory and rewrites a JSON snapshot file on every
//! `set`. The snapshot is written to a sibling temporary file, synced, then
//! renamed over the original, so a crash leaves either the old or the new
//! tree on disk, never a torn one.
//!
//! # Design
//!
//! - One mutex serializes writers; the in-memory tree is only replaced once
//!   the snapshot has been persisted
//! - A missing file opens as an empty tree
//! - A file that is not a JSON object is reported as corrupt, not repaired

#![warn(missing_docs)]
#![warn(clippy::all)]

use parking_lot::Mutex;
use runledger_core::TreePath;
use runledger_storage::tree::{node_at, write_at};
use runledger_storage::{StorageError, StorageResult, TreeStore};
use serde_json::{Map, Value};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Tree store persisted to a single JSON file.
#[derive(Debug)]
pub struct FileTreeStore {
    path: PathBuf,
    root: Mutex<Value>,
}

impl FileTreeStore {
    /// Open the store at `path`, loading the snapshot if one exists.
    ///
    /// # Errors
    ///
    /// - `Io` if the file exists but cannot be read
    /// - `Corrupt` if the file is not a JSON object
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref().to_path_buf();
        let root = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => Value::Object(Map::new()),
            Ok(text) => decode_snapshot(&path, &text)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Value::Object(Map::new()),
            Err(e) => return Err(io_error(&path, e)),
        };
        tracing::info!(
            target: "runledger::durability",
            path = %path.display(),
            "Opened file tree store"
        );
        Ok(Self {
            path,
            root: Mutex::new(root),
        })
    }

    /// Location of the snapshot file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, tree: &Value) -> StorageResult<()> {
        let bytes = serde_json::to_vec(tree)?;
        let tmp = tmp_path(&self.path);
        let write = || -> io::Result<()> {
            if let Some(dir) = self.path.parent() {
                if !dir.as_os_str().is_empty() {
                    fs::create_dir_all(dir)?;
                }
            }
            let mut file = fs::File::create(&tmp)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
            fs::rename(&tmp, &self.path)
        };
        write().map_err(|e| io_error(&self.path, e))
    }
}

impl TreeStore for FileTreeStore {
    fn get(&self, path: &TreePath) -> StorageResult<Option<Value>> {
        let root = self.root.lock();
        Ok(node_at(&root, path).cloned())
    }

    fn set(&self, path: &TreePath, value: Value) -> StorageResult<()> {
        let mut root = self.root.lock();
        let mut next = root.clone();
        write_at(&mut next, path, value);
        self.persist(&next)?;
        *root = next;
        tracing::debug!(
            target: "runledger::durability",
            path = %path,
            file = %self.path.display(),
            "Persisted snapshot"
        );
        Ok(())
    }
}

fn decode_snapshot(path: &Path, text: &str) -> StorageResult<Value> {
    let value: Value = serde_json::from_str(text).map_err(|e| StorageError::Corrupt {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    if !value.is_object() {
        return Err(StorageError::Corrupt {
            path: path.display().to_string(),
            reason: "top-level value is not an object".to_string(),
        });
    }
    Ok(value)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn io_error(path: &Path, source: io::Error) -> StorageError {
    StorageError::Io {
        path: path.display().to_string(),
        source,
    }
}
