//! Path operations over an in-memory JSON tree.
//!
//! Shared by every backend that keeps its data as one `serde_json::Value`.
//! The root is always an object; the empty path addresses it.

use runledger_core::TreePath;
use serde_json::{Map, Value};

/// Get the node at `path`, if any.
pub fn node_at<'a>(root: &'a Value, path: &TreePath) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.segments() {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Replace the node at `path` with `value`.
///
/// Missing intermediate nodes are created as objects; a non-object
/// intermediate is replaced by an object. Writing `Value::Null` removes the
/// node and prunes parents that become empty.
pub fn write_at(root: &mut Value, path: &TreePath, value: Value) {
    if value.is_null() {
        remove_at(root, path);
        return;
    }
    let Some((last, parents)) = path.segments().split_last() else {
        *root = value;
        return;
    };
    let mut current = root;
    for segment in parents {
        current = ensure_object(current)
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Map::new()));
    }
    ensure_object(current).insert(last.clone(), value);
}

/// Remove the node at `path`. Returns true if a node was removed.
pub fn remove_at(root: &mut Value, path: &TreePath) -> bool {
    if path.is_root() {
        let existed = root.as_object().map_or(true, |o| !o.is_empty());
        *root = Value::Object(Map::new());
        return existed;
    }
    let (removed, _) = remove_in(root, path.segments());
    removed
}

/// Returns `(removed, now_empty)` for the subtree rooted at `node`.
fn remove_in(node: &mut Value, segments: &[String]) -> (bool, bool) {
    let Some(map) = node.as_object_mut() else {
        return (false, false);
    };
    let (head, rest) = match segments.split_first() {
        Some(split) => split,
        None => return (false, map.is_empty()),
    };
    let removed = if rest.is_empty() {
        map.shift_remove(head).is_some()
    } else {
        match map.get_mut(head) {
            Some(child) => {
                let (removed, child_empty) = remove_in(child, rest);
                if child_empty {
                    map.shift_remove(head);
                }
                removed
            }
            None => false,
        }
    };
    (removed, map.is_empty())
}

fn ensure_object(node: &mut Value) -> &mut Map<String, Value> {
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    match node {
        Value::Object(map) => map,
        _ => unreachable!("node was just made an object"),
    }
}
