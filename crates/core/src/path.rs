//! Tree paths
//!
//! A `TreePath` addresses a node in the hierarchical store as a sequence of
//! key segments, written slash-separated: `runs/{runId}/{kind}`.
//!
//! # Path Syntax
//!
//! | Syntax | Meaning | Example |
//! |--------|---------|---------|
//! | (empty) | Root | `` |
//! | `a` | Child `a` of root | `runs` |
//! | `a/b/c` | Nested child | `runs/R1/pipeline_deals` |
//!
//! Leading and trailing slashes are ignored; empty inner segments are not.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Maximum length of a single segment, in bytes.
pub const MAX_SEGMENT_BYTES: usize = 768;

/// Error type for path and segment validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathParseError {
    /// Empty segment
    #[error("empty segment in path at position {0}")]
    EmptySegment(usize),
    /// Segment contains the separator
    #[error("segment '{0}' contains '/'")]
    ContainsSeparator(String),
    /// Segment contains a control character
    #[error("segment contains control character at byte {0}")]
    ControlChar(usize),
    /// Segment too long
    #[error("segment is {0} bytes, limit is {MAX_SEGMENT_BYTES}")]
    TooLong(usize),
}

/// Validate that a string can be used as a single path segment.
pub fn validate_segment(segment: &str) -> Result<(), PathParseError> {
    if segment.is_empty() {
        return Err(PathParseError::EmptySegment(0));
    }
    if segment.contains('/') {
        return Err(PathParseError::ContainsSeparator(segment.to_string()));
    }
    if let Some((pos, _)) = segment.char_indices().find(|(_, c)| c.is_control()) {
        return Err(PathParseError::ControlChar(pos));
    }
    if segment.len() > MAX_SEGMENT_BYTES {
        return Err(PathParseError::TooLong(segment.len()));
    }
    Ok(())
}

/// A path into the tree store
///
/// # Examples
///
/// ```
/// use runledger_core::TreePath;
///
/// let kind = TreePath::root().child("runs").child("R1").child("pipeline_deals");
/// assert_eq!(kind.to_string(), "runs/R1/pipeline_deals");
///
/// let parsed: TreePath = "runs/R1/pipeline_deals".parse().unwrap();
/// assert_eq!(parsed, kind);
/// assert!(parsed.parent().unwrap().is_ancestor_of(&kind));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct TreePath {
    segments: Vec<String>,
}

impl TreePath {
    /// Create the root path (empty path)
    pub fn root() -> Self {
        TreePath {
            segments: Vec::new(),
        }
    }

    /// Create a path from a vector of segments
    pub fn from_segments(segments: Vec<String>) -> Self {
        TreePath { segments }
    }

    /// Get the path segments
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Get the number of segments in the path
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if this is the root path (empty)
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Check if this is the root path
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Append a child segment (builder pattern)
    pub fn child(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    /// Get the parent path (None if root)
    pub fn parent(&self) -> Option<TreePath> {
        if self.segments.is_empty() {
            None
        } else {
            let mut parent = self.clone();
            parent.segments.pop();
            Some(parent)
        }
    }

    /// Get the last segment (None if root)
    pub fn last_segment(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Check if this path is an ancestor of another (or equal)
    pub fn is_ancestor_of(&self, other: &TreePath) -> bool {
        self.segments.len() <= other.segments.len()
            && self
                .segments
                .iter()
                .zip(other.segments.iter())
                .all(|(a, b)| a == b)
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

impl FromStr for TreePath {
    type Err = PathParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim_matches('/');
        if trimmed.is_empty() {
            return Ok(TreePath::root());
        }
        let mut segments = Vec::new();
        let mut offset = s.len() - s.trim_start_matches('/').len();
        for raw in trimmed.split('/') {
            validate_segment(raw).map_err(|e| match e {
                PathParseError::EmptySegment(_) => PathParseError::EmptySegment(offset),
                other => other,
            })?;
            segments.push(raw.to_string());
            offset += raw.len() + 1;
        }
        Ok(TreePath { segments })
    }
}
