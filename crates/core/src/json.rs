//! JSON helpers shared by the normalization registry and the run store
//!
//! This module defines:
//! - Canonical JSON text: the string encoding used when a field is stored
//!   "stringified" for the downstream consumer
//! - Truthiness of a JSON value, used for fallback fields
//!
//! # Canonical text
//!
//! The downstream reader decodes stringified fields with a parser that expects
//! the encoding the pipeline has always produced:
//!
//! | Aspect | Encoding |
//! |--------|----------|
//! | Item separator | `", "` |
//! | Key separator | `": "` |
//! | Key order | insertion order of the source object |
//! | Non-ASCII | emitted literally as UTF-8 |

use serde::Serialize;
use serde_json::ser::Formatter;
use serde_json::Value;
use std::io;

/// Formatter producing `", "` and `": "` separators on a single line.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    #[inline]
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    #[inline]
    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    #[inline]
    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// Encode a value as canonical JSON text.
///
/// Never fails: a `serde_json::Value` always serializes, and the compact
/// encoding is used as a fallback should the writer ever report an error.
///
/// # Examples
///
/// ```
/// use runledger_core::json::to_canonical_text;
/// use serde_json::json;
///
/// assert_eq!(to_canonical_text(&json!({"a": [1, 2], "b": "é"})), r#"{"a": [1, 2], "b": "é"}"#);
/// ```
pub fn to_canonical_text(value: &Value) -> String {
    let mut buf = Vec::with_capacity(128);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    if value.serialize(&mut ser).is_err() {
        return value.to_string();
    }
    match String::from_utf8(buf) {
        Ok(text) => text,
        Err(_) => value.to_string(),
    }
}

/// Truthiness of a JSON value.
///
/// `null`, `false`, zero, the empty string, the empty array and the empty
/// object are falsy; everything else is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
