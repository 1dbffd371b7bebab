//! Window codec
//!
//! Run ids conventionally end in a date range: `<label>_<start>_<end>`. This
//! module parses dates and datetimes in the formats the pipeline has been
//! observed to emit, and extracts the `(start, end)` pair from a run id.
//!
//! All parsers sanitize their input first (see [`sanitize`]) and try formats
//! in a fixed order; the first format that parses wins.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Strict date formats, tried before the ISO-8601 fallback.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Strict datetime formats, tried before the date-only and ISO-8601 fallbacks.
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Naive ISO-8601 shapes accepted by the fallback parser.
const ISO_NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Offset-bearing ISO-8601 shapes accepted by the fallback parser.
const ISO_OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M%#z",
];

/// Clean a raw date token before parsing.
///
/// Trims surrounding whitespace, removes every `^`, then strips one leading
/// and one trailing quote character (`"` or `'`) if present. Whitespace
/// uncovered by quote stripping is kept.
pub fn sanitize(value: &str) -> String {
    let cleaned = value.trim().replace('^', "");
    let is_quote = |c: char| c == '"' || c == '\'';
    let mut s = cleaned.as_str();
    if let Some(rest) = s.strip_prefix(is_quote) {
        s = rest;
    }
    if let Some(rest) = s.strip_suffix(is_quote) {
        s = rest;
    }
    s.to_string()
}

/// Parse a date.
///
/// Tries `YYYY-MM-DD`, then `YYYY/MM/DD`, then the ISO-8601 fallback (which
/// also accepts full timestamps, keeping only their date). Empty input and
/// exhausted formats yield `None`.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    if text.is_empty() {
        return None;
    }
    let value = sanitize(text);
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&value, fmt).ok())
        .or_else(|| parse_iso(&value).map(|dt| dt.date()))
}

/// Parse a datetime.
///
/// Tries `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS`, a bare `YYYY-MM-DD`
/// (midnight), then the ISO-8601 fallback.
pub fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    let value = sanitize(text);
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(&value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .or_else(|| parse_iso(&value))
}

/// ISO-8601 fallback over already-sanitized input.
///
/// Offset-bearing timestamps keep their wall-clock date and time in the
/// stated offset; the offset itself is discarded.
fn parse_iso(value: &str) -> Option<NaiveDateTime> {
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    if let Some(dt) = ISO_OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(value, fmt).ok())
    {
        return Some(dt.naive_local());
    }
    if let Some(dt) = ISO_NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
    {
        return Some(dt);
    }
    parse_basic_date(value).and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Basic-format calendar date: exactly eight digits, `YYYYMMDD`.
fn parse_basic_date(value: &str) -> Option<NaiveDate> {
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = value[0..4].parse().ok()?;
    let month = value[4..6].parse().ok()?;
    let day = value[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Start and end dates encoded in a run id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunWindow {
    /// Date of the second-to-last token
    pub start: NaiveDate,
    /// Date of the last token
    pub end: NaiveDate,
}

impl RunWindow {
    /// True when both bounds are equal to the given ones.
    ///
    /// This is an equality test, not containment: a window that merely
    /// overlaps `[since, until]` does not match.
    pub fn matches_exactly(&self, since: NaiveDate, until: NaiveDate) -> bool {
        self.start == since && self.end == until
    }
}

/// Extract the window from a run id.
///
/// The id is split on `_`; fewer than three segments means no window. The
/// last two segments are parsed as datetimes, so both plain dates and full
/// timestamps work. If either fails to parse there is no window.
///
/// # Examples
///
/// ```
/// use runledger_core::window::extract_window;
/// use chrono::NaiveDate;
///
/// let w = extract_window("weekly_2025-09-08_2025-09-14").unwrap();
/// assert_eq!(w.start, NaiveDate::from_ymd_opt(2025, 9, 8).unwrap());
/// assert_eq!(w.end, NaiveDate::from_ymd_opt(2025, 9, 14).unwrap());
/// assert!(extract_window("weekly_2025-09-08").is_none());
/// ```
pub fn extract_window(run_id: &str) -> Option<RunWindow> {
    let parts: Vec<&str> = run_id.split('_').collect();
    if parts.len() < 3 {
        return None;
    }
    let start = parse_datetime(parts[parts.len() - 2].trim())?;
    let end = parse_datetime(parts[parts.len() - 1].trim())?;
    Some(RunWindow {
        start: start.date(),
        end: end.date(),
    })
}
