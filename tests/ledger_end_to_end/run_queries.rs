//! Run queries: single-run fetch, listings, exact-window filtering.

use crate::test_utils::*;
use chrono::Duration;
use proptest::prelude::*;
use runledger::types::{extract_window, parse_date};
use serde_json::json;

fn seed(ledger: &runledger::Ledger, run_ids: &[&str]) {
    for run_id in run_ids {
        ingest(
            ledger,
            json!({"kind": "pipeline_metrics", "runId": run_id, "payload": {"id": run_id}}),
        );
    }
}

#[test]
fn test_unknown_run_is_not_found() {
    let (_backend, ledger) = memory_ledger();
    seed(&ledger, &["R1"]);
    let err = ledger.run("never-written").unwrap_err();
    assert_eq!(err.code(), "NOT_FOUND");
    assert_eq!(err.to_string(), "Run with id 'never-written' not found");
}

#[test]
fn test_run_response_shape() {
    let (_backend, ledger) = memory_ledger();
    seed(&ledger, &["R1"]);
    assert_eq!(
        serde_json::to_value(ledger.run("R1").unwrap()).unwrap(),
        json!({"runId": "R1", "data": {"pipeline_metrics": {"id": "R1"}}})
    );
}

#[test]
fn test_listing_without_runs() {
    let (_backend, ledger) = memory_ledger();
    let resp = ledger.runs(None, None).unwrap();
    assert_eq!(serde_json::to_value(&resp).unwrap(), json!({"runs": {}}));
}

#[test]
fn test_window_is_exact_match_not_overlap() {
    let (_backend, ledger) = memory_ledger();
    seed(&ledger, &["A_2025-09-08_2025-09-14", "B_2025-09-09_2025-09-14"]);

    let resp = ledger.runs(Some("2025-09-08"), Some("2025-09-14")).unwrap();
    // B lies inside the queried window but its start differs, so it is excluded
    assert_eq!(
        serde_json::to_value(&resp).unwrap(),
        json!({
            "since": "2025-09-08",
            "until": "2025-09-14",
            "runs": {"A_2025-09-08_2025-09-14": {"pipeline_metrics": {"id": "A_2025-09-08_2025-09-14"}}}
        })
    );
}

#[test]
fn test_window_matches_timestamped_run_ids() {
    let (_backend, ledger) = memory_ledger();
    seed(&ledger, &["weekly_2025-09-08 00:00:00_2025-09-14 23:59:59"]);
    let resp = ledger.runs(Some("2025-09-08"), Some("2025-09-14")).unwrap();
    assert_eq!(resp.runs.len(), 1);
}

#[test]
fn test_window_bounds_are_sanitized() {
    let (_backend, ledger) = memory_ledger();
    seed(&ledger, &["weekly_2025-09-08_2025-09-14"]);
    for (since, until) in [
        ("\"2025-09-08\"", "2025-09-14"),
        ("2025^-09-08", "'2025-09-14'"),
        ("2025/09/08", "2025-09-14T10:00:00Z"),
    ] {
        let resp = ledger.runs(Some(since), Some(until)).unwrap();
        assert_eq!(resp.runs.len(), 1, "since={} until={}", since, until);
        assert_eq!(resp.since.as_deref(), Some(since));
    }
}

#[test]
fn test_single_bound_lists_everything() {
    let (_backend, ledger) = memory_ledger();
    seed(&ledger, &["A_2025-09-08_2025-09-14", "adhoc"]);
    let partial_bounds = [
        (Some("2025-09-08"), None),
        (None, Some("2025-09-14")),
        (Some(""), Some("2025-09-14")),
    ];
    for (since, until) in partial_bounds {
        let resp = ledger.runs(since, until).unwrap();
        assert_eq!(resp.runs.len(), 2);
        assert!(resp.since.is_none() && resp.until.is_none());
    }
}

#[test]
fn test_invalid_window_rejected() {
    let (_backend, ledger) = memory_ledger();
    seed(&ledger, &["A_2025-09-08_2025-09-14"]);
    let err = ledger.runs(Some("last week"), Some("2025-09-14")).unwrap_err();
    assert_eq!(err.code(), "INVALID_DATE_FORMAT");
    assert_eq!(
        err.to_string(),
        "since and until must be valid ISO dates (YYYY-MM-DD)"
    );
}

#[test]
fn test_codec_examples() {
    let w = extract_window("weekly_2025-09-08_2025-09-14").unwrap();
    assert_eq!(Some(w.start), parse_date("2025-09-08"));
    assert_eq!(Some(w.end), parse_date("2025-09-14"));
    assert!(extract_window("weekly_2025-09-08").is_none());
    assert_eq!(parse_date("\"2025-09-08\""), parse_date("2025-09-08"));
    assert_eq!(parse_date("2025^-09-08"), parse_date("2025-09-08"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// A windowed listing returns a run iff both of its bounds equal the query's
    #[test]
    fn prop_window_filter_is_equality(
        start_offset in 0i64..4,
        length in 0i64..4,
        query_start in 0i64..4,
        query_length in 0i64..4,
    ) {
        let base = parse_date("2025-09-01").unwrap();
        let day = |n: i64| (base + Duration::days(n)).format("%Y-%m-%d").to_string();

        let (_backend, ledger) = memory_ledger();
        let run_id = format!("run_{}_{}", day(start_offset), day(start_offset + length));
        seed(&ledger, &[run_id.as_str()]);

        let (since, until) = (day(query_start), day(query_start + query_length));
        let resp = ledger.runs(Some(since.as_str()), Some(until.as_str())).unwrap();
        let expected = start_offset == query_start && length == query_length;
        prop_assert_eq!(resp.runs.contains_key(&run_id), expected);
    }
}
