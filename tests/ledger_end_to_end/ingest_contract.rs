//! Ingest contract: run id resolution, normalization on ingest, error categories.

use crate::test_utils::*;
use runledger::types::{IngestKind, IngestRequest, IngestResponse};
use serde_json::json;

#[test]
fn test_pipeline_deals_with_embedded_run_id() {
    let (backend, ledger) = memory_ledger();
    let resp = ledger
        .ingest_json(&json!({"kind": "pipeline_deals", "payload": {"runId": "R1", "deals": {"id": 1}}}).to_string())
        .unwrap();

    assert_eq!(
        serde_json::to_value(&resp).unwrap(),
        json!({"ok": true, "kind": "pipeline_deals", "runId": "R1"})
    );
    assert_eq!(
        backend.snapshot(),
        json!({"runs": {"R1": {"pipeline_deals": {"deals": [{"id": 1}]}}}})
    );
}

#[test]
fn test_top_level_run_id_keeps_payload_run_id() {
    let (_backend, ledger) = memory_ledger();
    ingest(
        &ledger,
        json!({"kind": "pipeline_metrics", "runId": "outer", "payload": {"runId": "inner", "open": 2}}),
    );
    let run = ledger.run("outer").unwrap();
    assert_eq!(
        run.data["pipeline_metrics"],
        json!({"runId": "inner", "open": 2})
    );
    assert_eq!(ledger.run("inner").unwrap_err().code(), "NOT_FOUND");
}

#[test]
fn test_reingest_replaces_record() {
    let (_backend, ledger) = memory_ledger();
    ingest(
        &ledger,
        json!({"kind": "pipeline_stages", "runId": "R1", "payload": {"stages": ["a", "b"], "extra": true}}),
    );
    ingest(
        &ledger,
        json!({"kind": "pipeline_stages", "runId": "R1", "payload": {"stages": "c"}}),
    );
    let run = ledger.run("R1").unwrap();
    assert_eq!(run.data["pipeline_stages"], json!({"stages": ["c"]}));
}

#[test]
fn test_stringified_fields_stored_as_canonical_text() {
    let (_backend, ledger) = memory_ledger();
    ingest(
        &ledger,
        json!({
            "kind": "total_pipeline_overview",
            "runId": "R1",
            "payload": {
                "totals": {"open": 3, "won": [1, 2]},
                "aiAnalysis": "Pipeline grew 12%",
                "topMovers": "[\"Ana\"]",
                "weightedWeekTables": {"semana": "año"}
            }
        }),
    );
    let stored = ledger.run("R1").unwrap().data["total_pipeline_overview"].clone();
    assert_eq!(stored["totals"], json!("{\"open\": 3, \"won\": [1, 2]}"));
    assert_eq!(stored["aiAnalysis"], json!("\"Pipeline grew 12%\""));
    assert_eq!(stored["topMovers"], json!("[\"Ana\"]"));
    assert_eq!(stored["weightedWeekTables"], json!("{\"semana\": \"año\"}"));
}

#[test]
fn test_rep_analyses_rebuilt() {
    let (_backend, ledger) = memory_ledger();
    ingest(
        &ledger,
        json!({
            "kind": "rep_analyses",
            "runId": "R1",
            "payload": {
                "analyses": [
                    {"name": "Ana", "summaryParagraph": "Strong week", "metrics": {"deals": 4}, "extra": 1},
                    "not a record",
                    {"repName": "Bo", "bulletPoints": ["x"]}
                ]
            }
        }),
    );
    let stored = ledger.run("R1").unwrap().data["rep_analyses"].clone();
    assert_eq!(
        stored,
        json!({
            "analyses": [
                {"repName": "Ana", "summaryParagraph": "Strong week", "bulletPoints": [], "metrics": "{\"deals\": 4}"},
                {"repName": "Bo", "summaryParagraph": null, "bulletPoints": ["x"], "metrics": "{}"}
            ]
        })
    );
}

#[test]
fn test_ingest_is_idempotent_for_stored_payload() {
    let (_backend, ledger) = memory_ledger();
    ingest(
        &ledger,
        json!({"kind": "rep_insights", "runId": "R1", "payload": {"insights": [{"name": "Ana", "dealFlags": ["late"]}]}}),
    );
    let first = ledger.run("R1").unwrap().data["rep_insights"].clone();

    // Feeding the stored record back in stores the same record
    ledger
        .ingest(
            IngestRequest::new(IngestKind::RepInsights, payload(first.clone())).with_run_id("R1"),
        )
        .unwrap();
    let second = ledger.run("R1").unwrap().data["rep_insights"].clone();
    assert_eq!(first, second);
}

#[test]
fn test_missing_run_id_rejected_without_write() {
    let (backend, ledger) = memory_ledger();
    let err = ledger
        .ingest_json(r#"{"kind": "pipeline_metrics", "payload": {"open": 1}}"#)
        .unwrap_err();
    assert_eq!(err.code(), "MISSING_RUN_ID");
    assert_eq!(
        err.to_string(),
        "runId is required either at the top level or inside payload"
    );
    assert_eq!(backend.snapshot(), json!({}));
}

#[test]
fn test_rejections_before_store_access() {
    let (backend, ledger) = memory_ledger();
    let cases = [
        (r#"{"kind": "weekly_digest", "runId": "R1"}"#, "UNSUPPORTED_KIND"),
        (r#"{"runId": "R1"}"#, "VALIDATION_ERROR"),
        (r#"{"kind": "pipeline_deals", "runId": ""}"#, "VALIDATION_ERROR"),
        (r#"{"kind": "pipeline_deals", "runId": "R1", "payload": 3}"#, "VALIDATION_ERROR"),
        (r#"{"kind": "pipeline_deals", "runId": "a/b"}"#, "VALIDATION_ERROR"),
        ("not json", "VALIDATION_ERROR"),
    ];
    for (body, code) in cases {
        let err = ledger.ingest_json(body).unwrap_err();
        assert_eq!(err.code(), code, "body: {}", body);
        assert!(err.is_client_error());
    }
    assert_eq!(backend.snapshot(), json!({}));
}

#[test]
fn test_every_kind_accepts_empty_payload() {
    let (_backend, ledger) = memory_ledger();
    for kind in ledger.kinds().unwrap() {
        let resp = ledger
            .ingest(IngestRequest::new(kind, Default::default()).with_run_id("R1"))
            .unwrap();
        assert_eq!(resp, IngestResponse::new(kind, "R1"));
    }
    assert_eq!(ledger.run("R1").unwrap().data.len(), IngestKind::ALL.len());
}
