//! Access control: bearer tokens and read-only ledgers.

use runledger::types::{AccessMode, AccessPolicy, IngestKind, IngestRequest};
use runledger::{Command, Ledger, MemoryTreeStore, Output, RunStore};
use serde_json::json;
use std::sync::Arc;

fn ledger(policy: AccessPolicy) -> (Arc<MemoryTreeStore>, Ledger) {
    let backend = Arc::new(MemoryTreeStore::new());
    let store = RunStore::new(backend.clone());
    (backend, Ledger::with_policy(store, policy))
}

fn ingest_command() -> Command {
    Command::Ingest {
        request: IngestRequest::new(IngestKind::PipelineMetrics, Default::default())
            .with_run_id("R1"),
    }
}

#[test]
fn test_token_checked_on_every_command() {
    let (_backend, ledger) = ledger(AccessPolicy::new().bearer_token("s3cret"));
    let exec = ledger.executor();

    for command in [
        ingest_command(),
        Command::GetRun {
            run_id: "R1".into(),
        },
        Command::ListRuns {
            since: None,
            until: None,
        },
    ] {
        let err = exec.execute_authorized(None, command.clone()).unwrap_err();
        assert_eq!(err.to_string(), "Missing Authorization header");
        let err = exec
            .execute_authorized(Some("Bearer wrong"), command)
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid ingest token");
    }
}

#[test]
fn test_valid_token_ingests() {
    let (backend, ledger) = ledger(AccessPolicy::new().bearer_token("s3cret"));
    let output = ledger
        .executor()
        .execute_authorized(Some("Bearer s3cret"), ingest_command())
        .unwrap();
    assert!(matches!(output, Output::Ingested(_)));
    assert_eq!(
        backend.snapshot(),
        json!({"runs": {"R1": {"pipeline_metrics": {}}}})
    );
}

#[test]
fn test_read_only_ledger() {
    let backend = Arc::new(MemoryTreeStore::from_tree(
        json!({"runs": {"R1": {"pipeline_metrics": {"open": 1}}}}),
    ));
    let ledger = Ledger::with_policy(
        RunStore::new(backend.clone()),
        AccessPolicy::new().access_mode(AccessMode::ReadOnly),
    );

    let err = ledger
        .ingest_json(r#"{"kind": "pipeline_metrics", "runId": "R2"}"#)
        .unwrap_err();
    assert_eq!(err.code(), "ACCESS_DENIED");
    assert!(backend.snapshot()["runs"].get("R2").is_none());

    assert_eq!(
        ledger.run("R1").unwrap().data["pipeline_metrics"],
        json!({"open": 1})
    );
}

#[test]
fn test_unconfigured_token_serves_no_transport() {
    let (backend, ledger) = ledger(AccessPolicy::new());
    let exec = ledger.executor();

    let err = exec
        .execute_authorized(Some("Bearer s3cret"), ingest_command())
        .unwrap_err();
    assert_eq!(err.code(), "CONFIG_ERROR");
    assert!(err.to_string().contains("INGEST_TOKEN is not configured"));
    let err = exec.execute_authorized(None, Command::Kinds).unwrap_err();
    assert_eq!(err.code(), "CONFIG_ERROR");
    assert_eq!(backend.snapshot(), json!({}));

    // In-process calls do not go through the token check
    ledger.ingest_json(r#"{"kind": "pipeline_metrics", "runId": "R1"}"#).unwrap();
    assert!(ledger.run("R1").is_ok());
}
