//! Run store integration tests
//!
//! These exercise the run store over both tree store backends:
//! - Write, restart, read against the file-backed store
//! - Window queries across a mix of dated and undated runs
//! - Concurrent upserts from several threads

use proptest::prelude::*;
use runledger_core::{normalize, IngestKind, Payload};
use runledger_durability::FileTreeStore;
use runledger_engine::{LedgerConfig, RunStore};
use runledger_storage::MemoryTreeStore;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;

fn obj(v: Value) -> Payload {
    v.as_object().unwrap().clone()
}

/// Test: upsert via file store → reopen → fetch → data restored
#[test]
fn test_end_to_end_write_restart_read() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path().join("ledger.json");

    {
        let store = RunStore::new(Arc::new(FileTreeStore::open(&data).unwrap()));
        let payload = normalize(
            IngestKind::PipelineDeals,
            obj(json!({"deals": {"id": 1}})),
        );
        store
            .upsert("weekly_2025-09-08_2025-09-14", IngestKind::PipelineDeals, payload)
            .unwrap();
        store
            .upsert(
                "weekly_2025-09-08_2025-09-14",
                IngestKind::PipelineMetrics,
                obj(json!({"open": 3})),
            )
            .unwrap();
    }

    let store = RunStore::new(Arc::new(FileTreeStore::open(&data).unwrap()));
    let run = store
        .fetch_run("weekly_2025-09-08_2025-09-14")
        .unwrap()
        .unwrap();
    assert_eq!(run["pipeline_deals"], json!({"deals": [{"id": 1}]}));
    assert_eq!(run["pipeline_metrics"], json!({"open": 3}));

    let in_window = store
        .fetch_runs_in_window("2025-09-08", "2025-09-14")
        .unwrap();
    assert_eq!(in_window.len(), 1);
}

/// Test: config root is honored by the store it opens
#[test]
fn test_store_opened_from_config() {
    let temp_dir = TempDir::new().unwrap();
    let config = LedgerConfig::from_toml_str(&format!(
        "data_path = {:?}\nroot = \"ledger/runs\"\n",
        temp_dir.path().join("data.json").display().to_string()
    ))
    .unwrap();

    let backend = Arc::new(FileTreeStore::open(&config.data_path).unwrap());
    let store = RunStore::with_root(backend, config.root_path().unwrap());
    store
        .upsert("R1", IngestKind::TeamPerformance, obj(json!({"members": []})))
        .unwrap();

    let on_disk: Value =
        serde_json::from_str(&std::fs::read_to_string(&config.data_path).unwrap()).unwrap();
    assert_eq!(
        on_disk,
        json!({"ledger": {"runs": {"R1": {"team_performance": {"members": []}}}}})
    );
}

/// Test: window query picks exact matches out of a mixed set
#[test]
fn test_window_over_mixed_runs() {
    let store = RunStore::new(Arc::new(MemoryTreeStore::new()));
    let ids = [
        "weekly_2025-09-08_2025-09-14",
        "daily_2025-09-08_2025-09-14",
        "weekly_2025-09-15_2025-09-21",
        "adhoc",
        "weekly_2025-09-08",
        "x_not-a-date_2025-09-14",
    ];
    for id in ids {
        store
            .upsert(id, IngestKind::PipelineMetrics, obj(json!({"run": id})))
            .unwrap();
    }

    assert_eq!(store.fetch_all_runs().unwrap().len(), ids.len());

    let matched = store
        .fetch_runs_in_window("2025-09-08", "2025-09-14")
        .unwrap();
    let mut keys: Vec<&str> = matched.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec!["daily_2025-09-08_2025-09-14", "weekly_2025-09-08_2025-09-14"]
    );

    // Sanitized bounds resolve to the same dates
    let quoted = store
        .fetch_runs_in_window("\"2025-09-15\"", " ^2025/09/21^ ")
        .unwrap();
    assert_eq!(quoted.len(), 1);
    assert!(quoted.contains_key("weekly_2025-09-15_2025-09-21"));
}

/// Test: concurrent upserts to distinct (run, kind) pairs all land
#[test]
fn test_concurrent_upserts() {
    let store = RunStore::new(Arc::new(MemoryTreeStore::new()));
    let handles: Vec<_> = IngestKind::ALL
        .iter()
        .copied()
        .map(|kind| {
            let store = store.clone();
            std::thread::spawn(move || {
                store
                    .upsert("shared", kind, obj(json!({"kind": kind.as_str()})))
                    .unwrap();
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    let run = store.fetch_run("shared").unwrap().unwrap();
    assert_eq!(run.len(), IngestKind::ALL.len());
}

proptest! {
    /// Any upserted payload is returned unchanged under its kind
    #[test]
    fn prop_upsert_then_fetch(
        run_id in "[A-Za-z0-9-]{1,24}",
        kind_idx in 0usize..15,
        value in "[a-z ]{0,32}",
    ) {
        let kind = IngestKind::ALL[kind_idx];
        let store = RunStore::new(Arc::new(MemoryTreeStore::new()));
        let payload = obj(json!({"text": value}));
        store.upsert(&run_id, kind, payload.clone()).unwrap();

        let run = store.fetch_run(&run_id).unwrap().unwrap();
        prop_assert_eq!(run.get(kind.as_str()), Some(&Value::Object(payload)));
        prop_assert_eq!(run.len(), 1);
    }
}
