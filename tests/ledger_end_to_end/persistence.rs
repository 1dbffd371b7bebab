//! File-backed ledgers across reopen.

use runledger::{Ledger, LedgerConfig};
use serde_json::json;
use tempfile::TempDir;

use crate::test_utils::ingest;

fn config(dir: &TempDir) -> LedgerConfig {
    LedgerConfig::from_toml_str(&format!(
        "data_path = {:?}\n",
        dir.path().join("ledger.json").display().to_string()
    ))
    .unwrap()
}

#[test]
fn test_runs_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);
    {
        let ledger = Ledger::open(&config).unwrap();
        ingest(
            &ledger,
            json!({"kind": "pipeline_deals", "payload": {"runId": "weekly_2025-09-08_2025-09-14", "deals": {"id": 1}}}),
        );
        ingest(
            &ledger,
            json!({"kind": "won_lost_analysis", "runId": "weekly_2025-09-08_2025-09-14", "payload": {"tables": [1]}}),
        );
    }

    let ledger = Ledger::open(&config).unwrap();
    let run = ledger.run("weekly_2025-09-08_2025-09-14").unwrap();
    assert_eq!(run.data["pipeline_deals"], json!({"deals": [{"id": 1}]}));
    assert_eq!(run.data["won_lost_analysis"], json!({"tables": "[1]"}));

    let weekly = ledger
        .runs(Some("2025-09-08"), Some("2025-09-14"))
        .unwrap();
    assert_eq!(weekly.runs.len(), 1);
}

#[test]
fn test_snapshot_layout_on_disk() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);
    let ledger = Ledger::open(&config).unwrap();
    ingest(
        &ledger,
        json!({"kind": "team_performance", "runId": "R1", "payload": {"members": null}}),
    );

    let text = std::fs::read_to_string(&config.data_path).unwrap();
    let on_disk: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        on_disk,
        json!({"runs": {"R1": {"team_performance": {"members": []}}}})
    );
}
