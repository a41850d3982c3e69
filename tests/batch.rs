//! Batch files through storage and settlement.

use std::path::PathBuf;

use handicap::batch::settle_batch;
use handicap::config::AppConfig;
use handicap::storage;
use handicap::{Outcome, Settler};

fn temp_path(kind: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("handicap_it_{kind}_{}.json", uuid::Uuid::new_v4()));
    p
}

const BATCH: &str = r#"[
    {"id": 11, "type": "ah1", "variety": "goal", "period": "regularTime",
     "condition": "-0.25",
     "match": {"score1": 1, "score2": 1}},
    {"id": 12, "type": "under", "variety": "goal", "period": "period1",
     "condition": "0.75",
     "match": {"score1_period1": 1, "score2_period1": 0}},
    {"id": 13, "type": "totals", "variety": "goal", "period": "regularTime",
     "condition": "2.5", "match": {}},
    {"id": 14, "type": "over", "variety": "goal", "period": "regularTime",
     "condition": "two", "match": {}}
]"#;

fn settle_with(config_toml: &str) -> handicap::batch::BatchReport {
    let input = temp_path("batch");
    std::fs::write(&input, BATCH).unwrap();
    let cfg = AppConfig::parse(config_toml).unwrap();
    let records = storage::load_batch(&input).unwrap();
    std::fs::remove_file(&input).unwrap();
    settle_batch(&Settler::new(cfg.settlement.field_policy), &records)
}

#[test]
fn test_default_policy_batch() {
    let report = settle_with("");
    assert_eq!(report.total, 4);
    // goal/regularTime without corners waits under the default policy
    assert!(report.entries[0].result.is_none());
    // total 1 against halves 0.5 and 1: under loses one, pushes the other
    let second = report.entries[1].result.as_ref().unwrap();
    assert_eq!(second.result, Outcome::Loss);
    assert_eq!(second.score, "1");
    assert!(report.entries[2].result.is_none());
    assert!(report.entries[3].error.is_some());
    assert_eq!((report.determined, report.undetermined, report.failed), (1, 2, 1));
}

#[test]
fn test_strict_policy_batch() {
    let report = settle_with("[settlement]\nfield_policy = \"strict\"\n");
    // -0.5 loses, 0 pushes
    let first = report.entries[0].result.as_ref().unwrap();
    assert_eq!(first.result, Outcome::Loss);
    assert_eq!(first.score, "1:1");
    assert_eq!(report.losses, 2);
}

#[test]
fn test_report_round_trip_on_disk() {
    let report = settle_with("");
    let out = temp_path("report");
    storage::save_report(&report, &out).unwrap();
    let loaded = storage::load_report(&out).unwrap();
    std::fs::remove_file(&out).unwrap();
    assert_eq!(loaded.total, report.total);
    assert_eq!(loaded.entries.len(), 4);
    assert_eq!(loaded.settled_at, report.settled_at);
}
