//! Batch settlement of stored bets, with a tally of the results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::settlement::{Outcome, SettlementResult, Settler};
use crate::types::MatchScore;

/// A stored bet as it arrives from outside, with its match snapshot.
///
/// Enum fields stay raw strings so one unknown value marks a single record
/// undetermined instead of rejecting the whole batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BetRecord {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(rename = "type")]
    pub odd_type: String,
    pub variety: String,
    pub period: String,
    #[serde(default)]
    pub condition: String,
    #[serde(rename = "match", default)]
    pub snapshot: MatchScore,
}

/// Per-record outcome of a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementEntry {
    pub id: Option<u64>,
    #[serde(rename = "type")]
    pub odd_type: String,
    pub variety: String,
    pub period: String,
    pub condition: String,
    pub result: Option<SettlementResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Summary of a settled batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub settled_at: DateTime<Utc>,
    pub total: usize,
    pub determined: usize,
    pub undetermined: usize,
    pub failed: usize,
    pub wins: usize,
    pub pushes: usize,
    pub losses: usize,
    pub entries: Vec<SettlementEntry>,
}

/// Settle every record. Malformed lines are recorded per entry, never fatal.
pub fn settle_batch(settler: &Settler, records: &[BetRecord]) -> BatchReport {
    let mut report = BatchReport {
        settled_at: Utc::now(),
        total: records.len(),
        determined: 0,
        undetermined: 0,
        failed: 0,
        wins: 0,
        pushes: 0,
        losses: 0,
        entries: Vec::with_capacity(records.len()),
    };

    for record in records {
        let settled = settler.settle_raw(
            &record.odd_type,
            &record.variety,
            &record.period,
            &record.condition,
            &record.snapshot,
        );

        let (result, error) = match settled {
            Ok(Some(r)) => {
                report.determined += 1;
                match r.result {
                    Outcome::Win => report.wins += 1,
                    Outcome::Push => report.pushes += 1,
                    Outcome::Loss => report.losses += 1,
                }
                (Some(r), None)
            }
            Ok(None) => {
                report.undetermined += 1;
                (None, None)
            }
            Err(e) => {
                warn!(id = ?record.id, error = %e, "Bet record rejected");
                report.failed += 1;
                (None, Some(e.to_string()))
            }
        };

        report.entries.push(SettlementEntry {
            id: record.id,
            odd_type: record.odd_type.clone(),
            variety: record.variety.clone(),
            period: record.period.clone(),
            condition: record.condition.clone(),
            result,
            error,
        });
    }

    info!(
        total = report.total,
        determined = report.determined,
        undetermined = report.undetermined,
        failed = report.failed,
        wins = report.wins,
        pushes = report.pushes,
        losses = report.losses,
        policy = ?settler.policy(),
        "Batch settled"
    );

    report
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
