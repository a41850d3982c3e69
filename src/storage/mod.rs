//! Persistence layer.
//!
//! Reads bet batches from JSON files and writes settlement reports back.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

use crate::batch::{BatchReport, BetRecord};

/// Load a JSON array of bet records.
pub fn load_batch(path: &Path) -> Result<Vec<BetRecord>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read batch from {}", path.display()))?;

    let records: Vec<BetRecord> = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse batch from {}", path.display()))?;

    info!(path = %path.display(), records = records.len(), "Batch loaded");
    Ok(records)
}

/// Render a report as pretty JSON.
pub fn render_report(report: &BatchReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialise settlement report")
}

/// Save a settlement report as pretty JSON.
pub fn save_report(report: &BatchReport, path: &Path) -> Result<()> {
    let json = render_report(report)?;
    std::fs::write(path, &json)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;

    debug!(path = %path.display(), entries = report.entries.len(), "Report saved");
    Ok(())
}

/// Load a previously saved report.
pub fn load_report(path: &Path) -> Result<BatchReport> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read report from {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse report from {}", path.display()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
