//! Configuration loading from TOML.
//!
//! Reads `config.toml` into strongly-typed structs. Every section has
//! defaults, so a missing file or a partial file is valid.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::ladder::LadderConfig;
use crate::settlement::FieldPolicy;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub ladder: LadderConfig,
    pub settlement: SettlementConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "handicap=info".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct SettlementConfig {
    pub field_policy: FieldPolicy,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::parse(&contents).with_context(|| format!("Failed to parse config file: {path}"))
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            Self::load(path)
        } else {
            info!(path, "No config file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Parse and validate TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        config.ladder.validate().context("Invalid [ladder] section")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let cfg = AppConfig::parse("").unwrap();
        assert_eq!(cfg.logging.filter, "handicap=info");
        assert!(!cfg.logging.json);
        assert_eq!(cfg.ladder, LadderConfig::default());
        assert_eq!(cfg.settlement.field_policy, FieldPolicy::Legacy);
    }

    #[test]
    fn test_full_config() {
        let cfg = AppConfig::parse(
            r#"
            [logging]
            filter = "handicap=debug"
            json = true

            [ladder]
            handicap_min = "-5"
            handicap_max = "5"
            total_max = "9.5"

            [settlement]
            field_policy = "strict"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.logging.filter, "handicap=debug");
        assert!(cfg.logging.json);
        assert_eq!(cfg.ladder.handicap_min.to_string(), "-5");
        assert_eq!(cfg.ladder.total_max.to_string(), "9.5");
        assert_eq!(cfg.ladder.step.to_string(), "0.25");
        assert_eq!(cfg.settlement.field_policy, FieldPolicy::Strict);
    }

    #[test]
    fn test_invalid_ladder_rejected() {
        let err = AppConfig::parse("[ladder]\nstep = \"-0.25\"\n").unwrap_err();
        assert!(format!("{err:#}").contains("step must be positive"));
    }

    #[test]
    fn test_bad_line_text_rejected() {
        assert!(AppConfig::parse("[ladder]\nstep = \"quarter\"\n").is_err());
        assert!(AppConfig::parse("[settlement]\nfield_policy = \"lenient\"\n").is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let cfg = AppConfig::load_or_default("definitely-not-here.toml").unwrap();
        assert_eq!(cfg.settlement.field_policy, FieldPolicy::Legacy);
        assert!(AppConfig::load("definitely-not-here.toml").is_err());
    }
}
