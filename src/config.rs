//! Configuration loading from TOML.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! Stake, selection policy, and probability mode all live here so the
//! engine can be handed an explicit configuration at call time instead
//! of reading module-level constants.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs;

use crate::odds::SportSelection;
use crate::types::{ProbabilityMode, SelectionPolicy};

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: GeneralConfig,
    pub betting: BettingConfig,
    pub odds: OddsConfig,
    pub history: HistoryConfig,
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeneralConfig {
    pub name: String,
    pub refresh_interval_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BettingConfig {
    /// Fixed stake per bet in currency units. Must be positive.
    pub stake: Decimal,
    pub selection_policy: SelectionPolicy,
    pub probability_mode: ProbabilityMode,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OddsConfig {
    /// Override for the odds feed base URL (tests, proxies).
    #[serde(default)]
    pub base_url: Option<String>,
    pub sports: Vec<SportSelection>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HistoryConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub enabled: bool,
    pub port: u16,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.betting.stake <= Decimal::ZERO {
            anyhow::bail!("betting.stake must be positive, got {}", self.betting.stake);
        }
        if self.odds.sports.is_empty() {
            anyhow::bail!("at least one [[odds.sports]] entry is required");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SAMPLE: &str = r#"
        [app]
        name = "valuebet"
        refresh_interval_secs = 300

        [betting]
        stake = 10.0
        selection_policy = "both_sides"
        probability_mode = "implied_from_odds"

        [odds]
        [[odds.sports]]
        label = "MLB (Baseball)"
        path = "baseball/mlb"

        [[odds.sports]]
        label = "Tennis (ATP/WTA)"
        path = "tennis"

        [history]
        path = "bet_history.json"

        [dashboard]
        enabled = true
        port = 8080
    "#;

    #[test]
    fn test_parse_sample() {
        let cfg: AppConfig = toml::from_str(SAMPLE).unwrap();
        assert_eq!(cfg.app.name, "valuebet");
        assert_eq!(cfg.betting.stake, dec!(10.0));
        assert_eq!(cfg.betting.selection_policy, SelectionPolicy::BothSides);
        assert_eq!(cfg.betting.probability_mode, ProbabilityMode::ImpliedFromOdds);
        assert_eq!(cfg.odds.sports.len(), 2);
        assert_eq!(cfg.odds.sports[1].path, "tennis");
        assert!(cfg.odds.base_url.is_none());
        assert_eq!(cfg.dashboard.port, 8080);
        cfg.validate().unwrap();
    }

    #[test]
    fn test_non_positive_stake_rejected() {
        let mut cfg: AppConfig = toml::from_str(SAMPLE).unwrap();
        cfg.betting.stake = dec!(0);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_no_sports_rejected() {
        let mut cfg: AppConfig = toml::from_str(SAMPLE).unwrap();
        cfg.odds.sports.clear();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_best_side_policy_parses() {
        let toml_str = SAMPLE.replace("both_sides", "best_side");
        let cfg: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(cfg.betting.selection_policy, SelectionPolicy::BestSide);
    }
}
