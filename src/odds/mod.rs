//! Odds providers.
//!
//! Defines the `OddsProvider` trait and the Bovada implementation.
//! Providers hand the engine normalised matchups; everything about
//! HTTP, response shapes, and price parsing stays on this side of
//! the boundary.

pub mod bovada;

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

use crate::types::Matchup;

/// One sport the dashboard can display, as configured.
#[derive(Debug, Clone, Deserialize)]
pub struct SportSelection {
    /// Human-readable label stamped onto each matchup, e.g. "MLB (Baseball)".
    pub label: String,
    /// Provider path fragment, e.g. "baseball/mlb".
    pub path: String,
}

/// Abstraction over moneyline odds sources.
#[async_trait]
pub trait OddsProvider: Send + Sync {
    /// Provider identifier for logging.
    fn name(&self) -> &str;

    /// Fetch and normalise the upcoming matchups for one sport.
    async fn fetch_matchups(&self, sport: &SportSelection) -> Result<Vec<Matchup>>;
}
