//! Bovada odds client.
//!
//! Fetches upcoming events from the public (unauthenticated) Bovada event
//! feed and normalises the moneyline prices into [`Matchup`]s.
//!
//! Endpoint: `{base}/services/sports/event/v2/events/A/description/{path}`
//! where `{path}` is e.g. `baseball/mlb` or `tennis`. Prices come back as
//! decimal strings; start times as epoch milliseconds.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use tracing::{debug, info};

use super::{OddsProvider, SportSelection};
use crate::types::Matchup;

const DEFAULT_BASE_URL: &str = "https://www.bovada.lv";

/// Market description carrying the head-to-head prices we care about.
const MONEYLINE: &str = "Moneyline";

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct EventGroup {
    #[serde(default)]
    events: Vec<Event>,
}

#[derive(Debug, Deserialize)]
struct Event {
    #[serde(default)]
    competitors: Vec<Competitor>,
    #[serde(rename = "displayGroups", default)]
    display_groups: Vec<DisplayGroup>,
    /// Epoch milliseconds.
    #[serde(rename = "startTime")]
    start_time: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct Competitor {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DisplayGroup {
    #[serde(default)]
    markets: Vec<MarketEntry>,
}

#[derive(Debug, Deserialize)]
struct MarketEntry {
    description: Option<String>,
    #[serde(default)]
    outcomes: Vec<Outcome>,
}

#[derive(Debug, Deserialize)]
struct Outcome {
    description: Option<String>,
    price: Option<Price>,
}

#[derive(Debug, Deserialize)]
struct Price {
    decimal: Option<String>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

pub struct BovadaClient {
    http: Client,
    base_url: String,
}

impl BovadaClient {
    pub fn new(base_url: Option<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .user_agent("valuebet/0.1.0")
            .build()
            .context("Failed to build Bovada HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }

    fn events_url(&self, sport_path: &str) -> String {
        format!(
            "{}/services/sports/event/v2/events/A/description/{}",
            self.base_url, sport_path
        )
    }
}

#[async_trait]
impl OddsProvider for BovadaClient {
    fn name(&self) -> &str {
        "bovada"
    }

    async fn fetch_matchups(&self, sport: &SportSelection) -> Result<Vec<Matchup>> {
        let url = self.events_url(&sport.path);
        debug!(url = %url, "Fetching odds");

        let groups: Vec<EventGroup> = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Request to {url} failed"))?
            .error_for_status()
            .with_context(|| format!("Bovada returned an error status for {url}"))?
            .json()
            .await
            .with_context(|| format!("Failed to decode Bovada response from {url}"))?;

        let matchups = normalize_events(&groups, &sport.label);
        info!(
            sport = %sport.label,
            matchups = matchups.len(),
            "Odds fetched"
        );
        Ok(matchups)
    }
}

// ---------------------------------------------------------------------------
// Normalisation
// ---------------------------------------------------------------------------

/// Turn raw event groups into matchups with resolvable moneyline odds.
///
/// Events are dropped (with a debug log, never an error) when they lack two
/// named competitors, a moneyline market, a price for either competitor, or
/// a price that parses as a positive decimal.
fn normalize_events(groups: &[EventGroup], sport_label: &str) -> Vec<Matchup> {
    let mut matchups = Vec::new();

    for event in groups.iter().flat_map(|g| g.events.iter()) {
        let (side_a, side_b) = match competitor_names(event) {
            Some(pair) => pair,
            None => {
                debug!("Event dropped: fewer than two named competitors");
                continue;
            }
        };

        let Some(market) = moneyline_market(event) else {
            debug!(%side_a, %side_b, "Event dropped: no moneyline market");
            continue;
        };

        let odds_a = outcome_odds(market, &side_a);
        let odds_b = outcome_odds(market, &side_b);
        let (Some(odds_a), Some(odds_b)) = (odds_a, odds_b) else {
            debug!(%side_a, %side_b, "Event dropped: unresolvable price");
            continue;
        };

        matchups.push(Matchup {
            side_a,
            side_b,
            odds_a,
            odds_b,
            start_time: event.start_time.and_then(millis_to_datetime),
            sport: Some(sport_label.to_string()),
        });
    }

    matchups
}

fn competitor_names(event: &Event) -> Option<(String, String)> {
    let mut names = event.competitors.iter().filter_map(|c| c.name.clone());
    let a = names.next()?;
    let b = names.next()?;
    Some((a, b))
}

fn moneyline_market(event: &Event) -> Option<&MarketEntry> {
    event
        .display_groups
        .iter()
        .flat_map(|g| g.markets.iter())
        .find(|m| m.description.as_deref() == Some(MONEYLINE))
}

/// Look up the parsed decimal price for one competitor, `None` when the
/// price is missing, non-numeric, or non-positive.
fn outcome_odds(market: &MarketEntry, competitor: &str) -> Option<Decimal> {
    let raw = market
        .outcomes
        .iter()
        .find(|o| o.description.as_deref() == Some(competitor))?
        .price
        .as_ref()?
        .decimal
        .as_deref()?;

    match Decimal::from_str(raw) {
        Ok(d) if d > Decimal::ZERO => Some(d),
        Ok(d) => {
            debug!(competitor, odds = %d, "Non-positive price rejected");
            None
        }
        Err(_) => {
            debug!(competitor, raw, "Non-numeric price rejected");
            None
        }
    }
}

fn millis_to_datetime(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(millis)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const FIXTURE: &str = r#"[
      {
        "events": [
          {
            "startTime": 1756200000000,
            "competitors": [
              { "name": "New York Yankees" },
              { "name": "Boston Red Sox" }
            ],
            "displayGroups": [
              {
                "markets": [
                  {
                    "description": "Run Line",
                    "outcomes": []
                  },
                  {
                    "description": "Moneyline",
                    "outcomes": [
                      { "description": "New York Yankees", "price": { "decimal": "1.80" } },
                      { "description": "Boston Red Sox", "price": { "decimal": "2.10" } }
                    ]
                  }
                ]
              }
            ]
          },
          {
            "competitors": [ { "name": "Solo Team" } ],
            "displayGroups": []
          },
          {
            "competitors": [
              { "name": "Mets" },
              { "name": "Braves" }
            ],
            "displayGroups": [
              {
                "markets": [
                  {
                    "description": "Moneyline",
                    "outcomes": [
                      { "description": "Mets", "price": { "decimal": "EVEN" } },
                      { "description": "Braves", "price": { "decimal": "1.95" } }
                    ]
                  }
                ]
              }
            ]
          }
        ]
      }
    ]"#;

    fn parse_fixture() -> Vec<EventGroup> {
        serde_json::from_str(FIXTURE).unwrap()
    }

    #[test]
    fn test_normalize_extracts_moneyline() {
        let matchups = normalize_events(&parse_fixture(), "MLB (Baseball)");
        assert_eq!(matchups.len(), 1);
        let m = &matchups[0];
        assert_eq!(m.side_a, "New York Yankees");
        assert_eq!(m.side_b, "Boston Red Sox");
        assert_eq!(m.odds_a, dec!(1.80));
        assert_eq!(m.odds_b, dec!(2.10));
        assert_eq!(m.sport.as_deref(), Some("MLB (Baseball)"));
        assert!(m.start_time.is_some());
    }

    #[test]
    fn test_single_competitor_event_dropped() {
        let matchups = normalize_events(&parse_fixture(), "MLB (Baseball)");
        assert!(!matchups.iter().any(|m| m.side_a == "Solo Team"));
    }

    #[test]
    fn test_non_numeric_price_drops_event() {
        // "EVEN" doesn't parse; the whole Mets/Braves event is excluded.
        let matchups = normalize_events(&parse_fixture(), "MLB (Baseball)");
        assert!(!matchups.iter().any(|m| m.side_a == "Mets"));
    }

    #[test]
    fn test_non_positive_price_rejected() {
        let market: MarketEntry = serde_json::from_str(
            r#"{
                "description": "Moneyline",
                "outcomes": [
                    { "description": "A", "price": { "decimal": "0" } },
                    { "description": "B", "price": { "decimal": "-2.0" } }
                ]
            }"#,
        )
        .unwrap();
        assert!(outcome_odds(&market, "A").is_none());
        assert!(outcome_odds(&market, "B").is_none());
    }

    #[test]
    fn test_missing_price_is_none() {
        let market: MarketEntry = serde_json::from_str(
            r#"{
                "description": "Moneyline",
                "outcomes": [ { "description": "A" } ]
            }"#,
        )
        .unwrap();
        assert!(outcome_odds(&market, "A").is_none());
        assert!(outcome_odds(&market, "Unlisted").is_none());
    }

    #[test]
    fn test_events_url_shape() {
        let client = BovadaClient::new(None).unwrap();
        assert_eq!(
            client.events_url("baseball/mlb"),
            "https://www.bovada.lv/services/sports/event/v2/events/A/description/baseball/mlb"
        );
    }

    #[test]
    fn test_empty_groups_yield_no_matchups() {
        assert!(normalize_events(&[], "Tennis (ATP/WTA)").is_empty());
    }
}
