//! Dashboard API route handlers.
//!
//! All endpoints return JSON. State is shared via `Arc<DashboardState>`.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

use crate::engine::probability::DEFAULT_USER_PROBABILITY;
use crate::engine::EvEngine;
use crate::history::{HistoryEntry, HistoryStore};
use crate::types::{BetSummary, Matchup, SkippedMatchup, ValueBet};

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// One evaluation's results as shown on the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationSnapshot {
    pub generated_at: DateTime<Utc>,
    pub bets: Vec<ValueBet>,
    pub skipped: Vec<SkippedMatchup>,
    pub summary: BetSummary,
}

/// Shared state accessible by all route handlers and the refresh loop.
pub struct DashboardState {
    pub engine: EvEngine,
    /// Latest normalised matchups from the odds provider.
    pub matchups: RwLock<Vec<Matchup>>,
    /// User-entered side-A probabilities, keyed by [`Matchup::key`].
    pub user_probs: RwLock<HashMap<String, Decimal>>,
    pub evaluation: RwLock<Option<EvaluationSnapshot>>,
    pub history: Arc<dyn HistoryStore>,
}

impl DashboardState {
    pub fn new(engine: EvEngine, history: Arc<dyn HistoryStore>) -> Self {
        Self {
            engine,
            matchups: RwLock::new(Vec::new()),
            user_probs: RwLock::new(HashMap::new()),
            evaluation: RwLock::new(None),
            history,
        }
    }

    /// Re-run the engine over the stored matchups with the current user
    /// probabilities and publish the resulting snapshot.
    pub async fn reevaluate(&self) -> EvaluationSnapshot {
        let matchups = self.matchups.read().await;
        let probs = self.user_probs.read().await;
        let eval = self.engine.evaluate(&matchups, &probs);
        let snapshot = EvaluationSnapshot {
            generated_at: Utc::now(),
            bets: eval.bets,
            skipped: eval.skipped,
            summary: eval.summary,
        };
        *self.evaluation.write().await = Some(snapshot.clone());
        snapshot
    }
}

pub type AppState = Arc<DashboardState>;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Inclusive start date, `YYYY-MM-DD`. Defaults to 7 days ago.
    pub from: Option<NaiveDate>,
}

/// Row for the matchup entry table: current odds plus the side-A
/// probability the next evaluation will use.
#[derive(Debug, Serialize)]
pub struct MatchupRow {
    /// [`Matchup::key`], echoed back by `POST /api/probabilities`.
    pub key: String,
    pub side_a: String,
    pub side_b: String,
    pub odds_a: Decimal,
    pub odds_b: Decimal,
    pub sport: Option<String>,
    /// User-entered probability for side A, or the 0.5 default.
    pub probability: Decimal,
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub saved: usize,
}

#[derive(Debug, Serialize)]
pub struct ProbabilitiesResponse {
    pub accepted: usize,
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// GET /api/evaluation
pub async fn get_evaluation(
    State(state): State<AppState>,
) -> Result<Json<EvaluationSnapshot>, StatusCode> {
    match state.evaluation.read().await.clone() {
        Some(snapshot) => Ok(Json(snapshot)),
        None => Err(StatusCode::SERVICE_UNAVAILABLE),
    }
}

/// GET /api/summary
pub async fn get_summary(State(state): State<AppState>) -> Json<BetSummary> {
    let summary = state
        .evaluation
        .read()
        .await
        .as_ref()
        .map(|s| s.summary.clone())
        .unwrap_or_else(BetSummary::zero);
    Json(summary)
}

/// GET /api/matchups
///
/// The current slate with odds and the probabilities in effect, so the UI
/// can render one input per matchup.
pub async fn get_matchups(State(state): State<AppState>) -> Json<Vec<MatchupRow>> {
    let matchups = state.matchups.read().await;
    let probs = state.user_probs.read().await;
    let rows = matchups
        .iter()
        .map(|m| {
            let key = m.key();
            MatchupRow {
                probability: probs.get(&key).copied().unwrap_or(DEFAULT_USER_PROBABILITY),
                side_a: m.side_a.clone(),
                side_b: m.side_b.clone(),
                odds_a: m.odds_a,
                odds_b: m.odds_b,
                sport: m.sport.clone(),
                key,
            }
        })
        .collect();
    Json(rows)
}

/// POST /api/probabilities
///
/// Body: `{ "<sideA> vs <sideB>": 0.6, ... }`. Merges the entries and
/// recomputes the snapshot immediately so the UI reflects them without
/// waiting for the next refresh cycle.
pub async fn post_probabilities(
    State(state): State<AppState>,
    Json(body): Json<HashMap<String, Decimal>>,
) -> Json<ProbabilitiesResponse> {
    let accepted = body.len();
    {
        let mut probs = state.user_probs.write().await;
        probs.extend(body);
    }
    state.reevaluate().await;
    Json(ProbabilitiesResponse { accepted })
}

/// POST /api/history/save
///
/// Appends the current snapshot's bets to durable history. The store
/// assigns the timestamp.
pub async fn save_history(
    State(state): State<AppState>,
) -> Result<Json<SaveResponse>, StatusCode> {
    let bets = match state.evaluation.read().await.as_ref() {
        Some(snapshot) => snapshot.bets.clone(),
        None => return Err(StatusCode::SERVICE_UNAVAILABLE),
    };
    match state.history.append(&bets, Utc::now()) {
        Ok(()) => Ok(Json(SaveResponse { saved: bets.len() })),
        Err(e) => {
            warn!(error = %e, "Failed to save bet history");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/history?from=YYYY-MM-DD
pub async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<HistoryEntry>>, StatusCode> {
    let from = query
        .from
        .unwrap_or_else(|| (Utc::now() - Duration::days(7)).date_naive());
    match state.history.entries_since(from) {
        Ok(entries) => Ok(Json(entries)),
        Err(e) => {
            warn!(error = %e, "Failed to read bet history");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /health
pub async fn health() -> StatusCode {
    StatusCode::OK
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
