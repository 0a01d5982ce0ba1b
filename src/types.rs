//! Shared types for the value-bet dashboard.
//!
//! These types form the data model used across all modules.
//! They are designed to be stable so that the odds, engine,
//! history, and dashboard modules can depend on them without
//! circular references.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Matchup
// ---------------------------------------------------------------------------

/// A two-sided moneyline matchup with decimal odds for each side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Matchup {
    pub side_a: String,
    pub side_b: String,
    /// Decimal odds for side A (> 1.0 for any real book price).
    pub odds_a: Decimal,
    /// Decimal odds for side B.
    pub odds_b: Decimal,
    /// Scheduled start time, when the book reports one.
    pub start_time: Option<DateTime<Utc>>,
    /// Sport label, e.g. "MLB (Baseball)".
    pub sport: Option<String>,
}

impl Matchup {
    /// Stable key used to attach user-entered probabilities to a matchup.
    pub fn key(&self) -> String {
        format!("{} vs {}", self.side_a, self.side_b)
    }
}

impl fmt::Display for Matchup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) vs {} ({})",
            self.side_a, self.odds_a, self.side_b, self.odds_b
        )
    }
}

/// Win-probability pair for one matchup.
///
/// In implied mode each side's probability comes from the reciprocal of the
/// *opposing* price, so `p_a + p_b` need not equal 1 — no vig normalisation
/// is applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityAssignment {
    pub p_a: Decimal,
    pub p_b: Decimal,
}

// ---------------------------------------------------------------------------
// Engine configuration enums
// ---------------------------------------------------------------------------

/// Which side(s) of a matchup may qualify as a value bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Emit a bet for every side whose EV is strictly positive — a single
    /// matchup can contribute zero, one, or two bets.
    BothSides,
    /// Emit at most one bet per matchup: the side with the strictly higher
    /// EV, ties going to side A.
    BestSide,
}

impl fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionPolicy::BothSides => write!(f, "both_sides"),
            SelectionPolicy::BestSide => write!(f, "best_side"),
        }
    }
}

/// Where win probabilities come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbabilityMode {
    /// Reciprocal of the opposing side's decimal odds.
    ImpliedFromOdds,
    /// Probabilities entered through the dashboard, `p_b = 1 - p_a`.
    UserSupplied,
}

impl fmt::Display for ProbabilityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbabilityMode::ImpliedFromOdds => write!(f, "implied_from_odds"),
            ProbabilityMode::UserSupplied => write!(f, "user_supplied"),
        }
    }
}

// ---------------------------------------------------------------------------
// Skip taxonomy
// ---------------------------------------------------------------------------

/// Why a matchup was excluded from an evaluation pass.
///
/// Skips are per-matchup and non-fatal: one bad matchup never aborts the
/// rest of the batch.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    #[error("non-positive odds {value} for {side}")]
    InvalidOdds { side: String, value: Decimal },
    #[error("probability {value} outside [0, 1] for {side}")]
    InvalidProbability { side: String, value: Decimal },
}

/// A matchup excluded from evaluation, with the reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedMatchup {
    pub side_a: String,
    pub side_b: String,
    pub reason: SkipReason,
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// One selected positive-EV wager. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueBet {
    /// The side being backed.
    pub side: String,
    pub opponent: String,
    /// Decimal odds for the chosen side.
    pub odds: Decimal,
    /// Win probability used in the EV computation.
    pub probability: Decimal,
    /// EV in currency units at the configured stake, rounded to cents.
    pub expected_value: Decimal,
    pub sport: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
}

impl fmt::Display for ValueBet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} over {} @ {} (p={}, EV=${})",
            self.side, self.opponent, self.odds, self.probability, self.expected_value
        )
    }
}

/// Aggregate metrics over one evaluation's value bets.
///
/// Recomputed by a full traversal on every evaluation; never partially
/// updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetSummary {
    pub count: usize,
    /// `count * stake` — total amount at risk if every bet is placed.
    pub total_risk: Decimal,
    pub total_ev: Decimal,
    /// Total profit if every selected bet wins.
    pub max_win: Decimal,
    pub expected_win: Decimal,
    pub expected_loss: Decimal,
}

impl BetSummary {
    pub fn zero() -> Self {
        Self {
            count: 0,
            total_risk: Decimal::ZERO,
            total_ev: Decimal::ZERO,
            max_win: Decimal::ZERO,
            expected_win: Decimal::ZERO,
            expected_loss: Decimal::ZERO,
        }
    }
}

impl fmt::Display for BetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} bets | risk ${} | EV ${} | max win ${}",
            self.count, self.total_risk, self.total_ev, self.max_win
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
