//! EV engine — probability derivation → per-side EV → selection → summary.
//!
//! The whole pipeline is pure and synchronous: identical inputs always
//! yield identical outputs, and nothing here performs I/O or holds state
//! across invocations.

pub mod ev;
pub mod probability;
pub mod selection;
pub mod summary;

use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::types::{
    BetSummary, Matchup, ProbabilityMode, SelectionPolicy, SkipReason, SkippedMatchup, ValueBet,
};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Per-evaluation engine settings, passed in at construction — there is no
/// module-level mutable configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Fixed stake per bet, in currency units. Constant across one pass.
    pub stake: Decimal,
    pub policy: SelectionPolicy,
    pub mode: ProbabilityMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            stake: rust_decimal_macros::dec!(10),
            policy: SelectionPolicy::BothSides,
            mode: ProbabilityMode::ImpliedFromOdds,
        }
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Output of one evaluation pass.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub bets: Vec<ValueBet>,
    /// Matchups excluded from the pass, with their reasons. Surfaced to the
    /// dashboard for diagnostics rather than aborting the batch.
    pub skipped: Vec<SkippedMatchup>,
    pub summary: BetSummary,
}

/// The EV engine.
///
/// Instantiate once with the desired configuration; `evaluate` may be
/// called repeatedly (once per refresh cycle), each invocation independent.
#[derive(Debug, Clone)]
pub struct EvEngine {
    config: EngineConfig,
}

impl EvEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate a batch of matchups.
    ///
    /// `user_probs` maps [`Matchup::key`] to a user-entered probability for
    /// side A; it is only consulted in user-supplied mode. A malformed
    /// matchup lands in `skipped` and never affects the others.
    pub fn evaluate(
        &self,
        matchups: &[Matchup],
        user_probs: &HashMap<String, Decimal>,
    ) -> Evaluation {
        let mut bets = Vec::new();
        let mut skipped = Vec::new();

        for matchup in matchups {
            match self.evaluate_matchup(matchup, user_probs.get(&matchup.key()).copied()) {
                Ok(selected) => bets.extend(selected),
                Err(reason) => {
                    debug!(matchup = %matchup, reason = %reason, "Matchup skipped");
                    skipped.push(SkippedMatchup {
                        side_a: matchup.side_a.clone(),
                        side_b: matchup.side_b.clone(),
                        reason,
                    });
                }
            }
        }

        let summary = summary::summarize(&bets, self.config.stake);
        info!(
            matchups_in = matchups.len(),
            value_bets = bets.len(),
            skipped = skipped.len(),
            total_ev = %summary.total_ev,
            "Evaluation complete"
        );

        Evaluation { bets, skipped, summary }
    }

    fn evaluate_matchup(
        &self,
        matchup: &Matchup,
        user_p_a: Option<Decimal>,
    ) -> Result<Vec<ValueBet>, SkipReason> {
        // Both policies price both sides, so non-positive odds on either
        // side disqualify the matchup regardless of probability mode.
        for (side, odds) in [
            (&matchup.side_a, matchup.odds_a),
            (&matchup.side_b, matchup.odds_b),
        ] {
            if odds <= Decimal::ZERO {
                return Err(SkipReason::InvalidOdds {
                    side: side.clone(),
                    value: odds,
                });
            }
        }

        let probs = probability::derive_probabilities(matchup, self.config.mode, user_p_a)?;
        Ok(selection::select_bets(
            matchup,
            &probs,
            self.config.stake,
            self.config.policy,
        ))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
