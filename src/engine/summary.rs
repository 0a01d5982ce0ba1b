//! Aggregate summary over one evaluation's value bets.

use rust_decimal::Decimal;

use crate::types::{BetSummary, ValueBet};

/// Fold a bet list into the dashboard's summary metrics.
///
/// Always a full traversal — nothing is cached or updated incrementally,
/// so the result depends only on the bets and the stake. Empty input
/// yields the all-zero summary.
pub fn summarize(bets: &[ValueBet], stake: Decimal) -> BetSummary {
    BetSummary {
        count: bets.len(),
        total_risk: Decimal::from(bets.len() as u64) * stake,
        total_ev: bets.iter().map(|b| b.expected_value).sum(),
        max_win: bets.iter().map(|b| (b.odds - Decimal::ONE) * stake).sum(),
        expected_win: bets
            .iter()
            .map(|b| b.probability * (b.odds - Decimal::ONE) * stake)
            .sum(),
        expected_loss: bets
            .iter()
            .map(|b| (Decimal::ONE - b.probability) * stake)
            .sum(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
