//! Fixed-stake expected value at decimal odds.
//!
//! `EV = p * (o - 1) * s - (1 - p) * s`: on a win the net profit is
//! `(o - 1) * s`, on a loss the whole stake is gone. Pure numeric
//! functions, no side effects.

use rust_decimal::Decimal;

use crate::types::{Matchup, ProbabilityAssignment};

/// EV in currency units for one side of a bet.
pub fn expected_value(odds: Decimal, prob: Decimal, stake: Decimal) -> Decimal {
    prob * (odds - Decimal::ONE) * stake - (Decimal::ONE - prob) * stake
}

/// EV for both sides of a matchup, computed independently and
/// symmetrically: side A pairs `p_a` with `odds_a`, side B pairs
/// `p_b` with `odds_b`.
pub fn side_evs(
    matchup: &Matchup,
    probs: &ProbabilityAssignment,
    stake: Decimal,
) -> (Decimal, Decimal) {
    (
        expected_value(matchup.odds_a, probs.p_a, stake),
        expected_value(matchup.odds_b, probs.p_b, stake),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
