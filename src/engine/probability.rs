//! Win-probability derivation.
//!
//! Two modes: probabilities entered by the user through the dashboard, or
//! probabilities implied by the book's own prices. In implied mode each
//! side's probability is the reciprocal of the *opposing* side's decimal
//! odds — `p_a = 1/odds_b`, `p_b = 1/odds_a` — and the pair is not
//! vig-normalised, so it need not sum to 1.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{Matchup, ProbabilityAssignment, ProbabilityMode, SkipReason};

/// Probability assumed for side A when the user has not entered one yet.
pub const DEFAULT_USER_PROBABILITY: Decimal = dec!(0.5);

/// Derive the `(p_a, p_b)` pair for one matchup.
///
/// `user_p_a` is only consulted in [`ProbabilityMode::UserSupplied`];
/// a missing value falls back to [`DEFAULT_USER_PROBABILITY`].
pub fn derive_probabilities(
    matchup: &Matchup,
    mode: ProbabilityMode,
    user_p_a: Option<Decimal>,
) -> Result<ProbabilityAssignment, SkipReason> {
    match mode {
        ProbabilityMode::UserSupplied => {
            let p_a = user_p_a.unwrap_or(DEFAULT_USER_PROBABILITY);
            if p_a < Decimal::ZERO || p_a > Decimal::ONE {
                return Err(SkipReason::InvalidProbability {
                    side: matchup.side_a.clone(),
                    value: p_a,
                });
            }
            Ok(ProbabilityAssignment {
                p_a,
                p_b: Decimal::ONE - p_a,
            })
        }
        ProbabilityMode::ImpliedFromOdds => {
            // Odds positivity is checked here (not just upstream) so the
            // divisions below can never hit zero.
            if matchup.odds_b <= Decimal::ZERO {
                return Err(SkipReason::InvalidOdds {
                    side: matchup.side_b.clone(),
                    value: matchup.odds_b,
                });
            }
            if matchup.odds_a <= Decimal::ZERO {
                return Err(SkipReason::InvalidOdds {
                    side: matchup.side_a.clone(),
                    value: matchup.odds_a,
                });
            }
            Ok(ProbabilityAssignment {
                p_a: Decimal::ONE / matchup.odds_b,
                p_b: Decimal::ONE / matchup.odds_a,
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
