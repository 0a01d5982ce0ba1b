//! Value-bet selection.
//!
//! Both supported policies threshold on strictly positive EV — an exactly
//! break-even side never qualifies. Selection compares raw EVs; the cent
//! rounding happens only on the emitted record.

use rust_decimal::Decimal;
use tracing::debug;

use super::ev::side_evs;
use crate::types::{Matchup, ProbabilityAssignment, SelectionPolicy, ValueBet};

/// Apply the selection policy to one matchup.
///
/// `BothSides` emits every side with positive EV; `BestSide` emits at most
/// the higher-EV side, ties going to side A.
pub fn select_bets(
    matchup: &Matchup,
    probs: &ProbabilityAssignment,
    stake: Decimal,
    policy: SelectionPolicy,
) -> Vec<ValueBet> {
    let (ev_a, ev_b) = side_evs(matchup, probs, stake);
    let mut bets = Vec::new();

    match policy {
        SelectionPolicy::BothSides => {
            if ev_a > Decimal::ZERO {
                bets.push(make_bet(matchup, Pick::A, probs.p_a, ev_a));
            }
            if ev_b > Decimal::ZERO {
                bets.push(make_bet(matchup, Pick::B, probs.p_b, ev_b));
            }
        }
        SelectionPolicy::BestSide => {
            if ev_a.max(ev_b) > Decimal::ZERO {
                if ev_a >= ev_b {
                    bets.push(make_bet(matchup, Pick::A, probs.p_a, ev_a));
                } else {
                    bets.push(make_bet(matchup, Pick::B, probs.p_b, ev_b));
                }
            }
        }
    }

    if !bets.is_empty() {
        debug!(
            matchup = %matchup,
            ev_a = %ev_a,
            ev_b = %ev_b,
            picks = bets.len(),
            "Value bet(s) selected"
        );
    }

    bets
}

enum Pick {
    A,
    B,
}

fn make_bet(matchup: &Matchup, pick: Pick, prob: Decimal, ev: Decimal) -> ValueBet {
    let (side, opponent, odds) = match pick {
        Pick::A => (&matchup.side_a, &matchup.side_b, matchup.odds_a),
        Pick::B => (&matchup.side_b, &matchup.side_a, matchup.odds_b),
    };
    ValueBet {
        side: side.clone(),
        opponent: opponent.clone(),
        odds,
        probability: prob,
        expected_value: ev.round_dp(2),
        sport: matchup.sport.clone(),
        start_time: matchup.start_time,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn matchup(odds_a: Decimal, odds_b: Decimal) -> Matchup {
        Matchup {
            side_a: "A".into(),
            side_b: "B".into(),
            odds_a,
            odds_b,
            start_time: None,
            sport: Some("Tennis (ATP/WTA)".into()),
        }
    }

    fn probs(p_a: Decimal, p_b: Decimal) -> ProbabilityAssignment {
        ProbabilityAssignment { p_a, p_b }
    }

    #[test]
    fn test_both_sides_can_emit_two() {
        // Both sides priced long enough that EV is positive at p = 0.5 each.
        let m = matchup(dec!(2.5), dec!(2.5));
        let bets = select_bets(&m, &probs(dec!(0.5), dec!(0.5)), dec!(10), SelectionPolicy::BothSides);
        assert_eq!(bets.len(), 2);
        assert_eq!(bets[0].side, "A");
        assert_eq!(bets[1].side, "B");
        assert_eq!(bets[1].opponent, "A");
    }

    #[test]
    fn test_both_sides_emits_only_positive() {
        let m = matchup(dec!(2.0), dec!(2.0));
        let bets = select_bets(&m, &probs(dec!(0.6), dec!(0.4)), dec!(10), SelectionPolicy::BothSides);
        assert_eq!(bets.len(), 1);
        assert_eq!(bets[0].side, "A");
        assert_eq!(bets[0].expected_value, dec!(2.00));
    }

    #[test]
    fn test_best_side_never_emits_two() {
        let m = matchup(dec!(2.5), dec!(2.5));
        let bets = select_bets(&m, &probs(dec!(0.5), dec!(0.5)), dec!(10), SelectionPolicy::BestSide);
        assert_eq!(bets.len(), 1);
    }

    #[test]
    fn test_best_side_tie_picks_side_a() {
        // Identical odds and probabilities: EV_A == EV_B > 0
        let m = matchup(dec!(2.5), dec!(2.5));
        let bets = select_bets(&m, &probs(dec!(0.5), dec!(0.5)), dec!(10), SelectionPolicy::BestSide);
        assert_eq!(bets[0].side, "A");
    }

    #[test]
    fn test_best_side_picks_higher_ev() {
        let m = matchup(dec!(2.0), dec!(3.0));
        // EV_A = 0.5*10 - 0.5*10 = 0; EV_B = 0.5*20 - 0.5*10 = 5
        let bets = select_bets(&m, &probs(dec!(0.5), dec!(0.5)), dec!(10), SelectionPolicy::BestSide);
        assert_eq!(bets.len(), 1);
        assert_eq!(bets[0].side, "B");
        assert_eq!(bets[0].odds, dec!(3.0));
    }

    #[test]
    fn test_zero_ev_excluded_under_both_policies() {
        // p = 1/odds on both sides → EV exactly 0 everywhere
        let m = matchup(dec!(2.0), dec!(2.0));
        let p = probs(dec!(0.5), dec!(0.5));
        assert!(select_bets(&m, &p, dec!(10), SelectionPolicy::BothSides).is_empty());
        assert!(select_bets(&m, &p, dec!(10), SelectionPolicy::BestSide).is_empty());
    }

    #[test]
    fn test_tiny_positive_ev_included() {
        // p just above break-even: EV = 0.5001*10 - 0.4999*10 = 0.002
        let m = matchup(dec!(2.0), dec!(2.0));
        let p = probs(dec!(0.5001), dec!(0.4999));
        let bets = select_bets(&m, &p, dec!(10), SelectionPolicy::BothSides);
        assert_eq!(bets.len(), 1);
        // Rounded to cents on the record itself
        assert_eq!(bets[0].expected_value, dec!(0.00));
    }

    #[test]
    fn test_bet_carries_matchup_metadata() {
        let m = matchup(dec!(2.0), dec!(2.0));
        let bets = select_bets(&m, &probs(dec!(0.7), dec!(0.3)), dec!(10), SelectionPolicy::BestSide);
        assert_eq!(bets[0].sport.as_deref(), Some("Tennis (ATP/WTA)"));
    }

    #[test]
    fn test_ev_rounded_to_cents() {
        let m = matchup(dec!(2.0), dec!(2.0));
        // EV_A = 0.626*10 - 0.374*10 = 2.52
        let bets = select_bets(&m, &probs(dec!(0.626), dec!(0.374)), dec!(10), SelectionPolicy::BestSide);
        assert_eq!(bets[0].expected_value, dec!(2.52));
    }
}
