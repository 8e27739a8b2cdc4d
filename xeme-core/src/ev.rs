//! Expected value and house edge over the full joint draw space.
//!
//! Player and house each draw uniformly from `0..bound`. A pair pays the
//! player's weight unless the player's rank is strictly below the house's.
//! Sums are exact enumerations of all `bound * bound` pairs.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Result, XemeError};
use crate::numbers::u64_to_f64;
use crate::order::TierOrder;
use crate::rank::RankTable;

/// Result of one evaluation at a given round count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvReport {
    /// Expected payout multiplier for a single round.
    pub ev: f64,
    pub rounds: u32,
    /// `ev^rounds`: expected return over all rounds.
    pub rtp: f64,
    /// `1 - ev^rounds`: house edge over all rounds.
    pub edge: f64,
    /// Probability that a pair pays at all, ignoring weights.
    pub win_mass: f64,
}

#[derive(Debug, Clone, Copy)]
struct Accumulated {
    ev: f64,
    paying_pairs: u64,
}

fn accumulate<F>(
    player: &TierOrder,
    house: &TierOrder,
    weight_fn: F,
    bound: u32,
) -> Result<Accumulated>
where
    F: Fn(u32) -> f64,
{
    let player_ranks = RankTable::build(player, bound)?;
    let house_ranks = RankTable::build(house, bound)?;
    let weights: Vec<f64> = (0..bound).map(weight_fn).collect();
    let p = 1.0 / (f64::from(bound) * f64::from(bound));

    let mut ev = 0.0;
    let mut paying_pairs = 0_u64;
    for &house_rank in house_ranks.ranks() {
        for (&player_rank, &weight) in player_ranks.ranks().iter().zip(&weights) {
            if player_rank < house_rank {
                continue;
            }
            ev += p * weight;
            paying_pairs += 1;
        }
    }
    Ok(Accumulated { ev, paying_pairs })
}

/// Expected payout multiplier of one round.
///
/// # Errors
///
/// Returns [`XemeError::InvalidParameter`] for a zero bound and
/// [`XemeError::ValueNotRanked`] when either order misses a value of
/// `0..bound`. No partial sum is ever returned.
pub fn compute_ev<F>(player: &TierOrder, house: &TierOrder, weight_fn: F, bound: u32) -> Result<f64>
where
    F: Fn(u32) -> f64,
{
    accumulate(player, house, weight_fn, bound).map(|acc| acc.ev)
}

fn require_rounds(rounds: u32) -> Result<()> {
    if rounds == 0 {
        return Err(XemeError::invalid("rounds", rounds, "must be at least 1"));
    }
    Ok(())
}

/// Expected return after `rounds` rounds, treating `ev` as a per-round factor.
///
/// # Errors
///
/// Returns [`XemeError::InvalidParameter`] when `rounds` is zero.
pub fn return_for_rounds(ev: f64, rounds: u32) -> Result<f64> {
    require_rounds(rounds)?;
    Ok(ev.powf(f64::from(rounds)))
}

/// House edge after `rounds` rounds: `1 - ev^rounds`.
///
/// # Errors
///
/// Returns [`XemeError::InvalidParameter`] when `rounds` is zero.
pub fn edge_for_rounds(ev: f64, rounds: u32) -> Result<f64> {
    Ok(1.0 - return_for_rounds(ev, rounds)?)
}

/// EV, return, edge, and paying mass in one pass.
///
/// # Errors
///
/// Fails like [`compute_ev`], and with [`XemeError::InvalidParameter`] for
/// zero rounds before any summation happens.
pub fn evaluate<F>(
    player: &TierOrder,
    house: &TierOrder,
    weight_fn: F,
    bound: u32,
    rounds: u32,
) -> Result<EvReport>
where
    F: Fn(u32) -> f64,
{
    require_rounds(rounds)?;
    let acc = accumulate(player, house, weight_fn, bound)?;
    let pairs = u64::from(bound) * u64::from(bound);
    let rtp = return_for_rounds(acc.ev, rounds)?;
    let report = EvReport {
        ev: acc.ev,
        rounds,
        rtp,
        edge: 1.0 - rtp,
        win_mass: u64_to_f64(acc.paying_pairs) / u64_to_f64(pairs),
    };
    debug!(
        "evaluated bound {bound}: ev {:.6}, {} of {pairs} pairs pay, edge {:.6} over {rounds} round(s)",
        report.ev, acc.paying_pairs, report.edge
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::Tier;

    fn order(lists: &[&[u32]]) -> TierOrder {
        lists.iter().map(|l| l.iter().copied().collect::<Tier>()).collect()
    }

    #[test]
    fn two_value_game_by_hand() {
        // Player {0} < {1}; house {} < {0} < {1}.
        let player = order(&[&[0], &[1]]);
        let house = order(&[&[], &[0], &[1]]);
        // Player ranks 0,1; house ranks 1,2. Only player 1 against house 0 pays.
        let ev = compute_ev(&player, &house, |_| 2.0, 2).unwrap();
        assert!((ev - 0.5).abs() < 1e-12);
    }

    #[test]
    fn identical_orders_pay_ties() {
        let o = order(&[&[0, 1, 2]]);
        let ev = compute_ev(&o, &o, |_| 1.0, 3).unwrap();
        assert!((ev - 1.0).abs() < 1e-12);
    }

    #[test]
    fn missing_value_aborts() {
        let full = order(&[&[0, 1, 2, 3, 4, 5, 6]]);
        let gap = order(&[&[0, 1, 2, 3, 4, 6]]);
        assert_eq!(
            compute_ev(&gap, &full, |_| 1.0, 7),
            Err(XemeError::ValueNotRanked { value: 5 })
        );
        assert_eq!(
            compute_ev(&full, &gap, |_| 1.0, 7),
            Err(XemeError::ValueNotRanked { value: 5 })
        );
    }

    #[test]
    fn rounds_must_be_positive() {
        assert!(edge_for_rounds(0.9, 0).is_err());
        assert!(return_for_rounds(0.9, 0).is_err());
        let o = order(&[&[0]]);
        assert!(matches!(
            evaluate(&o, &o, |_| 1.0, 1, 0),
            Err(XemeError::InvalidParameter { name: "rounds", .. })
        ));
    }

    #[test]
    fn edge_compounds_ev() {
        assert!((edge_for_rounds(0.5, 1).unwrap() - 0.5).abs() < 1e-12);
        assert!((edge_for_rounds(0.5, 3).unwrap() - 0.875).abs() < 1e-12);
        assert!((edge_for_rounds(1.1, 2).unwrap() + 0.21).abs() < 1e-12);
    }

    #[test]
    fn report_carries_win_mass() {
        let player = order(&[&[0], &[1]]);
        let house = order(&[&[], &[0], &[1]]);
        let report = evaluate(&player, &house, |_| 2.0, 2, 2).unwrap();
        assert!((report.win_mass - 0.25).abs() < 1e-12);
        assert!((report.rtp - 0.25).abs() < 1e-12);
        assert!((report.edge - 0.75).abs() < 1e-12);
        assert_eq!(report.rounds, 2);
    }
}
