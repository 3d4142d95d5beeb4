//! # Lotteries
//!
//! A lottery is a probability distribution over the alternatives: a non-negative vector
//! summing to one. Winner rules return degenerate lotteries, one per tied winner; the
//! maximal-lottery rules return the corners of a polytope of lotteries. Profile rules
//! with rational probabilities additionally report exact values.
use std::cmp::Ordering;

use relp_num::Rational64;
use relp_num::R64;

/// Tolerance used for support membership and lottery validity checks.
pub const TOLERANCE: f64 = 1e-6;

/// A lottery with exact rational entries.
pub type ExactLottery = Vec<Rational64>;

/// Degenerate 0/1 lotteries, one per winner.
#[must_use]
pub fn winner_lotteries(winners: &[usize], size: usize) -> Vec<Vec<f64>> {
    winners.iter()
        .map(|&winner| {
            let mut lottery = vec![0_f64; size];
            lottery[winner] = 1_f64;
            lottery
        })
        .collect()
}

/// All alternatives receiving positive probability in at least one of the lotteries.
#[must_use]
pub fn support(lotteries: &[Vec<f64>]) -> Vec<usize> {
    let size = lotteries.first().map_or(0, Vec::len);

    (0..size)
        .filter(|&i| lotteries.iter().any(|lottery| lottery[i] > TOLERANCE))
        .collect()
}

/// Whether the vector is a probability distribution, within `TOLERANCE`.
#[must_use]
pub fn is_valid_lottery(lottery: &[f64]) -> bool {
    lottery.iter().all(|&p| p >= -TOLERANCE)
        && (lottery.iter().sum::<f64>() - 1_f64).abs() <= TOLERANCE
}

/// Compare two lotteries descending-lexicographically: the vector with the strictly
/// larger value in the first differing coordinate sorts first.
#[must_use]
pub fn descending_lexicographic(left: &[f64], right: &[f64]) -> Ordering {
    for (a, b) in left.iter().zip(right) {
        match b.partial_cmp(a) {
            Some(Ordering::Equal) | None => continue,
            Some(ordering) => return ordering,
        }
    }

    Ordering::Equal
}

/// Exact lottery from integer scores and their total.
///
/// Entries are `score / total`; the caller guarantees `total > 0`.
#[must_use]
pub fn exact_from_scores(scores: &[u64], total: u64) -> ExactLottery {
    debug_assert!(total > 0);
    debug_assert!(total <= i64::MAX as u64);

    scores.iter()
        .map(|&score| R64!(score as i64, total as i64))
        .collect()
}
