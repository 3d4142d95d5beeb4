//! # Kemeny's rule
//!
//! Exhaustive search for the preference ranking with maximal pairwise agreement: every
//! pair ranked in the order the majority prefers contributes its margin to the score,
//! every inverted pair subtracts it. The permutations are enumerated lazily and the
//! wall clock is checked between them, so the search degrades into a timeout rather
//! than an unbounded stall.
use itertools::Itertools;

use crate::algorithm::{Deadline, SearchLimits};
use crate::data::answer::RuleError;
use crate::data::margin::Staircase;

/// The maximum-score ranking and its score.
///
/// The first permutation reaching the maximum is kept, so among equally good rankings
/// the lexicographically smallest one wins.
///
/// # Errors
///
/// `RuleError::Timeout` when the budget is exhausted before all `n!` permutations were
/// scored; a partial maximum is never returned.
pub fn kemeny_ranking(
    staircase: &Staircase,
    limits: &SearchLimits,
) -> Result<(Vec<usize>, f64), RuleError> {
    let size = staircase.nr_alternatives();
    let deadline = Deadline::after(limits.kemeny_budget);

    let mut best: Option<(Vec<usize>, f64)> = None;
    for permutation in (0..size).permutations(size) {
        if deadline.passed() {
            return Err(RuleError::Timeout);
        }

        let score = kemeny_score(&permutation, staircase);
        if best.as_ref().map_or(true, |(_, high)| score > *high) {
            best = Some((permutation, score));
        }
    }

    Ok(best.expect("there is at least one permutation"))
}

/// Pairwise agreement score of one trial ranking.
fn kemeny_score(ranking: &[usize], staircase: &Staircase) -> f64 {
    let mut score = 0_f64;
    for (i, &top) in ranking.iter().enumerate() {
        for &bottom in &ranking[i + 1..] {
            let margin = staircase.upper(top.min(bottom), top.max(bottom));
            if top > bottom {
                score -= margin;
            } else {
                score += margin;
            }
        }
    }

    score
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use crate::algorithm::kemeny::{kemeny_ranking, kemeny_score};
    use crate::algorithm::SearchLimits;
    use crate::data::answer::RuleError;
    use crate::data::margin::Staircase;

    #[test]
    fn unique_strict_order_is_recovered() {
        // Margins all agree with 2 > 0 > 3 > 1; the optimal score is the sum of the
        // absolute margins.
        let staircase = Staircase::new(vec![
            vec![3_f64, -2_f64, 1_f64],
            vec![-4_f64, -1_f64],
            vec![5_f64],
        ]);

        let (ranking, score) = kemeny_ranking(&staircase, &SearchLimits::default()).unwrap();
        assert_eq!(ranking, vec![2, 0, 3, 1]);
        assert_eq!(score, 3.0 + 2.0 + 1.0 + 4.0 + 1.0 + 5.0);
    }

    #[test]
    fn score_flips_with_inversions() {
        let staircase = Staircase::new(vec![vec![2_f64]]);

        assert_eq!(kemeny_score(&[0, 1], &staircase), 2_f64);
        assert_eq!(kemeny_score(&[1, 0], &staircase), -2_f64);
    }

    #[test]
    fn first_optimum_wins_ties() {
        // A perfect tie: every ranking scores zero, the identity comes first.
        let staircase = Staircase::new(vec![vec![0_f64, 0_f64], vec![0_f64]]);

        let (ranking, score) = kemeny_ranking(&staircase, &SearchLimits::default()).unwrap();
        assert_eq!(ranking, vec![0, 1, 2]);
        assert_eq!(score, 0_f64);
    }

    #[test]
    fn zero_budget_times_out() {
        let staircase = Staircase::new(vec![vec![1_f64, 1_f64], vec![1_f64]]);
        let limits = SearchLimits {
            kemeny_budget: Duration::ZERO,
            ..SearchLimits::default()
        };

        assert_eq!(kemeny_ranking(&staircase, &limits), Err(RuleError::Timeout));
    }
}
