//! # Score rules
//!
//! The classic one-shot rules: scores computed directly from the margins (Borda,
//! minimax, Copeland and friends), elimination rules that repeatedly drop the weakest
//! candidates (Nanson, Baldwin, instant runoff), and the profile-dependent plurality
//! family. All winner rules report every tied winner.
use index_utils::remove_indices;

use crate::data::lottery::{exact_from_scores, ExactLottery};
use crate::data::margin::{MarginMatrix, Staircase};
use crate::data::profile::Profile;

/// Borda scores: the sum of a candidate's margins against everyone else.
#[must_use]
pub fn borda_scores(margins: &MarginMatrix) -> Vec<f64> {
    margins.rows().iter()
        .map(|row| row.iter().sum())
        .collect()
}

/// The Borda winners.
#[must_use]
pub fn borda(staircase: &Staircase) -> Vec<usize> {
    positions_of_maximum(&borda_scores(&MarginMatrix::from_staircase(staircase)))
}

/// The strict Condorcet winner: positive margin against every other alternative.
#[must_use]
pub fn condorcet_winner(staircase: &Staircase) -> Option<usize> {
    let margins = MarginMatrix::from_staircase(staircase);

    (0..margins.size()).find(|&i| {
        (0..margins.size()).all(|j| j == i || margins.at(i, j) > 0_f64)
    })
}

/// Black's rule: the Condorcet winner when one exists, the Borda winners otherwise.
#[must_use]
pub fn black(staircase: &Staircase) -> Vec<usize> {
    match condorcet_winner(staircase) {
        Some(winner) => vec![winner],
        None => borda(staircase),
    }
}

/// The minimax (maximin) winners: best worst pairwise comparison.
#[must_use]
pub fn minimax(staircase: &Staircase) -> Vec<usize> {
    let margins = MarginMatrix::from_staircase(staircase);
    let worst = margins.rows().iter()
        .map(|row| row.iter().fold(f64::INFINITY, |low, &value| low.min(value)))
        .collect::<Vec<_>>();

    positions_of_maximum(&worst)
}

/// Tideman's score rule: the sum of the majorities against a candidate; lowest wins.
#[must_use]
pub fn tideman_score(staircase: &Staircase) -> Vec<usize> {
    let size = staircase.nr_alternatives();
    let mut against = vec![0_f64; size];
    for (i, row) in staircase.rows().iter().enumerate() {
        for (j, &margin) in row.iter().enumerate() {
            if margin > 0_f64 {
                against[j + i + 1] += margin;
            } else {
                against[i] -= margin;
            }
        }
    }

    let negated = against.iter().map(|&score| -score).collect::<Vec<_>>();
    positions_of_maximum(&negated)
}

/// Copeland's rule: pairwise wins minus pairwise losses.
#[must_use]
pub fn copeland(staircase: &Staircase) -> Vec<usize> {
    let margins = MarginMatrix::from_staircase(staircase);
    let scores = margins.rows().iter()
        .map(|row| {
            row.iter()
                .map(|&margin| {
                    if margin > 0_f64 {
                        1_f64
                    } else if margin < 0_f64 {
                        -1_f64
                    } else {
                        0_f64
                    }
                })
                .sum()
        })
        .collect::<Vec<_>>();

    positions_of_maximum(&scores)
}

/// Nanson's rule: drop every candidate with a negative Borda score until none is.
///
/// If a round were to drop every remaining candidate, the previous candidate set is
/// kept instead. That branch cannot be hit with antisymmetric margins, whose Borda
/// scores sum to zero and so cannot all be negative; it guards malformed input.
#[must_use]
pub fn nanson(staircase: &Staircase) -> Vec<usize> {
    let margins = MarginMatrix::from_staircase(staircase);
    let mut rows = margins.rows().to_vec();
    let mut alive = (0..margins.size()).collect::<Vec<_>>();

    loop {
        let scores = rows.iter().map(|row| row.iter().sum::<f64>()).collect::<Vec<_>>();
        let dropped = (0..alive.len())
            .filter(|&position| scores[position] < 0_f64)
            .collect::<Vec<_>>();
        if dropped.is_empty() || dropped.len() == alive.len() {
            break;
        }

        remove_indices(&mut rows, &dropped);
        for row in &mut rows {
            remove_indices(row, &dropped);
        }
        remove_indices(&mut alive, &dropped);
    }

    alive
}

/// Baldwin's rule: repeatedly eliminate the lowest Borda score until the rest tie.
#[must_use]
pub fn baldwin(staircase: &Staircase) -> Vec<usize> {
    let margins = MarginMatrix::from_staircase(staircase);
    let mut rows = margins.rows().to_vec();
    let mut alive = (0..margins.size()).collect::<Vec<_>>();

    while alive.len() > 1 {
        let scores = rows.iter().map(|row| row.iter().sum::<f64>()).collect::<Vec<_>>();
        let lowest = scores.iter().fold(f64::INFINITY, |low, &score| low.min(score));
        let dropped = (0..alive.len())
            .filter(|&position| scores[position] == lowest)
            .collect::<Vec<_>>();
        if dropped.len() == alive.len() {
            break;
        }

        remove_indices(&mut rows, &dropped);
        for row in &mut rows {
            remove_indices(row, &dropped);
        }
        remove_indices(&mut alive, &dropped);
    }

    alive
}

/// The uncovered set: alternatives not covered by anyone.
///
/// `x` covers `y` when `x` beats `y` and also beats everything `y` beats.
#[must_use]
pub fn uncovered_set(staircase: &Staircase) -> Vec<usize> {
    let margins = MarginMatrix::from_staircase(staircase);
    let size = margins.size();
    let beats = |x: usize, y: usize| margins.at(x, y) > 0_f64;

    (0..size)
        .filter(|&y| {
            !(0..size).any(|x| {
                beats(x, y) && (0..size).all(|z| !beats(y, z) || beats(x, z))
            })
        })
        .collect()
}

/// The Pareto-undominated alternatives: nobody is unanimously preferred to them.
#[must_use]
pub fn pareto(profile: &Profile) -> Vec<usize> {
    let size = profile.nr_alternatives();
    let total = profile.total_voters();

    (0..size)
        .filter(|&y| !(0..size).any(|x| x != y && profile.prefer_count(x, y) == total))
        .collect()
}

/// The plurality winners: most first places.
#[must_use]
pub fn plurality(profile: &Profile) -> Vec<usize> {
    positions_of_maximum_count(&profile.first_place_counts())
}

/// The anti-plurality winners: fewest last places.
#[must_use]
pub fn anti_plurality(profile: &Profile) -> Vec<usize> {
    let negated = profile.last_place_counts().iter()
        .map(|&count| -(count as i128))
        .collect::<Vec<_>>();
    let highest = negated.iter().copied().fold(i128::MIN, i128::max);

    negated.iter().enumerate()
        .filter(|&(_, &score)| score == highest)
        .map(|(i, _)| i)
        .collect()
}

/// Plurality with runoff: the two strongest by first places meet pairwise.
///
/// Ties for the two runoff spots are broken towards the smaller index; a tied runoff
/// reports both finalists.
#[must_use]
pub fn plurality_with_runoff(profile: &Profile) -> Vec<usize> {
    let size = profile.nr_alternatives();
    if size < 2 {
        return (0..size).collect();
    }

    let counts = profile.first_place_counts();
    let mut order = (0..size).collect::<Vec<_>>();
    order.sort_by(|&a, &b| counts[b].cmp(&counts[a]).then(a.cmp(&b)));
    let (first, second) = (order[0], order[1]);

    let for_first = profile.prefer_count(first, second);
    let for_second = profile.prefer_count(second, first);
    if for_first > for_second {
        vec![first]
    } else if for_second > for_first {
        vec![second]
    } else {
        let mut both = vec![first, second];
        both.sort_unstable();
        both
    }
}

/// Instant runoff: eliminate the weakest first-place candidates until a majority.
///
/// Every candidate tied for the lowest count is eliminated at once; if that would
/// eliminate everyone, the remaining candidates are the winners.
#[must_use]
pub fn instant_runoff(profile: &Profile) -> Vec<usize> {
    let size = profile.nr_alternatives();
    let total = profile.total_voters();
    let mut alive = vec![true; size];

    loop {
        let standing = alive.iter().filter(|&&flag| flag).count();
        if standing <= 1 {
            break;
        }

        let counts = profile.first_place_counts_among(&alive);
        if let Some(majority) = (0..size).find(|&i| alive[i] && 2 * counts[i] > total) {
            return vec![majority];
        }

        let lowest = (0..size)
            .filter(|&i| alive[i])
            .map(|i| counts[i])
            .min()
            .expect("at least two candidates are standing");
        let dropped = (0..size)
            .filter(|&i| alive[i] && counts[i] == lowest)
            .collect::<Vec<_>>();
        if dropped.len() == standing {
            break;
        }
        for i in dropped {
            alive[i] = false;
        }
    }

    (0..size).filter(|&i| alive[i]).collect()
}

/// Random dictatorship: a uniformly random voter's favorite wins.
///
/// The lottery weights every alternative by its share of first places; the exact
/// values are the unreduced `first places / total voters` fractions.
#[must_use]
pub fn random_dictatorship(profile: &Profile) -> (Vec<f64>, ExactLottery) {
    let counts = profile.first_place_counts();
    let total = profile.total_voters();

    let lottery = counts.iter().map(|&count| count as f64 / total as f64).collect();
    (lottery, exact_from_scores(&counts, total))
}

/// Proportional Borda: probability proportional to Borda points from positions.
///
/// A ballot awards `n - position` points; the lottery divides by the grand total.
#[must_use]
pub fn proportional_borda(profile: &Profile) -> (Vec<f64>, ExactLottery) {
    let size = profile.nr_alternatives();
    let mut points = vec![0_u64; size];
    let mut total = 0_u64;
    for ballot in profile.ballots() {
        for (position, &alternative) in ballot.order().iter().enumerate() {
            let awarded = ballot.voters() * (size - position) as u64;
            points[alternative] += awarded;
            total += awarded;
        }
    }

    let lottery = points.iter().map(|&score| score as f64 / total as f64).collect();
    (lottery, exact_from_scores(&points, total))
}

/// All positions attaining the maximum score.
fn positions_of_maximum(scores: &[f64]) -> Vec<usize> {
    let highest = scores.iter().fold(f64::NEG_INFINITY, |high, &score| high.max(score));

    scores.iter().enumerate()
        .filter(|&(_, &score)| score == highest)
        .map(|(i, _)| i)
        .collect()
}

fn positions_of_maximum_count(counts: &[u64]) -> Vec<usize> {
    let highest = counts.iter().copied().max().unwrap_or(0);

    counts.iter().enumerate()
        .filter(|&(_, &count)| count == highest)
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod test {
    use relp_num::R64;

    use crate::algorithm::scores::{
        anti_plurality, baldwin, black, borda, condorcet_winner, copeland, instant_runoff,
        minimax, nanson, pareto, plurality, plurality_with_runoff, proportional_borda,
        random_dictatorship, tideman_score, uncovered_set,
    };
    use crate::data::margin::Staircase;
    use crate::data::profile::{Ballot, Profile};

    /// 0 beats 1 by 2 and 2 by 4; 1 beats 2 by 2.
    fn transitive() -> Staircase {
        Staircase::new(vec![vec![2_f64, 4_f64], vec![2_f64]])
    }

    /// The rock-paper-scissors cycle with one voter margins.
    fn cycle() -> Staircase {
        Staircase::new(vec![vec![1_f64, -1_f64], vec![1_f64]])
    }

    #[test]
    fn borda_rewards_large_margins() {
        assert_eq!(borda(&transitive()), vec![0]);
        assert_eq!(borda(&cycle()), vec![0, 1, 2]);
    }

    #[test]
    fn condorcet_winner_needs_every_pairwise_win() {
        assert_eq!(condorcet_winner(&transitive()), Some(0));
        assert_eq!(condorcet_winner(&cycle()), None);
    }

    #[test]
    fn black_falls_back_to_borda() {
        assert_eq!(black(&transitive()), vec![0]);
        assert_eq!(black(&cycle()), vec![0, 1, 2]);
    }

    #[test]
    fn minimax_prefers_the_mildest_defeat() {
        // Row minima are -3, -3 and 0: alternative 2 never loses.
        let staircase = Staircase::new(vec![vec![3_f64, -3_f64], vec![-2_f64]]);

        assert_eq!(minimax(&staircase), vec![2]);
    }

    #[test]
    fn tideman_score_counts_majorities_against() {
        // Defeats against: 0 none, 1 a margin of 2, 2 margins of 4 and 2.
        assert_eq!(tideman_score(&transitive()), vec![0]);
    }

    #[test]
    fn copeland_counts_wins() {
        assert_eq!(copeland(&transitive()), vec![0]);
        assert_eq!(copeland(&cycle()), vec![0, 1, 2]);
    }

    #[test]
    fn nanson_eliminates_negative_borda() {
        // Borda scores 6, 0, -6: alternative 2 is dropped, then 1, leaving 0.
        assert_eq!(nanson(&transitive()), vec![0]);
        assert_eq!(nanson(&cycle()), vec![0, 1, 2]);
    }

    #[test]
    fn baldwin_eliminates_the_lowest() {
        assert_eq!(baldwin(&transitive()), vec![0]);
        assert_eq!(baldwin(&cycle()), vec![0, 1, 2]);
    }

    #[test]
    fn uncovered_set_excludes_covered_alternatives() {
        assert_eq!(uncovered_set(&transitive()), vec![0]);
        assert_eq!(uncovered_set(&cycle()), vec![0, 1, 2]);
    }

    fn example_profile() -> Profile {
        Profile::new(vec![
            Ballot::new(vec![0, 1, 2], 4),
            Ballot::new(vec![1, 2, 0], 3),
            Ballot::new(vec![2, 1, 0], 2),
        ])
    }

    #[test]
    fn plurality_counts_first_places() {
        assert_eq!(plurality(&example_profile()), vec![0]);
    }

    #[test]
    fn anti_plurality_counts_last_places() {
        // Last places: 0 five times, 2 four times, 1 never.
        assert_eq!(anti_plurality(&example_profile()), vec![1]);
    }

    #[test]
    fn runoff_picks_the_pairwise_winner_of_the_top_two() {
        // 0 and 1 reach the runoff; 1 beats 0 five votes to four.
        assert_eq!(plurality_with_runoff(&example_profile()), vec![1]);
    }

    #[test]
    fn instant_runoff_transfers_votes() {
        // 2 is eliminated first; its votes transfer to 1, which then has a majority.
        assert_eq!(instant_runoff(&example_profile()), vec![1]);
    }

    #[test]
    fn pareto_requires_unanimity() {
        // Everyone prefers 1 over 2 in this profile.
        let profile = Profile::new(vec![
            Ballot::new(vec![0, 1, 2], 1),
            Ballot::new(vec![1, 2, 0], 1),
        ]);

        assert_eq!(pareto(&profile), vec![0, 1]);
    }

    #[test]
    fn random_dictatorship_is_proportional() {
        let (lottery, exact) = random_dictatorship(&example_profile());

        assert_eq!(lottery, vec![4_f64 / 9_f64, 3_f64 / 9_f64, 2_f64 / 9_f64]);
        assert_eq!(exact, vec![R64!(4, 9), R64!(3, 9), R64!(2, 9)]);
    }

    #[test]
    fn proportional_borda_awards_position_points() {
        // Points: 0: 4*3 + 3*1 + 2*1 = 17, 1: 4*2 + 3*3 + 2*2 = 21, 2: 4*1 + 3*2 + 2*3 = 16.
        let (lottery, exact) = proportional_borda(&example_profile());

        assert_eq!(exact, vec![R64!(17, 54), R64!(21, 54), R64!(16, 54)]);
        assert!((lottery.iter().sum::<f64>() - 1_f64).abs() < 1e-9);
    }
}
