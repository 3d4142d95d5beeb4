//! Margin scenarios with known outcomes, evaluated through the rule dispatch.
use crate::algorithm::SearchLimits;
use crate::algorithm::solver::Simplex;
use crate::data::answer::Answer;
use crate::data::lottery::is_valid_lottery;
use crate::data::margin::Staircase;
use crate::data::profile::{Ballot, Profile};
use crate::rules::{evaluate, Query, Rule};

fn lotteries(rule: Rule, staircase: Staircase) -> Vec<Vec<f64>> {
    let query = Query::margins(staircase);
    match evaluate(rule, &query, &Simplex, &SearchLimits::default()) {
        Ok(Answer::Lotteries { lotteries, .. }) => lotteries,
        other => panic!("expected lotteries from {:?}, got {:?}", rule, other),
    }
}

fn ranking(rule: Rule, staircase: Staircase) -> Vec<usize> {
    let query = Query::margins(staircase);
    match evaluate(rule, &query, &Simplex, &SearchLimits::default()) {
        Ok(Answer::Ranking(ranking)) => ranking,
        other => panic!("expected a ranking from {:?}, got {:?}", rule, other),
    }
}

#[test]
fn cyclic_three_way_race_mixes_uniformly() {
    // A > B > C > A, each by one voter: the unique maximal lottery is uniform.
    let result = lotteries(
        Rule::MaximalLottery,
        Staircase::new(vec![vec![1_f64, -1_f64], vec![1_f64]]),
    );

    assert_eq!(result.len(), 1);
    assert!(is_valid_lottery(&result[0]));
    for probability in &result[0] {
        assert!((probability - 1_f64 / 3_f64).abs() < 1e-6);
    }
}

#[test]
fn two_candidates_with_a_clear_majority() {
    let result = lotteries(Rule::MaximalLottery, Staircase::new(vec![vec![5_f64]]));

    assert_eq!(result.len(), 1);
    assert!((result[0][0] - 1_f64).abs() < 1e-6);
    assert!(result[0][1].abs() < 1e-6);
}

#[test]
fn condorcet_winner_takes_ranked_pairs() {
    // A beats both B and C with positive margins, no cycle.
    let result = lotteries(
        Rule::RankedPairsWinner,
        Staircase::new(vec![vec![2_f64, 4_f64], vec![2_f64]]),
    );

    assert_eq!(result, vec![vec![1_f64, 0_f64, 0_f64]]);
}

#[test]
fn complete_tie_spreads_support_over_everyone() {
    let tie = Staircase::new(vec![vec![0_f64, 0_f64], vec![0_f64]]);

    // The polytope is the full simplex; its corners are the pure lotteries, and the
    // essential and bipartisan sets therefore contain every candidate.
    let corners = lotteries(Rule::MaximalLottery, tie.clone());
    assert_eq!(corners.len(), 3);
    assert!(corners.iter().all(|lottery| is_valid_lottery(lottery)));

    for rule in [Rule::EssentialSet, Rule::BipartisanSet] {
        let support = lotteries(rule, tie.clone());
        assert_eq!(support.len(), 3, "{:?} should keep all candidates", rule);
    }
}

#[test]
fn kemeny_recovers_a_unique_strict_order() {
    // Margins all agree with the order 2 > 0 > 3 > 1.
    let result = ranking(
        Rule::Kemeny,
        Staircase::new(vec![
            vec![3_f64, -2_f64, 1_f64],
            vec![-4_f64, -1_f64],
            vec![5_f64],
        ]),
    );

    assert_eq!(result, vec![2, 0, 3, 1]);
}

#[test]
fn ranking_rules_agree_on_transitive_margins() {
    let staircase = Staircase::new(vec![vec![2_f64, 4_f64, 2_f64], vec![2_f64, 2_f64], vec![4_f64]]);

    assert_eq!(ranking(Rule::Kemeny, staircase.clone()), vec![0, 1, 2, 3]);
    assert_eq!(ranking(Rule::Schulze, staircase.clone()), vec![0, 1, 2, 3]);
    assert_eq!(ranking(Rule::RankedPairsRanking, staircase), vec![0, 1, 2, 3]);
}

#[test]
fn homogeneous_lottery_with_exponent_zero_levels_the_cycle() {
    // An uneven cycle flattens to rock-paper-scissors under the sign mapping.
    let mut query = Query::margins(Staircase::new(vec![vec![3_f64, -1_f64], vec![5_f64]]));
    query.exponent = Some(0_f64);

    match evaluate(Rule::HomogeneousMaximalLottery, &query, &Simplex, &SearchLimits::default()) {
        Ok(Answer::Lotteries { lotteries, .. }) => {
            assert_eq!(lotteries.len(), 1);
            for probability in &lotteries[0] {
                assert!((probability - 1_f64 / 3_f64).abs() < 1e-6);
            }
        },
        other => panic!("expected lotteries, got {:?}", other),
    }
}

#[test]
fn split_cycle_forgives_the_weakest_defeat() {
    let result = lotteries(
        Rule::SplitCycle,
        Staircase::new(vec![vec![3_f64, -1_f64], vec![5_f64]]),
    );

    assert_eq!(result, vec![vec![1_f64, 0_f64, 0_f64]]);
}

#[test]
fn repeated_evaluation_is_deterministic() {
    let staircase = Staircase::new(vec![vec![0_f64, 1_f64], vec![-1_f64]]);

    let first = lotteries(Rule::MaximalLottery, staircase.clone());
    let second = lotteries(Rule::MaximalLottery, staircase);
    assert_eq!(first, second);
}

#[test]
fn profile_and_margin_rules_share_the_answer_shape() {
    let profile = Profile::new(vec![
        Ballot::new(vec![0, 1, 2], 4),
        Ballot::new(vec![1, 2, 0], 3),
        Ballot::new(vec![2, 1, 0], 2),
    ]);
    // The margins implied by the profile above.
    let staircase = Staircase::new(vec![vec![-1_f64, -1_f64], vec![5_f64]]);
    let query = Query::with_profile(staircase, profile);

    let plurality = evaluate(Rule::Plurality, &query, &Simplex, &SearchLimits::default()).unwrap();
    assert_eq!(plurality, Answer::winners(&[0], 3));

    match evaluate(Rule::RandomDictatorship, &query, &Simplex, &SearchLimits::default()).unwrap() {
        Answer::Lotteries { lotteries, exact } => {
            assert_eq!(lotteries, vec![vec![4_f64 / 9_f64, 3_f64 / 9_f64, 2_f64 / 9_f64]]);
            assert!(exact.is_some());
        },
        other => panic!("expected lotteries, got {:?}", other),
    }
}
