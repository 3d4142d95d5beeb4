//! # The maximal-lottery polytope
//!
//! Computes the corners of the polytope of maximal lotteries by enumerating
//! combinations of tight constraints: every inequality row of the program either keeps
//! its original bound or is forced to equality, the program is re-solved per
//! combination, and solutions whose tight set turns out to be extendable are discarded
//! as interior points of a face. Infeasible combinations prune all their supersets
//! through the [`FeasibilityCounter`].
use std::collections::HashMap;

use crate::algorithm::{Deadline, SearchLimits};
use crate::algorithm::polytope::counter::FeasibilityCounter;
use crate::algorithm::solver::{LinearSolver, OptimizationResult};
use crate::data::answer::{Answer, RuleError};
use crate::data::linear_program::{Bound, LinearProgram, RowGroup};
use crate::data::lottery::{descending_lexicographic, support, winner_lotteries};
use crate::data::margin::{MarginMatrix, signed_exponent, Staircase};

pub mod build;
pub mod counter;

/// The outcome of a vertex enumeration.
///
/// A timeout is a distinct variant rather than a flag next to an empty result, so
/// concurrent calls and callers distinguishing "no answer" from "gave up" stay
/// unambiguous.
#[derive(Clone, Debug, PartialEq)]
pub enum VertexEnumeration {
    /// All corners of the feasible region, sorted descending-lexicographically.
    Vertices(Vec<Vec<f64>>),
    /// The unmodified program already has no solution.
    Infeasible,
    /// The wall-clock budget ran out; partial results are discarded, not returned.
    TimedOut,
}

/// One tightenable row and its original inequality bound.
#[derive(Clone, Copy, Debug)]
struct IndexedBound {
    row: usize,
    original: Bound<f64>,
}

/// Enumerate the corners of the program's feasible region.
///
/// The returned vectors are the first `size` variable values of each surviving
/// solution: the lotteries. Distinct tight sets yielding identical solutions are
/// deduplicated.
pub fn enumerate_vertices<S: LinearSolver<f64>>(
    program: &mut LinearProgram<f64>,
    size: usize,
    solver: &S,
    limits: &SearchLimits,
) -> VertexEnumeration {
    // Equality rows cannot be tightened further; everything else is a corner candidate.
    let index = program.constraints().iter().enumerate()
        .filter(|(_, constraint)| !constraint.bound().is_equality())
        .map(|(row, constraint)| IndexedBound { row, original: *constraint.bound() })
        .collect::<Vec<_>>();
    debug_assert!(
        index.iter().map(|indexed| indexed.row).eq(
            program.group_rows(RowGroup::Nonnegativity)
                .chain(program.group_rows(RowGroup::Payoff))
        ),
        "tightenable rows should be exactly the nonnegativity and payoff groups",
    );

    let base_lottery = match solver.solve(program) {
        OptimizationResult::FiniteOptimum(solution) => solution.values()[..size].to_vec(),
        OptimizationResult::Infeasible => return VertexEnumeration::Infeasible,
        OptimizationResult::Unbounded => {
            log::warn!("maximal-lottery program reported unbounded");
            return VertexEnumeration::Infeasible;
        },
    };

    let deadline = Deadline::after(limits.polytope_budget);
    let mut counter = FeasibilityCounter::new(index.len());
    // State key (the set of tight rows) to the solution found under it.
    let mut vertices = HashMap::new();
    vertices.insert(0_u64, base_lottery);

    let mut solves = 0_usize;
    while counter.has_next() {
        if deadline.passed() {
            log::debug!("vertex enumeration timed out after {} solves", solves);
            return VertexEnumeration::TimedOut;
        }

        let state = counter.next();
        for (indexed, &tight) in index.iter().zip(&state) {
            let bound = if tight { indexed.original.tightened() } else { indexed.original };
            program.set_bound(indexed.row, bound);
        }

        solves += 1;
        match solver.solve(program) {
            OptimizationResult::FiniteOptimum(solution) => {
                let key = counter.previous_state();
                // Entries whose tight set is contained in this one are not corners.
                vertices.retain(|&old, _| old & key != old);
                vertices.insert(key, solution.values()[..size].to_vec());
            },
            OptimizationResult::Infeasible => counter.mark_infeasible(),
            OptimizationResult::Unbounded => {
                // Cannot happen for programs built by this crate; skip without
                // recording, since supersets of this state need not be infeasible.
                log::warn!("tightened program reported unbounded");
            },
        }
    }
    log::debug!("vertex enumeration finished after {} solves, {} corners", solves, vertices.len());

    let mut lotteries = vertices.into_values().collect::<Vec<_>>();
    lotteries.sort_by(|a, b| descending_lexicographic(a, b));
    lotteries.dedup();

    VertexEnumeration::Vertices(lotteries)
}

/// The maximal-lottery polytope of a staircase.
pub fn maximal_lottery<S: LinearSolver<f64>>(
    staircase: &Staircase,
    solver: &S,
    limits: &SearchLimits,
) -> Result<Answer, RuleError> {
    let margins = MarginMatrix::from_staircase(staircase);
    let mut program = build::max_lottery_program(&margins);

    match enumerate_vertices(&mut program, margins.size(), solver, limits) {
        VertexEnumeration::Vertices(lotteries) => {
            debug_assert!(lotteries.iter().all(|lottery| crate::data::lottery::is_valid_lottery(lottery)));
            Ok(Answer::Lotteries { lotteries, exact: None })
        },
        VertexEnumeration::Infeasible => Err(RuleError::Infeasible),
        VertexEnumeration::TimedOut => Err(RuleError::Timeout),
    }
}

/// The maximal lottery after rescaling every margin by `sign(m) * |m|^exponent`.
///
/// Exponent `1` leaves the margins as they are (the C2 maximal lottery), exponent `0`
/// reduces them to their signs (the C1 variant).
pub fn homogeneous_maximal_lottery<S: LinearSolver<f64>>(
    staircase: &Staircase,
    exponent: f64,
    solver: &S,
    limits: &SearchLimits,
) -> Result<Answer, RuleError> {
    let rescaled = staircase.map(|margin| signed_exponent(margin, exponent));
    maximal_lottery(&rescaled, solver, limits)
}

/// All candidates in the support of some maximal lottery, as winner lotteries.
pub fn essential_set<S: LinearSolver<f64>>(
    staircase: &Staircase,
    solver: &S,
    limits: &SearchLimits,
) -> Result<Answer, RuleError> {
    let answer = maximal_lottery(staircase, solver, limits)?;
    Ok(support_winners(staircase.nr_alternatives(), &answer))
}

/// The essential set of the sign margins: support of the C1 maximal lotteries.
pub fn bipartisan_set<S: LinearSolver<f64>>(
    staircase: &Staircase,
    solver: &S,
    limits: &SearchLimits,
) -> Result<Answer, RuleError> {
    let signs = staircase.map(|margin| signed_exponent(margin, 0_f64));
    let answer = maximal_lottery(&signs, solver, limits)?;
    Ok(support_winners(staircase.nr_alternatives(), &answer))
}

fn support_winners(size: usize, answer: &Answer) -> Answer {
    let lotteries = match answer {
        Answer::Lotteries { lotteries, .. } => lotteries,
        Answer::Ranking(_) => unreachable!("maximal lotteries always answer with lotteries"),
    };

    Answer::Lotteries {
        lotteries: winner_lotteries(&support(lotteries), size),
        exact: None,
    }
}
