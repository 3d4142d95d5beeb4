//! # Algorithms
//!
//! The engines of the crate: the polytope vertex enumerator with its feasibility-pruned
//! counter and linear-program builder, the dominance-graph ranked-pairs machinery, the
//! Kemeny and Schulze aggregators, the elementary-circuit finder, the score rules and
//! the linear-program solving capability they share.
use std::time::Duration;
use std::time::Instant;

pub mod cycles;
pub mod kemeny;
pub mod polytope;
pub mod ranked_pairs;
pub mod schulze;
pub mod scores;
pub mod solver;

/// Wall-clock budgets for the searches that can run away.
///
/// Both searches check the clock cooperatively: between solver invocations or between
/// permutations, never during one, so a single slow step can overrun its budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchLimits {
    /// Budget for the polytope vertex enumeration.
    pub polytope_budget: Duration,
    /// Budget for the exhaustive Kemeny permutation search.
    pub kemeny_budget: Duration,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            polytope_budget: Duration::from_secs(10),
            kemeny_budget: Duration::from_secs(10),
        }
    }
}

/// A point in time after which a search gives up.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Deadline(Instant);

impl Deadline {
    pub(crate) fn after(budget: Duration) -> Self {
        Self(Instant::now() + budget)
    }

    pub(crate) fn passed(&self) -> bool {
        Instant::now() > self.0
    }
}
