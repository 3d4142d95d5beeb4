//! # Solving linear programs
//!
//! The engine never solves linear programs itself; it asks a [`LinearSolver`], a
//! capability that can be backed by anything honoring the contract. The crate ships a
//! small dense two-phase simplex as the default implementation so the polytope machinery
//! is usable without an external solver.
use crate::data::linear_program::{LinearProgram, Solution};

pub mod simplex;

pub use simplex::Simplex;

/// The linear-program solving capability.
///
/// By convention, every variable of the program is constrained nonnegative; the rows
/// only carry the additional structure. Implementations must be deterministic: the
/// vertex enumerator relies on identical programs producing identical solutions.
pub trait LinearSolver<F> {
    /// Solve the program.
    ///
    /// # Return value
    ///
    /// Whether the program is feasible, and if so, an optimal solution if it is bounded.
    fn solve(&self, program: &LinearProgram<F>) -> OptimizationResult<F>;
}

/// A linear program is either infeasible, unbounded or has a finite optimum.
#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq)]
pub enum OptimizationResult<F> {
    Infeasible,
    FiniteOptimum(Solution<F>),
    Unbounded,
}
