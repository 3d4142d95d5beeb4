//! # Dense two-phase primal simplex
//!
//! The default [`LinearSolver`]: a textbook primal simplex on a dense tableau, phase one
//! over artificial variables to find a basic feasible solution, phase two to optimality.
//! Bland's rule (smallest eligible index enters, smallest basic index leaves among the
//! minimal ratios) guarantees termination on the heavily degenerate programs the vertex
//! enumerator produces.
//!
//! The maximal-lottery programs are tiny (a handful of variables, a couple dozen rows),
//! so the tableau is dense and reduced costs are recomputed per iteration rather than
//! maintained.
use num_traits::Float;

use crate::algorithm::solver::{LinearSolver, OptimizationResult};
use crate::data::linear_program::{Bound, LinearProgram, Objective, Solution};

/// The built-in solving capability.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Simplex;

impl<F: Float> LinearSolver<F> for Simplex {
    fn solve(&self, program: &LinearProgram<F>) -> OptimizationResult<F> {
        Tableau::build(program).solve(program.objective(), program.objective_variable())
    }
}

/// In which direction a normalized row constrains its value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Sense {
    Less,
    Greater,
    Equal,
}

/// The outcome of running one phase to completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PhaseOutcome {
    Optimal,
    Unbounded,
}

/// Dense simplex tableau with explicit basis bookkeeping.
///
/// Column layout: the program's variables first, then one slack or surplus column per
/// inequality row, then one artificial column per `Greater` or `Equal` row. The final
/// column holds the right-hand side.
#[derive(Debug)]
struct Tableau<F> {
    rows: Vec<Vec<F>>,
    /// Basic column per row.
    basis: Vec<usize>,
    nr_structural: usize,
    /// Start of the artificial columns; also the exclusive upper bound on columns that
    /// may enter the basis.
    artificial_start: usize,
    /// Total number of columns, excluding the right-hand side.
    nr_columns: usize,
    tolerance: F,
}

impl<F: Float> Tableau<F> {
    /// Set up the initial tableau with an all-slack-and-artificial basis.
    fn build(program: &LinearProgram<F>) -> Self {
        let nr_structural = program.nr_variables();

        // Normalize to nonnegative right-hand sides; a negated row flips direction.
        let normalized = program.constraints().iter()
            .map(|constraint| {
                let mut coefficients = vec![F::zero(); nr_structural];
                for &(variable, coefficient) in constraint.coefficients() {
                    coefficients[variable] = coefficient;
                }
                let (rhs, sense) = match constraint.bound() {
                    Bound::Max(value) => (*value, Sense::Less),
                    Bound::Min(value) => (*value, Sense::Greater),
                    Bound::Equal(value) => (*value, Sense::Equal),
                };
                if rhs < F::zero() {
                    for coefficient in &mut coefficients {
                        *coefficient = -*coefficient;
                    }
                    let sense = match sense {
                        Sense::Less => Sense::Greater,
                        Sense::Greater => Sense::Less,
                        Sense::Equal => Sense::Equal,
                    };
                    (coefficients, -rhs, sense)
                } else {
                    (coefficients, rhs, sense)
                }
            })
            .collect::<Vec<_>>();

        let nr_slacks = normalized.iter().filter(|(_, _, sense)| *sense != Sense::Equal).count();
        let nr_artificials = normalized.iter().filter(|(_, _, sense)| *sense != Sense::Less).count();
        let artificial_start = nr_structural + nr_slacks;
        let nr_columns = artificial_start + nr_artificials;

        let mut rows = Vec::with_capacity(normalized.len());
        let mut basis = Vec::with_capacity(normalized.len());
        let mut next_slack = nr_structural;
        let mut next_artificial = artificial_start;
        for (coefficients, rhs, sense) in normalized {
            let mut row = vec![F::zero(); nr_columns + 1];
            row[..nr_structural].copy_from_slice(&coefficients);
            row[nr_columns] = rhs;
            match sense {
                Sense::Less => {
                    row[next_slack] = F::one();
                    basis.push(next_slack);
                    next_slack += 1;
                },
                Sense::Greater => {
                    row[next_slack] = -F::one();
                    next_slack += 1;
                    row[next_artificial] = F::one();
                    basis.push(next_artificial);
                    next_artificial += 1;
                },
                Sense::Equal => {
                    row[next_artificial] = F::one();
                    basis.push(next_artificial);
                    next_artificial += 1;
                },
            }
            rows.push(row);
        }

        Self {
            rows,
            basis,
            nr_structural,
            artificial_start,
            nr_columns,
            tolerance: F::epsilon().sqrt(),
        }
    }

    fn solve(mut self, objective: Objective, objective_variable: usize) -> OptimizationResult<F> {
        if self.nr_columns > self.artificial_start {
            let mut phase_one_cost = vec![F::zero(); self.nr_columns];
            for cost in &mut phase_one_cost[self.artificial_start..] {
                *cost = F::one();
            }
            match self.run_phase(&phase_one_cost) {
                PhaseOutcome::Optimal => {},
                PhaseOutcome::Unbounded => {
                    // The phase-one objective is bounded below by zero; only numerical
                    // trouble can land here.
                    log::warn!("phase one reported unbounded; treating as infeasible");
                    return OptimizationResult::Infeasible;
                },
            }

            let infeasibility = self.objective_value(&phase_one_cost);
            if infeasibility > self.tolerance {
                return OptimizationResult::Infeasible;
            }
            self.drive_out_artificials();
        }

        let mut phase_two_cost = vec![F::zero(); self.nr_columns];
        phase_two_cost[objective_variable] = match objective {
            Objective::Maximize => -F::one(),
            Objective::Minimize => F::one(),
        };
        match self.run_phase(&phase_two_cost) {
            PhaseOutcome::Optimal => {},
            PhaseOutcome::Unbounded => return OptimizationResult::Unbounded,
        }

        let values = self.structural_values();
        OptimizationResult::FiniteOptimum(Solution::new(values[objective_variable], values))
    }

    /// Run the simplex loop for one cost vector until optimal or unbounded.
    fn run_phase(&mut self, cost: &[F]) -> PhaseOutcome {
        loop {
            let Some(column) = self.entering_column(cost) else {
                break PhaseOutcome::Optimal;
            };
            let Some(row) = self.leaving_row(column) else {
                break PhaseOutcome::Unbounded;
            };
            self.pivot(row, column);
        }
    }

    /// Smallest eligible column with negative reduced cost (Bland).
    fn entering_column(&self, cost: &[F]) -> Option<usize> {
        (0..self.artificial_start)
            .filter(|column| !self.basis.contains(column))
            .find(|&column| self.reduced_cost(cost, column) < -self.tolerance)
    }

    fn reduced_cost(&self, cost: &[F], column: usize) -> F {
        let mut value = cost[column];
        for (row, &basic) in self.basis.iter().enumerate() {
            value = value - cost[basic] * self.rows[row][column];
        }

        value
    }

    /// Minimum-ratio row; ties broken towards the smallest basic index (Bland).
    fn leaving_row(&self, column: usize) -> Option<usize> {
        let rhs = self.nr_columns;
        let mut best: Option<(usize, F)> = None;
        for (row, values) in self.rows.iter().enumerate() {
            let coefficient = values[column];
            if coefficient > self.tolerance {
                let ratio = values[rhs] / coefficient;
                best = match best {
                    None => Some((row, ratio)),
                    Some((best_row, best_ratio)) => {
                        if ratio < best_ratio
                            || (ratio == best_ratio && self.basis[row] < self.basis[best_row])
                        {
                            Some((row, ratio))
                        } else {
                            Some((best_row, best_ratio))
                        }
                    },
                };
            }
        }

        best.map(|(row, _)| row)
    }

    fn pivot(&mut self, row: usize, column: usize) {
        let pivot = self.rows[row][column];
        for value in &mut self.rows[row] {
            *value = *value / pivot;
        }
        let pivot_row = self.rows[row].clone();
        for (other, values) in self.rows.iter_mut().enumerate() {
            if other != row {
                let factor = values[column];
                if factor != F::zero() {
                    for (value, &pivot_value) in values.iter_mut().zip(&pivot_row) {
                        *value = *value - factor * pivot_value;
                    }
                }
            }
        }
        self.basis[row] = column;
    }

    /// Pivot remaining basic artificials out at zero level where possible.
    ///
    /// A row whose artificial cannot be driven out has no nonzero entry left in any
    /// enterable column: it reads `0 = 0` and stays inert for the rest of the solve.
    fn drive_out_artificials(&mut self) {
        for row in 0..self.rows.len() {
            if self.basis[row] >= self.artificial_start {
                let replacement = (0..self.artificial_start)
                    .find(|&column| self.rows[row][column].abs() > self.tolerance);
                if let Some(column) = replacement {
                    self.pivot(row, column);
                }
            }
        }
    }

    fn objective_value(&self, cost: &[F]) -> F {
        let rhs = self.nr_columns;
        let mut value = F::zero();
        for (row, &basic) in self.basis.iter().enumerate() {
            value = value + cost[basic] * self.rows[row][rhs];
        }

        value
    }

    /// Values of the program's own variables in the current basic solution.
    fn structural_values(&self) -> Vec<F> {
        let rhs = self.nr_columns;
        let mut values = vec![F::zero(); self.nr_structural];
        for (row, &basic) in self.basis.iter().enumerate() {
            if basic < self.nr_structural {
                values[basic] = self.rows[row][rhs];
            }
        }

        values
    }
}
