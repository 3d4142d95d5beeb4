//! # Linear programs over named variables
//!
//! The maximal-lottery engine phrases the minimax problem as a linear program: one
//! variable per candidate (the mixed strategy), one `value` variable being maximized, and
//! constraint rows that each carry a single bound. Rows are grouped; the group boundaries
//! are used by the vertex enumerator to recognize which rows can be tightened.
use std::ops::Range;

use enum_map::{Enum, EnumMap};

/// Direction of optimization.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Objective {
    Maximize,
    Minimize,
}

/// The single bound a constraint row carries.
///
/// Rows never need more than one bound here, so a sum type replaces the usual
/// `{min?, max?, equal?}` record. The vertex enumerator swaps a `Min` or `Max` for an
/// `Equal` of the same value and back.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Bound<F> {
    /// Lower bound: row value `>=` the bound.
    Min(F),
    /// Upper bound: row value `<=` the bound.
    Max(F),
    /// Equality: row value `==` the bound.
    Equal(F),
}

impl<F: Copy> Bound<F> {
    /// The bound value, regardless of its direction.
    #[must_use]
    pub fn value(&self) -> F {
        match self {
            Bound::Min(value) | Bound::Max(value) | Bound::Equal(value) => *value,
        }
    }

    /// Whether this bound is an equality (and can thus not be tightened further).
    #[must_use]
    pub fn is_equality(&self) -> bool {
        matches!(self, Bound::Equal(_))
    }

    /// This bound forced to an equality at its current value.
    #[must_use]
    pub fn tightened(&self) -> Self {
        Bound::Equal(self.value())
    }
}

/// Which group of the maximal-lottery program a row belongs to.
///
/// Rows are stored in this order; `cumsum` over the group sizes yields the group end
/// offsets kept in the program's `EnumMap`.
#[derive(Enum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowGroup {
    /// One `x_i >= 0` row per candidate. These are the rows the enumerator tightens to
    /// pin a candidate's probability to zero.
    Nonnegativity,
    /// The single `sum x_i = 1` lottery row.
    Simplex,
    /// `value = 0`, only present when every margin row was eliminated as redundant.
    ValuePin,
    /// One `-<M_i, x> - value >= 0` row per surviving margin row.
    Payoff,
}

/// A named constraint row: sparse coefficients and a single bound.
#[derive(Clone, Debug, PartialEq)]
pub struct Constraint<F> {
    name: String,
    coefficients: Vec<(usize, F)>,
    bound: Bound<F>,
}

impl<F> Constraint<F> {
    /// A new row from sparse `(variable, coefficient)` tuples.
    #[must_use]
    pub fn new(name: impl Into<String>, coefficients: Vec<(usize, F)>, bound: Bound<F>) -> Self {
        debug_assert!(coefficients.windows(2).all(|w| w[0].0 < w[1].0));

        Self { name: name.into(), coefficients, bound }
    }

    /// Row name, unique within a program.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sparse `(variable, coefficient)` tuples, sorted by variable.
    #[must_use]
    pub fn coefficients(&self) -> &[(usize, F)] {
        &self.coefficients
    }

    /// The row's current bound.
    #[must_use]
    pub fn bound(&self) -> &Bound<F> {
        &self.bound
    }
}

/// A linear program: named variables, an objective variable, and bounded rows.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearProgram<F> {
    objective: Objective,
    variable_names: Vec<String>,
    /// Index of the variable whose value is optimized (the game value).
    objective_variable: usize,
    constraints: Vec<Constraint<F>>,
    row_group_end: EnumMap<RowGroup, usize>,
}

impl<F> LinearProgram<F> {
    /// Create a new program.
    ///
    /// # Arguments
    ///
    /// * `row_group_end`: cumulative end offset per `RowGroup`, in variant order; the
    /// last offset must equal the number of constraints.
    #[must_use]
    pub fn new(
        objective: Objective,
        variable_names: Vec<String>,
        objective_variable: usize,
        constraints: Vec<Constraint<F>>,
        row_group_end: EnumMap<RowGroup, usize>,
    ) -> Self {
        debug_assert!(objective_variable < variable_names.len());
        debug_assert_eq!(row_group_end[RowGroup::Payoff], constraints.len());

        Self {
            objective,
            variable_names,
            objective_variable,
            constraints,
            row_group_end,
        }
    }

    /// The number of variables, including the objective variable.
    #[must_use]
    pub fn nr_variables(&self) -> usize {
        self.variable_names.len()
    }

    /// The number of constraint rows.
    #[must_use]
    pub fn nr_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Direction of optimization.
    #[must_use]
    pub fn objective(&self) -> Objective {
        self.objective
    }

    /// Index of the variable being optimized.
    #[must_use]
    pub fn objective_variable(&self) -> usize {
        self.objective_variable
    }

    /// All variable names, by index.
    #[must_use]
    pub fn variable_names(&self) -> &[String] {
        &self.variable_names
    }

    /// All rows, in group order.
    #[must_use]
    pub fn constraints(&self) -> &[Constraint<F>] {
        &self.constraints
    }

    /// Replace the bound of row `row`.
    ///
    /// The vertex enumerator calls this both to tighten a row to an equality and to
    /// restore its original inequality, making the modification idempotent across rounds.
    pub fn set_bound(&mut self, row: usize, bound: Bound<F>) {
        self.constraints[row].bound = bound;
    }

    /// The row index range of a group.
    #[must_use]
    pub fn group_rows(&self, group: RowGroup) -> Range<usize> {
        let index = group.into_usize();
        let start = if index == 0 {
            0
        } else {
            self.row_group_end[<RowGroup as Enum>::from_usize(index - 1)]
        };

        start..self.row_group_end[group]
    }
}

/// A feasible solution to a linear program: the objective value and one value per
/// variable, indexed like the program's variable names.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution<F> {
    objective_value: F,
    values: Vec<F>,
}

impl<F: Copy> Solution<F> {
    /// A plain constructor.
    #[must_use]
    pub fn new(objective_value: F, values: Vec<F>) -> Self {
        Self { objective_value, values }
    }

    /// Value of the objective function for this solution.
    #[must_use]
    pub fn objective_value(&self) -> F {
        self.objective_value
    }

    /// Value of a single variable.
    #[must_use]
    pub fn value_of(&self, variable: usize) -> F {
        self.values[variable]
    }

    /// All variable values, by index.
    #[must_use]
    pub fn values(&self) -> &[F] {
        &self.values
    }
}
