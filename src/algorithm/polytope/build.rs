//! # Building the maximal-lottery program
//!
//! The maximal-lottery problem is the minimax problem of the symmetric zero-sum game
//! given by the margin matrix: find a mixed strategy over the candidates whose expected
//! payoff against every pure strategy is at least the game value, and maximize that
//! value. Rows carrying no strategic information (all zero, or a positive multiple of
//! an earlier row) are eliminated before the program is built.
use cumsum::cumsum_array_owned;
use enum_map::enum_map;

use crate::data::linear_program::{Bound, Constraint, LinearProgram, Objective, RowGroup};
use crate::data::margin::MarginMatrix;

/// The linear program whose feasible region is the maximal-lottery polytope.
///
/// Variables are one probability per candidate plus the game `value`; rows are built in
/// group order: nonnegativity per candidate, the lottery row, the `value` pin when every
/// margin row was eliminated, and one payoff row per surviving margin row.
#[must_use]
pub fn max_lottery_program(margins: &MarginMatrix) -> LinearProgram<f64> {
    let size = margins.size();
    let rows = reduce_margin_rows(margins);

    let mut variable_names = (0..size)
        .map(|i| format!("x{}", i))
        .collect::<Vec<_>>();
    variable_names.push("value".to_string());
    let value = size;

    let mut constraints = Vec::with_capacity(size + 2 + rows.len());
    for i in 0..size {
        constraints.push(Constraint::new(
            format!("nonnegative_{}", i),
            vec![(i, 1_f64)],
            Bound::Min(0_f64),
        ));
    }
    constraints.push(Constraint::new(
        "lottery",
        (0..size).map(|i| (i, 1_f64)).collect(),
        Bound::Equal(1_f64),
    ));
    if rows.is_empty() {
        constraints.push(Constraint::new("value_pin", vec![(value, 1_f64)], Bound::Equal(0_f64)));
    }
    for (index, row) in rows.iter().enumerate() {
        let mut coefficients = row.iter().enumerate()
            .filter(|&(_, &coefficient)| coefficient != 0_f64)
            .map(|(j, &coefficient)| (j, -coefficient))
            .collect::<Vec<_>>();
        coefficients.push((value, -1_f64));
        constraints.push(Constraint::new(format!("payoff_{}", index), coefficients, Bound::Min(0_f64)));
    }

    let cumulative = cumsum_array_owned([size, 1, usize::from(rows.is_empty()), rows.len()]);
    let row_group_end = enum_map! {
        RowGroup::Nonnegativity => cumulative[0],
        RowGroup::Simplex       => cumulative[1],
        RowGroup::ValuePin      => cumulative[2],
        RowGroup::Payoff        => cumulative[3],
    };

    LinearProgram::new(Objective::Maximize, variable_names, value, constraints, row_group_end)
}

/// Drop margin rows without strategic information: all-zero rows, and rows that are a
/// positive scalar multiple of a row kept before them.
fn reduce_margin_rows(margins: &MarginMatrix) -> Vec<Vec<f64>> {
    let mut rows = margins.rows().iter()
        .filter(|row| !row.iter().all(|&value| value == 0_f64))
        .cloned()
        .collect::<Vec<_>>();

    let mut i = 0;
    while i < rows.len() {
        let mut j = i + 1;
        while j < rows.len() {
            if is_positive_multiple(&rows[i], &rows[j]) {
                rows.remove(j);
            } else {
                j += 1;
            }
        }
        i += 1;
    }

    rows
}

/// Whether `base = factor * candidate` for a single positive rounded `factor`.
///
/// This is a heuristic: the factor is rounded per component and compared exactly, which
/// can misjudge near-equal ratios and in principle discard a vertex-defining row. The
/// enumerator's completeness guarantee is therefore relative to the reduced program.
fn is_positive_multiple(base: &[f64], candidate: &[f64]) -> bool {
    let mut factor = 0_f64;
    for (&a, &b) in base.iter().zip(candidate) {
        if a == 0_f64 && b == 0_f64 {
            continue;
        }
        if a != b && (a == 0_f64 || b == 0_f64) {
            return false;
        }

        let current = (a / b).round();
        if factor == 0_f64 {
            factor = current;
        }
        if current != factor || current <= 0_f64 {
            return false;
        }
    }

    true
}
