//! # Pairwise majority margins
//!
//! The input of almost every rule in this crate is a *staircase*: the strictly upper
//! triangular part of the pairwise majority margin matrix, stored as ragged rows. The full
//! matrix is antisymmetric with a zero diagonal, so the staircase determines it completely.
use std::fmt;

/// Compact, strictly upper triangular representation of pairwise majority margins.
///
/// Row `i` holds the margins of alternative `i` against alternatives `i + 1, ..., n - 1`,
/// in that order, so row `i` has `n - 1 - i` entries. A positive entry means the row
/// alternative beats the column alternative by that many voters.
///
/// The shape is a precondition: it is checked by `debug_assert!` only, a malformed
/// staircase produces garbage rather than an error.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Staircase {
    rows: Vec<Vec<f64>>,
}

impl Staircase {
    /// Wrap ragged margin rows.
    ///
    /// # Arguments
    ///
    /// * `rows`: Row `i` should have `rows.len() - i` entries.
    #[must_use]
    pub fn new(rows: Vec<Vec<f64>>) -> Self {
        let nr_rows = rows.len();
        debug_assert!(rows.iter().enumerate().all(|(i, row)| row.len() == nr_rows - i));

        Self { rows }
    }

    /// The number of alternatives this staircase relates.
    #[must_use]
    pub fn nr_alternatives(&self) -> usize {
        self.rows.len() + 1
    }

    /// Margin of alternative `i` over alternative `j`, requiring `i < j`.
    #[must_use]
    pub fn upper(&self, i: usize, j: usize) -> f64 {
        debug_assert!(i < j && j < self.nr_alternatives());

        self.rows[i][j - i - 1]
    }

    /// The ragged rows backing this staircase.
    #[must_use]
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Apply a function to every margin, such as the signed exponent rescaling.
    #[must_use]
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            rows: self.rows.iter()
                .map(|row| row.iter().map(|&value| f(value)).collect())
                .collect(),
        }
    }

    /// Splice one alternative out of the staircase (both its row and its column).
    ///
    /// Used by iterated rules that rank by repeatedly removing a winner.
    pub fn remove_alternative(&mut self, index: usize) {
        debug_assert!(index < self.nr_alternatives());

        for i in 0..index {
            self.rows[i].remove(index - i - 1);
        }
        if index < self.rows.len() {
            self.rows.remove(index);
        } else {
            // The last alternative has no row of its own; only columns were removed.
            self.rows.pop();
        }
    }
}

impl fmt::Display for Staircase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{:?}", row)?;
        }
        Ok(())
    }
}

/// Full antisymmetric majority margin matrix.
///
/// `M[i][j] = -M[j][i]` and the diagonal is zero.
#[derive(Clone, Debug, PartialEq)]
pub struct MarginMatrix {
    values: Vec<Vec<f64>>,
}

impl MarginMatrix {
    /// Expand a staircase into the full matrix.
    #[must_use]
    pub fn from_staircase(staircase: &Staircase) -> Self {
        let size = staircase.nr_alternatives();

        let values = (0..size)
            .map(|i| {
                (0..size)
                    .map(|j| {
                        match i.cmp(&j) {
                            std::cmp::Ordering::Less => staircase.upper(i, j),
                            std::cmp::Ordering::Greater => -staircase.upper(j, i),
                            std::cmp::Ordering::Equal => 0_f64,
                        }
                    })
                    .collect()
            })
            .collect();

        Self { values }
    }

    /// The number of alternatives.
    #[must_use]
    pub fn size(&self) -> usize {
        self.values.len()
    }

    /// Margin of alternative `i` over alternative `j`.
    #[must_use]
    pub fn at(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }

    /// One full row of margins.
    #[must_use]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i]
    }

    /// All rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.values
    }
}

/// Rescaling `f(x, e) = sign(x) * |x|^e` used by the homogeneous maximal lottery.
///
/// Exponent `0` maps every margin onto its sign, exponent `1` is the identity. Zero maps
/// to zero for every exponent; note that `f64::signum` alone would get this wrong, it
/// considers zero positive.
#[must_use]
pub fn signed_exponent(value: f64, exponent: f64) -> f64 {
    if value == 0_f64 {
        return 0_f64;
    }

    value.signum() * value.abs().powf(exponent)
}
