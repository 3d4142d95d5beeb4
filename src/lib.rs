//! # Social choice from pairwise majority margins
//!
//! Winning candidates, winning lotteries and preference rankings computed from a
//! staircase of pairwise majority margins, under the classic election rules: the
//! maximal-lottery polytope (corners enumerated by systematically tightening
//! constraints of its minimax linear program), ranked pairs with transitive dominance
//! bookkeeping, Kemeny's exhaustive search, Schulze's widest paths, split cycle, and
//! the score and plurality families.
//!
//! Linear programs are solved through a pluggable capability; the built-in dense
//! two-phase simplex covers the maximal-lottery programs without external tooling.
#![warn(missing_docs)]

pub mod algorithm;
pub mod data;
pub mod rules;

#[cfg(test)]
mod tests;
