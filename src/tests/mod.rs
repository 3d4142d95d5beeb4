//! # Integration tests that require a look inside the crate.
//!
//! End-to-end scenarios through the rule dispatch, exercising the polytope machinery,
//! the aggregators and the answer contract together.
pub mod scenarios;
