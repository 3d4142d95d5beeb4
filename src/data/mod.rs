//! # Problem representations
//!
//! This module provides the data structures shared by the algorithms: pairwise majority
//! margins, the linear program built from them, lotteries, preference profiles and the
//! uniform answer contract. Algorithms may introduce their specific data structures in
//! `algorithm::my_algorithm`.

pub mod answer;
pub mod linear_program;
pub mod lottery;
pub mod margin;
pub mod profile;
