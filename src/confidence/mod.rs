//! Confidence bounds on Σmν.
//!
//! A bound at tail probability `p` is the mass `x*` with `ccdf(x*) = p`,
//! located by bracketed root finding over the CCDF.

pub mod solver;

pub use solver::*;
