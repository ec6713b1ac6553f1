//! Neutrino mass prior models.
//!
//! Models are implemented as small, pure functions over read-only constant
//! tables so the CCDF, solver and plotting code can stay generic.

pub mod prior;
pub mod tables;

pub use prior::*;
pub use tables::*;
