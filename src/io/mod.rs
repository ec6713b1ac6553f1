//! Input/output helpers.
//!
//! - density grid and sample exports (CSV) (`export`)
//! - prior JSON read/write (`prior`)

pub mod export;
pub mod prior;

pub use export::*;
pub use prior::*;
