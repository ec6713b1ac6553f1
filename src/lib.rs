//! `nu-priors` library crate.
//!
//! The binary (`nuprior`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the prior formula, CCDF and solver are reusable from other tools
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod confidence;
pub mod config;
pub mod dist;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
