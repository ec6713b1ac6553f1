//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - model identifiers (`Mechanism`, `MassOrdering`, `ModelVariant`)
//! - measurement and parameter records (`MassSplittings`, `FittingParameters`, `EvidenceWeight`)
//! - run configuration and export schemas (`BoundsConfig`, `PriorFile`, etc.)

pub mod types;

pub use types::*;
