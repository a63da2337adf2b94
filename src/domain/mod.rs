//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the parameter kinds being estimated (`ParameterKind`)
//! - per-formula and aggregated estimates (`FormulaEstimate`, `SetEstimate`, `SweepEstimate`)
//! - the Nspt presentation range and run configuration (`EstimateConfig`)

pub mod types;

pub use types::*;
