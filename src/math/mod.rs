//! Mathematical utilities: aggregation of per-formula estimates.

pub mod mean;

pub use mean::*;
