//! Empirical Nspt correlations.
//!
//! Correlations are implemented as small, pure scalar functions grouped into two
//! fixed formula sets so that aggregation code can stay generic.

pub mod correlation;

pub use correlation::*;
