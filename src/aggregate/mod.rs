//! Aggregation of correlation estimates.
//!
//! Responsibilities:
//!
//! - evaluate every formula of a set at one blow count (`evaluate`)
//! - evaluate every formula of a set over a sequence of blow counts (`sweep`)
//! - average across formulas, never skipping a member
//!
//! Both paths call the same scalar formulas and the same `mean_of`, so a sweep
//! value at a given Nspt is bit-identical to the point estimate at that Nspt.

pub mod evaluate;
pub mod sweep;

pub use evaluate::*;
pub use sweep::*;
