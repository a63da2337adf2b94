//! Reporting utilities: formatted terminal output for estimates, sweeps and the
//! formula catalog.

pub mod format;

pub use format::*;
