//! Output helpers.
//!
//! - per-formula estimates and sweep tables as CSV (`export`)
//! - the full run as JSON (`json`)

pub mod export;
pub mod json;

pub use export::*;
pub use json::*;
