//! `nspt-strength` library crate.
//!
//! Estimates soil friction angle (φ) and cohesion (c) from the SPT blow count
//! using published empirical correlations.
//!
//! The binary (`nspt`) is a thin wrapper around this library so that:
//!
//! - the correlation/aggregation core is testable without spawning processes
//! - the core stays free of any UI or terminal state
//! - front-ends (CLI, TUI) share one pipeline

pub mod aggregate;
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
pub mod tui;
