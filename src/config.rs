//! Environment-backed defaults for the `nspt` binary.
//!
//! CLI flags always win; these values are only used when a flag is omitted.
//! An optional `.env` file in the working directory is loaded first.

use std::str::FromStr;

use crate::domain::SWEEP_POINTS;
use crate::error::AppError;

pub const ENV_SWEEP_POINTS: &str = "NSPT_SWEEP_POINTS";
pub const ENV_PLOT_WIDTH: &str = "NSPT_PLOT_WIDTH";
pub const ENV_PLOT_HEIGHT: &str = "NSPT_PLOT_HEIGHT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub sweep_points: usize,
    pub plot_width: usize,
    pub plot_height: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sweep_points: SWEEP_POINTS,
            plot_width: 72,
            plot_height: 20,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup (used by `from_env` and tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let defaults = Self::default();
        Ok(Self {
            sweep_points: parse_var(ENV_SWEEP_POINTS, lookup(ENV_SWEEP_POINTS), defaults.sweep_points)?,
            plot_width: parse_var(ENV_PLOT_WIDTH, lookup(ENV_PLOT_WIDTH), defaults.plot_width)?,
            plot_height: parse_var(ENV_PLOT_HEIGHT, lookup(ENV_PLOT_HEIGHT), defaults.plot_height)?,
        })
    }
}

fn parse_var<T>(name: &str, raw: Option<String>, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(s) if s.trim().is_empty() => Ok(default),
        Some(s) => s
            .trim()
            .parse()
            .map_err(|e| AppError::new(2, format!("Invalid {name}='{s}': {e}"))),
    }
}
