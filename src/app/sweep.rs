//! Sweep domain generation.
//!
//! The comparison charts evaluate every formula on an evenly spaced grid over the
//! presentation range. The grid is deterministic and includes both end points.

use crate::domain::{NSPT_MAX, NSPT_MIN};
use crate::error::AppError;

/// Generate `steps` evenly spaced points between `start` and `end` (inclusive).
///
/// Point `i` is `start + i·step`; the last point is pinned to `end` exactly.
pub fn linspace(start: f64, end: f64, steps: usize) -> Result<Vec<f64>, AppError> {
    if !(start.is_finite() && end.is_finite() && end > start) {
        return Err(AppError::new(
            2,
            format!("Invalid sweep range: start={start}, end={end} (must be finite and end>start)."),
        ));
    }
    if steps < 2 {
        return Err(AppError::new(2, "Sweep points must be >= 2."));
    }

    let step = (end - start) / (steps as f64 - 1.0);
    let mut out = Vec::with_capacity(steps);
    for i in 0..steps {
        out.push(start + step * i as f64);
    }
    out[steps - 1] = end;
    Ok(out)
}

/// The sweep over the full Nspt presentation range.
pub fn sweep_domain(steps: usize) -> Result<Vec<f64>, AppError> {
    linspace(NSPT_MIN, NSPT_MAX, steps)
}
