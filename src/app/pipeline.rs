//! Shared "estimate pipeline" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! clamp input -> build sweep domain -> point estimates -> sweep estimates
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use serde::Serialize;

use crate::aggregate::{estimate, estimate_sweep};
use crate::domain::{EstimateConfig, ParameterKind, SetEstimate, SweepEstimate, clamp_nspt};
use crate::error::AppError;

use super::sweep::sweep_domain;

/// All computed outputs for one blow count.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutput {
    /// Blow count as supplied by the user.
    pub requested_nspt: f64,
    /// Blow count after clamping to the presentation range.
    pub nspt: f64,
    pub friction: SetEstimate,
    pub cohesion: SetEstimate,
    pub friction_sweep: SweepEstimate,
    pub cohesion_sweep: SweepEstimate,
}

impl RunOutput {
    pub fn point(&self, kind: ParameterKind) -> &SetEstimate {
        match kind {
            ParameterKind::FrictionAngle => &self.friction,
            ParameterKind::Cohesion => &self.cohesion,
        }
    }

    pub fn sweep(&self, kind: ParameterKind) -> &SweepEstimate {
        match kind {
            ParameterKind::FrictionAngle => &self.friction_sweep,
            ParameterKind::Cohesion => &self.cohesion_sweep,
        }
    }
}

/// Execute the estimate pipeline and return the computed outputs.
pub fn run_estimate(config: &EstimateConfig) -> Result<RunOutput, AppError> {
    let requested_nspt = config.nspt;
    if !requested_nspt.is_finite() {
        return Err(AppError::new(
            2,
            format!("Nspt must be a finite number (got {requested_nspt})."),
        ));
    }
    let nspt = clamp_nspt(requested_nspt);
    if nspt != requested_nspt {
        tracing::warn!(requested = requested_nspt, clamped = nspt, "Nspt clamped to presentation range");
    }

    let grid = sweep_domain(config.sweep_points)?;

    Ok(RunOutput {
        requested_nspt,
        nspt,
        friction: estimate(ParameterKind::FrictionAngle, nspt)?,
        cohesion: estimate(ParameterKind::Cohesion, nspt)?,
        friction_sweep: estimate_sweep(ParameterKind::FrictionAngle, &grid)?,
        cohesion_sweep: estimate_sweep(ParameterKind::Cohesion, &grid)?,
    })
}
