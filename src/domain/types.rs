//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - produced by the estimation core
//! - rendered by the CLI/TUI front-ends
//! - exported to JSON/CSV

use std::path::PathBuf;

use clap::ValueEnum;
use serde::Serialize;

/// Lower bound of the presentation range for Nspt.
pub const NSPT_MIN: f64 = 0.0;
/// Upper bound of the presentation range for Nspt (also the sweep end point).
pub const NSPT_MAX: f64 = 30.0;
/// Input step used by the interactive front-end.
pub const NSPT_STEP: f64 = 0.1;
/// Number of points in the comparison sweep over `[NSPT_MIN, NSPT_MAX]`.
pub const SWEEP_POINTS: usize = 300;

/// Which soil parameter a formula set estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    /// Internal friction angle φ, in degrees.
    FrictionAngle,
    /// Cohesion c, in kPa.
    Cohesion,
}

impl ParameterKind {
    pub const ALL: [ParameterKind; 2] = [ParameterKind::FrictionAngle, ParameterKind::Cohesion];

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            ParameterKind::FrictionAngle => "Friction angle (φ)",
            ParameterKind::Cohesion => "Cohesion (c)",
        }
    }

    /// Stable machine-readable key (matches the serde representation).
    pub fn key(self) -> &'static str {
        match self {
            ParameterKind::FrictionAngle => "friction_angle",
            ParameterKind::Cohesion => "cohesion",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            ParameterKind::FrictionAngle => "φ",
            ParameterKind::Cohesion => "c",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            ParameterKind::FrictionAngle => "°",
            ParameterKind::Cohesion => "kPa",
        }
    }

    /// Y-axis label for charts, e.g. `φ (°)`.
    pub fn axis_label(self) -> String {
        format!("{} ({})", self.symbol(), self.unit())
    }

    /// Format a value with two decimals and the unit suffix.
    ///
    /// Degrees attach directly (`30.49°`); kPa is space-separated (`100.00 kPa`).
    pub fn format_value(self, v: f64) -> String {
        match self {
            ParameterKind::FrictionAngle => format!("{v:.2}°"),
            ParameterKind::Cohesion => format!("{v:.2} kPa"),
        }
    }
}

/// `Authors (year)` label shared by formulas, estimates and series.
pub fn author_year_label(authors: &str, year: u16) -> String {
    format!("{authors} ({year})")
}

/// A single formula's estimate at one blow count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormulaEstimate {
    pub id: &'static str,
    pub authors: &'static str,
    pub year: u16,
    pub value: f64,
}

impl FormulaEstimate {
    /// Author/year label, e.g. `Godoy (1983)`.
    pub fn label(&self) -> String {
        author_year_label(self.authors, self.year)
    }
}

/// Every formula of one set evaluated at one blow count, plus their mean.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetEstimate {
    pub kind: ParameterKind,
    pub nspt: f64,
    /// Per-formula estimates in formula-set order.
    pub estimates: Vec<FormulaEstimate>,
    /// Unweighted mean over all of `estimates`.
    pub mean: f64,
}

/// One formula evaluated over a sequence of blow counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormulaSeries {
    pub id: &'static str,
    pub authors: &'static str,
    pub year: u16,
    pub values: Vec<f64>,
}

impl FormulaSeries {
    pub fn label(&self) -> String {
        author_year_label(self.authors, self.year)
    }

    /// `(nspt, value)` pairs for plotting.
    pub fn points(&self, nspt: &[f64]) -> Vec<(f64, f64)> {
        nspt.iter().copied().zip(self.values.iter().copied()).collect()
    }
}

/// Every formula of one set evaluated over a sequence of blow counts.
///
/// All vectors have the same length as `nspt`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepEstimate {
    pub kind: ParameterKind,
    pub nspt: Vec<f64>,
    /// One series per formula, in formula-set order.
    pub series: Vec<FormulaSeries>,
    /// Mean across formulas at each blow count.
    pub mean: Vec<f64>,
}

impl SweepEstimate {
    pub fn mean_points(&self) -> Vec<(f64, f64)> {
        self.nspt.iter().copied().zip(self.mean.iter().copied()).collect()
    }
}

/// Clamp a user-supplied blow count to the presentation range `[NSPT_MIN, NSPT_MAX]`.
///
/// `NaN` is passed through unchanged.
pub fn clamp_nspt(n: f64) -> f64 {
    n.clamp(NSPT_MIN, NSPT_MAX)
}

/// Run configuration for the estimate pipeline (built from CLI args + environment).
#[derive(Debug, Clone)]
pub struct EstimateConfig {
    /// Blow count as supplied (clamped by the pipeline).
    pub nspt: f64,
    pub sweep_points: usize,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    pub export_results: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

impl Default for EstimateConfig {
    fn default() -> Self {
        Self {
            nspt: 10.0,
            sweep_points: SWEEP_POINTS,
            plot: true,
            plot_width: 72,
            plot_height: 20,
            export_results: None,
            export_json: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_keeps_values_in_presentation_range() {
        assert_eq!(clamp_nspt(-3.0), 0.0);
        assert_eq!(clamp_nspt(12.5), 12.5);
        assert_eq!(clamp_nspt(45.0), 30.0);
        assert!(clamp_nspt(f64::NAN).is_nan());
    }

    #[test]
    fn value_formatting_uses_units() {
        assert_eq!(ParameterKind::FrictionAngle.format_value(32.0), "32.00°");
        assert_eq!(ParameterKind::Cohesion.format_value(28.571), "28.57 kPa");
        assert_eq!(ParameterKind::Cohesion.axis_label(), "c (kPa)");
        assert_eq!(author_year_label("Berberian", 2015), "Berberian (2015)");
    }
}
