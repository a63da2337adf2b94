//! Command-line parsing for the Nspt soil-strength estimator.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the correlation/aggregation code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::ParameterKind;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "nspt",
    version,
    about = "Friction angle and cohesion estimates from the SPT blow count (Nspt)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Estimate φ and c for one Nspt, print results and comparison charts.
    Estimate(EstimateArgs),
    /// List the correlations used, with authors and expressions.
    Formulas,
    /// Print (or export) every correlation over the Nspt sweep.
    Sweep(SweepArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same underlying pipeline as `nspt estimate`, but renders
    /// results and both charts in a terminal UI using Ratatui.
    Tui(TuiArgs),
}

/// Options for a single estimate.
#[derive(Debug, Parser, Clone)]
pub struct EstimateArgs {
    /// SPT blow count. Values outside 0..30 are clamped.
    #[arg(short = 'n', long, allow_negative_numbers = true, value_parser = parse_nspt)]
    pub nspt: f64,

    /// Disable the terminal charts.
    #[arg(long)]
    pub no_plot: bool,

    /// Chart width (columns). Defaults to NSPT_PLOT_WIDTH or 72.
    #[arg(long)]
    pub width: Option<usize>,

    /// Chart height (rows). Defaults to NSPT_PLOT_HEIGHT or 20.
    #[arg(long)]
    pub height: Option<usize>,

    /// Number of sweep points over 0..30. Defaults to NSPT_SWEEP_POINTS or 300.
    #[arg(long)]
    pub points: Option<usize>,

    /// Export per-formula estimates to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the full run (estimates + sweeps) to JSON.
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,
}

/// Options for the sweep table.
#[derive(Debug, Parser, Clone)]
pub struct SweepArgs {
    /// Only include one parameter (default: both).
    #[arg(long, value_enum)]
    pub kind: Option<ParameterKind>,

    /// Number of sweep points over 0..30. Defaults to NSPT_SWEEP_POINTS or 300.
    #[arg(long)]
    pub points: Option<usize>,

    /// Write the sweep to CSV instead of printing it.
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// Options for the interactive TUI.
#[derive(Debug, Parser, Clone)]
pub struct TuiArgs {
    /// Initial SPT blow count.
    #[arg(
        short = 'n',
        long,
        default_value_t = 0.0,
        allow_negative_numbers = true,
        value_parser = parse_nspt
    )]
    pub nspt: f64,

    /// Number of sweep points over 0..30. Defaults to NSPT_SWEEP_POINTS or 300.
    #[arg(long)]
    pub points: Option<usize>,
}

/// Parse a blow count, rejecting `nan`/`inf` (which `f64::from_str` accepts).
fn parse_nspt(s: &str) -> Result<f64, String> {
    let n: f64 = s.trim().parse().map_err(|e| format!("{e}"))?;
    if !n.is_finite() {
        return Err(format!("Nspt must be a finite number, got '{s}'"));
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_estimate_flags() {
        let cli = Cli::parse_from(["nspt", "estimate", "-n", "12.5", "--no-plot", "--points", "31"]);
        let Command::Estimate(args) = cli.command else {
            panic!("expected estimate");
        };
        assert_eq!(args.nspt, 12.5);
        assert!(args.no_plot);
        assert_eq!(args.points, Some(31));
    }

    #[test]
    fn parses_sweep_kind() {
        let cli = Cli::parse_from(["nspt", "sweep", "--kind", "cohesion"]);
        let Command::Sweep(args) = cli.command else {
            panic!("expected sweep");
        };
        assert_eq!(args.kind, Some(ParameterKind::Cohesion));
    }

    #[test]
    fn estimate_accepts_negative_nspt() {
        let cli = Cli::parse_from(["nspt", "estimate", "-n", "-1"]);
        let Command::Estimate(args) = cli.command else {
            panic!("expected estimate");
        };
        assert_eq!(args.nspt, -1.0);
    }

    #[test]
    fn non_finite_nspt_is_rejected() {
        for bad in ["nan", "NaN", "inf", "-inf"] {
            assert!(Cli::try_parse_from(["nspt", "estimate", "-n", bad]).is_err(), "{bad}");
            assert!(Cli::try_parse_from(["nspt", "tui", "-n", bad]).is_err(), "{bad}");
        }
        assert!(parse_nspt("7.5").is_ok());
    }
}
