//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads environment defaults
//! - runs the estimate pipeline
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, EstimateArgs, SweepArgs, TuiArgs};
use crate::config::Settings;
use crate::domain::{EstimateConfig, ParameterKind};
use crate::error::AppError;

pub mod pipeline;
pub mod sweep;

/// Entry point for the `nspt` binary.
pub fn run() -> Result<(), AppError> {
    // We want `nspt` and `nspt -n 12` to behave like `nspt tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    let settings = Settings::from_env()?;

    // The TUI owns the terminal; log lines would corrupt the alternate screen.
    if !matches!(cli.command, Command::Tui(_)) {
        init_logging();
    }

    match cli.command {
        Command::Estimate(args) => handle_estimate(args, &settings),
        Command::Formulas => {
            print!("{}", crate::report::format_formula_catalog());
            Ok(())
        }
        Command::Sweep(args) => handle_sweep(args, &settings),
        Command::Tui(args) => handle_tui(args, &settings),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A second init (e.g. from tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_estimate(args: EstimateArgs, settings: &Settings) -> Result<(), AppError> {
    let config = estimate_config_from_args(&args, settings);
    let run = pipeline::run_estimate(&config)?;

    println!("{}", crate::report::format_run_summary(&run));

    if config.plot {
        for kind in ParameterKind::ALL {
            let plot = crate::plot::render_ascii_chart(
                run.sweep(kind),
                run.point(kind),
                kind == ParameterKind::FrictionAngle,
                config.plot_width,
                config.plot_height,
            );
            println!("{plot}");
        }
    }

    // Optional exports.
    if let Some(path) = &config.export_results {
        crate::io::export::write_estimates_csv(path, &run)?;
        tracing::info!(path = %path.display(), "wrote estimates CSV");
    }
    if let Some(path) = &config.export_json {
        crate::io::json::write_run_json(path, &run)?;
        tracing::info!(path = %path.display(), "wrote run JSON");
    }

    Ok(())
}

fn handle_sweep(args: SweepArgs, settings: &Settings) -> Result<(), AppError> {
    let grid = sweep::sweep_domain(args.points.unwrap_or(settings.sweep_points))?;
    let kinds: Vec<ParameterKind> = match args.kind {
        Some(kind) => vec![kind],
        None => ParameterKind::ALL.to_vec(),
    };

    let mut sweeps = Vec::with_capacity(kinds.len());
    for kind in kinds {
        sweeps.push(crate::aggregate::estimate_sweep(kind, &grid)?);
    }

    match &args.export {
        Some(path) => {
            crate::io::export::write_sweep_csv(path, &sweeps)?;
            tracing::info!(path = %path.display(), points = grid.len(), "wrote sweep CSV");
        }
        None => print!("{}", crate::report::format_sweep_table(&sweeps)),
    }
    Ok(())
}

fn handle_tui(args: TuiArgs, settings: &Settings) -> Result<(), AppError> {
    crate::tui::run(args.nspt, args.points.unwrap_or(settings.sweep_points))
}

pub fn estimate_config_from_args(args: &EstimateArgs, settings: &Settings) -> EstimateConfig {
    EstimateConfig {
        nspt: args.nspt,
        sweep_points: args.points.unwrap_or(settings.sweep_points),
        plot: !args.no_plot,
        plot_width: args.width.unwrap_or(settings.plot_width),
        plot_height: args.height.unwrap_or(settings.plot_height),
        export_results: args.export.clone(),
        export_json: args.export_json.clone(),
    }
}

/// Rewrite argv so `nspt` defaults to `nspt tui`.
///
/// Rules:
/// - `nspt`                      -> `nspt tui`
/// - `nspt -n 12 ...`            -> `nspt tui -n 12 ...`
/// - `nspt --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "estimate" | "formulas" | "sweep" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_launches_tui() {
        assert_eq!(rewrite_args(argv(&["nspt"])), argv(&["nspt", "tui"]));
        assert_eq!(
            rewrite_args(argv(&["nspt", "-n", "12"])),
            argv(&["nspt", "tui", "-n", "12"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        let args = argv(&["nspt", "estimate", "-n", "3"]);
        assert_eq!(rewrite_args(args.clone()), args);
        let args = argv(&["nspt", "--help"]);
        assert_eq!(rewrite_args(args.clone()), args);
    }

    #[test]
    fn flags_fall_back_to_settings() {
        let args = EstimateArgs {
            nspt: 4.0,
            no_plot: false,
            width: None,
            height: Some(12),
            points: None,
            export: None,
            export_json: None,
        };
        let settings = Settings {
            sweep_points: 51,
            plot_width: 90,
            plot_height: 30,
        };
        let config = estimate_config_from_args(&args, &settings);
        assert_eq!(config.sweep_points, 51);
        assert_eq!(config.plot_width, 90);
        assert_eq!(config.plot_height, 12);
        assert!(config.plot);
    }
}
