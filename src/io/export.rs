//! Export estimates and sweeps to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.
//! Non-finite values are written as `NaN` so they are never mistaken for data.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::app::pipeline::RunOutput;
use crate::domain::{SetEstimate, SweepEstimate};
use crate::error::AppError;

/// Write per-formula estimates (plus one `mean` row per parameter) to a CSV file.
pub fn write_estimates_csv(path: &Path, run: &RunOutput) -> Result<(), AppError> {
    let mut file = create(path)?;

    writeln!(file, "kind,id,label,nspt,value,unit")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for set in [&run.friction, &run.cohesion] {
        write_set_rows(&mut file, set)?;
    }

    file.flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))
}

/// Write sweeps to CSV: `nspt`, every formula of every sweep, then each mean.
///
/// All sweeps must share the same Nspt grid.
pub fn write_sweep_csv(path: &Path, sweeps: &[SweepEstimate]) -> Result<(), AppError> {
    let Some(first) = sweeps.first() else {
        return Err(AppError::new(2, "Nothing to export: no sweeps."));
    };
    if sweeps.iter().any(|s| s.nspt != first.nspt) {
        return Err(AppError::new(4, "Sweeps do not share the same Nspt grid."));
    }

    let mut file = create(path)?;

    let mut header = vec!["nspt".to_string()];
    for sweep in sweeps {
        header.extend(sweep.series.iter().map(|s| s.id.to_string()));
        header.push(format!("{}_mean", sweep.kind.symbol()));
    }
    writeln!(file, "{}", header.join(","))
        .map_err(|e| AppError::new(2, format!("Failed to write sweep CSV header: {e}")))?;

    for (i, n) in first.nspt.iter().enumerate() {
        let mut row = vec![format!("{n:.10}")];
        for sweep in sweeps {
            row.extend(sweep.series.iter().map(|s| format!("{:.10}", s.values[i])));
            row.push(format!("{:.10}", sweep.mean[i]));
        }
        writeln!(file, "{}", row.join(","))
            .map_err(|e| AppError::new(2, format!("Failed to write sweep CSV row: {e}")))?;
    }

    file.flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush sweep CSV: {e}")))
}

fn create(path: &Path) -> Result<BufWriter<File>, AppError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))
}

fn write_set_rows(file: &mut impl Write, set: &SetEstimate) -> Result<(), AppError> {
    let kind = set.kind.key();
    let unit = set.kind.unit();
    for e in &set.estimates {
        writeln!(
            file,
            "{kind},{},\"{}\",{:.4},{:.6},{unit}",
            e.id,
            e.label(),
            set.nspt,
            e.value
        )
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }
    writeln!(file, "{kind},mean,\"Mean\",{:.4},{:.6},{unit}", set.nspt, set.mean)
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::estimate_sweep;
    use crate::app::pipeline::run_estimate;
    use crate::domain::{EstimateConfig, ParameterKind};

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("nspt_{}_{name}", std::process::id()))
    }

    #[test]
    fn estimates_csv_has_formula_and_mean_rows() {
        let run = run_estimate(&EstimateConfig {
            nspt: 10.0,
            sweep_points: 2,
            ..EstimateConfig::default()
        })
        .unwrap();
        let path = temp_path("estimates.csv");
        write_estimates_csv(&path, &run).unwrap();

        let txt = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines[0], "kind,id,label,nspt,value,unit");
        // 5 + mean, 2 + mean
        assert_eq!(lines.len(), 1 + 6 + 3);
        assert!(lines[4].starts_with("friction_angle,φ4,\"Godoy (1983)\",10.0000,32.000000,°"));
        assert_eq!(lines[7], "cohesion,c1,\"Teixeira e Godoy (1996)\",10.0000,100.000000,kPa");
        assert!(lines[9].starts_with("cohesion,mean,"));
    }

    #[test]
    fn sweep_csv_is_wide_over_shared_grid() {
        let grid = [0.0, 15.0, 30.0];
        let sweeps = vec![
            estimate_sweep(ParameterKind::FrictionAngle, &grid).unwrap(),
            estimate_sweep(ParameterKind::Cohesion, &grid).unwrap(),
        ];
        let path = temp_path("sweep.csv");
        write_sweep_csv(&path, &sweeps).unwrap();

        let txt = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines[0], "nspt,φ1,φ2,φ3,φ4,φ5,φ_mean,c1,c2,c_mean");
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().skip(1).all(|l| l.split(',').count() == 10));
    }

    #[test]
    fn sweep_csv_rejects_mismatched_grids() {
        let sweeps = vec![
            estimate_sweep(ParameterKind::FrictionAngle, &[0.0, 1.0]).unwrap(),
            estimate_sweep(ParameterKind::Cohesion, &[0.0, 2.0]).unwrap(),
        ];
        let err = write_sweep_csv(&temp_path("bad.csv"), &sweeps).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
