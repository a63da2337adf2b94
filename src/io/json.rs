//! Write the full run as JSON.
//!
//! The JSON file is a self-describing snapshot of one evaluation: the input,
//! every point estimate, both sweeps, and the formula catalog used. Non-finite
//! numbers serialize as `null`.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::app::pipeline::RunOutput;
use crate::error::AppError;
use crate::models::FORMULA_SETS;

#[derive(Debug, Serialize)]
struct RunFile<'a> {
    tool: &'static str,
    version: &'static str,
    generated_at: DateTime<Local>,
    formulas: Vec<FormulaEntry>,
    #[serde(flatten)]
    run: &'a RunOutput,
}

#[derive(Debug, Serialize)]
struct FormulaEntry {
    id: &'static str,
    authors: &'static str,
    year: u16,
    expression: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    soil_note: Option<&'static str>,
}

/// Write a run JSON file.
pub fn write_run_json(path: &Path, run: &RunOutput) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create run JSON '{}': {e}", path.display())))?;

    let formulas = FORMULA_SETS
        .iter()
        .flat_map(|set| set.iter())
        .map(|f| FormulaEntry {
            id: f.id,
            authors: f.authors,
            year: f.year,
            expression: f.expression,
            soil_note: f.soil_note,
        })
        .collect();

    let doc = RunFile {
        tool: "nspt",
        version: env!("CARGO_PKG_VERSION"),
        generated_at: Local::now(),
        formulas,
        run,
    };

    serde_json::to_writer_pretty(BufWriter::new(file), &doc)
        .map_err(|e| AppError::new(2, format!("Failed to write run JSON: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_estimate;
    use crate::domain::EstimateConfig;

    #[test]
    fn run_json_contains_estimates_and_catalog() {
        let run = run_estimate(&EstimateConfig {
            nspt: 0.0,
            sweep_points: 4,
            ..EstimateConfig::default()
        })
        .unwrap();
        let path = std::env::temp_dir().join(format!("nspt_{}_run.json", std::process::id()));
        write_run_json(&path, &run).unwrap();

        let txt = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        let v: serde_json::Value = serde_json::from_str(&txt).unwrap();

        assert_eq!(v["tool"], "nspt");
        assert_eq!(v["formulas"].as_array().unwrap().len(), 7);
        assert_eq!(v["friction"]["kind"], "friction_angle");
        assert_eq!(v["friction"]["estimates"].as_array().unwrap().len(), 5);
        assert_eq!(v["cohesion"]["mean"], 0.0);
        assert_eq!(v["friction_sweep"]["nspt"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn non_finite_estimates_serialize_as_null() {
        let mut run = run_estimate(&EstimateConfig {
            nspt: 0.0,
            sweep_points: 4,
            ..EstimateConfig::default()
        })
        .unwrap();
        run.friction = crate::aggregate::estimate(crate::domain::ParameterKind::FrictionAngle, -1.0).unwrap();

        let path = std::env::temp_dir().join(format!("nspt_{}_nan_run.json", std::process::id()));
        write_run_json(&path, &run).unwrap();
        let txt = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        let v: serde_json::Value = serde_json::from_str(&txt).unwrap();

        let estimates = v["friction"]["estimates"].as_array().unwrap();
        assert!(estimates[0]["value"].is_null());
        assert!(estimates[1]["value"].is_null());
        assert!(estimates[3]["value"].is_f64());
        assert!(v["friction"]["mean"].is_null());
        assert_eq!(v["cohesion"]["mean"], 0.0);
    }
}
