//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the correlation/aggregation code stays clean and testable
//! - output changes are localized (important for snapshot tests)

use crate::app::pipeline::RunOutput;
use crate::domain::{ParameterKind, SetEstimate, SweepEstimate};
use crate::models::FORMULA_SETS;

/// Format the full run summary (input + per-formula estimates + means).
pub fn format_run_summary(run: &RunOutput) -> String {
    let mut out = String::new();

    out.push_str("=== nspt - Friction angle and cohesion from Nspt ===\n");
    if run.nspt != run.requested_nspt {
        out.push_str(&format!(
            "Nspt: {:.2} (clamped from {:.2})\n",
            run.nspt, run.requested_nspt
        ));
    } else {
        out.push_str(&format!("Nspt: {:.2}\n", run.nspt));
    }
    out.push('\n');

    out.push_str(&format_set_estimate(&run.friction));
    out.push('\n');
    out.push_str(&format_set_estimate(&run.cohesion));

    out
}

/// Format one set of estimates as a numbered table with its mean.
pub fn format_set_estimate(set: &SetEstimate) -> String {
    let kind = set.kind;
    let mut out = String::new();
    out.push_str(&format!("{} for Nspt = {:.2}:\n", kind.display_name(), set.nspt));

    for e in &set.estimates {
        out.push_str(&format!(
            "  {:<4} {:<34} {:>12}\n",
            e.id,
            truncate(&e.label(), 34),
            kind.format_value(e.value)
        ));
    }
    out.push_str(&format!(
        "  {:<4} {:<34} {:>12}\n",
        "",
        "Mean",
        kind.format_value(set.mean)
    ));

    out
}

/// Format the formula documentation for both sets.
pub fn format_formula_catalog() -> String {
    let mut out = String::new();

    for (i, set) in FORMULA_SETS.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!(
            "{} {} ({}):\n",
            kind_title(set.kind),
            set.kind.symbol(),
            set.kind.unit()
        ));
        for f in set.iter() {
            let note = f.soil_note.map(|n| format!(" ({n})")).unwrap_or_default();
            out.push_str(&format!("- {} {}: {}{note}\n", f.id, f.label(), f.expression));
        }
    }

    out
}

/// Format sweeps as a whitespace-aligned table: `nspt`, each formula, then each mean.
///
/// All sweeps must share the same Nspt grid; the first sweep's grid is used.
pub fn format_sweep_table(sweeps: &[SweepEstimate]) -> String {
    let mut out = String::new();
    let Some(first) = sweeps.first() else {
        return out;
    };

    let mut header = format!("{:>8}", "nspt");
    for sweep in sweeps {
        for s in &sweep.series {
            header.push_str(&format!(" {:>9}", s.id));
        }
        header.push_str(&format!(" {:>9}", format!("{}_mean", sweep.kind.symbol())));
    }
    out.push_str(header.trim_end());
    out.push('\n');

    for (i, n) in first.nspt.iter().enumerate() {
        let mut row = format!("{n:>8.3}");
        for sweep in sweeps {
            for s in &sweep.series {
                row.push_str(&format!(" {:>9.3}", s.values[i]));
            }
            row.push_str(&format!(" {:>9.3}", sweep.mean[i]));
        }
        out.push_str(&row);
        out.push('\n');
    }

    out
}

fn kind_title(kind: ParameterKind) -> &'static str {
    match kind {
        ParameterKind::FrictionAngle => "Friction angle",
        ParameterKind::Cohesion => "Cohesion",
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
