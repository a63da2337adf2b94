//! Sweep estimates: a sequence of blow counts, every formula of a set.

use crate::domain::{FormulaSeries, ParameterKind, SweepEstimate};
use crate::error::EstimateError;
use crate::math::mean_of;
use crate::models::{FormulaSet, formula_set};

/// Evaluate every formula of `set` over `ns`.
///
/// Returns one series per formula (formula-set order), each of length `ns.len()`.
pub fn evaluate_set_many(set: FormulaSet, ns: &[f64]) -> Vec<Vec<f64>> {
    set.iter().map(|f| f.eval_many(ns)).collect()
}

/// Evaluate the formula set for `kind` over `ns` and average across formulas at
/// each blow count.
pub fn estimate_sweep(kind: ParameterKind, ns: &[f64]) -> Result<SweepEstimate, EstimateError> {
    let set = formula_set(kind);
    let columns = evaluate_set_many(set, ns);

    // Gather each index across formulas in set order, exactly as the point path does.
    let mut mean = Vec::with_capacity(ns.len());
    let mut column = Vec::with_capacity(columns.len());
    for i in 0..ns.len() {
        column.clear();
        column.extend(columns.iter().map(|values| values[i]));
        mean.push(mean_of(&column)?);
    }

    let series = set
        .iter()
        .zip(columns)
        .map(|(f, values)| FormulaSeries {
            id: f.id,
            authors: f.authors,
            year: f.year,
            values,
        })
        .collect();

    tracing::debug!(kind = ?kind, points = ns.len(), "evaluated formula sweep");

    Ok(SweepEstimate {
        kind,
        nspt: ns.to_vec(),
        series,
        mean,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::estimate;
    use crate::app::sweep::sweep_domain;
    use crate::models::COHESION_SET;

    #[test]
    fn series_lengths_match_input() {
        let ns = [0.0, 1.0, 2.0, 3.0];
        let columns = evaluate_set_many(COHESION_SET, &ns);
        assert_eq!(columns.len(), 2);
        assert!(columns.iter().all(|c| c.len() == ns.len()));

        let sweep = estimate_sweep(ParameterKind::FrictionAngle, &ns).unwrap();
        assert_eq!(sweep.series.len(), 5);
        assert_eq!(sweep.mean.len(), ns.len());
        assert_eq!(sweep.nspt, ns);
    }

    #[test]
    fn sweep_is_bit_identical_to_point_path() {
        let grid = sweep_domain(300).unwrap();
        for kind in ParameterKind::ALL {
            let sweep = estimate_sweep(kind, &grid).unwrap();
            for &i in &[0usize, 1, 99, 150, 298, 299] {
                let point = estimate(kind, grid[i]).unwrap();
                for (series, est) in sweep.series.iter().zip(&point.estimates) {
                    assert_eq!(series.id, est.id);
                    assert_eq!(series.values[i].to_bits(), est.value.to_bits());
                }
                assert_eq!(sweep.mean[i].to_bits(), point.mean.to_bits());
            }
        }
    }

    #[test]
    fn empty_sweep_is_empty_not_error() {
        let sweep = estimate_sweep(ParameterKind::Cohesion, &[]).unwrap();
        assert!(sweep.mean.is_empty());
        assert!(sweep.series.iter().all(|s| s.values.is_empty()));
    }
}
