//! Point estimates: one blow count, every formula of a set.

use crate::domain::{FormulaEstimate, ParameterKind, SetEstimate};
use crate::error::EstimateError;
use crate::math::mean_of;
use crate::models::{FormulaSet, formula_set};

/// Evaluate every formula of `set` at `n`, in formula-set order.
pub fn evaluate_set(set: FormulaSet, n: f64) -> Vec<FormulaEstimate> {
    set.iter()
        .map(|f| FormulaEstimate {
            id: f.id,
            authors: f.authors,
            year: f.year,
            value: f.eval(n),
        })
        .collect()
}

/// Evaluate the formula set for `kind` at `n` and average the results.
pub fn estimate(kind: ParameterKind, n: f64) -> Result<SetEstimate, EstimateError> {
    let estimates = evaluate_set(formula_set(kind), n);
    let values: Vec<f64> = estimates.iter().map(|e| e.value).collect();
    let mean = mean_of(&values)?;

    tracing::debug!(kind = ?kind, nspt = n, mean, "evaluated formula set");

    Ok(SetEstimate {
        kind,
        nspt: n,
        estimates,
        mean,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FRICTION_ANGLE_SET;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn friction_set_always_returns_five_in_order() {
        for &n in &[0.0, 0.1, 10.0, 30.0, 1e6, -1.0] {
            let est = evaluate_set(FRICTION_ANGLE_SET, n);
            let ids: Vec<&str> = est.iter().map(|e| e.id).collect();
            assert_eq!(ids, ["φ1", "φ2", "φ3", "φ4", "φ5"]);
        }
    }

    #[test]
    fn scenario_nspt_10() {
        let phi = estimate(ParameterKind::FrictionAngle, 10.0).unwrap();
        let v: Vec<f64> = phi.estimates.iter().map(|e| e.value).collect();
        assert!(close(v[0], 15.0 + 240.0_f64.sqrt(), 1e-12));
        assert!(close(v[0], 30.49, 0.005));
        assert!(close(v[1], 32.45, 0.005));
        assert!(close(v[2], 30.046, 1e-9));
        assert!(close(v[3], 32.0, 1e-12));
        assert!(close(v[4], 36.7, 1e-9));
        assert!(close(phi.mean, 32.34, 0.005));

        let c = estimate(ParameterKind::Cohesion, 10.0).unwrap();
        assert_eq!(c.estimates[0].value, 100.0);
        assert!(close(c.estimates[1].value, 28.57, 0.005));
        assert!(close(c.mean, 64.29, 0.005));
    }

    #[test]
    fn scenario_nspt_0() {
        let phi = estimate(ParameterKind::FrictionAngle, 0.0).unwrap();
        let v: Vec<f64> = phi.estimates.iter().map(|e| e.value).collect();
        assert_eq!(v[0], 15.0);
        assert_eq!(v[1], 20.0);
        assert!(close(v[2], 27.1, 1e-12));
        assert_eq!(v[3], 28.0);
        assert!(close(v[4], 18.3, 1e-9));
        // (15 + 20 + 27.1 + 28 + 18.3) / 5
        assert!(close(phi.mean, 21.68, 1e-9));

        let c = estimate(ParameterKind::Cohesion, 0.0).unwrap();
        assert_eq!(c.estimates[0].value, 0.0);
        assert_eq!(c.estimates[1].value, 0.0);
        assert_eq!(c.mean, 0.0);
    }

    #[test]
    fn negative_nspt_propagates_nan_into_mean() {
        let phi = estimate(ParameterKind::FrictionAngle, -1.0).unwrap();
        assert!(phi.estimates[0].value.is_nan());
        assert!(phi.estimates[1].value.is_nan());
        assert_eq!(phi.estimates.len(), 5);
        assert!(phi.mean.is_nan());
    }
}
