//! Unweighted aggregation of estimates.

use crate::error::EstimateError;

/// Arithmetic mean over the full, unfiltered collection.
///
/// `NaN` members are not skipped: a single `NaN` makes the mean `NaN`.
pub fn mean_of(values: &[f64]) -> Result<f64, EstimateError> {
    if values.is_empty() {
        return Err(EstimateError::EmptyFormulaSet);
    }
    let sum: f64 = values.iter().sum();
    Ok(sum / values.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_literal_set() {
        assert_eq!(mean_of(&[10.0, 20.0, 30.0]).unwrap(), 20.0);
    }

    #[test]
    fn mean_of_empty_is_an_error() {
        assert_eq!(mean_of(&[]), Err(EstimateError::EmptyFormulaSet));
    }

    #[test]
    fn mean_propagates_nan() {
        assert!(mean_of(&[1.0, f64::NAN, 3.0]).unwrap().is_nan());
    }
}
