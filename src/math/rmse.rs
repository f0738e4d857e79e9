//! Deviation metrics between observed samples and a reference curve.

use crate::error::AppError;

/// Root-mean-square error, `sqrt(mean((observed - expected)^2))`.
///
/// Pairing is by index; both slices must be non-empty and of equal length.
pub fn rmse(observed: &[f64], expected: &[f64]) -> Result<f64, AppError> {
    check_lengths(observed, expected)?;
    let sse: f64 = observed
        .iter()
        .zip(expected)
        .map(|(o, e)| (o - e) * (o - e))
        .sum();
    Ok((sse / observed.len() as f64).sqrt())
}

/// Largest absolute deviation between paired samples.
pub fn max_abs_error(observed: &[f64], expected: &[f64]) -> Result<f64, AppError> {
    check_lengths(observed, expected)?;
    Ok(observed
        .iter()
        .zip(expected)
        .map(|(o, e)| (o - e).abs())
        .fold(0.0, f64::max))
}

fn check_lengths(observed: &[f64], expected: &[f64]) -> Result<(), AppError> {
    if observed.is_empty() {
        return Err(AppError::no_data("Cannot score an empty series."));
    }
    if observed.len() != expected.len() {
        return Err(AppError::no_data(format!(
            "Length mismatch: {} observed vs {} expected samples.",
            observed.len(),
            expected.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rmse_zero_for_identical_inputs() {
        let y = [0.1, 0.5, -0.25];
        assert_eq!(rmse(&y, &y).unwrap(), 0.0);
    }

    #[test]
    fn rmse_two_point_example() {
        let expected = [1.0, (-1.0f64).exp()];
        let observed = [1.0, 0.36];
        let got = rmse(&observed, &expected).unwrap();
        let want = ((0.36 - (-1.0f64).exp()).powi(2) / 2.0).sqrt();
        assert!((got - want).abs() < 1e-15);
        assert!((got - 0.0056).abs() < 1e-4, "got {got}");
    }

    #[test]
    fn rmse_is_order_sensitive() {
        let expected = [0.0, 1.0, 2.0];
        let observed = [0.0, 1.0, 2.5];
        let base = rmse(&observed, &expected).unwrap();

        // Same permutation on both sides: unchanged.
        let both = rmse(&[2.5, 0.0, 1.0], &[2.0, 0.0, 1.0]).unwrap();
        assert!((base - both).abs() < 1e-15);

        // Permuting only one side changes the pairing.
        let one = rmse(&[2.5, 0.0, 1.0], &expected).unwrap();
        assert!((base - one).abs() > 1e-3);
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let err = rmse(&[1.0, 2.0], &[1.0]).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_NO_DATA);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(rmse(&[], &[]).is_err());
        assert!(max_abs_error(&[], &[]).is_err());
    }

    #[test]
    fn max_abs_error_picks_largest_deviation() {
        let got = max_abs_error(&[1.0, -2.0, 0.5], &[1.1, -1.0, 0.5]).unwrap();
        assert!((got - 1.0).abs() < 1e-15);
    }
}
