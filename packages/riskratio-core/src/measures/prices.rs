//! Price path reconstruction from periodic returns.

use crate::{Error, Result};

/// Starting index level used by the drawdown measures.
pub const DEFAULT_INITIAL_VALUE: f64 = 100.0;

/// Compound a return series into an index level series.
///
/// Element 0 is `initial_value`; element `i` is element `i - 1` times
/// `1 + returns[i - 1]`, so the output has `returns.len() + 1` levels.
///
/// # Errors
///
/// `InvalidInput` if `initial_value` is not a positive finite number, or if a return
/// is non-finite or below -100% (which would produce a negative level).
///
/// # Example
///
/// ```rust
/// use riskratio_core::prices;
///
/// let levels = prices(&[0.1, -0.5], 100.0).unwrap();
/// assert_eq!(levels.len(), 3);
/// assert!((levels[1] - 110.0).abs() < 1e-9);
/// assert!((levels[2] - 55.0).abs() < 1e-9);
/// ```
pub fn prices(returns: &[f64], initial_value: f64) -> Result<Vec<f64>> {
    if !(initial_value.is_finite() && initial_value > 0.0) {
        return Err(Error::InvalidInput(format!(
            "initial price value must be positive, got {initial_value}"
        )));
    }

    let mut levels = Vec::with_capacity(returns.len() + 1);
    let mut level = initial_value;
    levels.push(level);

    for (i, r) in returns.iter().enumerate() {
        if !r.is_finite() || *r < -1.0 {
            return Err(Error::InvalidInput(format!(
                "return at index {i} cannot be compounded: {r}"
            )));
        }
        level *= 1.0 + r;
        levels.push(level);
    }

    Ok(levels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_prices_compounding() {
        let levels = prices(&[0.10, 0.05, -0.15], 100.0).unwrap();

        assert_eq!(levels.len(), 4);
        assert_eq!(levels[0], 100.0);
        assert_relative_eq!(levels[1], 110.0, epsilon = 1e-9);
        assert_relative_eq!(levels[2], 115.5, epsilon = 1e-9);
        assert_relative_eq!(levels[3], 98.175, epsilon = 1e-9);
    }

    #[test]
    fn test_prices_zero_returns_are_flat() {
        let levels = prices(&[0.0; 6], 100.0).unwrap();

        assert_eq!(levels.len(), 7);
        assert!(levels.iter().all(|&p| p == 100.0));
    }

    #[test]
    fn test_prices_empty_returns() {
        let levels = prices(&[], 250.0).unwrap();
        assert_eq!(levels, vec![250.0]);
    }

    #[test]
    fn test_prices_rejects_non_positive_initial_value() {
        assert!(matches!(prices(&[0.1], 0.0), Err(Error::InvalidInput(_))));
        assert!(matches!(prices(&[0.1], -5.0), Err(Error::InvalidInput(_))));
        assert!(matches!(
            prices(&[0.1], f64::INFINITY),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_prices_rejects_impossible_return() {
        assert!(matches!(
            prices(&[0.1, -1.5], 100.0),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            prices(&[f64::NAN], 100.0),
            Err(Error::InvalidInput(_))
        ));
    }
}
