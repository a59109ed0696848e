//! Risk measures over return series.
//!
//! Provides price reconstruction, distribution-based measures and drawdown analysis.

mod distribution;
mod drawdown;
mod prices;
mod profile;

pub use distribution::{
    beta, conditional_value_at_risk, covariance, higher_partial_moment, lower_partial_moment,
    mean, norm_ppf, parametric_value_at_risk, value_at_risk, volatility,
};
pub use drawdown::{average_drawdown, average_drawdown_squared, drawdown_at_horizon, max_drawdown};
pub use prices::{prices, DEFAULT_INITIAL_VALUE};
pub use profile::risk_profile;

use crate::{Error, Result};

/// Reject empty series and series containing NaN or infinities.
pub(crate) fn ensure_series(name: &str, series: &[f64]) -> Result<()> {
    if series.is_empty() {
        return Err(Error::InsufficientData(format!(
            "{name} series must contain at least one observation"
        )));
    }

    if let Some(i) = series.iter().position(|r| !r.is_finite()) {
        return Err(Error::InvalidInput(format!(
            "{name} series has a non-finite value at index {i}"
        )));
    }

    Ok(())
}

/// Reject a pair of series that do not cover the same periods.
pub(crate) fn ensure_aligned(name: &str, returns: &[f64], other: &[f64]) -> Result<()> {
    if returns.len() != other.len() {
        return Err(Error::InvalidInput(format!(
            "returns has {} observations but {name} has {}",
            returns.len(),
            other.len()
        )));
    }
    Ok(())
}

pub(crate) fn ensure_finite(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::InvalidInput(format!("{name} must be finite, got {value}")));
    }
    Ok(())
}

/// Confidence level must lie strictly inside (0, 1).
pub(crate) fn ensure_alpha(alpha: f64) -> Result<()> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(Error::InvalidInput(format!(
            "alpha must be in (0, 1), got {alpha}"
        )));
    }
    Ok(())
}

/// Validate a partial moment order and convert it to a `powi` exponent.
pub(crate) fn moment_exponent(order: u32) -> Result<i32> {
    if order == 0 {
        return Err(Error::InvalidInput(
            "partial moment order must be at least 1".to_string(),
        ));
    }
    i32::try_from(order)
        .map_err(|_| Error::InvalidInput(format!("partial moment order {order} is too large")))
}

/// Sort a copy of the series ascending. Callers have already rejected NaN.
pub(crate) fn sorted_ascending(returns: &[f64]) -> Vec<f64> {
    let mut sorted = returns.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}
