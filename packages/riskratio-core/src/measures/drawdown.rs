//! Drawdown analysis over a reconstructed price path.
//!
//! A horizon `tau` compares every price level with the level `tau` periods
//! earlier and keeps the most negative proportional move. Whole-series measures
//! evaluate every horizon in `[0, n)`, which costs O(n²) for `n` returns.

use super::prices::{prices, DEFAULT_INITIAL_VALUE};
use super::ensure_series;
use crate::{Error, Result};

/// Drawdown over horizon `tau`, measured backwards from the end of the series.
///
/// Returns `abs(min(price[pos] / price[pos - tau] - 1))` over every aligned pair.
/// `tau == 0` is always 0. Pairs whose base level is zero are skipped: once the
/// path is wiped out it stays at zero, so there is no further move to measure.
///
/// # Errors
///
/// `InvalidInput` if `tau >= returns.len()`, `InsufficientData` for an empty series.
///
/// # Example
///
/// ```rust
/// use riskratio_core::drawdown_at_horizon;
///
/// // Levels: 100, 110, 88 -> worst one-period move is 88 / 110 - 1 = -20%
/// let dd = drawdown_at_horizon(&[0.1, -0.2], 1).unwrap();
/// assert!((dd - 0.2).abs() < 1e-12);
/// ```
pub fn drawdown_at_horizon(returns: &[f64], tau: usize) -> Result<f64> {
    ensure_series("returns", returns)?;
    ensure_horizon(tau, returns.len())?;

    let levels = prices(returns, DEFAULT_INITIAL_VALUE)?;
    Ok(horizon_drawdown(&levels, tau))
}

/// Drawdown for every horizon, indexed by `tau`.
pub(crate) fn drawdowns(returns: &[f64]) -> Result<Vec<f64>> {
    ensure_series("returns", returns)?;

    let levels = prices(returns, DEFAULT_INITIAL_VALUE)?;
    Ok((0..returns.len())
        .map(|tau| horizon_drawdown(&levels, tau))
        .collect())
}

/// Largest drawdown over every horizon in `[0, n)`.
pub fn max_drawdown(returns: &[f64]) -> Result<f64> {
    let all = drawdowns(returns)?;
    Ok(all.into_iter().fold(0.0, f64::max))
}

/// Mean of the `periods` largest per-horizon drawdowns.
///
/// # Errors
///
/// `InvalidInput` unless `1 <= periods <= returns.len()`.
pub fn average_drawdown(returns: &[f64], periods: usize) -> Result<f64> {
    let worst = worst_drawdowns(returns, periods)?;
    Ok(worst.iter().sum::<f64>() / periods as f64)
}

/// Mean of the squares of the `periods` largest per-horizon drawdowns.
pub fn average_drawdown_squared(returns: &[f64], periods: usize) -> Result<f64> {
    let worst = worst_drawdowns(returns, periods)?;
    Ok(worst.iter().map(|dd| dd * dd).sum::<f64>() / periods as f64)
}

fn worst_drawdowns(returns: &[f64], periods: usize) -> Result<Vec<f64>> {
    ensure_series("returns", returns)?;

    if periods == 0 || periods > returns.len() {
        return Err(Error::InvalidInput(format!(
            "periods must be in [1, {}], got {periods}",
            returns.len()
        )));
    }

    let mut all = drawdowns(returns)?;
    all.sort_by(|a, b| b.total_cmp(a));
    all.truncate(periods);
    Ok(all)
}

fn ensure_horizon(tau: usize, len: usize) -> Result<()> {
    if tau >= len {
        return Err(Error::InvalidInput(format!(
            "tau must be less than the series length {len}, got {tau}"
        )));
    }
    Ok(())
}

fn horizon_drawdown(levels: &[f64], tau: usize) -> f64 {
    if tau == 0 {
        return 0.0;
    }

    let worst = (tau..levels.len())
        .filter(|&pos| levels[pos - tau] != 0.0)
        .map(|pos| levels[pos] / levels[pos - tau] - 1.0)
        .fold(f64::INFINITY, f64::min);

    if worst.is_finite() {
        worst.abs()
    } else {
        0.0
    }
}
