//! Ratios discounted by beta or volatility.

use super::{discount, excess_return};
use crate::measures::{beta, ensure_aligned, ensure_series, mean, volatility};
use crate::Result;

/// Treynor ratio: `(er - rf) / beta(returns, market)`.
pub fn treynor_ratio(er: f64, returns: &[f64], market: &[f64], rf: f64) -> Result<f64> {
    let excess = excess_return(er, rf)?;
    discount(excess, beta(returns, market)?, "beta")
}

/// Sharpe ratio: `(er - rf) / volatility(returns)`.
///
/// # Example
///
/// ```rust
/// use riskratio_core::{sharpe_ratio, Error};
///
/// // A constant series carries no volatility to discount by
/// let result = sharpe_ratio(0.05, &[0.01, 0.01, 0.01], 0.02);
/// assert!(matches!(result, Err(Error::DivisionByZero(_))));
/// ```
pub fn sharpe_ratio(er: f64, returns: &[f64], rf: f64) -> Result<f64> {
    let excess = excess_return(er, rf)?;
    discount(excess, volatility(returns)?, "volatility")
}

/// Information ratio: mean active return over tracking error.
pub fn information_ratio(returns: &[f64], benchmark: &[f64]) -> Result<f64> {
    ensure_series("returns", returns)?;
    ensure_series("benchmark", benchmark)?;
    ensure_aligned("benchmark", returns, benchmark)?;

    let active: Vec<f64> = returns.iter().zip(benchmark).map(|(r, b)| r - b).collect();
    discount(mean(&active)?, volatility(&active)?, "tracking error")
}

/// Modigliani (M²) ratio: the excess return rescaled to the benchmark's volatility,
/// `(er - rf) * volatility(returns - rf) / volatility(benchmark - rf) + rf`.
pub fn modigliani_ratio(er: f64, returns: &[f64], benchmark: &[f64], rf: f64) -> Result<f64> {
    let excess = excess_return(er, rf)?;
    ensure_aligned("benchmark", returns, benchmark)?;

    let portfolio_excess: Vec<f64> = returns.iter().map(|r| r - rf).collect();
    let benchmark_excess: Vec<f64> = benchmark.iter().map(|b| b - rf).collect();

    let scale = discount(
        volatility(&portfolio_excess)?,
        volatility(&benchmark_excess)?,
        "benchmark volatility",
    )?;

    Ok(excess * scale + rf)
}
