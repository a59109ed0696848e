//! Loss-distribution risk measures.
//!
//! Provides volatility, beta, historical and parametric VaR, CVaR, and lower/higher
//! partial moments. Dispersion uses the population convention (divide by `n`).

use super::{
    ensure_aligned, ensure_alpha, ensure_finite, ensure_series, moment_exponent, sorted_ascending,
};
use crate::{Error, Result};

/// Running mean and second central moment (Welford).
///
/// A constant series accumulates an exactly zero second moment, so degenerate
/// inputs are detected with `== 0.0` instead of a tolerance.
#[derive(Debug, Clone, Copy, Default)]
struct Moments {
    count: usize,
    mean: f64,
    m2: f64,
}

impl Moments {
    fn from_series(series: &[f64]) -> Self {
        let mut moments = Self::default();
        for &x in series {
            moments.count += 1;
            let delta = x - moments.mean;
            moments.mean += delta / moments.count as f64;
            moments.m2 += delta * (x - moments.mean);
        }
        moments
    }

    fn population_variance(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        (self.m2 / self.count as f64).max(0.0)
    }
}

/// Running co-moment of two aligned series.
fn co_moment(xs: &[f64], ys: &[f64]) -> f64 {
    let mut count = 0usize;
    let mut mean_x = 0.0;
    let mut mean_y = 0.0;
    let mut c = 0.0;

    for (&x, &y) in xs.iter().zip(ys) {
        count += 1;
        let dx = x - mean_x;
        mean_x += dx / count as f64;
        mean_y += (y - mean_y) / count as f64;
        c += dx * (y - mean_y);
    }

    c
}

/// Arithmetic mean of a return series.
pub fn mean(returns: &[f64]) -> Result<f64> {
    ensure_series("returns", returns)?;
    Ok(Moments::from_series(returns).mean)
}

/// Population standard deviation of a return series.
///
/// A single observation has zero volatility.
///
/// # Errors
///
/// `InsufficientData` for an empty series, `InvalidInput` for non-finite values.
pub fn volatility(returns: &[f64]) -> Result<f64> {
    ensure_series("returns", returns)?;
    Ok(Moments::from_series(returns).population_variance().sqrt())
}

/// Population covariance of two aligned series.
pub fn covariance(returns: &[f64], market: &[f64]) -> Result<f64> {
    ensure_series("returns", returns)?;
    ensure_series("market", market)?;
    ensure_aligned("market", returns, market)?;

    Ok(co_moment(returns, market) / returns.len() as f64)
}

/// Sensitivity of `returns` to `market`: covariance over market variance.
///
/// # Errors
///
/// - `InvalidInput` if the series differ in length
/// - `InsufficientData` with fewer than 2 observations
/// - `DivisionByZero` if the market series has zero variance
pub fn beta(returns: &[f64], market: &[f64]) -> Result<f64> {
    ensure_series("returns", returns)?;
    ensure_series("market", market)?;
    ensure_aligned("market", returns, market)?;

    if returns.len() < 2 {
        return Err(Error::InsufficientData(
            "beta needs at least 2 observations".to_string(),
        ));
    }

    let market_variance = Moments::from_series(market).population_variance();
    if market_variance == 0.0 {
        return Err(Error::DivisionByZero(
            "market series has zero variance".to_string(),
        ));
    }

    let n = returns.len() as f64;
    Ok((co_moment(returns, market) / n) / market_variance)
}

/// Historical simulation Value at Risk.
///
/// Sorts the returns ascending and reports the magnitude of the observation at
/// `floor(alpha * n)`, clamped to the last index.
///
/// # Example
///
/// ```rust
/// use riskratio_core::value_at_risk;
///
/// let returns = vec![0.1, -0.2, 0.1, -0.1, 0.3];
/// let var = value_at_risk(&returns, 0.2).unwrap();
/// assert!((var - 0.1).abs() < 1e-12);
/// ```
pub fn value_at_risk(returns: &[f64], alpha: f64) -> Result<f64> {
    ensure_series("returns", returns)?;
    ensure_alpha(alpha)?;

    let sorted = sorted_ascending(returns);
    let index = tail_index(alpha, sorted.len());

    Ok(sorted[index].abs())
}

/// Conditional Value at Risk: mean magnitude of the observations strictly below the
/// VaR cutoff.
///
/// When the cutoff index is 0 there is no tail to average, and the worst observation
/// `abs(sorted[0])` is reported instead.
pub fn conditional_value_at_risk(returns: &[f64], alpha: f64) -> Result<f64> {
    ensure_series("returns", returns)?;
    ensure_alpha(alpha)?;

    let sorted = sorted_ascending(returns);
    let index = tail_index(alpha, sorted.len());

    if index == 0 {
        tracing::debug!(
            alpha,
            observations = sorted.len(),
            "CVaR tail is empty, using worst observation"
        );
        return Ok(sorted[0].abs());
    }

    let tail_sum: f64 = sorted[..index].iter().sum();
    Ok((tail_sum / index as f64).abs())
}

/// Delta-normal Value at Risk: `abs(mean + z(alpha) * volatility)`.
pub fn parametric_value_at_risk(returns: &[f64], alpha: f64) -> Result<f64> {
    ensure_series("returns", returns)?;
    ensure_alpha(alpha)?;

    let moments = Moments::from_series(returns);
    let z = norm_ppf(alpha);

    Ok((moments.mean + z * moments.population_variance().sqrt()).abs())
}

/// Lower partial moment: mean of `max(0, threshold - r)^order` over all observations.
pub fn lower_partial_moment(returns: &[f64], threshold: f64, order: u32) -> Result<f64> {
    ensure_series("returns", returns)?;
    ensure_finite("threshold", threshold)?;
    let exponent = moment_exponent(order)?;

    let total: f64 = returns
        .iter()
        .map(|r| (threshold - r).max(0.0).powi(exponent))
        .sum();

    Ok(total / returns.len() as f64)
}

/// Higher partial moment: mean of `max(0, r - threshold)^order` over all observations.
pub fn higher_partial_moment(returns: &[f64], threshold: f64, order: u32) -> Result<f64> {
    ensure_series("returns", returns)?;
    ensure_finite("threshold", threshold)?;
    let exponent = moment_exponent(order)?;

    let total: f64 = returns
        .iter()
        .map(|r| (r - threshold).max(0.0).powi(exponent))
        .sum();

    Ok(total / returns.len() as f64)
}

/// Quantile index `floor(alpha * n)`, never past the last observation.
fn tail_index(alpha: f64, n: usize) -> usize {
    let index = (alpha * n as f64).floor() as usize;
    if index >= n {
        tracing::debug!(alpha, n, index, "Clamping quantile index to last observation");
        return n - 1;
    }
    index
}

/// Inverse cumulative distribution function for standard normal distribution.
///
/// Uses Acklam's rational approximation (relative error below 1.15e-9).
/// Source: https://web.archive.org/web/20151110174102/http://home.online.no/~pjacklam/notes/invnorm/
pub fn norm_ppf(p: f64) -> f64 {
    const A: [f64; 6] = [
        -3.969683028665376e+01,
        2.209460984245205e+02,
        -2.759285104469687e+02,
        1.383577518672690e+02,
        -3.066479806614716e+01,
        2.506628277459239e+00,
    ];
    const B: [f64; 5] = [
        -5.447609879822406e+01,
        1.615858368580409e+02,
        -1.556989798598866e+02,
        6.680131188771972e+01,
        -1.328068155288572e+01,
    ];
    const C: [f64; 6] = [
        -7.784894002430293e-03,
        -3.223964580411365e-01,
        -2.400758277161838e+00,
        -2.549732539343734e+00,
        4.374664141464968e+00,
        2.938163982698783e+00,
    ];
    const D: [f64; 4] = [
        7.784695709041462e-03,
        3.224671290700398e-01,
        2.445134137142996e+00,
        3.754408661907416e+00,
    ];
    const P_LOW: f64 = 0.02425;
    const P_HIGH: f64 = 1.0 - P_LOW;

    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }

    let tail = |q: f64| {
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    };

    if p < P_LOW {
        tail((-2.0 * p.ln()).sqrt())
    } else if p <= P_HIGH {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        -tail((-2.0 * (1.0 - p).ln()).sqrt())
    }
}
