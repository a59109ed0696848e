//! Ratios discounted by drawdown risk.

use super::{discount, excess_return};
use crate::measures::{average_drawdown, average_drawdown_squared, max_drawdown};
use crate::Result;

/// Calmar ratio: `(er - rf) / max_drawdown(returns)`.
pub fn calmar_ratio(er: f64, returns: &[f64], rf: f64) -> Result<f64> {
    let excess = excess_return(er, rf)?;
    discount(excess, max_drawdown(returns)?, "maximum drawdown")
}

/// Sterling ratio: `(er - rf) / average_drawdown(returns, periods)`.
pub fn sterling_ratio(er: f64, returns: &[f64], rf: f64, periods: usize) -> Result<f64> {
    let excess = excess_return(er, rf)?;
    discount(
        excess,
        average_drawdown(returns, periods)?,
        "average drawdown",
    )
}

/// Burke ratio: `(er - rf) / sqrt(average_drawdown_squared(returns, periods))`.
pub fn burke_ratio(er: f64, returns: &[f64], rf: f64, periods: usize) -> Result<f64> {
    let excess = excess_return(er, rf)?;
    discount(
        excess,
        average_drawdown_squared(returns, periods)?.sqrt(),
        "root mean squared drawdown",
    )
}
