//! Ratios discounted by Value at Risk.

use super::{discount, excess_return};
use crate::measures::{conditional_value_at_risk, value_at_risk};
use crate::Result;

/// Excess return on Value at Risk: `(er - rf) / VaR(returns, alpha)`.
pub fn excess_var_ratio(er: f64, returns: &[f64], rf: f64, alpha: f64) -> Result<f64> {
    let excess = excess_return(er, rf)?;
    discount(excess, value_at_risk(returns, alpha)?, "value at risk")
}

/// Conditional Sharpe ratio: `(er - rf) / CVaR(returns, alpha)`.
pub fn conditional_sharpe_ratio(er: f64, returns: &[f64], rf: f64, alpha: f64) -> Result<f64> {
    let excess = excess_return(er, rf)?;
    discount(
        excess,
        conditional_value_at_risk(returns, alpha)?,
        "conditional value at risk",
    )
}
