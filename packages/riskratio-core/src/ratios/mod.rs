//! Risk-adjusted return ratios.
//!
//! Each ratio discounts an expected excess return (or an upside measure) by one of
//! the risk measures in [`crate::measures`]. A denominator of exactly zero is
//! reported as [`Error::DivisionByZero`](crate::Error::DivisionByZero) for every ratio.

mod drawdown;
mod engine;
mod partial_moments;
mod var;
mod volatility;

pub use drawdown::{burke_ratio, calmar_ratio, sterling_ratio};
pub use engine::RatioEngine;
pub use partial_moments::{
    gain_loss_ratio, kappa_ratio, kappa_three_ratio, omega_ratio, sortino_ratio,
    upside_potential_ratio,
};
pub use var::{conditional_sharpe_ratio, excess_var_ratio};
pub use volatility::{information_ratio, modigliani_ratio, sharpe_ratio, treynor_ratio};

use crate::measures::ensure_finite;
use crate::{Error, Result};

/// `er - rf`, rejecting non-finite inputs.
pub(crate) fn excess_return(er: f64, rf: f64) -> Result<f64> {
    ensure_finite("expected return", er)?;
    ensure_finite("risk-free rate", rf)?;
    Ok(er - rf)
}

/// Divide by a risk measure, refusing an exactly zero denominator.
pub(crate) fn discount(numerator: f64, denominator: f64, measure: &str) -> Result<f64> {
    if denominator == 0.0 {
        return Err(Error::DivisionByZero(format!("{measure} is zero")));
    }
    Ok(numerator / denominator)
}
