//! Ratios built on lower and higher partial moments.
//!
//! Only deviations past the target count as risk (or as upside). Kappa generalizes
//! the family: order 1 discounts like Omega, order 2 like Sortino.

use super::{discount, excess_return};
use crate::measures::{higher_partial_moment, lower_partial_moment};
use crate::Result;

/// Omega ratio: `(er - rf) / LPM1(returns, target)`.
pub fn omega_ratio(er: f64, returns: &[f64], rf: f64, target: f64) -> Result<f64> {
    let excess = excess_return(er, rf)?;
    discount(
        excess,
        lower_partial_moment(returns, target, 1)?,
        "first-order lower partial moment",
    )
}

/// Sortino ratio: `(er - rf) / sqrt(LPM2(returns, target))`.
pub fn sortino_ratio(er: f64, returns: &[f64], rf: f64, target: f64) -> Result<f64> {
    let excess = excess_return(er, rf)?;
    discount(
        excess,
        lower_partial_moment(returns, target, 2)?.sqrt(),
        "downside deviation",
    )
}

/// Kappa ratio of any order: `(er - rf) / LPM_order(returns, target)^(1 / order)`.
pub fn kappa_ratio(er: f64, returns: &[f64], rf: f64, target: f64, order: u32) -> Result<f64> {
    let excess = excess_return(er, rf)?;
    let lpm = lower_partial_moment(returns, target, order)?;
    discount(
        excess,
        lpm.powf(1.0 / f64::from(order)),
        "lower partial moment root",
    )
}

/// Kappa-3 ratio: `(er - rf) / LPM3(returns, target)^(1/3)`.
pub fn kappa_three_ratio(er: f64, returns: &[f64], rf: f64, target: f64) -> Result<f64> {
    kappa_ratio(er, returns, rf, target, 3)
}

/// Gain-loss ratio: `HPM1(returns, target) / LPM1(returns, target)`.
pub fn gain_loss_ratio(returns: &[f64], target: f64) -> Result<f64> {
    discount(
        higher_partial_moment(returns, target, 1)?,
        lower_partial_moment(returns, target, 1)?,
        "first-order lower partial moment",
    )
}

/// Upside-potential ratio: `HPM1(returns, target) / sqrt(LPM2(returns, target))`.
pub fn upside_potential_ratio(returns: &[f64], target: f64) -> Result<f64> {
    discount(
        higher_partial_moment(returns, target, 1)?,
        lower_partial_moment(returns, target, 2)?.sqrt(),
        "downside deviation",
    )
}
