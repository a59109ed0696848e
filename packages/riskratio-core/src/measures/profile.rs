//! One-call summary of the primitive risk measures for a return series.

use super::{
    conditional_value_at_risk, higher_partial_moment, lower_partial_moment, max_drawdown, mean,
    parametric_value_at_risk, value_at_risk, volatility,
};
use crate::types::RiskProfile;
use crate::{Error, Result};

/// Calculate the risk profile of a return series.
///
/// # Arguments
///
/// * `returns` - Periodic fractional returns, earliest first
/// * `alpha` - Tail fraction for VaR/CVaR (e.g., 0.05)
/// * `target` - Minimum acceptable return for the partial moments
///
/// # Returns
///
/// Returns `RiskProfile` with all measures, or an error if there's insufficient data.
pub fn risk_profile(returns: &[f64], alpha: f64, target: f64) -> Result<RiskProfile> {
    if returns.len() < 2 {
        return Err(Error::InsufficientData(
            "Need at least 2 observations for a risk profile".to_string(),
        ));
    }

    Ok(RiskProfile {
        observations: returns.len(),
        alpha,
        target,
        mean: mean(returns)?,
        volatility: volatility(returns)?,
        value_at_risk: value_at_risk(returns, alpha)?,
        conditional_value_at_risk: conditional_value_at_risk(returns, alpha)?,
        parametric_value_at_risk: parametric_value_at_risk(returns, alpha)?,
        downside_risk: lower_partial_moment(returns, target, 1)?,
        downside_variance: lower_partial_moment(returns, target, 2)?,
        upside_potential: higher_partial_moment(returns, target, 1)?,
        max_drawdown: max_drawdown(returns)?,
    })
}
