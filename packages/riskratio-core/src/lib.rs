//! Risk Ratio Core - Risk measures and risk-adjusted performance ratios.
//!
//! This crate evaluates a portfolio's historical return series against a market or
//! benchmark series and a risk-free/target rate:
//!
//! - **Distribution measures**: volatility, beta, historical and parametric VaR, CVaR,
//!   lower/higher partial moments
//! - **Drawdown analysis**: per-horizon, maximum, average and average squared drawdown
//!   over a reconstructed price path
//! - **Risk-adjusted ratios**: Treynor, Sharpe, Information, Modigliani, Excess-VaR,
//!   Conditional Sharpe, Omega, Sortino, Kappa, Gain-Loss, Upside-Potential, Calmar,
//!   Sterling, Burke
//! - **Batch evaluation**: many portfolios at once on a rayon worker pool
//!
//! Every function is pure. Degenerate inputs surface as [`Error`] values instead of
//! `NaN` or infinities.
//!
//! # Example
//!
//! ```rust
//! use riskratio_core::{sharpe_ratio, value_at_risk};
//!
//! let returns = vec![0.1, -0.2, 0.1, -0.1, 0.3];
//!
//! let var = value_at_risk(&returns, 0.2).unwrap();
//! assert!((var - 0.1).abs() < 1e-12);
//!
//! let sharpe = sharpe_ratio(0.04, &returns, 0.01).unwrap();
//! assert!(sharpe > 0.0);
//! ```

pub mod config;
pub mod measures;
pub mod ratios;
pub mod types;

// Re-export commonly used types
pub use config::EngineConfig;
pub use types::{PortfolioReport, PortfolioRequest, RatioKind, RatioOutcome, RiskProfile};

// Re-export main functionality
pub use measures::{
    average_drawdown, average_drawdown_squared, beta, conditional_value_at_risk, covariance,
    drawdown_at_horizon, higher_partial_moment, lower_partial_moment, max_drawdown, mean,
    norm_ppf, parametric_value_at_risk, prices, risk_profile, value_at_risk, volatility,
    DEFAULT_INITIAL_VALUE,
};
pub use ratios::{
    burke_ratio, calmar_ratio, conditional_sharpe_ratio, excess_var_ratio, gain_loss_ratio,
    information_ratio, kappa_ratio, kappa_three_ratio, modigliani_ratio, omega_ratio,
    sharpe_ratio, sortino_ratio, sterling_ratio, treynor_ratio, upside_potential_ratio,
    RatioEngine,
};

/// Error types for riskratio-core operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Division by zero: {0}")]
    DivisionByZero(String),
}

/// Result type for riskratio-core operations.
pub type Result<T> = std::result::Result<T, Error>;
