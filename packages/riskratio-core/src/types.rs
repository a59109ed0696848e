//! Core data types for risk ratio evaluation.

use crate::Result;
use serde::{Deserialize, Serialize};

/// A named risk-adjusted return ratio.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RatioKind {
    Treynor,
    Sharpe,
    Information,
    Modigliani,
    ExcessVar,
    ConditionalSharpe,
    Omega,
    Sortino,
    KappaThree,
    GainLoss,
    UpsidePotential,
    Calmar,
    Sterling,
    Burke,
}

impl RatioKind {
    /// Every ratio, in evaluation order.
    pub const ALL: [RatioKind; 14] = [
        RatioKind::Treynor,
        RatioKind::Sharpe,
        RatioKind::Information,
        RatioKind::Modigliani,
        RatioKind::ExcessVar,
        RatioKind::ConditionalSharpe,
        RatioKind::Omega,
        RatioKind::Sortino,
        RatioKind::KappaThree,
        RatioKind::GainLoss,
        RatioKind::UpsidePotential,
        RatioKind::Calmar,
        RatioKind::Sterling,
        RatioKind::Burke,
    ];

    /// Identifier matching the serialized form.
    pub fn name(&self) -> &'static str {
        match self {
            RatioKind::Treynor => "treynor",
            RatioKind::Sharpe => "sharpe",
            RatioKind::Information => "information",
            RatioKind::Modigliani => "modigliani",
            RatioKind::ExcessVar => "excess_var",
            RatioKind::ConditionalSharpe => "conditional_sharpe",
            RatioKind::Omega => "omega",
            RatioKind::Sortino => "sortino",
            RatioKind::KappaThree => "kappa_three",
            RatioKind::GainLoss => "gain_loss",
            RatioKind::UpsidePotential => "upside_potential",
            RatioKind::Calmar => "calmar",
            RatioKind::Sterling => "sterling",
            RatioKind::Burke => "burke",
        }
    }

    /// Whether the ratio is measured against a benchmark series.
    pub fn requires_benchmark(&self) -> bool {
        matches!(self, RatioKind::Information | RatioKind::Modigliani)
    }

    /// Whether the ratio is measured against a market series.
    pub fn requires_market(&self) -> bool {
        matches!(self, RatioKind::Treynor)
    }
}

impl std::fmt::Display for RatioKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Inputs for evaluating the ratios of one portfolio.
///
/// Optional parameters fall back to the engine's [`EngineConfig`](crate::EngineConfig).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioRequest {
    /// Caller-chosen identifier, echoed on the report
    pub id: String,
    /// Expected return of the portfolio per period
    pub expected_return: f64,
    /// Risk-free rate per period
    pub risk_free_rate: f64,
    /// Periodic returns, earliest first
    pub returns: Vec<f64>,
    /// Benchmark returns aligned with `returns`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benchmark: Option<Vec<f64>>,
    /// Market returns aligned with `returns`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market: Option<Vec<f64>>,
    /// Tail fraction for the VaR-based ratios
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
    /// Minimum acceptable return for the partial moment ratios
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,
    /// Number of worst drawdowns averaged by Sterling and Burke
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub periods: Option<usize>,
}

impl PortfolioRequest {
    /// Create a request with no benchmark, market or parameter overrides.
    pub fn new(id: &str, expected_return: f64, risk_free_rate: f64, returns: Vec<f64>) -> Self {
        Self {
            id: id.to_string(),
            expected_return,
            risk_free_rate,
            returns,
            benchmark: None,
            market: None,
            alpha: None,
            target: None,
            periods: None,
        }
    }

    pub fn with_benchmark(mut self, benchmark: Vec<f64>) -> Self {
        self.benchmark = Some(benchmark);
        self
    }

    pub fn with_market(mut self, market: Vec<f64>) -> Self {
        self.market = Some(market);
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    pub fn with_target(mut self, target: f64) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_periods(mut self, periods: usize) -> Self {
        self.periods = Some(periods);
        self
    }

    /// Whether the request carries the series `kind` is measured against.
    pub fn supports(&self, kind: RatioKind) -> bool {
        (!kind.requires_benchmark() || self.benchmark.is_some())
            && (!kind.requires_market() || self.market.is_some())
    }
}

/// Outcome of a single ratio evaluation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RatioOutcome {
    pub kind: RatioKind,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RatioOutcome {
    /// Create a successful outcome.
    pub fn ok(kind: RatioKind, value: f64) -> Self {
        Self {
            kind,
            ok: true,
            value: Some(value),
            error: None,
        }
    }

    /// Create a failed outcome.
    pub fn err(kind: RatioKind, error: impl Into<String>) -> Self {
        Self {
            kind,
            ok: false,
            value: None,
            error: Some(error.into()),
        }
    }

    pub fn from_result(kind: RatioKind, result: Result<f64>) -> Self {
        match result {
            Ok(value) => Self::ok(kind, value),
            Err(e) => Self::err(kind, e.to_string()),
        }
    }
}

/// Ratios evaluated for one portfolio request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioReport {
    /// Identifier of the originating request
    pub id: String,
    /// One outcome per evaluated ratio
    pub outcomes: Vec<RatioOutcome>,
}

impl PortfolioReport {
    /// Value of `kind`, if it was evaluated successfully.
    pub fn value(&self, kind: RatioKind) -> Option<f64> {
        self.outcomes
            .iter()
            .find(|o| o.kind == kind)
            .and_then(|o| o.value)
    }

    /// Outcomes that failed.
    pub fn failures(&self) -> Vec<&RatioOutcome> {
        self.outcomes.iter().filter(|o| !o.ok).collect()
    }

    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(|o| o.ok)
    }
}

/// Primitive risk measures for one return series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiskProfile {
    /// Number of returns in the series
    pub observations: usize,
    /// Tail fraction used for VaR and CVaR
    pub alpha: f64,
    /// Threshold used for the partial moments
    pub target: f64,
    /// Mean periodic return
    pub mean: f64,
    /// Population standard deviation
    pub volatility: f64,
    /// Historical simulation VaR (loss magnitude)
    pub value_at_risk: f64,
    /// Conditional VaR (loss magnitude)
    pub conditional_value_at_risk: f64,
    /// Delta-normal VaR (loss magnitude)
    pub parametric_value_at_risk: f64,
    /// First-order lower partial moment
    pub downside_risk: f64,
    /// Second-order lower partial moment
    pub downside_variance: f64,
    /// First-order higher partial moment
    pub upside_potential: f64,
    /// Largest drawdown over every horizon
    pub max_drawdown: f64,
}
