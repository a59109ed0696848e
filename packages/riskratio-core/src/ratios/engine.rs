//! Named ratio dispatch and batch evaluation.

use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use rayon::ThreadPool;

use super::{
    burke_ratio, calmar_ratio, conditional_sharpe_ratio, excess_var_ratio, gain_loss_ratio,
    information_ratio, kappa_three_ratio, modigliani_ratio, omega_ratio, sharpe_ratio,
    sortino_ratio, sterling_ratio, treynor_ratio, upside_potential_ratio,
};
use crate::config::EngineConfig;
use crate::types::{PortfolioReport, PortfolioRequest, RatioKind, RatioOutcome};
use crate::{Error, Result};

/// Evaluates ratios for portfolio requests, filling unset parameters from its config.
///
/// With `max_threads > 0` the engine owns a bounded worker pool, built once and
/// shared by clones; otherwise batches run on the global rayon pool.
#[derive(Debug, Clone, Default)]
pub struct RatioEngine {
    config: EngineConfig,
    pool: Option<Arc<ThreadPool>>,
}

impl RatioEngine {
    /// Create an engine, rejecting invalid configuration defaults.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let pool = build_pool(config.max_threads);
        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Threads available to parallel batches.
    pub fn worker_threads(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    /// Evaluate a single ratio for a request.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `kind` needs a benchmark or market series the request lacks;
    /// otherwise whatever the ratio itself reports.
    pub fn evaluate(&self, kind: RatioKind, request: &PortfolioRequest) -> Result<f64> {
        let er = request.expected_return;
        let rf = request.risk_free_rate;
        let returns = request.returns.as_slice();
        let alpha = request.alpha.unwrap_or(self.config.default_alpha);
        let target = request.target.unwrap_or(self.config.default_target);
        let periods = request.periods.unwrap_or(self.config.default_periods);

        match kind {
            RatioKind::Treynor => {
                let market = required(request.market.as_deref(), kind, "market")?;
                treynor_ratio(er, returns, market, rf)
            }
            RatioKind::Sharpe => sharpe_ratio(er, returns, rf),
            RatioKind::Information => {
                let benchmark = required(request.benchmark.as_deref(), kind, "benchmark")?;
                information_ratio(returns, benchmark)
            }
            RatioKind::Modigliani => {
                let benchmark = required(request.benchmark.as_deref(), kind, "benchmark")?;
                modigliani_ratio(er, returns, benchmark, rf)
            }
            RatioKind::ExcessVar => excess_var_ratio(er, returns, rf, alpha),
            RatioKind::ConditionalSharpe => conditional_sharpe_ratio(er, returns, rf, alpha),
            RatioKind::Omega => omega_ratio(er, returns, rf, target),
            RatioKind::Sortino => sortino_ratio(er, returns, rf, target),
            RatioKind::KappaThree => kappa_three_ratio(er, returns, rf, target),
            RatioKind::GainLoss => gain_loss_ratio(returns, target),
            RatioKind::UpsidePotential => upside_potential_ratio(returns, target),
            RatioKind::Calmar => calmar_ratio(er, returns, rf),
            RatioKind::Sterling => sterling_ratio(er, returns, rf, periods),
            RatioKind::Burke => burke_ratio(er, returns, rf, periods),
        }
    }

    /// Evaluate every ratio whose series inputs are present on the request.
    pub fn evaluate_all(&self, request: &PortfolioRequest) -> PortfolioReport {
        let outcomes: Vec<RatioOutcome> = RatioKind::ALL
            .into_iter()
            .filter(|kind| request.supports(*kind))
            .map(|kind| RatioOutcome::from_result(kind, self.evaluate(kind, request)))
            .collect();

        let failed = outcomes.iter().filter(|o| !o.ok).count();
        if failed == outcomes.len() {
            tracing::warn!(id = %request.id, "No ratio could be evaluated");
        } else if failed > 0 {
            tracing::debug!(
                id = %request.id,
                failed,
                evaluated = outcomes.len(),
                "Some ratios failed"
            );
        }

        PortfolioReport {
            id: request.id.clone(),
            outcomes,
        }
    }

    /// Evaluate many requests, in parallel once the batch reaches
    /// `min_parallel_requests`.
    ///
    /// Reports come back in request order, each tagged with its request id.
    pub fn evaluate_batch(&self, requests: &[PortfolioRequest]) -> Vec<PortfolioReport> {
        let start = Instant::now();
        tracing::info!(requests = requests.len(), "Evaluating portfolio batch");

        let reports = if requests.len() >= self.config.min_parallel_requests {
            self.run_parallel(requests)
        } else {
            tracing::debug!(
                requests = requests.len(),
                threshold = self.config.min_parallel_requests,
                "Batch below parallel threshold, evaluating sequentially"
            );
            requests.iter().map(|r| self.evaluate_all(r)).collect()
        };

        let incomplete = reports.iter().filter(|r| !r.is_complete()).count();
        tracing::info!(
            requests = reports.len(),
            incomplete,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Portfolio batch complete"
        );

        reports
    }

    fn run_parallel(&self, requests: &[PortfolioRequest]) -> Vec<PortfolioReport> {
        let evaluate = || {
            requests
                .par_iter()
                .map(|r| self.evaluate_all(r))
                .collect::<Vec<_>>()
        };

        match &self.pool {
            Some(pool) => pool.install(evaluate),
            None => evaluate(),
        }
    }
}

fn build_pool(max_threads: usize) -> Option<Arc<ThreadPool>> {
    if max_threads == 0 {
        return None;
    }

    match rayon::ThreadPoolBuilder::new().num_threads(max_threads).build() {
        Ok(pool) => {
            tracing::debug!(threads = max_threads, "Built worker pool");
            Some(Arc::new(pool))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to build worker pool, using global pool");
            None
        }
    }
}

fn required<'a>(series: Option<&'a [f64]>, kind: RatioKind, name: &str) -> Result<&'a [f64]> {
    series.ok_or_else(|| Error::InvalidInput(format!("{kind} ratio requires a {name} series")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_request(id: &str) -> PortfolioRequest {
        PortfolioRequest::new(id, 0.04, 0.01, vec![0.1, -0.2, 0.1, -0.1, 0.3])
    }

    #[test]
    fn test_engine_rejects_invalid_config() {
        let config = EngineConfig::new().with_default_alpha(0.0);
        assert!(matches!(RatioEngine::new(config), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_evaluate_matches_free_functions() {
        let engine = RatioEngine::default();
        let request = sample_request("p1").with_alpha(0.2).with_periods(2);
        let returns = &request.returns;

        assert_eq!(
            engine.evaluate(RatioKind::Sharpe, &request).unwrap(),
            sharpe_ratio(0.04, returns, 0.01).unwrap()
        );
        assert_relative_eq!(
            engine.evaluate(RatioKind::ExcessVar, &request).unwrap(),
            0.3,
            epsilon = 1e-9
        );
        assert_eq!(
            engine.evaluate(RatioKind::Sterling, &request).unwrap(),
            sterling_ratio(0.04, returns, 0.01, 2).unwrap()
        );
    }

    #[test]
    fn test_evaluate_uses_config_defaults() {
        let engine = RatioEngine::new(EngineConfig::new().with_default_alpha(0.2)).unwrap();
        let request = sample_request("p1");

        assert_relative_eq!(
            engine.evaluate(RatioKind::ConditionalSharpe, &request).unwrap(),
            0.15,
            epsilon = 1e-9
        );
        // default_periods = 5 covers every horizon of a 5-return series
        assert!(engine.evaluate(RatioKind::Burke, &request).is_ok());
    }

    #[test]
    fn test_evaluate_missing_series() {
        let engine = RatioEngine::default();
        let request = sample_request("p1");

        let err = engine.evaluate(RatioKind::Treynor, &request).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidInput("treynor ratio requires a market series".to_string())
        );
        assert!(matches!(
            engine.evaluate(RatioKind::Information, &request),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_evaluate_all_skips_unsupported() {
        let engine = RatioEngine::default();
        let report = engine.evaluate_all(&sample_request("p1"));

        assert_eq!(report.id, "p1");
        assert_eq!(report.outcomes.len(), 11);
        assert!(report.outcomes.iter().all(|o| !o.kind.requires_benchmark()));
        assert!(report.value(RatioKind::Treynor).is_none());
    }

    #[test]
    fn test_evaluate_all_with_benchmark_and_market() {
        let engine = RatioEngine::default();
        let benchmark = vec![0.05, -0.1, 0.04, -0.02, 0.1];
        let request = sample_request("p1")
            .with_benchmark(benchmark.clone())
            .with_market(benchmark);

        let report = engine.evaluate_all(&request);

        assert_eq!(report.outcomes.len(), RatioKind::ALL.len());
        assert!(report.is_complete(), "failures: {:?}", report.failures());
    }

    #[test]
    fn test_evaluate_all_reports_failures() {
        let engine = RatioEngine::default();
        let request = PortfolioRequest::new("flat", 0.02, 0.01, vec![0.0; 6]);

        let report = engine.evaluate_all(&request);

        assert_eq!(
            report
                .outcomes
                .iter()
                .find(|o| o.kind == RatioKind::Sharpe)
                .and_then(|o| o.error.clone()),
            Some("Division by zero: volatility is zero".to_string())
        );
        assert!(!report.is_complete());
    }

    #[test]
    fn test_evaluate_batch_preserves_order() {
        let engine = RatioEngine::new(
            EngineConfig::new()
                .with_max_threads(2)
                .with_min_parallel_requests(1),
        )
        .unwrap();

        let requests: Vec<PortfolioRequest> = (0..16)
            .map(|i| {
                let shift = i as f64 * 0.001;
                PortfolioRequest::new(
                    &format!("p{i}"),
                    0.03 + shift,
                    0.01,
                    vec![0.1 + shift, -0.2, 0.1, -0.1, 0.3],
                )
            })
            .collect();

        let reports = engine.evaluate_batch(&requests);

        assert_eq!(reports.len(), requests.len());
        for (request, report) in requests.iter().zip(&reports) {
            assert_eq!(report.id, request.id);
            assert_eq!(report, &engine.evaluate_all(request));
        }
    }

    #[test]
    fn test_worker_pool_built_once_and_shared() {
        let engine = RatioEngine::new(
            EngineConfig::new()
                .with_max_threads(2)
                .with_min_parallel_requests(1),
        )
        .unwrap();
        let clone = engine.clone();

        assert_eq!(engine.worker_threads(), 2);
        assert!(Arc::ptr_eq(
            engine.pool.as_ref().unwrap(),
            clone.pool.as_ref().unwrap()
        ));

        let requests: Vec<PortfolioRequest> =
            (0..6).map(|i| sample_request(&format!("p{i}"))).collect();
        let first = engine.evaluate_batch(&requests);
        let second = clone.evaluate_batch(&requests);
        assert_eq!(first, second);
    }

    #[test]
    fn test_default_engine_uses_global_pool() {
        let engine = RatioEngine::default();
        assert!(engine.pool.is_none());
        assert_eq!(engine.worker_threads(), rayon::current_num_threads());
    }

    #[test]
    fn test_evaluate_batch_sequential_below_threshold() {
        let engine = RatioEngine::default();
        let requests = vec![sample_request("a"), sample_request("b")];

        let reports = engine.evaluate_batch(&requests);

        assert_eq!(reports[0].id, "a");
        assert_eq!(reports[1].id, "b");
        assert_eq!(reports[0].outcomes, reports[1].outcomes);
    }

    #[test]
    fn test_evaluate_batch_empty() {
        let engine = RatioEngine::default();
        assert!(engine.evaluate_batch(&[]).is_empty());
    }
}
