//! Engine configuration.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Defaults for optional ratio parameters and batch execution settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Tail fraction used when a request has no `alpha`.
    pub default_alpha: f64,

    /// Partial moment threshold used when a request has no `target`.
    pub default_target: f64,

    /// Worst-drawdown count used when a request has no `periods`.
    pub default_periods: usize,

    /// Maximum number of worker threads for batches (0 = rayon default).
    pub max_threads: usize,

    /// Batches smaller than this run sequentially.
    pub min_parallel_requests: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_alpha: 0.05,
            default_target: 0.0,
            default_periods: 5,
            max_threads: 0,
            min_parallel_requests: 4,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_alpha(mut self, alpha: f64) -> Self {
        self.default_alpha = alpha;
        self
    }

    pub fn with_default_target(mut self, target: f64) -> Self {
        self.default_target = target;
        self
    }

    pub fn with_default_periods(mut self, periods: usize) -> Self {
        self.default_periods = periods;
        self
    }

    pub fn with_max_threads(mut self, max_threads: usize) -> Self {
        self.max_threads = max_threads;
        self
    }

    pub fn with_min_parallel_requests(mut self, min_parallel_requests: usize) -> Self {
        self.min_parallel_requests = min_parallel_requests;
        self
    }

    /// Check the defaults against the same rules applied to request parameters.
    pub fn validate(&self) -> Result<()> {
        if !(self.default_alpha > 0.0 && self.default_alpha < 1.0) {
            return Err(Error::InvalidInput(format!(
                "default_alpha must be in (0, 1), got {}",
                self.default_alpha
            )));
        }
        if !self.default_target.is_finite() {
            return Err(Error::InvalidInput(format!(
                "default_target must be finite, got {}",
                self.default_target
            )));
        }
        if self.default_periods == 0 {
            return Err(Error::InvalidInput(
                "default_periods must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_config_default() {
        let config = EngineConfig::default();

        assert_eq!(config.default_alpha, 0.05);
        assert_eq!(config.default_target, 0.0);
        assert_eq!(config.default_periods, 5);
        assert_eq!(config.max_threads, 0);
        assert_eq!(config.min_parallel_requests, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_engine_config_builder() {
        let config = EngineConfig::new()
            .with_default_alpha(0.01)
            .with_default_periods(3)
            .with_max_threads(2);

        assert_eq!(config.default_alpha, 0.01);
        assert_eq!(config.default_periods, 3);
        assert_eq!(config.max_threads, 2);
    }

    #[test]
    fn test_engine_config_validate() {
        assert!(EngineConfig::new().with_default_alpha(1.0).validate().is_err());
        assert!(EngineConfig::new().with_default_periods(0).validate().is_err());
        assert!(EngineConfig::new()
            .with_default_target(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_engine_config_partial_json() {
        let config: EngineConfig = serde_json::from_str(r#"{"default_alpha": 0.1}"#).unwrap();

        assert_eq!(config.default_alpha, 0.1);
        assert_eq!(config.default_periods, 5);
    }
}
