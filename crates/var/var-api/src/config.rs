//! Forecast run configuration.

use serde::{Deserialize, Serialize};
use var_spi::{InformationCriterion, VarError};

/// Largest lag order compared during selection.
pub const DEFAULT_MAX_LAGS: usize = 15;
/// Months forecast past the last observation.
pub const DEFAULT_STEPS: usize = 15;
/// Longest forecast horizon accepted.
pub const MAX_STEPS: usize = 600;
/// Coverage of the forecast interval.
pub const DEFAULT_INTERVAL_LEVEL: f64 = 0.95;

/// Configuration for a select-fit-forecast run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VarConfig {
    /// Upper bound for lag-order selection
    pub max_lags: usize,
    /// Number of periods to forecast
    pub steps: usize,
    /// Criterion used to pick the lag order
    pub criterion: InformationCriterion,
    /// Forecast interval coverage in (0, 1)
    pub interval_level: f64,
}

impl Default for VarConfig {
    fn default() -> Self {
        Self {
            max_lags: DEFAULT_MAX_LAGS,
            steps: DEFAULT_STEPS,
            criterion: InformationCriterion::Aic,
            interval_level: DEFAULT_INTERVAL_LEVEL,
        }
    }
}

impl VarConfig {
    pub fn builder() -> VarConfigBuilder {
        VarConfigBuilder::new()
    }

    /// Check ranges; deserialized configs bypass the builder.
    pub fn validate(&self) -> Result<(), VarError> {
        if self.steps == 0 {
            return Err(VarError::invalid_parameter("steps", "must be at least 1"));
        }
        if self.steps > MAX_STEPS {
            return Err(VarError::invalid_parameter(
                "steps",
                format!("must be at most {}, got {}", MAX_STEPS, self.steps),
            ));
        }
        if !(self.interval_level > 0.0 && self.interval_level < 1.0) {
            return Err(VarError::invalid_parameter(
                "interval_level",
                format!("must be in (0, 1), got {}", self.interval_level),
            ));
        }
        Ok(())
    }
}

/// Builder for VarConfig.
#[derive(Debug, Default)]
pub struct VarConfigBuilder {
    max_lags: Option<usize>,
    steps: Option<usize>,
    criterion: Option<InformationCriterion>,
    interval_level: Option<f64>,
}

impl VarConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_lags(mut self, max_lags: usize) -> Self {
        self.max_lags = Some(max_lags);
        self
    }

    pub fn steps(mut self, steps: usize) -> Self {
        self.steps = Some(steps);
        self
    }

    pub fn criterion(mut self, criterion: InformationCriterion) -> Self {
        self.criterion = Some(criterion);
        self
    }

    pub fn interval_level(mut self, level: f64) -> Self {
        self.interval_level = Some(level);
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<VarConfig, VarError> {
        let defaults = VarConfig::default();
        let config = VarConfig {
            max_lags: self.max_lags.unwrap_or(defaults.max_lags),
            steps: self.steps.unwrap_or(defaults.steps),
            criterion: self.criterion.unwrap_or(defaults.criterion),
            interval_level: self.interval_level.unwrap_or(defaults.interval_level),
        };
        config.validate()?;
        Ok(config)
    }
}
