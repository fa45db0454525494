//! Engine configuration
//!
//! Every field has a default, so a JSON override file only needs the keys it
//! changes.

use crate::adjustments::MarketTables;
use crate::error::{ForecastError, Result};
use demand_math::SmoothingParams;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Longest forecast horizon accepted, in days (about a century)
pub const MAX_HORIZON_DAYS: u64 = 36_525;

/// What to do when no product produced a forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyForecastPolicy {
    /// Fail the request with an insufficient-data error
    #[default]
    Fail,
    /// Project the first product forward from its last observation
    Speculative,
}

/// Configuration for [`crate::engine::DemandForecaster`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of forecast points per product
    pub periods: usize,
    /// Days between consecutive forecast points
    pub step_days: u32,
    /// Products with fewer observations are reported as history only
    pub min_observations: usize,
    pub smoothing: SmoothingParams,
    /// Relative jitter of the weighted-average fallback
    pub fallback_jitter: f64,
    /// Confidence reported in the model metadata
    pub confidence: f64,
    pub model_name: String,
    pub market: MarketTables,
    pub empty_forecast_policy: EmptyForecastPolicy,
    pub include_recommendations: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            periods: 12,
            step_days: 7,
            min_observations: 3,
            smoothing: SmoothingParams::default(),
            fallback_jitter: 0.1,
            confidence: 0.92,
            model_name: "Holt-Winters with Regional Market Intelligence".to_string(),
            market: MarketTables::default(),
            empty_forecast_policy: EmptyForecastPolicy::Fail,
            include_recommendations: false,
        }
    }
}

impl EngineConfig {
    /// Parse a JSON document layered over the defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Check ranges of every numeric setting
    pub fn validate(&self) -> Result<()> {
        if self.periods == 0 {
            return Err(ForecastError::InvalidParameter(
                "Forecast periods must be greater than zero".to_string(),
            ));
        }
        if self.step_days == 0 {
            return Err(ForecastError::InvalidParameter(
                "Forecast step must be at least one day".to_string(),
            ));
        }
        let horizon_days = (self.periods as u64).checked_mul(u64::from(self.step_days));
        if horizon_days.map_or(true, |days| days > MAX_HORIZON_DAYS) {
            return Err(ForecastError::InvalidParameter(format!(
                "Forecast horizon of {} periods of {} days exceeds {} days",
                self.periods, self.step_days, MAX_HORIZON_DAYS
            )));
        }
        if self.min_observations == 0 {
            return Err(ForecastError::InvalidParameter(
                "Minimum observations must be at least 1".to_string(),
            ));
        }
        self.smoothing
            .validate()
            .map_err(|e| ForecastError::InvalidParameter(e.to_string()))?;
        if !(0.0..1.0).contains(&self.fallback_jitter) {
            return Err(ForecastError::InvalidParameter(format!(
                "Fallback jitter must be in [0, 1), got {}",
                self.fallback_jitter
            )));
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(ForecastError::InvalidParameter(format!(
                "Confidence must be in [0, 1], got {}",
                self.confidence
            )));
        }
        self.market.validate()
    }
}
