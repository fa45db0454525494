//! Recency-weighted average for histories too short to decompose

use crate::error::{ForecastError, Result};
use crate::models::{ForecastMethod, ForecastModel, ForecastResult, TrainedForecastModel};
use demand_math::statistics::{half_split_trend, position_weighted_mean};
use rand::{Rng, RngCore};

/// Base level used when there is no history at all
pub const EMPTY_HISTORY_BASE: f64 = 10.0;

/// Histories shorter than this get a flat trend
pub const MIN_TREND_OBSERVATIONS: usize = 4;

/// Position-weighted average model with a half-split trend
#[derive(Debug, Clone)]
pub struct WeightedAverage {
    /// Name of the model
    name: String,
    /// Relative jitter applied to each step, 0 for none
    jitter: f64,
}

/// Trained weighted average model
#[derive(Debug, Clone)]
pub struct TrainedWeightedAverage {
    name: String,
    jitter: f64,
    base: f64,
    trend: f64,
}

impl WeightedAverage {
    /// Create a new weighted average model
    ///
    /// Each projected step is multiplied by a factor drawn uniformly from
    /// `[1 - jitter, 1 + jitter]`.
    pub fn new(jitter: f64) -> Result<Self> {
        if !(0.0..1.0).contains(&jitter) {
            return Err(ForecastError::InvalidParameter(
                "Jitter must be in [0, 1)".to_string(),
            ));
        }

        Ok(Self {
            name: format!("Weighted Average (jitter={})", jitter),
            jitter,
        })
    }
}

impl ForecastModel for WeightedAverage {
    type Trained = TrainedWeightedAverage;

    fn train(&self, history: &[f64]) -> Result<Self::Trained> {
        let base = if history.is_empty() {
            EMPTY_HISTORY_BASE
        } else {
            position_weighted_mean(history)?
        };

        let trend = if history.len() >= MIN_TREND_OBSERVATIONS {
            half_split_trend(history)?
        } else {
            0.0
        };

        Ok(TrainedWeightedAverage {
            name: self.name.clone(),
            jitter: self.jitter,
            base,
            trend,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedWeightedAverage {
    pub fn base(&self) -> f64 {
        self.base
    }

    pub fn trend(&self) -> f64 {
        self.trend
    }
}

impl TrainedForecastModel for TrainedWeightedAverage {
    fn forecast(&self, horizons: usize, rng: &mut dyn RngCore) -> Result<ForecastResult> {
        let values = (0..horizons)
            .map(|i| {
                let factor = if self.jitter > 0.0 {
                    rng.gen_range((1.0 - self.jitter)..=(1.0 + self.jitter))
                } else {
                    1.0
                };
                let value = (self.base + self.trend * (i + 1) as f64) * factor;
                if value.is_finite() {
                    value.round().max(1.0)
                } else {
                    1.0
                }
            })
            .collect();

        ForecastResult::new(values, horizons, ForecastMethod::WeightedAverage)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
