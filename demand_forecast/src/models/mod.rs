//! Base projection models for unit-sold histories
//!
//! A history long enough for seasonal decomposition goes through
//! [`HoltWinters`]; anything shorter degrades to [`WeightedAverage`].

use crate::error::{ForecastError, Result};
use demand_math::SmoothingParams;
use rand::RngCore;
use std::fmt::Debug;
use tracing::debug;

pub mod holt_winters;
pub mod weighted_average;

pub use holt_winters::{HoltWinters, TrainedHoltWinters};
pub use weighted_average::{TrainedWeightedAverage, WeightedAverage};

/// Which model produced a projection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastMethod {
    HoltWinters { season_length: usize },
    WeightedAverage,
}

/// Forecast result containing projected values
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastResult {
    values: Vec<f64>,
    horizons: usize,
    method: ForecastMethod,
}

impl ForecastResult {
    /// Create a new forecast result
    pub fn new(values: Vec<f64>, horizons: usize, method: ForecastMethod) -> Result<Self> {
        if values.len() != horizons {
            return Err(ForecastError::ValidationError(format!(
                "Values length ({}) doesn't match horizons ({})",
                values.len(),
                horizons
            )));
        }

        Ok(Self {
            values,
            horizons,
            method,
        })
    }

    /// Get the projected values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get the number of periods projected
    pub fn horizons(&self) -> usize {
        self.horizons
    }

    /// Get the model that produced the values
    pub fn method(&self) -> ForecastMethod {
        self.method
    }
}

/// Trained model able to project forward
pub trait TrainedForecastModel: Debug {
    /// Project `horizons` steps past the end of the history
    ///
    /// Models that add noise draw it from `rng`; deterministic models ignore it.
    fn forecast(&self, horizons: usize, rng: &mut dyn RngCore) -> Result<ForecastResult>;

    /// Name of the model
    fn name(&self) -> &str;
}

/// Model that can be trained on a unit-sold history
pub trait ForecastModel: Debug + Clone {
    /// The type of trained model produced
    type Trained: TrainedForecastModel;

    /// Train the model on a history, oldest observation first
    fn train(&self, history: &[f64]) -> Result<Self::Trained>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

/// Season length for a history: shorter histories get shorter seasons
pub fn season_length_for(history_len: usize) -> usize {
    match history_len {
        n if n >= 12 => 4,
        n if n >= 9 => 3,
        _ => 2,
    }
}

/// Project `periods` base values for one product history
///
/// Histories no longer than their season length skip decomposition and use
/// the weighted-average fallback.
pub fn project_base(
    history: &[f64],
    periods: usize,
    params: SmoothingParams,
    jitter: f64,
    rng: &mut dyn RngCore,
) -> Result<ForecastResult> {
    let season_length = season_length_for(history.len());

    if history.len() <= season_length {
        debug!(
            observations = history.len(),
            season_length, "history too short for seasonal decomposition, using weighted average"
        );
        let model = WeightedAverage::new(jitter)?;
        return model.train(history)?.forecast(periods, rng);
    }

    debug!(observations = history.len(), season_length, "using Holt-Winters");
    let model = HoltWinters::new(params, season_length)?;
    model.train(history)?.forecast(periods, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_season_length_for() {
        assert_eq!(season_length_for(3), 2);
        assert_eq!(season_length_for(6), 2);
        assert_eq!(season_length_for(8), 2);
        assert_eq!(season_length_for(9), 3);
        assert_eq!(season_length_for(11), 3);
        assert_eq!(season_length_for(12), 4);
        assert_eq!(season_length_for(52), 4);
    }

    #[test]
    fn test_forecast_result_length_check() {
        assert!(ForecastResult::new(vec![1.0, 2.0], 3, ForecastMethod::WeightedAverage).is_err());
        let result =
            ForecastResult::new(vec![1.0, 2.0], 2, ForecastMethod::WeightedAverage).unwrap();
        assert_eq!(result.horizons(), 2);
        assert_eq!(result.values(), &[1.0, 2.0]);
    }

    #[test]
    fn test_project_base_routes_by_length() {
        let mut rng = StdRng::seed_from_u64(7);
        let params = SmoothingParams::default();

        let short = project_base(&[4.0, 6.0], 4, params, 0.0, &mut rng).unwrap();
        assert_eq!(short.method(), ForecastMethod::WeightedAverage);

        let long = project_base(&[10.0, 12.0, 11.0, 15.0, 14.0, 18.0], 4, params, 0.0, &mut rng)
            .unwrap();
        assert_eq!(long.method(), ForecastMethod::HoltWinters { season_length: 2 });
        assert_eq!(long.horizons(), 4);
    }
}
