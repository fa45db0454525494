//! Holt-Winters decomposition with additive trend and multiplicative seasonality
//!
//! - Level starts at the mean of the first season
//! - Trend starts at the per-period change between the first two seasons,
//!   or the mean first difference when only one season is available
//! - Seasonal indices are mean observation/level ratios per position-in-season
//!   over every full cycle, normalised to sum to the season length
//! - Forecast: `(level + h * trend) * s[(n + h - 1) mod m]`

use crate::error::{ForecastError, Result};
use crate::models::{ForecastMethod, ForecastModel, ForecastResult, TrainedForecastModel};
use crate::utils::round_non_negative;
use demand_math::statistics::{
    guarded_ratio, mean, mean_first_difference, normalize_to_sum, seasonal_trend, DEFAULT_EPSILON,
};
use demand_math::{LevelTrend, MathError, SmoothingParams};
use rand::RngCore;

/// Levels at or below this give a neutral seasonal ratio
pub const LEVEL_FLOOR: f64 = 0.1;

/// Holt-Winters model
#[derive(Debug, Clone)]
pub struct HoltWinters {
    /// Name of the model
    name: String,
    params: SmoothingParams,
    season_length: usize,
}

/// Trained Holt-Winters model
#[derive(Debug, Clone)]
pub struct TrainedHoltWinters {
    name: String,
    season_length: usize,
    /// Number of observations in the training history
    observations: usize,
    state: LevelTrend,
    seasonal_indices: Vec<f64>,
    last_observation: f64,
}

impl HoltWinters {
    /// Create a new Holt-Winters model
    ///
    /// `gamma` is validated and carried but the seasonal indices are fixed
    /// once estimated; only level and trend are smoothed forward.
    pub fn new(params: SmoothingParams, season_length: usize) -> Result<Self> {
        params.validate()?;
        if season_length == 0 {
            return Err(ForecastError::InvalidParameter(
                "Season length must be positive".to_string(),
            ));
        }

        Ok(Self {
            name: format!(
                "Holt-Winters (alpha={}, beta={}, gamma={}, season={})",
                params.alpha, params.beta, params.gamma, season_length
            ),
            params,
            season_length,
        })
    }

    /// Get the season length
    pub fn season_length(&self) -> usize {
        self.season_length
    }

    /// Get the smoothing parameters
    pub fn params(&self) -> SmoothingParams {
        self.params
    }

    fn seasonal_indices(&self, history: &[f64], level: f64) -> Vec<f64> {
        let m = self.season_length;
        let cycles = history.len() / m;

        let raw: Vec<f64> = (0..m)
            .map(|position| {
                let ratios: Vec<f64> = (0..cycles)
                    .map(|cycle| {
                        guarded_ratio(history[cycle * m + position], level, LEVEL_FLOOR, 1.0)
                    })
                    .collect();
                mean(&ratios).unwrap_or(1.0)
            })
            .collect();

        normalize_to_sum(&raw, m as f64)
    }
}

impl ForecastModel for HoltWinters {
    type Trained = TrainedHoltWinters;

    fn train(&self, history: &[f64]) -> Result<Self::Trained> {
        let m = self.season_length;
        if history.len() <= m {
            return Err(MathError::InsufficientData(format!(
                "Holt-Winters needs more than {} observations, have {}",
                m,
                history.len()
            ))
            .into());
        }

        let level = mean(&history[..m])?;
        let trend = if history.len() >= 2 * m {
            seasonal_trend(history, m)?
        } else {
            mean_first_difference(history)?
        };

        let seasonal_indices = self.seasonal_indices(history, level);
        let state = LevelTrend::new(self.params, level, trend)?;

        Ok(TrainedHoltWinters {
            name: self.name.clone(),
            season_length: m,
            observations: history.len(),
            state,
            seasonal_indices,
            last_observation: history[history.len() - 1],
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedHoltWinters {
    /// Normalised seasonal index per position-in-season
    pub fn seasonal_indices(&self) -> &[f64] {
        &self.seasonal_indices
    }

    /// Get the season length
    pub fn season_length(&self) -> usize {
        self.season_length
    }

    /// Get the level at the end of the history
    pub fn level(&self) -> f64 {
        self.state.level()
    }

    /// Get the trend at the end of the history
    pub fn trend(&self) -> f64 {
        self.state.trend()
    }
}

impl TrainedForecastModel for TrainedHoltWinters {
    fn forecast(&self, horizons: usize, _rng: &mut dyn RngCore) -> Result<ForecastResult> {
        let m = self.season_length;
        let last_index = self.seasonal_indices[(self.observations - 1) % m];
        let mut state = self.state.clone();
        let mut values = Vec::with_capacity(horizons);

        for i in 0..horizons {
            let seasonal = self.seasonal_indices[(self.observations + i) % m];
            values.push(round_non_negative(state.projection(i + 1) * seasonal));

            if i + 1 < horizons && last_index > DEFAULT_EPSILON {
                state.update(self.last_observation / last_index);
            }
        }

        ForecastResult::new(
            values,
            horizons,
            ForecastMethod::HoltWinters { season_length: m },
        )
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn train(history: &[f64], m: usize) -> TrainedHoltWinters {
        HoltWinters::new(SmoothingParams::default(), m)
            .unwrap()
            .train(history)
            .unwrap()
    }

    #[test]
    fn test_initial_state_with_two_seasons() {
        let trained = train(&[10.0, 12.0, 11.0, 15.0, 14.0, 18.0], 2);

        assert_relative_eq!(trained.level(), 11.0);
        // ((11 - 10) / 2 + (15 - 12) / 2) / 2
        assert_relative_eq!(trained.trend(), 1.0);

        let indices = trained.seasonal_indices();
        assert_relative_eq!(indices[0], 0.875, epsilon = 1e-12);
        assert_relative_eq!(indices[1], 1.125, epsilon = 1e-12);
    }

    #[test]
    fn test_trend_falls_back_to_first_differences() {
        // 5 observations, season of 3: only one full season
        let trained = train(&[10.0, 20.0, 30.0, 40.0, 50.0], 3);
        assert_relative_eq!(trained.level(), 20.0);
        assert_relative_eq!(trained.trend(), 10.0);
    }

    #[test]
    fn test_indices_sum_to_season_length() {
        let history = [5.0, 9.0, 3.0, 7.0, 6.0, 10.0, 2.0, 8.0, 7.0, 11.0, 4.0, 9.0];
        let trained = train(&history, 4);
        let sum: f64 = trained.seasonal_indices().iter().sum();
        assert_relative_eq!(sum, 4.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_history_stays_finite() {
        let trained = train(&[0.0, 0.0, 0.0, 0.0], 2);
        assert_eq!(trained.seasonal_indices(), &[1.0, 1.0]);

        let mut rng = StdRng::seed_from_u64(1);
        let result = trained.forecast(5, &mut rng).unwrap();
        assert!(result.values().iter().all(|v| v.is_finite() && *v == 0.0));
    }

    #[test]
    fn test_forecast_first_steps() {
        let trained = train(&[10.0, 12.0, 11.0, 15.0, 14.0, 18.0], 2);
        let mut rng = StdRng::seed_from_u64(1);
        let result = trained.forecast(2, &mut rng).unwrap();

        // step 1: (11 + 1) * s[0], next phase after six observations
        assert_eq!(result.values()[0], (12.0 * trained.seasonal_indices()[0]).round());
        // update with 18 / 1.125 = 16: level 14, trend 1.6
        // step 2: (14 + 2 * 1.6) * 1.125 = 19.35
        assert_eq!(result.values()[1], 19.0);
    }

    #[test]
    fn test_declining_history_clamps_at_zero() {
        let trained = train(&[50.0, 40.0, 30.0, 20.0, 10.0, 0.0], 2);
        let mut rng = StdRng::seed_from_u64(1);
        let result = trained.forecast(12, &mut rng).unwrap();
        assert!(result.values().iter().all(|v| *v >= 0.0));
        // (45 - 10) * 1.2
        assert_eq!(result.values()[0], 42.0);
    }

    #[test]
    fn test_history_must_exceed_season() {
        let model = HoltWinters::new(SmoothingParams::default(), 3).unwrap();
        assert!(model.train(&[1.0, 2.0, 3.0]).is_err());
        assert!(HoltWinters::new(SmoothingParams::default(), 0).is_err());
    }
}
