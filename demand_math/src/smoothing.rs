//! Holt smoothing state
//!
//! Level/trend state for additive-trend exponential smoothing. The seasonal
//! part of Holt-Winters lives with the model; this module only advances the
//! de-seasonalised level and its trend.

use crate::{MathError, Result};
use serde::{Deserialize, Serialize};

/// Smoothing factors for level, trend and seasonal components
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingParams {
    /// Level smoothing factor
    pub alpha: f64,
    /// Trend smoothing factor
    pub beta: f64,
    /// Seasonal smoothing factor
    pub gamma: f64,
}

impl Default for SmoothingParams {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            beta: 0.3,
            gamma: 0.7,
        }
    }
}

impl SmoothingParams {
    /// Create smoothing parameters, rejecting factors outside [0, 1]
    pub fn new(alpha: f64, beta: f64, gamma: f64) -> Result<Self> {
        let params = Self { alpha, beta, gamma };
        params.validate()?;
        Ok(params)
    }

    /// Check that every factor is a weight in [0, 1]
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("Alpha", self.alpha), ("Beta", self.beta), ("Gamma", self.gamma)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(MathError::InvalidInput(format!(
                    "{} must be between 0 and 1 (inclusive), got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Additive level and trend carried between forecast steps
#[derive(Debug, Clone, PartialEq)]
pub struct LevelTrend {
    alpha: f64,
    beta: f64,
    level: f64,
    trend: f64,
}

impl LevelTrend {
    /// Start from an initial level and trend
    pub fn new(params: SmoothingParams, level: f64, trend: f64) -> Result<Self> {
        params.validate()?;
        if !level.is_finite() || !trend.is_finite() {
            return Err(MathError::CalculationError(format!(
                "Initial state must be finite (level={}, trend={})",
                level, trend
            )));
        }

        Ok(Self {
            alpha: params.alpha,
            beta: params.beta,
            level,
            trend,
        })
    }

    /// Blend a de-seasonalised observation into the state
    ///
    /// `level' = alpha * value + (1 - alpha) * (level + trend)`
    /// `trend' = beta * (level' - level) + (1 - beta) * trend`
    pub fn update(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }

        let new_level = self.alpha * value + (1.0 - self.alpha) * (self.level + self.trend);
        let new_trend = self.beta * (new_level - self.level) + (1.0 - self.beta) * self.trend;

        self.level = new_level;
        self.trend = new_trend;
    }

    /// Level plus `h` steps of trend
    pub fn projection(&self, h: usize) -> f64 {
        self.level + h as f64 * self.trend
    }

    /// Get the current level
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Get the current trend
    pub fn trend(&self) -> f64 {
        self.trend
    }
}
