//! # Demand Math
//!
//! Numeric building blocks for demand forecasting.
//! This crate provides the averaging, trend estimation and smoothing-state
//! calculations used by the forecasting engine, with guards that keep
//! degenerate inputs from producing `NaN` or infinite values.

use thiserror::Error;

pub mod smoothing;
pub mod statistics;

pub use smoothing::{LevelTrend, SmoothingParams};

/// Errors that can occur in demand calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for demand math operations
pub type Result<T> = std::result::Result<T, MathError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MathError::InsufficientData("need 2 values".to_string());
        assert_eq!(
            err.to_string(),
            "Insufficient data for calculation: need 2 values"
        );
    }
}
