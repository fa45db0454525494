//! Error types for the demand_forecast crate

use demand_math::MathError;
use serde::Serialize;
use thiserror::Error;

/// Custom error types for the demand_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Malformed payload or missing required fields
    #[error("{0}")]
    ValidationError(String),

    /// No product anywhere produced a forecast
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Error from invalid parameters or configuration
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from numeric helpers
    #[error("Math error: {0}")]
    Math(#[from] MathError),

    /// Error from JSON encoding or decoding
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Failure body returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ForecastError {
    /// Whether the caller's input caused the failure
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ForecastError::ValidationError(_)
                | ForecastError::InsufficientData(_)
                | ForecastError::InvalidParameter(_)
                | ForecastError::Json(_)
        )
    }

    /// Shape the error as `{ "error": message }`
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
        }
    }
}
