//! # Demand Owl
//!
//! `demand_owl_workspace` bundles the demand forecasting crates behind one
//! dependency.
//!
//! ## Example
//!
//! ```
//! use demand_owl_workspace::forecast_json;
//!
//! let body = r#"{ "data": [
//!     { "date": "2024-01-01", "product_id": "P1", "units_sold": 10 },
//!     { "date": "2024-01-08", "product_id": "P1", "units_sold": 12 },
//!     { "date": "2024-01-15", "product_id": "P1", "units_sold": 11 }
//! ] }"#;
//!
//! let response = forecast_json(body, Default::default()).unwrap();
//! assert_eq!(response.metadata.data_points, 12);
//! ```

pub use demand_forecast;
pub use demand_math;

use demand_forecast::{DemandForecaster, EngineConfig, ForecastRequest, ForecastResponse};

/// Validate a JSON request body and forecast it in one call.
///
/// # Examples
///
/// ```
/// use demand_owl_workspace::forecast_json;
///
/// let err = forecast_json(r#"{ "data": [] }"#, Default::default()).unwrap_err();
/// assert_eq!(err.to_string(), "Invalid data format. Expected an array of sales data.");
/// ```
pub fn forecast_json(
    body: &str,
    config: EngineConfig,
) -> demand_forecast::error::Result<ForecastResponse> {
    let request = ForecastRequest::from_json_str(body)?;
    DemandForecaster::new(config)?.forecast(request.data)
}
