//! # Demand Forecast
//!
//! A Rust library for per-product retail demand forecasting with regional
//! market adjustments.
//!
//! ## Features
//!
//! - Sales history handling (typed records, grouping per product)
//! - Base models (Holt-Winters with multiplicative seasonality, weighted-average fallback)
//! - Market adjustments (monthly seasonality, festival windows, regional weather,
//!   price elasticity, macro-economic growth per price segment)
//! - Forecast assembly with model metadata and optional inventory recommendations
//!
//! ## Adjustment Tables
//!
//! All market tables live in [`adjustments::MarketTables`] and fall back to a
//! `"default"` entry for unknown categories, regions and price points. Tables can
//! be overridden through an [`EngineConfig`] JSON file.
//!
//! ## Quick Start
//!
//! ```rust
//! use demand_forecast::{DemandForecaster, ForecastRequest};
//!
//! let body = r#"{ "data": [
//!     { "date": "2024-01-01", "product_id": "P1", "units_sold": 10 },
//!     { "date": "2024-01-08", "product_id": "P1", "units_sold": 12 },
//!     { "date": "2024-01-15", "product_id": "P1", "units_sold": 11 },
//!     { "date": "2024-01-22", "product_id": "P1", "units_sold": 15 },
//!     { "date": "2024-01-29", "product_id": "P1", "units_sold": 14 },
//!     { "date": "2024-02-05", "product_id": "P1", "units_sold": 18 }
//! ] }"#;
//!
//! let request = ForecastRequest::from_json_str(body).unwrap();
//! let response = DemandForecaster::default().forecast(request.data).unwrap();
//!
//! assert_eq!(response.forecast_points().count(), 12);
//! assert_eq!(response.metadata.forecast_horizon, "12 weeks");
//! ```

pub mod adjustments;
pub mod assembler;
pub mod calendar;
pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod models;
pub mod recommendation;
pub mod request;
pub mod utils;

// Re-export commonly used types
pub use crate::assembler::{ForecastEntry, ForecastResponse, ModelMetadata};
pub use crate::config::{EmptyForecastPolicy, EngineConfig};
pub use crate::data::{ProductSeries, SalesRecord};
pub use crate::engine::DemandForecaster;
pub use crate::error::{ErrorResponse, ForecastError};
pub use crate::models::{ForecastModel, ForecastResult};
pub use crate::request::ForecastRequest;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
