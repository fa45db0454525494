//! Forecast assembly: history and projections merged into one series

use crate::calendar::Season;
use crate::data::{ProductSeries, SalesRecord};
use crate::recommendation::Recommendation;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A generated, market-adjusted future point for one product
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub product_id: String,
    pub product_name: String,
    pub forecast: u64,
    pub price: f64,
    pub competitor_price: f64,
    pub category: String,
    pub region: String,
    pub price_point: String,
    pub season: Season,
}

/// One row of the output series, historical or forecast
///
/// Historical rows carry `forecast: null`; forecast rows carry `units_sold: null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub date: NaiveDate,
    pub product_id: String,
    pub product_name: String,
    pub units_sold: Option<f64>,
    pub forecast: Option<u64>,
    pub price: f64,
    pub competitor_price: f64,
    pub promotion: bool,
    pub category: String,
    pub region: String,
    pub price_point: String,
    pub season: Season,
}

impl ForecastEntry {
    pub fn is_forecast(&self) -> bool {
        self.forecast.is_some()
    }
}

impl From<SalesRecord> for ForecastEntry {
    fn from(record: SalesRecord) -> Self {
        Self {
            date: record.date,
            product_id: record.product_id,
            product_name: record.product_name,
            units_sold: Some(record.units_sold),
            forecast: None,
            price: record.price,
            competitor_price: record.competitor_price,
            promotion: record.promotion,
            category: record.category,
            region: record.region,
            price_point: record.price_point,
            season: record.season,
        }
    }
}

impl From<ForecastPoint> for ForecastEntry {
    fn from(point: ForecastPoint) -> Self {
        Self {
            date: point.date,
            product_id: point.product_id,
            product_name: point.product_name,
            units_sold: None,
            forecast: Some(point.forecast),
            price: point.price,
            competitor_price: point.competitor_price,
            promotion: false,
            category: point.category,
            region: point.region,
            price_point: point.price_point,
            season: point.season,
        }
    }
}

/// Summary of how a forecast was produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelMetadata {
    pub model: String,
    pub confidence: f64,
    pub factors: Vec<String>,
    /// Number of forecast points generated
    pub data_points: usize,
    pub forecast_horizon: String,
}

/// Success body of a forecasting request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastResponse {
    pub forecast: Vec<ForecastEntry>,
    pub metadata: ModelMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<Recommendation>>,
}

impl ForecastResponse {
    /// Rows that are forecasts, in output order
    pub fn forecast_points(&self) -> impl Iterator<Item = &ForecastEntry> {
        self.forecast.iter().filter(|e| e.is_forecast())
    }

    /// Rows that are history, in output order
    pub fn history(&self) -> impl Iterator<Item = &ForecastEntry> {
        self.forecast.iter().filter(|e| !e.is_forecast())
    }
}

/// Merge every product's history with the generated points
///
/// Output is ordered by product id, then date; history precedes forecasts of
/// the same product because every forecast date follows the last observation.
pub fn assemble(series: Vec<ProductSeries>, points: Vec<ForecastPoint>) -> Vec<ForecastEntry> {
    let mut entries: Vec<ForecastEntry> = series
        .into_iter()
        .flat_map(ProductSeries::into_records)
        .map(ForecastEntry::from)
        .chain(points.into_iter().map(ForecastEntry::from))
        .collect();

    entries.sort_by(|a, b| {
        a.product_id
            .cmp(&b.product_id)
            .then_with(|| a.date.cmp(&b.date))
    });

    entries
}
