//! JSON request boundary
//!
//! Validates the `{ "data": [...] }` payload and turns each row into a
//! [`SalesRecord`]. Rows must already use canonical field names.

use crate::adjustments::DEFAULT_KEY;
use crate::data::SalesRecord;
use crate::error::{ForecastError, Result};
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// A validated forecasting request
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRequest {
    pub data: Vec<SalesRecord>,
}

/// One row as it arrives on the wire
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRecord {
    date: Option<Value>,
    product_id: Option<Value>,
    product_name: Option<Value>,
    units_sold: Option<Value>,
    price: Option<Value>,
    competitor_price: Option<Value>,
    promotion: Option<Value>,
    category: Option<Value>,
    region: Option<Value>,
    price_point: Option<Value>,
}

impl ForecastRequest {
    /// Parse and validate a JSON request body
    pub fn from_json_str(body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body)?;
        Self::from_value(value)
    }

    /// Validate an already-decoded JSON request body
    pub fn from_value(value: Value) -> Result<Self> {
        let rows = match value.get("data").and_then(Value::as_array) {
            Some(rows) if !rows.is_empty() => rows,
            _ => {
                return Err(ForecastError::ValidationError(
                    "Invalid data format. Expected an array of sales data.".to_string(),
                ))
            }
        };

        check_required_fields(&rows[0])?;

        let mut data = Vec::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            let raw: RawRecord = serde_json::from_value(row.clone()).map_err(|e| {
                ForecastError::ValidationError(format!("Record {} is not an object: {}", index, e))
            })?;

            match raw.into_record(index)? {
                Some(record) => data.push(record),
                None => warn!(index, "dropping record without a product identifier"),
            }
        }

        Ok(Self { data })
    }
}

/// The first row decides whether the payload carries the required columns
fn check_required_fields(first: &Value) -> Result<()> {
    let present = |field: &str| first.get(field).and_then(text).is_some();

    let missing: Vec<&str> = ["date", "product_id", "units_sold"]
        .into_iter()
        .filter(|field| !present(*field))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ForecastError::ValidationError(format!(
            "Missing required fields in data: {}",
            missing.join(", ")
        )))
    }
}

impl RawRecord {
    fn into_record(self, index: usize) -> Result<Option<SalesRecord>> {
        let product_id = match self.product_id.as_ref().and_then(text) {
            Some(id) => id,
            None => return Ok(None),
        };

        let date = match self.date.as_ref().and_then(text) {
            Some(raw) => parse_date(&raw).ok_or_else(|| {
                ForecastError::ValidationError(format!(
                    "Record {} has an invalid date: {}",
                    index, raw
                ))
            })?,
            None => {
                return Err(ForecastError::ValidationError(format!(
                    "Record {} is missing a date",
                    index
                )))
            }
        };

        let units_sold = number(self.units_sold.as_ref(), index, "units_sold")?;
        if units_sold < 0.0 {
            return Err(ForecastError::ValidationError(format!(
                "Record {} has negative units_sold: {}",
                index, units_sold
            )));
        }

        let mut record = SalesRecord::new(date, &product_id, units_sold)
            .with_prices(
                number(self.price.as_ref(), index, "price")?.max(0.0),
                number(self.competitor_price.as_ref(), index, "competitor_price")?.max(0.0),
            )
            .with_promotion(self.promotion.as_ref().map(flag).unwrap_or(false))
            .with_category(&label(self.category.as_ref()))
            .with_region(&label(self.region.as_ref()))
            .with_price_point(&label(self.price_point.as_ref()));

        if let Some(name) = self.product_name.as_ref().and_then(text) {
            record = record.with_name(&name);
        }

        Ok(Some(record))
    }
}

/// Non-blank text from a string or number
fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Numeric field; absent, null or blank is 0
fn number(value: Option<&Value>, index: usize, field: &str) -> Result<f64> {
    let parsed = match value {
        None | Some(Value::Null) => Some(0.0),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) if s.trim().is_empty() => Some(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    parsed.filter(|v| v.is_finite()).ok_or_else(|| {
        ForecastError::ValidationError(format!(
            "Record {} has a non-numeric {}",
            index, field
        ))
    })
}

fn flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() == Some(1.0),
        Value::String(s) => matches!(s.trim().to_lowercase().as_str(), "yes" | "true" | "1"),
        _ => false,
    }
}

fn label(value: Option<&Value>) -> String {
    value
        .and_then(text)
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| DEFAULT_KEY.to_string())
}

/// `YYYY-MM-DD` or an RFC 3339 timestamp
fn parse_date(raw: &str) -> Option<NaiveDate> {
    raw.parse::<NaiveDate>()
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}
