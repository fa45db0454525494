//! Sales records and per-product series

use crate::adjustments::DEFAULT_KEY;
use crate::calendar::Season;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One canonical historical observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub date: NaiveDate,
    pub product_id: String,
    pub product_name: String,
    pub units_sold: f64,
    pub price: f64,
    pub competitor_price: f64,
    pub promotion: bool,
    /// Lower-cased product category
    pub category: String,
    /// Lower-cased sales region
    pub region: String,
    /// Lower-cased price tier
    pub price_point: String,
    pub season: Season,
}

impl SalesRecord {
    /// Create a record with default attributes for everything but the essentials
    pub fn new(date: NaiveDate, product_id: &str, units_sold: f64) -> Self {
        Self {
            date,
            product_id: product_id.to_string(),
            product_name: format!("Product {}", product_id),
            units_sold,
            price: 0.0,
            competitor_price: 0.0,
            promotion: false,
            category: DEFAULT_KEY.to_string(),
            region: DEFAULT_KEY.to_string(),
            price_point: DEFAULT_KEY.to_string(),
            season: Season::for_date(date),
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.product_name = name.to_string();
        self
    }

    pub fn with_prices(mut self, price: f64, competitor_price: f64) -> Self {
        self.price = price;
        self.competitor_price = competitor_price;
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = category.to_lowercase();
        self
    }

    pub fn with_region(mut self, region: &str) -> Self {
        self.region = region.to_lowercase();
        self
    }

    pub fn with_price_point(mut self, price_point: &str) -> Self {
        self.price_point = price_point.to_lowercase();
        self
    }

    pub fn with_promotion(mut self, promotion: bool) -> Self {
        self.promotion = promotion;
        self
    }
}

/// Chronologically ordered history of a single product
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSeries {
    product_id: String,
    records: Vec<SalesRecord>,
}

impl ProductSeries {
    /// Build a series, sorting records by date
    ///
    /// The sort is stable, so same-date records keep their input order.
    pub fn new(product_id: &str, mut records: Vec<SalesRecord>) -> Self {
        records.sort_by_key(|r| r.date);
        Self {
            product_id: product_id.to_string(),
            records,
        }
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<SalesRecord> {
        self.records
    }

    /// Units sold, oldest first
    pub fn units(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.units_sold).collect()
    }

    pub fn first(&self) -> Option<&SalesRecord> {
        self.records.first()
    }

    pub fn last(&self) -> Option<&SalesRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Partition records into one date-ordered series per product, keyed by product id
pub fn group_by_product(records: Vec<SalesRecord>) -> BTreeMap<String, ProductSeries> {
    let mut buckets: BTreeMap<String, Vec<SalesRecord>> = BTreeMap::new();
    for record in records {
        buckets
            .entry(record.product_id.clone())
            .or_default()
            .push(record);
    }

    buckets
        .into_iter()
        .map(|(id, records)| {
            let series = ProductSeries::new(&id, records);
            (id, series)
        })
        .collect()
}
