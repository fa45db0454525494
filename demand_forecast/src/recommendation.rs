//! Inventory guidance from recent sales
//!
//! Looks at the last six observations of a product: their average and the
//! change between the older and newer three. Shorter series split at
//! `len / 2`, so an odd row lands in the newer half.

use crate::data::ProductSeries;
use demand_math::statistics::mean;
use serde::Serialize;

/// Observations considered for a recommendation
pub const RECENT_WINDOW: usize = 6;

/// Inventory action for a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InventoryAction {
    StockUp,
    Maintain,
    ReduceOrders,
    PhaseOut,
}

impl InventoryAction {
    pub fn message(&self) -> &'static str {
        match self {
            InventoryAction::StockUp => "Stock up on this product",
            InventoryAction::Maintain => "Maintain current inventory",
            InventoryAction::ReduceOrders => "Reduce order frequency",
            InventoryAction::PhaseOut => "Consider phasing out",
        }
    }

    /// How long the product is expected to stay viable
    pub fn outlook(&self) -> &'static str {
        match self {
            InventoryAction::StockUp => "6+ months",
            InventoryAction::Maintain => "3-6 months",
            InventoryAction::ReduceOrders => "2-3 months",
            InventoryAction::PhaseOut => "1-2 months",
        }
    }
}

/// Recommendation for one product
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub product_id: String,
    pub action: InventoryAction,
    pub message: String,
    pub outlook: String,
    /// Average units sold over the recent window
    pub average_units: f64,
    /// Change of the newer half over the older half, in percent
    pub trend_percent: f64,
    pub trending_up: bool,
}

/// Recommend an inventory action, or `None` for an empty series
pub fn recommend(series: &ProductSeries) -> Option<Recommendation> {
    let units = series.units();
    let recent = &units[units.len().saturating_sub(RECENT_WINDOW)..];
    let average = mean(recent).ok()?;

    let split = recent.len() / 2;
    let (older, newer) = if split == 0 {
        (recent, recent)
    } else {
        recent.split_at(split)
    };
    let older_avg = mean(older).ok()?;
    let newer_avg = mean(newer).ok()?;
    let trend = newer_avg - older_avg;

    let trend_percent = if older_avg.abs() > f64::EPSILON {
        trend / older_avg * 100.0
    } else {
        0.0
    };

    let action = match (trend > 0.0, average) {
        (true, avg) if avg > 15.0 => InventoryAction::StockUp,
        (true, _) => InventoryAction::Maintain,
        (false, avg) if avg > 10.0 => InventoryAction::ReduceOrders,
        (false, _) => InventoryAction::PhaseOut,
    };

    Some(Recommendation {
        product_id: series.product_id().to_string(),
        action,
        message: action.message().to_string(),
        outlook: action.outlook().to_string(),
        average_units: average,
        trend_percent,
        trending_up: trend > 0.0,
    })
}
