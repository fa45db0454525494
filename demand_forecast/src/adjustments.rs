//! Market adjustment pipeline
//!
//! Turns a base projection into a market-adjusted forecast by applying, in
//! order: calendar-month seasonality, festival boost, regional weather,
//! price elasticity and macro-economic growth. Every factor comes from
//! [`MarketTables`], which callers may replace wholesale.

use crate::calendar::{default_festival_windows, is_festival_period, FestivalWindow, Season};
use crate::error::{ForecastError, Result};
use crate::utils::round_non_negative;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key every table falls back to
pub const DEFAULT_KEY: &str = "default";

/// How strongly a product category responds to price and festivals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategorySensitivity {
    /// Price elasticity exponent
    pub price: f64,
    /// Festival boost multiplier
    pub festival: f64,
}

impl CategorySensitivity {
    pub const NEUTRAL: Self = Self {
        price: 1.0,
        festival: 1.0,
    };

    pub const fn new(price: f64, festival: f64) -> Self {
        Self { price, festival }
    }
}

/// Additive demand impact of the weather per season, for one region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherImpact {
    pub summer: f64,
    pub monsoon: f64,
    pub winter: f64,
    pub spring: f64,
}

impl WeatherImpact {
    pub const NEUTRAL: Self = Self {
        summer: 0.0,
        monsoon: 0.0,
        winter: 0.0,
        spring: 0.0,
    };

    pub const fn new(summer: f64, monsoon: f64, winter: f64, spring: f64) -> Self {
        Self {
            summer,
            monsoon,
            winter,
            spring,
        }
    }

    pub fn for_season(&self, season: Season) -> f64 {
        match season {
            Season::Summer => self.summer,
            Season::Monsoon => self.monsoon,
            Season::Winter => self.winter,
            Season::Spring => self.spring,
        }
    }
}

/// Lookup tables driving the adjustment pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketTables {
    /// Demand multiplier per calendar month, January first
    pub monthly_factors: [f64; 12],
    pub festival_windows: Vec<FestivalWindow>,
    /// Multiplier applied inside a festival window, before category sensitivity
    pub festival_boost: f64,
    pub categories: BTreeMap<String, CategorySensitivity>,
    pub weather: BTreeMap<String, WeatherImpact>,
    /// Growth sensitivity per price tier
    pub segments: BTreeMap<String, f64>,
    /// Annual growth rate fed into the macro stage
    pub growth_rate: f64,
    pub macro_enabled: bool,
}

impl Default for MarketTables {
    fn default() -> Self {
        let categories = [
            ("electronics", CategorySensitivity::new(1.3, 1.5)),
            ("clothing", CategorySensitivity::new(1.1, 1.4)),
            ("food", CategorySensitivity::new(0.9, 1.2)),
            ("home", CategorySensitivity::new(1.0, 1.1)),
            (DEFAULT_KEY, CategorySensitivity::new(1.0, 1.3)),
        ];
        let weather = [
            ("north", WeatherImpact::new(-0.1, -0.3, 0.2, 0.1)),
            ("south", WeatherImpact::new(-0.2, -0.1, 0.1, 0.1)),
            ("east", WeatherImpact::new(-0.15, -0.35, 0.15, 0.1)),
            ("west", WeatherImpact::new(-0.25, -0.2, 0.15, 0.1)),
            (DEFAULT_KEY, WeatherImpact::new(-0.15, -0.25, 0.15, 0.1)),
        ];
        let segments = [
            ("budget", 1.2),
            ("mid", 1.0),
            ("premium", 0.8),
            ("luxury", 0.6),
            (DEFAULT_KEY, 1.0),
        ];

        Self {
            monthly_factors: [
                0.92, 1.05, 1.15, 0.98, 1.22, 1.18, 0.85, 1.08, 1.35, 1.55, 1.30, 1.45,
            ],
            festival_windows: default_festival_windows(),
            festival_boost: 1.3,
            categories: categories
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            weather: weather.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
            segments: segments.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
            growth_rate: 0.065,
            macro_enabled: true,
        }
    }
}

impl MarketTables {
    /// Tables that leave every projection untouched
    pub fn neutral() -> Self {
        Self {
            monthly_factors: [1.0; 12],
            festival_windows: Vec::new(),
            festival_boost: 1.0,
            categories: BTreeMap::new(),
            weather: BTreeMap::new(),
            segments: BTreeMap::new(),
            growth_rate: 0.0,
            macro_enabled: false,
        }
    }

    pub fn category(&self, category: &str) -> CategorySensitivity {
        lookup(&self.categories, category).unwrap_or(CategorySensitivity::NEUTRAL)
    }

    pub fn weather_for(&self, region: &str) -> WeatherImpact {
        lookup(&self.weather, region).unwrap_or(WeatherImpact::NEUTRAL)
    }

    pub fn segment(&self, price_point: &str) -> f64 {
        lookup(&self.segments, price_point).unwrap_or(1.0)
    }

    /// Names of the signals that shape a forecast, for model metadata
    pub fn factor_names(&self) -> Vec<String> {
        let mut names = vec![
            "Historical Trends",
            "Seasonal Patterns",
            "Festival Periods",
            "Regional Weather",
            "Price Elasticity",
        ];
        if self.macro_enabled {
            names.push("Economic Growth");
        }
        names.into_iter().map(String::from).collect()
    }

    /// Reject tables that would produce negative or non-finite multipliers
    pub fn validate(&self) -> Result<()> {
        if let Some(bad) = self
            .monthly_factors
            .iter()
            .find(|f| !f.is_finite() || **f < 0.0)
        {
            return Err(ForecastError::InvalidParameter(format!(
                "Monthly factors must be finite and non-negative, got {}",
                bad
            )));
        }
        if !self.festival_boost.is_finite() || self.festival_boost <= 0.0 {
            return Err(ForecastError::InvalidParameter(format!(
                "Festival boost must be positive, got {}",
                self.festival_boost
            )));
        }
        if !self.growth_rate.is_finite() {
            return Err(ForecastError::InvalidParameter(
                "Growth rate must be finite".to_string(),
            ));
        }
        for window in &self.festival_windows {
            for md in [window.start, window.end] {
                if !(1..=12).contains(&md.month) || !(1..=31).contains(&md.day) {
                    return Err(ForecastError::InvalidParameter(format!(
                        "Festival window '{}' has an invalid date {}/{}",
                        window.name, md.month, md.day
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Look up `key`, falling back to the `"default"` entry
fn lookup<T: Copy>(table: &BTreeMap<String, T>, key: &str) -> Option<T> {
    table
        .get(key)
        .or_else(|| table.get(DEFAULT_KEY))
        .copied()
}

/// Product attributes the pipeline keys its tables on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketContext<'a> {
    pub category: &'a str,
    pub region: &'a str,
    pub price_point: &'a str,
    /// Forecast price over current price; held at 1.0 since prices are not projected
    pub price_ratio: f64,
}

impl<'a> MarketContext<'a> {
    pub fn new(category: &'a str, region: &'a str, price_point: &'a str) -> Self {
        Self {
            category,
            region,
            price_point,
            price_ratio: 1.0,
        }
    }
}

/// The five multipliers for one forecast date
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjustmentFactors {
    pub seasonal: f64,
    pub festival: f64,
    pub weather: f64,
    pub price: f64,
    pub macro_economic: f64,
}

impl AdjustmentFactors {
    /// Apply the factors to `base` in pipeline order
    pub fn apply(&self, base: f64) -> f64 {
        let mut value = base;
        value *= self.seasonal;
        value *= self.festival;
        value *= self.weather;
        value *= self.price;
        value *= self.macro_economic;
        round_non_negative(value)
    }
}

/// Applies [`MarketTables`] to base projections
#[derive(Debug, Clone, Copy)]
pub struct MarketAdjuster<'a> {
    tables: &'a MarketTables,
}

impl<'a> MarketAdjuster<'a> {
    pub fn new(tables: &'a MarketTables) -> Self {
        Self { tables }
    }

    /// Multipliers for a forecast date
    pub fn factors(&self, date: NaiveDate, ctx: &MarketContext<'_>) -> AdjustmentFactors {
        let tables = self.tables;
        let sensitivity = tables.category(ctx.category);

        let seasonal = tables.monthly_factors[date.month0() as usize];

        let festival = if is_festival_period(date, &tables.festival_windows) {
            tables.festival_boost * sensitivity.festival
        } else {
            1.0
        };

        let season = Season::for_date(date);
        let weather = 1.0 + tables.weather_for(ctx.region).for_season(season);

        let price = if ctx.price_ratio > 0.0 && ctx.price_ratio.is_finite() {
            ctx.price_ratio.powf(-sensitivity.price)
        } else {
            1.0
        };

        let macro_economic = if tables.macro_enabled {
            1.0 + tables.growth_rate * tables.segment(ctx.price_point)
        } else {
            1.0
        };

        AdjustmentFactors {
            seasonal,
            festival,
            weather,
            price,
            macro_economic,
        }
    }

    /// Market-adjusted value for `base` on `date`, rounded and non-negative
    pub fn adjust(&self, base: f64, date: NaiveDate, ctx: &MarketContext<'_>) -> f64 {
        self.factors(date, ctx).apply(base)
    }
}
