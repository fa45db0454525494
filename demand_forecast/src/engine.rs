//! Forecasting engine
//!
//! Groups records per product, projects each eligible product with the base
//! models, applies the market adjustments and assembles the response.

use crate::adjustments::{MarketAdjuster, MarketContext, DEFAULT_KEY};
use crate::assembler::{assemble, ForecastPoint, ForecastResponse, ModelMetadata};
use crate::calendar::Season;
use crate::config::{EmptyForecastPolicy, EngineConfig};
use crate::data::{group_by_product, ProductSeries, SalesRecord};
use crate::error::{ForecastError, Result};
use crate::models::project_base;
use crate::recommendation::recommend;
use crate::utils::{future_dates, horizon_label, round_non_negative};
use rand::{Rng, RngCore};
use tracing::{debug, info, warn};

/// Last value assumed by the speculative fallback when the product sold nothing
const SPECULATIVE_DEFAULT_UNITS: f64 = 10.0;

/// Stateless demand forecaster
#[derive(Debug, Clone, Default)]
pub struct DemandForecaster {
    config: EngineConfig,
}

impl DemandForecaster {
    /// Create a forecaster, validating the configuration
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Forecast every product, drawing fallback noise from the thread RNG
    pub fn forecast(&self, records: Vec<SalesRecord>) -> Result<ForecastResponse> {
        self.forecast_with_rng(records, &mut rand::thread_rng())
    }

    /// Forecast every product with an explicit randomness source
    ///
    /// Given the same records and an identically seeded `rng`, the output is identical.
    pub fn forecast_with_rng(
        &self,
        records: Vec<SalesRecord>,
        rng: &mut dyn RngCore,
    ) -> Result<ForecastResponse> {
        if records.is_empty() {
            return Err(ForecastError::ValidationError(
                "Invalid data format. Expected an array of sales data.".to_string(),
            ));
        }

        info!(records = records.len(), "received data for forecasting");

        let groups = group_by_product(records);
        let mut points = Vec::new();
        let mut projection_failure = None;

        for series in groups.values() {
            if series.len() < self.config.min_observations {
                warn!(
                    product_id = series.product_id(),
                    observations = series.len(),
                    required = self.config.min_observations,
                    "skipping forecast: insufficient data points"
                );
                continue;
            }

            match self.forecast_product(series, rng) {
                Ok(product_points) => points.extend(product_points),
                Err(e) => {
                    warn!(
                        product_id = series.product_id(),
                        error = %e,
                        "skipping forecast: projection failed"
                    );
                    if projection_failure.is_none() {
                        projection_failure = Some(e);
                    }
                }
            }
        }

        if points.is_empty() {
            // eligible products that failed to project report their own error
            if let Some(e) = projection_failure {
                return Err(e);
            }
            points = self.last_resort(&groups.values().collect::<Vec<_>>(), rng)?;
        }

        let recommendations = self
            .config
            .include_recommendations
            .then(|| groups.values().filter_map(recommend).collect());

        let metadata = ModelMetadata {
            model: self.config.model_name.clone(),
            confidence: self.config.confidence,
            factors: self.config.market.factor_names(),
            data_points: points.len(),
            forecast_horizon: horizon_label(self.config.periods, self.config.step_days),
        };

        info!(
            forecast_points = points.len(),
            products = groups.len(),
            "forecast complete"
        );

        Ok(ForecastResponse {
            forecast: assemble(groups.into_values().collect(), points),
            metadata,
            recommendations,
        })
    }

    /// Market-adjusted forecast points for one product series
    pub fn forecast_product(
        &self,
        series: &ProductSeries,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<ForecastPoint>> {
        let (first, last) = match (series.first(), series.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                return Err(ForecastError::ValidationError(format!(
                    "Product {} has no observations",
                    series.product_id()
                )))
            }
        };

        let config = &self.config;
        let base = project_base(
            &series.units(),
            config.periods,
            config.smoothing,
            config.fallback_jitter,
            rng,
        )?;
        debug!(
            product_id = series.product_id(),
            method = ?base.method(),
            "base projection ready"
        );

        let dates = future_dates(last.date, config.periods, config.step_days)?;
        let ctx = MarketContext::new(&first.category, &first.region, &first.price_point);
        let adjuster = MarketAdjuster::new(&config.market);

        Ok(dates
            .into_iter()
            .zip(base.values())
            .map(|(date, &value)| ForecastPoint {
                date,
                product_id: series.product_id().to_string(),
                product_name: first.product_name.clone(),
                forecast: adjuster.adjust(value, date, &ctx) as u64,
                price: last.price,
                competitor_price: last.competitor_price,
                category: first.category.clone(),
                region: first.region.clone(),
                price_point: first.price_point.clone(),
                season: Season::for_date(date),
            })
            .collect())
    }

    /// Handle a request in which no product produced a forecast
    fn last_resort(
        &self,
        series: &[&ProductSeries],
        rng: &mut dyn RngCore,
    ) -> Result<Vec<ForecastPoint>> {
        let reference = series.first().filter(|s| !s.is_empty());

        match (self.config.empty_forecast_policy, reference) {
            (EmptyForecastPolicy::Speculative, Some(reference)) => {
                warn!(
                    product_id = reference.product_id(),
                    "no forecasts generated, using speculative fallback"
                );
                self.speculative_points(reference, rng)
            }
            _ => Err(ForecastError::InsufficientData(format!(
                "no product has the {} observations needed to forecast",
                self.config.min_observations
            ))),
        }
    }

    /// Rough projection off the last observation, varied by +/-20%
    fn speculative_points(
        &self,
        series: &ProductSeries,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<ForecastPoint>> {
        let (first, last) = match (series.first(), series.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Ok(Vec::new()),
        };

        let last_units = if last.units_sold > 0.0 {
            last.units_sold
        } else {
            SPECULATIVE_DEFAULT_UNITS
        };

        let dates = future_dates(last.date, self.config.periods, self.config.step_days)?;
        Ok(dates
            .into_iter()
            .map(|date| {
                let variation = rng.gen_range(0.8..=1.2);
                ForecastPoint {
                    date,
                    product_id: series.product_id().to_string(),
                    product_name: first.product_name.clone(),
                    forecast: round_non_negative(last_units * variation).max(1.0) as u64,
                    price: last.price,
                    competitor_price: last.competitor_price,
                    category: DEFAULT_KEY.to_string(),
                    region: DEFAULT_KEY.to_string(),
                    price_point: DEFAULT_KEY.to_string(),
                    season: Season::for_date(date),
                }
            })
            .collect())
    }
}
