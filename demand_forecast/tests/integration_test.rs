use chrono::{Days, NaiveDate};
use demand_forecast::adjustments::{MarketAdjuster, MarketContext, MarketTables};
use demand_forecast::models::project_base;
use demand_forecast::{
    DemandForecaster, EmptyForecastPolicy, EngineConfig, ForecastEntry, ForecastError,
    ForecastRequest, SalesRecord,
};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn weekly(product_id: &str, units: &[f64]) -> Vec<SalesRecord> {
    units
        .iter()
        .enumerate()
        .map(|(i, &u)| SalesRecord::new(start() + Days::new(7 * i as u64), product_id, u))
        .collect()
}

fn scenario_a() -> Vec<SalesRecord> {
    weekly("P1", &[10.0, 12.0, 11.0, 15.0, 14.0, 18.0])
}

#[test]
fn test_single_product_weekly_history() {
    let response = DemandForecaster::default()
        .forecast_with_rng(scenario_a(), &mut StdRng::seed_from_u64(1))
        .unwrap();

    assert_eq!(response.forecast.len(), 18);
    assert_eq!(response.history().count(), 6);
    assert_eq!(response.forecast_points().count(), 12);

    let last_history = NaiveDate::from_ymd_opt(2024, 2, 5).unwrap();
    let dates: Vec<NaiveDate> = response.forecast_points().map(|e| e.date).collect();
    let expected: Vec<NaiveDate> = (1..=12)
        .map(|k| last_history + Days::new(7 * k))
        .collect();
    assert_eq!(dates, expected);

    // history first, then forecasts, all for the same product
    assert!(response.forecast[..6].iter().all(|e| !e.is_forecast()));
    assert!(response.forecast[6..].iter().all(|e| e.is_forecast()));

    assert_eq!(response.metadata.data_points, 12);
    assert_eq!(response.metadata.forecast_horizon, "12 weeks");
    assert_eq!(response.metadata.confidence, 0.92);
    assert_eq!(
        response.metadata.model,
        "Holt-Winters with Regional Market Intelligence"
    );
}

#[test]
fn test_short_product_is_reported_as_history_only() {
    let mut records = weekly("B", &[5.0, 6.0]);
    records.extend(scenario_a());

    let response = DemandForecaster::default()
        .forecast_with_rng(records, &mut StdRng::seed_from_u64(1))
        .unwrap();

    let b_rows: Vec<ForecastEntry> = response
        .forecast
        .iter()
        .filter(|e| e.product_id == "B")
        .cloned()
        .collect();
    let b_input: Vec<ForecastEntry> = weekly("B", &[5.0, 6.0])
        .into_iter()
        .map(ForecastEntry::from)
        .collect();
    // every field carried over from the input, forecast left null
    assert_eq!(b_rows, b_input);
    assert!(b_rows.iter().all(|e| e.forecast.is_none()));

    assert_eq!(response.forecast_points().count(), 12);
    assert!(response.forecast_points().all(|e| e.product_id == "P1"));
    assert_eq!(response.metadata.data_points, 12);
}

#[test]
fn test_festival_edge_between_adjacent_forecasts() {
    let tables = MarketTables {
        festival_windows: MarketTables::default().festival_windows,
        festival_boost: 1.3,
        ..MarketTables::neutral()
    };
    let config = EngineConfig {
        market: tables,
        periods: 2,
        ..EngineConfig::default()
    };
    // flat history ending 2024-02-12: forecasts fall on Feb 19 and Feb 26
    let records = weekly("P1", &[20.0; 7]);

    let response = DemandForecaster::new(config)
        .unwrap()
        .forecast_with_rng(records, &mut StdRng::seed_from_u64(1))
        .unwrap();
    let points: Vec<(NaiveDate, u64)> = response
        .forecast_points()
        .map(|e| (e.date, e.forecast.unwrap()))
        .collect();

    assert_eq!(
        points,
        vec![
            (NaiveDate::from_ymd_opt(2024, 2, 19).unwrap(), 20),
            (NaiveDate::from_ymd_opt(2024, 2, 26).unwrap(), 26),
        ]
    );
}

#[test]
fn test_output_is_ordered_by_product_then_date() {
    let mut records = weekly("Z", &[3.0, 4.0, 5.0, 6.0]);
    records.extend(weekly("A", &[9.0, 8.0, 7.0]));
    records.extend(weekly("M", &[20.0, 22.0, 21.0, 25.0, 24.0, 28.0, 27.0, 31.0, 30.0]));
    records.reverse();

    let response = DemandForecaster::default()
        .forecast_with_rng(records, &mut StdRng::seed_from_u64(8))
        .unwrap();

    let keys: Vec<(&str, NaiveDate)> = response
        .forecast
        .iter()
        .map(|e| (e.product_id.as_str(), e.date))
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);

    // every eligible product gets exactly the configured horizon
    for id in ["A", "M", "Z"] {
        assert_eq!(
            response.forecast_points().filter(|e| e.product_id == id).count(),
            12
        );
    }
    assert_eq!(response.metadata.data_points, 36);
}

#[test]
fn test_same_seed_same_response() {
    let mut records = scenario_a();
    records.extend(weekly("short", &[4.0, 6.0, 5.0]));
    let engine = DemandForecaster::default();

    let first = engine
        .forecast_with_rng(records.clone(), &mut StdRng::seed_from_u64(2024))
        .unwrap();
    let second = engine
        .forecast_with_rng(records, &mut StdRng::seed_from_u64(2024))
        .unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_neutral_tables_leave_base_projection_untouched() {
    let config = EngineConfig {
        market: MarketTables::neutral(),
        ..EngineConfig::default()
    };
    let engine = DemandForecaster::new(config.clone()).unwrap();
    let response = engine
        .forecast_with_rng(scenario_a(), &mut StdRng::seed_from_u64(1))
        .unwrap();

    let history: Vec<f64> = scenario_a().iter().map(|r| r.units_sold).collect();
    let base = project_base(
        &history,
        config.periods,
        config.smoothing,
        config.fallback_jitter,
        &mut StdRng::seed_from_u64(1),
    )
    .unwrap();

    let forecasts: Vec<f64> = response
        .forecast_points()
        .map(|e| e.forecast.unwrap() as f64)
        .collect();
    assert_eq!(forecasts, base.values().to_vec());
}

#[test]
fn test_forecast_equals_adjusted_base() {
    let records: Vec<SalesRecord> = scenario_a()
        .into_iter()
        .map(|r| {
            r.with_category("electronics")
                .with_region("south")
                .with_price_point("budget")
                .with_prices(120.0, 110.0)
        })
        .collect();
    let config = EngineConfig::default();
    let response = DemandForecaster::default()
        .forecast_with_rng(records.clone(), &mut StdRng::seed_from_u64(1))
        .unwrap();

    let history: Vec<f64> = records.iter().map(|r| r.units_sold).collect();
    let base = project_base(
        &history,
        config.periods,
        config.smoothing,
        config.fallback_jitter,
        &mut StdRng::seed_from_u64(1),
    )
    .unwrap();
    let adjuster = MarketAdjuster::new(&config.market);
    let ctx = MarketContext::new("electronics", "south", "budget");

    for (entry, value) in response.forecast_points().zip(base.values()) {
        assert_eq!(
            entry.forecast.unwrap() as f64,
            adjuster.adjust(*value, entry.date, &ctx)
        );
        assert_eq!(entry.price, 120.0);
        assert_eq!(entry.competitor_price, 110.0);
        assert_eq!(entry.category, "electronics");
    }
}

#[test]
fn test_insufficient_data_everywhere() {
    let err = DemandForecaster::default()
        .forecast_with_rng(weekly("B", &[5.0, 6.0]), &mut StdRng::seed_from_u64(1))
        .unwrap_err();
    assert!(matches!(err, ForecastError::InsufficientData(_)));
    assert!(err.is_client_error());

    let config = EngineConfig {
        empty_forecast_policy: EmptyForecastPolicy::Speculative,
        ..EngineConfig::default()
    };
    let response = DemandForecaster::new(config)
        .unwrap()
        .forecast_with_rng(weekly("B", &[5.0, 6.0]), &mut StdRng::seed_from_u64(1))
        .unwrap();
    assert_eq!(response.forecast_points().count(), 12);
    assert_eq!(response.history().count(), 2);
}

#[test]
fn test_json_request_to_json_response() {
    let body = json!({ "data": [
        { "date": "2024-01-01", "product_id": "P1", "units_sold": 10, "category": "Food", "region": "West" },
        { "date": "2024-01-08", "product_id": "P1", "units_sold": 12 },
        { "date": "2024-01-15", "product_id": "P1", "units_sold": 11 },
        { "date": "2024-01-22", "product_id": "P1", "units_sold": 15 },
        { "date": "2024-01-29", "product_id": "P1", "units_sold": 14 },
        { "date": "2024-02-05", "product_id": "P1", "units_sold": 18 }
    ] });

    let request = ForecastRequest::from_value(body).unwrap();
    let response = DemandForecaster::default()
        .forecast_with_rng(request.data, &mut StdRng::seed_from_u64(1))
        .unwrap();
    let json = serde_json::to_value(&response).unwrap();

    let rows = json["forecast"].as_array().unwrap();
    assert_eq!(rows.len(), 18);
    assert_eq!(rows[0]["date"], "2024-01-01");
    assert_eq!(rows[0]["forecast"], Value::Null);
    assert_eq!(rows[0]["units_sold"], 10.0);
    assert_eq!(rows[6]["units_sold"], Value::Null);
    assert!(rows[6]["forecast"].is_u64());
    assert_eq!(rows[6]["season"], "spring");
    // forecast rows take category and region from the first record
    assert_eq!(rows[6]["category"], "food");
    assert_eq!(rows[6]["region"], "west");

    assert_eq!(json["metadata"]["dataPoints"], 12);
    assert_eq!(json["metadata"]["forecastHorizon"], "12 weeks");
    assert!(json.get("recommendations").is_none());
}
