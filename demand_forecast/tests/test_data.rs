use chrono::{Days, NaiveDate};
use demand_forecast::calendar::Season;
use demand_forecast::data::group_by_product;
use demand_forecast::recommendation::{recommend, InventoryAction};
use demand_forecast::{ProductSeries, SalesRecord};

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, d).unwrap()
}

#[test]
fn test_builders_lowercase_attributes() {
    let record = SalesRecord::new(date(10, 20), "P7", 3.0)
        .with_name("Lamp")
        .with_category("HOME")
        .with_region("East")
        .with_price_point("Mid")
        .with_prices(499.0, 520.0)
        .with_promotion(true);

    assert_eq!(record.product_name, "Lamp");
    assert_eq!(record.category, "home");
    assert_eq!(record.region, "east");
    assert_eq!(record.price_point, "mid");
    assert_eq!(record.season, Season::Winter);
    assert!(record.promotion);
}

#[test]
fn test_grouping_preserves_every_record() {
    let records: Vec<SalesRecord> = (1..=9)
        .map(|d| SalesRecord::new(date(5, d), if d % 3 == 0 { "X" } else { "Y" }, d as f64))
        .collect();

    let groups = group_by_product(records);
    let total: usize = groups.values().map(ProductSeries::len).sum();

    assert_eq!(total, 9);
    assert_eq!(groups["X"].units(), vec![3.0, 6.0, 9.0]);
    assert!(groups["Y"]
        .records()
        .windows(2)
        .all(|w| w[0].date <= w[1].date));
}

#[test]
fn test_record_serializes_with_lowercase_season() {
    let record = SalesRecord::new(date(8, 15), "P1", 4.0);
    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json["date"], "2024-08-15");
    assert_eq!(json["season"], "monsoon");
}

#[test]
fn test_recommendation_for_declining_low_seller() {
    let records = (0..6u64)
        .map(|i| SalesRecord::new(date(1, 1) + Days::new(7 * i), "P1", 9.0 - i as f64))
        .collect();
    let rec = recommend(&ProductSeries::new("P1", records)).unwrap();

    assert_eq!(rec.action, InventoryAction::PhaseOut);
    assert_eq!(rec.outlook, "1-2 months");
    assert!(!rec.trending_up);
}
