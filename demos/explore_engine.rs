// This program walks a small sales history through the demand forecasting engine
use demand_forecast::{DemandForecaster, EngineConfig, ForecastRequest};

const REQUEST: &str = r#"{ "data": [
    { "date": "2024-08-05", "product_id": "TV-55", "product_name": "55in TV", "units_sold": 12,
      "price": 42000, "competitor_price": 40500, "category": "Electronics", "region": "North", "price_point": "Premium" },
    { "date": "2024-08-12", "product_id": "TV-55", "units_sold": 15, "price": 42000 },
    { "date": "2024-08-19", "product_id": "TV-55", "units_sold": 13, "price": 42000 },
    { "date": "2024-08-26", "product_id": "TV-55", "units_sold": 18, "price": 41000 },
    { "date": "2024-09-02", "product_id": "TV-55", "units_sold": 16, "price": 41000 },
    { "date": "2024-09-09", "product_id": "TV-55", "units_sold": 21, "price": 41000, "promotion": true },
    { "date": "2024-09-02", "product_id": "RICE-5", "product_name": "Basmati 5kg", "units_sold": 40,
      "category": "Food", "region": "South", "price_point": "Budget" },
    { "date": "2024-09-09", "product_id": "RICE-5", "units_sold": 44 }
] }"#;

fn main() {
    println!("Exploring the demand forecasting engine\n");

    let request = match ForecastRequest::from_json_str(REQUEST) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("Request rejected: {}", e);
            return;
        }
    };
    println!("Parsed {} sales records", request.data.len());

    let config = EngineConfig {
        include_recommendations: true,
        ..EngineConfig::default()
    };
    let engine = match DemandForecaster::new(config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            return;
        }
    };

    let response = match engine.forecast(request.data) {
        Ok(response) => response,
        Err(e) => {
            eprintln!("Forecast failed: {}", e);
            return;
        }
    };

    println!("\n=== Forecast series ===");
    for entry in &response.forecast {
        match (entry.units_sold, entry.forecast) {
            (Some(units), _) => println!(
                "{}  {:<7} history   {:>5}  ({})",
                entry.date, entry.product_id, units, entry.season
            ),
            (None, Some(forecast)) => println!(
                "{}  {:<7} forecast  {:>5}  ({})",
                entry.date, entry.product_id, forecast, entry.season
            ),
            (None, None) => {}
        }
    }

    println!("\n=== Model ===");
    println!("{} (confidence {})", response.metadata.model, response.metadata.confidence);
    println!("Factors: {}", response.metadata.factors.join(", "));
    println!(
        "{} forecast points over {}",
        response.metadata.data_points, response.metadata.forecast_horizon
    );

    if let Some(recommendations) = &response.recommendations {
        println!("\n=== Inventory ===");
        for rec in recommendations {
            println!(
                "{:<7} {} ({}, trend {:+.1}%)",
                rec.product_id, rec.message, rec.outlook, rec.trend_percent
            );
        }
    }

    println!("\nDone exploring");
}
