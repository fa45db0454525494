//! Command line front end: reads a `{ "data": [...] }` request and prints the
//! forecast response as JSON.

use clap::{ArgAction, Parser};
use demand_forecast::{DemandForecaster, EngineConfig, ForecastError, ForecastRequest};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser)]
#[command(
    name = "demand-forecast",
    about = "Forecast retail demand per product from sales history",
    version
)]
struct Cli {
    /// Request file; reads stdin when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// JSON file overriding the engine configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the fallback jitter, for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Include inventory recommendations in the response
    #[arg(long, action = ArgAction::SetTrue)]
    recommend: bool,

    /// Pretty-print the JSON response
    #[arg(long, action = ArgAction::SetTrue)]
    pretty: bool,

    /// Emit logs as JSON lines
    #[arg(long, action = ArgAction::SetTrue)]
    log_json: bool,
}

/// Logs go to stderr so stdout carries only the response
fn init_tracing(json: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = std::env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "demand_forecast=info".to_string());

    if json {
        let _ = fmt()
            .with_env_filter(EnvFilter::new(filter))
            .with_writer(io::stderr)
            .json()
            .try_init();
    } else {
        let _ = fmt()
            .with_env_filter(EnvFilter::new(filter))
            .with_writer(io::stderr)
            .try_init();
    }
}

fn read_request(input: Option<&PathBuf>) -> Result<String, ForecastError> {
    match input {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut body = String::new();
            io::stdin().read_to_string(&mut body)?;
            Ok(body)
        }
    }
}

fn run(cli: &Cli) -> Result<String, ForecastError> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::default(),
    };
    if cli.recommend {
        config.include_recommendations = true;
    }

    let engine = DemandForecaster::new(config)?;
    let request = ForecastRequest::from_json_str(&read_request(cli.input.as_ref())?)?;

    let response = match cli.seed {
        Some(seed) => engine.forecast_with_rng(request.data, &mut StdRng::seed_from_u64(seed))?,
        None => engine.forecast(request.data)?,
    };

    let body = if cli.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    Ok(body)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    match run(&cli) {
        Ok(body) => {
            println!("{}", body);
            info!("response written");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, client_error = e.is_client_error(), "forecast request failed");
            match serde_json::to_string(&e.to_response()) {
                Ok(body) => println!("{}", body),
                Err(_) => println!("{{\"error\":\"{}\"}}", e),
            }
            ExitCode::FAILURE
        }
    }
}
