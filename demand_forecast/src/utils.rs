//! Utility functions for the demand_forecast crate

use crate::error::{ForecastError, Result};
use chrono::{Days, NaiveDate};

/// Create the forecast dates following `last_date`, `step_days` apart
pub fn future_dates(
    last_date: NaiveDate,
    horizon: usize,
    step_days: u32,
) -> Result<Vec<NaiveDate>> {
    if step_days == 0 {
        return Err(ForecastError::InvalidParameter(
            "Forecast step must be at least one day".to_string(),
        ));
    }

    let mut dates = Vec::with_capacity(horizon);
    let mut current = last_date;

    for _ in 0..horizon {
        current = current
            .checked_add_days(Days::new(u64::from(step_days)))
            .ok_or_else(|| {
                ForecastError::InvalidParameter(format!(
                    "Forecast date overflows the calendar after {}",
                    current
                ))
            })?;
        dates.push(current);
    }

    Ok(dates)
}

/// Human-readable horizon such as "12 weeks"
pub fn horizon_label(periods: usize, step_days: u32) -> String {
    match step_days {
        7 => format!("{} weeks", periods),
        1 => format!("{} days", periods),
        _ => format!("{} periods of {} days", periods, step_days),
    }
}

/// Clamp to zero and round to the nearest integer; non-finite input becomes 0
pub fn round_non_negative(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0).round()
    } else {
        0.0
    }
}
