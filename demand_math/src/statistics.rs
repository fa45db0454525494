//! Averaging and trend helpers
//!
//! Contains the small statistics the forecasting models are built from:
//! - Arithmetic and position-weighted means
//! - First-difference and half-split trend estimates
//! - Guarded ratios and sum normalisation

use crate::{MathError, Result};
use statrs::statistics::Statistics;

/// Magnitudes at or below this are treated as zero by the guarded helpers.
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Arithmetic mean of the values
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot average an empty series".to_string(),
        ));
    }

    Ok(values.iter().mean())
}

/// Mean weighted by position, so the i-th value (0-based) carries weight `i + 1`.
///
/// Later observations dominate, which makes this a cheap recency-biased level.
pub fn position_weighted_mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot average an empty series".to_string(),
        ));
    }

    let (sum, weight_sum) = values
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(sum, weights), (i, &value)| {
            let weight = (i + 1) as f64;
            (sum + value * weight, weights + weight)
        });

    Ok(sum / weight_sum)
}

/// Average period-over-period change across the whole series
pub fn mean_first_difference(values: &[f64]) -> Result<f64> {
    if values.len() < 2 {
        return Err(MathError::InsufficientData(format!(
            "Need at least 2 values for a first difference, have {}",
            values.len()
        )));
    }

    let total: f64 = values.windows(2).map(|pair| pair[1] - pair[0]).sum();
    Ok(total / (values.len() - 1) as f64)
}

/// Average change per period between the first two seasons of length `season_length`
///
/// Each position-in-season contributes `(values[m + i] - values[i]) / m`, and the
/// contributions are averaged over the season.
pub fn seasonal_trend(values: &[f64], season_length: usize) -> Result<f64> {
    if season_length == 0 {
        return Err(MathError::InvalidInput(
            "Season length must be greater than zero".to_string(),
        ));
    }
    if values.len() < 2 * season_length {
        return Err(MathError::InsufficientData(format!(
            "Need two full seasons ({} values), have {}",
            2 * season_length,
            values.len()
        )));
    }

    let m = season_length as f64;
    let total: f64 = (0..season_length)
        .map(|i| (values[season_length + i] - values[i]) / m)
        .sum();

    Ok(total / m)
}

/// Trend estimated as the gap between the newer and older half means,
/// divided by the half length.
///
/// With an odd length the middle value belongs to neither half.
pub fn half_split_trend(values: &[f64]) -> Result<f64> {
    if values.len() < 2 {
        return Err(MathError::InsufficientData(format!(
            "Need at least 2 values to split a series, have {}",
            values.len()
        )));
    }

    let half = values.len() / 2;
    let older = mean(&values[..half])?;
    let newer = mean(&values[values.len() - half..])?;

    Ok((newer - older) / half as f64)
}

/// `numerator / denominator`, or `neutral` when the denominator is at or below `floor`
/// or the quotient is not finite.
pub fn guarded_ratio(numerator: f64, denominator: f64, floor: f64, neutral: f64) -> f64 {
    if denominator <= floor {
        return neutral;
    }

    let ratio = numerator / denominator;
    if ratio.is_finite() {
        ratio
    } else {
        neutral
    }
}

/// Rescale `values` so they sum to `target`.
///
/// A sum at or below `DEFAULT_EPSILON` yields an even split of the target.
pub fn normalize_to_sum(values: &[f64], target: f64) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }

    let sum: f64 = values.iter().sum();
    if sum <= DEFAULT_EPSILON || !sum.is_finite() {
        let even = target / values.len() as f64;
        return vec![even; values.len()];
    }

    values.iter().map(|v| v * target / sum).collect()
}
