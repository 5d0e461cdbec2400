//! Lagged copies of a column.
//!
//! LAG(k)[i] = V[i-k], undefined for i < k.

use crate::domain::error::PredtraderError;
use crate::domain::indicator::{check_lag_count, IndicatorSeries, IndicatorType};

pub fn lag_series(values: &[f64], k: usize) -> IndicatorSeries {
    let out = (0..values.len())
        .map(|i| if i < k { None } else { Some(values[i - k]) })
        .collect();

    IndicatorSeries {
        indicator_type: IndicatorType::Lag(k),
        values: out,
    }
}

/// Lags 1..=count of `values`.
pub fn calculate_lags(
    values: &[f64],
    count: usize,
) -> Result<Vec<IndicatorSeries>, PredtraderError> {
    check_lag_count(count)?;
    Ok((1..=count).map(|k| lag_series(values, k)).collect())
}
