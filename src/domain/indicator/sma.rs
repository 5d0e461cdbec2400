//! Simple Moving Average indicator.
//!
//! SMA(n)[i] = sum(V[i-n+1..=i]) / n
//! Warmup: first (n-1) bars are undefined.

use crate::domain::error::PredtraderError;
use crate::domain::indicator::{check_window, IndicatorSeries, IndicatorType};

pub fn calculate_sma(values: &[f64], window: usize) -> Result<IndicatorSeries, PredtraderError> {
    check_window(IndicatorType::Sma(window), window, values.len())?;

    let mut out = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        if i + 1 < window {
            out.push(None);
        } else {
            let sum: f64 = values[i + 1 - window..=i].iter().sum();
            out.push(Some(sum / window as f64));
        }
    }

    Ok(IndicatorSeries {
        indicator_type: IndicatorType::Sma(window),
        values: out,
    })
}
