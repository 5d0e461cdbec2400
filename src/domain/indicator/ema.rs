//! Exponential Moving Average indicator.
//!
//! k = 2/(n+1), EMA[0] = V[0], then EMA[i] = V[i]*k + EMA[i-1]*(1-k).
//! No warmup: the series is seeded with the first value, so every bar is defined.

use crate::domain::error::PredtraderError;
use crate::domain::indicator::{check_window, IndicatorSeries, IndicatorType};

pub fn calculate_ema(values: &[f64], span: usize) -> Result<IndicatorSeries, PredtraderError> {
    check_window(IndicatorType::Ema(span), span, values.len())?;

    let k = 2.0 / (span as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut ema = values[0];
    out.push(Some(ema));

    for &v in &values[1..] {
        ema = v * k + ema * (1.0 - k);
        out.push(Some(ema));
    }

    Ok(IndicatorSeries {
        indicator_type: IndicatorType::Ema(span),
        values: out,
    })
}
