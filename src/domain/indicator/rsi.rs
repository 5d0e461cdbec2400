//! RSI (Relative Strength Index) indicator.
//!
//! Average gain and loss are simple rolling means over the last n bar-to-bar
//! changes (gains zero-filled on down bars, losses zero-filled on up bars):
//!
//! RSI = 100 - (100 / (1 + avg_gain / avg_loss))
//!
//! If avg_loss == 0: RSI = 100. If both averages are 0 (flat run): RSI = 50.
//!
//! Warmup: first n bars are undefined (the first change lives at bar 1).

use crate::domain::error::PredtraderError;
use crate::domain::indicator::{check_window, IndicatorSeries, IndicatorType};

pub const NEUTRAL_RSI: f64 = 50.0;

pub fn calculate_rsi(values: &[f64], period: usize) -> Result<IndicatorSeries, PredtraderError> {
    check_window(IndicatorType::Rsi(period), period, values.len())?;

    // changes[j] is the move into bar j + 1
    let changes: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();
    let gains: Vec<f64> = changes.iter().map(|&c| if c > 0.0 { c } else { 0.0 }).collect();
    let losses: Vec<f64> = changes.iter().map(|&c| if c < 0.0 { -c } else { 0.0 }).collect();

    let mut out = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        if i < period {
            out.push(None);
            continue;
        }
        let window = i - period..i;
        let avg_gain = gains[window.clone()].iter().sum::<f64>() / period as f64;
        let avg_loss = losses[window].iter().sum::<f64>() / period as f64;
        out.push(Some(rsi_from_averages(avg_gain, avg_loss)));
    }

    Ok(IndicatorSeries {
        indicator_type: IndicatorType::Rsi(period),
        values: out,
    })
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        if avg_gain == 0.0 { NEUTRAL_RSI } else { 100.0 }
    } else {
        100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
    }
}
