#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use predtrader::domain::error::PredtraderError;
pub use predtrader::domain::ohlcv::PriceBar;
use predtrader::ports::data_port::{DataPort, PredictionPort};

pub struct MockDataPort {
    pub bars: Vec<PriceBar>,
    pub error: Option<String>,
}

impl MockDataPort {
    pub fn new(bars: Vec<PriceBar>) -> Self {
        Self { bars, error: None }
    }

    pub fn with_error(reason: &str) -> Self {
        Self {
            bars: Vec::new(),
            error: Some(reason.to_string()),
        }
    }
}

impl DataPort for MockDataPort {
    fn fetch_bars(&self) -> Result<Vec<PriceBar>, PredtraderError> {
        if let Some(reason) = &self.error {
            return Err(PredtraderError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self.bars.clone())
    }
}

pub struct MockPredictionPort {
    pub predictions: Vec<f64>,
}

impl PredictionPort for MockPredictionPort {
    fn fetch_predictions(&self) -> Result<Vec<f64>, PredtraderError> {
        Ok(self.predictions.clone())
    }
}

pub fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

pub fn make_bar(hour: i64, close: f64) -> PriceBar {
    PriceBar {
        timestamp: start() + chrono::Duration::hours(hour),
        open: close - 1.0,
        high: close + 1.0,
        low: close - 2.0,
        close,
        volume: 1000.0,
    }
}

pub fn bars_from_closes(closes: &[f64]) -> Vec<PriceBar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| make_bar(i as i64, c))
        .collect()
}

/// Deterministic zig-zag around an upward drift.
pub fn generate_closes(count: usize, start_price: f64) -> Vec<f64> {
    (0..count)
        .map(|i| start_price + i as f64 * 0.5 + if i % 3 == 0 { 2.0 } else { -1.0 })
        .collect()
}

pub fn write_prices_csv(closes: &[f64]) -> String {
    let mut out = String::from("timestamp,open,high,low,close,volume\n");
    for bar in bars_from_closes(closes) {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            bar.timestamp.format("%Y-%m-%d %H:%M:%S"),
            bar.open,
            bar.high,
            bar.low,
            bar.close,
            bar.volume
        ));
    }
    out
}

pub fn write_predictions_csv(predictions: &[f64]) -> String {
    let mut out = String::from("predicted_close\n");
    for p in predictions {
        out.push_str(&format!("{}\n", p));
    }
    out
}
