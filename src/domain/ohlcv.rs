//! OHLCV bar representation.

use chrono::NaiveDateTime;
use std::fmt;
use std::str::FromStr;

use super::error::PredtraderError;

#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PriceBar {
    pub fn field(&self, field: PriceField) -> f64 {
        match field {
            PriceField::Open => self.open,
            PriceField::High => self.high,
            PriceField::Low => self.low,
            PriceField::Close => self.close,
            PriceField::Volume => self.volume,
        }
    }
}

/// A numeric column of a [`PriceBar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceField {
    Open,
    High,
    Low,
    Close,
    Volume,
}

impl fmt::Display for PriceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PriceField::Open => "open",
            PriceField::High => "high",
            PriceField::Low => "low",
            PriceField::Close => "close",
            PriceField::Volume => "volume",
        };
        f.write_str(name)
    }
}

impl FromStr for PriceField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(PriceField::Open),
            "high" => Ok(PriceField::High),
            "low" => Ok(PriceField::Low),
            "close" => Ok(PriceField::Close),
            "volume" => Ok(PriceField::Volume),
            other => Err(format!("unknown price column '{other}'")),
        }
    }
}

/// Extract one column from a bar sequence.
pub fn column(bars: &[PriceBar], field: PriceField) -> Vec<f64> {
    bars.iter().map(|b| b.field(field)).collect()
}

pub fn closes(bars: &[PriceBar]) -> Vec<f64> {
    column(bars, PriceField::Close)
}

/// Fails on the first bar whose timestamp is not strictly after its predecessor.
pub fn validate_chronological(bars: &[PriceBar]) -> Result<(), PredtraderError> {
    match bars
        .windows(2)
        .position(|w| w[1].timestamp <= w[0].timestamp)
    {
        Some(i) => Err(PredtraderError::UnorderedTimestamps { index: i + 1 }),
        None => Ok(()),
    }
}
