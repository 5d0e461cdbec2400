//! Data access port traits.

use crate::domain::error::PredtraderError;
use crate::domain::ohlcv::PriceBar;

/// Source of a cleaned, chronologically sorted bar sequence.
pub trait DataPort {
    fn fetch_bars(&self) -> Result<Vec<PriceBar>, PredtraderError>;
}

/// Source of model predictions, one per bar.
pub trait PredictionPort {
    fn fetch_predictions(&self) -> Result<Vec<f64>, PredtraderError>;
}
