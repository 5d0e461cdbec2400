//! Report generation port trait.

use crate::domain::error::PredtraderError;
use crate::domain::indicator::IndicatorSet;
use crate::domain::ohlcv::PriceBar;
use crate::domain::report::BacktestReport;

/// Port for writing the augmented frame.
pub trait ReportPort {
    /// Bars plus derived indicator columns, before any predictions exist.
    fn write_indicators(
        &self,
        bars: &[PriceBar],
        indicators: &IndicatorSet,
        output_path: &str,
    ) -> Result<(), PredtraderError>;

    fn write(&self, report: &BacktestReport, output_path: &str) -> Result<(), PredtraderError>;
}
