//! Backtest entry point.
//!
//! Signals and the position simulation run in one pass over bars the caller
//! has already augmented with indicators and model predictions.

use super::error::PredtraderError;
use super::indicator::IndicatorSet;
use super::metrics::PredictionMetrics;
use super::ohlcv::{self, PriceBar};
use super::report::BacktestReport;
use super::signal::generate_signals;
use super::simulator::PositionSimulator;

pub const DEFAULT_INITIAL_CAPITAL: f64 = 1000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestConfig {
    pub initial_capital: f64,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        BacktestConfig {
            initial_capital: DEFAULT_INITIAL_CAPITAL,
        }
    }
}

/// Run the prediction-driven long/flat strategy over `bars`.
///
/// `indicators` is carried into the report untouched.
pub fn run_backtest(
    bars: &[PriceBar],
    predicted: &[f64],
    indicators: IndicatorSet,
    config: &BacktestConfig,
) -> Result<BacktestReport, PredtraderError> {
    let simulator = PositionSimulator::new(config.initial_capital)?;
    ohlcv::validate_chronological(bars)?;

    let close = ohlcv::closes(bars);
    let signals = generate_signals(&close, predicted)?;
    let simulation = simulator.run(&close, &signals)?;
    let prediction_metrics = PredictionMetrics::compute(&close, predicted)?;

    Ok(BacktestReport::assemble(
        bars,
        predicted,
        &signals,
        simulation,
        indicators,
        config.initial_capital,
        prediction_metrics,
    ))
}
