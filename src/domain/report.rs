//! Backtest report: the augmented, bar-aligned output of a run.

use super::indicator::IndicatorSet;
use super::metrics::PredictionMetrics;
use super::ohlcv::PriceBar;
use super::signal::Signal;
use super::simulator::{Simulation, Trade};

/// One bar of the augmented frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub bar: PriceBar,
    pub predicted_close: f64,
    pub signal: Signal,
    pub portfolio_value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestReport {
    pub rows: Vec<ReportRow>,
    pub indicators: IndicatorSet,
    pub trades: Vec<Trade>,
    pub initial_capital: f64,
    pub prediction_metrics: PredictionMetrics,
}

impl BacktestReport {
    /// Zip the inputs and the simulation into one aligned structure.
    ///
    /// Callers guarantee `bars`, `predicted`, `signals` and the simulation's
    /// trajectory share one length.
    pub fn assemble(
        bars: &[PriceBar],
        predicted: &[f64],
        signals: &[Signal],
        simulation: Simulation,
        indicators: IndicatorSet,
        initial_capital: f64,
        prediction_metrics: PredictionMetrics,
    ) -> Self {
        let rows = bars
            .iter()
            .zip(predicted)
            .zip(signals)
            .zip(&simulation.portfolio_values)
            .map(|(((bar, &predicted_close), &signal), &portfolio_value)| ReportRow {
                bar: bar.clone(),
                predicted_close,
                signal,
                portfolio_value,
            })
            .collect();

        BacktestReport {
            rows,
            indicators,
            trades: simulation.trades,
            initial_capital,
            prediction_metrics,
        }
    }

    pub fn portfolio_values(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.portfolio_value).collect()
    }

    pub fn signals(&self) -> Vec<Signal> {
        self.rows.iter().map(|r| r.signal).collect()
    }

    /// Portfolio value at the last bar.
    pub fn final_value(&self) -> f64 {
        self.rows
            .last()
            .map(|r| r.portfolio_value)
            .unwrap_or(self.initial_capital)
    }

    /// final_value / initial_capital - 1
    pub fn total_return(&self) -> f64 {
        self.final_value() / self.initial_capital - 1.0
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
