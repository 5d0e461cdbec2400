//! CSV report adapter: writes the augmented frame one row per bar.
//!
//! Undefined indicator values are written as empty cells.

use crate::domain::error::PredtraderError;
use crate::domain::indicator::IndicatorSet;
use crate::domain::ohlcv::PriceBar;
use crate::domain::report::BacktestReport;
use crate::ports::report_port::ReportPort;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct CsvReportAdapter;

fn report_err(e: impl std::fmt::Display) -> PredtraderError {
    PredtraderError::Data {
        reason: format!("failed to write report: {e}"),
    }
}

fn bar_fields(bar: &PriceBar) -> Vec<String> {
    vec![
        bar.timestamp.format(TIMESTAMP_FORMAT).to_string(),
        bar.open.to_string(),
        bar.high.to_string(),
        bar.low.to_string(),
        bar.close.to_string(),
        bar.volume.to_string(),
    ]
}

fn indicator_fields(indicators: &IndicatorSet, index: usize) -> impl Iterator<Item = String> + '_ {
    indicators
        .iter()
        .map(move |s| s.get(index).map(|v| v.to_string()).unwrap_or_default())
}

fn header(indicators: &IndicatorSet, extra: &[&str]) -> Vec<String> {
    ["timestamp", "open", "high", "low", "close", "volume"]
        .iter()
        .map(|s| s.to_string())
        .chain(indicators.names())
        .chain(extra.iter().map(|s| s.to_string()))
        .collect()
}

impl CsvReportAdapter {
    /// Render the indicator frame as CSV text.
    pub fn render_indicators(
        bars: &[PriceBar],
        indicators: &IndicatorSet,
    ) -> Result<String, PredtraderError> {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.write_record(header(indicators, &[])).map_err(report_err)?;
        for (i, bar) in bars.iter().enumerate() {
            let mut row = bar_fields(bar);
            row.extend(indicator_fields(indicators, i));
            wtr.write_record(&row).map_err(report_err)?;
        }
        finish(wtr)
    }

    /// Render the full backtest frame as CSV text.
    pub fn render_report(report: &BacktestReport) -> Result<String, PredtraderError> {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.write_record(header(
            &report.indicators,
            &["predicted_close", "signal", "portfolio_value"],
        ))
        .map_err(report_err)?;
        for (i, row) in report.rows.iter().enumerate() {
            let mut fields = bar_fields(&row.bar);
            fields.extend(indicator_fields(&report.indicators, i));
            fields.push(row.predicted_close.to_string());
            fields.push(row.signal.to_string());
            fields.push(row.portfolio_value.to_string());
            wtr.write_record(&fields).map_err(report_err)?;
        }
        finish(wtr)
    }
}

fn finish(wtr: csv::Writer<Vec<u8>>) -> Result<String, PredtraderError> {
    let bytes = wtr.into_inner().map_err(report_err)?;
    String::from_utf8(bytes).map_err(report_err)
}

impl ReportPort for CsvReportAdapter {
    fn write_indicators(
        &self,
        bars: &[PriceBar],
        indicators: &IndicatorSet,
        output_path: &str,
    ) -> Result<(), PredtraderError> {
        let content = Self::render_indicators(bars, indicators)?;
        std::fs::write(output_path, content)?;
        Ok(())
    }

    fn write(&self, report: &BacktestReport, output_path: &str) -> Result<(), PredtraderError> {
        let content = Self::render_report(report)?;
        std::fs::write(output_path, content)?;
        Ok(())
    }
}
