//! Configuration validation.
//!
//! Turns raw config values into validated [`BacktestConfig`] and
//! [`IndicatorConfig`] structs. Missing keys fall back to documented defaults;
//! present but malformed keys are errors.

use crate::domain::backtest::BacktestConfig;
use crate::domain::error::PredtraderError;
use crate::domain::indicator::IndicatorConfig;
use crate::domain::ohlcv::PriceField;
use crate::ports::config_port::ConfigPort;

pub fn build_backtest_config(config: &dyn ConfigPort) -> Result<BacktestConfig, PredtraderError> {
    let defaults = BacktestConfig::default();
    let initial_capital = match config.get_string("backtest", "initial_capital") {
        None => defaults.initial_capital,
        Some(raw) => raw.trim().parse::<f64>().map_err(|_| {
            invalid("backtest", "initial_capital", format!("'{raw}' is not a number"))
        })?,
    };
    if !(initial_capital.is_finite() && initial_capital > 0.0) {
        return Err(invalid(
            "backtest",
            "initial_capital",
            "initial_capital must be positive".to_string(),
        ));
    }
    Ok(BacktestConfig { initial_capital })
}

pub fn build_indicator_config(config: &dyn ConfigPort) -> Result<IndicatorConfig, PredtraderError> {
    let defaults = IndicatorConfig::default();

    let sma_windows = match config.get_string("indicators", "sma_windows") {
        None => defaults.sma_windows,
        Some(raw) => parse_window_list(&raw, "sma_windows")?,
    };
    let ema_spans = match config.get_string("indicators", "ema_spans") {
        None => defaults.ema_spans,
        Some(raw) => parse_window_list(&raw, "ema_spans")?,
    };
    let rsi_window = match config.get_string("indicators", "rsi_window") {
        None => defaults.rsi_window,
        Some(raw) => parse_positive(&raw, "rsi_window")?,
    };
    let lag_count = match config.get_string("indicators", "lag_count") {
        None => defaults.lag_count,
        Some(raw) => parse_positive(&raw, "lag_count")?,
    };
    let lag_column = match config.get_string("indicators", "lag_column") {
        None => defaults.lag_column,
        Some(raw) => raw
            .parse::<PriceField>()
            .map_err(|reason| invalid("indicators", "lag_column", reason))?,
    };

    Ok(IndicatorConfig {
        sma_windows,
        ema_spans,
        rsi_window,
        lag_count,
        lag_column,
    })
}

fn parse_window_list(raw: &str, key: &str) -> Result<Vec<usize>, PredtraderError> {
    let items: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if items.is_empty() {
        return Err(invalid("indicators", key, "at least one window is required".into()));
    }
    items.into_iter().map(|s| parse_positive(s, key)).collect()
}

fn parse_positive(raw: &str, key: &str) -> Result<usize, PredtraderError> {
    match raw.trim().parse::<usize>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(invalid(
            "indicators",
            key,
            format!("'{}' is not a positive integer", raw.trim()),
        )),
    }
}

fn invalid(section: &str, key: &str, reason: String) -> PredtraderError {
    PredtraderError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason,
    }
}
