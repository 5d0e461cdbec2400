//! Technical indicator implementations.
//!
//! This module provides types for representing derived per-bar series:
//! - `IndicatorType`: indicator identity + parameters (serves as lookup key)
//! - `IndicatorSeries`: one derived value per bar, `None` until the lookback is filled
//! - `IndicatorSet`: the ordered collection produced by [`compute_indicators`]
//! - `IndicatorConfig`: which indicators to derive

pub mod ema;
pub mod lag;
pub mod rsi;
pub mod sma;

use std::fmt;

use crate::domain::error::PredtraderError;
use crate::domain::ohlcv::{self, PriceBar, PriceField};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Ema(usize),
    Rsi(usize),
    Lag(usize),
}

impl IndicatorType {
    /// Lookback family name used in error messages.
    pub fn family(&self) -> &'static str {
        match self {
            IndicatorType::Sma(_) => "SMA",
            IndicatorType::Ema(_) => "EMA",
            IndicatorType::Rsi(_) => "RSI",
            IndicatorType::Lag(_) => "lag",
        }
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(window) => write!(f, "SMA_{}", window),
            IndicatorType::Ema(span) => write!(f, "EMA_{}", span),
            IndicatorType::Rsi(window) => write!(f, "RSI_{}", window),
            IndicatorType::Lag(k) => write!(f, "lag_{}", k),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<Option<f64>>,
}

impl IndicatorSeries {
    pub fn name(&self) -> String {
        self.indicator_type.to_string()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `index`, `None` when undefined or out of range.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    /// Index of the first defined value.
    pub fn first_defined(&self) -> Option<usize> {
        self.values.iter().position(Option::is_some)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorSet {
    series: Vec<IndicatorSeries>,
}

impl IndicatorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, series: IndicatorSeries) {
        self.series.push(series);
    }

    pub fn get(&self, indicator_type: &IndicatorType) -> Option<&IndicatorSeries> {
        self.series
            .iter()
            .find(|s| &s.indicator_type == indicator_type)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&IndicatorSeries> {
        self.series.iter().find(|s| s.name() == name)
    }

    pub fn names(&self) -> Vec<String> {
        self.series.iter().map(IndicatorSeries::name).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IndicatorSeries> {
        self.series.iter()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Which indicators to derive from a price series.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorConfig {
    pub sma_windows: Vec<usize>,
    pub ema_spans: Vec<usize>,
    pub rsi_window: usize,
    pub lag_count: usize,
    pub lag_column: PriceField,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        IndicatorConfig {
            sma_windows: vec![20, 50],
            ema_spans: vec![20, 50],
            rsi_window: 14,
            lag_count: 5,
            lag_column: PriceField::Close,
        }
    }
}

impl IndicatorConfig {
    /// Check every window, span and the lag count against a series of `len` bars.
    pub fn validate(&self, len: usize) -> Result<(), PredtraderError> {
        for &w in &self.sma_windows {
            check_window(IndicatorType::Sma(w), w, len)?;
        }
        for &s in &self.ema_spans {
            check_window(IndicatorType::Ema(s), s, len)?;
        }
        check_window(IndicatorType::Rsi(self.rsi_window), self.rsi_window, len)?;
        check_lag_count(self.lag_count)
    }

    /// Longest lookback among the configured indicators.
    pub fn max_lookback(&self) -> usize {
        self.sma_windows
            .iter()
            .chain(self.ema_spans.iter())
            .copied()
            .chain([self.rsi_window, self.lag_count])
            .max()
            .unwrap_or(0)
    }
}

pub(crate) fn check_window(
    indicator_type: IndicatorType,
    window: usize,
    len: usize,
) -> Result<(), PredtraderError> {
    if window == 0 || window > len {
        return Err(PredtraderError::InvalidWindow {
            indicator: indicator_type.family().to_string(),
            window,
            len,
        });
    }
    Ok(())
}

pub(crate) fn check_lag_count(count: usize) -> Result<(), PredtraderError> {
    if count < 1 {
        return Err(PredtraderError::InvalidLagCount { count });
    }
    Ok(())
}

/// Derive every configured indicator from `bars`.
///
/// All windows are validated before any series is computed, so a bad
/// configuration never yields a partial set. Order: SMA windows, EMA spans,
/// RSI, then lags 1..=n of the configured column.
pub fn compute_indicators(
    bars: &[PriceBar],
    config: &IndicatorConfig,
) -> Result<IndicatorSet, PredtraderError> {
    config.validate(bars.len())?;

    let closes = ohlcv::closes(bars);
    let mut set = IndicatorSet::new();

    for &w in &config.sma_windows {
        set.push(sma::calculate_sma(&closes, w)?);
    }
    for &s in &config.ema_spans {
        set.push(ema::calculate_ema(&closes, s)?);
    }
    set.push(rsi::calculate_rsi(&closes, config.rsi_window)?);

    let lag_source = ohlcv::column(bars, config.lag_column);
    for series in lag::calculate_lags(&lag_source, config.lag_count)? {
        set.push(series);
    }

    tracing::debug!(indicators = ?set.names(), bars = bars.len(), "computed indicators");
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_bars(prices: &[f64]) -> Vec<PriceBar> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        prices
            .iter()
            .enumerate()
            .map(|(i, &close)| PriceBar {
                timestamp: start + chrono::Duration::hours(i as i64),
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 100.0 + i as f64,
            })
            .collect()
    }

    fn small_config() -> IndicatorConfig {
        IndicatorConfig {
            sma_windows: vec![2, 3],
            ema_spans: vec![3],
            rsi_window: 3,
            lag_count: 2,
            lag_column: PriceField::Close,
        }
    }

    #[test]
    fn indicator_type_display() {
        assert_eq!(IndicatorType::Sma(20).to_string(), "SMA_20");
        assert_eq!(IndicatorType::Ema(50).to_string(), "EMA_50");
        assert_eq!(IndicatorType::Rsi(14).to_string(), "RSI_14");
        assert_eq!(IndicatorType::Lag(3).to_string(), "lag_3");
    }

    #[test]
    fn default_config_matches_documented_defaults() {
        let c = IndicatorConfig::default();
        assert_eq!(c.sma_windows, vec![20, 50]);
        assert_eq!(c.ema_spans, vec![20, 50]);
        assert_eq!(c.rsi_window, 14);
        assert_eq!(c.lag_count, 5);
        assert_eq!(c.lag_column, PriceField::Close);
        assert_eq!(c.max_lookback(), 50);
    }

    #[test]
    fn compute_indicators_order_and_names() {
        let bars = make_bars(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let set = compute_indicators(&bars, &small_config()).unwrap();
        assert_eq!(
            set.names(),
            vec!["SMA_2", "SMA_3", "EMA_3", "RSI_3", "lag_1", "lag_2"]
        );
        for series in set.iter() {
            assert_eq!(series.len(), 5);
        }
    }

    #[test]
    fn compute_indicators_lookup() {
        let bars = make_bars(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let set = compute_indicators(&bars, &small_config()).unwrap();

        let sma3 = set.get(&IndicatorType::Sma(3)).unwrap();
        assert_eq!(sma3.get(1), None);
        assert_eq!(sma3.get(2), Some(2.0));
        assert_eq!(sma3.first_defined(), Some(2));

        let lag2 = set.get_by_name("lag_2").unwrap();
        assert_eq!(lag2.get(4), Some(3.0));
        assert!(set.get_by_name("SMA_99").is_none());
    }

    #[test]
    fn lags_follow_configured_column() {
        let bars = make_bars(&[1.0, 2.0, 3.0]);
        let config = IndicatorConfig {
            lag_column: PriceField::Volume,
            ..small_config()
        };
        let set = compute_indicators(&bars, &config).unwrap();
        let lag1 = set.get(&IndicatorType::Lag(1)).unwrap();
        assert_eq!(lag1.values, vec![None, Some(100.0), Some(101.0)]);
    }

    #[test]
    fn window_longer_than_series_rejected_before_computing() {
        let bars = make_bars(&[1.0, 2.0, 3.0]);
        let err = compute_indicators(&bars, &IndicatorConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            PredtraderError::InvalidWindow {
                window: 20,
                len: 3,
                ..
            }
        ));
    }

    #[test]
    fn zero_window_rejected() {
        let bars = make_bars(&[1.0, 2.0, 3.0]);
        let config = IndicatorConfig {
            ema_spans: vec![0],
            ..small_config()
        };
        let err = compute_indicators(&bars, &config).unwrap_err();
        match err {
            PredtraderError::InvalidWindow { indicator, window, .. } => {
                assert_eq!(indicator, "EMA");
                assert_eq!(window, 0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn zero_lag_count_rejected() {
        let bars = make_bars(&[1.0, 2.0, 3.0]);
        let config = IndicatorConfig {
            lag_count: 0,
            ..small_config()
        };
        let err = compute_indicators(&bars, &config).unwrap_err();
        assert!(matches!(err, PredtraderError::InvalidLagCount { count: 0 }));
    }

    #[test]
    fn empty_bars_rejected() {
        let err = compute_indicators(&[], &small_config()).unwrap_err();
        assert!(matches!(err, PredtraderError::InvalidWindow { len: 0, .. }));
    }
}
