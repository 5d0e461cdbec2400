//! Core domain types and logic.

pub mod ohlcv;
pub mod indicator;
pub mod signal;
pub mod simulator;
pub mod metrics;
pub mod report;
pub mod backtest;
pub mod config_validation;
pub mod error;
