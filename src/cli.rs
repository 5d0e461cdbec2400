//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::{CsvAdapter, CsvPredictionAdapter};
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::backtest::{self as backtest_engine, BacktestConfig};
use crate::domain::config_validation::{build_backtest_config, build_indicator_config};
use crate::domain::error::PredtraderError;
use crate::domain::indicator::{compute_indicators, IndicatorConfig, IndicatorSet};
use crate::domain::ohlcv::{validate_chronological, PriceBar};
use crate::domain::report::BacktestReport;
use crate::ports::data_port::{DataPort, PredictionPort};
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "predtrader", about = "Indicator derivation and prediction-driven backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Derive indicator and lag columns from a price file
    Indicators {
        #[arg(short, long)]
        prices: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Simulate the long/flat strategy from model predictions
    Backtest {
        #[arg(short, long)]
        prices: PathBuf,
        #[arg(long)]
        predictions: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Indicators {
            prices,
            config,
            output,
        } => run_indicators(&prices, config.as_ref(), output.as_ref()),
        Command::Backtest {
            prices,
            predictions,
            config,
            output,
        } => run_backtest(&prices, &predictions, config.as_ref(), output.as_ref()),
        Command::Validate { config } => run_validate(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, PredtraderError> {
    FileConfigAdapter::from_file(path).map_err(|e| PredtraderError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Validated settings from an optional config file; defaults when absent.
pub fn load_settings(
    config_path: Option<&PathBuf>,
) -> Result<(BacktestConfig, IndicatorConfig), PredtraderError> {
    match config_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading config");
            let adapter = load_config(path)?;
            Ok((
                build_backtest_config(&adapter)?,
                build_indicator_config(&adapter)?,
            ))
        }
        None => Ok((BacktestConfig::default(), IndicatorConfig::default())),
    }
}

pub fn run_indicators_pipeline(
    data_port: &dyn DataPort,
    indicator_config: &IndicatorConfig,
) -> Result<(Vec<PriceBar>, IndicatorSet), PredtraderError> {
    let bars = data_port.fetch_bars()?;
    validate_chronological(&bars)?;
    let indicators = compute_indicators(&bars, indicator_config)?;
    tracing::info!(
        bars = bars.len(),
        columns = indicators.len(),
        "indicators computed"
    );
    Ok((bars, indicators))
}

pub fn run_backtest_pipeline(
    data_port: &dyn DataPort,
    prediction_port: &dyn PredictionPort,
    indicator_config: &IndicatorConfig,
    bt_config: &BacktestConfig,
) -> Result<BacktestReport, PredtraderError> {
    let bars = data_port.fetch_bars()?;
    validate_chronological(&bars)?;
    // indicator columns are informational here; a short series still backtests
    let indicators = match compute_indicators(&bars, indicator_config) {
        Ok(set) => set,
        Err(PredtraderError::InvalidWindow {
            indicator,
            window,
            len,
        }) => {
            tracing::warn!(
                indicator = %indicator,
                window,
                len,
                "series too short for configured indicators, report has no indicator columns"
            );
            IndicatorSet::new()
        }
        Err(e) => return Err(e),
    };
    let predictions = prediction_port.fetch_predictions()?;

    tracing::info!(
        bars = bars.len(),
        initial_capital = bt_config.initial_capital,
        "running backtest"
    );
    backtest_engine::run_backtest(&bars, &predictions, indicators, bt_config)
}

pub fn print_summary(report: &BacktestReport) {
    let trades = report.trades.len();
    let closed: Vec<f64> = report.trades.iter().filter_map(|t| t.pnl()).collect();
    let winners = closed.iter().filter(|&&p| p > 0.0).count();
    let m = &report.prediction_metrics;

    eprintln!("\n=== Backtest Results ===");
    eprintln!("Bars:             {}", report.len());
    eprintln!("Initial Capital:  {:.2}", report.initial_capital);
    eprintln!("Final Value:      {:.2}", report.final_value());
    eprintln!("Total Return:     {:.2}%", report.total_return() * 100.0);
    eprintln!("Entries:          {}", trades);
    eprintln!("Closed Trades:    {} ({} winning)", closed.len(), winners);

    eprintln!("\n=== Prediction Error ===");
    eprintln!("MSE:              {:.6}", m.mse);
    eprintln!("RMSE:             {:.6}", m.rmse);
    eprintln!("MAE:              {:.6}", m.mae);
    eprintln!("R-squared:        {:.4}", m.r_squared);
}

fn run_indicators(
    prices: &PathBuf,
    config_path: Option<&PathBuf>,
    output_path: Option<&PathBuf>,
) -> Result<(), PredtraderError> {
    let (_, indicator_config) = load_settings(config_path)?;
    let data_port = CsvAdapter::new(prices.clone());
    let (bars, indicators) = run_indicators_pipeline(&data_port, &indicator_config)?;

    let output = output_path
        .cloned()
        .unwrap_or_else(|| PathBuf::from("indicators.csv"));
    CsvReportAdapter.write_indicators(&bars, &indicators, &output.to_string_lossy())?;
    eprintln!("Indicators written to: {}", output.display());
    Ok(())
}

fn run_backtest(
    prices: &PathBuf,
    predictions: &PathBuf,
    config_path: Option<&PathBuf>,
    output_path: Option<&PathBuf>,
) -> Result<(), PredtraderError> {
    let (bt_config, indicator_config) = load_settings(config_path)?;
    let data_port = CsvAdapter::new(prices.clone());
    let prediction_port = CsvPredictionAdapter::new(predictions.clone());

    let report =
        run_backtest_pipeline(&data_port, &prediction_port, &indicator_config, &bt_config)?;
    print_summary(&report);

    let output = output_path
        .cloned()
        .unwrap_or_else(|| PathBuf::from("backtest.csv"));
    CsvReportAdapter.write(&report, &output.to_string_lossy())?;
    eprintln!("\nReport written to: {}", output.display());
    Ok(())
}

fn run_validate(config_path: &PathBuf) -> Result<(), PredtraderError> {
    let (bt_config, ind) = load_settings(Some(config_path))?;

    eprintln!("\nBacktest:");
    eprintln!("  initial_capital: {}", bt_config.initial_capital);
    eprintln!("\nIndicators:");
    eprintln!("  sma_windows: {:?}", ind.sma_windows);
    eprintln!("  ema_spans:   {:?}", ind.ema_spans);
    eprintln!("  rsi_window:  {}", ind.rsi_window);
    eprintln!("  lag_count:   {} (column {})", ind.lag_count, ind.lag_column);
    eprintln!("  minimum bars: {}", ind.max_lookback());
    eprintln!("\nConfig is valid");
    Ok(())
}
