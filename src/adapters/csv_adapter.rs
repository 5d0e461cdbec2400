//! CSV file data adapters.
//!
//! Price files are cleaned on load: rows are sorted by timestamp, repeated
//! timestamps keep their first row, and empty numeric cells are forward-filled
//! then back-filled from neighbouring bars.

use crate::domain::error::PredtraderError;
use crate::domain::ohlcv::PriceBar;
use crate::ports::data_port::{DataPort, PredictionPort};
use chrono::{NaiveDate, NaiveDateTime};
use std::fs;
use std::path::PathBuf;

const NUMERIC_COLUMNS: [&str; 5] = ["open", "high", "low", "close", "volume"];

const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn data_err(reason: String) -> PredtraderError {
    PredtraderError::Data { reason }
}

fn read_file(path: &PathBuf) -> Result<String, PredtraderError> {
    fs::read_to_string(path)
        .map_err(|e| data_err(format!("failed to read {}: {}", path.display(), e)))
}

fn header_index(headers: &csv::StringRecord, names: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| names.iter().any(|n| h.trim().eq_ignore_ascii_case(n)))
}

struct RawRow {
    timestamp: NaiveDateTime,
    cells: [Option<f64>; 5],
}

pub struct CsvAdapter {
    path: PathBuf,
}

impl CsvAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_rows(&self) -> Result<Vec<RawRow>, PredtraderError> {
        let content = read_file(&self.path)?;
        let mut rdr = csv::Reader::from_reader(content.as_bytes());

        let headers = rdr
            .headers()
            .map_err(|e| data_err(format!("CSV header error: {}", e)))?
            .clone();
        let ts_idx = header_index(&headers, &["timestamp", "date", "datetime"])
            .ok_or_else(|| data_err("missing timestamp column".into()))?;
        let mut col_idx = [0usize; 5];
        for (slot, name) in col_idx.iter_mut().zip(NUMERIC_COLUMNS) {
            *slot = header_index(&headers, &[name])
                .ok_or_else(|| data_err(format!("missing {} column", name)))?;
        }

        let mut rows = Vec::new();
        for (line, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| data_err(format!("CSV parse error: {}", e)))?;

            let ts_str = record.get(ts_idx).unwrap_or_default();
            let timestamp = parse_timestamp(ts_str).ok_or_else(|| {
                data_err(format!("invalid timestamp '{}' on row {}", ts_str, line + 1))
            })?;

            let mut cells = [None; 5];
            for (cell, (&idx, name)) in cells.iter_mut().zip(col_idx.iter().zip(NUMERIC_COLUMNS)) {
                let raw = record.get(idx).unwrap_or_default().trim();
                if raw.is_empty() {
                    continue;
                }
                let value: f64 = raw.parse().map_err(|e| {
                    data_err(format!("invalid {} value '{}' on row {}: {}", name, raw, line + 1, e))
                })?;
                // nan and inf are gaps, imputed like blanks
                if value.is_finite() {
                    *cell = Some(value);
                }
            }

            rows.push(RawRow { timestamp, cells });
        }
        Ok(rows)
    }
}

/// Sort, drop repeated timestamps and impute missing cells.
fn clean_rows(mut rows: Vec<RawRow>) -> Result<Vec<PriceBar>, PredtraderError> {
    rows.sort_by_key(|r| r.timestamp);

    let before = rows.len();
    rows.dedup_by_key(|r| r.timestamp);
    if rows.len() < before {
        tracing::warn!(dropped = before - rows.len(), "dropped rows with repeated timestamps");
    }

    for col in 0..NUMERIC_COLUMNS.len() {
        let missing = rows.iter().filter(|r| r.cells[col].is_none()).count();
        if missing == 0 {
            continue;
        }
        if missing == rows.len() {
            return Err(data_err(format!("column {} has no values", NUMERIC_COLUMNS[col])));
        }
        tracing::warn!(column = NUMERIC_COLUMNS[col], missing, "imputing missing values");

        let mut last = None;
        for row in rows.iter_mut() {
            match row.cells[col] {
                Some(v) => last = Some(v),
                None => row.cells[col] = last,
            }
        }
        let mut next = None;
        for row in rows.iter_mut().rev() {
            match row.cells[col] {
                Some(v) => next = Some(v),
                None => row.cells[col] = next,
            }
        }
    }

    Ok(rows
        .into_iter()
        .map(|r| {
            let [open, high, low, close, volume] = r.cells.map(|c| c.unwrap_or_default());
            PriceBar {
                timestamp: r.timestamp,
                open,
                high,
                low,
                close,
                volume,
            }
        })
        .collect())
}

impl DataPort for CsvAdapter {
    fn fetch_bars(&self) -> Result<Vec<PriceBar>, PredtraderError> {
        let rows = self.read_rows()?;
        let bars = clean_rows(rows)?;
        tracing::info!(path = %self.path.display(), bars = bars.len(), "loaded price bars");
        Ok(bars)
    }
}

pub struct CsvPredictionAdapter {
    path: PathBuf,
}

impl CsvPredictionAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl PredictionPort for CsvPredictionAdapter {
    fn fetch_predictions(&self) -> Result<Vec<f64>, PredtraderError> {
        let content = read_file(&self.path)?;
        let mut rdr = csv::Reader::from_reader(content.as_bytes());

        let headers = rdr
            .headers()
            .map_err(|e| data_err(format!("CSV header error: {}", e)))?
            .clone();
        let idx = match header_index(&headers, &["predicted_close", "prediction"]) {
            Some(i) => i,
            None if headers.len() == 1 => 0,
            None => return Err(data_err("missing predicted_close column".into())),
        };

        let mut predictions = Vec::new();
        for (line, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| data_err(format!("CSV parse error: {}", e)))?;
            let raw = record.get(idx).unwrap_or_default().trim();
            let value: f64 = raw.parse().map_err(|e| {
                data_err(format!("invalid prediction '{}' on row {}: {}", raw, line + 1, e))
            })?;
            predictions.push(value);
        }

        tracing::info!(path = %self.path.display(), rows = predictions.len(), "loaded predictions");
        Ok(predictions)
    }
}
