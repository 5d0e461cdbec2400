//! Domain error types.

/// Top-level error type for predtrader.
#[derive(Debug, thiserror::Error)]
pub enum PredtraderError {
    #[error("invalid {indicator} window {window} for a series of {len} bars")]
    InvalidWindow {
        indicator: String,
        window: usize,
        len: usize,
    },

    #[error("invalid lag count {count}: must be at least 1")]
    InvalidLagCount { count: usize },

    #[error("empty series")]
    EmptySeries,

    #[error("starting capital must be positive, got {capital}")]
    NonPositiveCapital { capital: f64 },

    #[error("length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("timestamps not strictly increasing at bar {index}")]
    UnorderedTimestamps { index: usize },

    #[error("close price at bar {index} must be positive, got {price}")]
    NonPositivePrice { index: usize, price: f64 },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&PredtraderError> for std::process::ExitCode {
    fn from(err: &PredtraderError) -> Self {
        let code: u8 = match err {
            PredtraderError::Io(_) => 1,
            PredtraderError::ConfigParse { .. } | PredtraderError::ConfigInvalid { .. } => 2,
            PredtraderError::Data { .. } | PredtraderError::UnorderedTimestamps { .. } => 3,
            PredtraderError::InvalidWindow { .. }
            | PredtraderError::InvalidLagCount { .. }
            | PredtraderError::EmptySeries
            | PredtraderError::NonPositiveCapital { .. }
            | PredtraderError::LengthMismatch { .. }
            | PredtraderError::NonPositivePrice { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
