//! Per-bar trading signals from predicted vs. actual close.
//!
//! The comparison is point-wise and exact: no tolerance band and no reference
//! to any other bar. A NaN prediction is neither above nor below the close and
//! therefore yields `Hold`.

use std::fmt;

use super::error::PredtraderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl Signal {
    pub fn from_prediction(predicted: f64, close: f64) -> Self {
        if predicted > close {
            Signal::Buy
        } else if predicted < close {
            Signal::Sell
        } else {
            Signal::Hold
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Signal::Buy => "BUY",
            Signal::Sell => "SELL",
            Signal::Hold => "HOLD",
        };
        f.write_str(s)
    }
}

pub fn generate_signals(close: &[f64], predicted: &[f64]) -> Result<Vec<Signal>, PredtraderError> {
    if close.len() != predicted.len() {
        return Err(PredtraderError::LengthMismatch {
            left: close.len(),
            right: predicted.len(),
        });
    }
    Ok(close
        .iter()
        .zip(predicted)
        .map(|(&c, &p)| Signal::from_prediction(p, c))
        .collect())
}
