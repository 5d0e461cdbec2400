//! Prediction error metrics.

use super::error::PredtraderError;

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionMetrics {
    pub mse: f64,
    pub rmse: f64,
    pub mae: f64,
    pub r_squared: f64,
}

impl PredictionMetrics {
    /// Error of `predicted` against `actual`, aligned by index.
    ///
    /// With constant actuals (zero total variance) R² is 1.0 for a perfect fit
    /// and 0.0 otherwise.
    pub fn compute(actual: &[f64], predicted: &[f64]) -> Result<Self, PredtraderError> {
        if actual.len() != predicted.len() {
            return Err(PredtraderError::LengthMismatch {
                left: actual.len(),
                right: predicted.len(),
            });
        }
        if actual.is_empty() {
            return Err(PredtraderError::EmptySeries);
        }

        let n = actual.len() as f64;
        let mean = actual.iter().sum::<f64>() / n;

        let mut ss_res = 0.0_f64;
        let mut abs_sum = 0.0_f64;
        let mut ss_tot = 0.0_f64;
        for (&a, &p) in actual.iter().zip(predicted) {
            let err = a - p;
            ss_res += err * err;
            abs_sum += err.abs();
            ss_tot += (a - mean) * (a - mean);
        }

        let mse = ss_res / n;
        let r_squared = if ss_tot > 0.0 {
            1.0 - ss_res / ss_tot
        } else if ss_res == 0.0 {
            1.0
        } else {
            0.0
        };

        Ok(PredictionMetrics {
            mse,
            rmse: mse.sqrt(),
            mae: abs_sum / n,
            r_squared,
        })
    }
}
