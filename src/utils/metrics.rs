//! Accuracy metrics for forecast evaluation.

use crate::error::{Result, SplitError};
use serde::{Deserialize, Serialize};

/// Error measure used to score a forecast against held-out values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Metric {
    /// Mean absolute error.
    #[default]
    Mae,
    /// Mean squared error.
    Mse,
    /// Root mean squared error.
    Rmse,
    /// Symmetric mean absolute percentage error, in percent.
    Smape,
}

impl Metric {
    pub fn name(&self) -> &'static str {
        match self {
            Metric::Mae => "MAE",
            Metric::Mse => "MSE",
            Metric::Rmse => "RMSE",
            Metric::Smape => "SMAPE",
        }
    }

    /// Score `predicted` against `actual`.
    ///
    /// Both slices must be non-empty and of equal length.
    pub fn compute(&self, actual: &[f64], predicted: &[f64]) -> Result<f64> {
        check_lengths(actual, predicted)?;
        Ok(match self {
            Metric::Mae => mae(actual, predicted),
            Metric::Mse => mse(actual, predicted),
            Metric::Rmse => rmse(actual, predicted),
            Metric::Smape => smape(actual, predicted),
        })
    }
}

/// All supported accuracy measures for one forecast.
#[derive(Debug, Clone)]
pub struct AccuracyMetrics {
    pub mae: f64,
    pub mse: f64,
    pub rmse: f64,
    /// None when `actual` contains zeros.
    pub mape: Option<f64>,
    pub smape: f64,
}

/// Calculate every accuracy measure between actual and predicted values.
pub fn calculate_metrics(actual: &[f64], predicted: &[f64]) -> Result<AccuracyMetrics> {
    check_lengths(actual, predicted)?;

    let mape = if actual.contains(&0.0) {
        None
    } else {
        let sum: f64 = actual
            .iter()
            .zip(predicted)
            .map(|(a, p)| ((a - p) / a).abs())
            .sum();
        Some(100.0 * sum / actual.len() as f64)
    };

    Ok(AccuracyMetrics {
        mae: mae(actual, predicted),
        mse: mse(actual, predicted),
        rmse: rmse(actual, predicted),
        mape,
        smape: smape(actual, predicted),
    })
}

fn check_lengths(actual: &[f64], predicted: &[f64]) -> Result<()> {
    if actual.is_empty() || predicted.is_empty() {
        return Err(SplitError::EmptyData);
    }
    if actual.len() != predicted.len() {
        return Err(SplitError::DimensionMismatch {
            expected: actual.len(),
            got: predicted.len(),
        });
    }
    Ok(())
}

/// Mean absolute error: the absolute error averaged over the horizon.
///
/// NaN when the slices are empty or differ in length.
pub fn mae(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }
    actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).abs())
        .sum::<f64>()
        / actual.len() as f64
}

/// Mean squared error.
pub fn mse(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }
    actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum::<f64>()
        / actual.len() as f64
}

/// Root mean squared error.
pub fn rmse(actual: &[f64], predicted: &[f64]) -> f64 {
    mse(actual, predicted).sqrt()
}

/// Symmetric MAPE in percent. Terms where both values are zero count as zero error.
pub fn smape(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }
    actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| {
            let denom = a.abs() + p.abs();
            if denom == 0.0 {
                0.0
            } else {
                2.0 * (a - p).abs() / denom
            }
        })
        .sum::<f64>()
        * 100.0
        / actual.len() as f64
}
