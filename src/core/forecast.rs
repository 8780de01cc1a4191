//! Forecast result structure for holding predictions.

use crate::error::{Result, SplitError};

/// Lower and upper bounds expected to contain future values with probability `level`.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionInterval {
    level: f64,
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl PredictionInterval {
    pub fn new(level: f64, lower: Vec<f64>, upper: Vec<f64>) -> Result<Self> {
        if !(level > 0.0 && level < 1.0) {
            return Err(SplitError::InvalidParameter(format!(
                "confidence level must be in (0, 1), got {level}"
            )));
        }
        if lower.len() != upper.len() {
            return Err(SplitError::DimensionMismatch {
                expected: lower.len(),
                got: upper.len(),
            });
        }
        Ok(Self {
            level,
            lower,
            upper,
        })
    }

    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Display name such as `"95%"`.
    pub fn label(&self) -> String {
        format!("{}%", (self.level * 100.0).round() as i64)
    }
}

/// A univariate forecast: point predictions and any number of prediction intervals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forecast {
    point: Vec<f64>,
    intervals: Vec<PredictionInterval>,
}

impl Forecast {
    /// Create an empty forecast.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a forecast from point predictions.
    pub fn from_values(values: Vec<f64>) -> Self {
        Self {
            point: values,
            intervals: Vec::new(),
        }
    }

    /// Create a forecast with a single prediction interval.
    pub fn from_values_with_interval(
        values: Vec<f64>,
        level: f64,
        lower: Vec<f64>,
        upper: Vec<f64>,
    ) -> Result<Self> {
        Self::from_values(values).with_interval(PredictionInterval::new(level, lower, upper)?)
    }

    /// Attach another prediction interval; its length must match the horizon.
    pub fn with_interval(mut self, interval: PredictionInterval) -> Result<Self> {
        if interval.lower.len() != self.point.len() {
            return Err(SplitError::DimensionMismatch {
                expected: self.point.len(),
                got: interval.lower.len(),
            });
        }
        self.intervals.push(interval);
        Ok(self)
    }

    /// Number of forecast steps.
    pub fn horizon(&self) -> usize {
        self.point.len()
    }

    pub fn is_empty(&self) -> bool {
        self.point.is_empty()
    }

    /// Point predictions.
    pub fn point(&self) -> &[f64] {
        &self.point
    }

    pub fn has_intervals(&self) -> bool {
        !self.intervals.is_empty()
    }

    pub fn intervals(&self) -> &[PredictionInterval] {
        &self.intervals
    }

    /// The interval at `level`, if one was computed.
    pub fn interval(&self, level: f64) -> Option<&PredictionInterval> {
        self.intervals
            .iter()
            .find(|i| (i.level - level).abs() < 1e-9)
    }
}
