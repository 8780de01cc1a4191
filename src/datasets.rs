//! Synthetic datasets for examples, tests and benchmarks.

use crate::core::{LabeledTable, LabeledTableBuilder};
use crate::error::{Result, SplitError};
use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::prelude::*;
use rand::SeedableRng;
use std::f64::consts::PI;

/// Shape of a synthetic daily series.
#[derive(Debug, Clone)]
pub struct DailySeriesConfig {
    /// Timestamp of the first observation.
    pub start: DateTime<Utc>,
    /// Number of days.
    pub length: usize,
    pub level: f64,
    /// Change per day.
    pub trend: f64,
    /// Amplitude of the weekly sine wave.
    pub weekly_amplitude: f64,
    /// Half-width of the uniform noise.
    pub noise: f64,
    pub seed: u64,
}

impl Default for DailySeriesConfig {
    fn default() -> Self {
        Self {
            start: Utc
                .with_ymd_and_hms(2020, 1, 1, 0, 0, 0)
                .single()
                .unwrap_or_default(),
            length: 365,
            level: 100.0,
            trend: 0.1,
            weekly_amplitude: 10.0,
            noise: 2.0,
            seed: 42,
        }
    }
}

impl DailySeriesConfig {
    pub fn new(length: usize) -> Self {
        Self {
            length,
            ..Default::default()
        }
    }

    pub fn with_start(mut self, start: DateTime<Utc>) -> Self {
        self.start = start;
        self
    }

    pub fn with_level(mut self, level: f64) -> Self {
        self.level = level;
        self
    }

    pub fn with_trend(mut self, trend: f64) -> Self {
        self.trend = trend;
        self
    }

    pub fn with_weekly_amplitude(mut self, amplitude: f64) -> Self {
        self.weekly_amplitude = amplitude;
        self
    }

    pub fn with_noise(mut self, noise: f64) -> Self {
        self.noise = noise;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Daily series with level, linear trend, weekly seasonality and uniform
/// noise, in a single column named `"value"`.
///
/// The same config always yields the same values.
pub fn daily_series(config: &DailySeriesConfig) -> Result<LabeledTable> {
    if config.length == 0 {
        return Err(SplitError::EmptyData);
    }
    if !(config.noise.is_finite() && config.noise >= 0.0) {
        return Err(SplitError::InvalidParameter(format!(
            "noise must be finite and non-negative, got {}",
            config.noise
        )));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let index: Vec<DateTime<Utc>> = (0..config.length)
        .map(|i| config.start + Duration::days(i as i64))
        .collect();
    let values: Vec<f64> = (0..config.length)
        .map(|i| {
            let t = i as f64;
            let weekly = config.weekly_amplitude * (2.0 * PI * t / 7.0).sin();
            config.level + config.trend * t + weekly + rng.gen_range(-config.noise..=config.noise)
        })
        .collect();

    LabeledTableBuilder::new()
        .index(index)
        .values(values)
        .labels(["value"])
        .frequency(Duration::days(1))
        .build()
}
