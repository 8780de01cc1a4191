//! # temporal-split
//!
//! Order-preserving train/validation/test splits of time series, and score
//! tables comparing forecasting models on a held-out segment.
//!
//! A split never shuffles: the training segment is a prefix of the series,
//! the test segment is its suffix, and an optional validation segment sits
//! between them. Models are fitted on the training segment, compared on the
//! validation segment, and the chosen one is scored on the test segment once.
//!
//! ```
//! use temporal_split::prelude::*;
//!
//! let table = daily_series(&DailySeriesConfig::new(120)).unwrap();
//! let series = OrderedSeries::from(table);
//! let split = train_val_test_split(&series, 90, 15).unwrap();
//!
//! let mut model = ARIMA::new(1, 1, 1);
//! model.fit(&split.train).unwrap();
//!
//! let models: [&dyn ForecastModel; 1] = [&model];
//! let scores = ScoreTable::build_with_defaults(&models, &split.validation).unwrap();
//! assert_eq!(scores.rows()[0].label, "ARIMA(1,1,1)");
//! ```

#![allow(clippy::upper_case_acronyms)]

pub mod core;
pub mod datasets;
pub mod error;
pub mod evaluation;
pub mod models;
pub mod plot;
pub mod split;
pub mod utils;

pub use error::{BoundaryViolation, Result, SplitError};

pub mod prelude {
    pub use crate::core::{Forecast, LabeledTable, OrderedSeries, Splittable};
    pub use crate::datasets::{daily_series, DailySeriesConfig};
    pub use crate::error::{Result, SplitError};
    pub use crate::evaluation::{ScoreConfig, ScoreTable};
    pub use crate::models::{ForecastModel, ModelOrder, SeasonalOrder, ARIMA};
    pub use crate::split::{train_test_split, train_val_test_split, SplitBoundary};
    pub use crate::utils::Metric;
}
