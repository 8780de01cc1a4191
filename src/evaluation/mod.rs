//! Scoring fitted models against a held-out segment.
//!
//! # Example
//!
//! ```
//! use temporal_split::core::OrderedSeries;
//! use temporal_split::evaluation::{fit_all, model_refs, ScoreTable};
//! use temporal_split::models::{BoxedModel, ARIMA};
//! use temporal_split::split::train_test_split;
//!
//! let values: Vec<f64> = (0..80).map(|i| 10.0 + 0.5 * i as f64 + (i % 5) as f64).collect();
//! let split = train_test_split(&OrderedSeries::from(values), 70).unwrap();
//!
//! let mut models: Vec<BoxedModel> = vec![Box::new(ARIMA::new(1, 1, 0)), Box::new(ARIMA::new(0, 1, 1))];
//! fit_all(&mut models, &split.train).unwrap();
//!
//! let table = ScoreTable::build_with_defaults(&model_refs(&models), &split.test).unwrap();
//! assert_eq!(table.len(), 2);
//! assert!(table.get("ARIMA(1,1,0)").is_some());
//! ```

mod score_table;

pub use score_table::{ScoreConfig, ScoreRow, ScoreTable};

use crate::core::OrderedSeries;
use crate::error::Result;
use crate::models::{BoxedModel, ForecastModel};

/// Fit every model to the same training segment, stopping at the first failure.
pub fn fit_all(models: &mut [BoxedModel], train: &OrderedSeries) -> Result<()> {
    for model in models.iter_mut() {
        model.fit(train)?;
        tracing::debug!(model = model.name(), train_len = train.len(), "fitted model");
    }
    Ok(())
}

/// Borrow boxed models in the form [`ScoreTable::build`] takes.
pub fn model_refs(models: &[BoxedModel]) -> Vec<&dyn ForecastModel> {
    models.iter().map(|model| model.as_ref()).collect()
}
