//! The interface every forecasting backend implements.

use crate::core::{Forecast, OrderedSeries};
use crate::error::Result;
use crate::models::ModelOrder;

/// A forecasting model that can be fitted to a training segment and asked for
/// point forecasts and prediction intervals.
///
/// This trait is object-safe and can be used with `Box<dyn ForecastModel>`.
pub trait ForecastModel {
    /// Fit the model to the primary values of `series`.
    fn fit(&mut self, series: &OrderedSeries) -> Result<()>;

    /// Point forecasts for the next `horizon` periods.
    fn predict(&self, horizon: usize) -> Result<Forecast>;

    /// Point forecasts with a prediction interval at confidence `level`.
    fn predict_with_intervals(&self, horizon: usize, level: f64) -> Result<Forecast> {
        let _ = level;
        self.predict(horizon)
    }

    /// The model's order, for models that have one.
    fn order(&self) -> Option<ModelOrder> {
        None
    }

    fn name(&self) -> &str;

    fn is_fitted(&self) -> bool;
}

/// Type alias for boxed model trait objects.
///
/// # Example
///
/// ```
/// use temporal_split::models::{BoxedModel, ForecastModel, Naive, ARIMA};
///
/// let models: Vec<BoxedModel> = vec![Box::new(ARIMA::new(1, 1, 1)), Box::new(Naive::new())];
/// assert_eq!(models[0].name(), "ARIMA");
/// assert!(models[1].order().is_none());
/// ```
pub type BoxedModel = Box<dyn ForecastModel>;
