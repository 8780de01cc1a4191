//! Forecasting models and the interface they share.

mod order;
mod traits;

pub mod arima;
pub mod baseline;

pub use arima::ARIMA;
pub use baseline::Naive;
pub use order::{ModelOrder, SeasonalOrder};
pub use traits::{BoxedModel, ForecastModel};
