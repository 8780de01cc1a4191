//! ARIMA models with optional seasonal terms.

mod diff;
mod model;

pub use diff::{difference, integrate};
pub use model::ARIMA;
