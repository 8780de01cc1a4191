//! Metrics, optimization and statistics helpers.

pub mod metrics;
pub mod optimization;
pub mod stats;

pub use metrics::{calculate_metrics, mae, AccuracyMetrics, Metric};
pub use optimization::{nelder_mead, NelderMeadConfig, NelderMeadResult};
pub use stats::quantile_normal;
