//! Core data structures: ordered series, labeled tables and forecasts.

mod forecast;
mod ordered;
mod table;

pub use forecast::{Forecast, PredictionInterval};
pub use ordered::{OrderedSeries, SeriesKind, Splittable};
pub use table::{LabeledTable, LabeledTableBuilder, ValueLayout};
