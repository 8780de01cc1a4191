//! Chart descriptions of split series and forecasts.
//!
//! A [`Chart`] says what to draw; a [`Renderer`] turns it into something a
//! plotting front end understands. [`PlotlyJsonRenderer`] produces a Plotly
//! figure with the training data as a line, the test data as markers or a
//! line, and the forecast as a dashed line.

mod chart;
mod plotly;

pub use chart::{Chart, ChartCoordinates, ColorScheme, TestDataMode, XValues};
pub use plotly::PlotlyJsonRenderer;

use crate::error::Result;

/// Turns a [`Chart`] into an output format.
pub trait Renderer {
    type Output;

    fn render(&self, chart: &Chart<'_>) -> Result<Self::Output>;
}
