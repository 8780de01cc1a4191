//! Plotly figure JSON.

use super::chart::{Chart, TestDataMode, XValues};
use super::Renderer;
use crate::core::PredictionInterval;
use crate::error::Result;
use serde_json::{json, Value};

const INTERVAL_OPACITY: f64 = 0.2;

/// Renders a [`Chart`] as a Plotly figure (`{"data": [...], "layout": {...}}`).
///
/// The output can be passed to `Plotly.newPlot` or written to a file.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotlyJsonRenderer {
    pub title: String,
    pub x_axis_title: String,
}

impl Default for PlotlyJsonRenderer {
    fn default() -> Self {
        Self {
            title: "Univariate Time Series Visualization".to_string(),
            x_axis_title: "Date".to_string(),
        }
    }
}

impl PlotlyJsonRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_x_axis_title(mut self, title: impl Into<String>) -> Self {
        self.x_axis_title = title.into();
        self
    }

    fn layout(&self, chart: &Chart<'_>) -> Value {
        json!({
            "title": { "text": self.title },
            "xaxis": {
                "title": { "text": self.x_axis_title },
                "showspikes": true,
                "spikemode": "across",
                "spikesnap": "cursor",
                "spikedash": "dot",
                "spikethickness": 1.5,
                "spikecolor": "gray",
            },
            "yaxis": {
                "title": { "text": chart.y_axis_label() },
                "showspikes": false,
            },
            "hovermode": "x",
            "template": "plotly_white",
            "legend": {
                "orientation": "h",
                "yanchor": "bottom",
                "y": 1.02,
                "xanchor": "right",
                "x": 1,
            },
        })
    }
}

impl Renderer for PlotlyJsonRenderer {
    type Output = Value;

    fn render(&self, chart: &Chart<'_>) -> Result<Value> {
        let coords = chart.coordinates()?;
        let colors = chart.colors();
        let mut data = Vec::new();

        data.push(json!({
            "type": "scatter",
            "x": x_json(&coords.training),
            "y": chart.training().primary_values(),
            "mode": "lines",
            "name": "Training Data",
            "line": { "color": colors.training },
        }));

        if let (Some(test), Some(x)) = (chart.test(), &coords.test) {
            let mut trace = json!({
                "type": "scatter",
                "x": x_json(x),
                "y": test.primary_values(),
                "mode": chart.test_mode().as_str(),
                "name": "Test Data",
            });
            let style = match chart.test_mode() {
                TestDataMode::Markers => ("marker", json!({ "color": colors.test, "size": 6 })),
                TestDataMode::Lines => ("line", json!({ "color": colors.test })),
            };
            trace[style.0] = style.1;
            data.push(trace);
        }

        if let (Some(forecast), Some(x)) = (chart.forecast(), &coords.forecast) {
            let x = x_json(x);
            if chart.show_intervals() {
                for interval in forecast.intervals() {
                    data.extend(interval_traces(interval, &x, &colors.forecast));
                }
            }
            data.push(json!({
                "type": "scatter",
                "x": x,
                "y": forecast.point(),
                "mode": "lines",
                "name": "Point Forecast",
                "line": { "color": colors.forecast, "dash": "dash" },
            }));
        }

        tracing::debug!(traces = data.len(), "rendered plotly figure");
        Ok(json!({ "data": data, "layout": self.layout(chart) }))
    }
}

fn x_json(x: &XValues) -> Value {
    match x {
        XValues::Positions(p) => json!(p),
        XValues::Dates(d) => Value::Array(
            d.iter()
                .map(|t| Value::String(t.format("%Y-%m-%d %H:%M:%S").to_string()))
                .collect(),
        ),
    }
}

/// An invisible upper bound followed by a lower bound filled up to it.
fn interval_traces(interval: &PredictionInterval, x: &Value, color: &str) -> [Value; 2] {
    let name = format!("{} Prediction Interval", interval.label());
    let fill = rgba(color, INTERVAL_OPACITY);
    [
        json!({
            "type": "scatter",
            "x": x,
            "y": interval.upper(),
            "mode": "lines",
            "name": name,
            "line": { "width": 0 },
            "showlegend": false,
            "hoverinfo": "skip",
        }),
        json!({
            "type": "scatter",
            "x": x,
            "y": interval.lower(),
            "mode": "lines",
            "name": name,
            "line": { "width": 0 },
            "fill": "tonexty",
            "fillcolor": fill,
        }),
    ]
}

/// `#RRGGBB` to `rgba(r,g,b,alpha)`; other color strings pass through.
fn rgba(color: &str, alpha: f64) -> String {
    let channel = |i: usize| {
        color
            .get(i..i + 2)
            .and_then(|h| u8::from_str_radix(h, 16).ok())
    };
    match (color.len(), color.starts_with('#')) {
        (7, true) => match (channel(1), channel(3), channel(5)) {
            (Some(r), Some(g), Some(b)) => format!("rgba({},{},{},{})", r, g, b, alpha),
            _ => color.to_string(),
        },
        _ => color.to_string(),
    }
}
