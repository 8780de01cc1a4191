//! Renderer-independent description of a train/test/forecast chart.

use crate::core::{Forecast, OrderedSeries};
use crate::error::{Result, SplitError};
use chrono::{DateTime, Duration, Utc};
use std::fmt;
use std::str::FromStr;

/// Share of row gaps that must agree on the modal spacing for it to be used as the step.
const FREQUENCY_TOLERANCE: f64 = 0.5;

/// How the test segment is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TestDataMode {
    #[default]
    Markers,
    Lines,
}

impl TestDataMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestDataMode::Markers => "markers",
            TestDataMode::Lines => "lines",
        }
    }
}

impl FromStr for TestDataMode {
    type Err = SplitError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "markers" => Ok(TestDataMode::Markers),
            "lines" => Ok(TestDataMode::Lines),
            other => Err(SplitError::InvalidParameter(format!(
                "invalid test data mode '{}': choose 'markers' or 'lines'",
                other
            ))),
        }
    }
}

impl fmt::Display for TestDataMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trace colors as CSS hex strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorScheme {
    pub training: String,
    pub test: String,
    pub forecast: String,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            training: "#0072B2".to_string(),
            test: "#000000".to_string(),
            forecast: "#FF0000".to_string(),
        }
    }
}

impl ColorScheme {
    pub fn with_training(mut self, color: impl Into<String>) -> Self {
        self.training = color.into();
        self
    }

    pub fn with_test(mut self, color: impl Into<String>) -> Self {
        self.test = color.into();
        self
    }

    pub fn with_forecast(mut self, color: impl Into<String>) -> Self {
        self.forecast = color.into();
        self
    }
}

/// X coordinates of one trace: row positions for plain series, timestamps
/// for labeled ones.
#[derive(Debug, Clone, PartialEq)]
pub enum XValues {
    Positions(Vec<usize>),
    Dates(Vec<DateTime<Utc>>),
}

impl XValues {
    fn of(series: &OrderedSeries, offset: usize) -> Self {
        match series {
            OrderedSeries::Numeric(values) => XValues::Positions((offset..offset + values.len()).collect()),
            OrderedSeries::Labeled(table) => XValues::Dates(table.index().to_vec()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            XValues::Positions(p) => p.len(),
            XValues::Dates(d) => d.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// X coordinates of every trace in a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartCoordinates {
    pub training: XValues,
    pub test: Option<XValues>,
    pub forecast: Option<XValues>,
}

/// A training segment with an optional test segment and forecast.
///
/// ```
/// use temporal_split::core::{Forecast, OrderedSeries};
/// use temporal_split::plot::{Chart, TestDataMode};
///
/// let train = OrderedSeries::from(vec![1.0, 2.0, 3.0]);
/// let test = OrderedSeries::from(vec![4.0, 5.0]);
/// let forecast = Forecast::from_values(vec![3.5, 3.5]);
///
/// let chart = Chart::new(&train)
///     .with_test(&test)
///     .with_forecast(&forecast)
///     .with_test_mode("lines".parse::<TestDataMode>().unwrap());
/// assert_eq!(chart.y_axis_label(), "Value");
/// ```
#[derive(Debug, Clone)]
pub struct Chart<'a> {
    training: &'a OrderedSeries,
    test: Option<&'a OrderedSeries>,
    forecast: Option<&'a Forecast>,
    test_mode: TestDataMode,
    y_axis_label: String,
    colors: ColorScheme,
    show_intervals: bool,
}

impl<'a> Chart<'a> {
    pub fn new(training: &'a OrderedSeries) -> Self {
        Self {
            training,
            test: None,
            forecast: None,
            test_mode: TestDataMode::default(),
            y_axis_label: "Value".to_string(),
            colors: ColorScheme::default(),
            show_intervals: true,
        }
    }

    pub fn with_test(mut self, test: &'a OrderedSeries) -> Self {
        self.test = Some(test);
        self
    }

    /// The forecast is drawn over the test segment's x-values.
    pub fn with_forecast(mut self, forecast: &'a Forecast) -> Self {
        self.forecast = Some(forecast);
        self
    }

    pub fn with_test_mode(mut self, mode: TestDataMode) -> Self {
        self.test_mode = mode;
        self
    }

    pub fn with_y_axis_label(mut self, label: impl Into<String>) -> Self {
        self.y_axis_label = label.into();
        self
    }

    pub fn with_colors(mut self, colors: ColorScheme) -> Self {
        self.colors = colors;
        self
    }

    /// Draw the forecast's prediction intervals as shaded bands (on by default).
    pub fn with_intervals(mut self, show: bool) -> Self {
        self.show_intervals = show;
        self
    }

    pub fn training(&self) -> &OrderedSeries {
        self.training
    }

    pub fn test(&self) -> Option<&OrderedSeries> {
        self.test
    }

    pub fn forecast(&self) -> Option<&Forecast> {
        self.forecast
    }

    pub fn test_mode(&self) -> TestDataMode {
        self.test_mode
    }

    pub fn y_axis_label(&self) -> &str {
        &self.y_axis_label
    }

    pub fn colors(&self) -> &ColorScheme {
        &self.colors
    }

    pub fn show_intervals(&self) -> bool {
        self.show_intervals
    }

    /// Compute x coordinates for every trace.
    ///
    /// The test segment continues the training positions (or keeps its own
    /// timestamps). Forecast values line up with the test segment and are
    /// extrapolated past its end at the series' frequency.
    pub fn coordinates(&self) -> Result<ChartCoordinates> {
        if self.training.is_empty() {
            return Err(SplitError::EmptyData);
        }
        if let Some(test) = self.test {
            if test.kind() != self.training.kind() {
                return Err(SplitError::InvalidParameter(
                    "test data must use the same representation as the training data".to_string(),
                ));
            }
            if let (Some(train), Some(test)) = (self.training.as_table(), test.as_table()) {
                if let (Some(last), Some(first)) = (train.index().last(), test.index().first()) {
                    if first <= last {
                        return Err(SplitError::TimestampError(
                            "test data must start after the last training timestamp".to_string(),
                        ));
                    }
                }
            }
        }

        let training = XValues::of(self.training, 0);
        let test = self.test.map(|t| XValues::of(t, self.training.len()));
        let forecast = match self.forecast {
            Some(f) => Some(self.forecast_axis(f.horizon(), &training, test.as_ref())?),
            None => None,
        };

        Ok(ChartCoordinates {
            training,
            test,
            forecast,
        })
    }

    fn forecast_axis(
        &self,
        horizon: usize,
        training: &XValues,
        test: Option<&XValues>,
    ) -> Result<XValues> {
        let train_dates = match training {
            XValues::Positions(_) => {
                let start = self.training.len();
                return Ok(XValues::Positions((start..start + horizon).collect()));
            }
            XValues::Dates(dates) => dates,
        };

        let test_dates: &[DateTime<Utc>] = match test {
            Some(XValues::Dates(dates)) => dates,
            _ => &[],
        };

        let mut dates: Vec<DateTime<Utc>> = test_dates.iter().take(horizon).copied().collect();
        if dates.len() < horizon {
            let known: Vec<DateTime<Utc>> = train_dates.iter().chain(test_dates).copied().collect();
            let step = self.date_step(&known)?;
            let mut current = *known.last().ok_or(SplitError::EmptyData)?;
            while dates.len() < horizon {
                current = current + step;
                dates.push(current);
            }
        }
        Ok(XValues::Dates(dates))
    }

    /// Declared frequency, then the modal training spacing, then the last known gap.
    fn date_step(&self, known: &[DateTime<Utc>]) -> Result<Duration> {
        if let Some(table) = self.training.as_table() {
            if let Some(freq) = table.frequency() {
                return Ok(freq);
            }
            if let Ok(freq) = table.infer_frequency(FREQUENCY_TOLERANCE) {
                return Ok(freq);
            }
        }
        match known {
            [.., a, b] => Ok(*b - *a),
            _ => Err(SplitError::InsufficientData {
                needed: 2,
                got: known.len(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LabeledTable;
    use chrono::TimeZone;

    fn daily(start_day: u32, values: Vec<f64>) -> OrderedSeries {
        let start = Utc.with_ymd_and_hms(2024, 1, start_day, 0, 0, 0).unwrap();
        let index = (0..values.len())
            .map(|i| start + Duration::days(i as i64))
            .collect();
        OrderedSeries::from(LabeledTable::univariate(index, values).unwrap())
    }

    #[test]
    fn test_mode_parses_known_values_only() {
        assert_eq!("markers".parse::<TestDataMode>().unwrap(), TestDataMode::Markers);
        assert_eq!("lines".parse::<TestDataMode>().unwrap(), TestDataMode::Lines);
        assert!(matches!(
            "bars".parse::<TestDataMode>(),
            Err(SplitError::InvalidParameter(_))
        ));
        assert_eq!(TestDataMode::default().to_string(), "markers");
    }

    #[test]
    fn default_colors() {
        let colors = ColorScheme::default();
        assert_eq!(colors.training, "#0072B2");
        assert_eq!(colors.test, "#000000");
        assert_eq!(colors.forecast, "#FF0000");
        assert_eq!(colors.with_forecast("#00FF00").forecast, "#00FF00");
    }

    #[test]
    fn numeric_positions_continue_training() {
        let train = OrderedSeries::from(vec![1.0, 2.0, 3.0]);
        let test = OrderedSeries::from(vec![4.0, 5.0]);
        let forecast = Forecast::from_values(vec![0.0; 4]);

        let coords = Chart::new(&train)
            .with_test(&test)
            .with_forecast(&forecast)
            .coordinates()
            .unwrap();

        assert_eq!(coords.training, XValues::Positions(vec![0, 1, 2]));
        assert_eq!(coords.test, Some(XValues::Positions(vec![3, 4])));
        assert_eq!(coords.forecast, Some(XValues::Positions(vec![3, 4, 5, 6])));
    }

    #[test]
    fn forecast_aligns_with_test_dates_and_extrapolates() {
        let train = daily(1, vec![1.0, 2.0, 3.0]);
        let test = daily(4, vec![4.0, 5.0]);
        let forecast = Forecast::from_values(vec![0.0; 3]);

        let coords = Chart::new(&train)
            .with_test(&test)
            .with_forecast(&forecast)
            .coordinates()
            .unwrap();

        let expected: Vec<_> = [4, 5, 6]
            .iter()
            .map(|&d| Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap())
            .collect();
        assert_eq!(coords.forecast, Some(XValues::Dates(expected)));
    }

    #[test]
    fn forecast_without_test_follows_training() {
        let train = daily(1, vec![1.0, 2.0]);
        let forecast = Forecast::from_values(vec![0.0; 2]);
        let coords = Chart::new(&train).with_forecast(&forecast).coordinates().unwrap();

        match coords.forecast {
            Some(XValues::Dates(dates)) => {
                assert_eq!(dates[0], Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap());
                assert_eq!(dates[1], Utc.with_ymd_and_hms(2024, 1, 4, 0, 0, 0).unwrap());
            }
            other => panic!("expected dates, got {:?}", other),
        }
    }

    #[test]
    fn extrapolation_uses_modal_training_spacing() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let index = [0, 1, 2, 3, 5]
            .iter()
            .map(|&d| start + Duration::days(d))
            .collect();
        let train = OrderedSeries::from(
            LabeledTable::univariate(index, vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap(),
        );
        let forecast = Forecast::from_values(vec![0.0; 2]);

        let coords = Chart::new(&train).with_forecast(&forecast).coordinates().unwrap();
        let expected = vec![start + Duration::days(6), start + Duration::days(7)];
        assert_eq!(coords.forecast, Some(XValues::Dates(expected)));
    }

    #[test]
    fn test_dates_must_follow_training() {
        let train = daily(10, vec![1.0, 2.0, 3.0]);
        let earlier = daily(1, vec![4.0, 5.0]);
        assert!(matches!(
            Chart::new(&train).with_test(&earlier).coordinates(),
            Err(SplitError::TimestampError(_))
        ));

        let overlapping = daily(12, vec![4.0, 5.0]);
        assert!(matches!(
            Chart::new(&train).with_test(&overlapping).coordinates(),
            Err(SplitError::TimestampError(_))
        ));

        let following = daily(13, vec![4.0]);
        assert!(Chart::new(&train).with_test(&following).coordinates().is_ok());
    }

    #[test]
    fn single_timestamp_cannot_be_extrapolated() {
        let train = daily(1, vec![1.0]);
        let forecast = Forecast::from_values(vec![0.0]);
        let result = Chart::new(&train).with_forecast(&forecast).coordinates();
        assert!(matches!(result, Err(SplitError::InsufficientData { needed: 2, got: 1 })));
    }

    #[test]
    fn rejects_empty_training_and_mixed_representations() {
        let empty = OrderedSeries::from(Vec::new());
        assert!(matches!(Chart::new(&empty).coordinates(), Err(SplitError::EmptyData)));

        let train = daily(1, vec![1.0, 2.0]);
        let test = OrderedSeries::from(vec![3.0]);
        assert!(matches!(
            Chart::new(&train).with_test(&test).coordinates(),
            Err(SplitError::InvalidParameter(_))
        ));
    }
}
