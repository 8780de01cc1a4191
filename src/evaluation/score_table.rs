//! Tables of forecast error scores, one row per model.

use crate::core::OrderedSeries;
use crate::error::{Result, SplitError};
use crate::models::ForecastModel;
use crate::utils::metrics::Metric;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// How scores are computed and displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreConfig {
    /// Digits after the decimal point in formatted values.
    pub decimal_places: usize,
    pub metric: Metric,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            decimal_places: 2,
            metric: Metric::Mae,
        }
    }
}

impl ScoreConfig {
    pub fn with_decimal_places(mut self, decimal_places: usize) -> Self {
        self.decimal_places = decimal_places;
        self
    }

    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }
}

/// One model's score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRow {
    /// Label derived from the model order, e.g. `ARIMA(1,1,1)`.
    pub label: String,
    pub error: f64,
    /// `error` with the configured number of decimal places.
    pub formatted: String,
}

/// Error scores of several models on one segment, in the order the models were given.
///
/// Two models with the same order produce two rows with the same label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreTable {
    metric: Metric,
    rows: Vec<ScoreRow>,
}

impl ScoreTable {
    /// Forecast `test_data.len()` periods with each model and score the
    /// forecasts against `test_data`.
    ///
    /// `test_data` may be any held-out segment: score candidates on the
    /// validation segment to choose between them, and the chosen model on
    /// the test segment once.
    ///
    /// Fails with `UnsupportedModel` if any model has no order to label it
    /// by. Errors from forecasting or scoring abort the whole table.
    pub fn build(
        models: &[&dyn ForecastModel],
        test_data: &OrderedSeries,
        config: &ScoreConfig,
    ) -> Result<Self> {
        let labels = models
            .iter()
            .map(|model| {
                model
                    .order()
                    .map(|order| order.label())
                    .ok_or_else(|| SplitError::UnsupportedModel {
                        model: model.name().to_string(),
                        capability: "a model order",
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        let actual = test_data.primary_values();
        let mut rows = Vec::with_capacity(models.len());

        for (model, label) in models.iter().zip(labels) {
            let forecast = model.predict(actual.len())?;
            if forecast.horizon() != actual.len() {
                tracing::warn!(
                    model = %label,
                    expected = actual.len(),
                    got = forecast.horizon(),
                    "forecast length does not match the scored segment"
                );
            }

            let error = config.metric.compute(actual, forecast.point())?;
            tracing::debug!(model = %label, metric = config.metric.name(), error, "scored model");

            rows.push(ScoreRow {
                formatted: format!("{:.*}", config.decimal_places, error),
                label,
                error,
            });
        }

        Ok(Self {
            metric: config.metric,
            rows,
        })
    }

    /// [`ScoreTable::build`] with two decimal places and mean absolute error.
    pub fn build_with_defaults(
        models: &[&dyn ForecastModel],
        test_data: &OrderedSeries,
    ) -> Result<Self> {
        Self::build(models, test_data, &ScoreConfig::default())
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[ScoreRow] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rows
            .iter()
            .map(|row| (row.label.as_str(), row.formatted.as_str()))
    }

    /// Formatted score of the first row with `label`.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|row| row.label == label)
            .map(|row| row.formatted.as_str())
    }

    /// Row with the lowest error; the earliest wins ties.
    pub fn best(&self) -> Option<&ScoreRow> {
        self.rows
            .iter()
            .filter(|row| !row.error.is_nan())
            .min_by(|a, b| a.error.partial_cmp(&b.error).unwrap_or(Ordering::Equal))
    }
}

impl fmt::Display for ScoreTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .rows
            .iter()
            .map(|row| row.label.len())
            .chain(std::iter::once("Model".len()))
            .max()
            .unwrap_or(0);

        writeln!(f, "{:<width$}  {}", "Model", self.metric.name())?;
        for row in &self.rows {
            writeln!(f, "{:<width$}  {}", row.label, row.formatted)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Forecast;
    use crate::models::{ModelOrder, Naive, SeasonalOrder};

    /// A model that always forecasts a constant.
    struct Constant {
        value: f64,
        order: ModelOrder,
    }

    impl ForecastModel for Constant {
        fn fit(&mut self, _series: &OrderedSeries) -> Result<()> {
            Ok(())
        }

        fn predict(&self, horizon: usize) -> Result<Forecast> {
            Ok(Forecast::from_values(vec![self.value; horizon]))
        }

        fn order(&self) -> Option<ModelOrder> {
            Some(self.order)
        }

        fn name(&self) -> &str {
            "Constant"
        }

        fn is_fitted(&self) -> bool {
            true
        }
    }

    fn constant(value: f64, order: ModelOrder) -> Constant {
        Constant { value, order }
    }

    #[test]
    fn scores_each_model_in_order() {
        let a = constant(1.0, ModelOrder::new(1, 0, 0));
        let b = constant(
            3.0,
            ModelOrder::new(1, 1, 1).with_seasonal(SeasonalOrder::new(0, 1, 1, 7)),
        );
        let models: [&dyn ForecastModel; 2] = [&a, &b];
        let test = OrderedSeries::from(vec![2.0, 2.0, 2.0, 4.0]);

        let table = ScoreTable::build_with_defaults(&models, &test).unwrap();

        let rows: Vec<_> = table.iter().collect();
        assert_eq!(
            rows,
            vec![("ARIMA(1,0,0)", "1.50"), ("ARIMA(1,1,1)(0,1,1)[7]", "0.50")]
        );
        assert_eq!(table.best().unwrap().label, "ARIMA(1,1,1)(0,1,1)[7]");
        assert_eq!(table.metric(), Metric::Mae);
    }

    #[test]
    fn duplicate_labels_are_kept() {
        let a = constant(1.0, ModelOrder::new(0, 1, 0));
        let b = constant(5.0, ModelOrder::new(0, 1, 0));
        let models: [&dyn ForecastModel; 2] = [&a, &b];
        let test = OrderedSeries::from(vec![1.0, 1.0]);

        let table = ScoreTable::build_with_defaults(&models, &test).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].label, table.rows()[1].label);
        assert_eq!(table.get("ARIMA(0,1,0)"), Some("0.00"));
        assert_eq!(table.rows()[1].formatted, "4.00");
    }

    #[test]
    fn decimal_places_and_metric_are_configurable() {
        let a = constant(0.0, ModelOrder::new(1, 1, 0));
        let models: [&dyn ForecastModel; 1] = [&a];
        let test = OrderedSeries::from(vec![1.0, 2.0]);

        let config = ScoreConfig::default()
            .with_decimal_places(4)
            .with_metric(Metric::Rmse);
        let table = ScoreTable::build(&models, &test, &config).unwrap();
        // sqrt((1 + 4) / 2)
        assert_eq!(table.get("ARIMA(1,1,0)"), Some("1.5811"));

        let table =
            ScoreTable::build(&models, &test, &ScoreConfig::default().with_decimal_places(0))
                .unwrap();
        assert_eq!(table.get("ARIMA(1,1,0)"), Some("2"));
    }

    #[test]
    fn model_without_order_is_unsupported() {
        let a = constant(1.0, ModelOrder::new(1, 0, 0));
        let mut naive = Naive::new();
        naive.fit(&OrderedSeries::from(vec![1.0, 2.0])).unwrap();
        let models: [&dyn ForecastModel; 2] = [&a, &naive];

        let result = ScoreTable::build_with_defaults(&models, &OrderedSeries::from(vec![1.0]));
        assert_eq!(
            result,
            Err(SplitError::UnsupportedModel {
                model: "Naive".to_string(),
                capability: "a model order",
            })
        );
    }

    #[test]
    fn empty_segment_is_rejected() {
        let a = constant(1.0, ModelOrder::new(1, 0, 0));
        let models: [&dyn ForecastModel; 1] = [&a];
        let result = ScoreTable::build_with_defaults(&models, &OrderedSeries::from(vec![]));
        assert!(matches!(result, Err(SplitError::EmptyData)));
    }

    #[test]
    fn no_models_gives_empty_table() {
        let table =
            ScoreTable::build_with_defaults(&[], &OrderedSeries::from(vec![1.0])).unwrap();
        assert!(table.is_empty());
        assert!(table.best().is_none());
    }

    #[test]
    fn display_renders_aligned_columns() {
        let a = constant(1.0, ModelOrder::new(1, 0, 0));
        let models: [&dyn ForecastModel; 1] = [&a];
        let table =
            ScoreTable::build_with_defaults(&models, &OrderedSeries::from(vec![2.0])).unwrap();
        assert_eq!(
            table.to_string(),
            "Model         MAE\nARIMA(1,0,0)  1.00\n"
        );
    }
}
