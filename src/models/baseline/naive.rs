//! Naive forecasting model.
//!
//! The naive method forecasts the last observed value for all future periods.

use crate::core::{Forecast, OrderedSeries};
use crate::error::{Result, SplitError};
use crate::models::ForecastModel;
use crate::utils::stats::{check_level, mean_square, quantile_normal};

/// Naive forecaster that repeats the last value.
///
/// It has no model order, so it cannot be labeled in a score table.
#[derive(Debug, Clone, Default)]
pub struct Naive {
    last_value: Option<f64>,
    /// Standard deviation of one-step changes.
    sigma: Option<f64>,
}

impl Naive {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ForecastModel for Naive {
    fn fit(&mut self, series: &OrderedSeries) -> Result<()> {
        let values = series.primary_values();
        let last = *values.last().ok_or(SplitError::EmptyData)?;

        let changes: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();
        self.sigma = (!changes.is_empty()).then(|| mean_square(&changes).sqrt());
        self.last_value = Some(last);
        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Forecast> {
        let last = self.last_value.ok_or(SplitError::FitRequired)?;
        Ok(Forecast::from_values(vec![last; horizon]))
    }

    fn predict_with_intervals(&self, horizon: usize, level: f64) -> Result<Forecast> {
        check_level(level)?;
        let forecast = self.predict(horizon)?;
        let Some(sigma) = self.sigma else {
            return Ok(forecast);
        };

        let z = quantile_normal((1.0 + level) / 2.0);
        let (lower, upper) = forecast
            .point()
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                // Random-walk variance grows linearly with the horizon.
                let se = sigma * ((i + 1) as f64).sqrt();
                (p - z * se, p + z * se)
            })
            .unzip();

        let point = forecast.point().to_vec();
        Forecast::from_values_with_interval(point, level, lower, upper)
    }

    fn name(&self) -> &str {
        "Naive"
    }

    fn is_fitted(&self) -> bool {
        self.last_value.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn naive_repeats_last_value() {
        let mut model = Naive::new();
        assert!(!model.is_fitted());
        model
            .fit(&OrderedSeries::from(vec![1.0, 2.0, 3.0, 5.0]))
            .unwrap();
        assert!(model.is_fitted());

        let forecast = model.predict(3).unwrap();
        assert_eq!(forecast.point(), &[5.0, 5.0, 5.0]);
        assert!(model.order().is_none());
        assert_eq!(model.name(), "Naive");
    }

    #[test]
    fn naive_intervals_widen_with_horizon() {
        let mut model = Naive::new();
        model
            .fit(&OrderedSeries::from(vec![1.0, 2.0, 1.0, 2.0, 1.0]))
            .unwrap();

        let forecast = model.predict_with_intervals(4, 0.95).unwrap();
        let interval = forecast.interval(0.95).unwrap();
        let widths: Vec<f64> = interval
            .upper()
            .iter()
            .zip(interval.lower())
            .map(|(u, l)| u - l)
            .collect();

        assert!(widths.windows(2).all(|w| w[1] > w[0]));
        // sigma = 1, z = 1.96
        assert_relative_eq!(widths[0], 2.0 * 1.959964, epsilon = 1e-4);
    }

    #[test]
    fn naive_requires_fit_and_data() {
        let model = Naive::new();
        assert!(matches!(model.predict(2), Err(SplitError::FitRequired)));

        let mut model = Naive::new();
        assert!(matches!(
            model.fit(&OrderedSeries::from(Vec::new())),
            Err(SplitError::EmptyData)
        ));
    }

    #[test]
    fn naive_rejects_invalid_interval_level() {
        let mut model = Naive::new();
        model.fit(&OrderedSeries::from(vec![1.0, 3.0, 2.0])).unwrap();
        for level in [f64::NAN, 1.5, 0.0] {
            assert!(matches!(
                model.predict_with_intervals(3, level),
                Err(SplitError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn naive_single_observation_has_no_intervals() {
        let mut model = Naive::new();
        model.fit(&OrderedSeries::from(vec![4.0])).unwrap();
        let forecast = model.predict_with_intervals(2, 0.9).unwrap();
        assert!(!forecast.has_intervals());
        assert_eq!(forecast.point(), &[4.0, 4.0]);
    }
}
