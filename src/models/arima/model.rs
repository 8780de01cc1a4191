//! ARIMA model with an optional seasonal component.

use crate::core::{Forecast, OrderedSeries};
use crate::error::{Result, SplitError};
use crate::models::arima::diff::{difference_stages, differencing_lags, integrate};
use crate::models::{ForecastModel, ModelOrder, SeasonalOrder};
use crate::utils::optimization::{nelder_mead, NelderMeadConfig};
use crate::utils::stats::{check_level, mean, mean_square, quantile_normal};

/// Coefficient bounds that keep the AR and MA parts away from the unit circle.
const COEFFICIENT_BOUND: f64 = 0.99;

/// State computed by [`ARIMA::fit`].
#[derive(Debug, Clone)]
struct FittedState {
    /// Every differencing stage, from the original series to the fully differenced one.
    stages: Vec<Vec<f64>>,
    differencing: Vec<usize>,
    intercept: f64,
    ar: Vec<f64>,
    ma: Vec<f64>,
    residuals: Vec<f64>,
    residual_variance: f64,
    aic: f64,
}

/// ARIMA(p, d, q) forecaster, optionally with a seasonal (P, D, Q)\[s\] part.
///
/// Seasonal AR and MA terms enter additively at lags `s, 2s, ..`, next to
/// the non-seasonal lags `1..=p` and `1..=q`. Parameters are estimated by
/// minimizing the conditional sum of squares.
#[derive(Debug, Clone)]
pub struct ARIMA {
    order: ModelOrder,
    state: Option<FittedState>,
}

impl ARIMA {
    /// Create a non-seasonal ARIMA(p, d, q) model.
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self::with_order(ModelOrder::new(p, d, q))
    }

    /// Create a seasonal ARIMA(p, d, q)(P, D, Q)\[s\] model.
    pub fn seasonal(p: usize, d: usize, q: usize, seasonal: SeasonalOrder) -> Self {
        Self::with_order(ModelOrder::new(p, d, q).with_seasonal(seasonal))
    }

    pub fn with_order(order: ModelOrder) -> Self {
        Self { order, state: None }
    }

    /// AR lags, non-seasonal first.
    fn ar_lags(&self) -> Vec<usize> {
        let seasonal = self.order.active_seasonal();
        let mut lags: Vec<usize> = (1..=self.order.p).collect();
        if let Some(s) = seasonal {
            lags.extend((1..=s.p).map(|k| k * s.period));
        }
        lags
    }

    /// MA lags, non-seasonal first.
    fn ma_lags(&self) -> Vec<usize> {
        let seasonal = self.order.active_seasonal();
        let mut lags: Vec<usize> = (1..=self.order.q).collect();
        if let Some(s) = seasonal {
            lags.extend((1..=s.q).map(|k| k * s.period));
        }
        lags
    }

    fn differencing(&self) -> Vec<usize> {
        match self.order.active_seasonal() {
            Some(s) => differencing_lags(self.order.d, s.d, s.period),
            None => differencing_lags(self.order.d, 0, 1),
        }
    }

    /// Reject orders whose lags or differencing reach past `len` observations.
    fn check_spans(&self, len: usize) -> Result<()> {
        let mut spans = vec![self.order.p, self.order.q, self.order.d];
        if let Some(s) = self.order.active_seasonal() {
            for k in [s.p, s.q, s.d] {
                let span = k.checked_mul(s.period).ok_or_else(|| {
                    SplitError::InvalidParameter(format!("seasonal lag overflows for order {}", self.order))
                })?;
                spans.push(span);
            }
        }
        if spans.iter().any(|&span| span >= len) {
            return Err(SplitError::InvalidParameter(format!(
                "order {} needs lags beyond a series of length {}",
                self.order, len
            )));
        }
        Ok(())
    }

    pub fn ar_coefficients(&self) -> &[f64] {
        self.state.as_ref().map(|s| s.ar.as_slice()).unwrap_or(&[])
    }

    pub fn ma_coefficients(&self) -> &[f64] {
        self.state.as_ref().map(|s| s.ma.as_slice()).unwrap_or(&[])
    }

    pub fn intercept(&self) -> Option<f64> {
        self.state.as_ref().map(|s| s.intercept)
    }

    /// Residuals on the differenced scale; zero before the first full lag window.
    pub fn residuals(&self) -> Option<&[f64]> {
        self.state.as_ref().map(|s| s.residuals.as_slice())
    }

    pub fn aic(&self) -> Option<f64> {
        self.state.as_ref().map(|s| s.aic)
    }
}

impl Default for ARIMA {
    fn default() -> Self {
        Self::with_order(ModelOrder::default())
    }
}

/// One-step predictions and residuals of the ARMA recursion over `w`.
fn arma_residuals(
    w: &[f64],
    ar_lags: &[usize],
    ma_lags: &[usize],
    intercept: f64,
    ar: &[f64],
    ma: &[f64],
) -> Vec<f64> {
    let start = ar_lags.iter().chain(ma_lags).copied().max().unwrap_or(0);
    let mut residuals = vec![0.0; w.len()];

    for t in start..w.len() {
        let mut pred = intercept;
        for (&lag, &phi) in ar_lags.iter().zip(ar) {
            pred += phi * (w[t - lag] - intercept);
        }
        for (&lag, &theta) in ma_lags.iter().zip(ma) {
            pred += theta * residuals[t - lag];
        }
        residuals[t] = w[t] - pred;
    }
    residuals
}

impl ForecastModel for ARIMA {
    fn fit(&mut self, series: &OrderedSeries) -> Result<()> {
        let values = series.primary_values();
        if values.is_empty() {
            return Err(SplitError::EmptyData);
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(SplitError::InvalidParameter(
                "series contains non-finite values".to_string(),
            ));
        }

        self.check_spans(values.len())?;
        let ar_lags = self.ar_lags();
        let ma_lags = self.ma_lags();
        let differencing = self.differencing();

        let max_lag = ar_lags.iter().chain(&ma_lags).copied().max().unwrap_or(0);
        let needed = differencing.iter().sum::<usize>() + max_lag + 2;
        if values.len() < needed {
            return Err(SplitError::InsufficientData {
                needed,
                got: values.len(),
            });
        }

        let stages = difference_stages(values, &differencing);
        let w = stages[stages.len() - 1].as_slice();
        let n_ar = ar_lags.len();

        let mut initial = vec![mean(w)];
        initial.extend((0..n_ar).map(|i| 0.1 / (i + 1) as f64));
        initial.extend((0..ma_lags.len()).map(|i| 0.1 / (i + 1) as f64));

        let params = if initial.len() == 1 {
            initial
        } else {
            let mut bounds = vec![(f64::NEG_INFINITY, f64::INFINITY)];
            bounds.resize(initial.len(), (-COEFFICIENT_BOUND, COEFFICIENT_BOUND));

            let css = |params: &[f64]| {
                let (ar, ma) = params[1..].split_at(n_ar);
                arma_residuals(w, &ar_lags, &ma_lags, params[0], ar, ma)
                    .iter()
                    .map(|e| e * e)
                    .sum::<f64>()
            };
            let result = nelder_mead(css, &initial, Some(bounds.as_slice()), &NelderMeadConfig::default());
            if !result.converged {
                tracing::debug!(
                    order = %self.order,
                    iterations = result.iterations,
                    "CSS estimation stopped before converging"
                );
            }
            result.point
        };

        let intercept = params[0];
        let (ar, ma) = params[1..].split_at(n_ar);
        let residuals = arma_residuals(w, &ar_lags, &ma_lags, intercept, ar, ma);

        let effective = &residuals[max_lag..];
        let residual_variance = mean_square(effective);
        let n_eff = effective.len() as f64;
        let k = params.len() as f64;
        let log_likelihood = -0.5
            * n_eff
            * (1.0 + residual_variance.max(f64::MIN_POSITIVE).ln() + (2.0 * std::f64::consts::PI).ln());

        self.state = Some(FittedState {
            ar: ar.to_vec(),
            ma: ma.to_vec(),
            stages,
            differencing,
            intercept,
            residuals,
            residual_variance,
            aic: -2.0 * log_likelihood + 2.0 * k,
        });
        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Forecast> {
        let state = self.state.as_ref().ok_or(SplitError::FitRequired)?;
        if horizon == 0 {
            return Ok(Forecast::new());
        }

        let ar_lags = self.ar_lags();
        let ma_lags = self.ma_lags();

        let mut w = state.stages[state.stages.len() - 1].clone();
        let mut residuals = state.residuals.clone();
        let history = w.len();

        for _ in 0..horizon {
            let t = w.len();
            let mut pred = state.intercept;
            for (&lag, &phi) in ar_lags.iter().zip(&state.ar) {
                if t >= lag {
                    pred += phi * (w[t - lag] - state.intercept);
                }
            }
            for (&lag, &theta) in ma_lags.iter().zip(&state.ma) {
                if t >= lag {
                    pred += theta * residuals[t - lag];
                }
            }
            w.push(pred);
            // Future shocks have zero expectation.
            residuals.push(0.0);
        }

        let predictions = integrate(&state.stages, &state.differencing, &w[history..]);
        Ok(Forecast::from_values(predictions))
    }

    fn predict_with_intervals(&self, horizon: usize, level: f64) -> Result<Forecast> {
        check_level(level)?;
        let forecast = self.predict(horizon)?;
        let state = self.state.as_ref().ok_or(SplitError::FitRequired)?;

        let z = quantile_normal((1.0 + level) / 2.0);
        let (lower, upper) = forecast
            .point()
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                let se = (state.residual_variance * (i + 1) as f64).sqrt();
                (p - z * se, p + z * se)
            })
            .unzip();

        Forecast::from_values_with_interval(forecast.point().to_vec(), level, lower, upper)
    }

    fn order(&self) -> Option<ModelOrder> {
        Some(self.order)
    }

    fn name(&self) -> &str {
        if self.order.is_seasonal() {
            "SARIMA"
        } else {
            "ARIMA"
        }
    }

    fn is_fitted(&self) -> bool {
        self.state.is_some()
    }
}
