//! Differencing and its inverse for ARIMA models.

/// Lag-`lag` difference: `y[t] - y[t - lag]`.
///
/// The result is `lag` elements shorter than the input, or empty.
pub fn difference(series: &[f64], lag: usize) -> Vec<f64> {
    if lag == 0 {
        return series.to_vec();
    }
    series
        .iter()
        .skip(lag)
        .zip(series)
        .map(|(curr, prev)| curr - prev)
        .collect()
}

/// Lags applied in order: `seasonal_d` seasonal differences, then `d` regular ones.
pub fn differencing_lags(d: usize, seasonal_d: usize, period: usize) -> Vec<usize> {
    let mut lags = vec![period; seasonal_d];
    lags.extend(std::iter::repeat(1).take(d));
    lags
}

/// Apply each lag in turn, keeping every intermediate series.
///
/// `stages[0]` is the input and `stages[lags.len()]` is the fully differenced series.
pub fn difference_stages(series: &[f64], lags: &[usize]) -> Vec<Vec<f64>> {
    let mut stages = Vec::with_capacity(lags.len() + 1);
    stages.push(series.to_vec());
    for &lag in lags {
        let next = difference(&stages[stages.len() - 1], lag);
        stages.push(next);
    }
    stages
}

/// Continue `history` with values whose lag-`lag` differences are `forecasts`.
///
/// `history` must hold at least `lag` values.
pub fn undifference(history: &[f64], forecasts: &[f64], lag: usize) -> Vec<f64> {
    let mut extended = history.to_vec();
    for &f in forecasts {
        let value = f + extended[extended.len() - lag];
        extended.push(value);
    }
    extended.split_off(history.len())
}

/// Map forecasts of the fully differenced series back to the original scale.
pub fn integrate(stages: &[Vec<f64>], lags: &[usize], forecasts: &[f64]) -> Vec<f64> {
    lags.iter()
        .zip(stages)
        .rev()
        .fold(forecasts.to_vec(), |acc, (&lag, history)| {
            undifference(history, &acc, lag)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difference_regular_and_seasonal() {
        assert_eq!(difference(&[1.0, 3.0, 6.0, 10.0], 1), vec![2.0, 3.0, 4.0]);
        assert_eq!(
            difference(&[1.0, 2.0, 3.0, 4.0, 6.0, 8.0], 3),
            vec![3.0, 4.0, 5.0]
        );
        assert!(difference(&[1.0, 2.0], 3).is_empty());
        assert_eq!(difference(&[1.0, 2.0], 0), vec![1.0, 2.0]);
    }

    #[test]
    fn lags_put_seasonal_first() {
        assert_eq!(differencing_lags(2, 1, 12), vec![12, 1, 1]);
        assert!(differencing_lags(0, 0, 7).is_empty());
    }

    #[test]
    fn integrate_inverts_differencing() {
        let series: Vec<f64> = (0..30).map(|i| (i * i) as f64 + (i % 7) as f64).collect();
        let lags = differencing_lags(1, 1, 7);

        let (history, future) = series.split_at(24);
        let stages = difference_stages(history, &lags);
        let full_stages = difference_stages(&series, &lags);
        let future_diffs = &full_stages[lags.len()][full_stages[lags.len()].len() - future.len()..];

        let restored = integrate(&stages, &lags, future_diffs);
        for (r, f) in restored.iter().zip(future) {
            assert!((r - f).abs() < 1e-9);
        }
    }

    #[test]
    fn integrate_without_lags_is_identity() {
        let stages = difference_stages(&[1.0, 2.0], &[]);
        assert_eq!(integrate(&stages, &[], &[5.0, 6.0]), vec![5.0, 6.0]);
    }
}
