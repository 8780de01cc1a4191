//! Derivative-free minimization used for model parameter estimation.

use std::cmp::Ordering;

/// Outcome of a Nelder-Mead run.
#[derive(Debug, Clone)]
pub struct NelderMeadResult {
    /// Best point found.
    pub point: Vec<f64>,
    /// Objective value at `point`.
    pub value: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// Configuration for Nelder-Mead minimization.
#[derive(Debug, Clone)]
pub struct NelderMeadConfig {
    pub max_iter: usize,
    /// Stop once the spread of objective values across the simplex falls below this.
    pub tolerance: f64,
    /// Reflection coefficient.
    pub alpha: f64,
    /// Expansion coefficient.
    pub gamma: f64,
    /// Contraction coefficient.
    pub rho: f64,
    /// Shrink coefficient.
    pub sigma: f64,
    /// Relative size of the initial simplex.
    pub initial_step: f64,
}

impl Default for NelderMeadConfig {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            tolerance: 1e-8,
            alpha: 1.0,
            gamma: 2.0,
            rho: 0.5,
            sigma: 0.5,
            initial_step: 0.05,
        }
    }
}

impl NelderMeadConfig {
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

struct Vertex {
    point: Vec<f64>,
    value: f64,
}

/// Minimize `objective` starting from `initial`.
///
/// `bounds`, when given, holds one `(min, max)` pair per coordinate; every
/// trial point is clamped into them before evaluation.
///
/// # Example
/// ```
/// use temporal_split::utils::optimization::{nelder_mead, NelderMeadConfig};
///
/// let result = nelder_mead(
///     |x| (x[0] - 2.0).powi(2) + (x[1] + 1.0).powi(2),
///     &[0.0, 0.0],
///     None,
///     &NelderMeadConfig::default(),
/// );
///
/// assert!(result.converged);
/// assert!((result.point[0] - 2.0).abs() < 1e-2);
/// assert!((result.point[1] + 1.0).abs() < 1e-2);
/// ```
pub fn nelder_mead<F>(
    objective: F,
    initial: &[f64],
    bounds: Option<&[(f64, f64)]>,
    config: &NelderMeadConfig,
) -> NelderMeadResult
where
    F: Fn(&[f64]) -> f64,
{
    let n = initial.len();
    if n == 0 {
        return NelderMeadResult {
            point: vec![],
            value: f64::NAN,
            iterations: 0,
            converged: false,
        };
    }

    let evaluate = |point: Vec<f64>| {
        let point = clamp(point, bounds);
        let value = objective(&point);
        Vertex { point, value }
    };

    let mut simplex: Vec<Vertex> = Vec::with_capacity(n + 1);
    simplex.push(evaluate(initial.to_vec()));
    for i in 0..n {
        let mut point = initial.to_vec();
        point[i] += if initial[i].abs() > 1e-10 {
            config.initial_step * initial[i].abs()
        } else {
            config.initial_step
        };
        simplex.push(evaluate(point));
    }

    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iter {
        iterations += 1;
        simplex.sort_by(|a, b| compare(a.value, b.value));

        if simplex[n].value - simplex[0].value < config.tolerance {
            converged = true;
            break;
        }

        let centroid = centroid(&simplex[..n]);
        let worst = &simplex[n];

        let reflected = evaluate(combine(&centroid, &worst.point, -config.alpha));

        if reflected.value < simplex[0].value {
            let expanded = evaluate(combine(&centroid, &reflected.point, config.gamma));
            simplex[n] = if expanded.value < reflected.value {
                expanded
            } else {
                reflected
            };
            continue;
        }

        if reflected.value < simplex[n - 1].value {
            simplex[n] = reflected;
            continue;
        }

        let contracted = if reflected.value < worst.value {
            evaluate(combine(&centroid, &reflected.point, config.rho))
        } else {
            evaluate(combine(&centroid, &worst.point, config.rho))
        };
        if contracted.value < reflected.value.min(worst.value) {
            simplex[n] = contracted;
            continue;
        }

        let best = simplex[0].point.clone();
        for vertex in simplex.iter_mut().skip(1) {
            let shrunk = combine(&best, &vertex.point, config.sigma);
            *vertex = evaluate(shrunk);
        }
    }

    let best = simplex
        .into_iter()
        .min_by(|a, b| compare(a.value, b.value))
        .map(|v| (v.point, v.value))
        .unwrap_or_default();

    NelderMeadResult {
        point: best.0,
        value: best.1,
        iterations,
        converged,
    }
}

/// NaN sorts last so it never becomes the best vertex.
fn compare(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

fn centroid(vertices: &[Vertex]) -> Vec<f64> {
    let dims = vertices[0].point.len();
    let mut centroid = vec![0.0; dims];
    for vertex in vertices {
        for (c, x) in centroid.iter_mut().zip(&vertex.point) {
            *c += x;
        }
    }
    for c in &mut centroid {
        *c /= vertices.len() as f64;
    }
    centroid
}

/// `origin + coef * (point - origin)`
fn combine(origin: &[f64], point: &[f64], coef: f64) -> Vec<f64> {
    origin
        .iter()
        .zip(point)
        .map(|(o, p)| o + coef * (p - o))
        .collect()
}

fn clamp(mut point: Vec<f64>, bounds: Option<&[(f64, f64)]>) -> Vec<f64> {
    if let Some(bounds) = bounds {
        for (x, &(lo, hi)) in point.iter_mut().zip(bounds) {
            *x = x.clamp(lo, hi);
        }
    }
    point
}
