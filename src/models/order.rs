//! Model order descriptions and the labels derived from them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Seasonal part of an ARIMA order: `(P, D, Q)[period]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeasonalOrder {
    /// Seasonal AR order (P).
    pub p: usize,
    /// Seasonal differencing order (D).
    pub d: usize,
    /// Seasonal MA order (Q).
    pub q: usize,
    /// Season length in observations.
    pub period: usize,
}

impl SeasonalOrder {
    pub fn new(p: usize, d: usize, q: usize, period: usize) -> Self {
        Self { p, d, q, period }
    }

    /// A seasonal order with no terms, or a period of 0 or 1, has no effect.
    pub fn is_active(&self) -> bool {
        self.period > 1 && self.p + self.d + self.q > 0
    }
}

/// Non-seasonal `(p, d, q)` order plus an optional seasonal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelOrder {
    /// AR order (p).
    pub p: usize,
    /// Differencing order (d).
    pub d: usize,
    /// MA order (q).
    pub q: usize,
    pub seasonal: Option<SeasonalOrder>,
}

impl ModelOrder {
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self {
            p,
            d,
            q,
            seasonal: None,
        }
    }

    pub fn with_seasonal(mut self, seasonal: SeasonalOrder) -> Self {
        self.seasonal = Some(seasonal);
        self
    }

    /// The seasonal order, if it has any effect.
    pub fn active_seasonal(&self) -> Option<SeasonalOrder> {
        self.seasonal.filter(SeasonalOrder::is_active)
    }

    pub fn is_seasonal(&self) -> bool {
        self.active_seasonal().is_some()
    }

    /// Display label, e.g. `ARIMA(1,1,1)` or `ARIMA(1,1,1)(0,1,1)[12]`.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl Default for ModelOrder {
    fn default() -> Self {
        Self::new(1, 1, 1)
    }
}

impl fmt::Display for ModelOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ARIMA({},{},{})", self.p, self.d, self.q)?;
        if let Some(s) = self.active_seasonal() {
            write!(f, "({},{},{})[{}]", s.p, s.d, s.q, s.period)?;
        }
        Ok(())
    }
}
