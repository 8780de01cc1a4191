//! Ordered series representations and the slicing capability the splitters need.

use crate::core::LabeledTable;
use crate::error::{Result, SplitError};
use std::ops::Range;

/// The representation an [`OrderedSeries`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    /// Plain numeric array.
    Numeric,
    /// Row-labeled table.
    Labeled,
}

/// An ordered sequence of observations, either a plain array or a labeled table.
///
/// Position encodes time in both variants. Every operation that produces a new
/// series from an existing one returns the same variant it was given.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderedSeries {
    Numeric(Vec<f64>),
    Labeled(LabeledTable),
}

impl OrderedSeries {
    pub fn kind(&self) -> SeriesKind {
        match self {
            OrderedSeries::Numeric(_) => SeriesKind::Numeric,
            OrderedSeries::Labeled(_) => SeriesKind::Labeled,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            OrderedSeries::Numeric(values) => values.len(),
            OrderedSeries::Labeled(table) => table.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The values forecasts are fitted to and scored against.
    ///
    /// For a table this is its first column.
    pub fn primary_values(&self) -> &[f64] {
        match self {
            OrderedSeries::Numeric(values) => values,
            OrderedSeries::Labeled(table) => table.primary_values(),
        }
    }

    pub fn as_table(&self) -> Option<&LabeledTable> {
        match self {
            OrderedSeries::Labeled(table) => Some(table),
            OrderedSeries::Numeric(_) => None,
        }
    }

    pub fn as_numeric(&self) -> Option<&[f64]> {
        match self {
            OrderedSeries::Numeric(values) => Some(values),
            OrderedSeries::Labeled(_) => None,
        }
    }

    /// Concatenate series of the same kind, in order.
    pub fn concat<'a>(parts: impl IntoIterator<Item = &'a OrderedSeries>) -> Result<OrderedSeries> {
        let mut parts = parts.into_iter();
        let mut result = parts.next().cloned().ok_or(SplitError::EmptyData)?;

        for part in parts {
            match (&mut result, part) {
                (OrderedSeries::Numeric(acc), OrderedSeries::Numeric(values)) => {
                    acc.extend_from_slice(values);
                }
                (OrderedSeries::Labeled(acc), OrderedSeries::Labeled(table)) => {
                    acc.append(table)?;
                }
                _ => {
                    return Err(SplitError::InvalidParameter(
                        "cannot concatenate a numeric array with a labeled table".to_string(),
                    ))
                }
            }
        }

        Ok(result)
    }
}

impl From<Vec<f64>> for OrderedSeries {
    fn from(values: Vec<f64>) -> Self {
        OrderedSeries::Numeric(values)
    }
}

impl From<LabeledTable> for OrderedSeries {
    fn from(table: LabeledTable) -> Self {
        OrderedSeries::Labeled(table)
    }
}

/// A sequence that can be cut into contiguous pieces without changing its type.
pub trait Splittable: Sized {
    /// Number of observations.
    fn len(&self) -> usize;

    /// Copy out the observations in `range`, preserving order and representation.
    fn slice(&self, range: Range<usize>) -> Result<Self>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone> Splittable for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn slice(&self, range: Range<usize>) -> Result<Self> {
        self.get(range.clone())
            .map(|s| s.to_vec())
            .ok_or(SplitError::IndexOutOfBounds {
                index: range.end,
                size: Vec::len(self),
            })
    }
}

impl Splittable for LabeledTable {
    fn len(&self) -> usize {
        LabeledTable::len(self)
    }

    fn slice(&self, range: Range<usize>) -> Result<Self> {
        LabeledTable::slice(self, range.start, range.end)
    }
}

impl Splittable for OrderedSeries {
    fn len(&self) -> usize {
        OrderedSeries::len(self)
    }

    fn slice(&self, range: Range<usize>) -> Result<Self> {
        match self {
            OrderedSeries::Numeric(values) => values.slice(range).map(OrderedSeries::Numeric),
            OrderedSeries::Labeled(table) => {
                Splittable::slice(table, range).map(OrderedSeries::Labeled)
            }
        }
    }
}
