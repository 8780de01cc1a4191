//! Split boundaries and the segments they produce.

use crate::error::{BoundaryViolation, Result, SplitError};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Role of a contiguous segment in a temporal split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentKind {
    /// Prefix used to fit models.
    Training,
    /// Middle segment used to choose between models.
    Validation,
    /// Trailing holdout, scored once to estimate future performance.
    Test,
}

impl SegmentKind {
    /// Whether this segment is held out from fitting.
    pub const fn is_holdout(&self) -> bool {
        matches!(self, SegmentKind::Validation | SegmentKind::Test)
    }
}

/// A half-open range `[start, end)` of offsets into the original series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub start: usize,
    pub end: usize,
}

impl Segment {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Element counts for the leading segments of a split.
///
/// The test segment is whatever remains after `training_size` (and
/// `validation_size`, when present) elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitBoundary {
    pub training_size: usize,
    pub validation_size: Option<usize>,
}

impl SplitBoundary {
    /// Boundary for a train/test split.
    pub fn two_way(training_size: usize) -> Self {
        Self {
            training_size,
            validation_size: None,
        }
    }

    /// Boundary for a train/validation/test split.
    pub fn three_way(training_size: usize, validation_size: usize) -> Self {
        Self {
            training_size,
            validation_size: Some(validation_size),
        }
    }

    /// Build a boundary from signed sizes, checked against a series of length `len`.
    pub fn from_signed(len: usize, training_size: i64, validation_size: Option<i64>) -> Result<Self> {
        let to_size = |size: i64| {
            usize::try_from(size).map_err(|_| SplitError::InvalidBoundary {
                violation: BoundaryViolation::Negative(size),
                len,
            })
        };

        let boundary = Self {
            training_size: to_size(training_size)?,
            validation_size: validation_size.map(to_size).transpose()?,
        };
        boundary.validate(len)?;
        Ok(boundary)
    }

    /// Build a boundary from proportions of a series of length `len`.
    ///
    /// Sizes are `floor(len * fraction)`.
    pub fn from_fractions(
        len: usize,
        training_fraction: f64,
        validation_fraction: Option<f64>,
    ) -> Result<Self> {
        let to_size = |fraction: f64| {
            if !(0.0..=1.0).contains(&fraction) {
                return Err(SplitError::InvalidParameter(format!(
                    "fraction must be in [0, 1], got {fraction}"
                )));
            }
            Ok((len as f64 * fraction).floor() as usize)
        };

        let boundary = Self {
            training_size: to_size(training_fraction)?,
            validation_size: validation_fraction.map(to_size).transpose()?,
        };
        boundary.validate(len)?;
        Ok(boundary)
    }

    /// Offset where the test segment starts.
    pub fn test_start(&self) -> Option<usize> {
        match self.validation_size {
            Some(v) => self.training_size.checked_add(v),
            None => Some(self.training_size),
        }
    }

    /// Check that at least one element is left for the test segment.
    ///
    /// Returns the offset where the test segment starts.
    pub fn validate(&self, len: usize) -> Result<usize> {
        let test_start = self.test_start().ok_or(SplitError::InvalidBoundary {
            violation: BoundaryViolation::Overflow,
            len,
        })?;

        if test_start >= len {
            return Err(SplitError::no_room_left(test_start, len));
        }
        Ok(test_start)
    }

    /// The segments this boundary cuts a series of length `len` into, in order.
    pub fn segments(&self, len: usize) -> Result<Vec<Segment>> {
        let test_start = self.validate(len)?;

        let mut segments = vec![Segment {
            kind: SegmentKind::Training,
            start: 0,
            end: self.training_size,
        }];
        if self.validation_size.is_some() {
            segments.push(Segment {
                kind: SegmentKind::Validation,
                start: self.training_size,
                end: test_start,
            });
        }
        segments.push(Segment {
            kind: SegmentKind::Test,
            start: test_start,
            end: len,
        });
        Ok(segments)
    }
}
