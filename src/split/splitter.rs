//! Two-way and three-way temporal splitters.

use crate::core::Splittable;
use crate::error::Result;
use crate::split::boundary::{Segment, SplitBoundary};

/// Result of a train/test split.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainTestSplit<S> {
    /// Observations `[0, training_size)`.
    pub train: S,
    /// Observations `[training_size, N)`.
    pub test: S,
    boundary: SplitBoundary,
    len: usize,
}

impl<S> TrainTestSplit<S> {
    pub fn boundary(&self) -> SplitBoundary {
        self.boundary
    }

    /// Offsets of both segments in the original series.
    pub fn segments(&self) -> Vec<Segment> {
        segments_of(self.boundary, self.len)
    }

    pub fn into_parts(self) -> (S, S) {
        (self.train, self.test)
    }
}

/// Result of a train/validation/test split.
///
/// Compare candidate models on `validation`. Score the chosen model on
/// `test` once, after selection is finished; scoring `test` earlier turns
/// it into a second validation set and biases the final estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainValTestSplit<S> {
    pub train: S,
    pub validation: S,
    pub test: S,
    boundary: SplitBoundary,
    len: usize,
}

impl<S> TrainValTestSplit<S> {
    pub fn boundary(&self) -> SplitBoundary {
        self.boundary
    }

    /// Offsets of the three segments in the original series.
    pub fn segments(&self) -> Vec<Segment> {
        segments_of(self.boundary, self.len)
    }

    pub fn into_parts(self) -> (S, S, S) {
        (self.train, self.validation, self.test)
    }
}

/// Either kind of split, chosen by the boundary passed to [`split_with`].
#[derive(Debug, Clone, PartialEq)]
pub enum Partition<S> {
    TwoWay(TrainTestSplit<S>),
    ThreeWay(TrainValTestSplit<S>),
}

impl<S> Partition<S> {
    pub fn train(&self) -> &S {
        match self {
            Partition::TwoWay(split) => &split.train,
            Partition::ThreeWay(split) => &split.train,
        }
    }

    pub fn validation(&self) -> Option<&S> {
        match self {
            Partition::TwoWay(_) => None,
            Partition::ThreeWay(split) => Some(&split.validation),
        }
    }

    pub fn test(&self) -> &S {
        match self {
            Partition::TwoWay(split) => &split.test,
            Partition::ThreeWay(split) => &split.test,
        }
    }

    pub fn segments(&self) -> Vec<Segment> {
        match self {
            Partition::TwoWay(split) => split.segments(),
            Partition::ThreeWay(split) => split.segments(),
        }
    }
}

/// Split `series` into a training prefix and a test suffix.
///
/// Fails with `InvalidBoundary` unless `training_size < series.len()`.
/// `training_size == 0` yields an empty training segment.
///
/// # Example
/// ```
/// use temporal_split::split::train_test_split;
///
/// let values: Vec<f64> = (0..100).map(|i| i as f64).collect();
/// let split = train_test_split(&values, 72).unwrap();
///
/// assert_eq!(split.train.len(), 72);
/// assert_eq!(split.test.len(), 28);
/// assert_eq!(split.test[0], 72.0);
/// assert!(train_test_split(&values, 100).is_err());
/// ```
pub fn train_test_split<S: Splittable>(series: &S, training_size: usize) -> Result<TrainTestSplit<S>> {
    let len = series.len();
    let boundary = SplitBoundary::two_way(training_size);
    boundary.validate(len)?;

    let train = series.slice(0..training_size)?;
    let test = series.slice(training_size..len)?;

    tracing::debug!(
        len,
        train = train.len(),
        test = test.len(),
        "split series into train/test"
    );

    Ok(TrainTestSplit {
        train,
        test,
        boundary,
        len,
    })
}

/// Split `series` into training, validation and test segments, in time order.
///
/// Fails with `InvalidBoundary` unless
/// `training_size + validation_size < series.len()`.
///
/// # Example
/// ```
/// use temporal_split::split::train_val_test_split;
///
/// let values: Vec<f64> = (0..100).map(|i| i as f64).collect();
/// let (train, val, test) = train_val_test_split(&values, 44, 28).unwrap().into_parts();
///
/// assert_eq!((train.len(), val.len(), test.len()), (44, 28, 28));
/// assert_eq!(val[0], 44.0);
/// assert_eq!(test[0], 72.0);
/// ```
pub fn train_val_test_split<S: Splittable>(
    series: &S,
    training_size: usize,
    validation_size: usize,
) -> Result<TrainValTestSplit<S>> {
    let len = series.len();
    let boundary = SplitBoundary::three_way(training_size, validation_size);
    let test_start = boundary.validate(len)?;

    let train = series.slice(0..training_size)?;
    let validation = series.slice(training_size..test_start)?;
    let test = series.slice(test_start..len)?;

    tracing::debug!(
        len,
        train = train.len(),
        validation = validation.len(),
        test = test.len(),
        "split series into train/validation/test"
    );

    Ok(TrainValTestSplit {
        train,
        validation,
        test,
        boundary,
        len,
    })
}

/// Split `series` two or three ways depending on whether `boundary` has a validation size.
pub fn split_with<S: Splittable>(series: &S, boundary: SplitBoundary) -> Result<Partition<S>> {
    match boundary.validation_size {
        Some(validation_size) => {
            train_val_test_split(series, boundary.training_size, validation_size)
                .map(Partition::ThreeWay)
        }
        None => train_test_split(series, boundary.training_size).map(Partition::TwoWay),
    }
}

fn segments_of(boundary: SplitBoundary, len: usize) -> Vec<Segment> {
    // Boundary was validated when the split was made.
    boundary.segments(len).unwrap_or_default()
}
