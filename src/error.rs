//! Error types for the temporal-split library.

use thiserror::Error;

/// Result type alias for splitting and scoring operations.
pub type Result<T> = std::result::Result<T, SplitError>;

/// The way a requested split boundary fails to fit a series.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryViolation {
    /// A segment size was negative.
    #[error("segment size {0} is negative")]
    Negative(i64),

    /// The boundary consumes the whole series, leaving nothing for the test segment.
    #[error("boundary {boundary} leaves no observations for the test segment")]
    NoRoomLeft { boundary: usize },

    /// Adding the segment sizes overflowed.
    #[error("segment sizes overflow")]
    Overflow,
}

/// Errors that can occur while splitting series or scoring forecasts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SplitError {
    /// The requested split boundary does not leave room for a trailing segment.
    #[error("invalid split boundary for series of length {len}: {violation}")]
    InvalidBoundary {
        violation: BoundaryViolation,
        len: usize,
    },

    /// A model lacks a capability the caller requires.
    #[error("unsupported model '{model}': does not expose {capability}")]
    UnsupportedModel {
        model: String,
        capability: &'static str,
    },

    /// Input data is empty.
    #[error("empty input data")]
    EmptyData,

    /// Insufficient data points for the operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Dimension mismatch between data structures.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Timestamp-related error.
    #[error("timestamp error: {0}")]
    TimestampError(String),

    /// Model has not been fitted yet.
    #[error("model must be fitted before prediction")]
    FitRequired,

    /// Index out of bounds.
    #[error("index out of bounds: {index} (size: {size})")]
    IndexOutOfBounds { index: usize, size: usize },
}

impl SplitError {
    /// Shorthand for a boundary that consumes the whole series.
    pub(crate) fn no_room_left(boundary: usize, len: usize) -> Self {
        SplitError::InvalidBoundary {
            violation: BoundaryViolation::NoRoomLeft { boundary },
            len,
        }
    }
}
