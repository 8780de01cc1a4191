//! Temporal splitting of ordered series.
//!
//! Segments are always contiguous and in time order: the training prefix
//! comes first, then the optional validation segment, and the test segment
//! is the most recent suffix. Concatenating the segments in order gives back
//! the original series.

mod boundary;
mod splitter;

pub use boundary::{Segment, SegmentKind, SplitBoundary};
pub use splitter::{
    split_with, train_test_split, train_val_test_split, Partition, TrainTestSplit,
    TrainValTestSplit,
};
