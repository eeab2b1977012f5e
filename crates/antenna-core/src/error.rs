//! Error types for Antenna Core

use crate::antenna::{Frequency, Point};
use thiserror::Error;

/// Result type alias using the network Error
pub type Result<T> = std::result::Result<T, Error>;

/// Network error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Network is not available")]
    NetworkInvalid,

    #[error("Start antenna is invalid")]
    StartInvalid,

    #[error("Source antenna is invalid")]
    SourceInvalid,

    #[error("Target antenna is invalid")]
    TargetInvalid,

    #[error("Source and target antennas are invalid")]
    BothInvalid,

    #[error("Invalid coordinates ({x}, {y}): x must be in 0..={max_x} and y must be non-negative")]
    InvalidCoordinates { x: i64, y: i64, max_x: i32 },

    #[error("Invalid frequency {0:?}: expected a letter A-Z")]
    InvalidFrequency(char),

    #[error("Antenna '{frequency}' already exists at {at}")]
    AntennaExists { frequency: Frequency, at: Point },

    #[error("Edge already exists: {from} -> {to}")]
    EdgeExists { from: Point, to: Point },

    #[error("Antenna not found at {0}")]
    AntennaNotFound(Point),

    #[error("Edge not found: {from} -> {to}")]
    EdgeNotFound { from: Point, to: Point },

    #[error("Frequencies must be different (both are '{0}')")]
    SameFrequency(Frequency),

    #[error("Map of {width}x{height} cells is larger than the render limit of {limit} cells")]
    MapTooLarge { width: u64, height: u64, limit: u64 },

    #[error("Memory allocation failed")]
    AllocationFailure,

    #[error("Queue overflow: more than {capacity} antennas enqueued")]
    QueueOverflow { capacity: usize },

    #[error("Path overflow: path longer than {capacity} antennas")]
    PathOverflow { capacity: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
