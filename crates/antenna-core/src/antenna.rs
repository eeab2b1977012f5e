//! Antenna (vertex) value types

use crate::error::{Error, Result};
use crate::limits::validate_frequency;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// Frequency symbol of an antenna (A-Z)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct Frequency(char);

impl Frequency {
    /// Create a frequency from an uppercase symbol
    pub fn new(symbol: char) -> Result<Self> {
        validate_frequency(symbol)?;
        Ok(Self(symbol))
    }

    /// Create a frequency, folding lowercase letters to uppercase
    pub fn folded(symbol: char) -> Result<Self> {
        Self::new(symbol.to_ascii_uppercase())
    }

    pub fn as_char(self) -> char {
        self.0
    }
}

impl TryFrom<char> for Frequency {
    type Error = Error;

    fn try_from(symbol: char) -> Result<Self> {
        Self::new(symbol)
    }
}

impl From<Frequency> for char {
    fn from(frequency: Frequency) -> Self {
        frequency.0
    }
}

impl FromStr for Frequency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(symbol), None) => Self::folded(symbol),
            (Some(symbol), Some(_)) => Err(Error::InvalidFrequency(symbol)),
            (None, _) => Err(Error::InvalidFrequency(' ')),
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A position on the map
///
/// Points order by row first (`y`), then column (`x`), which is the order
/// of the vertex store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Integer-truncated midpoint between two points
    pub fn midpoint(self, other: Point) -> Point {
        // The mean of two i32 values always fits back into an i32
        let mean = |a: i32, b: i32| ((i64::from(a) + i64::from(b)) / 2) as i32;
        Point::new(mean(self.x, other.x), mean(self.y, other.y))
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An antenna in the network (a vertex payload)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Antenna {
    pub frequency: Frequency,
    pub x: i32,
    pub y: i32,
}

impl Antenna {
    pub fn new(frequency: Frequency, x: i32, y: i32) -> Self {
        Self { frequency, x, y }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl std::fmt::Display for Antenna {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}'{}", self.frequency, self.position())
    }
}

/// Handle to a vertex in a [`Network`](crate::Network)
///
/// Handles are generational: once the vertex is removed, its handle no
/// longer resolves, even if the slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl VertexId {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub(crate) fn slot(self) -> usize {
        self.index as usize
    }
}
