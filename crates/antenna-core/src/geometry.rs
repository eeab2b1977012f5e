//! Intersection points between two frequency classes

use crate::antenna::{Antenna, Frequency, Point};
use crate::error::{Error, Result};
use crate::network::{Network, Vertices};
use serde::{Deserialize, Serialize};

/// Midpoint between one antenna of each frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intersection {
    pub first: Antenna,
    pub second: Antenna,
    pub midpoint: Point,
}

impl Intersection {
    pub fn between(first: Antenna, second: Antenna) -> Self {
        Self {
            first,
            second,
            midpoint: first.position().midpoint(second.position()),
        }
    }
}

impl std::fmt::Display for Intersection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {} -> {}",
            self.first.position(),
            self.second.position(),
            self.midpoint
        )
    }
}

impl Network {
    /// Every pairing of a `first`-frequency antenna with a
    /// `second`-frequency antenna, in store order
    pub fn intersections(&self, first: Frequency, second: Frequency) -> Result<Intersections<'_>> {
        if first == second {
            return Err(Error::SameFrequency(first));
        }
        tracing::debug!("Listing intersections between '{}' and '{}'", first, second);

        Ok(Intersections {
            network: self,
            first,
            second,
            outer: self.vertices(),
            inner: self.vertices(),
            current: None,
        })
    }
}

/// Lazy cross product of two frequency classes
pub struct Intersections<'a> {
    network: &'a Network,
    first: Frequency,
    second: Frequency,
    outer: Vertices<'a>,
    inner: Vertices<'a>,
    current: Option<Antenna>,
}

impl<'a> Iterator for Intersections<'a> {
    type Item = Intersection;

    fn next(&mut self) -> Option<Intersection> {
        loop {
            let first = match self.current {
                Some(antenna) => antenna,
                None => {
                    let frequency = self.first;
                    let (_, antenna) = self
                        .outer
                        .find(|(_, antenna)| antenna.frequency == frequency)?;
                    self.current = Some(antenna);
                    self.inner = self.network.vertices();
                    antenna
                }
            };

            let frequency = self.second;
            match self.inner.find(|(_, antenna)| antenna.frequency == frequency) {
                Some((_, second)) => return Some(Intersection::between(first, second)),
                None => self.current = None,
            }
        }
    }
}
