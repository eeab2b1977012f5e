//! Simple path enumeration by backtracking
//!
//! Paths come out in edge-list order at every branch point. There is no
//! canonical ordering: two networks with the same edges added in a
//! different order enumerate the same paths in a different order.

use crate::antenna::{Antenna, VertexId};
use crate::error::{Error, Result};
use crate::network::Network;
use crate::traversal::VisitSet;
use serde::{Deserialize, Serialize};

/// A simple path between two antennas
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AntennaPath {
    /// Antennas from start to goal, inclusive
    pub antennas: Vec<Antenna>,
}

impl AntennaPath {
    /// Number of antennas on the path
    pub fn len(&self) -> usize {
        self.antennas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.antennas.is_empty()
    }

    /// Number of edges on the path
    pub fn hops(&self) -> usize {
        self.antennas.len().saturating_sub(1)
    }
}

impl std::fmt::Display for AntennaPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, antenna) in self.antennas.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", antenna.position())?;
        }
        Ok(())
    }
}

impl Network {
    /// Enumerate every simple path from `start` to `goal`
    ///
    /// `capacity` bounds the path length in antennas; a longer partial
    /// path yields [`Error::PathOverflow`] and ends the enumeration.
    pub fn all_paths(&self, start: VertexId, goal: VertexId, capacity: usize) -> Result<AllPaths<'_>> {
        match (self.contains(start), self.contains(goal)) {
            (false, false) => return Err(Error::BothInvalid),
            (false, true) => return Err(Error::StartInvalid),
            (true, false) => return Err(Error::TargetInvalid),
            (true, true) => {}
        }
        tracing::debug!(
            "Enumerating paths {:?} -> {:?} (capacity {})",
            self.antenna(start),
            self.antenna(goal),
            capacity
        );

        Ok(AllPaths {
            network: self,
            goal,
            capacity,
            visits: VisitSet::for_network(self),
            stack: Vec::new(),
            pending: Some(start),
            done: false,
        })
    }

    /// Count the simple paths from `start` to `goal`
    pub fn count_paths(&self, start: VertexId, goal: VertexId, capacity: usize) -> Result<usize> {
        self.all_paths(start, goal, capacity)?
            .try_fold(0, |count, path| path.map(|_| count + 1))
    }
}

/// Lazy enumeration of simple paths
///
/// Each vertex on the current partial path is marked while it is on the
/// path and unmarked when the search backs out of it, so sibling branches
/// may reuse it.
pub struct AllPaths<'a> {
    network: &'a Network,
    goal: VertexId,
    capacity: usize,
    visits: VisitSet,
    stack: Vec<(VertexId, usize)>,
    pending: Option<VertexId>,
    done: bool,
}

impl<'a> AllPaths<'a> {
    /// Push `id` onto the current path; yields the path if it is the goal
    fn enter(&mut self, id: VertexId) -> Result<Option<AntennaPath>> {
        if self.stack.len() >= self.capacity {
            return Err(Error::PathOverflow {
                capacity: self.capacity,
            });
        }
        self.visits.mark(id);
        self.stack.push((id, 0));

        if id == self.goal {
            let path = self.current_path();
            self.leave();
            return Ok(Some(path));
        }
        Ok(None)
    }

    fn leave(&mut self) {
        if let Some((id, _)) = self.stack.pop() {
            self.visits.unmark(id);
        }
    }

    fn current_path(&self) -> AntennaPath {
        AntennaPath {
            antennas: self
                .stack
                .iter()
                .filter_map(|(id, _)| self.network.antenna(*id))
                .collect(),
        }
    }

    fn fail(&mut self, error: Error) -> Option<Result<AntennaPath>> {
        tracing::warn!("Path enumeration aborted: {}", error);
        self.done = true;
        self.stack.clear();
        self.visits.reset();
        Some(Err(error))
    }
}

impl<'a> Iterator for AllPaths<'a> {
    type Item = Result<AntennaPath>;

    fn next(&mut self) -> Option<Result<AntennaPath>> {
        if self.done {
            return None;
        }

        if let Some(start) = self.pending.take() {
            match self.enter(start) {
                Ok(Some(path)) => return Some(Ok(path)),
                Ok(None) => {}
                Err(e) => return self.fail(e),
            }
        }

        loop {
            let Some(top) = self.stack.len().checked_sub(1) else {
                self.done = true;
                return None;
            };
            let (id, cursor) = self.stack[top];
            let edge = self
                .network
                .vertex(id)
                .and_then(|vertex| vertex.edges.get(cursor).copied());

            match edge {
                Some(target) => {
                    self.stack[top].1 += 1;
                    if self.visits.is_marked(target) {
                        continue;
                    }
                    match self.enter(target) {
                        Ok(Some(path)) => {
                            tracing::trace!("Found path: {}", path);
                            return Some(Ok(path));
                        }
                        Ok(None) => {}
                        Err(e) => return self.fail(e),
                    }
                }
                None => self.leave(),
            }
        }
    }
}
