//! Adjacency layer: directed edges between antennas

use crate::antenna::{Antenna, VertexId};
use crate::error::{Error, Result};
use crate::network::Network;

/// Which antenna pairs [`Network::interlink`] connects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InterlinkMode {
    /// Connect antennas sharing a frequency
    pub same_frequency: bool,

    /// Connect antennas with different frequencies
    pub different_frequency: bool,

    /// Skip pairs that are already connected instead of adding a second edge
    pub check_duplicates: bool,
}

impl InterlinkMode {
    /// Same-frequency pairs only
    pub fn same() -> Self {
        Self {
            same_frequency: true,
            ..Default::default()
        }
    }

    pub fn with_different(mut self, enabled: bool) -> Self {
        self.different_frequency = enabled;
        self
    }

    pub fn with_same(mut self, enabled: bool) -> Self {
        self.same_frequency = enabled;
        self
    }

    pub fn checked(mut self, enabled: bool) -> Self {
        self.check_duplicates = enabled;
        self
    }

    fn connects(&self, a: &Antenna, b: &Antenna) -> bool {
        if a.frequency == b.frequency {
            self.same_frequency
        } else {
            self.different_frequency
        }
    }
}

impl Network {
    /// Add a directed edge `source -> target`
    ///
    /// The new edge is placed at the front of the source's edge list.
    /// With `check_duplicate`, an existing edge to the same target is
    /// reported as [`Error::EdgeExists`].
    pub fn add_edge(&mut self, source: VertexId, target: VertexId, check_duplicate: bool) -> Result<()> {
        let to = match (self.antenna(source), self.antenna(target)) {
            (None, None) => return Err(Error::BothInvalid),
            (None, Some(_)) => return Err(Error::SourceInvalid),
            (Some(_), None) => return Err(Error::TargetInvalid),
            (Some(_), Some(target)) => target.position(),
        };

        let vertex = self.vertex_mut(source).ok_or(Error::SourceInvalid)?;
        if check_duplicate && vertex.edges.contains(&target) {
            return Err(Error::EdgeExists {
                from: vertex.antenna.position(),
                to,
            });
        }

        vertex
            .edges
            .try_reserve(1)
            .map_err(|_| Error::AllocationFailure)?;
        vertex.edges.push_front(target);
        Ok(())
    }

    /// Remove the first edge `source -> target`
    pub fn remove_edge(&mut self, source: VertexId, target: VertexId) -> Result<()> {
        let to = match (self.antenna(source), self.antenna(target)) {
            (None, None) => return Err(Error::BothInvalid),
            (None, Some(_)) => return Err(Error::SourceInvalid),
            (Some(_), None) => return Err(Error::TargetInvalid),
            (Some(_), Some(target)) => target.position(),
        };

        let vertex = self.vertex_mut(source).ok_or(Error::SourceInvalid)?;
        match vertex.edges.iter().position(|edge| *edge == target) {
            Some(index) => {
                vertex.edges.remove(index);
                Ok(())
            }
            None => Err(Error::EdgeNotFound {
                from: vertex.antenna.position(),
                to,
            }),
        }
    }

    /// Connect every pair of distinct antennas matching `mode`, in both
    /// directions. Returns the number of edges created.
    ///
    /// When duplicates are checked, already connected directions are
    /// skipped. Any other failure stops the pass.
    pub fn interlink(&mut self, mode: InterlinkMode) -> Result<usize> {
        let antennas: Vec<(VertexId, Antenna)> = self.vertices().collect();
        let mut created = 0;
        let mut skipped = 0;

        for (i, (a, antenna_a)) in antennas.iter().enumerate() {
            for (b, antenna_b) in &antennas[i + 1..] {
                if !mode.connects(antenna_a, antenna_b) {
                    continue;
                }
                for (source, target) in [(*a, *b), (*b, *a)] {
                    match self.add_edge(source, target, mode.check_duplicates) {
                        Ok(()) => created += 1,
                        Err(Error::EdgeExists { .. }) => skipped += 1,
                        Err(e) => return Err(e),
                    }
                }
            }
        }

        tracing::info!(
            "Interlinked {} antennas: {} edges created, {} already present",
            antennas.len(),
            created,
            skipped
        );
        Ok(created)
    }

    /// Iterate the targets of a vertex's edges in edge-list order
    pub fn edges_of(&self, id: VertexId) -> Result<impl Iterator<Item = (VertexId, Antenna)> + '_> {
        let vertex = self.vertex(id).ok_or(Error::StartInvalid)?;
        Ok(vertex
            .edges
            .iter()
            .filter_map(move |target| self.antenna(*target).map(|antenna| (*target, antenna))))
    }

    /// Total number of directed edges
    pub fn edge_count(&self) -> usize {
        self.vertices()
            .filter_map(|(id, _)| self.vertex(id))
            .map(|vertex| vertex.edges.len())
            .sum()
    }
}
