//! Vertex store: the ordered sequence of antennas
//!
//! Vertices live in an arena of generational slots. The store order is a
//! singly-linked sequence threaded through the slots (`head` and each
//! vertex's `next`), kept sorted by row (`y`) and then column (`x`).

use crate::antenna::{Antenna, Frequency, Point, VertexId};
use crate::config::NetworkConfig;
use crate::error::{Error, Result};
use crate::limits::validate_coordinates;
use std::collections::VecDeque;

/// A vertex in the store
#[derive(Debug, Clone)]
pub(crate) struct Vertex {
    pub(crate) antenna: Antenna,

    /// Next vertex in store order
    pub(crate) next: Option<VertexId>,

    /// Outgoing edges, most recently added first
    pub(crate) edges: VecDeque<VertexId>,
}

#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    vertex: Option<Vertex>,
}

/// The antenna network: vertex store plus adjacency
#[derive(Debug, Clone, Default)]
pub struct Network {
    config: NetworkConfig,
    slots: Vec<Slot>,
    free: Vec<u32>,
    head: Option<VertexId>,
    count: usize,
}

impl Network {
    /// Create an empty network
    pub fn new(config: NetworkConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Number of antennas in the network
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// First antenna in store order
    pub fn head(&self) -> Option<VertexId> {
        self.head
    }

    /// Whether a handle refers to a live vertex of this network
    pub fn contains(&self, id: VertexId) -> bool {
        self.vertex(id).is_some()
    }

    /// Antenna stored at a handle
    pub fn antenna(&self, id: VertexId) -> Option<Antenna> {
        self.vertex(id).map(|v| v.antenna)
    }

    /// Number of arena slots; an upper bound on every live slot index
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.slots
            .get(id.slot())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.vertex.as_ref())
    }

    pub(crate) fn vertex_mut(&mut self, id: VertexId) -> Option<&mut Vertex> {
        self.slots
            .get_mut(id.slot())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.vertex.as_mut())
    }

    /// Iterate antennas head-to-tail
    pub fn vertices(&self) -> Vertices<'_> {
        Vertices {
            network: self,
            cursor: self.head,
        }
    }

    /// Insert an antenna at its sorted position
    ///
    /// Fails with [`Error::AntennaExists`] carrying the frequency already
    /// stored at `(x, y)`.
    pub fn insert_ordered(&mut self, frequency: Frequency, x: i32, y: i32) -> Result<VertexId> {
        validate_coordinates(x, y, self.config.max_x)?;
        let target = Point::new(x, y);

        let mut previous: Option<VertexId> = None;
        let mut current = self.head;
        while let Some(id) = current {
            let vertex = self.vertex(id).ok_or(Error::NetworkInvalid)?;
            let position = vertex.antenna.position();
            if position >= target {
                if position == target {
                    return Err(Error::AntennaExists {
                        frequency: vertex.antenna.frequency,
                        at: target,
                    });
                }
                break;
            }
            previous = current;
            current = vertex.next;
        }

        let id = self.allocate(Antenna::new(frequency, x, y), current)?;
        self.link_after(previous, id)?;
        self.count += 1;

        tracing::debug!("Inserted antenna '{}' at {}", frequency, target);
        Ok(id)
    }

    /// Append an antenna after `last` without ordering or duplicate checks
    ///
    /// Used for bulk loading input that already arrives in row-major
    /// order. `last` must be the current tail, or `None` when the network
    /// is empty.
    pub fn append_unordered(
        &mut self,
        last: Option<VertexId>,
        frequency: Frequency,
        x: i32,
        y: i32,
    ) -> Result<VertexId> {
        match last {
            None if self.head.is_some() => return Err(Error::SourceInvalid),
            Some(tail) => match self.vertex(tail) {
                Some(vertex) if vertex.next.is_none() => {}
                _ => return Err(Error::SourceInvalid),
            },
            None => {}
        }

        let id = self.allocate(Antenna::new(frequency, x, y), None)?;
        self.link_after(last, id)?;
        self.count += 1;
        Ok(id)
    }

    /// Find the antenna at `(x, y)`
    pub fn find(&self, x: i32, y: i32) -> Result<VertexId> {
        let target = Point::new(x, y);
        for (id, antenna) in self.vertices() {
            // Sorted by row: nothing further down can match
            if antenna.y > y {
                break;
            }
            if antenna.position() == target {
                return Ok(id);
            }
        }
        Err(Error::AntennaNotFound(target))
    }

    /// Remove the antenna at `(x, y)`, returning its frequency
    ///
    /// The vertex's own edges are dropped with it, and every edge from
    /// another vertex that targets it is severed.
    pub fn remove(&mut self, x: i32, y: i32) -> Result<Frequency> {
        let target = Point::new(x, y);

        let mut previous: Option<VertexId> = None;
        let mut current = self.head;
        let mut found = None;
        while let Some(id) = current {
            let vertex = self.vertex(id).ok_or(Error::NetworkInvalid)?;
            if vertex.antenna.y > y {
                break;
            }
            if vertex.antenna.position() == target {
                found = Some((id, vertex.next));
                break;
            }
            previous = current;
            current = vertex.next;
        }

        let (id, next) = found.ok_or(Error::AntennaNotFound(target))?;
        match previous {
            Some(prev) => {
                if let Some(vertex) = self.vertex_mut(prev) {
                    vertex.next = next;
                }
            }
            None => self.head = next,
        }

        let removed = self.release(id).ok_or(Error::AntennaNotFound(target))?;
        self.count -= 1;

        let mut severed = 0;
        for slot in &mut self.slots {
            if let Some(vertex) = slot.vertex.as_mut() {
                let before = vertex.edges.len();
                vertex.edges.retain(|edge| *edge != id);
                severed += before - vertex.edges.len();
            }
        }

        tracing::debug!(
            "Removed antenna '{}' at {} ({} outgoing, {} incoming edges dropped)",
            removed.antenna.frequency,
            target,
            removed.edges.len(),
            severed
        );
        Ok(removed.antenna.frequency)
    }

    fn allocate(&mut self, antenna: Antenna, next: Option<VertexId>) -> Result<VertexId> {
        let vertex = Vertex {
            antenna,
            next,
            edges: VecDeque::new(),
        };

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.vertex = Some(vertex);
            return Ok(VertexId::new(index, slot.generation));
        }

        let index = u32::try_from(self.slots.len()).map_err(|_| Error::AllocationFailure)?;
        self.slots
            .try_reserve(1)
            .map_err(|_| Error::AllocationFailure)?;
        self.slots.push(Slot {
            generation: 0,
            vertex: Some(vertex),
        });
        Ok(VertexId::new(index, 0))
    }

    fn link_after(&mut self, previous: Option<VertexId>, id: VertexId) -> Result<()> {
        match previous {
            Some(prev) => {
                let vertex = self.vertex_mut(prev).ok_or(Error::SourceInvalid)?;
                vertex.next = Some(id);
            }
            None => self.head = Some(id),
        }
        Ok(())
    }

    fn release(&mut self, id: VertexId) -> Option<Vertex> {
        let slot = self
            .slots
            .get_mut(id.slot())
            .filter(|slot| slot.generation == id.generation)?;
        let vertex = slot.vertex.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        Some(vertex)
    }
}

/// Iterator over the vertex store in order
pub struct Vertices<'a> {
    network: &'a Network,
    cursor: Option<VertexId>,
}

impl<'a> Iterator for Vertices<'a> {
    type Item = (VertexId, Antenna);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let vertex = self.network.vertex(id)?;
        self.cursor = vertex.next;
        Some((id, vertex.antenna))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn freq(symbol: char) -> Frequency {
        Frequency::new(symbol).unwrap()
    }

    fn positions(network: &Network) -> Vec<(i32, i32)> {
        network.vertices().map(|(_, a)| (a.x, a.y)).collect()
    }

    fn assert_sorted(network: &Network) {
        let points: Vec<Point> = network.vertices().map(|(_, a)| a.position()).collect();
        assert!(points.windows(2).all(|w| w[0] < w[1]), "unsorted: {:?}", points);
        assert_eq!(points.len(), network.len());
    }

    #[test]
    fn test_empty_network() {
        let network = Network::default();
        assert!(network.is_empty());
        assert!(network.head().is_none());
        assert_eq!(network.vertices().count(), 0);
    }

    #[test]
    fn test_insert_keeps_order() {
        let mut network = Network::default();
        for (x, y) in [(5, 2), (0, 0), (3, 2), (9, 0), (1, 1), (0, 2), (4, 0)] {
            network.insert_ordered(freq('A'), x, y).unwrap();
            assert_sorted(&network);
        }

        assert_eq!(
            positions(&network),
            vec![(0, 0), (4, 0), (9, 0), (1, 1), (0, 2), (3, 2), (5, 2)]
        );
    }

    #[test]
    fn test_insert_duplicate_reports_existing_frequency() {
        let mut network = Network::default();
        network.insert_ordered(freq('A'), 1, 1).unwrap();

        let err = network.insert_ordered(freq('B'), 1, 1).unwrap_err();
        assert!(matches!(
            err,
            Error::AntennaExists { frequency, at } if frequency.as_char() == 'A' && at == Point::new(1, 1)
        ));
        assert_eq!(network.len(), 1);
    }

    #[test]
    fn test_insert_duplicate_at_head_and_tail() {
        let mut network = Network::default();
        network.insert_ordered(freq('A'), 0, 0).unwrap();
        network.insert_ordered(freq('B'), 7, 3).unwrap();

        assert!(network.insert_ordered(freq('C'), 0, 0).is_err());
        assert!(network.insert_ordered(freq('C'), 7, 3).is_err());
        assert_eq!(network.len(), 2);
    }

    #[test]
    fn test_insert_rejects_invalid_coordinates() {
        let mut network = Network::new(NetworkConfig::new().with_max_x(10));

        assert!(matches!(
            network.insert_ordered(freq('A'), -1, 0),
            Err(Error::InvalidCoordinates { .. })
        ));
        assert!(matches!(
            network.insert_ordered(freq('A'), 0, -3),
            Err(Error::InvalidCoordinates { .. })
        ));
        assert!(matches!(
            network.insert_ordered(freq('A'), 11, 0),
            Err(Error::InvalidCoordinates { max_x: 10, .. })
        ));
        assert!(network.insert_ordered(freq('A'), 10, 0).is_ok());
        assert_eq!(network.len(), 1);
    }

    #[test]
    fn test_append_unordered() {
        let mut network = Network::default();
        let first = network.append_unordered(None, freq('A'), 2, 0).unwrap();
        let second = network
            .append_unordered(Some(first), freq('B'), 0, 1)
            .unwrap();
        network
            .append_unordered(Some(second), freq('A'), 4, 1)
            .unwrap();

        assert_eq!(network.len(), 3);
        assert_eq!(positions(&network), vec![(2, 0), (0, 1), (4, 1)]);
    }

    #[test]
    fn test_append_requires_tail_anchor() {
        let mut network = Network::default();
        let first = network.append_unordered(None, freq('A'), 0, 0).unwrap();
        network.append_unordered(Some(first), freq('A'), 1, 0).unwrap();

        // Not the tail any more
        assert!(matches!(
            network.append_unordered(Some(first), freq('A'), 2, 0),
            Err(Error::SourceInvalid)
        ));
        // No anchor on a non-empty network
        assert!(matches!(
            network.append_unordered(None, freq('A'), 2, 0),
            Err(Error::SourceInvalid)
        ));
        assert_eq!(network.len(), 2);
    }

    #[test]
    fn test_find() {
        let mut network = Network::default();
        let id = network.insert_ordered(freq('C'), 3, 1).unwrap();
        network.insert_ordered(freq('D'), 0, 4).unwrap();

        assert_eq!(network.find(3, 1).unwrap(), id);
        assert!(matches!(network.find(2, 1), Err(Error::AntennaNotFound(_))));
        assert!(matches!(network.find(0, 9), Err(Error::AntennaNotFound(_))));
        assert!(matches!(
            Network::default().find(0, 0),
            Err(Error::AntennaNotFound(_))
        ));
    }

    #[test]
    fn test_insert_then_remove_restores_network() {
        let mut network = Network::default();
        for (x, y) in [(0, 0), (2, 1), (1, 3)] {
            network.insert_ordered(freq('A'), x, y).unwrap();
        }
        let before = positions(&network);

        network.insert_ordered(freq('Q'), 1, 1).unwrap();
        assert_eq!(network.remove(1, 1).unwrap().as_char(), 'Q');

        assert_eq!(network.len(), 3);
        assert_eq!(positions(&network), before);
    }

    #[test]
    fn test_remove_head_and_missing() {
        let mut network = Network::default();
        network.insert_ordered(freq('A'), 0, 0).unwrap();
        network.insert_ordered(freq('B'), 1, 0).unwrap();

        assert_eq!(network.remove(0, 0).unwrap().as_char(), 'A');
        assert_eq!(positions(&network), vec![(1, 0)]);
        assert!(matches!(network.remove(0, 0), Err(Error::AntennaNotFound(_))));
        assert_eq!(network.len(), 1);
    }

    #[test]
    fn test_removed_handle_is_stale() {
        let mut network = Network::default();
        let old = network.insert_ordered(freq('A'), 0, 0).unwrap();
        network.remove(0, 0).unwrap();

        // Slot is reused, but the old handle must not resolve to the new vertex
        let new = network.insert_ordered(freq('B'), 5, 5).unwrap();
        assert_eq!(old.index, new.index);
        assert!(!network.contains(old));
        assert!(network.contains(new));
        assert_eq!(network.antenna(new).unwrap().frequency.as_char(), 'B');
    }
}
