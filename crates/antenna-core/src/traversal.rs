//! Depth-first and breadth-first traversal
//!
//! Traversals are lazy iterators over the antennas they reach. Visit marks
//! live in a [`VisitSet`] owned by the call, or borrowed from the caller
//! when several traversals should share marks (for example to enumerate
//! connected components without revisiting).

use crate::antenna::{Antenna, VertexId};
use crate::error::{Error, Result};
use crate::network::Network;
use std::borrow::BorrowMut;
use std::collections::VecDeque;

/// Visit marks indexed by vertex slot
///
/// A mark records the generation of the vertex it was made for, so a
/// vertex that later reuses the slot starts out unmarked.
#[derive(Debug, Clone, Default)]
pub struct VisitSet {
    marks: Vec<Option<u32>>,
    marked: usize,
}

impl VisitSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A set sized for every vertex of `network`
    pub fn for_network(network: &Network) -> Self {
        Self {
            marks: vec![None; network.capacity()],
            marked: 0,
        }
    }

    /// Mark a vertex, returning `false` if it was already marked
    pub fn mark(&mut self, id: VertexId) -> bool {
        let slot = id.slot();
        if slot >= self.marks.len() {
            self.marks.resize(slot + 1, None);
        }
        match self.marks[slot].replace(id.generation) {
            Some(generation) if generation == id.generation => false,
            // A stale mark from a removed vertex is overwritten, not added
            Some(_) => true,
            None => {
                self.marked += 1;
                true
            }
        }
    }

    pub fn unmark(&mut self, id: VertexId) {
        if let Some(mark) = self.marks.get_mut(id.slot()) {
            if *mark == Some(id.generation) {
                *mark = None;
                self.marked -= 1;
            }
        }
    }

    pub fn is_marked(&self, id: VertexId) -> bool {
        self.marks.get(id.slot()).copied().flatten() == Some(id.generation)
    }

    /// Number of marked vertices
    pub fn len(&self) -> usize {
        self.marked
    }

    pub fn is_empty(&self) -> bool {
        self.marked == 0
    }

    /// Clear every mark
    pub fn reset(&mut self) {
        self.marks.iter_mut().for_each(|mark| *mark = None);
        self.marked = 0;
    }
}

impl Network {
    /// Depth-first traversal from `start` with its own visit marks
    pub fn depth_first(&self, start: VertexId) -> Result<DepthFirst<'_, VisitSet>> {
        self.depth_first_with(start, VisitSet::for_network(self))
    }

    /// Depth-first traversal using caller-owned visit marks
    ///
    /// Marks are left set when the traversal ends; reset them to start over.
    pub fn depth_first_with<V>(&self, start: VertexId, mut visits: V) -> Result<DepthFirst<'_, V>>
    where
        V: BorrowMut<VisitSet>,
    {
        if !self.contains(start) {
            return Err(Error::StartInvalid);
        }
        tracing::debug!("Depth-first traversal from {:?}", self.antenna(start));

        let pending = visits.borrow_mut().mark(start).then_some(start);
        Ok(DepthFirst {
            network: self,
            visits,
            stack: Vec::new(),
            pending,
        })
    }

    /// Breadth-first traversal from `start` with its own visit marks
    ///
    /// At most `capacity` antennas may be enqueued; exceeding it yields
    /// [`Error::QueueOverflow`] and ends the traversal.
    pub fn breadth_first(&self, start: VertexId, capacity: usize) -> Result<BreadthFirst<'_, VisitSet>> {
        self.breadth_first_with(start, capacity, VisitSet::for_network(self))
    }

    /// Breadth-first traversal using caller-owned visit marks
    pub fn breadth_first_with<V>(
        &self,
        start: VertexId,
        capacity: usize,
        mut visits: V,
    ) -> Result<BreadthFirst<'_, V>>
    where
        V: BorrowMut<VisitSet>,
    {
        if !self.contains(start) {
            return Err(Error::StartInvalid);
        }
        tracing::debug!(
            "Breadth-first traversal from {:?} (capacity {})",
            self.antenna(start),
            capacity
        );

        let mut queue = VecDeque::new();
        if visits.borrow_mut().mark(start) {
            if capacity == 0 {
                return Err(Error::QueueOverflow { capacity });
            }
            queue.push_back(start);
        }

        Ok(BreadthFirst {
            network: self,
            visits,
            enqueued: queue.len(),
            queue,
            capacity,
            expand: None,
            done: false,
        })
    }
}

/// Lazy depth-first traversal
///
/// Siblings are visited in edge-list order, matching a recursive
/// traversal that descends into each unvisited target as it is reached.
pub struct DepthFirst<'a, V> {
    network: &'a Network,
    visits: V,
    stack: Vec<(VertexId, usize)>,
    pending: Option<VertexId>,
}

impl<'a, V: BorrowMut<VisitSet>> DepthFirst<'a, V> {
    /// Give back the visit marks
    pub fn into_visits(self) -> V {
        self.visits
    }
}

impl<'a, V: BorrowMut<VisitSet>> Iterator for DepthFirst<'a, V> {
    type Item = Antenna;

    fn next(&mut self) -> Option<Antenna> {
        if let Some(start) = self.pending.take() {
            self.stack.push((start, 0));
            return self.network.antenna(start);
        }

        loop {
            let top = self.stack.len().checked_sub(1)?;
            let (id, cursor) = self.stack[top];
            let edge = self
                .network
                .vertex(id)
                .and_then(|vertex| vertex.edges.get(cursor).copied());

            match edge {
                Some(target) => {
                    self.stack[top].1 += 1;
                    if self.visits.borrow_mut().mark(target) {
                        tracing::trace!("DFS visiting {:?}", self.network.antenna(target));
                        self.stack.push((target, 0));
                        return self.network.antenna(target);
                    }
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// Lazy breadth-first traversal
///
/// Antennas are marked when enqueued, so each is enqueued at most once.
/// Items are `Err` only for [`Error::QueueOverflow`], after which the
/// iterator is exhausted.
pub struct BreadthFirst<'a, V> {
    network: &'a Network,
    visits: V,
    queue: VecDeque<VertexId>,
    capacity: usize,
    enqueued: usize,
    expand: Option<VertexId>,
    done: bool,
}

impl<'a, V: BorrowMut<VisitSet>> BreadthFirst<'a, V> {
    pub fn into_visits(self) -> V {
        self.visits
    }

    fn enqueue_neighbours(&mut self, id: VertexId) -> Result<()> {
        let Some(vertex) = self.network.vertex(id) else {
            return Ok(());
        };
        for target in vertex.edges.iter().copied() {
            if self.visits.borrow_mut().is_marked(target) {
                continue;
            }
            if self.enqueued >= self.capacity {
                return Err(Error::QueueOverflow {
                    capacity: self.capacity,
                });
            }
            self.visits.borrow_mut().mark(target);
            self.queue.push_back(target);
            self.enqueued += 1;
        }
        Ok(())
    }
}

impl<'a, V: BorrowMut<VisitSet>> Iterator for BreadthFirst<'a, V> {
    type Item = Result<Antenna>;

    fn next(&mut self) -> Option<Result<Antenna>> {
        if self.done {
            return None;
        }

        // Expand the antenna yielded last time
        if let Some(previous) = self.expand.take() {
            if let Err(e) = self.enqueue_neighbours(previous) {
                tracing::warn!("Breadth-first traversal aborted: {}", e);
                self.done = true;
                return Some(Err(e));
            }
        }

        let Some(id) = self.queue.pop_front() else {
            self.done = true;
            return None;
        };
        tracing::trace!("BFS visiting {:?}", self.network.antenna(id));
        self.expand = Some(id);
        self.network.antenna(id).map(Ok)
    }
}
