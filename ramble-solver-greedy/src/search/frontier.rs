//! Priority queue and path arena shared by both searches.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ramble_core::{Network, NodeId};

/// A frontier entry. Lower cost pops first; equal costs pop in insertion
/// order.
#[derive(Debug, Clone, Copy)]
pub(super) struct Entry<T> {
    pub(super) cost: f64,
    pub(super) seq: u64,
    pub(super) state: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}

// Min-heap by (cost, seq), reversed for `BinaryHeap`.
impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority frontier with deterministic tie-breaking.
#[derive(Debug)]
pub(super) struct Frontier<T> {
    heap: BinaryHeap<Entry<T>>,
    next_seq: u64,
}

impl<T> Frontier<T> {
    pub(super) const fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub(super) fn push(&mut self, cost: f64, state: T) {
        self.heap.push(Entry {
            cost,
            seq: self.next_seq,
            state,
        });
        self.next_seq = self.next_seq.wrapping_add(1);
    }

    pub(super) fn pop(&mut self) -> Option<T> {
        self.heap.pop().map(|entry| entry.state)
    }
}

#[derive(Debug, Clone, Copy)]
struct Trail {
    node: usize,
    parent: Option<usize>,
}

/// Parent-linked path storage; each frontier entry holds one arena slot
/// instead of a copy of its whole path.
#[derive(Debug, Default)]
pub(super) struct PathArena {
    trails: Vec<Trail>,
}

impl PathArena {
    pub(super) fn root(&mut self, node: usize) -> usize {
        self.extend(None, node)
    }

    pub(super) fn extend(&mut self, parent: Option<usize>, node: usize) -> usize {
        self.trails.push(Trail { node, parent });
        self.trails.len() - 1
    }

    /// Node identifiers from the root to `slot`.
    pub(super) fn path(&self, network: &Network, slot: usize) -> Vec<NodeId> {
        let mut indices = Vec::new();
        let mut cursor = Some(slot);
        while let Some(current) = cursor {
            let Some(trail) = self.trails.get(current) else {
                break;
            };
            indices.push(trail.node);
            cursor = trail.parent;
        }
        indices
            .into_iter()
            .rev()
            .filter_map(|idx| network.node_at(idx).map(|node| node.id))
            .collect()
    }
}
