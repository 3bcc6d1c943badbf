//! Binary min-heap of huffman nodes.
//!
//! Nodes come out lowest weight first, then lowest symbol. Internal nodes all carry symbol 0, so
//! anything still tied after that comes out in the order it was inserted. This keeps the shape of
//! the tree identical for every run over the same frequency table.

use std::cmp::Ordering;

use log::trace;

use super::huffman::Node;
use crate::error::Result;

#[derive(Debug)]
struct Entry {
    node: Node,
    seq: u64,
}

impl Entry {
    fn order(&self, other: &Self) -> Ordering {
        self.node
            .priority_cmp(&other.node)
            .then(self.seq.cmp(&other.seq))
    }
}

#[derive(Debug, Default)]
pub struct MinHeap {
    elements: Vec<Entry>,
    next_seq: u64,
}

impl MinHeap {
    pub fn new() -> Self {
        MinHeap {
            elements: vec![],
            next_seq: 0,
        }
    }

    /// Create an empty heap with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut heap = Self::new();
        heap.elements.try_reserve(capacity)?;
        Ok(heap)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn parent(i: usize) -> usize {
        (i - 1) / 2
    }

    fn left(i: usize) -> usize {
        2 * i + 1
    }

    fn right(i: usize) -> usize {
        2 * i + 2
    }

    fn less(&self, a: usize, b: usize) -> bool {
        self.elements[a].order(&self.elements[b]) == Ordering::Less
    }

    /// Add a node. Fails only if the backing storage cannot grow.
    pub fn insert(&mut self, node: Node) -> Result<()> {
        self.elements.try_reserve(1)?;
        trace!(
            "heap insert: weight {}, symbol {}, seq {}",
            node.weight,
            node.symbol,
            self.next_seq
        );
        self.elements.push(Entry {
            node,
            seq: self.next_seq,
        });
        self.next_seq += 1;

        // Sift up
        let mut i = self.elements.len() - 1;
        while i > 0 {
            let p = Self::parent(i);
            if !self.less(i, p) {
                break;
            }
            self.elements.swap(i, p);
            i = p;
        }
        Ok(())
    }

    /// Remove and return the smallest node, or None if the heap is empty.
    pub fn extract_min(&mut self) -> Option<Node> {
        if self.elements.is_empty() {
            return None;
        }
        let min = self.elements.swap_remove(0);
        self.min_heapify(0);
        Some(min.node)
    }

    /// Sift down from index i.
    fn min_heapify(&mut self, mut i: usize) {
        let n = self.elements.len();
        loop {
            let l = Self::left(i);
            let r = Self::right(i);
            let mut smallest = i;
            if l < n && self.less(l, smallest) {
                smallest = l;
            }
            if r < n && self.less(r, smallest) {
                smallest = r;
            }
            if smallest == i {
                break;
            }
            self.elements.swap(i, smallest);
            i = smallest;
        }
    }

    #[cfg(test)]
    fn valid_min_heap(&self) -> bool {
        (1..self.len()).all(|i| !self.less(i, Self::parent(i)))
    }
}
