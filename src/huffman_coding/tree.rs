use log::{debug, trace};

use super::huffman::{Node, NodeData};
use super::min_heap::MinHeap;
use crate::error::{HuffError, Result};
use crate::tools::freq_count::SymbolFreq;

/// A finished huffman tree. The tree owns every node through its root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Build the tree from an ordered frequency table. An empty table has no tree.
    pub fn build(table: &[SymbolFreq]) -> Result<Self> {
        if table.is_empty() {
            return Err(HuffError::EmptyInput);
        }

        let mut heap = MinHeap::with_capacity(table.len())?;
        for sf in table {
            heap.insert(Node::leaf(sf.symbol, sf.freq))?;
        }

        // Pare the heap down to one node, putting the smaller of each pair on the left.
        while heap.len() > 1 {
            let (Some(left), Some(right)) = (heap.extract_min(), heap.extract_min()) else {
                break;
            };
            trace!(
                "Merging weights {} and {} into {}",
                left.weight,
                right.weight,
                left.weight + right.weight
            );
            heap.insert(Node::merge(left, right))?;
        }

        let root = heap.extract_min().ok_or(HuffError::EmptyInput)?;
        let tree = HuffmanTree { root };
        debug!(
            "Built tree over {} symbols, weight {}, depth {}.",
            tree.leaf_count(),
            tree.root.weight,
            tree.depth()
        );
        Ok(tree)
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// True when the whole input was one repeated byte, so the root is a leaf.
    pub fn is_degenerate(&self) -> bool {
        self.root.is_leaf()
    }

    /// Total weight of the tree, which is the length of the input it was built from.
    pub fn weight(&self) -> u64 {
        self.root.weight
    }

    pub fn leaf_count(&self) -> usize {
        fn count(node: &Node) -> usize {
            match &node.node_data {
                NodeData::Kids(left, right) => count(left) + count(right),
                NodeData::Leaf(_) => 1,
            }
        }
        count(&self.root)
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        fn depth(node: &Node) -> usize {
            match &node.node_data {
                NodeData::Kids(left, right) => 1 + depth(left).max(depth(right)),
                NodeData::Leaf(_) => 0,
            }
        }
        depth(&self.root)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tools::freq_count::{freq_table, freqs, table_from_counts};

    fn tree_of(data: &[u8]) -> HuffmanTree {
        HuffmanTree::build(&table_from_counts(&freqs(data))).unwrap()
    }

    #[test]
    fn aaab_shape_test() {
        let tree = tree_of(b"aaab");
        assert_eq!(tree.weight(), 4);
        assert!(!tree.is_degenerate());
        match &tree.root().node_data {
            NodeData::Kids(left, right) => {
                assert_eq!(left.node_data, NodeData::Leaf(b'b'));
                assert_eq!(right.node_data, NodeData::Leaf(b'a'));
            }
            NodeData::Leaf(_) => panic!("root should be internal"),
        }
    }

    #[test]
    fn empty_table_test() {
        assert!(matches!(
            HuffmanTree::build(&[]),
            Err(HuffError::EmptyInput)
        ));
    }

    #[test]
    fn single_symbol_test() {
        let tree = tree_of(b"zzzzzz");
        assert!(tree.is_degenerate());
        assert_eq!(tree.leaf_count(), 1);
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.root().node_data, NodeData::Leaf(b'z'));
    }

    #[test]
    fn internal_weights_test() {
        fn check(node: &Node) -> u64 {
            match &node.node_data {
                NodeData::Kids(left, right) => {
                    let sum = check(left) + check(right);
                    assert_eq!(node.weight, sum);
                    assert_eq!(node.symbol, 0);
                    sum
                }
                NodeData::Leaf(s) => {
                    assert_eq!(*s, node.symbol);
                    node.weight
                }
            }
        }
        let data = b"The quick brown fox jumps over the lazy dog, again and again.";
        let tree = tree_of(data);
        assert_eq!(check(tree.root()), data.len() as u64);
        assert_eq!(
            tree.leaf_count(),
            freq_table(&mut data.as_slice()).unwrap().len()
        );
    }

    #[test]
    fn deterministic_test() {
        let data = b"abracadabra, abracadabra, all equal weights here";
        assert_eq!(tree_of(data), tree_of(data));
    }

    #[test]
    fn full_alphabet_depth_test() {
        let table = (0..=255_u8)
            .map(|s| SymbolFreq {
                symbol: s,
                freq: 1,
            })
            .collect::<Vec<_>>();
        let tree = HuffmanTree::build(&table).unwrap();
        assert_eq!(tree.leaf_count(), 256);
        // Equal weights give a perfectly balanced tree
        assert_eq!(tree.depth(), 8);
    }

    #[test]
    fn fibonacci_depth_test() {
        // Fibonacci weights build the most lopsided tree possible
        let mut fib = vec![1_u64, 1];
        while fib.len() < 40 {
            let n = fib[fib.len() - 1] + fib[fib.len() - 2];
            fib.push(n);
        }
        let table = fib
            .iter()
            .enumerate()
            .map(|(i, &freq)| SymbolFreq {
                symbol: i as u8,
                freq,
            })
            .collect::<Vec<_>>();
        let tree = HuffmanTree::build(&table).unwrap();
        assert_eq!(tree.depth(), 39);
    }
}
