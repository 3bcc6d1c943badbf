use std::cmp::Ordering;

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum NodeData {
    Kids(Box<Node>, Box<Node>),
    Leaf(u8),
}

/// A node of the huffman tree. Internal nodes carry symbol 0.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Node {
    pub weight: u64,
    pub symbol: u8,
    pub node_data: NodeData,
}

impl Node {
    /// Create a new leaf
    pub fn leaf(symbol: u8, weight: u64) -> Node {
        Node {
            weight,
            symbol,
            node_data: NodeData::Leaf(symbol),
        }
    }

    /// Join two subtrees. The first argument becomes the left (0) child.
    pub fn merge(left: Node, right: Node) -> Node {
        Node {
            weight: left.weight + right.weight,
            symbol: 0,
            node_data: NodeData::Kids(Box::new(left), Box::new(right)),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.node_data, NodeData::Leaf(_))
    }

    /// Heap ordering: lower weight first, then lower symbol.
    pub fn priority_cmp(&self, other: &Self) -> Ordering {
        self.weight
            .cmp(&other.weight)
            .then(self.symbol.cmp(&other.symbol))
    }
}
