//! Deterministic Huffman tree construction.
//!
//! Standard Huffman construction is ambiguous when frequencies tie. Nodes are therefore
//! ordered by `(freq, min_symbol)`, where `min_symbol` is the smallest byte in the subtree.
//! Subtrees in the queue are disjoint, so no two nodes ever compare equal and a given
//! [`FrequencyTable`] always produces the same tree.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;

/// Huffman tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A symbol and its count.
    Leaf {
        /// Byte value.
        symbol: u8,
        /// Occurrence count.
        freq: u32,
    },
    /// Two owned children; bit 0 selects `left`, bit 1 selects `right`.
    Internal {
        /// Sum of the children's counts.
        freq: u64,
        /// Smallest symbol anywhere below this node.
        min_symbol: u8,
        /// Subtree reached on bit 0.
        left: Box<Node>,
        /// Subtree reached on bit 1.
        right: Box<Node>,
    },
}

impl Node {
    /// Aggregate count of the subtree.
    pub fn freq(&self) -> u64 {
        match self {
            Node::Leaf { freq, .. } => *freq as u64,
            Node::Internal { freq, .. } => *freq,
        }
    }

    /// Smallest symbol in the subtree.
    pub fn min_symbol(&self) -> u8 {
        match self {
            Node::Leaf { symbol, .. } => *symbol,
            Node::Internal { min_symbol, .. } => *min_symbol,
        }
    }

    /// True for leaves.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    fn merge(left: Node, right: Node) -> Node {
        Node::Internal {
            freq: left.freq() + right.freq(),
            min_symbol: left.min_symbol().min(right.min_symbol()),
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

/// Queue entry with the inverted `(freq, min_symbol)` order `BinaryHeap` needs for min-first pops.
#[derive(Debug, PartialEq, Eq)]
struct Pending(Node);

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        (other.0.freq(), other.0.min_symbol()).cmp(&(self.0.freq(), self.0.min_symbol()))
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A Huffman tree rebuilt identically on both sides of the codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Build the tree for `table`.
    ///
    /// The lower of the two popped nodes becomes the left child. A table with a single
    /// entry yields a tree whose root is that leaf.
    ///
    /// # Errors
    /// Returns [`Error::MalformedTree`] if the table is empty.
    pub fn build(table: &FrequencyTable) -> Result<Self> {
        let mut pq: BinaryHeap<Pending> = table
            .iter()
            .map(|(symbol, freq)| Pending(Node::Leaf { symbol, freq }))
            .collect();

        while pq.len() > 1 {
            let (Some(Pending(left)), Some(Pending(right))) = (pq.pop(), pq.pop()) else {
                break;
            };
            pq.push(Pending(Node::merge(left, right)));
        }

        pq.pop()
            .map(|Pending(root)| Self { root })
            .ok_or(Error::MalformedTree)
    }

    /// Root node.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        fn count(node: &Node) -> usize {
            match node {
                Node::Leaf { .. } => 1,
                Node::Internal { left, right, .. } => count(left) + count(right),
            }
        }
        count(&self.root)
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        fn depth(node: &Node) -> usize {
            match node {
                Node::Leaf { .. } => 0,
                Node::Internal { left, right, .. } => 1 + depth(left).max(depth(right)),
            }
        }
        depth(&self.root)
    }
}
