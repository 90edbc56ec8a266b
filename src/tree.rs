use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::fmt::{self, Display};

use crate::error::{Error, Result};
use crate::frequency::FrequencyMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: char,
        weight: usize,
    },
    Internal {
        weight: usize,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn leaf(symbol: char, weight: usize) -> Self {
        Node::Leaf { symbol, weight }
    }

    pub fn weight(&self) -> usize {
        match self {
            Node::Leaf { weight, .. } => *weight,
            Node::Internal { weight, .. } => *weight,
        }
    }

    /// `left` is the node taken from the queue first.
    pub fn merge(left: Self, right: Self) -> Self {
        Node::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    fn height(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { left, right, .. } => 1 + left.height().max(right.height()),
        }
    }

    fn collect_leaves(&self, out: &mut Vec<(char, usize)>) {
        match self {
            Node::Leaf { symbol, weight } => out.push((*symbol, *weight)),
            Node::Internal { left, right, .. } => {
                left.collect_leaves(out);
                right.collect_leaves(out);
            }
        }
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize, label: &str) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match self {
            Node::Leaf { symbol, weight } => {
                writeln!(f, "{indent}{label}-> Leaf {symbol:?} [weight: {weight}]")
            }
            Node::Internal {
                weight,
                left,
                right,
            } => {
                writeln!(f, "{indent}{label}-> Internal [weight: {weight}]")?;
                left.fmt_indented(f, depth + 1, "L")?;
                right.fmt_indented(f, depth + 1, "R")
            }
        }
    }
}

/// Entry of the merge queue.
///
/// Ordered by weight, then by creation sequence, so equal weights pop in the
/// order their nodes were made. Leaves are sequenced by ascending symbol.
struct QueueEntry {
    weight: usize,
    seq: usize,
    node: Node,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.weight, self.seq).cmp(&(other.weight, other.seq))
    }
}

/// A Huffman tree. Each node owns its children; dropping the tree frees it whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    root: Node,
}

impl Tree {
    pub fn build(frequencies: &FrequencyMap) -> Result<Self> {
        let mut queue: BinaryHeap<Reverse<QueueEntry>> = frequencies
            .iter()
            .enumerate()
            .map(|(seq, (symbol, weight))| {
                Reverse(QueueEntry {
                    weight,
                    seq,
                    node: Node::leaf(symbol, weight),
                })
            })
            .collect();
        let mut next_seq = queue.len();

        let root = loop {
            let Reverse(left) = queue.pop().ok_or(Error::EmptyAlphabet)?;
            let Some(Reverse(right)) = queue.pop() else {
                break left.node;
            };

            let node = Node::merge(left.node, right.node);
            queue.push(Reverse(QueueEntry {
                weight: node.weight(),
                seq: next_seq,
                node,
            }));
            next_seq += 1;
        };

        let tree = Tree { root };
        tracing::debug!(
            leaves = tree.leaf_count(),
            height = tree.height(),
            weight = tree.weight(),
            "built huffman tree"
        );
        Ok(tree)
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Frequency of the root, i.e. the length of the text the tree was built from.
    pub fn weight(&self) -> usize {
        self.root.weight()
    }

    pub fn is_single_leaf(&self) -> bool {
        self.root.is_leaf()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Every internal node has two children, so this is always `leaf_count() - 1`.
    pub fn internal_count(&self) -> usize {
        self.leaf_count() - 1
    }

    pub fn height(&self) -> usize {
        self.root.height()
    }

    /// Leaves from left to right.
    pub fn leaves(&self) -> Vec<(char, usize)> {
        let mut out = Vec::new();
        self.root.collect_leaves(&mut out);
        out
    }
}

impl Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.fmt_indented(f, 0, "root")
    }
}
