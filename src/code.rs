use std::collections::BTreeMap;

use crate::bits::{Bit, BitString};
use crate::frequency::FrequencyMap;
use crate::tree::{Node, Tree};

pub type Code = BitString;

/// Symbol to root-to-leaf path, left is `0` and right is `1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    char2code: BTreeMap<char, Code>,
}

/// One displayed line of a code table.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CodeRow {
    pub symbol: char,
    pub frequency: usize,
    pub code: Code,
}

impl CodeTable {
    pub fn from_tree(tree: &Tree) -> Self {
        let mut char2code = BTreeMap::new();
        match tree.root() {
            // A lone symbol still needs one bit per occurrence to be countable
            Node::Leaf { symbol, .. } => {
                char2code.insert(*symbol, Code::empty().join(Bit::Zero));
            }
            root => walk(root, &Code::empty(), &mut char2code),
        }
        Self { char2code }
    }

    pub fn get(&self, symbol: char) -> Option<&Code> {
        self.char2code.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.char2code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.char2code.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &Code)> {
        self.char2code.iter().map(|(&s, c)| (s, c))
    }

    pub fn is_prefix_free(&self) -> bool {
        self.char2code.iter().all(|(a, code_a)| {
            self.char2code
                .iter()
                .all(|(b, code_b)| a == b || !code_b.starts_with(code_a))
        })
    }

    /// Number of bits needed to encode a text with these frequencies.
    pub fn encoded_len(&self, frequencies: &FrequencyMap) -> usize {
        frequencies
            .iter()
            .filter_map(|(symbol, count)| self.get(symbol).map(|code| code.len() * count))
            .sum()
    }

    /// Rows in ascending symbol order. Symbols without a frequency get zero.
    pub fn rows(&self, frequencies: &FrequencyMap) -> Vec<CodeRow> {
        self.iter()
            .map(|(symbol, code)| CodeRow {
                symbol,
                frequency: frequencies.get(symbol).unwrap_or(0),
                code: code.clone(),
            })
            .collect()
    }
}

fn walk(node: &Node, prefix: &Code, char2code: &mut BTreeMap<char, Code>) {
    match node {
        Node::Leaf { symbol, .. } => {
            char2code.insert(*symbol, prefix.clone());
        }
        Node::Internal { left, right, .. } => {
            walk(left, &prefix.join(Bit::Zero), char2code);
            walk(right, &prefix.join(Bit::One), char2code);
        }
    }
}
