use crate::bits::BitString;
use crate::code::CodeTable;
use crate::error::{Error, Result};
use crate::frequency::FrequencyMap;
use crate::tree::Tree;

/// Frequencies, tree and code table built from one text.
///
/// Serializes as its frequency list only. Tree construction is deterministic,
/// so deserializing rebuilds the exact same tree and table.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(into = "FrequencyMap", try_from = "FrequencyMap")]
pub struct Encoding {
    frequencies: FrequencyMap,
    tree: Tree,
    table: CodeTable,
}

impl Encoding {
    pub fn build(frequencies: FrequencyMap) -> Result<Self> {
        let tree = Tree::build(&frequencies)?;
        let table = CodeTable::from_tree(&tree);
        Ok(Self {
            frequencies,
            tree,
            table,
        })
    }

    pub fn encoder(&self) -> Encoder<'_> {
        Encoder::from_encoding(self)
    }

    pub fn decoder(&self) -> Decoder<'_> {
        Decoder::from_encoding(self)
    }

    pub fn frequencies(&self) -> &FrequencyMap {
        &self.frequencies
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn table(&self) -> &CodeTable {
        &self.table
    }

    pub fn into_parts(self) -> (Tree, CodeTable, FrequencyMap) {
        (self.tree, self.table, self.frequencies)
    }
}

impl From<Encoding> for FrequencyMap {
    fn from(value: Encoding) -> Self {
        value.frequencies
    }
}

impl TryFrom<FrequencyMap> for Encoding {
    type Error = Error;

    fn try_from(value: FrequencyMap) -> Result<Self> {
        Encoding::build(value)
    }
}

/// Count the symbols of `text` and build its tree and code table.
pub fn build_code(text: &str) -> Result<Encoding> {
    Encoding::build(FrequencyMap::of(text))
}

pub fn encode(text: &str, table: &CodeTable) -> Result<BitString> {
    Encoder::new(table).encode(text)
}

pub fn decode(tree: &Tree, encoded: &BitString) -> Result<String> {
    Decoder::new(tree).decode(encoded)
}

/// Give up ownership of a tree, freeing all of its nodes.
pub fn release_tree(tree: Tree) {
    tracing::trace!(leaves = tree.leaf_count(), "releasing huffman tree");
    drop(tree);
}

pub mod decoder;
pub mod encoder;

pub use decoder::Decoder;
pub use encoder::Encoder;

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_build_code_parts_agree() {
        let encoding = build_code("mississippi").unwrap();
        let (tree, table, freq) = encoding.clone().into_parts();

        assert_eq!(tree.weight(), 11);
        assert_eq!(table.len(), freq.len());
        assert_eq!(&freq, encoding.frequencies());
        assert_eq!(&tree, encoding.tree());
        release_tree(tree);
    }

    #[test]
    fn test_round_trip_free_functions() {
        let text = "the quick brown fox jumps over the lazy dog";
        let encoding = build_code(text).unwrap();

        let encoded = encode(text, encoding.table()).unwrap();
        assert_eq!(encoded.len(), encoding.table().encoded_len(encoding.frequencies()));

        let decoded = decode(encoding.tree(), &encoded).unwrap();
        assert_eq!(decoded, text);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(build_code(""), Err(Error::EmptyAlphabet));
    }

    #[test]
    fn test_serialize_encoding() {
        let encoding = build_code("hello, world").unwrap();

        let json = serde_json::to_string_pretty(&encoding).unwrap() + "some trailing data";
        let mut stream = serde_json::Deserializer::from_str(&json).into_iter::<Encoding>();
        let parsed = stream.next().unwrap().unwrap();

        assert_eq!(parsed, encoding);
    }

    #[test]
    fn test_deserialize_empty_list_fails() {
        assert!(serde_json::from_str::<Encoding>("[]").is_err());
    }

    #[test]
    fn test_deserialize_overflowing_counts_fails() {
        let json = r#"[{"symbol":"a","count":18446744073709551615},{"symbol":"b","count":1}]"#;
        assert!(serde_json::from_str::<Encoding>(json).is_err());
    }

    proptest! {
        #[test]
        fn proptest_round_trip(text in ".+") {
            let encoding = build_code(&text).unwrap();
            let encoded = encode(&text, encoding.table()).unwrap();

            prop_assert_eq!(decode(encoding.tree(), &encoded).unwrap(), text);
        }

        #[test]
        fn proptest_prefix_free(text in ".+") {
            let encoding = build_code(&text).unwrap();

            prop_assert!(encoding.table().is_prefix_free());
        }

        #[test]
        fn proptest_frequency_conservation(text in ".*") {
            let freq = FrequencyMap::of(&text);
            prop_assert_eq!(freq.total(), text.chars().count());

            if let Ok(tree) = Tree::build(&freq) {
                prop_assert_eq!(tree.weight(), text.chars().count());
                prop_assert_eq!(tree.leaf_count(), freq.len());
                prop_assert_eq!(tree.leaves().iter().map(|(_, w)| w).sum::<usize>(), tree.weight());
            } else {
                prop_assert!(text.is_empty());
            }
        }

        #[test]
        fn proptest_never_longer_than_fixed_width(text in "[a-h]{2,64}") {
            let encoding = build_code(&text).unwrap();
            let encoded = encode(&text, encoding.table()).unwrap();

            // eight symbols fit in three bits each
            prop_assert!(encoded.len() <= text.len() * 3);
        }
    }
}
