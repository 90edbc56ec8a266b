use super::Encoding;
use crate::bits::{Bit, BitString};
use crate::error::{Error, Result};
use crate::tree::{Node, Tree};

#[derive(Debug, Clone)]
pub struct Decoder<'t> {
    tree: &'t Tree,
}

impl<'t> Decoder<'t> {
    pub fn new(tree: &'t Tree) -> Self {
        Self { tree }
    }

    pub fn from_encoding(encoding: &'t Encoding) -> Self {
        Self::new(encoding.tree())
    }

    pub fn iter<It: Iterator<Item = Bit>>(&self, bits: It) -> Iter<'t, It> {
        Iter::new(self.tree, bits)
    }

    pub fn decode(&self, encoded: &BitString) -> Result<String> {
        self.iter(encoded.iter()).collect()
    }
}

/// Walks the tree one bit at a time, yielding a symbol at every leaf.
///
/// Bits of an unfinished code are kept in `prefix` for error reporting.
pub struct Iter<'t, It> {
    root: &'t Node,
    current: &'t Node,
    prefix: BitString,
    incoming: It,
}

impl<'t, It> Iter<'t, It> {
    pub fn new(tree: &'t Tree, incoming: It) -> Self {
        Self {
            root: tree.root(),
            current: tree.root(),
            prefix: BitString::empty(),
            incoming,
        }
    }

    fn reset(&mut self) {
        self.current = self.root;
        self.prefix = BitString::empty();
    }
}

impl<'t, It> Iterator for Iter<'t, It>
where
    It: Iterator<Item = Bit>,
{
    type Item = Result<char>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(bit) = self.incoming.next() {
            self.prefix.push(bit);

            let next = match (self.current, bit) {
                (Node::Internal { left, .. }, Bit::Zero) => left.as_ref(),
                (Node::Internal { right, .. }, Bit::One) => right.as_ref(),
                // only reachable when the whole tree is one leaf, coded as `0`
                (Node::Leaf { symbol, .. }, Bit::Zero) => {
                    let symbol = *symbol;
                    self.reset();
                    return Some(Ok(symbol));
                }
                (Node::Leaf { .. }, Bit::One) => {
                    let path = std::mem::take(&mut self.prefix);
                    self.reset();
                    return Some(Err(Error::UnassignedPath { path }));
                }
            };

            match next {
                Node::Leaf { symbol, .. } => {
                    let symbol = *symbol;
                    self.reset();
                    return Some(Ok(symbol));
                }
                Node::Internal { .. } => self.current = next,
            }
        }

        if self.prefix.is_empty() {
            None
        } else {
            let pending = std::mem::take(&mut self.prefix);
            self.reset();
            Some(Err(Error::MalformedEncoding { pending }))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::encoding::build_code;

    fn bits(s: &str) -> BitString {
        s.parse().unwrap()
    }

    #[test]
    fn test_build_decoding() {
        let text = "abracadabra";
        let encoding = build_code(text).unwrap();

        let encoded = encoding.encoder().encode(text).unwrap();
        let decoded = encoding.decoder().decode(&encoded).unwrap();

        assert_eq!(decoded, text);
    }

    #[test]
    fn test_decode_known_bits() {
        let encoding = build_code("abc").unwrap();
        assert_eq!(encoding.decoder().decode(&bits("10110")).unwrap(), "abc");
        assert_eq!(encoding.decoder().decode(&bits("000")).unwrap(), "ccc");
    }

    #[test]
    fn test_decode_empty_bits() {
        let encoding = build_code("abc").unwrap();
        assert_eq!(encoding.decoder().decode(&BitString::empty()).unwrap(), "");
    }

    #[test]
    fn test_truncated_code() {
        let encoding = build_code("abc").unwrap();
        let err = encoding.decoder().decode(&bits("101")).unwrap_err();

        assert_eq!(err, Error::MalformedEncoding { pending: bits("1") });
    }

    #[test]
    fn test_iter_yields_symbols_before_error() {
        let encoding = build_code("abc").unwrap();
        let encoded = bits("0101");
        let decoder = encoding.decoder();
        let mut iter = decoder.iter(encoded.iter());

        assert_eq!(iter.next(), Some(Ok('c')));
        assert_eq!(iter.next(), Some(Ok('a')));
        assert_eq!(
            iter.next(),
            Some(Err(Error::MalformedEncoding { pending: bits("1") }))
        );
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_decode_single_symbol() {
        let encoding = build_code("aaaa").unwrap();
        let decoder = encoding.decoder();

        assert_eq!(decoder.decode(&bits("0000")).unwrap(), "aaaa");
        assert_eq!(
            decoder.decode(&bits("001")).unwrap_err(),
            Error::UnassignedPath { path: bits("1") }
        );
    }
}
