use std::fmt::{self, Display};
use std::str::FromStr;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bit {
    Zero,
    One,
}

impl Bit {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Bit::Zero),
            '1' => Some(Bit::One),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }
}

/// A sequence of symbolic bits, written as a string of '0' and '1'.
///
/// Used both for a single symbol's code and for a whole encoded text.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BitString(Vec<Bit>);

impl BitString {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn new(it: impl IntoIterator<Item = Bit>) -> Self {
        Self(it.into_iter().collect())
    }

    pub fn join(&self, tail: Bit) -> Self {
        let mut v = self.0.clone();
        v.push(tail);
        Self(v)
    }

    pub fn push(&mut self, bit: Bit) {
        self.0.push(bit);
    }

    pub fn extend_from(&mut self, other: &BitString) {
        self.0.extend_from_slice(&other.0);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Bit> + Clone + '_ {
        self.0.iter().copied()
    }

    pub fn starts_with(&self, prefix: &BitString) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            write!(f, "{}", bit.to_char())?;
        }
        Ok(())
    }
}

impl FromStr for BitString {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .enumerate()
            .map(|(position, found)| {
                Bit::from_char(found).ok_or(Error::InvalidBit { found, position })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl FromIterator<Bit> for BitString {
    fn from_iter<T: IntoIterator<Item = Bit>>(iter: T) -> Self {
        Self::new(iter)
    }
}

mod serialize {
    use super::*;

    impl serde::Serialize for BitString {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            serializer.collect_str(self)
        }
    }

    struct Visitor;

    impl<'de> serde::de::Visitor<'de> for Visitor {
        type Value = BitString;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string of '0' and '1' characters")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            v.parse().map_err(E::custom)
        }
    }

    impl<'de> serde::Deserialize<'de> for BitString {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            deserializer.deserialize_str(Visitor)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let bits: BitString = "10110".parse().unwrap();
        assert_eq!(bits.len(), 5);
        assert_eq!(bits.to_string(), "10110");
        assert_eq!(
            bits.iter().collect::<Vec<_>>(),
            vec![Bit::One, Bit::Zero, Bit::One, Bit::One, Bit::Zero]
        );
    }

    #[test]
    fn test_parse_rejects_other_characters() {
        let err = "01x1".parse::<BitString>().unwrap_err();
        assert_eq!(
            err,
            Error::InvalidBit {
                found: 'x',
                position: 2
            }
        );
    }

    #[test]
    fn test_empty_string_is_empty_bits() {
        let bits: BitString = "".parse().unwrap();
        assert!(bits.is_empty());
        assert_eq!(bits, BitString::empty());
    }

    #[test]
    fn test_join_leaves_original_untouched() {
        let prefix: BitString = "01".parse().unwrap();
        let longer = prefix.join(Bit::One);
        assert_eq!(prefix.to_string(), "01");
        assert_eq!(longer.to_string(), "011");
        assert!(longer.starts_with(&prefix));
        assert!(!prefix.starts_with(&longer));
    }

    #[test]
    fn test_serialize_as_string() {
        let bits: BitString = "0011".parse().unwrap();
        let json = serde_json::to_string(&bits).unwrap();
        assert_eq!(json, "\"0011\"");
        let parsed: BitString = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, bits);
        assert!(serde_json::from_str::<BitString>("\"012\"").is_err());
    }
}
