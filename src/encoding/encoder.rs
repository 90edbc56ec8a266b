use super::Encoding;
use crate::bits::BitString;
use crate::code::{Code, CodeTable};
use crate::error::{Error, Result};

pub struct Encoder<'t> {
    table: &'t CodeTable,
}

impl<'t> Encoder<'t> {
    pub fn new(table: &'t CodeTable) -> Self {
        Self { table }
    }

    pub fn from_encoding(encoding: &'t Encoding) -> Self {
        Self::new(encoding.table())
    }

    pub fn encode_char(&self, symbol: char) -> Option<&'t Code> {
        self.table.get(symbol)
    }

    /// Concatenate the code of every character, failing on the first one the
    /// table does not know.
    pub fn encode(&self, text: &str) -> Result<BitString> {
        let mut out = BitString::empty();
        for (position, symbol) in text.chars().enumerate() {
            let code = self
                .encode_char(symbol)
                .ok_or(Error::UnknownSymbol { symbol, position })?;
            out.extend_from(code);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::encoding::build_code;

    #[test]
    fn test_encode() {
        let encoding = build_code("abc").unwrap();
        let encoded = encoding.encoder().encode("abc").unwrap();

        assert_eq!(encoded.to_string(), "10110");
    }

    #[test]
    fn test_encode_single_symbol() {
        let encoding = build_code("aaaa").unwrap();
        let encoded = encoding.encoder().encode("aaaa").unwrap();

        assert_eq!(encoded.to_string(), "0000");
    }

    #[test]
    fn test_encode_is_deterministic() {
        let encoding = build_code("banana bandana").unwrap();
        let encoder = encoding.encoder();

        assert_eq!(
            encoder.encode("banana").unwrap(),
            encoder.encode("banana").unwrap()
        );
    }

    #[test]
    fn test_encode_other_text_with_same_table() {
        let encoding = build_code("abc").unwrap();
        let encoded = encoding.encoder().encode("cab").unwrap();

        assert_eq!(encoded.to_string(), "01011");
    }

    #[test]
    fn test_unknown_symbol() {
        let encoding = build_code("abc").unwrap();
        let err = encoding.encoder().encode("abcd").unwrap_err();

        assert_eq!(
            err,
            Error::UnknownSymbol {
                symbol: 'd',
                position: 3
            }
        );
    }

    #[test]
    fn test_encode_empty_text() {
        let encoding = build_code("abc").unwrap();
        assert!(encoding.encoder().encode("").unwrap().is_empty());
    }
}
