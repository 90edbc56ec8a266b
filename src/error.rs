use thiserror::Error;

use crate::bits::BitString;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("cannot build a code from an empty alphabet")]
    EmptyAlphabet,
    #[error("symbol {symbol:?} at position {position} is not in the code table")]
    UnknownSymbol { symbol: char, position: usize },
    #[error("encoded input ended in the middle of code `{pending}`")]
    MalformedEncoding { pending: BitString },
    #[error("bit path `{path}` does not lead to any symbol")]
    UnassignedPath { path: BitString },
    #[error("invalid bit {found:?} at position {position}, expected '0' or '1'")]
    InvalidBit { found: char, position: usize },
    #[error("symbol {0:?} appears more than once in frequency list")]
    DuplicateSymbol(char),
    #[error("symbol {0:?} has zero frequency")]
    ZeroFrequency(char),
    #[error("frequency of symbol {0:?} pushes the total count past the largest supported value")]
    FrequencyOverflow(char),
}

pub type Result<T> = std::result::Result<T, Error>;
