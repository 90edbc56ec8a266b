mod bits;
mod code;
pub mod cli;
mod encoding;
mod error;
mod frequency;
mod session;
mod tree;

pub use bits::{Bit, BitString};
pub use code::{Code, CodeRow, CodeTable};
pub use encoding::decoder::Iter as DecodeIter;
pub use encoding::{Decoder, Encoder, Encoding, build_code, decode, encode, release_tree};
pub use error::{Error, Result};
pub use frequency::{FrequencyEntry, FrequencyMap, SymbolCounter};
pub use session::{Outcome, Report, Session};
pub use tree::{Node, Tree};

pub use serde_json;
