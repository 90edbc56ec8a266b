use crate::bits::BitString;
use crate::code::CodeRow;
use crate::encoding::{Encoding, build_code};
use crate::error::Result;

/// Everything produced from one submitted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    text: String,
    encoding: Encoding,
    encoded: BitString,
    decoded: String,
}

/// Serializable view of an [`Outcome`].
#[derive(Debug, Clone, serde::Serialize)]
pub struct Report<'a> {
    pub original_bits: usize,
    pub encoded_bits: usize,
    pub table: Vec<CodeRow>,
    pub encoded: &'a BitString,
    pub decoded: &'a str,
}

impl Outcome {
    pub fn build(text: &str) -> Result<Self> {
        let encoding = build_code(text)?;
        let encoded = encoding.encoder().encode(text)?;
        let decoded = encoding.decoder().decode(&encoded)?;

        Ok(Self {
            text: text.to_string(),
            encoding,
            encoded,
            decoded,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn encoding(&self) -> &Encoding {
        &self.encoding
    }

    pub fn encoded(&self) -> &BitString {
        &self.encoded
    }

    pub fn decoded(&self) -> &str {
        &self.decoded
    }

    pub fn round_trips(&self) -> bool {
        self.text == self.decoded
    }

    /// Size of the text at eight bits per UTF-8 byte.
    pub fn original_bits(&self) -> usize {
        self.text.len() * 8
    }

    pub fn encoded_bits(&self) -> usize {
        self.encoded.len()
    }

    pub fn table_rows(&self) -> Vec<CodeRow> {
        self.encoding.table().rows(self.encoding.frequencies())
    }

    pub fn report(&self) -> Report<'_> {
        Report {
            original_bits: self.original_bits(),
            encoded_bits: self.encoded_bits(),
            table: self.table_rows(),
            encoded: &self.encoded,
            decoded: &self.decoded,
        }
    }
}

/// Holds the latest submission. At most one tree is alive at a time.
#[derive(Debug, Default)]
pub struct Session {
    current: Option<Outcome>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current outcome with one built from `text`.
    ///
    /// The previous outcome is dropped before building, and stays dropped if
    /// building fails.
    pub fn submit(&mut self, text: &str) -> Result<&Outcome> {
        self.release();
        let outcome = Outcome::build(text)?;
        tracing::debug!(
            symbols = outcome.encoding().frequencies().len(),
            original_bits = outcome.original_bits(),
            encoded_bits = outcome.encoded_bits(),
            "submitted text"
        );
        Ok(self.current.insert(outcome))
    }

    pub fn current(&self) -> Option<&Outcome> {
        self.current.as_ref()
    }

    pub fn release(&mut self) {
        if let Some(previous) = self.current.take() {
            tracing::trace!(
                symbols = previous.encoding().frequencies().len(),
                "releasing previous submission"
            );
        }
    }
}
