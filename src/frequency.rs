use std::collections::BTreeMap;

use crate::error::Error;

/// Occurrence count of every distinct symbol of a text.
///
/// Only symbols that actually occur are present, so every count is positive.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(into = "Vec<FrequencyEntry>", try_from = "Vec<FrequencyEntry>")]
pub struct FrequencyMap {
    counts: BTreeMap<char, usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrequencyEntry {
    pub symbol: char,
    pub count: usize,
}

impl FrequencyMap {
    pub fn of(text: &str) -> Self {
        SymbolCounter::empty().count(text.chars()).finish()
    }

    pub fn get(&self, symbol: char) -> Option<usize> {
        self.counts.get(&symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, which is the number of symbols in the counted text.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Iterate in ascending symbol order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (char, usize)> + '_ {
        self.counts.iter().map(|(&s, &c)| (s, c))
    }
}

impl From<FrequencyMap> for Vec<FrequencyEntry> {
    fn from(value: FrequencyMap) -> Self {
        value
            .iter()
            .map(|(symbol, count)| FrequencyEntry { symbol, count })
            .collect()
    }
}

impl TryFrom<Vec<FrequencyEntry>> for FrequencyMap {
    type Error = Error;

    fn try_from(entries: Vec<FrequencyEntry>) -> Result<Self, Self::Error> {
        let mut counts = BTreeMap::new();
        // every tree weight is a partial sum of the counts, so bounding the total is enough
        let mut total: usize = 0;
        for FrequencyEntry { symbol, count } in entries {
            if count == 0 {
                return Err(Error::ZeroFrequency(symbol));
            }
            total = total
                .checked_add(count)
                .ok_or(Error::FrequencyOverflow(symbol))?;
            if counts.insert(symbol, count).is_some() {
                return Err(Error::DuplicateSymbol(symbol));
            }
        }
        Ok(Self { counts })
    }
}

pub struct SymbolCounter {
    counts: BTreeMap<char, usize>,
}

impl SymbolCounter {
    pub fn empty() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }

    pub fn count_one(&mut self, symbol: char) {
        *self.counts.entry(symbol).or_insert(0) += 1;
    }

    pub fn count(&mut self, it: impl Iterator<Item = char>) -> &mut Self {
        it.for_each(|c| self.count_one(c));
        self
    }

    pub fn finish(&self) -> FrequencyMap {
        FrequencyMap {
            counts: self.counts.clone(),
        }
    }
}
