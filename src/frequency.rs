//! Byte frequency tables.
//!
//! A [`FrequencyTable`] is the only model the codec needs: it is written verbatim into the
//! container header and both ends rebuild the same tree from it.

use crate::error::{Error, Result};

/// Number of distinct byte symbols.
pub const ALPHABET_SIZE: usize = 256;

/// Occurrence counts for each byte symbol. Symbols with a zero count are absent.
#[derive(Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u32; ALPHABET_SIZE],
    distinct: usize,
}

impl FrequencyTable {
    /// Create a table with no entries.
    pub fn new() -> Self {
        Self {
            counts: [0; ALPHABET_SIZE],
            distinct: 0,
        }
    }

    /// Count every byte of `data`.
    ///
    /// # Errors
    /// Returns [`Error::EmptyInput`] if `data` is empty and [`Error::FrequencyOverflow`] if a
    /// single byte value occurs more than `u32::MAX` times.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut wide = [0u64; ALPHABET_SIZE];
        for &b in data {
            wide[b as usize] += 1;
        }

        let mut table = Self::new();
        for (s, &count) in wide.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let freq = u32::try_from(count).map_err(|_| Error::FrequencyOverflow {
                symbol: s as u8,
                count,
            })?;
            table.insert(s as u8, freq);
        }
        Ok(table)
    }

    /// Set the count of `symbol`. A zero `freq` removes the entry.
    ///
    /// Returns the previous count.
    pub fn insert(&mut self, symbol: u8, freq: u32) -> u32 {
        let slot = &mut self.counts[symbol as usize];
        let prev = *slot;
        match (prev, freq) {
            (0, f) if f > 0 => self.distinct += 1,
            (p, 0) if p > 0 => self.distinct -= 1,
            _ => {}
        }
        *slot = freq;
        prev
    }

    /// Count recorded for `symbol`, or `None` if it never occurs.
    pub fn get(&self, symbol: u8) -> Option<u32> {
        match self.counts[symbol as usize] {
            0 => None,
            f => Some(f),
        }
    }

    /// Number of distinct symbols present.
    pub fn len(&self) -> usize {
        self.distinct
    }

    /// True if no symbol has been recorded.
    pub fn is_empty(&self) -> bool {
        self.distinct == 0
    }

    /// Sum of all counts, i.e. the length of the data the table describes.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }

    /// Present `(symbol, count)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &f)| f > 0)
            .map(|(s, &f)| (s as u8, f))
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FrequencyTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl FromIterator<(u8, u32)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (u8, u32)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (s, f) in iter {
            table.insert(s, f);
        }
        table
    }
}
