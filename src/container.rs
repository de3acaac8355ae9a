//! Self-describing container format.
//!
//! ```text
//! offset 0          u16 LE   entry count (1..=256)
//! offset 2          count x { u8 symbol, u32 LE frequency }   ascending symbol order
//! offset 2 + 5n     u64 LE   total bit count
//! offset 10 + 5n    ceil(bits / 8) packed bytes, MSB-first, zero-padded
//! ```

use crate::error::{Error, Result};
use crate::frequency::{FrequencyTable, ALPHABET_SIZE};

/// Bytes used by the entry count.
pub const ENTRY_COUNT_LEN: usize = 2;
/// Bytes used by one `{symbol, frequency}` entry.
pub const ENTRY_LEN: usize = 5;
/// Bytes used by the total bit count.
pub const BIT_COUNT_LEN: usize = 8;

/// Header size for a table with `entries` symbols.
pub fn header_len(entries: usize) -> usize {
    ENTRY_COUNT_LEN + entries * ENTRY_LEN + BIT_COUNT_LEN
}

/// A parsed container. The packed section borrows from the input buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container<'a> {
    /// Frequency table recovered from the header.
    pub table: FrequencyTable,
    /// Number of meaningful bits in `packed`.
    pub total_bits: u64,
    /// Packed bitstream.
    pub packed: &'a [u8],
}

impl<'a> Container<'a> {
    /// Frame `table`, `total_bits` and `packed` into a single blob.
    pub fn write(table: &FrequencyTable, total_bits: u64, packed: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(header_len(table.len()) + packed.len());
        // at most 256 entries, always fits
        out.extend_from_slice(&(table.len() as u16).to_le_bytes());
        for (symbol, freq) in table.iter() {
            out.push(symbol);
            out.extend_from_slice(&freq.to_le_bytes());
        }
        out.extend_from_slice(&total_bits.to_le_bytes());
        out.extend_from_slice(packed);
        out
    }

    /// Parse a blob produced by [`Container::write`].
    ///
    /// # Errors
    /// Returns [`Error::Framing`] if the buffer ends inside a field, the entry count exceeds
    /// the alphabet, an entry repeats a symbol or carries a zero frequency, or bytes remain
    /// after the packed section. The packed section may still be too short for the declared
    /// bit count; that is reported later as [`Error::BitstreamExhausted`].
    pub fn parse(blob: &'a [u8]) -> Result<Self> {
        let mut cur = Cursor::new(blob);

        let count = u16::from_le_bytes(cur.take("entry count")?) as usize;
        if count > ALPHABET_SIZE {
            return Err(Error::Framing {
                field: "entry count",
                offset: 0,
                reason: "more entries than byte values",
            });
        }

        let mut table = FrequencyTable::new();
        for _ in 0..count {
            let offset = cur.pos;
            let [symbol] = cur.take::<1>("entry symbol")?;
            let freq = u32::from_le_bytes(cur.take("entry frequency")?);
            if freq == 0 {
                return Err(Error::Framing {
                    field: "entry frequency",
                    offset: offset + 1,
                    reason: "zero frequency",
                });
            }
            if table.insert(symbol, freq) != 0 {
                return Err(Error::Framing {
                    field: "entry symbol",
                    offset,
                    reason: "symbol appears twice",
                });
            }
        }

        let total_bits = u64::from_le_bytes(cur.take("total bit count")?);
        let packed = cur.rest();

        let needed = total_bits.div_ceil(8);
        if (packed.len() as u64) > needed {
            return Err(Error::Framing {
                field: "packed bitstream",
                offset: cur.pos + needed as usize,
                reason: "trailing bytes after bitstream",
            });
        }

        Ok(Self {
            table,
            total_bits,
            packed,
        })
    }
}

struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn take<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N]> {
        let bytes = self
            .buf
            .get(self.pos..self.pos + N)
            .ok_or(Error::Framing {
                field,
                offset: self.pos,
                reason: "buffer truncated",
            })?;
        let mut arr = [0u8; N];
        arr.copy_from_slice(bytes);
        self.pos += N;
        Ok(arr)
    }

    fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }
}
