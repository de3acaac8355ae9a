//! Bit-level packing and tree-walk decoding.
//!
//! Bits are stored most significant first within each byte. The final byte is padded with
//! zeros; the exact bit count travels separately so padding is never decoded.

use crate::code::CodeTable;
use crate::error::{Error, Result};
use crate::tree::{HuffmanTree, Node};

/// Byte accumulator that emits bits MSB-first.
#[derive(Debug, Default)]
pub struct BitWriter {
    out: Vec<u8>,
    acc: u8,
    filled: u8,
    total: u64,
}

impl BitWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with room for `bytes` output bytes.
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            out: Vec::with_capacity(bytes),
            ..Self::default()
        }
    }

    /// Append one bit (any non-zero value is a 1).
    #[inline]
    pub fn push_bit(&mut self, bit: u8) {
        if bit != 0 {
            self.acc |= 1 << (7 - self.filled);
        }
        self.filled += 1;
        self.total += 1;
        if self.filled == 8 {
            self.out.push(self.acc);
            self.acc = 0;
            self.filled = 0;
        }
    }

    /// Append a sequence of bits.
    pub fn push_bits(&mut self, bits: &[u8]) {
        for &bit in bits {
            self.push_bit(bit);
        }
    }

    /// Number of bits written so far.
    pub fn bit_count(&self) -> u64 {
        self.total
    }

    /// Flush the zero-padded partial byte and return `(bytes, bit_count)`.
    pub fn finish(mut self) -> (Vec<u8>, u64) {
        if self.filled > 0 {
            self.out.push(self.acc);
        }
        (self.out, self.total)
    }
}

/// Iterator over the first `limit` bits of a byte slice, MSB-first.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    bytes: &'a [u8],
    pos: u64,
    limit: u64,
}

impl<'a> BitReader<'a> {
    /// Read exactly `limit` bits from `bytes`.
    ///
    /// # Errors
    /// Returns [`Error::BitstreamExhausted`] if `bytes` holds fewer than `limit` bits.
    pub fn new(bytes: &'a [u8], limit: u64) -> Result<Self> {
        let available = bytes.len() as u64 * 8;
        if limit > available {
            return Err(Error::BitstreamExhausted {
                declared: limit,
                available,
            });
        }
        Ok(Self {
            bytes,
            pos: 0,
            limit,
        })
    }

    /// Bits consumed so far.
    pub fn position(&self) -> u64 {
        self.pos
    }
}

impl Iterator for BitReader<'_> {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<u8> {
        if self.pos >= self.limit {
            return None;
        }
        let byte = self.bytes[(self.pos / 8) as usize];
        let bit = (byte >> (7 - (self.pos % 8))) & 1;
        self.pos += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.limit - self.pos) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for BitReader<'_> {}

/// Encode `data` with `codes`.
///
/// Returns the packed bytes (`ceil(bits / 8)` of them) and the unpadded bit count.
///
/// # Errors
/// Returns [`Error::MissingCode`] if a byte of `data` has no code.
pub fn pack(data: &[u8], codes: &CodeTable) -> Result<(Vec<u8>, u64)> {
    let mut writer = BitWriter::with_capacity(data.len() / 2);
    for &b in data {
        let code = codes.get(b).ok_or(Error::MissingCode(b))?;
        writer.push_bits(code);
    }
    Ok(writer.finish())
}

/// Decode the first `total_bits` bits of `packed` by walking `tree`.
///
/// Every bit moves one level down (0 left, 1 right); reaching a leaf emits its symbol and
/// restarts at the root. When the root itself is a leaf each bit emits that symbol.
///
/// # Errors
/// Returns [`Error::BitstreamExhausted`] if `packed` is shorter than `total_bits`, and
/// [`Error::IncompleteSymbol`] if the last bit leaves the walk inside the tree.
pub fn unpack(packed: &[u8], total_bits: u64, tree: &HuffmanTree) -> Result<Vec<u8>> {
    let reader = BitReader::new(packed, total_bits)?;
    let root = tree.root();

    if let Node::Leaf { symbol, .. } = root {
        return Ok(vec![*symbol; reader.len()]);
    }

    let mut out = Vec::with_capacity(reader.len() / 2);
    let mut curr = root;
    for bit in reader {
        if let Node::Internal { left, right, .. } = curr {
            curr = if bit == 0 { &**left } else { &**right };
        }
        if let Node::Leaf { symbol, .. } = curr {
            out.push(*symbol);
            curr = root;
        }
    }

    if !std::ptr::eq(curr, root) {
        return Err(Error::IncompleteSymbol { bits: total_bits });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::FrequencyTable;
    use proptest::prelude::*;

    fn model(data: &[u8]) -> (HuffmanTree, CodeTable) {
        let freqs = FrequencyTable::from_bytes(data).unwrap();
        let tree = HuffmanTree::build(&freqs).unwrap();
        let codes = CodeTable::from_tree(&tree);
        (tree, codes)
    }

    #[test]
    fn test_writer_msb_first_with_padding() {
        let mut w = BitWriter::new();
        w.push_bits(&[1, 0, 1, 1, 0, 0, 0, 0, 1, 1]);
        assert_eq!(w.bit_count(), 10);
        let (bytes, bits) = w.finish();
        assert_eq!(bytes, vec![0b1011_0000, 0b1100_0000]);
        assert_eq!(bits, 10);
    }

    #[test]
    fn test_reader_stops_at_limit() {
        let bits: Vec<u8> = BitReader::new(&[0b1010_1111], 3).unwrap().collect();
        assert_eq!(bits, vec![1, 0, 1]);
    }

    #[test]
    fn test_reader_rejects_overlong_limit() {
        assert_eq!(
            BitReader::new(&[0xFF], 9).unwrap_err(),
            Error::BitstreamExhausted {
                declared: 9,
                available: 8
            }
        );
    }

    #[test]
    fn test_padding_not_decoded() {
        // c=00 e=010 d=011 b=10 a=11; "ab" is 4 bits, the rest of the byte is padding
        // that would otherwise decode as two more 'c's.
        let (tree, codes) = model(b"aaaaabbbbcccdde");
        let (packed, bits) = pack(b"ab", &codes).unwrap();
        assert_eq!(bits, 4);
        assert_eq!(packed, vec![0b1110_0000]);
        assert_eq!(unpack(&packed, bits, &tree).unwrap(), b"ab".to_vec());
    }

    #[test]
    fn test_single_leaf_roundtrip() {
        let data = [0x41u8; 10];
        let (tree, codes) = model(&data);
        let (packed, bits) = pack(&data, &codes).unwrap();
        assert_eq!(bits, 10);
        assert_eq!(packed, vec![0, 0]);
        assert_eq!(unpack(&packed, bits, &tree).unwrap(), data.to_vec());
    }

    #[test]
    fn test_missing_code() {
        let (_, codes) = model(b"abc");
        assert_eq!(pack(b"abz", &codes), Err(Error::MissingCode(b'z')));
    }

    #[test]
    fn test_walk_ending_mid_tree() {
        let (tree, _) = model(b"aaaaabbbbcccdde");
        // "01" stops between the root and the leaves for 'e' and 'd'.
        assert_eq!(
            unpack(&[0b0100_0000], 2, &tree),
            Err(Error::IncompleteSymbol { bits: 2 })
        );
    }

    proptest! {
        #[test]
        fn prop_pack_unpack(data in prop::collection::vec(any::<u8>(), 1..2048)) {
            let (tree, codes) = model(&data);
            let (packed, bits) = pack(&data, &codes).unwrap();
            prop_assert_eq!(packed.len() as u64, bits.div_ceil(8));
            prop_assert_eq!(unpack(&packed, bits, &tree).unwrap(), data);
        }
    }
}
