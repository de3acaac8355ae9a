//! The two public codec operations.

use crate::bits::{pack, unpack};
use crate::code::CodeTable;
use crate::container::Container;
use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;
use crate::tree::HuffmanTree;

/// Compress `data` into a self-describing blob.
///
/// # Errors
/// Returns [`Error::EmptyInput`] for zero-length input and [`Error::FrequencyOverflow`] if
/// a byte value occurs more than `u32::MAX` times.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let table = FrequencyTable::from_bytes(data)?;
    log::trace!("frequency table: {:?}", table);

    let tree = HuffmanTree::build(&table)?;
    let codes = CodeTable::from_tree(&tree);
    log::trace!("code table: {:?}", codes);

    let (packed, total_bits) = pack(data, &codes)?;
    let blob = Container::write(&table, total_bits, &packed);

    log::debug!(
        "compressed {} bytes ({} symbols, depth {}) into {} bits, blob {} bytes",
        data.len(),
        table.len(),
        tree.depth(),
        total_bits,
        blob.len()
    );
    Ok(blob)
}

/// Reverse [`compress`].
///
/// # Errors
/// - [`Error::Framing`] if the header is truncated or structurally invalid.
/// - [`Error::MalformedTree`] if the header holds no entries.
/// - [`Error::BitstreamExhausted`] if fewer bits follow the header than it declares.
/// - [`Error::IncompleteSymbol`] if the bitstream stops inside a code.
/// - [`Error::LengthMismatch`] if the decoded length differs from the frequency total.
pub fn decompress(blob: &[u8]) -> Result<Vec<u8>> {
    let container = Container::parse(blob)?;
    log::trace!("parsed frequency table: {:?}", container.table);

    let tree = HuffmanTree::build(&container.table)?;
    let out = unpack(container.packed, container.total_bits, &tree)?;

    let expected = container.table.total();
    if out.len() as u64 != expected {
        return Err(Error::LengthMismatch {
            expected,
            actual: out.len() as u64,
        });
    }

    log::debug!(
        "decompressed {} bits ({} symbols) into {} bytes",
        container.total_bits,
        container.table.len(),
        out.len()
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::header_len;
    use proptest::prelude::*;

    #[test]
    fn test_roundtrip_simple() {
        let data = b"aaaaabbbbcccdde";
        let blob = compress(data).unwrap();
        // 33 bits -> 5 packed bytes
        assert_eq!(blob.len(), header_len(5) + 5);
        assert_eq!(decompress(&blob).unwrap(), data.to_vec());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(compress(b""), Err(Error::EmptyInput));
    }

    #[test]
    fn test_empty_header_is_malformed_tree() {
        let blob = Container::write(&FrequencyTable::new(), 0, &[]);
        assert_eq!(decompress(&blob), Err(Error::MalformedTree));
    }

    #[test]
    fn test_declared_bits_beyond_data() {
        let mut blob = compress(b"abracadabra").unwrap();
        blob.pop();
        assert!(matches!(
            decompress(&blob),
            Err(Error::BitstreamExhausted { .. })
        ));
    }

    #[test]
    fn test_length_mismatch() {
        // Header promises 3 'a's, bitstream carries 2.
        let table: FrequencyTable = [(b'a', 3)].into_iter().collect();
        let blob = Container::write(&table, 2, &[0]);
        assert_eq!(
            decompress(&blob),
            Err(Error::LengthMismatch {
                expected: 3,
                actual: 2
            })
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_roundtrip(data in prop::collection::vec(any::<u8>(), 1..4096)) {
            let blob = compress(&data).unwrap();
            prop_assert_eq!(decompress(&blob).unwrap(), data);
        }
    }
}
