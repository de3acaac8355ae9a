//! Error types for the Huffman codec.

use thiserror::Error;

/// Error variants for compression and decompression.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// `compress` was called with zero bytes of input.
    #[error("cannot compress empty input")]
    EmptyInput,

    /// The container ended inside a field or holds a structurally invalid value.
    #[error("framing error in {field} at offset {offset}: {reason}")]
    Framing {
        /// Name of the field being read.
        field: &'static str,
        /// Byte offset at which the field starts.
        offset: usize,
        /// What went wrong.
        reason: &'static str,
    },

    /// The header parsed but holds no entries, so there is no tree to decode with.
    #[error("frequency table is empty, no tree can be built")]
    MalformedTree,

    /// The declared bit count is larger than the packed section can hold.
    #[error("bitstream exhausted: header declares {declared} bits, only {available} present")]
    BitstreamExhausted {
        /// Bit count recorded in the container.
        declared: u64,
        /// Bits actually present after the header.
        available: u64,
    },

    /// The bitstream ended between the root and a leaf.
    #[error("bitstream ends mid-symbol after {bits} bits")]
    IncompleteSymbol {
        /// Number of bits consumed when the stream ran out.
        bits: u64,
    },

    /// The number of decoded symbols disagrees with the header's frequency total.
    #[error("decoded {actual} bytes, header promises {expected}")]
    LengthMismatch {
        /// Sum of the header frequencies.
        expected: u64,
        /// Number of symbols produced by the tree walk.
        actual: u64,
    },

    /// A symbol occurs more often than the 32-bit header field can record.
    #[error("symbol {symbol:#04x} occurs {count} times, exceeding the u32 header field")]
    FrequencyOverflow {
        /// The offending symbol.
        symbol: u8,
        /// Its occurrence count.
        count: u64,
    },

    /// The packer met a byte that has no code in the table.
    #[error("no code for byte {0:#04x}")]
    MissingCode(u8),
}

/// A specialized Result type for codec operations.
pub type Result<T> = std::result::Result<T, Error>;
