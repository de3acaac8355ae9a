//! # Deterministic Huffman Compression
//!
//! *Classic byte-oriented Huffman coding in a self-contained blob.*
//!
//! ## Intuition First
//!
//! Frequent bytes should cost few bits and rare bytes many. Huffman's greedy construction
//! repeatedly joins the two rarest subtrees until one tree remains; the path from the root to
//! each leaf (0 for left, 1 for right) is that byte's code. No code is a prefix of another, so
//! the bitstream needs no separators.
//!
//! ## Determinism
//!
//! Huffman construction is ambiguous when counts tie. Here every subtree is keyed on
//! `(frequency, smallest symbol in the subtree)`, which is a total order over disjoint
//! subtrees. The same frequency table therefore always gives the same tree, the same codes
//! and a byte-identical blob.
//!
//! ## Container
//!
//! ```text
//! u16 LE entry count | count x (u8 symbol, u32 LE freq) | u64 LE bit count | packed bits
//! ```
//!
//! The decoder rebuilds the tree from the stored table and reads exactly `bit count` bits, so
//! the zero padding in the final byte is never mistaken for data.
//!
//! ## Failure Modes
//!
//! 1. **Empty input**: there is nothing to build a tree from; `compress` rejects it.
//! 2. **Single symbol**: the tree is one leaf with an empty path; it is given the code `0`.
//! 3. **Damaged blobs**: truncation, impossible headers and short bitstreams are reported as
//!    [`Error`] values, never as partial output.
//!
//! ## Example
//!
//! ```
//! let blob = huffmin::compress(b"hello world! hello world!")?;
//! assert_eq!(huffmin::decompress(&blob)?, b"hello world! hello world!");
//! # Ok::<(), huffmin::Error>(())
//! ```
//!
//! ## References
//!
//! - Huffman, D. A. (1952). "A Method for the Construction of Minimum-Redundancy Codes."

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bits;
pub mod code;
pub mod codec;
pub mod container;
pub mod error;
pub mod frequency;
pub mod tree;

pub use code::CodeTable;
pub use codec::{compress, decompress};
pub use error::{Error, Result};
pub use frequency::FrequencyTable;
pub use tree::HuffmanTree;
