//! Prefix code assignment.

use crate::frequency::ALPHABET_SIZE;
use crate::tree::{HuffmanTree, Node};

/// Symbol -> bit sequence (each element 0 or 1, most significant first).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Vec<u8>>,
}

impl CodeTable {
    /// Walk `tree` and record the branch path to every leaf.
    ///
    /// A single-leaf tree has an empty path; that symbol is given the code `0` so that every
    /// symbol costs at least one bit.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = vec![Vec::new(); ALPHABET_SIZE];
        Self::build_codes(tree.root(), Vec::new(), &mut codes);
        Self { codes }
    }

    fn build_codes(node: &Node, prefix: Vec<u8>, codes: &mut Vec<Vec<u8>>) {
        match node {
            Node::Leaf { symbol, .. } => {
                codes[*symbol as usize] = if prefix.is_empty() { vec![0] } else { prefix };
            }
            Node::Internal { left, right, .. } => {
                let mut left_prefix = prefix.clone();
                left_prefix.push(0);
                Self::build_codes(left, left_prefix, codes);

                let mut right_prefix = prefix;
                right_prefix.push(1);
                Self::build_codes(right, right_prefix, codes);
            }
        }
    }

    /// Code for `symbol`, if it has one.
    pub fn get(&self, symbol: u8) -> Option<&[u8]> {
        let code = &self.codes[symbol as usize];
        (!code.is_empty()).then_some(code.as_slice())
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().filter(|c| !c.is_empty()).count()
    }

    /// True if no symbol has a code.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &[u8])> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_empty())
            .map(|(s, c)| (s as u8, c.as_slice()))
    }

    /// True if no code is a prefix of a different symbol's code.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&[u8]> = self.iter().map(|(_, c)| c).collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !b.starts_with(a))
        })
    }

    /// Exact number of bits needed to encode data described by `(symbol, count)` pairs.
    pub fn encoded_bits<I: IntoIterator<Item = (u8, u32)>>(&self, counts: I) -> u64 {
        counts
            .into_iter()
            .map(|(s, f)| self.get(s).map_or(0, |c| c.len() as u64) * f as u64)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::FrequencyTable;
    use proptest::prelude::*;

    fn table_for(data: &[u8]) -> (FrequencyTable, CodeTable) {
        let freqs = FrequencyTable::from_bytes(data).unwrap();
        let tree = HuffmanTree::build(&freqs).unwrap();
        (freqs, CodeTable::from_tree(&tree))
    }

    #[test]
    fn test_single_symbol_gets_one_bit() {
        let (_, codes) = table_for(&[0x41; 10]);
        assert_eq!(codes.len(), 1);
        assert_eq!(codes.get(0x41), Some(&[0u8][..]));
    }

    #[test]
    fn test_known_codes() {
        // a=5 b=4 c=3 d=2 e=1:
        // (e,d)=3, then c sorts before (e,d) on the tie: (c,(e,d))=6, (b,a)=9, root=15
        let (_, codes) = table_for(b"aaaaabbbbcccdde");
        assert_eq!(codes.get(b'c'), Some(&[0u8, 0][..]));
        assert_eq!(codes.get(b'e'), Some(&[0u8, 1, 0][..]));
        assert_eq!(codes.get(b'd'), Some(&[0u8, 1, 1][..]));
        assert_eq!(codes.get(b'b'), Some(&[1u8, 0][..]));
        assert_eq!(codes.get(b'a'), Some(&[1u8, 1][..]));
        assert!(codes.get(b'f').is_none());
    }

    #[test]
    fn test_encoded_bits() {
        let (freqs, codes) = table_for(b"aaaaabbbbcccdde");
        // 5*2 + 4*2 + 3*2 + 2*3 + 1*3
        assert_eq!(codes.encoded_bits(freqs.iter()), 33);
    }

    proptest! {
        #[test]
        fn prop_codes_are_prefix_free(data in prop::collection::vec(any::<u8>(), 1..1024)) {
            let (freqs, codes) = table_for(&data);
            prop_assert_eq!(codes.len(), freqs.len());
            prop_assert!(codes.iter().all(|(_, c)| !c.is_empty()));
            prop_assert!(codes.is_prefix_free());
        }
    }
}
