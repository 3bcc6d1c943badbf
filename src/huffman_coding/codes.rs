//! Code generation: turn a finished tree into a bit string per symbol.
//!
//! Walking left appends a 0, walking right appends a 1. A tree that is only a leaf gets the code
//! "0", since one symbol still needs one bit per occurrence.

use std::fmt::{Display, Formatter};

use log::trace;

use super::huffman::{Node, NodeData};
use super::tree::HuffmanTree;
use crate::error::HuffError;
use crate::tools::freq_count::SymbolFreq;

/// With 256 leaves no path can be longer than this.
pub const MAX_CODE_LEN: usize = 255;

/// The bits of one huffman code, first bit to be written first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    /// The one bit code given to the only symbol of a single leaf tree.
    pub fn zero() -> Self {
        Code { bits: vec![false] }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl Display for Code {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl TryFrom<&str> for Code {
    type Error = HuffError;

    /// Parse a string of '0' and '1'.
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let bits = s
            .chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(HuffError::InvalidCode(s.to_string())),
            })
            .collect::<Result<Vec<bool>, HuffError>>()?;
        Ok(Code { bits })
    }
}

/// Code for every byte value. Symbols not in the input have no code at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Option<Code>>,
}

impl Default for CodeTable {
    fn default() -> Self {
        Self {
            codes: vec![None; 256],
        }
    }
}

impl CodeTable {
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut table = Self::default();
        let root = tree.root();
        match &root.node_data {
            NodeData::Leaf(symbol) => {
                table.codes[*symbol as usize] = Some(Code::zero());
            }
            NodeData::Kids(..) => {
                let mut path = Vec::with_capacity(MAX_CODE_LEN);
                table.return_leaves(root, &mut path);
            }
        }
        table
    }

    /// Recursively walk the tree, recording the path to each leaf as its code.
    fn return_leaves(&mut self, node: &Node, path: &mut Vec<bool>) {
        match &node.node_data {
            NodeData::Kids(left, right) => {
                debug_assert!(path.len() < MAX_CODE_LEN);
                path.push(false);
                self.return_leaves(left, path);
                path.pop();
                path.push(true);
                self.return_leaves(right, path);
                path.pop();
            }
            NodeData::Leaf(symbol) => {
                let code = Code { bits: path.clone() };
                trace!("Code for {} is {}", symbol, code);
                self.codes[*symbol as usize] = Some(code);
            }
        }
    }

    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes[symbol as usize].as_ref()
    }

    /// Number of symbols that have a code.
    pub fn len(&self) -> usize {
        self.codes.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every (symbol, code) pair, in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.as_ref().map(|code| (i as u8, code)))
    }

    /// Size of the payload in bits if the data described by `table` is encoded with these codes.
    pub fn encoded_bits(&self, table: &[SymbolFreq]) -> u64 {
        table
            .iter()
            .filter_map(|sf| self.get(sf.symbol).map(|c| c.len() as u64 * sf.freq))
            .sum()
    }

    /// True when no code is a prefix of another code in the table.
    pub fn is_prefix_free(&self) -> bool {
        let codes = self.iter().map(|(_, c)| c).collect::<Vec<&Code>>();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !a.is_prefix_of(b))
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tools::freq_count::{freqs, table_from_counts};

    fn codes_of(data: &[u8]) -> CodeTable {
        let tree = HuffmanTree::build(&table_from_counts(&freqs(data))).unwrap();
        CodeTable::from_tree(&tree)
    }

    #[test]
    fn aaab_codes_test() {
        let codes = codes_of(b"aaab");
        assert_eq!(codes.get(b'b').unwrap().to_string(), "0");
        assert_eq!(codes.get(b'a').unwrap().to_string(), "1");
        assert_eq!(codes.len(), 2);
        assert!(codes.get(b'c').is_none());
    }

    #[test]
    fn single_symbol_code_test() {
        let codes = codes_of(b"qqqq");
        assert_eq!(codes.get(b'q'), Some(&Code::try_from("0").unwrap()));
        assert_eq!(codes.len(), 1);
    }

    #[test]
    fn absent_is_not_empty_test() {
        let codes = codes_of(b"ab");
        assert!(codes.get(b'z').is_none());
        assert!(codes.iter().all(|(_, c)| !c.is_empty()));
    }

    #[test]
    fn prefix_free_test() {
        let codes = codes_of(b"this is an example of a huffman tree");
        assert!(codes.is_prefix_free());
        assert!(!Code::try_from("0").unwrap().is_prefix_of(&Code::try_from("10").unwrap()));
        assert!(Code::try_from("10").unwrap().is_prefix_of(&Code::try_from("101").unwrap()));
    }

    #[test]
    fn parse_code_test() {
        let code = Code::try_from("0110").unwrap();
        assert_eq!(code.bits(), &[false, true, true, false]);
        assert_eq!(code.to_string(), "0110");
        assert_eq!(Code::try_from("0").unwrap(), Code::zero());
        assert!(Code::try_from("").unwrap().is_empty());
        assert!(matches!(
            Code::try_from("01x1"),
            Err(HuffError::InvalidCode(s)) if s == "01x1"
        ));
        assert!(Code::try_from("1 0").is_err());
    }

    #[test]
    fn lengths_follow_weights_test() {
        let codes = codes_of(b"aaaaaaaabbbbccd");
        assert_eq!(codes.get(b'a').unwrap().len(), 1);
        assert_eq!(codes.get(b'b').unwrap().len(), 2);
        assert_eq!(codes.get(b'c').unwrap().len(), 3);
        assert_eq!(codes.get(b'd').unwrap().len(), 3);
    }

    #[test]
    fn encoded_bits_test() {
        let data = b"aaaaaaaabbbbccd";
        let table = table_from_counts(&freqs(data));
        let codes = codes_of(data);
        assert_eq!(codes.encoded_bits(&table), 8 + 4 * 2 + 2 * 3 + 3);
    }

    #[test]
    fn iter_in_symbol_order_test() {
        let codes = codes_of(b"cabbcc");
        let syms = codes.iter().map(|(s, _)| s).collect::<Vec<u8>>();
        assert_eq!(syms, b"abc".to_vec());
    }
}
