//! The huffman module builds the prefix code used by huffzip.
//!
//! Building the code is a three step affair:
//! - min_heap: a priority queue of nodes, lowest weight first.
//! - tree: repeatedly merge the two lightest nodes until one root remains.
//! - codes: walk the tree, 0 for left and 1 for right, to get each symbol's bit string.
//!
//! Ties are broken by symbol value and then by node age, so the same frequency table always
//! produces the same tree. The decoder relies on this: the compressed file does not carry the
//! tree, and the decoder rebuilds it from the same data.
//!

pub mod codes;
pub mod huffman;
pub mod min_heap;
pub mod tree;
