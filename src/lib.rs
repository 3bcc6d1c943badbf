//! Two pass Huffman file compressor.
//!
//! Version 0.1.0
//!
//! The first pass counts every byte value in the input. The counts build a Huffman tree, and the
//! tree gives each byte a prefix code. The second pass writes a 4 byte little-endian symbol count
//! followed by the packed codes, most significant bit first.
//!
//! The compressed file does not store the tree. Decompression rebuilds it from the original data,
//! which makes the tool most useful for studying the codes and testing round trips.
//!
//! Basic usage to compress, decode again and compare is as follows:
//!
//! `$> huffzip test.txt`
//!
//! This creates test.txt.huf and checks that it decodes back to test.txt.
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

pub use compression::compress::{compress_bytes, MissingCodePolicy};
pub use compression::decompress::decompress_bytes;
pub use error::{HuffError, Result};
pub use huffman_coding::codes::CodeTable;
pub use huffman_coding::tree::HuffmanTree;
