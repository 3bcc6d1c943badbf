//! The compression module drives both passes of huffzip.
//!
//! Compression happens in the following steps:
//! - Frequency count: read the whole input once and tally each byte value.
//! - Huffman tree and codes: built from the frequency table.
//! - Encoding: rewind the input, write the 4 byte symbol count, then the code of every byte.
//!
//! Decompression reads the symbol count and walks the tree one bit at a time. The compressed
//! format does not carry the tree, so the decoder has to rebuild it from the original data.
//!
//! The verify step runs both directions and compares the result with the original.
//!

pub mod compress;
pub mod decompress;
pub mod verify;
