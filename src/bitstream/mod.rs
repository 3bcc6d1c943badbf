//! The bitstream module forms the I/O subsystem for huffzip.
//!
//! Huffman codes are variable length, so they seldom line up with byte boundaries. The writer
//! packs codes most significant bit first and pads the final byte with zeros. The reader hands
//! the bits back one at a time in the same order.
//!
//! Both sides buffer their I/O in 64k chunks. They are built for the compressed format used here
//! and are not intended for more general use.
//!
pub mod bitreader;
pub mod bitwriter;
