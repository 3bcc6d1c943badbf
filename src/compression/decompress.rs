use std::fs::File;
use std::io::{BufWriter, Read, Write};

use log::{error, info};

use crate::bitstream::bitreader::BitReader;
use crate::error::{HuffError, Result};
use crate::huffman_coding::huffman::NodeData;
use crate::huffman_coding::tree::HuffmanTree;
use crate::tools::cli::HzOpts;
use crate::tools::freq_count::freq_table;

use super::compress::{create_output, EXTENSION};

const BUFFER_SIZE: usize = 64 * 1024;

/// Counts reported by decode().
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeSummary {
    /// Symbol count from the header, all of which were decoded.
    pub symbols: u32,
    /// Payload bytes read after the header.
    pub payload_bytes: u64,
}

/// Decode a compressed stream with the tree it was made from.
///
/// On a short payload everything decoded so far is written out before
/// HuffError::TruncatedStream is returned.
pub fn decode<R: Read, W: Write>(
    input: R,
    output: W,
    tree: &HuffmanTree,
) -> Result<DecodeSummary> {
    let mut br = BitReader::new(input);
    let header = br.bytes(4)?.ok_or(HuffError::UnreadableHeader)?;
    let expected = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);
    info!("Decoding {} symbols.", expected);

    let mut out = BufWriter::with_capacity(BUFFER_SIZE, output);
    let root = tree.root();

    // A lone leaf has no branches to walk. Rebuild the data from the count alone.
    if let NodeData::Leaf(symbol) = root.node_data {
        info!(
            "Single symbol tree, writing {} copies of {}.",
            expected, symbol
        );
        let chunk = [symbol; BUFFER_SIZE];
        let mut left = expected as usize;
        while left > 0 {
            let n = left.min(BUFFER_SIZE);
            out.write_all(&chunk[..n])?;
            left -= n;
        }
        out.flush()?;
        return Ok(DecodeSummary {
            symbols: expected,
            payload_bytes: 0,
        });
    }

    let mut decoded = 0_u32;
    let mut node = root;
    let mut bits = 0_u64;
    while decoded < expected {
        let bit = match br.bit()? {
            Some(bit) => bit,
            None => {
                error!(
                    "Unexpected end of stream at {}: decoded {} of {} symbols.",
                    br.loc(),
                    decoded,
                    expected
                );
                out.flush()?;
                return Err(HuffError::TruncatedStream { expected, decoded });
            }
        };
        bits += 1;
        if let NodeData::Kids(left, right) = &node.node_data {
            node = if bit { &**right } else { &**left };
        }
        if let NodeData::Leaf(symbol) = node.node_data {
            out.write_all(&[symbol])?;
            decoded += 1;
            node = root;
        }
    }
    out.flush()?;

    info!("Successfully decoded {} symbols.", decoded);
    Ok(DecodeSummary {
        symbols: decoded,
        payload_bytes: bits.div_ceil(8),
    })
}

/// Decompress a slice in memory with the tree it was made from.
pub fn decompress_bytes(data: &[u8], tree: &HuffmanTree) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    decode(data, &mut out, tree)?;
    Ok(out)
}

/// Rebuild the tree from the original data. The compressed format does not store it.
pub fn tree_from_reference(name: &str) -> Result<HuffmanTree> {
    let mut fin = File::open(name)?;
    let table = freq_table(&mut fin)?;
    HuffmanTree::build(&table)
}

/// Name of the decompressed file: the --output setting, or the input without ".huf"
/// (or with ".out" added if it has no such extension).
pub fn decompressed_name(opts: &HzOpts) -> String {
    if let Some(name) = &opts.output {
        return name.clone();
    }
    match opts.file.strip_suffix(&format!(".{}", EXTENSION)) {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => format!("{}.out", opts.file),
    }
}

/// Decompress the file specified in opts (HzOpts), using the tree rebuilt from opts.reference.
pub fn decompress_file(opts: &HzOpts) -> Result<DecodeSummary> {
    let reference = opts.reference.as_deref().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "decompression needs the original file (--reference) to rebuild the tree",
        )
    })?;
    let tree = tree_from_reference(reference)?;

    let fin = File::open(&opts.file)?;
    let fname = decompressed_name(opts);
    let f_out = create_output(&fname, opts.force_overwrite)?;
    info!("Decompressing {} to {}.", opts.file, fname);
    decode(fin, f_out, &tree)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::compression::compress::{compress_bytes, MissingCodePolicy};

    fn round_trip(data: &[u8]) -> Vec<u8> {
        let (compressed, out) = compress_bytes(data, MissingCodePolicy::Strict).unwrap();
        decompress_bytes(&out, &compressed.tree).unwrap()
    }

    #[test]
    fn aaab_test() {
        let (compressed, _) = compress_bytes(b"aaab", MissingCodePolicy::Strict).unwrap();
        let decoded = decompress_bytes(&[4, 0, 0, 0, 0b1110_0000], &compressed.tree).unwrap();
        assert_eq!(decoded, b"aaab");
    }

    #[test]
    fn round_trip_test() {
        let text = b"Huffman encoding is a greedy algorithm that builds optimal prefix codes.";
        assert_eq!(round_trip(text), text.to_vec());
        let binary = (0..=255_u8).cycle().take(5000).collect::<Vec<u8>>();
        assert_eq!(round_trip(&binary), binary);
    }

    #[test]
    fn single_symbol_by_count_test() {
        let data = vec![b'z'; 100_000];
        let (compressed, _) = compress_bytes(&data, MissingCodePolicy::Strict).unwrap();
        // Header only: a lone leaf never needs the payload
        let decoded = decompress_bytes(&100_000_u32.to_le_bytes(), &compressed.tree).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn unreadable_header_test() {
        let (compressed, _) = compress_bytes(b"abc", MissingCodePolicy::Strict).unwrap();
        let result = decompress_bytes(&[3, 0], &compressed.tree);
        assert!(matches!(result, Err(HuffError::UnreadableHeader)));
    }

    #[test]
    fn truncated_keeps_partial_output_test() {
        let data = b"abcdefghabcdefgh".repeat(4);
        let (compressed, out) = compress_bytes(&data, MissingCodePolicy::Strict).unwrap();
        let short = &out[..out.len() - 1];
        let mut partial = Vec::new();
        let result = decode(short, &mut partial, &compressed.tree);
        match result {
            Err(HuffError::TruncatedStream { expected, decoded }) => {
                assert_eq!(expected, data.len() as u32);
                assert!(decoded < expected);
                assert_eq!(partial.len(), decoded as usize);
                assert_eq!(&partial[..], &data[..partial.len()]);
            }
            other => panic!("expected a truncated stream, got {:?}", other),
        }
    }

    #[test]
    fn padding_is_ignored_test() {
        let (compressed, mut out) = compress_bytes(b"aaab", MissingCodePolicy::Strict).unwrap();
        // Junk in the pad bits and an extra trailing byte change nothing
        out[4] |= 0b0000_1111;
        out.push(0xff);
        assert_eq!(decompress_bytes(&out, &compressed.tree).unwrap(), b"aaab");
    }

    #[test]
    fn decompressed_name_test() {
        let mut opts = HzOpts::new();
        opts.file = "notes.txt.huf".to_string();
        assert_eq!(decompressed_name(&opts), "notes.txt");
        opts.file = "notes.bin".to_string();
        assert_eq!(decompressed_name(&opts), "notes.bin.out");
        opts.output = Some("x".to_string());
        assert_eq!(decompressed_name(&opts), "x");
    }
}
