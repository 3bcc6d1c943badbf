use std::fs::File;
use std::io::{Cursor, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::Path;

use log::{debug, info, warn};

use crate::bitstream::bitwriter::BitWriter;
use crate::error::{HuffError, Result};
use crate::huffman_coding::codes::CodeTable;
use crate::huffman_coding::tree::HuffmanTree;
use crate::tools::cli::HzOpts;
use crate::tools::freq_count::{freq_table, total_symbols, SymbolFreq};

const READ_SIZE: usize = 64 * 1024;
/// Extension added to compressed files.
pub const EXTENSION: &str = "huf";

/// What to do with an input byte that has no code.
///
/// A code table built from the same data always has a code for every byte, so this only
/// matters when the input changed between the two passes or the table came from elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingCodePolicy {
    /// Stop with HuffError::MissingCode.
    #[default]
    Strict,
    /// Warn and drop the byte. The header still counts it, so the decoder will run short.
    Skip,
}

/// Counts reported by encode().
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodeSummary {
    /// Bytes read from the input on the encoding pass.
    pub symbols_read: u64,
    /// Bytes that were actually encoded (less than read only under MissingCodePolicy::Skip).
    pub symbols_encoded: u64,
    /// Code bits written after the header, not counting padding.
    pub payload_bits: u64,
    /// Total bytes written, header included.
    pub bytes_written: u64,
}

/// Everything produced by one compression run.
#[derive(Debug, Clone)]
pub struct Compressed {
    pub table: Vec<SymbolFreq>,
    pub tree: HuffmanTree,
    pub codes: CodeTable,
    pub summary: EncodeSummary,
}

/// Rewind the input and write the 4 byte little-endian symbol count followed by the packed codes
/// of every input byte.
pub fn encode<R: Read + Seek, W: Write>(
    input: &mut R,
    output: W,
    codes: &CodeTable,
    total_symbols: u64,
    policy: MissingCodePolicy,
) -> Result<EncodeSummary> {
    let header =
        u32::try_from(total_symbols).map_err(|_| HuffError::SymbolCountOverflow(total_symbols))?;
    input.seek(SeekFrom::Start(0))?;

    let mut bw = BitWriter::new(output);
    header.to_le_bytes().iter().try_for_each(|&x| bw.out8(x))?;
    info!("Writing {} symbols to compressed stream.", header);

    let mut summary = EncodeSummary::default();
    let mut buf = vec![0_u8; READ_SIZE];
    loop {
        let size = match input.read(&mut buf) {
            Ok(0) => break,
            Ok(size) => size,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        for &symbol in &buf[..size] {
            let position = summary.symbols_read;
            summary.symbols_read += 1;
            match codes.get(symbol) {
                Some(code) => {
                    bw.out_code(code)?;
                    summary.symbols_encoded += 1;
                    summary.payload_bits += code.len() as u64;
                }
                None if policy == MissingCodePolicy::Strict => {
                    return Err(HuffError::MissingCode { symbol, position });
                }
                None => warn!("No code for symbol {} at {}, skipping it.", symbol, position),
            }
        }
    }
    summary.bytes_written = bw.flush()?;

    info!(
        "Encoded {} symbols (expected: {}), {} bytes written.",
        summary.symbols_encoded, total_symbols, summary.bytes_written
    );
    if summary.symbols_read != total_symbols {
        warn!(
            "Input changed between passes: read {} bytes, header says {}.",
            summary.symbols_read, total_symbols
        );
    }
    Ok(summary)
}

/// Run both passes over a seekable input: count, build the tree and codes, then encode.
pub fn compress_stream<R: Read + Seek, W: Write>(
    input: &mut R,
    output: W,
    policy: MissingCodePolicy,
) -> Result<Compressed> {
    let table = freq_table(input)?;
    if table.is_empty() {
        return Err(HuffError::EmptyInput);
    }
    let total = total_symbols(&table);
    info!("Found {} symbols, {} of them distinct.", total, table.len());

    let tree = HuffmanTree::build(&table)?;
    let codes = CodeTable::from_tree(&tree);
    debug!(
        "Tree depth is {}, expecting {} payload bits.",
        tree.depth(),
        codes.encoded_bits(&table)
    );

    let summary = encode(input, output, &codes, total, policy)?;
    Ok(Compressed {
        table,
        tree,
        codes,
        summary,
    })
}

/// Compress a slice in memory. Returns the run details and the compressed bytes.
pub fn compress_bytes(data: &[u8], policy: MissingCodePolicy) -> Result<(Compressed, Vec<u8>)> {
    let mut out = Vec::new();
    let compressed = compress_stream(&mut Cursor::new(data), &mut out, policy)?;
    Ok((compressed, out))
}

/// Name of the compressed file for an input: the --output setting, or the input plus ".huf".
pub fn compressed_name(opts: &HzOpts) -> String {
    opts.output
        .clone()
        .unwrap_or_else(|| format!("{}.{}", opts.file, EXTENSION))
}

/// Open `name` for writing, refusing to replace an existing file unless forced.
pub(crate) fn create_output(name: &str, force: bool) -> Result<File> {
    if !force && Path::new(name).exists() {
        return Err(HuffError::OutputExists(name.to_string()));
    }
    Ok(File::create(name)?)
}

/// Compress the input file named in opts (HzOpts).
pub fn compress_file(opts: &HzOpts) -> Result<Compressed> {
    let mut fin = File::open(&opts.file)?;
    let fname = compressed_name(opts);
    let f_out = create_output(&fname, opts.force_overwrite)?;
    info!("Compressing {} to {}.", opts.file, fname);

    let compressed = compress_stream(&mut fin, f_out, opts.missing_code)?;
    Ok(compressed)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::huffman_coding::codes::Code;
    use crate::tools::freq_count::{freqs, table_from_counts};

    #[test]
    fn aaab_test() {
        let (compressed, out) = compress_bytes(b"aaab", MissingCodePolicy::Strict).unwrap();
        assert_eq!(out, vec![4, 0, 0, 0, 0b1110_0000]);
        assert_eq!(compressed.summary.payload_bits, 4);
        assert_eq!(compressed.summary.bytes_written, 5);
        assert_eq!(compressed.codes.get(b'a'), Some(&Code::try_from("1").unwrap()));
    }

    #[test]
    fn single_symbol_test() {
        let data = vec![b'x'; 20];
        let (_, out) = compress_bytes(&data, MissingCodePolicy::Strict).unwrap();
        // 4 byte header and 20 zero bits rounded up to 3 bytes
        assert_eq!(out, vec![20, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn empty_input_test() {
        let mut out = Vec::new();
        let result = compress_stream(&mut Cursor::new(b""), &mut out, MissingCodePolicy::Strict);
        assert!(matches!(result, Err(HuffError::EmptyInput)));
        assert!(out.is_empty());
    }

    #[test]
    fn header_is_little_endian_test() {
        let data = vec![7_u8; 0x0102];
        let (_, out) = compress_bytes(&data, MissingCodePolicy::Strict).unwrap();
        assert_eq!(&out[..4], &[0x02, 0x01, 0, 0]);
        assert_eq!(out.len(), 4 + 0x0102 / 8 + 1);
    }

    fn codes_for(data: &[u8]) -> CodeTable {
        CodeTable::from_tree(&HuffmanTree::build(&table_from_counts(&freqs(data))).unwrap())
    }

    #[test]
    fn missing_code_strict_test() {
        let codes = codes_for(b"aab");
        let mut out = Vec::new();
        let result = encode(
            &mut Cursor::new(b"abca"),
            &mut out,
            &codes,
            4,
            MissingCodePolicy::Strict,
        );
        assert!(matches!(
            result,
            Err(HuffError::MissingCode {
                symbol: b'c',
                position: 2
            })
        ));
    }

    #[test]
    fn missing_code_skip_test() {
        let codes = codes_for(b"aab");
        let mut out = Vec::new();
        let summary = encode(
            &mut Cursor::new(b"abca"),
            &mut out,
            &codes,
            4,
            MissingCodePolicy::Skip,
        )
        .unwrap();
        assert_eq!(summary.symbols_read, 4);
        assert_eq!(summary.symbols_encoded, 3);
        // Header still claims all 4 symbols
        assert_eq!(&out[..4], &[4, 0, 0, 0]);
    }

    #[test]
    fn encode_rewinds_test() {
        let codes = codes_for(b"aaab");
        let mut input = Cursor::new(b"aaab");
        input.seek(SeekFrom::End(0)).unwrap();
        let mut out = Vec::new();
        let summary = encode(&mut input, &mut out, &codes, 4, MissingCodePolicy::Strict).unwrap();
        assert_eq!(summary.symbols_read, 4);
        assert_eq!(out, vec![4, 0, 0, 0, 0b1110_0000]);
    }

    #[test]
    fn overflow_test() {
        let codes = codes_for(b"ab");
        let result = encode(
            &mut Cursor::new(b"ab"),
            Vec::new(),
            &codes,
            u32::MAX as u64 + 1,
            MissingCodePolicy::Strict,
        );
        assert!(matches!(result, Err(HuffError::SymbolCountOverflow(_))));
    }
}
