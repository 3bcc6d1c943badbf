use std::fs::{self, File};
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use log::{error, info, warn};

use crate::error::{HuffError, Result};
use crate::tools::cli::HzOpts;

use super::compress::{compress_file, compressed_name, create_output, Compressed};
use super::decompress::{decode, DecodeSummary};

/// Result of a full compress / decompress / compare cycle.
#[derive(Debug, Clone)]
pub struct TestReport {
    pub compressed: Compressed,
    pub decoded: DecodeSummary,
    pub compressed_file: String,
    pub decoded_file: String,
}

fn next_byte<R: Read>(bytes: &mut std::io::Bytes<R>) -> Result<Option<u8>> {
    loop {
        match bytes.next() {
            None => return Ok(None),
            Some(Ok(b)) => return Ok(Some(b)),
            Some(Err(e)) if e.kind() == ErrorKind::Interrupted => continue,
            Some(Err(e)) => return Err(e.into()),
        }
    }
}

/// Compare two streams byte by byte. Returns the position of the first difference, if any.
/// A stream that ends early differs at the position where it ended.
pub fn first_mismatch<A: Read, B: Read>(a: A, b: B) -> Result<Option<u64>> {
    let mut a = BufReader::new(a).bytes();
    let mut b = BufReader::new(b).bytes();
    let mut position = 0_u64;
    loop {
        match (next_byte(&mut a)?, next_byte(&mut b)?) {
            (None, None) => return Ok(None),
            (x, y) if x != y => {
                error!(
                    "Mismatch at byte {}: original={:?}, decoded={:?}",
                    position, x, y
                );
                return Ok(Some(position));
            }
            _ => position += 1,
        }
    }
}

/// Name for the decoded copy: "decoded_" in front of the input's file name, in the same directory.
pub fn decoded_name(file: &str) -> String {
    let path = Path::new(file);
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.to_string());
    path.with_file_name(format!("decoded_{}", name))
        .to_string_lossy()
        .into_owned()
}

/// Compress the input file, decode it again with the same tree, and check the result matches
/// the original byte for byte.
pub fn test_file(opts: &HzOpts) -> Result<TestReport> {
    let compressed = compress_file(opts)?;
    let compressed_file = compressed_name(opts);
    let decoded_file = decoded_name(&opts.file);

    info!("Testing decode into {}.", decoded_file);
    let decoded = {
        let fin = File::open(&compressed_file)?;
        let f_out = create_output(&decoded_file, opts.force_overwrite)?;
        decode(fin, f_out, &compressed.tree)?
    };

    let mismatch = first_mismatch(File::open(&opts.file)?, File::open(&decoded_file)?)?;

    if !opts.keep_decoded {
        if let Err(e) = fs::remove_file(&decoded_file) {
            warn!("Could not remove {}: {}", decoded_file, e);
        }
    }
    if let Some(position) = mismatch {
        return Err(HuffError::Mismatch { position });
    }
    info!("Original and decoded files are identical.");

    Ok(TestReport {
        compressed,
        decoded,
        compressed_file,
        decoded_file,
    })
}
