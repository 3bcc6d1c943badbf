use std::io::{ErrorKind, Read};

use log::debug;

use crate::error::Result;

const READ_SIZE: usize = 64 * 1024;

/// One distinct byte value from the input and how often it occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolFreq {
    pub symbol: u8,
    pub freq: u64,
}

/// Add the bytes of data to a running count indexed by byte value.
pub fn add_counts(counts: &mut [u64; 256], data: &[u8]) {
    data.iter().for_each(|&el| counts[el as usize] += 1);
}

/// Returns a frequency count of the input data, indexed by byte value.
pub fn freqs(data: &[u8]) -> [u64; 256] {
    let mut freqs = [0_u64; 256];
    add_counts(&mut freqs, data);
    freqs
}

/// Turn raw counts into the ordered frequency table: only symbols that occurred,
/// ascending by frequency, ties broken by ascending symbol.
pub fn table_from_counts(counts: &[u64; 256]) -> Vec<SymbolFreq> {
    let mut table = counts
        .iter()
        .enumerate()
        .filter(|(_, &f)| f > 0)
        .map(|(i, &freq)| SymbolFreq {
            symbol: i as u8,
            freq,
        })
        .collect::<Vec<SymbolFreq>>();
    // Counts are collected in symbol order, so a stable sort on frequency keeps symbol order for ties.
    table.sort_by_key(|sf| sf.freq);
    table
}

/// Scan a stream once and build its frequency table. An empty stream gives an empty table.
pub fn freq_table<R: Read>(input: &mut R) -> Result<Vec<SymbolFreq>> {
    let mut counts = [0_u64; 256];
    let mut buf = vec![0_u8; READ_SIZE];
    let mut total = 0_u64;
    loop {
        let size = match input.read(&mut buf) {
            Ok(0) => break,
            Ok(size) => size,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        add_counts(&mut counts, &buf[..size]);
        total += size as u64;
    }
    let table = table_from_counts(&counts);
    debug!("Counted {} bytes, {} distinct symbols.", total, table.len());
    Ok(table)
}

/// Sum of all frequencies in a table, i.e. the length of the input it came from.
pub fn total_symbols(table: &[SymbolFreq]) -> u64 {
    table.iter().map(|sf| sf.freq).sum()
}
