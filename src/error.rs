//! Error types for huffzip.

use std::collections::TryReserveError;

use thiserror::Error;

/// Everything that can stop a compression or decompression run.
#[derive(Debug, Error)]
pub enum HuffError {
    /// The input held no bytes, so there is no tree to build.
    #[error("empty input: nothing to compress")]
    EmptyInput,

    /// A buffer or the node heap could not grow.
    #[error("allocation failure: {0}")]
    Allocation(#[from] TryReserveError),

    /// A byte showed up during encoding that has no entry in the code table.
    #[error("no code for symbol {symbol} at input position {position}")]
    MissingCode { symbol: u8, position: u64 },

    /// The 4 byte symbol count could not be read.
    #[error("unreadable header: compressed stream is shorter than 4 bytes")]
    UnreadableHeader,

    /// The payload ended before the declared number of symbols was decoded.
    /// Everything decoded up to that point has already been written out.
    #[error("truncated stream: decoded {decoded} of {expected} symbols")]
    TruncatedStream { expected: u32, decoded: u32 },

    /// The input is longer than the 32 bit header can describe.
    #[error("input of {0} bytes is too large for the 32 bit symbol count header")]
    SymbolCountOverflow(u64),

    /// A code written out as text held something other than '0' and '1'.
    #[error("invalid code {0:?}: only '0' and '1' are allowed")]
    InvalidCode(String),

    /// Refusing to replace an existing file.
    #[error("output file {0} already exists (use --force to overwrite)")]
    OutputExists(String),

    /// The self test decoded something other than the original.
    #[error("round trip mismatch at byte {position}")]
    Mismatch { position: u64 },

    /// Any other I/O failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for huffzip operations.
pub type Result<T> = std::result::Result<T, HuffError>;
