//! BitReader: reads a packed bitstream, most significant bit of each byte first.
//!
//! NOTE: This module can read from any I/O source that supports the read() call. Running out of
//! data is not an error here; callers get None and decide what a short stream means.

use std::io::{ErrorKind, Read};

use crate::error::Result;

const BUFFER_SIZE: usize = 64 * 1024;
const BIT_MASK: u8 = 0xff;

#[derive(Debug)]
pub struct BitReader<R> {
    buffer: Vec<u8>,
    cursor: usize,
    bit_index: usize,
    consumed: u64,
    source: R,
}

impl<R: Read> BitReader<R> {
    /// Creates a new BitReader (with a 64k buffer).
    pub fn new(source: R) -> Self {
        Self {
            buffer: vec![0; BUFFER_SIZE],
            cursor: BUFFER_SIZE,
            bit_index: 0,
            consumed: 0,
            source,
        }
    }

    /// Check (and refill) buffer. Returns true if we have data, false if there is no more
    fn have_data(&mut self) -> Result<bool> {
        // Only try to read more data when the buffer length is equal to the buffer cursor location
        if self.cursor == self.buffer.len() {
            self.buffer.resize(BUFFER_SIZE, 0);
            let size = loop {
                match self.source.read(&mut self.buffer) {
                    Ok(size) => break size,
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e.into()),
                }
            };
            // Adjust the buffer if we read less than the buffer size
            self.buffer.truncate(size);
            self.cursor = 0;
            self.bit_index = 0;
            // If nothing came back from our read attempt, then we have no more data.
            if size == 0 {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Return the next bit as true (1) or false (0), or None if there is no more data to read
    pub fn bit(&mut self) -> Result<Option<bool>> {
        // If bit_index is == 0, check if we have a byte to read.
        if self.bit_index == 0 && !self.have_data()? {
            return Ok(None);
        }
        let bit = (self.buffer[self.cursor] & BIT_MASK >> self.bit_index) >> (7 - self.bit_index);
        self.bit_index += 1;
        self.bit_index %= 8;
        if self.bit_index == 0 {
            self.cursor += 1;
            self.consumed += 1;
        }
        Ok(Some(bit == 1))
    }

    /// Returns the next 8 bits as a byte, or None if there is no more data to read.
    pub fn byte(&mut self) -> Result<Option<u8>> {
        // Fast path when we are on a byte boundary
        if self.bit_index == 0 {
            if !self.have_data()? {
                return Ok(None);
            }
            let byte = self.buffer[self.cursor];
            self.cursor += 1;
            self.consumed += 1;
            return Ok(Some(byte));
        }
        let mut byte = 0_u8;
        for _ in 0..8 {
            match self.bit()? {
                Some(bit) => byte = byte << 1 | bit as u8,
                None => return Ok(None),
            }
        }
        Ok(Some(byte))
    }

    /// Returns exactly n bytes, or None if the stream ends first.
    pub fn bytes(&mut self, n: usize) -> Result<Option<Vec<u8>>> {
        let mut result: Vec<u8> = Vec::with_capacity(n);
        while result.len() < n {
            match self.byte()? {
                Some(byte) => result.push(byte),
                None => return Ok(None),
            }
        }
        Ok(Some(result))
    }

    /// Debugging function. Report bytes.bits consumed from the stream.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.consumed, self.bit_index)
    }
}
