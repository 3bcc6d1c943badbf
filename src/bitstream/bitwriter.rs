use std::io::Write;

use crate::error::Result;
use crate::huffman_coding::codes::Code;

/// Bytes collected before they are handed to the writer.
const BUFFER_SIZE: usize = 64 * 1024;

/// Packs bits most significant first into bytes and writes them to the output stream.
pub struct BitWriter<W: Write> {
    /// Output buffer used to write the bitstream.
    output: Vec<u8>,
    /// Private queue to hold bits that are waiting to be put as bytes into the output buffer.
    queue: u64,
    /// Count of valid bits in the queue.
    q_bits: u8,
    /// Count of bytes already handed to the writer.
    written: u64,
    /// Handle to the output stream
    writer: W,
}

impl<W: Write> BitWriter<W> {
    /// Create a new BitWriter. Call flush() when done or the last bits stay in the queue.
    pub fn new(writer: W) -> Self {
        Self {
            output: Vec::with_capacity(BUFFER_SIZE),
            queue: 0,
            q_bits: 0,
            written: 0,
            writer,
        }
    }

    /// Move all full bytes from the queue to the output buffer, and the buffer to the writer when full.
    fn push_queue(&mut self) -> Result<()> {
        while self.q_bits > 7 {
            let byte = (self.queue >> (self.q_bits - 8)) as u8;
            self.output.push(byte); //push the packed byte out
            self.q_bits -= 8; //adjust the count of bits left in the queue
        }
        if self.output.len() >= BUFFER_SIZE {
            self.write_out()?;
        }
        Ok(())
    }

    fn write_out(&mut self) -> Result<()> {
        self.writer.write_all(&self.output)?;
        self.written += self.output.len() as u64;
        self.output.clear();
        Ok(())
    }

    /// Put a byte of pre-packed binary encoded data on the stream.
    pub fn out8(&mut self, data: u8) -> Result<()> {
        self.queue <<= 8; //shift queue by one byte
        self.queue |= data as u64; //add the byte to queue
        self.q_bits += 8; //update depth of queue bits
        self.push_queue()
    }

    /// Put a single bit on the stream.
    pub fn out_bit(&mut self, bit: bool) -> Result<()> {
        self.queue = (self.queue << 1) | bit as u64;
        self.q_bits += 1;
        if self.q_bits > 7 {
            self.push_queue()?;
        }
        Ok(())
    }

    /// Put every bit of a huffman code on the stream, first bit first.
    pub fn out_code(&mut self, code: &Code) -> Result<()> {
        for &bit in code.bits() {
            self.out_bit(bit)?;
        }
        Ok(())
    }

    /// Flushes the remaining bits (1-7) from the queue, padding with 0s in the least
    /// signficant bits, and writes everything out. Returns the total bytes written.
    pub fn flush(&mut self) -> Result<u64> {
        if self.q_bits > 0 {
            let pad = 8 - self.q_bits;
            self.queue <<= pad; //pad the queue with zeros
            self.q_bits += pad;
            self.push_queue()?;
        }
        self.write_out()?;
        self.writer.flush()?;
        Ok(self.written)
    }

    /// Debugging function to return the number of bytes.bits output so far
    pub fn loc(&self) -> String {
        let bits = (self.written + self.output.len() as u64) * 8 + self.q_bits as u64;
        format!("[{}.{}]", bits / 8, bits % 8)
    }

    /// Give back the underlying writer. Any queued bits not flushed are lost.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
