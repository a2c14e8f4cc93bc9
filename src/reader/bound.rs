//! Bodies with a known length.

use crate::reader::error::ReadError;
use crate::reader::options::ReadOptions;
use crate::reader::source::ByteSource;

/// Reads exactly `length` bytes, then reports the end of the body.
#[derive(Debug)]
pub struct BoundBodyReader<'a, S> {
    source: &'a mut S,
    options: ReadOptions,
    length: u64,
    total_read: u64,
}

impl<'a, S: ByteSource> BoundBodyReader<'a, S> {
    pub fn new(source: &'a mut S, length: u64, options: ReadOptions) -> Self {
        Self {
            source,
            options,
            length,
            total_read: 0,
        }
    }

    /// Bytes of the body not read yet.
    pub fn remaining(&self) -> u64 {
        self.length - self.total_read
    }

    /// Copies body bytes into `buf`.
    ///
    /// Returns [`ReadError::Eof`] once the whole body was read and
    /// [`ReadError::UnexpectedEof`] if the transport ends before that.
    pub fn read_some(&mut self, buf: &mut [u8]) -> Result<usize, ReadError> {
        if buf.is_empty() {
            return Ok(0);
        }
        if self.total_read >= self.length {
            return Err(ReadError::Eof);
        }

        if self.source.buffered().is_empty() && self.source.fill(self.options.read_buffer_size)? == 0 {
            return Err(ReadError::UnexpectedEof);
        }

        let remaining = usize::try_from(self.remaining()).unwrap_or(usize::MAX);
        let available = self.source.buffered();
        let n = buf.len().min(available.len()).min(remaining);
        buf[..n].copy_from_slice(&available[..n]);

        self.source.consume(n);
        self.total_read += n as u64;
        Ok(n)
    }
}
