//! Bodies delimited by the end of the connection.

use crate::reader::error::ReadError;
use crate::reader::options::ReadOptions;
use crate::reader::source::ByteSource;

/// Reads until the transport reports end of stream.
///
/// Buffered bytes are always handed out before the transport is read again,
/// so a transport error surfaces on the call after the last delivered data.
#[derive(Debug)]
pub struct EofBodyReader<'a, S> {
    source: &'a mut S,
    options: ReadOptions,
    finished: bool,
}

impl<'a, S: ByteSource> EofBodyReader<'a, S> {
    pub fn new(source: &'a mut S, options: ReadOptions) -> Self {
        Self {
            source,
            options,
            finished: false,
        }
    }

    pub fn read_some(&mut self, buf: &mut [u8]) -> Result<usize, ReadError> {
        if buf.is_empty() {
            return Ok(0);
        }
        if self.finished {
            return Err(ReadError::Eof);
        }

        if self.source.buffered().is_empty() && self.source.fill(self.options.read_buffer_size)? == 0 {
            self.finished = true;
            return Err(ReadError::Eof);
        }

        let available = self.source.buffered();
        let n = buf.len().min(available.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.source.consume(n);
        Ok(n)
    }
}
