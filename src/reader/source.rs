//! Buffered byte sources the readers pull from.

use std::io::{self, Read};

use log::trace;

/// A transport with a read-ahead buffer.
///
/// Readers look at [`buffered`](ByteSource::buffered) bytes, mark what they
/// used with [`consume`](ByteSource::consume) and call
/// [`fill`](ByteSource::fill) only when they need more.
pub trait ByteSource {
    /// Bytes received but not consumed yet.
    fn buffered(&self) -> &[u8];

    /// Drops `amount` bytes from the front of the buffer.
    fn consume(&mut self, amount: usize);

    /// Reads up to `max` more bytes from the transport into the buffer.
    /// Returns 0 at end of stream.
    fn fill(&mut self, max: usize) -> io::Result<usize>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn buffered(&self) -> &[u8] {
        (**self).buffered()
    }

    fn consume(&mut self, amount: usize) {
        (**self).consume(amount)
    }

    fn fill(&mut self, max: usize) -> io::Result<usize> {
        (**self).fill(max)
    }
}

/// A [`ByteSource`] over any [`Read`] implementation.
///
/// Bytes a head reader did not need stay buffered for the body reader, and
/// bytes after a body stay buffered for the next message.
#[derive(Debug)]
pub struct BufferedStream<R> {
    inner: R,
    buffer: Vec<u8>,
    start: usize,
}

impl<R: Read> BufferedStream<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buffer: Vec::new(),
            start: 0,
        }
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Returns the transport and the bytes still buffered.
    pub fn into_parts(mut self) -> (R, Vec<u8>) {
        self.buffer.drain(..self.start);
        (self.inner, self.buffer)
    }
}

impl<R: Read> ByteSource for BufferedStream<R> {
    fn buffered(&self) -> &[u8] {
        &self.buffer[self.start..]
    }

    fn consume(&mut self, amount: usize) {
        self.start = (self.start + amount).min(self.buffer.len());
        if self.start == self.buffer.len() {
            self.buffer.clear();
            self.start = 0;
        }
    }

    fn fill(&mut self, max: usize) -> io::Result<usize> {
        if self.start > 0 {
            self.buffer.drain(..self.start);
            self.start = 0;
        }

        let filled = self.buffer.len();
        self.buffer.resize(filled + max.max(1), 0);

        loop {
            match self.inner.read(&mut self.buffer[filled..]) {
                Ok(n) => {
                    self.buffer.truncate(filled + n);
                    trace!("read {n} bytes from transport");
                    return Ok(n);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.buffer.truncate(filled);
                    return Err(e);
                }
            }
        }
    }
}
