//! Bodies in the `chunked` transfer coding.

use std::ops::Range;

use crate::http::Headers;
use crate::parser::{self, ChunkedAction, ChunkedDecoder};
use crate::reader::error::ReadError;
use crate::reader::options::ReadOptions;
use crate::reader::source::ByteSource;

/// Decodes a chunked body straight out of the source buffer.
///
/// Decoded bytes are copied once, from the source buffer into the caller's
/// buffer. The consumed chunk framing is released from the source only after
/// its data was fully handed out.
#[derive(Debug)]
pub struct ChunkedBodyReader<'a, S> {
    source: &'a mut S,
    options: ReadOptions,
    decoder: ChunkedDecoder,
    /// Decoded bytes not yet copied out, as offsets into `source.buffered()`.
    unconsumed: Range<usize>,
    /// Bytes of `source.buffered()` to release once `unconsumed` is empty.
    last_parsed: usize,
    error: Option<parser::Error>,
}

enum Step {
    Data { parsed: usize, len: usize },
    Continue(usize),
    Failed(usize, parser::Error),
}

impl<'a, S: ByteSource> ChunkedBodyReader<'a, S> {
    pub fn new(source: &'a mut S, options: ReadOptions) -> Self {
        Self {
            source,
            options,
            decoder: ChunkedDecoder::with_options(options.parsing),
            unconsumed: 0..0,
            last_parsed: 0,
            error: None,
        }
    }

    /// Trailer headers, complete once the body was read to the end.
    pub fn trailer_headers(&self) -> &Headers {
        self.decoder.trailers()
    }

    pub fn read_some(&mut self, buf: &mut [u8]) -> Result<usize, ReadError> {
        if buf.is_empty() {
            return Ok(0);
        }

        loop {
            if !self.unconsumed.is_empty() {
                let n = buf.len().min(self.unconsumed.len());
                let start = self.unconsumed.start;
                buf[..n].copy_from_slice(&self.source.buffered()[start..start + n]);
                self.unconsumed.start += n;

                if self.unconsumed.is_empty() {
                    self.source.consume(self.last_parsed);
                    self.last_parsed = 0;
                }
                return Ok(n);
            }
            if let Some(error) = &self.error {
                return Err(ReadError::Parse(error.clone()));
            }
            if self.decoder.done() {
                return Err(ReadError::Eof);
            }

            if self.source.buffered().is_empty() && self.source.fill(self.options.read_buffer_size)? == 0 {
                return Err(ReadError::UnexpectedEof);
            }

            self.consume_buffer();
        }
    }

    /// Runs the decoder over the buffered bytes until it yields data, fails,
    /// finishes or runs out of input.
    fn consume_buffer(&mut self) {
        while !self.source.buffered().is_empty() && !self.decoder.done() {
            let step = {
                let result = self.decoder.parse(self.source.buffered());
                match result.action {
                    ChunkedAction::Data(window) => Step::Data {
                        parsed: result.parsed,
                        len: window.len(),
                    },
                    ChunkedAction::None => Step::Continue(result.parsed),
                    ChunkedAction::Error(error) => Step::Failed(result.parsed, error),
                }
            };

            match step {
                Step::Data { parsed, len } => {
                    self.unconsumed = parsed - len..parsed;
                    self.last_parsed = parsed;
                    return;
                }
                Step::Continue(parsed) => self.source.consume(parsed),
                Step::Failed(parsed, error) => {
                    self.source.consume(parsed);
                    self.error = Some(error);
                    return;
                }
            }
        }
    }
}
