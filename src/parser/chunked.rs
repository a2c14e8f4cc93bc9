//! Incremental decoder for the `chunked` transfer coding.

use log::debug;

use crate::http::Headers;
use crate::parser::error::Error;
use crate::parser::head::HeaderFields;
use crate::parser::lexer::{Callbacks, Flow, Mode, Tokenizer};
use crate::parser::options::ParseOptions;

#[derive(Debug, Clone)]
struct ChunkSink {
    options: ParseOptions,
    fields: HeaderFields,
    trailers: Headers,
    /// Length of the data window delivered by the last `execute`.
    body_len: Option<usize>,
    error: Option<Error>,
    complete: bool,
}

impl ChunkSink {
    fn fail(&mut self, error: Error) -> Flow {
        if self.error.is_none() {
            self.error = Some(error);
        }
        Flow::Abort
    }
}

impl Callbacks for ChunkSink {
    fn on_header_field(&mut self, data: &[u8]) -> Flow {
        match self.fields.on_name(data, &self.options) {
            Ok(()) => Flow::Continue,
            Err(error) => self.fail(error),
        }
    }

    fn on_header_value(&mut self, data: &[u8]) -> Flow {
        match self.fields.on_value(data, &self.options) {
            Ok(()) => Flow::Continue,
            Err(error) => self.fail(error),
        }
    }

    fn on_body(&mut self, data: &[u8]) -> Flow {
        self.body_len = Some(data.len());
        Flow::Pause
    }

    fn on_message_complete(&mut self) -> Flow {
        match self.fields.finish() {
            Ok(trailers) => {
                self.trailers = trailers;
                self.complete = true;
                Flow::Pause
            }
            Err(error) => self.fail(error),
        }
    }
}

/// What a call to [`ChunkedDecoder::parse`] produced.
#[derive(Debug, PartialEq, Eq)]
pub enum ChunkedAction<'a> {
    /// Nothing to hand out; feed more data unless the decoder is done.
    None,
    /// Decoded body bytes. The window points into the input and covers the
    /// last bytes of the consumed prefix.
    Data(&'a [u8]),
    /// Decoding failed; the decoder is done.
    Error(Error),
}

#[derive(Debug, PartialEq, Eq)]
pub struct ChunkedParse<'a> {
    /// Bytes consumed from the front of the input.
    pub parsed: usize,
    pub action: ChunkedAction<'a>,
}

/// Decodes a chunked body without copying chunk data.
///
/// Each call consumes a prefix of the input and hands out at most one data
/// window. The result borrows the decoder, so the window has to be dropped
/// before the decoder is fed again.
///
/// ```
/// use httpwire::parser::{ChunkedAction, ChunkedDecoder};
///
/// let mut input: &[u8] = b"4\r\nWiki\r\n5\r\npedia\r\n0\r\n\r\n";
/// let mut decoder = ChunkedDecoder::new();
/// let mut body = Vec::new();
///
/// while !decoder.done() {
///     let result = decoder.parse(input);
///     if let ChunkedAction::Data(window) = result.action {
///         body.extend_from_slice(window);
///     }
///     input = &input[result.parsed..];
/// }
///
/// assert_eq!(body, b"Wikipedia");
/// assert!(decoder.error().is_none());
/// assert!(input.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct ChunkedDecoder {
    tokenizer: Tokenizer,
    sink: ChunkSink,
    done: bool,
}

impl Default for ChunkedDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ChunkedDecoder {
    pub fn new() -> Self {
        Self::with_options(ParseOptions::default())
    }

    /// Trailer headers are subject to the header limits of `options`.
    pub fn with_options(options: ParseOptions) -> Self {
        Self {
            tokenizer: Tokenizer::new(Mode::ChunkedBody),
            sink: ChunkSink {
                options,
                fields: HeaderFields::default(),
                trailers: Headers::new(),
                body_len: None,
                error: None,
                complete: false,
            },
            done: false,
        }
    }

    pub fn parse<'a>(&'a mut self, data: &'a [u8]) -> ChunkedParse<'a> {
        if self.done {
            self.sink.error = Some(Error::InvalidParser);
            return ChunkedParse {
                parsed: 0,
                action: ChunkedAction::Error(Error::InvalidParser),
            };
        }
        if data.is_empty() {
            return ChunkedParse {
                parsed: 0,
                action: ChunkedAction::None,
            };
        }

        if self.tokenizer.is_paused() {
            self.tokenizer.resume();
        }
        self.sink.body_len = None;
        let parsed = self.tokenizer.execute(data, &mut self.sink);

        if self.sink.error.is_none() {
            self.sink.error = self.tokenizer.error().map(Error::from);
        }
        if let Some(error) = &self.sink.error {
            debug!("chunked body decoding failed: {error}");
            self.done = true;
            return ChunkedParse {
                parsed,
                action: ChunkedAction::Error(error.clone()),
            };
        }

        if self.sink.complete {
            self.done = true;
        }

        let action = match self.sink.body_len {
            Some(len) => ChunkedAction::Data(&data[parsed - len..parsed]),
            None => ChunkedAction::None,
        };
        ChunkedParse { parsed, action }
    }

    /// True once the terminating chunk and trailers were read, or decoding
    /// failed.
    pub fn done(&self) -> bool {
        self.done
    }

    pub fn error(&self) -> Option<&Error> {
        self.sink.error.as_ref()
    }

    /// Trailer headers, complete once [`done`](Self::done).
    pub fn trailers(&self) -> &Headers {
        &self.sink.trailers
    }
}
