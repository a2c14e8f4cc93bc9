//! Reading message heads from a byte source.

use log::{debug, trace};

use crate::http::{Request, Response};
use crate::parser::{self, RequestParser, ResponseParser};
use crate::reader::error::ReadError;
use crate::reader::options::ReadOptions;
use crate::reader::source::ByteSource;

trait HeadParser {
    type Head;

    fn parse(&mut self, data: &[u8]) -> usize;
    fn done(&self) -> bool;
    fn finish(self) -> Result<Self::Head, parser::Error>;
}

impl HeadParser for RequestParser {
    type Head = Request;

    fn parse(&mut self, data: &[u8]) -> usize {
        RequestParser::parse(self, data)
    }

    fn done(&self) -> bool {
        RequestParser::done(self)
    }

    fn finish(self) -> Result<Request, parser::Error> {
        self.into_request()
    }
}

impl HeadParser for ResponseParser {
    type Head = Response;

    fn parse(&mut self, data: &[u8]) -> usize {
        ResponseParser::parse(self, data)
    }

    fn done(&self) -> bool {
        ResponseParser::done(self)
    }

    fn finish(self) -> Result<Response, parser::Error> {
        self.into_response()
    }
}

fn read_head<S, P>(source: &mut S, options: &ReadOptions, mut parser: P) -> Result<P::Head, ReadError>
where
    S: ByteSource,
    P: HeadParser,
{
    let mut received = false;

    loop {
        if !source.buffered().is_empty() {
            received = true;
            let parsed = parser.parse(source.buffered());
            source.consume(parsed);

            if parser.done() {
                return parser.finish().map_err(|error| {
                    debug!("invalid message head: {error}");
                    ReadError::from(error)
                });
            }
        }

        trace!("head incomplete, reading more");
        if source.fill(options.read_buffer_size)? == 0 {
            return Err(if received {
                ReadError::UnexpectedEof
            } else {
                ReadError::ConnectionClosed
            });
        }
    }
}

/// Reads a request head. Bytes after the head stay in `source`.
pub fn read_request<S: ByteSource>(source: &mut S, options: &ReadOptions) -> Result<Request, ReadError> {
    read_head(source, options, RequestParser::with_options(options.parsing))
}

/// Reads a response head. Bytes after the head stay in `source`.
pub fn read_response<S: ByteSource>(source: &mut S, options: &ReadOptions) -> Result<Response, ReadError> {
    read_head(source, options, ResponseParser::with_options(options.parsing))
}
