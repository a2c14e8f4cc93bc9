//! Choosing and driving the right body reader for a message.

use std::io;

use log::debug;

use crate::http::{BodySize, Headers, Request, Response};
use crate::parser::parse_extension_list_values;
use crate::reader::bound::BoundBodyReader;
use crate::reader::chunked::ChunkedBodyReader;
use crate::reader::eof::EofBodyReader;
use crate::reader::error::{MakeBodyReaderError, ReadError};
use crate::reader::options::ReadOptions;
use crate::reader::source::ByteSource;

/// A message body reader of any framing.
///
/// ```
/// use httpwire::reader::{read_request, BodyReader, BufferedStream, ReadOptions};
///
/// let wire = b"POST /upload HTTP/1.1\r\nTransfer-Encoding: chunked\r\n\r\n4\r\nWiki\r\n5\r\npedia\r\n0\r\n\r\n";
/// let mut stream = BufferedStream::new(&wire[..]);
/// let options = ReadOptions::default();
///
/// let request = read_request(&mut stream, &options).unwrap();
/// let mut body = BodyReader::for_request(&request, &mut stream, options).unwrap();
///
/// let mut content = Vec::new();
/// body.read_to_end(&mut content).unwrap();
/// assert_eq!(content, b"Wikipedia");
/// ```
#[derive(Debug)]
pub enum BodyReader<'a, S> {
    Bound(BoundBodyReader<'a, S>),
    Chunked(ChunkedBodyReader<'a, S>),
    Eof(EofBodyReader<'a, S>),
}

impl<'a, S: ByteSource> BodyReader<'a, S> {
    /// Reader for the body of `request`.
    pub fn for_request(request: &Request, source: &'a mut S, options: ReadOptions) -> Result<Self, MakeBodyReaderError> {
        Self::from_framing(request.body_size(), &request.headers, source, options)
    }

    /// Reader for the body of `response` when the request is not known.
    pub fn for_response(response: &Response, source: &'a mut S, options: ReadOptions) -> Result<Self, MakeBodyReaderError> {
        Self::from_framing(response.body_size(), &response.headers, source, options)
    }

    /// Reader for the body of `response` to `request`.
    pub fn for_response_to(
        response: &Response,
        request: &Request,
        source: &'a mut S,
        options: ReadOptions,
    ) -> Result<Self, MakeBodyReaderError> {
        Self::from_framing(response.body_size_for(request), &response.headers, source, options)
    }

    fn from_framing(
        body_size: Option<BodySize>,
        headers: &Headers,
        source: &'a mut S,
        options: ReadOptions,
    ) -> Result<Self, MakeBodyReaderError> {
        match body_size {
            None => {
                debug!("cannot determine body length");
                Err(MakeBodyReaderError::BadMessage)
            }
            Some(BodySize::ContentLength(length)) => Ok(BodyReader::Bound(BoundBodyReader::new(source, length, options))),
            Some(BodySize::UntilEof) => Ok(BodyReader::Eof(EofBodyReader::new(source, options))),
            Some(BodySize::TransferEncoding) => {
                let values = headers.get_header_values("Transfer-Encoding").unwrap_or_default();
                let codings = parse_extension_list_values(values).ok_or(MakeBodyReaderError::BadMessage)?;

                match codings.extensions.as_slice() {
                    [coding] if coding.equals("chunked") => Ok(BodyReader::Chunked(ChunkedBodyReader::new(source, options))),
                    _ => {
                        debug!("unsupported transfer coding: {values:?}");
                        Err(MakeBodyReaderError::UnsupportedEncoding)
                    }
                }
            }
        }
    }

    /// Copies body bytes into `buf`.
    ///
    /// An empty `buf` returns `Ok(0)` without touching the source. The end
    /// of the body is reported as [`ReadError::Eof`].
    pub fn read_some(&mut self, buf: &mut [u8]) -> Result<usize, ReadError> {
        match self {
            BodyReader::Bound(reader) => reader.read_some(buf),
            BodyReader::Chunked(reader) => reader.read_some(buf),
            BodyReader::Eof(reader) => reader.read_some(buf),
        }
    }

    /// Reads the rest of the body into `out` and returns how many bytes
    /// were appended.
    pub fn read_to_end(&mut self, out: &mut Vec<u8>) -> Result<usize, ReadError> {
        let mut chunk = [0u8; 4096];
        let mut total = 0;
        loop {
            match self.read_some(&mut chunk) {
                Ok(n) => {
                    out.extend_from_slice(&chunk[..n]);
                    total += n;
                }
                Err(ReadError::Eof) => return Ok(total),
                Err(error) => return Err(error),
            }
        }
    }

    /// Trailer headers of a chunked body.
    pub fn trailer_headers(&self) -> Option<&Headers> {
        match self {
            BodyReader::Chunked(reader) => Some(reader.trailer_headers()),
            _ => None,
        }
    }
}

/// The end of the body reads as `Ok(0)`.
impl<S: ByteSource> io::Read for BodyReader<'_, S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.read_some(buf) {
            Ok(n) => Ok(n),
            Err(ReadError::Eof) => Ok(0),
            Err(error) => Err(error.into()),
        }
    }
}
