//! Error types for reading messages from a byte source.

use std::io;

use thiserror::Error;

use crate::http::StatusCode;
use crate::parser;

/// Errors returned by head and body readers.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The body ended normally. Not a failure.
    #[error("end of body")]
    Eof,

    /// The transport ended while the message still expected bytes.
    #[error("connection closed before the end of the message")]
    UnexpectedEof,

    /// The transport ended before the first byte of a head.
    #[error("connection closed")]
    ConnectionClosed,

    /// The bytes received are not a valid message.
    #[error("parse error: {0}")]
    Parse(#[from] parser::Error),

    /// The transport failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ReadError {
    /// True for the normal end of a body.
    pub fn is_eof(&self) -> bool {
        matches!(self, ReadError::Eof)
    }
}

impl From<ReadError> for io::Error {
    fn from(error: ReadError) -> Self {
        match error {
            ReadError::Io(error) => error,
            ReadError::Eof | ReadError::UnexpectedEof | ReadError::ConnectionClosed => {
                io::Error::new(io::ErrorKind::UnexpectedEof, error)
            }
            ReadError::Parse(_) => io::Error::new(io::ErrorKind::InvalidData, error),
        }
    }
}

/// Reasons no body reader can be built for a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MakeBodyReaderError {
    /// The framing headers are malformed or contradictory.
    #[error("bad message")]
    BadMessage,

    /// The message uses a transfer coding other than `chunked`.
    #[error("unsupported transfer encoding")]
    UnsupportedEncoding,
}

impl MakeBodyReaderError {
    /// The status to answer with.
    pub fn response_status(&self) -> StatusCode {
        match self {
            MakeBodyReaderError::BadMessage => StatusCode::BAD_REQUEST,
            MakeBodyReaderError::UnsupportedEncoding => StatusCode::NOT_IMPLEMENTED,
        }
    }
}
