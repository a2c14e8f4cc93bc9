//! Error types for the HTTP parsers.

use thiserror::Error as ThisError;

/// Structural failures reported by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
pub enum SyntaxError {
    /// The request method is not a token or is too long.
    #[error("invalid HTTP method")]
    InvalidMethod,

    /// The request target contains a forbidden byte.
    #[error("invalid request target")]
    InvalidUrl,

    /// A fixed part of the start line (`HTTP/`) did not match.
    #[error("invalid constant string")]
    InvalidConstant,

    /// The protocol version is malformed.
    #[error("invalid HTTP version")]
    InvalidVersion,

    /// The status code is not three digits.
    #[error("invalid status code")]
    InvalidStatus,

    /// The reason phrase contains a control character.
    #[error("invalid reason phrase")]
    InvalidReason,

    /// A header name contains a non-token byte or no colon follows it.
    #[error("invalid header name")]
    InvalidHeaderToken,

    /// A header value contains a control character.
    #[error("invalid header value")]
    InvalidHeaderValue,

    /// A line feed was required.
    #[error("LF expected")]
    LfExpected,

    /// A carriage return was required.
    #[error("CR expected")]
    CrExpected,

    /// A header line starts with whitespace (obsolete line folding).
    #[error("obsolete line folding is not accepted")]
    ObsoleteLineFolding,

    /// The chunk size line is not a hexadecimal number.
    #[error("invalid chunk size")]
    InvalidChunkSize,

    /// The chunk size does not fit in 64 bits.
    #[error("chunk size overflow")]
    ChunkSizeOverflow,

    /// Bytes arrived after the message was already complete.
    #[error("data after end of message")]
    Closed,

    /// A callback refused to continue.
    #[error("aborted by callback")]
    CallbackAborted,
}

/// Broad classification of parser errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input does not follow the HTTP grammar.
    Malformed,
    /// The input is well formed but exceeds a configured limit.
    LimitExceeded,
    /// The parser was used after it finished.
    InvalidParser,
}

/// Errors that can occur while parsing a message head or a chunked body.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    /// The input is not a valid HTTP message.
    #[error("malformed message: {0}")]
    Syntax(#[from] SyntaxError),

    /// A field is not valid UTF-8.
    #[error("{0} is not valid UTF-8")]
    NotUtf8(&'static str),

    /// A single header (name plus value) is longer than allowed.
    #[error("header too long")]
    TooLongHeader,

    /// The message carries more headers than allowed.
    #[error("too many headers")]
    TooManyHeaders,

    /// The request target is longer than allowed.
    #[error("request target too long")]
    TooLongUrl,

    /// The reason phrase is longer than allowed.
    #[error("reason phrase too long")]
    TooLongReason,

    /// `parse` was called on a parser that had already finished.
    #[error("parser already finished")]
    InvalidParser,
}

impl Error {
    /// Classifies the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Syntax(_) | Error::NotUtf8(_) => ErrorKind::Malformed,
            Error::TooLongHeader | Error::TooManyHeaders | Error::TooLongUrl | Error::TooLongReason => {
                ErrorKind::LimitExceeded
            }
            Error::InvalidParser => ErrorKind::InvalidParser,
        }
    }

    /// Returns true when a configured size or count limit was hit.
    pub fn is_limit_exceeded(&self) -> bool {
        self.kind() == ErrorKind::LimitExceeded
    }
}
