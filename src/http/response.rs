//! HTTP response head.

use std::fmt;

use crate::http::headers::Headers;
use crate::http::message::{self, BodySize, ConnectionStatus, MessageHead};
use crate::http::request::Request;
use crate::http::version::Version;

/// The head of an HTTP response: status line and header fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    /// The status code
    pub code: u16,
    /// The reason phrase, possibly empty
    pub reason: String,
    /// The protocol version
    pub version: Version,
    /// The header fields
    pub headers: Headers,
}

impl Response {
    pub fn new(code: u16, reason: impl Into<String>, version: Version) -> Self {
        Self {
            code,
            reason: reason.into(),
            version,
            headers: Headers::new(),
        }
    }

    /// Framing of the response body when the request is unknown.
    pub fn body_size(&self) -> Option<BodySize> {
        message::response_body_size(self)
    }

    /// Framing of the response body given the request it answers.
    pub fn body_size_for(&self, request: &Request) -> Option<BodySize> {
        message::response_body_size_for(self, request)
    }

    pub fn connection_status(&self) -> Option<ConnectionStatus> {
        message::connection_status(self)
    }
}

impl MessageHead for Response {
    fn version(&self) -> Version {
        self.version
    }

    fn headers(&self) -> &Headers {
        &self.headers
    }
}

/// Writes the status line, the header fields and the empty line.
impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:03} {}\r\n{}\r\n", self.version, self.code, self.reason, self.headers)
    }
}
