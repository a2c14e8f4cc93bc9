//! HTTP request head.

use std::fmt;

use crate::http::headers::Headers;
use crate::http::message::{self, BodySize, ConnectionStatus, MessageHead};
use crate::http::method::Method;
use crate::http::url::Url;
use crate::http::version::Version;

/// The head of an HTTP request: request line and header fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    /// The request method
    pub method: Method,
    /// The request target exactly as received
    pub target: String,
    /// The protocol version
    pub version: Version,
    /// The header fields
    pub headers: Headers,
}

impl Request {
    /// Create a new request head without headers.
    ///
    /// # Arguments
    ///
    /// * `method` - The request method
    /// * `target` - The request target
    /// * `version` - The protocol version
    pub fn new(method: Method, target: impl Into<String>, version: Version) -> Self {
        Self {
            method,
            target: target.into(),
            version,
            headers: Headers::new(),
        }
    }

    /// Parses the request target as a URL.
    pub fn url(&self) -> Option<Url> {
        crate::parser::parse_url(&self.target)
    }

    /// Framing of the request body, `None` when the headers are malformed.
    pub fn body_size(&self) -> Option<BodySize> {
        message::request_body_size(self)
    }

    pub fn connection_status(&self) -> Option<ConnectionStatus> {
        message::connection_status(self)
    }
}

impl MessageHead for Request {
    fn version(&self) -> Version {
        self.version
    }

    fn headers(&self) -> &Headers {
        &self.headers
    }
}

/// Writes the request line, the header fields and the empty line.
impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}\r\n{}\r\n", self.method, self.target, self.version, self.headers)
    }
}
