//! Assembling response heads.

use log::debug;
use thiserror::Error;

use crate::http::headers::Headers;
use crate::http::message::{BodySize, ConnectionStatus};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::status::StatusCode;
use crate::http::version::Version;

/// Builds response heads with consistent framing and connection headers.
///
/// ```
/// use httpwire::http::{ResponseBuilder, StatusCode};
///
/// let response = ResponseBuilder::new()
///     .add_header("Server", "httpwire")
///     .content_length(5)
///     .connection_close()
///     .build_status(StatusCode::OK);
///
/// assert_eq!(response.headers.get_header("Content-Length"), Some("5"));
/// assert_eq!(response.headers.get_header("Connection"), Some("close"));
/// assert!(response.to_string().starts_with("HTTP/1.1 200 OK\r\n"));
/// ```
#[derive(Debug, Clone)]
pub struct ResponseBuilder {
    version: Version,
    headers: Headers,
    body_size: Option<BodySize>,
    connection_status: Option<ConnectionStatus>,
}

impl Default for ResponseBuilder {
    fn default() -> Self {
        Self {
            version: Version::HTTP_1_1,
            headers: Headers::new(),
            body_size: None,
            connection_status: None,
        }
    }
}

impl ResponseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    pub fn add_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.add_header(name, value);
        self
    }

    pub fn keep_alive(mut self) -> Self {
        self.connection_status = Some(ConnectionStatus::KeepAlive);
        self
    }

    pub fn connection_close(mut self) -> Self {
        self.connection_status = Some(ConnectionStatus::Close);
        self
    }

    pub fn content_length(mut self, length: u64) -> Self {
        self.body_size = Some(BodySize::ContentLength(length));
        self
    }

    pub fn chunked_encoding(mut self) -> Self {
        self.body_size = Some(BodySize::TransferEncoding);
        self
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body_size(&self) -> Option<BodySize> {
        self.body_size
    }

    pub fn connection_status(&self) -> Option<ConnectionStatus> {
        self.connection_status
    }

    /// Builds a response head.
    ///
    /// A `Connection` header is only written when the version would not
    /// imply the requested behavior on its own.
    pub fn build(&self, code: u16, reason: impl Into<String>) -> Response {
        let mut response = Response {
            code,
            reason: reason.into(),
            version: self.version,
            headers: self.headers.clone(),
        };

        match self.body_size {
            Some(BodySize::ContentLength(length)) => {
                response.headers.set_header("Content-Length", [length.to_string()]);
            }
            Some(BodySize::TransferEncoding) => {
                response.headers.add_header("Transfer-Encoding", "chunked");
            }
            Some(BodySize::UntilEof) | None => {}
        }

        match self.connection_status {
            Some(ConnectionStatus::Close) if response.version >= Version::HTTP_1_1 => {
                response.headers.set_header("Connection", ["close"]);
            }
            Some(ConnectionStatus::KeepAlive) if response.version <= Version::HTTP_1_0 => {
                response.headers.set_header("Connection", ["keep-alive"]);
            }
            _ => {}
        }

        response
    }

    /// Builds a response head with the standard reason phrase of `status`.
    pub fn build_status(&self, status: StatusCode) -> Response {
        self.build(status.code(), status.reason_phrase().unwrap_or_default())
    }
}

/// Reasons a request cannot be answered normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PrepareError {
    #[error("bad message")]
    BadMessage,

    #[error("unsupported protocol version")]
    UnsupportedVersion,
}

impl PrepareError {
    /// The status to answer with.
    pub fn response_status(&self) -> StatusCode {
        match self {
            PrepareError::BadMessage => StatusCode::BAD_REQUEST,
            PrepareError::UnsupportedVersion => StatusCode::HTTP_VERSION_NOT_SUPPORTED,
        }
    }
}

/// Starts a response to `request`, carrying over its connection status.
pub fn prepare_response(request: &Request) -> Result<ResponseBuilder, PrepareError> {
    if request.version.major < 1 {
        debug!("refusing {} request", request.version);
        return Err(PrepareError::UnsupportedVersion);
    }

    let builder = ResponseBuilder::new();
    match request.connection_status() {
        Some(ConnectionStatus::KeepAlive) => Ok(builder.keep_alive()),
        Some(ConnectionStatus::Close) => Ok(builder.connection_close()),
        None => Err(PrepareError::BadMessage),
    }
}
