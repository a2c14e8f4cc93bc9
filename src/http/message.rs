//! Message framing: how long is the body and does the connection persist.
//!
//! These follow RFC 7230 section 3.3.3 and section 6.

use log::debug;

use crate::http::headers::Headers;
use crate::http::method::Method;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::version::Version;
use crate::parser::parse_token_list_values;

/// How the end of a message body is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodySize {
    /// The body is exactly this many bytes.
    ContentLength(u64),
    /// The body uses a transfer coding, in practice `chunked`.
    TransferEncoding,
    /// The body ends when the connection closes.
    UntilEof,
}

/// Whether the connection can carry another message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    KeepAlive,
    Close,
}

/// Common view of request and response heads.
pub trait MessageHead {
    fn version(&self) -> Version;
    fn headers(&self) -> &Headers;
}

fn has_transfer_encoding(message: &impl MessageHead) -> bool {
    message.version() >= Version::HTTP_1_1
        && message
            .headers()
            .get_header_values("Transfer-Encoding")
            .is_some_and(|values| !values.is_empty())
}

/// `Some(None)` when there is no Content-Length, `None` when it is invalid.
fn content_length(headers: &Headers) -> Option<Option<u64>> {
    let Some(values) = headers.get_header_values("Content-Length") else {
        return Some(None);
    };

    let length = match values {
        [value] if !value.is_empty() && value.bytes().all(|c| c.is_ascii_digit()) => value.parse::<u64>().ok(),
        _ => None,
    };
    if length.is_none() {
        debug!("invalid Content-Length: {values:?}");
    }
    length.map(Some)
}

fn framing(message: &impl MessageHead, fallback: BodySize) -> Option<BodySize> {
    if has_transfer_encoding(message) {
        return Some(BodySize::TransferEncoding);
    }

    Some(match content_length(message.headers())? {
        Some(length) => BodySize::ContentLength(length),
        None => fallback,
    })
}

fn has_no_body(code: u16) -> bool {
    (100..200).contains(&code) || code == 204 || code == 304
}

/// Body framing of a request.
///
/// ```
/// use httpwire::http::{BodySize, Request, Method, Version};
///
/// let mut request = Request::new(Method::POST, "/", Version::HTTP_1_1);
/// assert_eq!(request.body_size(), Some(BodySize::ContentLength(0)));
///
/// request.headers.add_header("Content-Length", "10");
/// assert_eq!(request.body_size(), Some(BodySize::ContentLength(10)));
///
/// request.headers.add_header("Content-Length", "10");
/// assert_eq!(request.body_size(), None);
/// ```
pub fn request_body_size(request: &Request) -> Option<BodySize> {
    framing(request, BodySize::ContentLength(0))
}

/// Body framing of a response when the request is not known.
pub fn response_body_size(response: &Response) -> Option<BodySize> {
    if has_no_body(response.code) {
        return Some(BodySize::ContentLength(0));
    }
    framing(response, BodySize::UntilEof)
}

/// Body framing of a response to `request`. Responses to `HEAD` and
/// successful responses to `CONNECT` have no body whatever their headers say.
pub fn response_body_size_for(response: &Response, request: &Request) -> Option<BodySize> {
    if has_no_body(response.code) || request.method == Method::HEAD {
        return Some(BodySize::ContentLength(0));
    }
    if request.method == Method::CONNECT && (200..300).contains(&response.code) {
        return Some(BodySize::ContentLength(0));
    }
    framing(response, BodySize::UntilEof)
}

/// Whether the connection persists after this message. `None` when the
/// `Connection` header is not a valid token list.
pub fn connection_status(message: &impl MessageHead) -> Option<ConnectionStatus> {
    let (close, keep_alive) = match message.headers().get_header_values("Connection") {
        Some(values) => {
            let Some(tokens) = parse_token_list_values(values) else {
                debug!("invalid Connection header: {values:?}");
                return None;
            };
            (tokens.has("close"), tokens.has("keep-alive"))
        }
        None => (false, false),
    };

    let version = message.version();
    Some(if close {
        ConnectionStatus::Close
    } else if version >= Version::HTTP_1_1 || (version == Version::HTTP_1_0 && keep_alive) {
        ConnectionStatus::KeepAlive
    } else {
        ConnectionStatus::Close
    })
}
