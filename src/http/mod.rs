//! HTTP message model.
//!
//! Request and response heads, header fields, URLs and query strings, and
//! the framing rules that decide how a message body is delimited.

mod builder;
mod headers;
mod message;
mod method;
mod query;
mod request;
mod response;
mod status;
mod url;
mod version;

// Re-export public items
pub use builder::{prepare_response, PrepareError, ResponseBuilder};
pub use headers::Headers;
pub use message::{
    connection_status, request_body_size, response_body_size, response_body_size_for, BodySize, ConnectionStatus,
    MessageHead,
};
pub use method::{InvalidMethod, Method};
pub use query::{build_query, Query, QueryParameter};
pub use request::Request;
pub use response::Response;
pub use status::StatusCode;
pub use url::{
    build_url, escape, escape_plus, normalize_path, normalize_percent_encoding, normalize_url, unescape,
    unescape_plus, Url,
};
pub use version::{InvalidVersion, Version};
