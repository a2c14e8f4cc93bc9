//! HTTP parsers.
//!
//! Resumable parsers for request and response heads and chunked bodies,
//! plus the header value grammars (token lists, extension lists) and the
//! URL and query string parsers.

mod chunked;
mod error;
mod extension_list;
pub mod grammar;
mod head;
mod lexer;
mod options;
mod request;
mod response;
mod token_list;
mod url;
mod tests;

// Re-export public items
pub use chunked::{ChunkedAction, ChunkedDecoder, ChunkedParse};
pub use error::{Error, ErrorKind, SyntaxError};
pub use extension_list::{parse_extension_list, parse_extension_list_values, Extension, ExtensionList, ExtensionParameter};
pub use options::ParseOptions;
pub use request::RequestParser;
pub use response::ResponseParser;
pub use token_list::{parse_token_list, parse_token_list_values, Token, TokenList};
pub use url::{parse_query, parse_url};
