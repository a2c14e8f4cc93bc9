//! Incremental HTTP/1.x message framing.
//!
//! This library turns raw byte streams into structured request and response
//! heads and correctly delimited bodies, independent of how the bytes are
//! fragmented. It never performs I/O on its own: parsers consume byte
//! slices, and readers pull from a [`reader::ByteSource`].
//!
//! # Features
//!
//! - Resumable request, response and chunked body parsers with size limits
//! - Body length and connection persistence rules of RFC 7230
//! - Token list, extension list, URL and query string grammars
//! - URL normalization and percent-encoding helpers
//! - Response building with consistent framing headers
//!
//! # Examples
//!
//! ## Parsing a request head
//!
//! ```
//! use httpwire::parser::RequestParser;
//! use httpwire::http::{BodySize, ConnectionStatus, Version};
//!
//! let mut parser = RequestParser::new();
//! parser.parse(b"POST /submit HTTP/1.1\r\nHost: example.com\r\nContent-Length: 3\r\n\r\n");
//! assert!(parser.done());
//!
//! let request = parser.request().unwrap();
//! assert_eq!(request.version, Version::HTTP_1_1);
//! assert_eq!(request.body_size(), Some(BodySize::ContentLength(3)));
//! assert_eq!(request.connection_status(), Some(ConnectionStatus::KeepAlive));
//! ```
//!
//! ## Error handling
//!
//! ```
//! use httpwire::parser::{ErrorKind, ParseOptions, RequestParser};
//!
//! let options = ParseOptions { max_url_size: 8, ..ParseOptions::default() };
//! let mut parser = RequestParser::with_options(options);
//! parser.parse(b"GET /a/very/long/path HTTP/1.1\r\n\r\n");
//!
//! assert!(parser.done());
//! assert_eq!(parser.error().map(|e| e.kind()), Some(ErrorKind::LimitExceeded));
//! ```
//!
//! ## Reading a message from a transport
//!
//! ```
//! use httpwire::http::prepare_response;
//! use httpwire::reader::{read_request, BodyReader, BufferedStream, ReadOptions};
//!
//! let wire = b"PUT /item HTTP/1.0\r\nConnection: keep-alive\r\nContent-Length: 5\r\n\r\nhello";
//! let mut stream = BufferedStream::new(&wire[..]);
//! let options = ReadOptions::default();
//!
//! let request = read_request(&mut stream, &options).unwrap();
//! let mut body = Vec::new();
//! BodyReader::for_request(&request, &mut stream, options)
//!     .unwrap()
//!     .read_to_end(&mut body)
//!     .unwrap();
//! assert_eq!(body, b"hello");
//!
//! let response = prepare_response(&request).unwrap().content_length(0).build(204, "No Content");
//! assert_eq!(response.to_string(), "HTTP/1.1 204 No Content\r\nContent-Length: 0\r\n\r\n");
//! ```

pub mod http;
pub mod parser;
pub mod reader;

// Re-export commonly used items for convenience
pub use http::{BodySize, ConnectionStatus, Headers, Method, Request, Response, StatusCode, Url, Version};
pub use parser::{ChunkedDecoder, Error as ParserError, ParseOptions, RequestParser, ResponseParser};
pub use reader::{BodyReader, BufferedStream, ByteSource, ReadError, ReadOptions};
