//! Incremental request head parser.

use std::mem;

use crate::http::{Method, Request};
use crate::parser::error::{Error, SyntaxError};
use crate::parser::head::{parse_head, HeadCore, HeadSink, HeadState};
use crate::parser::lexer::{Callbacks, Flow, HeadInfo, Mode, Tokenizer};
use crate::parser::options::ParseOptions;

#[derive(Debug, Clone)]
struct RequestHead {
    core: HeadCore,
    method: Vec<u8>,
    target: Vec<u8>,
    request: Option<Request>,
}

impl RequestHead {
    fn build(&mut self, info: HeadInfo) -> Result<Request, Error> {
        let method = std::str::from_utf8(&self.method)
            .ok()
            .and_then(|m| m.parse::<Method>().ok())
            .ok_or(Error::Syntax(SyntaxError::InvalidMethod))?;
        let target = String::from_utf8(mem::take(&mut self.target)).map_err(|_| Error::NotUtf8("request target"))?;
        let headers = self.core.fields.finish()?;

        Ok(Request {
            method,
            target,
            version: info.version,
            headers,
        })
    }
}

impl Callbacks for RequestHead {
    fn on_method(&mut self, data: &[u8]) -> Flow {
        self.method.extend_from_slice(data);
        Flow::Continue
    }

    fn on_url(&mut self, data: &[u8]) -> Flow {
        if self.target.len() + data.len() > self.core.options.max_url_size {
            return self.core.fail(Error::TooLongUrl);
        }
        self.target.extend_from_slice(data);
        Flow::Continue
    }

    fn on_header_field(&mut self, data: &[u8]) -> Flow {
        self.core.on_header_field(data)
    }

    fn on_header_value(&mut self, data: &[u8]) -> Flow {
        self.core.on_header_value(data)
    }

    fn on_headers_complete(&mut self, info: HeadInfo) -> Flow {
        match self.build(info) {
            Ok(request) => {
                self.request = Some(request);
                self.core.state = HeadState::WaitingLastLf;
                Flow::Pause
            }
            Err(error) => self.core.fail(error),
        }
    }
}

impl HeadSink for RequestHead {
    fn core(&mut self) -> &mut HeadCore {
        &mut self.core
    }
}

/// Parses a request head from bytes that may arrive in any fragmentation.
///
/// ```
/// use httpwire::parser::RequestParser;
/// use httpwire::http::Method;
///
/// let data = b"GET /index.html HTTP/1.1\r\nHost: example.com\r\n\r\nbody";
/// let mut parser = RequestParser::new();
///
/// let parsed = parser.parse(&data[..10]) + parser.parse(&data[10..]);
/// assert!(parser.done());
/// assert_eq!(parsed, data.len() - 4);
///
/// let request = parser.request().unwrap();
/// assert_eq!(request.method, Method::GET);
/// assert_eq!(request.target, "/index.html");
/// assert_eq!(request.headers.get_header("host"), Some("example.com"));
/// ```
#[derive(Debug, Clone)]
pub struct RequestParser {
    tokenizer: Tokenizer,
    head: RequestHead,
}

impl Default for RequestParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestParser {
    pub fn new() -> Self {
        Self::with_options(ParseOptions::default())
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Self {
            tokenizer: Tokenizer::new(Mode::Request),
            head: RequestHead {
                core: HeadCore::new(options),
                method: Vec::new(),
                target: Vec::new(),
                request: None,
            },
        }
    }

    /// Feeds bytes and returns how many belong to the head.
    ///
    /// Bytes after the head are left unconsumed. Check [`done`](Self::done)
    /// and [`error`](Self::error) after each call.
    pub fn parse(&mut self, data: &[u8]) -> usize {
        parse_head(&mut self.tokenizer, &mut self.head, data)
    }

    /// True once the head is complete or parsing failed.
    pub fn done(&self) -> bool {
        self.head.core.state == HeadState::Done
    }

    pub fn error(&self) -> Option<&Error> {
        self.head.core.error.as_ref()
    }

    pub fn options(&self) -> &ParseOptions {
        &self.head.core.options
    }

    /// The parsed head, once [`done`](Self::done) without error.
    pub fn request(&self) -> Option<&Request> {
        if self.done() && self.error().is_none() {
            self.head.request.as_ref()
        } else {
            None
        }
    }

    /// Takes the parsed head. Fails with the parse error, or with
    /// [`Error::InvalidParser`] when the head is not complete.
    pub fn into_request(self) -> Result<Request, Error> {
        if let Some(error) = self.head.core.error {
            return Err(error);
        }
        match self.head.request {
            Some(request) if self.head.core.state == HeadState::Done => Ok(request),
            _ => Err(Error::InvalidParser),
        }
    }
}
