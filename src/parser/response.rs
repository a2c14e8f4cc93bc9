//! Incremental response head parser.

use std::mem;

use crate::http::Response;
use crate::parser::error::Error;
use crate::parser::head::{parse_head, HeadCore, HeadSink, HeadState};
use crate::parser::lexer::{Callbacks, Flow, HeadInfo, Mode, Tokenizer};
use crate::parser::options::ParseOptions;

#[derive(Debug, Clone)]
struct ResponseHead {
    core: HeadCore,
    reason: Vec<u8>,
    response: Option<Response>,
}

impl ResponseHead {
    fn build(&mut self, info: HeadInfo) -> Result<Response, Error> {
        let reason = String::from_utf8(mem::take(&mut self.reason)).map_err(|_| Error::NotUtf8("reason phrase"))?;
        let headers = self.core.fields.finish()?;

        Ok(Response {
            code: info.status_code,
            reason,
            version: info.version,
            headers,
        })
    }
}

impl Callbacks for ResponseHead {
    fn on_reason(&mut self, data: &[u8]) -> Flow {
        if self.reason.len() + data.len() > self.core.options.max_reason_size {
            return self.core.fail(Error::TooLongReason);
        }
        self.reason.extend_from_slice(data);
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
            Ok(response) => {
                self.response = Some(response);
                self.core.state = HeadState::WaitingLastLf;
                Flow::Pause
            }
            Err(error) => self.core.fail(error),
        }
    }
}

impl HeadSink for ResponseHead {
    fn core(&mut self) -> &mut HeadCore {
        &mut self.core
    }
}

/// Parses a response head from bytes that may arrive in any fragmentation.
#[derive(Debug, Clone)]
pub struct ResponseParser {
    tokenizer: Tokenizer,
    head: ResponseHead,
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseParser {
    pub fn new() -> Self {
        Self::with_options(ParseOptions::default())
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Self {
            tokenizer: Tokenizer::new(Mode::Response),
            head: ResponseHead {
                core: HeadCore::new(options),
                reason: Vec::new(),
                response: None,
            },
        }
    }

    /// Feeds bytes and returns how many belong to the head.
    pub fn parse(&mut self, data: &[u8]) -> usize {
        parse_head(&mut self.tokenizer, &mut self.head, data)
    }

    pub fn done(&self) -> bool {
        self.head.core.state == HeadState::Done
    }

    pub fn error(&self) -> Option<&Error> {
        self.head.core.error.as_ref()
    }

    pub fn options(&self) -> &ParseOptions {
        &self.head.core.options
    }

    pub fn response(&self) -> Option<&Response> {
        if self.done() && self.error().is_none() {
            self.head.response.as_ref()
        } else {
            None
        }
    }

    pub fn into_response(self) -> Result<Response, Error> {
        if let Some(error) = self.head.core.error {
            return Err(error);
        }
        match self.head.response {
            Some(response) if self.head.core.state == HeadState::Done => Ok(response),
            _ => Err(Error::InvalidParser),
        }
    }
}
