//! State shared by the request and response head parsers: header field
//! accumulation, limit checks and the drive loop over the tokenizer.

use std::mem;

use log::{debug, warn};

use crate::http::Headers;
use crate::parser::error::{Error, SyntaxError};
use crate::parser::lexer::{Callbacks, Flow, Tokenizer};
use crate::parser::options::ParseOptions;

/// Collects header names and values that arrive in pieces.
#[derive(Debug, Clone, Default)]
pub(crate) struct HeaderFields {
    name: Vec<u8>,
    value: Vec<u8>,
    pending: bool,
    headers: Headers,
}

impl HeaderFields {
    /// A piece of a header name. Starting a new name stores the previous
    /// header.
    pub fn on_name(&mut self, data: &[u8], options: &ParseOptions) -> Result<(), Error> {
        if self.pending {
            self.flush()?;
        }
        if self.headers.len() >= options.max_headers_number {
            return Err(Error::TooManyHeaders);
        }
        if self.name.len() + data.len() > options.max_header_size {
            return Err(Error::TooLongHeader);
        }
        self.name.extend_from_slice(data);
        Ok(())
    }

    /// A piece of a header value, possibly empty.
    pub fn on_value(&mut self, data: &[u8], options: &ParseOptions) -> Result<(), Error> {
        self.pending = true;
        if self.name.len() + self.value.len() + data.len() > options.max_header_size {
            return Err(Error::TooLongHeader);
        }
        self.value.extend_from_slice(data);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Error> {
        self.pending = false;

        let name = String::from_utf8(mem::take(&mut self.name)).map_err(|_| Error::NotUtf8("header name"))?;
        let mut value = mem::take(&mut self.value);
        while value.last().is_some_and(|&c| c == b' ' || c == b'\t') {
            value.pop();
        }
        let value = String::from_utf8(value).map_err(|_| Error::NotUtf8("header value"))?;

        self.headers.add_header(name, value);
        Ok(())
    }

    /// Stores the last header and hands out everything collected.
    pub fn finish(&mut self) -> Result<Headers, Error> {
        if self.pending {
            self.flush()?;
        }
        Ok(mem::take(&mut self.headers))
    }
}

/// Progress of a head parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HeadState {
    Start,
    ParsingHeaderName,
    ParsingHeaderValue,
    /// The tokenizer stopped right before the final LF.
    WaitingLastLf,
    Done,
}

/// Bookkeeping common to request and response heads.
#[derive(Debug, Clone)]
pub(crate) struct HeadCore {
    pub options: ParseOptions,
    pub state: HeadState,
    pub error: Option<Error>,
    pub fields: HeaderFields,
}

impl HeadCore {
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            state: HeadState::Start,
            error: None,
            fields: HeaderFields::default(),
        }
    }

    /// Records the first error and asks the tokenizer to stop.
    pub fn fail(&mut self, error: Error) -> Flow {
        if self.error.is_none() {
            self.error = Some(error);
        }
        Flow::Abort
    }

    pub fn on_header_field(&mut self, data: &[u8]) -> Flow {
        self.state = HeadState::ParsingHeaderName;
        match self.fields.on_name(data, &self.options) {
            Ok(()) => Flow::Continue,
            Err(error) => self.fail(error),
        }
    }

    pub fn on_header_value(&mut self, data: &[u8]) -> Flow {
        self.state = HeadState::ParsingHeaderValue;
        match self.fields.on_value(data, &self.options) {
            Ok(()) => Flow::Continue,
            Err(error) => self.fail(error),
        }
    }
}

/// A tokenizer sink that carries a [`HeadCore`].
pub(crate) trait HeadSink: Callbacks {
    fn core(&mut self) -> &mut HeadCore;
}

/// Feeds `data` to the tokenizer and consumes the final LF of the head.
pub(crate) fn parse_head<S: HeadSink>(tokenizer: &mut Tokenizer, sink: &mut S, data: &[u8]) -> usize {
    if sink.core().state == HeadState::Done {
        warn!("head parser used after it finished");
        sink.core().error = Some(Error::InvalidParser);
        return 0;
    }
    if data.is_empty() {
        return 0;
    }

    let mut parsed = 0;
    if sink.core().state != HeadState::WaitingLastLf {
        parsed = tokenizer.execute(data, sink);

        let core = sink.core();
        if core.error.is_none() {
            core.error = tokenizer.error().map(Error::from);
        }
        if let Some(error) = &core.error {
            debug!("head parsing failed after {parsed} bytes: {error}");
            core.state = HeadState::Done;
            return parsed;
        }
    }

    let core = sink.core();
    if core.state == HeadState::WaitingLastLf && parsed < data.len() {
        core.state = HeadState::Done;
        if data[parsed] != b'\n' {
            core.error = Some(Error::Syntax(SyntaxError::LfExpected));
            return parsed;
        }
        parsed += 1;
    }

    parsed
}
