//! Byte-at-a-time tokenizer for HTTP/1.x message heads and chunked bodies.
//!
//! The tokenizer keeps no copies of the input. It reports the boundaries of
//! the start line fields, header names and values, and chunk data to a
//! [`Callbacks`] sink. A field that spans several `execute` calls is
//! reported in several pieces. In head modes it stops on the final LF of the
//! head without consuming it.

use log::trace;

use crate::http::Version;
use crate::parser::error::SyntaxError;
use crate::parser::grammar::{is_tchar, is_whitespace};

/// Longest accepted request method.
const MAX_METHOD_LEN: usize = 32;
const MAX_VERSION_NUMBER: u32 = 999;

/// What the tokenizer should do after a callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Pause,
    Abort,
}

/// Start line data known once the head is complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct HeadInfo {
    pub version: Version,
    pub status_code: u16,
}

pub(crate) trait Callbacks {
    fn on_method(&mut self, _data: &[u8]) -> Flow {
        Flow::Continue
    }

    fn on_url(&mut self, _data: &[u8]) -> Flow {
        Flow::Continue
    }

    fn on_reason(&mut self, _data: &[u8]) -> Flow {
        Flow::Continue
    }

    fn on_header_field(&mut self, _data: &[u8]) -> Flow {
        Flow::Continue
    }

    fn on_header_value(&mut self, _data: &[u8]) -> Flow {
        Flow::Continue
    }

    fn on_headers_complete(&mut self, _info: HeadInfo) -> Flow {
        Flow::Continue
    }

    fn on_body(&mut self, _data: &[u8]) -> Flow {
        Flow::Continue
    }

    fn on_message_complete(&mut self) -> Flow {
        Flow::Continue
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    Request,
    Response,
    ChunkedBody,
}

/// Fields reported piecewise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Span {
    Method,
    Url,
    Reason,
    HeaderField,
    HeaderValue,
}

impl Span {
    fn emit<C: Callbacks>(self, sink: &mut C, data: &[u8]) -> Flow {
        match self {
            Span::Method => sink.on_method(data),
            Span::Url => sink.on_url(data),
            Span::Reason => sink.on_reason(data),
            Span::HeaderField => sink.on_header_field(data),
            Span::HeaderValue => sink.on_header_value(data),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    RequestStart,
    Method,
    UrlStart,
    Url,
    ResponseStart,
    /// Number of bytes of `HTTP/` matched so far.
    Http(u8),
    MajorStart,
    Major,
    MinorStart,
    Minor,
    StatusCodeStart,
    /// Number of status digits seen so far.
    StatusCode(u8),
    ReasonStart,
    Reason,
    StartLineAlmostDone,
    HeaderFieldStart,
    HeaderField,
    HeaderValueStart,
    HeaderValue,
    HeaderValueAlmostDone,
    HeadersAlmostDone,
    HeadersDone,
    ChunkSizeStart,
    ChunkSize,
    ChunkParameters,
    ChunkSizeAlmostDone,
    ChunkData,
    ChunkDataAlmostDone,
    ChunkDataDone,
    MessageDone,
    Dead,
}

impl State {
    fn span(self) -> Option<Span> {
        match self {
            State::Method => Some(Span::Method),
            State::Url => Some(Span::Url),
            State::Reason => Some(Span::Reason),
            State::HeaderField => Some(Span::HeaderField),
            State::HeaderValue => Some(Span::HeaderValue),
            _ => None,
        }
    }
}

/// `HTAB / SP / VCHAR / obs-text`
fn is_field_value_char(c: u8) -> bool {
    c == b'\t' || (c >= b' ' && c != 0x7F)
}

fn is_url_char(c: u8) -> bool {
    c > b' ' && c != 0x7F
}

fn hex_value(c: u8) -> Option<u64> {
    char::from(c).to_digit(16).map(u64::from)
}

fn digit_value(c: u8) -> Option<u32> {
    c.is_ascii_digit().then(|| u32::from(c - b'0'))
}

#[derive(Debug, Clone)]
pub(crate) struct Tokenizer {
    mode: Mode,
    state: State,
    error: Option<SyntaxError>,
    paused: bool,
    major: u32,
    minor: u32,
    status_code: u16,
    method_len: usize,
    chunk_remaining: u64,
    trailing: bool,
}

impl Tokenizer {
    pub fn new(mode: Mode) -> Self {
        let state = match mode {
            Mode::Request => State::RequestStart,
            Mode::Response => State::ResponseStart,
            Mode::ChunkedBody => State::ChunkSizeStart,
        };

        Self {
            mode,
            state,
            error: None,
            paused: false,
            major: 0,
            minor: 0,
            status_code: 0,
            method_len: 0,
            chunk_remaining: 0,
            trailing: false,
        }
    }

    pub fn error(&self) -> Option<SyntaxError> {
        self.error
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    fn fail(&mut self, error: SyntaxError, position: usize) -> usize {
        trace!("tokenizer failed in {:?}: {error}", self.state);
        self.error = Some(error);
        self.state = State::Dead;
        position
    }

    /// Applies a callback's decision. Returns the value `execute` must return
    /// when it has to stop.
    fn after_callback(&mut self, flow: Flow, position: usize) -> Option<usize> {
        match flow {
            Flow::Continue => None,
            Flow::Pause => {
                trace!("tokenizer paused at {position}");
                self.paused = true;
                Some(position)
            }
            Flow::Abort => Some(self.fail(SyntaxError::CallbackAborted, position)),
        }
    }

    fn head_info(&self) -> HeadInfo {
        HeadInfo {
            version: Version::new(self.major, self.minor),
            status_code: self.status_code,
        }
    }

    /// Feeds bytes and returns how many were consumed.
    ///
    /// Consumption stops early on error, on pause, and in head modes on the
    /// final LF of the head.
    pub fn execute<C: Callbacks>(&mut self, data: &[u8], sink: &mut C) -> usize {
        if self.error.is_some() || self.paused || data.is_empty() {
            return 0;
        }

        let mut mark = self.state.span().map(|_| 0);
        let mut i = 0;

        while i < data.len() {
            let pos = i;
            let c = data[pos];
            i += 1;

            match self.state {
                State::RequestStart => {
                    if c == b'\r' || c == b'\n' {
                        continue;
                    }
                    if !is_tchar(c) {
                        return self.fail(SyntaxError::InvalidMethod, pos);
                    }
                    self.method_len = 1;
                    mark = Some(pos);
                    self.state = State::Method;
                }

                State::Method => {
                    if c == b' ' {
                        let start = mark.take().unwrap_or(0);
                        self.state = State::UrlStart;
                        if let Some(n) = self.after_callback(sink.on_method(&data[start..pos]), i) {
                            return n;
                        }
                    } else if is_tchar(c) {
                        self.method_len += 1;
                        if self.method_len > MAX_METHOD_LEN {
                            return self.fail(SyntaxError::InvalidMethod, pos);
                        }
                    } else {
                        return self.fail(SyntaxError::InvalidMethod, pos);
                    }
                }

                State::UrlStart => {
                    if !is_url_char(c) {
                        return self.fail(SyntaxError::InvalidUrl, pos);
                    }
                    mark = Some(pos);
                    self.state = State::Url;
                }

                State::Url => {
                    let next = match c {
                        b' ' => State::Http(0),
                        b'\r' => State::StartLineAlmostDone,
                        b'\n' => State::HeaderFieldStart,
                        c if is_url_char(c) => continue,
                        _ => return self.fail(SyntaxError::InvalidUrl, pos),
                    };
                    if next != State::Http(0) {
                        // A request line without a version is HTTP/0.9.
                        self.major = 0;
                        self.minor = 9;
                    }
                    let start = mark.take().unwrap_or(0);
                    self.state = next;
                    if let Some(n) = self.after_callback(sink.on_url(&data[start..pos]), i) {
                        return n;
                    }
                }

                State::ResponseStart => match c {
                    b'\r' | b'\n' => {}
                    b'H' => self.state = State::Http(1),
                    _ => return self.fail(SyntaxError::InvalidConstant, pos),
                },

                State::Http(matched) => {
                    const PREFIX: &[u8] = b"HTTP/";
                    if c != PREFIX[usize::from(matched)] {
                        return self.fail(SyntaxError::InvalidConstant, pos);
                    }
                    self.state = if usize::from(matched) + 1 == PREFIX.len() {
                        State::MajorStart
                    } else {
                        State::Http(matched + 1)
                    };
                }

                State::MajorStart => match digit_value(c) {
                    Some(d) => {
                        self.major = d;
                        self.state = State::Major;
                    }
                    None => return self.fail(SyntaxError::InvalidVersion, pos),
                },

                State::Major => {
                    if c == b'.' {
                        self.state = State::MinorStart;
                        continue;
                    }
                    match digit_value(c) {
                        Some(d) if self.major * 10 + d <= MAX_VERSION_NUMBER => self.major = self.major * 10 + d,
                        _ => return self.fail(SyntaxError::InvalidVersion, pos),
                    }
                }

                State::MinorStart => match digit_value(c) {
                    Some(d) => {
                        self.minor = d;
                        self.state = State::Minor;
                    }
                    None => return self.fail(SyntaxError::InvalidVersion, pos),
                },

                State::Minor => {
                    if let Some(d) = digit_value(c) {
                        if self.minor * 10 + d > MAX_VERSION_NUMBER {
                            return self.fail(SyntaxError::InvalidVersion, pos);
                        }
                        self.minor = self.minor * 10 + d;
                        continue;
                    }
                    self.state = match (self.mode, c) {
                        (Mode::Request, b'\r') => State::StartLineAlmostDone,
                        (Mode::Request, b'\n') => State::HeaderFieldStart,
                        (Mode::Response, b' ') => State::StatusCodeStart,
                        _ => return self.fail(SyntaxError::InvalidVersion, pos),
                    };
                }

                State::StatusCodeStart => match digit_value(c) {
                    Some(d) => {
                        self.status_code = d as u16;
                        self.state = State::StatusCode(1);
                    }
                    None => return self.fail(SyntaxError::InvalidStatus, pos),
                },

                State::StatusCode(digits) => {
                    if let Some(d) = digit_value(c) {
                        if digits == 3 {
                            return self.fail(SyntaxError::InvalidStatus, pos);
                        }
                        self.status_code = self.status_code * 10 + d as u16;
                        self.state = State::StatusCode(digits + 1);
                        continue;
                    }
                    self.state = match c {
                        _ if digits != 3 => return self.fail(SyntaxError::InvalidStatus, pos),
                        b' ' => State::ReasonStart,
                        b'\r' => State::StartLineAlmostDone,
                        b'\n' => State::HeaderFieldStart,
                        _ => return self.fail(SyntaxError::InvalidStatus, pos),
                    };
                }

                State::ReasonStart => match c {
                    b'\r' => self.state = State::StartLineAlmostDone,
                    b'\n' => self.state = State::HeaderFieldStart,
                    c if is_field_value_char(c) => {
                        mark = Some(pos);
                        self.state = State::Reason;
                    }
                    _ => return self.fail(SyntaxError::InvalidReason, pos),
                },

                State::Reason => {
                    self.state = match c {
                        b'\r' => State::StartLineAlmostDone,
                        b'\n' => State::HeaderFieldStart,
                        c if is_field_value_char(c) => continue,
                        _ => return self.fail(SyntaxError::InvalidReason, pos),
                    };
                    let start = mark.take().unwrap_or(0);
                    if let Some(n) = self.after_callback(sink.on_reason(&data[start..pos]), i) {
                        return n;
                    }
                }

                State::StartLineAlmostDone => {
                    if c != b'\n' {
                        return self.fail(SyntaxError::LfExpected, pos);
                    }
                    self.state = State::HeaderFieldStart;
                }

                State::HeaderFieldStart => match c {
                    b'\r' => self.state = State::HeadersAlmostDone,
                    b'\n' => return self.finish_head(pos, sink),
                    c if is_whitespace(c) => return self.fail(SyntaxError::ObsoleteLineFolding, pos),
                    c if is_tchar(c) => {
                        mark = Some(pos);
                        self.state = State::HeaderField;
                    }
                    _ => return self.fail(SyntaxError::InvalidHeaderToken, pos),
                },

                State::HeaderField => {
                    if is_tchar(c) {
                        continue;
                    }
                    if c != b':' {
                        return self.fail(SyntaxError::InvalidHeaderToken, pos);
                    }
                    let start = mark.take().unwrap_or(0);
                    self.state = State::HeaderValueStart;
                    if let Some(n) = self.after_callback(sink.on_header_field(&data[start..pos]), i) {
                        return n;
                    }
                }

                State::HeaderValueStart => {
                    let next = match c {
                        c if is_whitespace(c) => continue,
                        b'\r' => State::HeaderValueAlmostDone,
                        b'\n' => State::HeaderFieldStart,
                        c if is_field_value_char(c) => {
                            mark = Some(pos);
                            self.state = State::HeaderValue;
                            continue;
                        }
                        _ => return self.fail(SyntaxError::InvalidHeaderValue, pos),
                    };
                    self.state = next;
                    if let Some(n) = self.after_callback(sink.on_header_value(&[]), i) {
                        return n;
                    }
                }

                State::HeaderValue => {
                    self.state = match c {
                        b'\r' => State::HeaderValueAlmostDone,
                        b'\n' => State::HeaderFieldStart,
                        c if is_field_value_char(c) => continue,
                        _ => return self.fail(SyntaxError::InvalidHeaderValue, pos),
                    };
                    let start = mark.take().unwrap_or(0);
                    if let Some(n) = self.after_callback(sink.on_header_value(&data[start..pos]), i) {
                        return n;
                    }
                }

                State::HeaderValueAlmostDone => {
                    if c != b'\n' {
                        return self.fail(SyntaxError::LfExpected, pos);
                    }
                    self.state = State::HeaderFieldStart;
                }

                State::HeadersAlmostDone => {
                    if c != b'\n' {
                        return self.fail(SyntaxError::LfExpected, pos);
                    }
                    return self.finish_head(pos, sink);
                }

                State::ChunkSizeStart => match hex_value(c) {
                    Some(v) => {
                        self.chunk_remaining = v;
                        self.state = State::ChunkSize;
                    }
                    None => return self.fail(SyntaxError::InvalidChunkSize, pos),
                },

                State::ChunkSize => {
                    if let Some(v) = hex_value(c) {
                        match self.chunk_remaining.checked_mul(16).and_then(|n| n.checked_add(v)) {
                            Some(size) => self.chunk_remaining = size,
                            None => return self.fail(SyntaxError::ChunkSizeOverflow, pos),
                        }
                        continue;
                    }
                    match c {
                        b';' | b' ' | b'\t' => self.state = State::ChunkParameters,
                        b'\r' => self.state = State::ChunkSizeAlmostDone,
                        b'\n' => self.chunk_header_done(),
                        _ => return self.fail(SyntaxError::InvalidChunkSize, pos),
                    }
                }

                State::ChunkParameters => match c {
                    b'\r' => self.state = State::ChunkSizeAlmostDone,
                    b'\n' => self.chunk_header_done(),
                    c if is_field_value_char(c) => {}
                    _ => return self.fail(SyntaxError::InvalidChunkSize, pos),
                },

                State::ChunkSizeAlmostDone => {
                    if c != b'\n' {
                        return self.fail(SyntaxError::LfExpected, pos);
                    }
                    self.chunk_header_done();
                }

                State::ChunkData => {
                    let available = (data.len() - pos) as u64;
                    let len = self.chunk_remaining.min(available) as usize;
                    let end = pos + len;
                    i = end;
                    self.chunk_remaining -= len as u64;
                    if self.chunk_remaining == 0 {
                        self.state = State::ChunkDataAlmostDone;
                    }
                    if let Some(n) = self.after_callback(sink.on_body(&data[pos..end]), end) {
                        return n;
                    }
                }

                State::ChunkDataAlmostDone => match c {
                    b'\r' => self.state = State::ChunkDataDone,
                    b'\n' => self.state = State::ChunkSizeStart,
                    _ => return self.fail(SyntaxError::CrExpected, pos),
                },

                State::ChunkDataDone => {
                    if c != b'\n' {
                        return self.fail(SyntaxError::LfExpected, pos);
                    }
                    self.state = State::ChunkSizeStart;
                }

                State::HeadersDone | State::MessageDone | State::Dead => {
                    return self.fail(SyntaxError::Closed, pos);
                }
            }
        }

        if let (Some(start), Some(span)) = (mark, self.state.span()) {
            if start < data.len() {
                if let Some(n) = self.after_callback(span.emit(sink, &data[start..]), data.len()) {
                    return n;
                }
            }
        }

        data.len()
    }

    fn chunk_header_done(&mut self) {
        if self.chunk_remaining == 0 {
            self.trailing = true;
            self.state = State::HeaderFieldStart;
        } else {
            self.state = State::ChunkData;
        }
    }

    /// Called on the final LF of a head or of a trailer section.
    fn finish_head<C: Callbacks>(&mut self, lf_position: usize, sink: &mut C) -> usize {
        if self.trailing || self.mode == Mode::ChunkedBody {
            self.state = State::MessageDone;
            let consumed = lf_position + 1;
            return self.after_callback(sink.on_message_complete(), consumed).unwrap_or(consumed);
        }

        self.state = State::HeadersDone;
        let flow = sink.on_headers_complete(self.head_info());
        if flow == Flow::Abort {
            return self.fail(SyntaxError::CallbackAborted, lf_position);
        }
        self.paused = true;
        lf_position
    }
}
