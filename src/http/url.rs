//! URL representation, recomposition and normalization (RFC 3986).

use std::fmt;

use percent_encoding::{percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

/// Everything except the RFC 3986 `unreserved` set gets percent-encoded.
const ESCAPE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// A URL split into its RFC 3986 components.
///
/// `host` never carries the square brackets of an IP literal. `path` is
/// always present, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Url {
    pub scheme: Option<String>,
    pub userinfo: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub path: String,
    pub query: Option<String>,
    pub fragment: Option<String>,
}

impl Url {
    /// Parses a URL, see [`crate::parser::parse_url`].
    pub fn parse(data: &str) -> Option<Url> {
        crate::parser::parse_url(data)
    }

    /// Returns the normalized form of this URL, see [`normalize_url`].
    pub fn normalize(&self, normalize_http: bool) -> Url {
        normalize_url(self, normalize_http)
    }
}

/// Recomposes the URL as described in RFC 3986 section 5.3.
impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(scheme) = &self.scheme {
            write!(f, "{scheme}:")?;
        }

        if self.userinfo.is_some() || self.host.is_some() || self.port.is_some() {
            f.write_str("//")?;
            if let Some(userinfo) = &self.userinfo {
                write!(f, "{userinfo}@")?;
            }
            if let Some(host) = &self.host {
                if host.contains(':') {
                    write!(f, "[{host}]")?;
                } else {
                    f.write_str(host)?;
                }
            }
            if let Some(port) = self.port {
                write!(f, ":{port}")?;
            }
        }

        f.write_str(&self.path)?;

        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}

pub fn build_url(url: &Url) -> String {
    url.to_string()
}

fn is_unreserved(c: u8) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, b'-' | b'.' | b'_' | b'~')
}

fn hex_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// Decodes percent-encoded unreserved characters and upper-cases the hex
/// digits of every other escape. Malformed escapes are copied as is.
pub fn normalize_percent_encoding(data: &str) -> String {
    let bytes = data.as_bytes();
    let mut result = String::with_capacity(data.len());
    let mut pos = 0;

    while let Some(offset) = data[pos..].find('%') {
        let start = pos + offset;
        result.push_str(&data[pos..start]);

        if let Some(&[high, low]) = bytes.get(start + 1..start + 3) {
            if let (Some(h), Some(l)) = (hex_value(high), hex_value(low)) {
                let decoded = h * 16 + l;
                if is_unreserved(decoded) {
                    result.push(char::from(decoded));
                } else {
                    result.push('%');
                    result.push(char::from(high.to_ascii_uppercase()));
                    result.push(char::from(low.to_ascii_uppercase()));
                }
                pos = start + 3;
                continue;
            }
        }

        result.push('%');
        pos = start + 1;
    }

    result.push_str(&data[pos..]);
    result
}

/// Removes `.` and `..` segments as described in RFC 3986 section 5.2.4.
pub fn normalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    let mut input = path;

    while !input.is_empty() {
        if let Some(rest) = input.strip_prefix("./") {
            input = rest;
        } else if let Some(rest) = input.strip_prefix("../") {
            input = rest;
        } else if input.starts_with("/./") {
            input = &input[2..];
        } else if input == "/." {
            segments.push("/");
            input = "";
        } else if input.starts_with("/../") {
            segments.pop();
            input = &input[3..];
        } else if input == "/.." {
            segments.pop();
            segments.push("/");
            input = "";
        } else if input == "." || input == ".." {
            input = "";
        } else {
            let end = input.bytes().skip(1).position(|c| c == b'/').map_or(input.len(), |i| i + 1);
            segments.push(&input[..end]);
            input = &input[end..];
        }
    }

    segments.concat()
}

/// Normalizes a URL for comparison.
///
/// Scheme and host are lower-cased, percent-encoding of path and query is
/// normalized, then dot segments are removed from the path. With
/// `normalize_http`, the default port of `http`/`https` is dropped and an
/// empty path becomes `/`.
///
/// ```
/// use httpwire::http::Url;
///
/// let url = Url::parse("HTTP://Example.COM:80/a/./b/../%7euser?x=%2f").unwrap();
/// assert_eq!(url.normalize(true).to_string(), "http://example.com/a/~user?x=%2F");
/// ```
pub fn normalize_url(url: &Url, normalize_http: bool) -> Url {
    let mut result = Url {
        scheme: url.scheme.as_ref().map(|s| s.to_ascii_lowercase()),
        userinfo: url.userinfo.clone(),
        host: url.host.as_ref().map(|h| h.to_ascii_lowercase()),
        port: url.port,
        path: normalize_path(&normalize_percent_encoding(&url.path)),
        query: url.query.as_deref().map(normalize_percent_encoding),
        fragment: url.fragment.clone(),
    };

    if normalize_http {
        let default_port = match result.scheme.as_deref() {
            Some("http") => Some(80),
            Some("https") => Some(443),
            _ => None,
        };
        if default_port.is_some() && result.port == default_port {
            result.port = None;
        }
        if result.path.is_empty() {
            result.path.push('/');
        }
    }

    result
}

/// Percent-encodes every byte outside the unreserved set.
pub fn escape(data: impl AsRef<[u8]>) -> String {
    percent_encode(data.as_ref(), ESCAPE_SET).to_string()
}

/// Like [`escape`], but spaces become `+` (form encoding).
pub fn escape_plus(data: impl AsRef<[u8]>) -> String {
    data.as_ref()
        .split(|&c| c == b' ')
        .map(|part| percent_encode(part, ESCAPE_SET).to_string())
        .collect::<Vec<_>>()
        .join("+")
}

fn unescape_impl(data: &[u8], plus: bool) -> Option<Vec<u8>> {
    let mut result = Vec::with_capacity(data.len());
    let mut iter = data.iter().copied();

    while let Some(c) = iter.next() {
        match c {
            b'+' if plus => result.push(b' '),
            b'%' => {
                let high = hex_value(iter.next()?)?;
                let low = hex_value(iter.next()?)?;
                result.push(high * 16 + low);
            }
            _ => result.push(c),
        }
    }

    Some(result)
}

/// Decodes percent escapes. Fails on a truncated or non-hex escape.
pub fn unescape(data: impl AsRef<[u8]>) -> Option<Vec<u8>> {
    unescape_impl(data.as_ref(), false)
}

/// Like [`unescape`], but `+` decodes to a space.
pub fn unescape_plus(data: impl AsRef<[u8]>) -> Option<Vec<u8>> {
    unescape_impl(data.as_ref(), true)
}
