//! Limits applied while parsing.

use serde::{Deserialize, Serialize};

/// Size and count limits for head parsers and chunked trailers.
///
/// Missing fields take their default when deserialized:
///
/// ```
/// use httpwire::parser::ParseOptions;
///
/// let options = ParseOptions::from_json(r#"{ "max_headers_number": 16 }"#).unwrap();
/// assert_eq!(options.max_headers_number, 16);
/// assert_eq!(options.max_url_size, 8192);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Maximum request target length in bytes.
    pub max_url_size: usize,
    /// Maximum reason phrase length in bytes.
    pub max_reason_size: usize,
    /// Maximum length of one header, name and value together.
    pub max_header_size: usize,
    /// Maximum number of header values.
    pub max_headers_number: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_url_size: 8192,
            max_reason_size: 8192,
            max_header_size: 8192,
            max_headers_number: 256,
        }
    }
}

impl ParseOptions {
    /// Loads options from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
