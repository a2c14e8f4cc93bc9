//! Reader configuration.

use serde::{Deserialize, Serialize};

use crate::parser::ParseOptions;

/// Options for head and body readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadOptions {
    /// Limits applied to heads and chunked trailers.
    pub parsing: ParseOptions,
    /// How many bytes to ask the transport for at a time.
    pub read_buffer_size: usize,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            parsing: ParseOptions::default(),
            read_buffer_size: 4096,
        }
    }
}

impl ReadOptions {
    /// Loads options from a JSON document.
    ///
    /// ```
    /// use httpwire::reader::ReadOptions;
    ///
    /// let options = ReadOptions::from_json(r#"{"read_buffer_size": 512, "parsing": {"max_url_size": 1024}}"#).unwrap();
    /// assert_eq!(options.read_buffer_size, 512);
    /// assert_eq!(options.parsing.max_url_size, 1024);
    /// assert_eq!(options.parsing.max_headers_number, 256);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
