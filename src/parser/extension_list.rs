//! Lists of tokens with `;name=value` parameters, as used by
//! `Transfer-Encoding` and chunk extensions.

use crate::parser::grammar::{parse_quoted_string, parse_token, skip_optional_whitespace};
use crate::parser::token_list::parse_list;

/// `token BWS "=" BWS ( token / quoted-string )`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionParameter {
    pub name: String,
    pub value: String,
}

/// `token *( OWS ";" OWS extension-parameter )`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    pub name: String,
    pub parameters: Vec<ExtensionParameter>,
}

impl Extension {
    /// Compares the extension name, ignoring ASCII case.
    pub fn equals(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// First parameter with the given name, ignoring ASCII case.
    pub fn parameter(&self, name: &str) -> Option<&ExtensionParameter> {
        self.parameters.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameter(name).is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionList {
    pub extensions: Vec<Extension>,
}

impl ExtensionList {
    pub fn get(&self, name: &str) -> Option<&Extension> {
        self.extensions.iter().find(|e| e.equals(name))
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

fn parse_parameter(data: &mut &str) -> Option<ExtensionParameter> {
    let mut rest = *data;

    let name = parse_token(&mut rest)?.to_string();
    skip_optional_whitespace(&mut rest);
    rest = rest.strip_prefix('=')?;
    skip_optional_whitespace(&mut rest);

    let value = if rest.starts_with('"') {
        parse_quoted_string(&mut rest)?
    } else {
        parse_token(&mut rest)?.to_string()
    };

    *data = rest;
    Some(ExtensionParameter { name, value })
}

fn parse_extension(data: &mut &str) -> Option<Extension> {
    let mut rest = *data;

    let mut extension = Extension {
        name: parse_token(&mut rest)?.to_string(),
        parameters: Vec::new(),
    };

    loop {
        let mut lookahead = rest;
        skip_optional_whitespace(&mut lookahead);
        let Some(after_semicolon) = lookahead.strip_prefix(';') else {
            *data = rest;
            return Some(extension);
        };

        rest = after_semicolon;
        skip_optional_whitespace(&mut rest);
        extension.parameters.push(parse_parameter(&mut rest)?);
    }
}

/// Parses an extension list from a single header value.
///
/// ```
/// use httpwire::parser::parse_extension_list;
///
/// let list = parse_extension_list(r#"gzip, chunked; q = "a\"b""#).unwrap();
/// assert_eq!(list.len(), 2);
/// let chunked = list.get("CHUNKED").unwrap();
/// assert_eq!(chunked.parameter("q").unwrap().value, "a\"b");
/// ```
pub fn parse_extension_list(data: &str) -> Option<ExtensionList> {
    let mut result = ExtensionList::default();
    parse_list(data, &mut result.extensions, parse_extension).then_some(result)
}

/// Parses and concatenates the lists of several header values. An empty
/// sequence is not a list.
pub fn parse_extension_list_values<I, S>(values: I) -> Option<ExtensionList>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut values = values.into_iter().peekable();
    values.peek()?;

    let mut result = ExtensionList::default();
    for value in values {
        if !parse_list(value.as_ref(), &mut result.extensions, parse_extension) {
            return None;
        }
    }
    Some(result)
}
