//! Comma separated token lists such as `Connection: keep-alive, Upgrade`.

use crate::parser::grammar::{parse_token, skip_optional_whitespace};

/// A single list element. Compares ASCII case-insensitively.
#[derive(Debug, Clone, Eq)]
pub struct Token {
    pub value: String,
}

impl Token {
    pub fn equals(&self, other: &str) -> bool {
        self.value.eq_ignore_ascii_case(other)
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.equals(&other.value)
    }
}

impl PartialEq<str> for Token {
    fn eq(&self, other: &str) -> bool {
        self.equals(other)
    }
}

impl PartialEq<&str> for Token {
    fn eq(&self, other: &&str) -> bool {
        self.equals(other)
    }
}

/// `#token`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenList {
    pub tokens: Vec<Token>,
}

impl TokenList {
    /// Checks for a token, ignoring ASCII case.
    pub fn has(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t.equals(token))
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Parses `*( "," OWS ) element *( OWS "," [ OWS element ] )`, appending
/// elements to `out`. Returns false on the first syntax error.
pub(crate) fn parse_list<T>(
    mut data: &str,
    out: &mut Vec<T>,
    element: impl Fn(&mut &str) -> Option<T>,
) -> bool {
    loop {
        match data.strip_prefix(',') {
            Some(rest) => {
                data = rest;
                skip_optional_whitespace(&mut data);
            }
            None if data.is_empty() => return false,
            None => break,
        }
    }

    match element(&mut data) {
        Some(value) => out.push(value),
        None => return false,
    }

    loop {
        skip_optional_whitespace(&mut data);
        if data.is_empty() {
            return true;
        }

        match data.strip_prefix(',') {
            Some(rest) => data = rest,
            None => return false,
        }
        skip_optional_whitespace(&mut data);

        if data.is_empty() || data.starts_with(',') {
            continue;
        }

        match element(&mut data) {
            Some(value) => out.push(value),
            None => return false,
        }
    }
}

fn token_element(data: &mut &str) -> Option<Token> {
    parse_token(data).map(|value| Token {
        value: value.to_string(),
    })
}

/// Parses a list from a single header value.
///
/// ```
/// use httpwire::parser::parse_token_list;
///
/// let list = parse_token_list(", keep-alive ,Upgrade").unwrap();
/// assert!(list.has("KEEP-ALIVE"));
/// assert!(list.has("upgrade"));
/// assert!(parse_token_list("a b").is_none());
/// ```
pub fn parse_token_list(data: &str) -> Option<TokenList> {
    let mut result = TokenList::default();
    parse_list(data, &mut result.tokens, token_element).then_some(result)
}

/// Parses and concatenates the lists of several header values. An empty
/// sequence is not a list.
pub fn parse_token_list_values<I, S>(values: I) -> Option<TokenList>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut values = values.into_iter().peekable();
    values.peek()?;

    let mut result = TokenList::default();
    for value in values {
        if !parse_list(value.as_ref(), &mut result.tokens, token_element) {
            return None;
        }
    }
    Some(result)
}
