//! Form-urlencoded query strings.

use std::fmt;

use crate::http::url::escape_plus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParameter {
    pub name: String,
    pub value: String,
}

/// Decoded query parameters in their original order. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub parameters: Vec<QueryParameter>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.parameters.push(QueryParameter {
            name: name.into(),
            value: value.into(),
        });
    }

    /// Value of the first parameter named `name`. Names are case-sensitive.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }

    /// Values of every parameter named `name`, in order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.parameters
            .iter()
            .filter(move |p| p.name == name)
            .map(|p| p.value.as_str())
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Query {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut query = Query::new();
        for (name, value) in iter {
            query.push(name, value);
        }
        query
    }
}

/// Serializes as `name=value` pairs joined by `&`, form-encoded.
impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, parameter) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{}={}", escape_plus(&parameter.name), escape_plus(&parameter.value))?;
        }
        Ok(())
    }
}

/// Builds a query string from its parameters.
///
/// ```
/// use httpwire::http::{build_query, Query};
///
/// let query: Query = [("q", "rust lang"), ("page", "2/3")].into_iter().collect();
/// assert_eq!(build_query(&query), "q=rust+lang&page=2%2F3");
/// ```
pub fn build_query(query: &Query) -> String {
    query.to_string()
}
