//! Case-insensitive multimap of header fields.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    name: String,
    values: Vec<String>,
}

/// Header fields of a message.
///
/// Names compare ASCII case-insensitively and keep the casing they were
/// first inserted with. Every name maps to one or more values in arrival
/// order; a name never maps to an empty list.
///
/// ```
/// use httpwire::http::Headers;
///
/// let mut headers = Headers::new();
/// headers.add_header("Accept", "text/html");
/// headers.add_header("accept", "text/plain");
/// headers.set_header("Host", ["example.com"]);
///
/// assert_eq!(headers.len(), 3);
/// assert_eq!(headers.get_header("HOST"), Some("example.com"));
/// assert_eq!(headers.get_header("Accept"), None);
/// assert_eq!(headers.get_header_values("ACCEPT").unwrap(), ["text/html", "text/plain"]);
/// assert_eq!(
///     headers.to_string(),
///     "Host: example.com\r\nAccept: text/html\r\nAccept: text/plain\r\n"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<Entry>,
    values_count: usize,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name.eq_ignore_ascii_case(name))
    }

    /// The value of `name` when exactly one value is stored for it.
    pub fn get_header(&self, name: &str) -> Option<&str> {
        match self.get_header_values(name)? {
            [value] => Some(value.as_str()),
            _ => None,
        }
    }

    /// Every value of `name`, in arrival order.
    pub fn get_header_values(&self, name: &str) -> Option<&[String]> {
        self.position(name).map(|i| self.entries[i].values.as_slice())
    }

    pub fn has(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Replaces all values of `name`. An empty `values` removes the header.
    pub fn set_header<I, V>(&mut self, name: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let name = name.into();
        let values: Vec<String> = values.into_iter().map(Into::into).collect();

        match self.position(&name) {
            Some(i) if values.is_empty() => {
                let removed = self.entries.remove(i);
                self.values_count -= removed.values.len();
            }
            Some(i) => {
                self.values_count = self.values_count - self.entries[i].values.len() + values.len();
                self.entries[i].values = values;
            }
            None if values.is_empty() => {}
            None => {
                self.values_count += values.len();
                self.entries.push(Entry { name, values });
            }
        }
    }

    /// Appends values to `name`. An empty `values` changes nothing.
    pub fn add_header_values<I, V>(&mut self, name: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let mut values = values.into_iter().map(Into::into).peekable();
        if values.peek().is_none() {
            return;
        }

        let name = name.into();
        let index = match self.position(&name) {
            Some(i) => i,
            None => {
                self.entries.push(Entry {
                    name,
                    values: Vec::new(),
                });
                self.entries.len() - 1
            }
        };

        let entry = &mut self.entries[index];
        let before = entry.values.len();
        entry.values.extend(values);
        self.values_count += entry.values.len() - before;
    }

    /// Appends a single value to `name`.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.add_header_values(name, [value.into()]);
    }

    /// Removes `name` and all its values.
    pub fn remove_header(&mut self, name: &str) {
        if let Some(i) = self.position(name) {
            let removed = self.entries.remove(i);
            self.values_count -= removed.values.len();
        }
    }

    /// Total number of values across all names.
    pub fn len(&self) -> usize {
        self.values_count
    }

    pub fn is_empty(&self) -> bool {
        self.values_count == 0
    }

    /// Iterates over names and their values in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|e| (e.name.as_str(), e.values.as_slice()))
    }
}

impl<N, V> FromIterator<(N, V)> for Headers
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.add_header(name, value);
        }
        headers
    }
}

/// Serializes as `Name: value\r\n` lines, `Host` first.
impl fmt::Display for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let is_host = |e: &&Entry| e.name.eq_ignore_ascii_case("host");
        let ordered = self.entries.iter().filter(is_host).chain(self.entries.iter().filter(|e| !is_host(e)));

        for entry in ordered {
            for value in &entry.values {
                write!(f, "{}: {}\r\n", entry.name, value)?;
            }
        }
        Ok(())
    }
}
