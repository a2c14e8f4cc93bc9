//! URL and query string parsers.

use crate::http::{unescape_plus, Query, Url};

fn is_scheme(data: &str) -> bool {
    let mut bytes = data.bytes();
    bytes.next().is_some_and(|c| c.is_ascii_alphabetic())
        && bytes.all(|c| c.is_ascii_alphanumeric() || matches!(c, b'+' | b'-' | b'.'))
}

fn is_http_scheme(scheme: Option<&str>) -> bool {
    scheme.is_some_and(|s| s.eq_ignore_ascii_case("http") || s.eq_ignore_ascii_case("https"))
}

/// Characters allowed in a registered name or inside IP literal brackets.
fn is_host_char(c: u8) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            b'-' | b'.' | b'_' | b'~' | b'%' | b'!' | b'$' | b'&' | b'\'' | b'(' | b')' | b'*' | b'+' | b',' | b';' | b'='
        )
        || c >= 0x80
}

/// Splits `host[:port]` and validates both parts.
fn parse_host_port(data: &str) -> Option<(String, Option<u16>)> {
    let (host, port) = if let Some(literal) = data.strip_prefix('[') {
        let end = literal.find(']')?;
        let host = &literal[..end];
        let is_literal_char = |c: u8| c.is_ascii_alphanumeric() || matches!(c, b':' | b'.' | b'%' | b'-' | b'_' | b'~');
        if !host.contains(':') || !host.bytes().all(is_literal_char) {
            return None;
        }
        let rest = &literal[end + 1..];
        let port = if rest.is_empty() { None } else { Some(rest.strip_prefix(':')?) };
        (host, port)
    } else {
        let (host, port) = match data.split_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (data, None),
        };
        if !host.bytes().all(is_host_char) {
            return None;
        }
        (host, port)
    };

    let port = match port {
        None | Some("") => None,
        Some(digits) if digits.bytes().all(|c| c.is_ascii_digit()) => Some(digits.parse::<u16>().ok()?),
        Some(_) => return None,
    };

    Some((host.to_string(), port))
}

/// Splits a URL into its components.
///
/// Both absolute URLs and relative references are accepted. Fails on empty
/// input, whitespace or control characters, userinfo in `http`/`https` URLs,
/// an empty `http`/`https` host and ports that are not a 16-bit number.
///
/// ```
/// use httpwire::parser::parse_url;
///
/// let url = parse_url("https://example.com:8443/a/b?x=1#top").unwrap();
/// assert_eq!(url.scheme.as_deref(), Some("https"));
/// assert_eq!(url.host.as_deref(), Some("example.com"));
/// assert_eq!(url.port, Some(8443));
/// assert_eq!(url.path, "/a/b");
/// assert_eq!(url.query.as_deref(), Some("x=1"));
/// assert_eq!(url.fragment.as_deref(), Some("top"));
///
/// assert!(parse_url("http://user@example.com/").is_none());
/// assert!(parse_url("http://example.com:65536/").is_none());
/// ```
pub fn parse_url(data: &str) -> Option<Url> {
    if data.is_empty() || data.bytes().any(|c| c <= b' ' || c == 0x7F) {
        return None;
    }

    let mut url = Url::default();
    let mut rest = data;

    if let Some(end) = rest.find([':', '/', '?', '#']) {
        if rest.as_bytes()[end] == b':' {
            let scheme = &rest[..end];
            if !is_scheme(scheme) {
                return None;
            }
            url.scheme = Some(scheme.to_string());
            rest = &rest[end + 1..];
        }
    }

    if let Some(after_slashes) = rest.strip_prefix("//") {
        let end = after_slashes.find(['/', '?', '#']).unwrap_or(after_slashes.len());
        let authority = &after_slashes[..end];
        rest = &after_slashes[end..];

        let host_port = match authority.split_once('@') {
            Some((userinfo, host_port)) => {
                if is_http_scheme(url.scheme.as_deref()) || host_port.contains('@') {
                    return None;
                }
                url.userinfo = Some(userinfo.to_string());
                host_port
            }
            None => authority,
        };

        let (host, port) = parse_host_port(host_port)?;
        if host.is_empty() && is_http_scheme(url.scheme.as_deref()) {
            return None;
        }
        url.host = Some(host);
        url.port = port;
    } else if is_http_scheme(url.scheme.as_deref()) {
        return None;
    }

    if let Some(hash) = rest.find('#') {
        url.fragment = Some(rest[hash + 1..].to_string());
        rest = &rest[..hash];
    }
    if let Some(question) = rest.find('?') {
        url.query = Some(rest[question + 1..].to_string());
        rest = &rest[..question];
    }
    url.path = rest.to_string();

    Some(url)
}

fn decode_component(data: &str) -> Option<String> {
    String::from_utf8(unescape_plus(data)?).ok()
}

/// Parses a form-urlencoded query string.
///
/// Parameters are separated by `&` or `;` and split at the first `=`. Names
/// and values are `+`/percent-decoded; any malformed escape, or a result
/// that is not UTF-8, fails the whole parse.
///
/// ```
/// use httpwire::parser::parse_query;
///
/// let query = parse_query("a=1;b=x+y&a=%32").unwrap();
/// assert_eq!(query.get("b"), Some("x y"));
/// assert_eq!(query.get_all("a").collect::<Vec<_>>(), ["1", "2"]);
/// assert!(parse_query("a=%4").is_none());
/// ```
pub fn parse_query(data: &str) -> Option<Query> {
    let mut query = Query::new();
    let mut rest = data;

    while !rest.is_empty() {
        let (parameter, remaining) = match rest.find(['&', ';']) {
            Some(end) => (&rest[..end], &rest[end + 1..]),
            None => (rest, ""),
        };
        rest = remaining;

        let (name, value) = parameter.split_once('=').unwrap_or((parameter, ""));
        query.push(decode_component(name)?, decode_component(value)?);
    }

    Some(query)
}
