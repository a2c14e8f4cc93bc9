//! Character classes and small parsers from the RFC 7230 ABNF.
//!
//! The `parse_*` helpers take a `&mut &str` cursor. On success they advance
//! it past what they consumed; on failure they leave it untouched.

/// `tchar = "!" / "#" / "$" / "%" / "&" / "'" / "*" / "+" / "-" / "." /
/// "^" / "_" / "`" / "|" / "~" / DIGIT / ALPHA`
pub fn is_tchar(c: u8) -> bool {
    matches!(
        c,
        b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'.' | b'^' | b'_' | b'`' | b'|' | b'~'
    ) || is_digit(c)
        || is_alpha(c)
}

/// `qdtext = HTAB / SP / %x21 / %x23-5B / %x5D-7E / obs-text`
pub fn is_qdtext(c: u8) -> bool {
    matches!(c, b'\t' | b' ' | 0x21 | 0x23..=0x5B | 0x5D..=0x7E | 0x80..=0xFF)
}

/// Characters allowed after the backslash of a `quoted-pair`.
pub fn is_quoted_pair_char(c: u8) -> bool {
    matches!(c, b'\t' | b' ' | 0x21..=0x7E | 0x80..=0xFF)
}

/// `SP / HTAB`
pub fn is_whitespace(c: u8) -> bool {
    c == b' ' || c == b'\t'
}

pub fn is_alpha(c: u8) -> bool {
    c.is_ascii_alphabetic()
}

pub fn is_digit(c: u8) -> bool {
    c.is_ascii_digit()
}

/// Parses `token = 1*tchar`.
pub fn parse_token<'a>(input: &mut &'a str) -> Option<&'a str> {
    let len = input.bytes().take_while(|&c| is_tchar(c)).count();
    if len == 0 {
        return None;
    }
    let (token, rest) = input.split_at(len);
    *input = rest;
    Some(token)
}

/// Parses `quoted-string = DQUOTE *( qdtext / quoted-pair ) DQUOTE` and
/// returns the unquoted content.
pub fn parse_quoted_string(input: &mut &str) -> Option<String> {
    let bytes = input.as_bytes();
    if bytes.first() != Some(&b'"') {
        return None;
    }

    let mut value = Vec::new();
    let mut pos = 1;
    loop {
        match *bytes.get(pos)? {
            b'"' => {
                pos += 1;
                break;
            }
            b'\\' => {
                let escaped = *bytes.get(pos + 1)?;
                if !is_quoted_pair_char(escaped) {
                    return None;
                }
                value.push(escaped);
                pos += 2;
            }
            c if is_qdtext(c) => {
                value.push(c);
                pos += 1;
            }
            _ => return None,
        }
    }

    let value = String::from_utf8(value).ok()?;
    *input = &input[pos..];
    Some(value)
}

/// Skips `OWS = *( SP / HTAB )`.
pub fn skip_optional_whitespace(input: &mut &str) {
    *input = input.trim_start_matches([' ', '\t']);
}
