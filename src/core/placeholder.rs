//! Brace-delimited named placeholders
//!
//! Statement templates name their parameters as `{name}`. Wrapping names in a
//! delimiter pair means `{id}` and `{identifier}` can never be confused, and
//! placeholders never clash with positional `?` markers.
//!
//! The scanner skips quoted literals and comments with a small state machine,
//! so `'{id}'` inside a string literal is left alone.

use std::borrow::Cow;

/// Wrap a parameter name in the placeholder delimiters
pub fn placeholder(name: &str) -> String {
    format!("{{{name}}}")
}

/// Strip the delimiters from a placeholder, if it is one
pub fn parameter_name(placeholder: &str) -> Option<&str> {
    placeholder
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .filter(|name| is_identifier(name))
}

/// A placeholder occurrence in a statement template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder<'a> {
    pub name: &'a str,
    /// Byte offset of the opening brace
    pub start: usize,
    /// Byte offset one past the closing brace
    pub end: usize,
}

/// A driver-native parameter marker (`?`, `?3`, `:id`, `@id`, `$id`) written
/// directly into a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeMarker<'a> {
    pub text: &'a str,
    /// Byte offset of the marker's first character
    pub start: usize,
}

enum Token<'a> {
    Placeholder(Placeholder<'a>),
    Marker(NativeMarker<'a>),
}

#[derive(Clone, Copy)]
enum State {
    Normal,
    Quoted(u8),
    LineComment,
    BlockComment,
}

fn tokens(sql: &str) -> Vec<Token<'_>> {
    let bytes = sql.as_bytes();
    let mut found = Vec::new();
    let mut state = State::Normal;
    let mut idx = 0;

    while idx < bytes.len() {
        let b = bytes[idx];
        match state {
            State::Normal => match b {
                b'\'' | b'"' | b'`' => state = State::Quoted(b),
                b'-' if bytes.get(idx + 1) == Some(&b'-') => state = State::LineComment,
                b'/' if bytes.get(idx + 1) == Some(&b'*') => {
                    state = State::BlockComment;
                    idx += 1;
                }
                b'{' => {
                    if let Some(end) = identifier_end(bytes, idx + 1) {
                        if bytes.get(end) == Some(&b'}') {
                            found.push(Token::Placeholder(Placeholder {
                                name: &sql[idx + 1..end],
                                start: idx,
                                end: end + 1,
                            }));
                            idx = end;
                        }
                    }
                }
                b'?' => {
                    let mut end = idx + 1;
                    while end < bytes.len() && bytes[end].is_ascii_digit() {
                        end += 1;
                    }
                    found.push(Token::Marker(NativeMarker {
                        text: &sql[idx..end],
                        start: idx,
                    }));
                    idx = end - 1;
                }
                b':' | b'@' | b'$' if idx == 0 || !is_identifier_byte(bytes[idx - 1]) => {
                    if let Some(end) = identifier_end(bytes, idx + 1) {
                        found.push(Token::Marker(NativeMarker {
                            text: &sql[idx..end],
                            start: idx,
                        }));
                        idx = end - 1;
                    }
                }
                _ => {}
            },
            State::Quoted(quote) => {
                if b == quote {
                    if bytes.get(idx + 1) == Some(&quote) {
                        idx += 1; // doubled quote is an escape
                    } else {
                        state = State::Normal;
                    }
                }
            }
            State::LineComment => {
                if b == b'\n' {
                    state = State::Normal;
                }
            }
            State::BlockComment => {
                if b == b'*' && bytes.get(idx + 1) == Some(&b'/') {
                    state = State::Normal;
                    idx += 1;
                }
            }
        }
        idx += 1;
    }

    found
}

/// Find every placeholder occurrence, in order of appearance
pub fn scan(sql: &str) -> Vec<Placeholder<'_>> {
    tokens(sql)
        .into_iter()
        .filter_map(|token| match token {
            Token::Placeholder(p) => Some(p),
            Token::Marker(_) => None,
        })
        .collect()
}

/// Find native parameter markers outside literals and comments.
///
/// A template that mixes these with `{name}` placeholders cannot be
/// numbered safely, so drivers refuse it.
pub fn native_markers(sql: &str) -> Vec<NativeMarker<'_>> {
    tokens(sql)
        .into_iter()
        .filter_map(|token| match token {
            Token::Marker(m) => Some(m),
            Token::Placeholder(_) => None,
        })
        .collect()
}

/// Distinct placeholder names, in order of first appearance
pub fn names(sql: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for found in scan(sql) {
        if !names.iter().any(|n| n == found.name) {
            names.push(found.name.to_string());
        }
    }
    names
}

/// Rewrite `{name}` placeholders as numbered markers (`?1`, `?2`, ... for
/// `marker = '?'`).
///
/// Returns the rewritten text together with the distinct names in marker
/// order: the name at index `i` binds to marker `i + 1`, and a name used
/// several times reuses its marker. The text is borrowed when the template
/// has no placeholders.
pub fn to_numbered(sql: &str, marker: char) -> (Cow<'_, str>, Vec<String>) {
    let found = scan(sql);
    if found.is_empty() {
        return (Cow::Borrowed(sql), Vec::new());
    }

    let mut names: Vec<String> = Vec::new();
    let mut out = String::with_capacity(sql.len());
    let mut last = 0;
    for p in found {
        let ordinal = match names.iter().position(|n| n == p.name) {
            Some(pos) => pos + 1,
            None => {
                names.push(p.name.to_string());
                names.len()
            }
        };
        out.push_str(&sql[last..p.start]);
        out.push(marker);
        out.push_str(&ordinal.to_string());
        // `{a}1` must not become `?11`
        if sql.as_bytes().get(p.end).is_some_and(u8::is_ascii_digit) {
            out.push(' ');
        }
        last = p.end;
    }
    out.push_str(&sql[last..]);
    (Cow::Owned(out), names)
}

fn identifier_end(bytes: &[u8], start: usize) -> Option<usize> {
    match bytes.get(start) {
        Some(b) if b.is_ascii_alphabetic() || *b == b'_' => {}
        _ => return None,
    }
    let mut idx = start + 1;
    while idx < bytes.len() && is_identifier_byte(bytes[idx]) {
        idx += 1;
    }
    Some(idx)
}

fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_identifier(name: &str) -> bool {
    identifier_end(name.as_bytes(), 0) == Some(name.len())
}
