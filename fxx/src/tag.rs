//! Parsing and rendering of `key:"value"` tag strings.
//!
//! Tags are space-separated pairs whose values are double-quoted, with `\"`
//! and `\\` escapes inside the quotes. Both slot annotations
//! (`name:"ro" optional:"true"`) and config field selectors (`json:"mysql"`)
//! use this syntax.

use std::fmt;

use thiserror::Error;

/// Failure to parse a tag string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TagParseError {
    /// A key was not followed by `:"`.
    #[error("tag key `{key}` must be followed by a quoted value")]
    MissingValue {
        /// Key that lacks a value.
        key: String,
    },
    /// A quoted value never closed.
    #[error("unterminated value for tag key `{key}`")]
    Unterminated {
        /// Key whose value is unterminated.
        key: String,
    },
    /// A key appeared that the consumer does not understand.
    #[error("unknown tag key `{key}`")]
    UnknownKey {
        /// Offending key.
        key: String,
    },
    /// The tag does not select anything.
    #[error("tag must contain exactly one of `name` or `group`")]
    MissingSelector,
    /// A boolean flag carried something other than `true` or `false`.
    #[error("tag key `{key}` expects \"true\" or \"false\", got \"{value}\"")]
    InvalidFlag {
        /// Flag key.
        key: String,
        /// Value supplied.
        value: String,
    },
}

/// Split `tag` into ordered `(key, value)` pairs.
pub(crate) fn parse_pairs(tag: &str) -> Result<Vec<(String, String)>, TagParseError> {
    let mut pairs = Vec::new();
    let mut chars = tag.chars().peekable();
    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        if chars.peek().is_none() {
            return Ok(pairs);
        }
        let mut key = String::new();
        while let Some(c) = chars.next_if(|c| *c != ':' && *c != '"' && !c.is_whitespace()) {
            key.push(c);
        }
        if chars.next_if_eq(&':').is_none() || chars.next_if_eq(&'"').is_none() {
            return Err(TagParseError::MissingValue { key });
        }
        let mut value = String::new();
        let mut closed = false;
        while let Some(c) = chars.next() {
            match c {
                '"' => {
                    closed = true;
                    break;
                }
                '\\' => match chars.next() {
                    Some(escaped) => value.push(escaped),
                    None => break,
                },
                other => value.push(other),
            }
        }
        if !closed {
            return Err(TagParseError::Unterminated { key });
        }
        pairs.push((key, value));
    }
}

/// Returns `true` when `tag` looks like `key:"value"` pairs rather than a bare path.
pub(crate) fn is_pair_syntax(tag: &str) -> bool {
    tag.contains(":\"")
}

/// Write `key:"value"`, escaping quotes and backslashes in `value`.
pub(crate) fn write_pair(f: &mut fmt::Formatter<'_>, key: &str, value: &str) -> fmt::Result {
    write!(f, "{key}:\"")?;
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            f.write_str("\\")?;
        }
        write!(f, "{c}")?;
    }
    f.write_str("\"")
}
