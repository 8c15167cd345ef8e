//! JSON Pointer (RFC 6901) helpers.
//!
//! A pointer is a sequence of reference tokens describing a path from the
//! root of a JSON document to one of its nodes. This crate implements the
//! token escaping rules, pointer string parsing/formatting, and value
//! lookup used by the patch builder and applier.
//!
//! # Example
//!
//! ```
//! use buildpatches_json_pointer::{parse_pointer, format_pointer, get};
//!
//! let path = parse_pointer("/foo/bar");
//! assert_eq!(path, vec!["foo".to_string(), "bar".to_string()]);
//! assert_eq!(format_pointer(&path), "/foo/bar");
//!
//! let doc = serde_json::json!({"foo": {"bar": 42}});
//! assert_eq!(get(&doc, &path), Some(&serde_json::json!(42)));
//! ```

use thiserror::Error;

mod get;
pub use get::{get, get_mut};

/// A reference token: an object key or the decimal text of an array index.
pub type Token = String;

/// A parsed pointer. The empty path refers to the document root.
pub type Path = Vec<Token>;

#[derive(Debug, Error, PartialEq)]
pub enum PointerError {
    #[error("pointer must be empty or start with '/'")]
    MissingLeadingSlash,
}

/// Unescape a single reference token.
///
/// Per RFC 6901, `~1` decodes to `/` and `~0` decodes to `~`.
///
/// ```
/// use buildpatches_json_pointer::unescape_token;
///
/// assert_eq!(unescape_token("a~0b"), "a~b");
/// assert_eq!(unescape_token("c~1d"), "c/d");
/// ```
pub fn unescape_token(token: &str) -> String {
    if !token.contains('~') {
        return token.to_string();
    }
    // Order matters: ~1 must be decoded before ~0
    token.replace("~1", "/").replace("~0", "~")
}

/// Escape a single reference token.
///
/// Per RFC 6901, `~` encodes as `~0` and `/` as `~1`.
///
/// ```
/// use buildpatches_json_pointer::escape_token;
///
/// assert_eq!(escape_token("a~b"), "a~0b");
/// assert_eq!(escape_token("c/d"), "c~1d");
/// assert_eq!(escape_token("plain"), "plain");
/// ```
pub fn escape_token(token: &str) -> String {
    if !token.contains('/') && !token.contains('~') {
        return token.to_string();
    }
    // Order matters: ~ must be encoded before /
    token.replace('~', "~0").replace('/', "~1")
}

/// Parse a pointer string into reference tokens.
///
/// The empty string is the root pointer and yields an empty path. Any
/// other pointer must begin with `/`.
///
/// ```
/// use buildpatches_json_pointer::parse_pointer;
///
/// assert_eq!(parse_pointer(""), Vec::<String>::new());
/// assert_eq!(parse_pointer("/"), vec![""]);
/// assert_eq!(parse_pointer("/a~0b/c~1d"), vec!["a~b", "c/d"]);
/// ```
pub fn parse_pointer(pointer: &str) -> Path {
    if pointer.is_empty() {
        return Vec::new();
    }
    pointer[1..].split('/').map(unescape_token).collect()
}

/// Parse a pointer string, rejecting malformed input.
///
/// Unlike [`parse_pointer`], a non-empty pointer without a leading `/` is
/// an error rather than being treated as a single token.
pub fn try_parse_pointer(pointer: &str) -> Result<Path, PointerError> {
    if !pointer.is_empty() && !pointer.starts_with('/') {
        return Err(PointerError::MissingLeadingSlash);
    }
    Ok(parse_pointer(pointer))
}

/// Format reference tokens back into a pointer string.
///
/// The root path formats as the empty string.
///
/// ```
/// use buildpatches_json_pointer::format_pointer;
///
/// assert_eq!(format_pointer(&[]), "");
/// assert_eq!(format_pointer(&["tags".into(), "2".into()]), "/tags/2");
/// ```
pub fn format_pointer(path: &[Token]) -> String {
    if path.is_empty() {
        return String::new();
    }
    let mut out = String::with_capacity(path.len() * 8);
    for token in path {
        out.push('/');
        out.push_str(&escape_token(token));
    }
    out
}

/// Check whether a token is a valid array index: decimal digits with no
/// leading zero (except `"0"` itself).
///
/// ```
/// use buildpatches_json_pointer::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("12"));
/// assert!(!is_valid_index("012"));
/// assert!(!is_valid_index("-1"));
/// assert!(!is_valid_index(""));
/// ```
pub fn is_valid_index(token: &str) -> bool {
    let bytes = token.as_bytes();
    if bytes.is_empty() {
        return false;
    }
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|b| b.is_ascii_digit())
}
