//! Lexical normalization of raw affiliation strings.
//!
//! Produces the form every cache key and canonical value is stored in:
//! lowercase, punctuation replaced by spaces, whitespace collapsed and trimmed.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"[^A-Za-z0-9_\s]").expect("valid pattern");
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("valid pattern");
}

/// Normalize a raw affiliation string.
///
/// - Converts to lowercase
/// - Replaces every character other than ASCII letters, digits, `_` and
///   whitespace with a space
/// - Collapses whitespace runs into a single space
/// - Trims
pub fn normalize(input: &str) -> String {
    let lowered = input.to_lowercase();
    let stripped = NON_WORD.replace_all(&lowered, " ");
    let collapsed = WHITESPACE.replace_all(&stripped, " ");
    collapsed.trim().to_string()
}

/// Null-tolerant variant used by callers holding an optional raw value.
pub fn normalize_optional(input: Option<&str>) -> String {
    input.map(normalize).unwrap_or_default()
}
