//! CPF (Brazilian taxpayer number) normalization.
//!
//! The number is treated as an opaque digit string; check digits are not
//! verified.

/// Upper bound on the raw (possibly punctuated) input, in characters.
pub const MAX_LEN: usize = 20;

/// Strip every non-digit character, preserving the order of the digits.
///
/// Total: empty or digit-free input yields an empty string.
pub fn normalize(raw: &str) -> String {
  raw.chars().filter(char::is_ascii_digit).collect()
}

/// Whether `raw` contains only digits, `.`, `-`, `/` and ASCII whitespace
/// (space, tab, line feed, vertical tab, form feed, carriage return).
pub fn is_acceptable_raw(raw: &str) -> bool {
  raw.chars().all(|c| {
    c.is_ascii_digit() || matches!(c, '.' | '-' | '/' | ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r')
  })
}
