//! Numeric-token extraction from rendered element text.
//!
//! Prices, ratings and review counts are rendered with currency symbols,
//! stars and words around them (`"$12.50"`, `"4.7 ★"`, `"128 reviews"`).
//! Only the first number is kept, as text.

use std::sync::LazyLock;

use regex::Regex;

static NUMERIC_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+(\.[0-9]+)?").expect("valid numeric token regex"));

/// Returns the first leftmost `\d+(\.\d+)?` match in `text`.
///
/// Digits are ASCII only. A trailing dot without digits is not part of the
/// token (`"5."` -> `"5"`), and thousands separators end it (`"1,299"` -> `"1"`).
#[must_use]
pub fn first_numeric_token(text: &str) -> Option<&str> {
    NUMERIC_TOKEN.find(text).map(|m| m.as_str())
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
