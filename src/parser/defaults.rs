//! Default-value normalization.
//!
//! Classification order, first match wins:
//!
//! | Input                                   | Output             |
//! |-----------------------------------------|--------------------|
//! | `_utf8mb4'text'` (charset introducer)   | `'text'`           |
//! | unquoted, contains `NULL`               | `NULL`             |
//! | pure number `42`, `-1.5`                | `'42'`, `'-1.5'`   |
//! | `now()`, `current_timestamp [on ...]`   | uppercased         |
//! | `true` / `false`                        | `TRUE` / `FALSE`   |
//! | `'2024-01-31'`, bare datetime           | `'...'`            |
//! | `'text'`, `"text"`                      | `'text'`           |
//! | anything else                           | unchanged          |

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use super::tokens::{tokenize, Token};

static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?\d+(\.\d+)?$").unwrap());

static TIMESTAMP_FN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(CURRENT_TIMESTAMP(\(\d*\))?|NOW\(\))( ON (UPDATE|INSERT) (CURRENT_TIMESTAMP(\(\d*\))?|NOW\(\)))?$",
    )
    .unwrap()
});

static INTRODUCER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)^_[a-z0-9]+('.*)$").unwrap());

/// Normalize a raw default token. Empty input yields `None`.
pub fn normalize_default(raw: &str) -> Option<String> {
    let token = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if token.is_empty() {
        return None;
    }
    if let Some(literal) = INTRODUCER.captures(raw.trim()).and_then(|c| c.get(1)) {
        return normalize_default(literal.as_str());
    }
    let quoted = token.starts_with('\'') || token.starts_with('"');

    if !quoted && token.to_uppercase().contains("NULL") {
        return Some("NULL".to_string());
    }
    if NUMBER.is_match(&token) {
        return Some(format!("'{}'", token));
    }
    if TIMESTAMP_FN.is_match(&token) {
        return Some(token.to_uppercase());
    }
    if token.eq_ignore_ascii_case("true") || token.eq_ignore_ascii_case("false") {
        return Some(token.to_uppercase());
    }
    if !quoted && is_datetime(&token) {
        return Some(format!("'{}'", token));
    }
    if let Some(text) = whole_literal(raw.trim()) {
        return Some(quote_literal(&text));
    }

    Some(token)
}

/// Render `text` as a single-quoted SQL literal.
pub fn quote_literal(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

/// The unescaped text of `raw` when it is exactly one quoted literal.
fn whole_literal(raw: &str) -> Option<String> {
    let mut tokens = tokenize(raw);
    if tokens.len() != 1 {
        return None;
    }
    let spanned = tokens.remove(0);
    match spanned.token {
        Token::Quoted { value, .. } if spanned.start == 0 && spanned.end == raw.len() => {
            Some(value)
        }
        _ => None,
    }
}

/// `YYYY-MM-DD`
pub(crate) fn is_date(text: &str) -> bool {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok()
}

fn is_datetime(text: &str) -> bool {
    is_date(text) || NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_forms() {
        assert_eq!(normalize_default("NULL").as_deref(), Some("NULL"));
        assert_eq!(normalize_default("null").as_deref(), Some("NULL"));
        assert_eq!(
            normalize_default("NULL::character varying").as_deref(),
            Some("NULL")
        );
        // A quoted literal mentioning null is still text
        assert_eq!(normalize_default("'nullable'").as_deref(), Some("'nullable'"));
    }

    #[test]
    fn test_numbers_are_quoted() {
        assert_eq!(normalize_default("0").as_deref(), Some("'0'"));
        assert_eq!(normalize_default("-1.50").as_deref(), Some("'-1.50'"));
    }

    #[test]
    fn test_timestamp_functions_uppercased() {
        assert_eq!(normalize_default("now()").as_deref(), Some("NOW()"));
        assert_eq!(
            normalize_default("current_timestamp").as_deref(),
            Some("CURRENT_TIMESTAMP")
        );
        assert_eq!(
            normalize_default("current_timestamp  on update current_timestamp").as_deref(),
            Some("CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP")
        );
        assert_eq!(
            normalize_default("CURRENT_TIMESTAMP ON INSERT CURRENT_TIMESTAMP").as_deref(),
            Some("CURRENT_TIMESTAMP ON INSERT CURRENT_TIMESTAMP")
        );
    }

    #[test]
    fn test_booleans() {
        assert_eq!(normalize_default("true").as_deref(), Some("TRUE"));
        assert_eq!(normalize_default("False").as_deref(), Some("FALSE"));
    }

    #[test]
    fn test_dates() {
        assert_eq!(normalize_default("'2024-01-31'").as_deref(), Some("'2024-01-31'"));
        assert_eq!(
            normalize_default("2024-01-31 10:20:30").as_deref(),
            Some("'2024-01-31 10:20:30'")
        );
        assert_eq!(
            normalize_default("2024-01-31 10:20:30.123456").as_deref(),
            Some("'2024-01-31 10:20:30.123456'")
        );
    }

    #[test]
    fn test_literals_requoted() {
        assert_eq!(normalize_default("\"active\"").as_deref(), Some("'active'"));
        assert_eq!(normalize_default("'it''s'").as_deref(), Some("'it''s'"));
        assert_eq!(
            normalize_default("'default comment'").as_deref(),
            Some("'default comment'")
        );
    }

    #[test]
    fn test_prefixed_literals() {
        assert_eq!(normalize_default("_utf8mb4'draft'").as_deref(), Some("'draft'"));
        assert_eq!(normalize_default("b'0'").as_deref(), Some("b'0'"));
        assert_eq!(normalize_default("x'ff'").as_deref(), Some("x'ff'"));
    }

    #[test]
    fn test_pass_through_and_empty() {
        assert_eq!(normalize_default("'x'::text").as_deref(), Some("'x'::text"));
        assert_eq!(normalize_default("uuid_generate_v4()").as_deref(), Some("uuid_generate_v4()"));
        assert_eq!(normalize_default(""), None);
        assert_eq!(normalize_default("   "), None);
    }
}
