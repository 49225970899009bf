//! Column-definition grammar.
//!
//! ```text
//! column     := name type ('(' length ')')? clause*
//! clause     := NOT NULL | NULL | PRIMARY KEY | UNIQUE [KEY]
//!             | AUTO_INCREMENT | AUTOINCREMENT | IDENTITY | GENERATED ... AS IDENTITY
//!             | DEFAULT value | COMMENT 'text' | UNSIGNED | SIGNED | ZEROFILL
//!             | COLLATE name | CHARACTER SET name | CHARSET name
//!             | ON UPDATE value | REFERENCES ... | CHECK (...) | CONSTRAINT name
//! constraint := [CONSTRAINT name] (PRIMARY | UNIQUE) KEY [name] '(' cols ')'
//! ```
//!
//! Clauses are independent and may appear in any order. The first
//! `DEFAULT` and the first `COMMENT` of a column win.

use tracing::debug;

use super::defaults::normalize_default;
use super::tokens::{Spanned, Token};
use crate::ast::{ColumnDef, SqlType};
use crate::error::{ShiftError, ShiftResult};

/// Outcome of parsing one comma-separated fragment of a table body.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Column(ParsedColumn),
    /// Table-level `PRIMARY KEY (cols)`.
    PrimaryKey(Vec<String>),
    /// `UNIQUE KEY name (cols)`.
    UniqueKey(Vec<String>),
    /// Constraint or index line with no effect on the model.
    Ignored,
}

/// A column plus whether it carried an inline `PRIMARY KEY`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedColumn {
    pub column: ColumnDef,
    pub inline_primary: bool,
}

const CONSTRAINT_KEYWORDS: &[&str] = &[
    "CONSTRAINT", "PRIMARY", "UNIQUE", "KEY", "INDEX", "FOREIGN", "CHECK", "FULLTEXT",
    "SPATIAL", "EXCLUDE", "LIKE",
];

/// Words that start a clause and therefore cannot be a bare default value.
const CLAUSE_KEYWORDS: &[&str] = &[
    "NOT", "PRIMARY", "UNIQUE", "KEY", "AUTO_INCREMENT", "AUTOINCREMENT", "IDENTITY",
    "GENERATED", "DEFAULT", "COMMENT", "UNSIGNED", "SIGNED", "ZEROFILL", "COLLATE",
    "CHARSET", "REFERENCES", "CHECK", "CONSTRAINT",
];

/// Parse one fragment. `source` is the statement text the spans refer to.
///
/// Non-fatal problems (bad `DEFAULT`, empty `ENUM`) are pushed to
/// `diagnostics`; an unknown type excludes the fragment with an error.
pub fn parse_fragment(
    source: &str,
    tokens: &[Spanned],
    diagnostics: &mut Vec<ShiftError>,
) -> ShiftResult<Fragment> {
    let Some(first) = tokens.first() else {
        return Ok(Fragment::Ignored);
    };
    let Some(name) = first.token.ident() else {
        return Ok(Fragment::Ignored);
    };

    if is_named_index(source, tokens) {
        return Ok(parse_constraint(tokens));
    }

    if let Some((type_name, end)) = parse_type_name(tokens, 1) {
        if SqlType::is_recognized(&type_name) {
            return parse_column(source, tokens, name, type_name, end, diagnostics)
                .map(Fragment::Column);
        }
    }

    let is_constraint = matches!(&first.token, Token::Word(w)
        if CONSTRAINT_KEYWORDS.iter().any(|k| w.eq_ignore_ascii_case(k)));
    if is_constraint {
        return Ok(parse_constraint(tokens));
    }

    let type_name = tokens
        .get(1)
        .and_then(|t| t.token.word())
        .unwrap_or_default();
    Err(ShiftError::unrecognized(name, type_name))
}

/// `KEY name (cols)` or `CONSTRAINT name PRIMARY KEY (...)` where the
/// name doubles as a type keyword (`KEY uuid (uuid)`).
///
/// A column called `key` has its type where the index name would be, and
/// a parenthesized qualifier after it holds numbers or literals, never a
/// column name.
fn is_named_index(source: &str, tokens: &[Spanned]) -> bool {
    let Token::Word(word) = &tokens[0].token else {
        return false;
    };
    if source[tokens[0].start..].starts_with('`') {
        return false;
    }
    let token_at = |i: usize| tokens.get(i).map(|t| &t.token);

    if word.eq_ignore_ascii_case("CONSTRAINT") {
        return matches!(token_at(2), Some(Token::Word(w))
            if CONSTRAINT_KEYWORDS.iter().any(|k| w.eq_ignore_ascii_case(k)));
    }
    let index_keyword = ["KEY", "INDEX", "FULLTEXT", "SPATIAL"]
        .iter()
        .any(|k| word.eq_ignore_ascii_case(k));
    index_keyword
        && token_at(1).is_some_and(|t| t.ident().is_some())
        && token_at(2) == Some(&Token::LParen)
        && matches!(token_at(3), Some(Token::Word(_)))
}

/// Read the type keyword at `start`, folding multi-word names.
fn parse_type_name(tokens: &[Spanned], start: usize) -> Option<(String, usize)> {
    let word = tokens.get(start)?.token.word()?;
    let next_is = |offset: usize, kw: &str| {
        tokens
            .get(start + offset)
            .is_some_and(|t| t.token.is_word(kw))
    };

    if word.eq_ignore_ascii_case("double") && next_is(1, "precision") {
        let second = tokens[start + 1].token.word().unwrap_or_default();
        return Some((format!("{} {}", word, second), start + 2));
    }
    if word.eq_ignore_ascii_case("character") && next_is(1, "varying") {
        let second = tokens[start + 1].token.word().unwrap_or_default();
        return Some((format!("{} {}", word, second), start + 2));
    }
    Some((word.to_string(), start + 1))
}

/// Consume `WITH|WITHOUT TIME ZONE` at `start`, returning `(with_zone, next)`.
fn zone_suffix(tokens: &[Spanned], start: usize) -> Option<(bool, usize)> {
    let with_zone = match tokens.get(start) {
        Some(t) if t.token.is_word("with") => true,
        Some(t) if t.token.is_word("without") => false,
        _ => return None,
    };
    let time = tokens.get(start + 1)?.token.is_word("time");
    let zone = tokens.get(start + 2)?.token.is_word("zone");
    (time && zone).then_some((with_zone, start + 3))
}

fn parse_column(
    source: &str,
    tokens: &[Spanned],
    name: &str,
    mut type_name: String,
    mut i: usize,
    diagnostics: &mut Vec<ShiftError>,
) -> ShiftResult<ParsedColumn> {
    let mut column = ColumnDef::new(name, type_name.clone());
    let mut inline_primary = false;

    if matches!(tokens.get(i).map(|t| &t.token), Some(Token::LParen)) {
        let close = group_end(tokens, i);
        let inner_end = tokens.get(close).map_or(source.len(), |t| {
            if t.token == Token::RParen { t.start } else { t.end }
        });
        column.length = source[tokens[i].end..inner_end].trim().to_string();
        i = close + 1;
    }

    let lower = type_name.to_lowercase();
    if lower == "time" || lower == "timestamp" {
        if let Some((with_zone, next)) = zone_suffix(tokens, i) {
            type_name = if with_zone {
                format!("{} with time zone", type_name)
            } else {
                format!("{} without time zone", type_name)
            };
            column.type_name = type_name.clone();
            i = next;
        }
    }

    if SqlType::is_enumeration_keyword(&type_name) {
        let values = super::tokens::string_literals(&column.length);
        if values.is_empty() {
            diagnostics.push(ShiftError::MalformedEnum {
                column: name.to_string(),
            });
        }
        column.enum_values = Some(values);
    }
    if SqlType::is_serial_keyword(&type_name) {
        column.auto_increment = true;
    }

    let next_is = |idx: usize, kw: &str| tokens.get(idx).is_some_and(|t| t.token.is_word(kw));
    let mut on_update = None;

    while i < tokens.len() {
        let token = &tokens[i].token;

        if token.is_word("NOT") && next_is(i + 1, "NULL") {
            column.nullable = false;
            i += 2;
        } else if token.is_word("PRIMARY") && next_is(i + 1, "KEY") {
            inline_primary = true;
            i += 2;
        } else if token.is_word("KEY") {
            inline_primary = true;
            i += 1;
        } else if token.is_word("UNIQUE") {
            i += if next_is(i + 1, "KEY") { 2 } else { 1 };
        } else if token.is_word("AUTO_INCREMENT")
            || token.is_word("AUTOINCREMENT")
            || token.is_word("IDENTITY")
        {
            column.auto_increment = true;
            i = skip_group(tokens, i + 1);
        } else if token.is_word("GENERATED") {
            i += 1;
            while i < tokens.len() && !tokens[i].token.is_word("AS") {
                i += 1;
            }
            if next_is(i + 1, "IDENTITY") {
                column.auto_increment = true;
                i += 2;
            } else {
                // Computed column: AS (expr) [STORED | VIRTUAL]
                i += 1;
            }
            i = skip_group(tokens, i);
        } else if token.is_word("DEFAULT") {
            match default_expr(source, tokens, i + 1) {
                Some((raw, next)) => {
                    apply_default(&mut column, raw);
                    i = next;
                }
                None => {
                    diagnostics.push(ShiftError::MalformedDefault {
                        column: name.to_string(),
                    });
                    i += 1;
                }
            }
        } else if token.is_word("COMMENT") {
            if let Some(Token::Quoted { value, .. }) = tokens.get(i + 1).map(|t| &t.token) {
                if column.comment.is_none() {
                    column.comment = Some(value.clone());
                }
                i += 2;
            } else {
                i += 1;
            }
        } else if token.is_word("UNSIGNED") {
            column.unsigned = true;
            i += 1;
        } else if token.is_word("COLLATE") || token.is_word("CHARSET") {
            i += 2;
        } else if token.is_word("CHARACTER") && next_is(i + 1, "SET") {
            i += 3;
        } else if token.is_word("ON") && next_is(i + 1, "UPDATE") {
            match default_expr(source, tokens, i + 2) {
                Some((raw, next)) => {
                    // Referential actions belong to REFERENCES, not to the default
                    let action = ["CASCADE", "RESTRICT", "SET", "NO"]
                        .iter()
                        .any(|k| raw.eq_ignore_ascii_case(k));
                    if !action {
                        on_update.get_or_insert(raw);
                    }
                    i = next;
                }
                None => i += 2,
            }
        } else if token.is_word("ON") && (next_is(i + 1, "DELETE") || next_is(i + 1, "INSERT")) {
            i = default_expr(source, tokens, i + 2).map_or(i + 2, |(_, next)| next);
        } else if token.is_word("CONSTRAINT") {
            i += 2;
        } else if *token == Token::LParen {
            i = group_end(tokens, i) + 1;
        } else {
            // SIGNED, ZEROFILL, NULL, REFERENCES target, CHECK and the like
            i += 1;
        }
    }

    if let Some(expr) = on_update {
        attach_on_update(&mut column, &expr);
    }

    Ok(ParsedColumn {
        column,
        inline_primary,
    })
}

/// Fold a standalone `ON UPDATE <expr>` clause into the column default.
///
/// Without a default there is nothing to carry it, so it is dropped.
fn attach_on_update(column: &mut ColumnDef, expr: &str) {
    let Some(default) = column.default.clone() else {
        debug!(column = %column.name, "ON UPDATE without DEFAULT dropped");
        return;
    };
    if !default.to_uppercase().contains(" ON UPDATE ") {
        column.default = normalize_default(&format!("{} ON UPDATE {}", default, expr));
    }
}

fn apply_default(column: &mut ColumnDef, raw: String) {
    if raw.to_lowercase().contains("nextval") {
        column.auto_increment = true;
        return;
    }
    if column.default.is_none() {
        column.default = normalize_default(&raw);
    } else {
        debug!(column = %column.name, "duplicate DEFAULT ignored");
    }
}

/// Capture a default expression starting at `start`.
///
/// A value is one quoted literal, number, word or parenthesized group; a
/// word directly followed by `(` is a function call. Casts (`::type`) and a
/// trailing `ON UPDATE|INSERT <value>` stay part of the expression.
fn default_expr(source: &str, tokens: &[Spanned], start: usize) -> Option<(String, usize)> {
    let mut end = value_end(source, tokens, start)?;

    loop {
        let next = end + 1;
        match tokens.get(next).map(|t| &t.token) {
            Some(Token::Cast) => {
                end = cast_end(tokens, next);
            }
            Some(t) if t.is_word("ON") => {
                let is_event = tokens
                    .get(next + 1)
                    .is_some_and(|t| t.token.is_word("UPDATE") || t.token.is_word("INSERT"));
                match value_end(source, tokens, next + 2) {
                    Some(value) if is_event => end = value,
                    _ => break,
                }
            }
            _ => break,
        }
    }

    let raw = source[tokens[start].start..tokens[end].end].to_string();
    Some((raw, end + 1))
}

/// Index of the last token of the single value starting at `start`.
fn value_end(source: &str, tokens: &[Spanned], start: usize) -> Option<usize> {
    let first = tokens.get(start)?;
    let end = match &first.token {
        Token::Quoted { .. } => start,
        Token::LParen => group_end(tokens, start),
        Token::Word(w) => {
            if CLAUSE_KEYWORDS.iter().any(|k| w.eq_ignore_ascii_case(k)) {
                return None;
            }
            match tokens.get(start + 1) {
                Some(open) if open.token == Token::LParen && open.start == first.end => {
                    group_end(tokens, start + 1)
                }
                // b'0101', x'ff', _utf8mb4'text'
                Some(literal)
                    if matches!(literal.token, Token::Quoted { quote: '\'', .. })
                        && literal.start == first.end =>
                {
                    start + 1
                }
                _ => start,
            }
        }
        Token::Number(_) => temporal_end(source, tokens, start),
        Token::Punct('-' | '+') => match tokens.get(start + 1) {
            Some(t) if matches!(t.token, Token::Number(_)) => start + 1,
            _ => return None,
        },
        _ => return None,
    };
    Some(end)
}

/// Extend a number to a bare date or datetime (`2024-01-31 10:20:30.5`).
fn temporal_end(source: &str, tokens: &[Spanned], start: usize) -> usize {
    let date_end = contiguous_end(tokens, start);
    let date = &source[tokens[start].start..tokens[date_end].end];
    if date_end == start || !super::defaults::is_date(date) {
        return date_end;
    }
    match tokens.get(date_end + 1) {
        Some(t) if matches!(t.token, Token::Number(_)) => {
            let time_end = contiguous_end(tokens, date_end + 1);
            let time = &source[tokens[date_end + 1].start..tokens[time_end].end];
            if time.contains(':') { time_end } else { date_end }
        }
        _ => date_end,
    }
}

/// Last index of a run of adjacent number/`-`/`:`/`.` tokens.
fn contiguous_end(tokens: &[Spanned], start: usize) -> usize {
    let mut end = start;
    while let Some(next) = tokens.get(end + 1) {
        let joins = next.start == tokens[end].end
            && matches!(next.token, Token::Number(_) | Token::Punct('-' | ':' | '.'));
        if !joins {
            break;
        }
        end += 1;
    }
    end
}

/// Last index of a `::type` cast starting at the `::` token.
fn cast_end(tokens: &[Spanned], cast: usize) -> usize {
    let mut end = cast;
    if matches!(tokens.get(end + 1).map(|t| &t.token), Some(Token::Word(_))) {
        end += 1;
        while let Some(Token::Word(w)) = tokens.get(end + 1).map(|t| &t.token) {
            let continues = ["varying", "precision", "with", "without", "time", "zone"]
                .iter()
                .any(|k| w.eq_ignore_ascii_case(k));
            if !continues {
                break;
            }
            end += 1;
        }
        if matches!(tokens.get(end + 1).map(|t| &t.token), Some(Token::LParen)) {
            end = group_end(tokens, end + 1);
        }
    }
    end
}

fn parse_constraint(tokens: &[Spanned]) -> Fragment {
    let key_after = |keyword: &str| {
        tokens
            .windows(2)
            .position(|w| w[0].token.is_word(keyword) && w[1].token.is_word("KEY"))
    };

    if let Some(pos) = key_after("PRIMARY") {
        return Fragment::PrimaryKey(column_list(tokens, pos + 2));
    }
    if let Some(pos) = key_after("UNIQUE") {
        return Fragment::UniqueKey(column_list(tokens, pos + 2));
    }
    Fragment::Ignored
}

/// Column names of the first parenthesized list at or after `start`.
///
/// Each entry contributes its leading identifier, so prefix lengths and
/// sort directions (`name(10) DESC`) are dropped.
fn column_list(tokens: &[Spanned], start: usize) -> Vec<String> {
    let Some(open) = (start..tokens.len()).find(|&i| tokens[i].token == Token::LParen) else {
        return Vec::new();
    };
    let close = group_end(tokens, open);
    let end = if tokens[close].token == Token::RParen {
        close
    } else {
        tokens.len()
    };

    let mut names = Vec::new();
    let mut depth = 0;
    let mut expecting = true;
    for spanned in &tokens[open + 1..end] {
        match &spanned.token {
            Token::LParen => depth += 1,
            Token::RParen => depth -= 1,
            Token::Comma if depth == 0 => expecting = true,
            token if depth == 0 && expecting => {
                if let Some(ident) = token.ident() {
                    names.push(ident.to_string());
                }
                expecting = false;
            }
            _ => {}
        }
    }
    names
}

/// Index of the `)` closing the `(` at `open`, or the last index if unclosed.
pub fn group_end(tokens: &[Spanned], open: usize) -> usize {
    let mut depth = 0usize;
    for (i, spanned) in tokens.iter().enumerate().skip(open) {
        match spanned.token {
            Token::LParen => depth += 1,
            Token::RParen => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return i;
                }
            }
            _ => {}
        }
    }
    tokens.len().saturating_sub(1)
}

/// Skip an optional `( ... )` group at `i`.
fn skip_group(tokens: &[Spanned], i: usize) -> usize {
    match tokens.get(i) {
        Some(t) if t.token == Token::LParen => group_end(tokens, i) + 1,
        _ => i,
    }
}
