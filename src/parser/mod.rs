//! DDL parser.
//!
//! Recovers [`TableDef`]s from loosely formatted SQL scripts:
//!
//! ```text
//! script ──split_statements──▶ statements ──parse_table──▶ TableDef
//!                                   │
//!                                   └── not a table ─▶ Diagnostic (skipped)
//! ```

pub mod columns;
pub mod defaults;
pub mod splitter;
pub mod tokens;

#[cfg(test)]
mod tests;

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::ast::TableDef;
use crate::error::{ShiftError, ShiftResult};
use columns::{group_end, parse_fragment, Fragment};
use tokens::{tokenize, Spanned, Token};

pub use defaults::normalize_default;
pub use splitter::{split_statements, Statement};

/// A problem found while parsing one statement of a script.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    /// Zero-based index of the statement in the script.
    pub statement: usize,
    #[serde(serialize_with = "display")]
    pub error: ShiftError,
}

fn display<S: Serializer>(error: &ShiftError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// Tables recovered from a script, plus everything that was skipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParseReport {
    pub tables: Vec<TableDef>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseReport {
    /// Diagnostics for statements that were dropped entirely.
    pub fn skipped(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.error.drops_statement())
    }
}

/// Parse every `CREATE TABLE` statement of a script.
///
/// Failures are isolated per statement: a statement that is not a table is
/// recorded as a diagnostic and parsing continues with the next one.
pub fn parse_all(script: &str) -> ParseReport {
    let mut report = ParseReport::default();

    for (index, statement) in split_statements(script).iter().enumerate() {
        let mut problems = Vec::new();
        match parse_table_with(&statement.text, &mut problems) {
            Ok(table) => report.tables.push(table),
            Err(error) => {
                debug!(statement = index, %error, "statement skipped");
                problems.push(error);
            }
        }
        report
            .diagnostics
            .extend(problems.into_iter().map(|error| Diagnostic {
                statement: index,
                error,
            }));
    }

    report
}

/// Parse a single `CREATE TABLE` statement.
///
/// # Example
///
/// ```
/// use schemashift::parser::parse_table;
///
/// let table = parse_table("CREATE TABLE users (id INT PRIMARY KEY, name TEXT)").unwrap();
/// assert_eq!(table.name, "users");
/// assert_eq!(table.primary_key.as_deref(), Some("id"));
/// ```
pub fn parse_table(statement: &str) -> ShiftResult<TableDef> {
    parse_table_with(statement, &mut Vec::new())
}

/// Parse a single statement, pushing non-fatal problems to `diagnostics`.
///
/// Column fragments with unrecognized types are excluded and reported.
/// Fails with [`ShiftError::NoTableFound`] when there is no table header
/// and [`ShiftError::EmptyTable`] when no column survives.
pub fn parse_table_with(
    statement: &str,
    diagnostics: &mut Vec<ShiftError>,
) -> ShiftResult<TableDef> {
    let tokens = tokenize(statement);
    let (name, open) = table_header(&tokens).ok_or(ShiftError::NoTableFound)?;

    let close = group_end(&tokens, open);
    let body_end = if tokens[close].token == Token::RParen {
        close
    } else {
        tokens.len()
    };
    let body = &tokens[open + 1..body_end];

    let mut table = TableDef::new(name);
    let mut inline_primary: Vec<String> = Vec::new();
    let mut constraints = Vec::new();

    for fragment in split_fragments(body) {
        match parse_fragment(statement, fragment, diagnostics) {
            Ok(Fragment::Column(parsed)) => {
                let mut column = parsed.column;
                if table.find_column(&column.name).is_some() {
                    debug!(table = %table.name, column = %column.name, "duplicate column ignored");
                    continue;
                }
                if parsed.inline_primary {
                    column.key = true;
                    inline_primary.push(column.name.clone());
                }
                table.columns.push(column);
            }
            Ok(Fragment::Ignored) => {}
            Ok(constraint) => constraints.push(constraint),
            Err(error) => {
                debug!(table = %table.name, %error, "column fragment excluded");
                diagnostics.push(error);
            }
        }
    }

    if table.columns.is_empty() {
        return Err(ShiftError::EmptyTable { table: table.name });
    }

    for constraint in constraints {
        apply_constraint(&mut table, constraint);
    }

    if table.primary_key.is_none() && table.composite_key.is_empty() {
        table.primary_key = inline_primary.into_iter().next();
    }
    if table.primary_key.is_none() && !table.columns.iter().any(|c| c.key) {
        if let Some(column) = table.columns.iter_mut().find(|c| c.auto_increment) {
            column.key = true;
            table.primary_key = Some(column.name.clone());
        }
    }

    for column in &mut table.columns {
        if column.key {
            column.nullable = false;
        }
    }

    Ok(table)
}

fn apply_constraint(table: &mut TableDef, constraint: Fragment) {
    match constraint {
        Fragment::PrimaryKey(names) => {
            let known: Vec<String> = names
                .iter()
                .filter_map(|n| table.find_column(n).map(|c| c.name.clone()))
                .collect();
            for name in &known {
                if let Some(column) = table.find_column_mut(name) {
                    column.key = true;
                }
            }
            if names.len() == 1 {
                table.primary_key = known.into_iter().next();
            } else if names.len() > 1 {
                table.primary_key = None;
                table.composite_key = known;
            }
        }
        Fragment::UniqueKey(names) => {
            for name in &names {
                if let Some(column) = table.find_column_mut(name) {
                    column.key = true;
                }
            }
        }
        Fragment::Column(_) | Fragment::Ignored => {}
    }
}

/// Match `CREATE [TEMPORARY] TABLE [IF NOT EXISTS] name (`.
///
/// Returns the (unquoted, possibly schema-qualified) name and the index of
/// the opening parenthesis.
fn table_header(tokens: &[Spanned]) -> Option<(String, usize)> {
    (0..tokens.len())
        .filter(|&i| tokens[i].token.is_word("CREATE"))
        .find_map(|i| header_at(tokens, i + 1))
}

fn header_at(tokens: &[Spanned], mut i: usize) -> Option<(String, usize)> {
    let word_at = |i: usize, kw: &str| tokens.get(i).is_some_and(|t| t.token.is_word(kw));

    while ["TEMPORARY", "TEMP", "UNLOGGED", "GLOBAL", "LOCAL"]
        .iter()
        .any(|kw| word_at(i, kw))
    {
        i += 1;
    }
    if !word_at(i, "TABLE") {
        return None;
    }
    i += 1;
    if word_at(i, "IF") && word_at(i + 1, "NOT") && word_at(i + 2, "EXISTS") {
        i += 3;
    }

    let mut parts = vec![tokens.get(i)?.token.ident()?.to_string()];
    i += 1;
    while matches!(tokens.get(i).map(|t| &t.token), Some(Token::Punct('.'))) {
        parts.push(tokens.get(i + 1)?.token.ident()?.to_string());
        i += 2;
    }

    match tokens.get(i).map(|t| &t.token) {
        Some(Token::LParen) => Some((parts.join("."), i)),
        _ => None,
    }
}

/// Split a table body at top-level commas.
fn split_fragments(body: &[Spanned]) -> Vec<&[Spanned]> {
    let mut fragments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, spanned) in body.iter().enumerate() {
        match spanned.token {
            Token::LParen => depth += 1,
            Token::RParen => depth = depth.saturating_sub(1),
            Token::Comma if depth == 0 => {
                fragments.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    fragments.push(&body[start..]);

    fragments.into_iter().filter(|f| !f.is_empty()).collect()
}
