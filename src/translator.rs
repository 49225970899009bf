//! Script translation: pre-process, parse, emit.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::parser::{parse_all, ParseReport};
use crate::transpiler::{Dialect, EmitOptions, ToDdl};

static TIMESTAMP_WITH_ZONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\btimestamp\s+with\s+time\s+zone\b").unwrap());

static TIMESTAMP_WITHOUT_ZONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\btimestamp\s+without\s+time\s+zone\b").unwrap());

static CHARACTER_VARYING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bcharacter\s+varying\b").unwrap());

static PG_DEFAULT_COLLATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\s*\bCOLLATE\s+pg_catalog\."default""#).unwrap());

/// Uniform rewrites applied before parsing, whatever the target.
///
/// Single-quoted literals pass through untouched.
pub fn preprocess(script: &str) -> String {
    let mut out = String::with_capacity(script.len());
    for (literal, segment) in literal_segments(script) {
        if literal {
            out.push_str(segment);
        } else {
            out.push_str(&rewrite(segment));
        }
    }
    out
}

fn rewrite(code: &str) -> String {
    let code = code.replace('`', "");
    let code = TIMESTAMP_WITH_ZONE.replace_all(&code, "timestamptz");
    let code = TIMESTAMP_WITHOUT_ZONE.replace_all(&code, "timestamp");
    let code = CHARACTER_VARYING.replace_all(&code, "varchar");
    PG_DEFAULT_COLLATION.replace_all(&code, "").into_owned()
}

/// Split `script` into `(is_literal, text)` runs.
///
/// Backtick and double-quoted identifiers and comments stay in the code
/// runs, but quotes inside them do not open a literal.
fn literal_segments(script: &str) -> Vec<(bool, &str)> {
    let bytes = script.as_bytes();
    let mut segments = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\'' => {
                let end = literal_end(bytes, i);
                segments.push((false, &script[start..i]));
                segments.push((true, &script[i..end]));
                start = end;
                i = end;
            }
            b'`' => i = skip_past(bytes, i + 1, b"`"),
            b'"' => i = skip_past(bytes, i + 1, b"\""),
            b'-' if bytes.get(i + 1) == Some(&b'-') => i = skip_past(bytes, i + 2, b"\n"),
            b'/' if bytes.get(i + 1) == Some(&b'*') => i = skip_past(bytes, i + 2, b"*/"),
            _ => i += 1,
        }
    }
    segments.push((false, &script[start..]));
    segments
}

/// Index just past the literal opened at `open`, or the end of input.
fn literal_end(bytes: &[u8], open: usize) -> usize {
    let mut i = open + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\'' if bytes.get(i + 1) == Some(&b'\'') => i += 2,
            b'\'' => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Index just past the next `end` at or after `from`, or the end of input.
fn skip_past(bytes: &[u8], from: usize, end: &[u8]) -> usize {
    let from = from.min(bytes.len());
    bytes[from..]
        .windows(end.len())
        .position(|w| w == end)
        .map_or(bytes.len(), |pos| from + pos + end.len())
}

/// Emitted DDL together with what was skipped on the way.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Translation {
    pub sql: String,
    pub report: ParseReport,
}

/// Translates whole scripts with fixed rendering options.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    options: EmitOptions,
}

impl Translator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EmitOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EmitOptions {
        &self.options
    }

    /// Parse `script` into tables without emitting anything.
    pub fn parse(&self, script: &str) -> ParseReport {
        parse_all(&preprocess(script))
    }

    pub fn translate(&self, script: &str, dialect: Dialect) -> String {
        self.translate_with_report(script, dialect).sql
    }

    /// Translate and keep the per-statement diagnostics.
    pub fn translate_with_report(&self, script: &str, dialect: Dialect) -> Translation {
        let report = self.parse(script);
        debug!(
            tables = report.tables.len(),
            diagnostics = report.diagnostics.len(),
            %dialect,
            "script parsed"
        );
        let sql = report.tables.to_ddl_with(dialect, &self.options);
        Translation { sql, report }
    }
}
