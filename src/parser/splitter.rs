//! Statement splitter.
//!
//! A line-oriented state machine with two states: at statement start, and
//! mid-statement. Lines beginning with `--` are dropped, `DELIMITER <tok>`
//! directives change the terminator, and every terminator occurrence that
//! is not inside a quoted literal closes the current statement.

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

/// One statement of a script, with the terminator that closed it.
///
/// A trailing statement left open at end of input has an empty terminator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub text: String,
    pub terminator: String,
}

/// Split a multi-statement script into statements.
pub fn split_statements(script: &str) -> Vec<Statement> {
    let script = script.replace("\r\n", "\n").replace('\r', "\n");
    let mut splitter = Splitter::new();
    for line in script.lines() {
        splitter.feed(line);
    }
    splitter.finish()
}

struct Splitter {
    terminator: String,
    current: String,
    /// Quote character of a literal left open at the end of the previous line.
    quote: Option<char>,
    statements: Vec<Statement>,
}

impl Splitter {
    fn new() -> Self {
        Self {
            terminator: ";".to_string(),
            current: String::new(),
            quote: None,
            statements: Vec::new(),
        }
    }

    fn at_start(&self) -> bool {
        self.current.trim().is_empty()
    }

    fn feed(&mut self, line: &str) {
        if self.quote.is_some() {
            self.scan(line);
            return;
        }

        let trimmed = line.trim();
        if trimmed.starts_with("--") {
            return;
        }
        if trimmed.is_empty() {
            if !self.at_start() {
                self.current.push('\n');
            }
            return;
        }
        if let Some(token) = delimiter_directive(trimmed) {
            if !self.at_start() {
                warn!(
                    statement = %self.current.trim(),
                    "DELIMITER directive discards unterminated statement"
                );
                self.current.clear();
            }
            trace!(from = %self.terminator, to = token, "delimiter changed");
            self.terminator = token.to_string();
            return;
        }

        self.scan(line);
    }

    /// Append `line`, closing a statement at each unquoted terminator.
    fn scan(&mut self, line: &str) {
        let mut segment_start = 0;
        let mut segment_end = line.len();
        let mut i = 0;

        while i < line.len() {
            let rest = &line[i..];
            let Some(c) = rest.chars().next() else {
                break;
            };

            if let Some(q) = self.quote {
                if c == '\\' && q != '`' {
                    // Skip the escaped character as well
                    i += c.len_utf8();
                    i += line[i..].chars().next().map_or(0, char::len_utf8);
                    continue;
                }
                if c == q {
                    self.quote = None;
                }
                i += c.len_utf8();
                continue;
            }

            if matches!(c, '\'' | '"' | '`') {
                self.quote = Some(c);
                i += 1;
                continue;
            }
            if rest.starts_with("--") {
                segment_end = i;
                break;
            }
            if rest.starts_with(self.terminator.as_str()) {
                self.current.push_str(&line[segment_start..i]);
                self.close();
                i += self.terminator.len();
                segment_start = i;
                continue;
            }
            i += c.len_utf8();
        }

        let segment = &line[segment_start..segment_end.max(segment_start)];
        if !segment.trim().is_empty() || !self.at_start() || self.quote.is_some() {
            self.current.push_str(segment);
            self.current.push('\n');
        }
    }

    fn close(&mut self) {
        let text = self.current.trim();
        if !text.is_empty() {
            trace!(terminator = %self.terminator, "statement closed");
            self.statements.push(Statement {
                text: text.to_string(),
                terminator: self.terminator.clone(),
            });
        }
        self.current.clear();
    }

    fn finish(mut self) -> Vec<Statement> {
        let text = self.current.trim();
        if !text.is_empty() {
            self.statements.push(Statement {
                text: text.to_string(),
                terminator: String::new(),
            });
        }
        self.statements
    }
}

/// The new terminator when `line` is a `DELIMITER <token>` directive.
fn delimiter_directive(line: &str) -> Option<&str> {
    let mut words = line.split_whitespace();
    let keyword = words.next()?;
    let token = words.next()?;
    if keyword.eq_ignore_ascii_case("delimiter") && words.next().is_none() {
        Some(token)
    } else {
        None
    }
}
