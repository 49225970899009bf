//! # schemashift
//!
//! Translate `CREATE TABLE` schemas between SQLite, MySQL/MariaDB and
//! PostgreSQL.
//!
//! ## Quick Example
//!
//! ```
//! use schemashift::prelude::*;
//!
//! let sql = schemashift::translate(
//!     "CREATE TABLE users (id INT AUTO_INCREMENT PRIMARY KEY, email VARCHAR(255));",
//!     Dialect::Postgres,
//! );
//! assert_eq!(
//!     sql,
//!     "CREATE TABLE \"users\" (\r\n    \"id\" INTEGER NOT NULL PRIMARY KEY,\r\n    \"email\" CHARACTER VARYING(255) NULL\r\n);"
//! );
//! ```
//!
//! ## Pipeline
//!
//! | Stage        | Module                   | Output                 |
//! |--------------|--------------------------|------------------------|
//! | Pre-process  | [`translator`]           | normalized script      |
//! | Split        | [`parser::splitter`]     | statements             |
//! | Parse        | [`parser`]               | [`ast::TableDef`]      |
//! | Map + emit   | [`transpiler`]           | target DDL             |
//!
//! Statements that are not `CREATE TABLE` are skipped and reported in a
//! [`parser::ParseReport`], never raised.

pub mod ast;
pub mod config;
pub mod error;
pub mod parser;
pub mod translator;
pub mod transpiler;

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::error::*;
    pub use crate::parser::{parse_all, parse_table, Diagnostic, ParseReport};
    pub use crate::translator::{Translation, Translator};
    pub use crate::transpiler::{map_type, Dialect, EmitOptions, LineEnding, ToDdl};
}

use error::ShiftResult;
use transpiler::Dialect;

/// Translate a script of `CREATE TABLE` statements to `dialect`.
///
/// Output uses CRLF line breaks and separates tables with a blank line.
/// A script without any table yields an empty string.
pub fn translate(script: &str, dialect: Dialect) -> String {
    translator::Translator::new().translate(script, dialect)
}

/// Like [`translate`], with the dialect given by name (`sqlite`, `mysql`,
/// `mariadb`, `pgsql`, `postgresql`).
///
/// # Example
///
/// ```
/// let sql = schemashift::translate_to("CREATE TABLE t (id INT);", "sqlite").unwrap();
/// assert_eq!(sql, "CREATE TABLE t (\r\n    id INTEGER NULL\r\n);");
///
/// assert!(schemashift::translate_to("CREATE TABLE t (id INT);", "oracle").is_err());
/// ```
pub fn translate_to(script: &str, dialect: &str) -> ShiftResult<String> {
    Ok(translate(script, dialect.parse()?))
}
