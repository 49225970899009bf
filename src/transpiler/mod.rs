//! DDL transpiler.
//!
//! Renders parsed [`TableDef`]s as `CREATE TABLE` statements for a target
//! [`Dialect`].

pub mod ddl;
pub mod dialect;
pub mod sql;
pub mod traits;


use serde::{Deserialize, Serialize};

use crate::ast::{SqlType, TableDef};
use crate::parser::tokens::string_literals;
pub use dialect::Dialect;
pub use traits::SqlGenerator;

/// Line terminator used between emitted lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Crlf,
    Lf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Crlf => "\r\n",
            LineEnding::Lf => "\n",
        }
    }
}

/// Rendering options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    pub line_ending: LineEnding,
    /// Spaces before each column line.
    pub indent: usize,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            line_ending: LineEnding::Crlf,
            indent: 4,
        }
    }
}

/// Trait for converting table definitions to DDL.
pub trait ToDdl {
    /// Convert with default options (CRLF, four-space indent).
    fn to_ddl(&self, dialect: Dialect) -> String {
        self.to_ddl_with(dialect, &EmitOptions::default())
    }
    fn to_ddl_with(&self, dialect: Dialect, opts: &EmitOptions) -> String;
}

impl ToDdl for TableDef {
    fn to_ddl_with(&self, dialect: Dialect, opts: &EmitOptions) -> String {
        ddl::build_create_table(self, dialect, opts)
    }
}

impl ToDdl for [TableDef] {
    /// Tables separated by one blank line.
    fn to_ddl_with(&self, dialect: Dialect, opts: &EmitOptions) -> String {
        let eol = opts.line_ending.as_str();
        self.iter()
            .map(|table| table.to_ddl_with(dialect, opts))
            .collect::<Vec<_>>()
            .join(&format!("{}{}", eol, eol))
    }
}

/// Map a source type keyword and its raw qualifier to `dialect`'s type.
///
/// `ENUM`/`SET` values are read from `length` (`'a','b'`). Returns `None`
/// for keywords outside the recognized vocabulary.
///
/// ```
/// use schemashift::transpiler::{map_type, Dialect};
///
/// assert_eq!(map_type("varchar", "255", Dialect::Postgres).as_deref(), Some("CHARACTER VARYING(255)"));
/// assert_eq!(map_type("ENUM", "'a','bb','ccc'", Dialect::SQLite).as_deref(), Some("NVARCHAR(5)"));
/// ```
pub fn map_type(type_name: &str, length: &str, dialect: Dialect) -> Option<String> {
    let values = string_literals(length);
    let ty = SqlType::from_source(type_name, length, &values)?;
    Some(dialect.generator().column_type(&ty))
}
