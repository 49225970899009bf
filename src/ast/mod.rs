//! Dialect-neutral table model.
//!
//! A [`TableDef`] is produced fresh by the parser for every statement and
//! consumed once by the emitter. Nothing here is shared between calls.

pub mod types;

pub use types::{IntSize, SizeClass, SqlType};

use serde::{Deserialize, Serialize};

/// One parsed `CREATE TABLE` statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDef {
    /// Table name as written, possibly schema-qualified (`public.users`).
    pub name: String,
    /// Columns in declaration order.
    pub columns: Vec<ColumnDef>,
    /// The single primary-key column, when exactly one is designated.
    #[serde(default)]
    pub primary_key: Option<String>,
    /// Column list of a composite `PRIMARY KEY (a, b)` declaration.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub composite_key: Vec<String>,
}

/// One parsed column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    /// Source type keyword, case preserved (`VARCHAR`, `timestamptz`).
    #[serde(rename = "type")]
    pub type_name: String,
    /// Raw text of the parenthesized type qualifier (`255`, `10,2`, `'a','b'`).
    #[serde(default)]
    pub length: String,
    /// Part of the primary key (or of a `PRIMARY|UNIQUE KEY` constraint).
    #[serde(default)]
    pub key: bool,
    #[serde(default = "default_true")]
    pub nullable: bool,
    /// Normalized default value.
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default)]
    pub auto_increment: bool,
    /// Literals of an `ENUM(...)`/`SET(...)` type.
    #[serde(default)]
    pub enum_values: Option<Vec<String>>,
    #[serde(default)]
    pub comment: Option<String>,
    /// MySQL `UNSIGNED` attribute.
    #[serde(default)]
    pub unsigned: bool,
}

fn default_true() -> bool {
    true
}

impl ColumnDef {
    /// Create a nullable column with no attributes.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            length: String::new(),
            key: false,
            nullable: true,
            default: None,
            auto_increment: false,
            enum_values: None,
            comment: None,
            unsigned: false,
        }
    }

    /// Canonical type of this column, if its type keyword is recognized.
    pub fn sql_type(&self) -> Option<SqlType> {
        let values = self.enum_values.as_deref().unwrap_or_default();
        SqlType::from_source(&self.type_name, &self.length, values)
    }
}

impl TableDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            primary_key: None,
            composite_key: Vec::new(),
        }
    }

    /// Table name without its schema qualifier.
    pub fn base_name(&self) -> &str {
        match self.name.rfind('.') {
            Some(idx) => &self.name[idx + 1..],
            None => &self.name,
        }
    }

    /// Find a column by name (case-insensitive).
    pub fn find_column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn find_column_mut(&mut self, name: &str) -> Option<&mut ColumnDef> {
        self.columns
            .iter_mut()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Whether `name` is the designated single-column primary key.
    pub fn is_primary(&self, name: &str) -> bool {
        self.primary_key
            .as_deref()
            .is_some_and(|pk| pk.eq_ignore_ascii_case(name))
    }
}
