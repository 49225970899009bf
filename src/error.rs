//! Error types for schemashift.

use thiserror::Error;

/// The main error type for schemashift operations.
///
/// Most variants describe a problem with one statement or one column
/// fragment. They are collected as diagnostics while a script is
/// translated and never abort the whole run.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ShiftError {
    /// The statement does not start a `CREATE TABLE ... (` definition.
    #[error("No CREATE TABLE definition found")]
    NoTableFound,

    /// Every column fragment of the table was excluded.
    #[error("Table '{table}' has no recognized columns")]
    EmptyTable { table: String },

    /// A column fragment uses a type outside the recognized vocabulary.
    #[error("Unrecognized type '{type_name}' for column '{column}'")]
    UnrecognizedType { column: String, type_name: String },

    /// A `DEFAULT` keyword without a usable value.
    #[error("Malformed DEFAULT clause for column '{column}'")]
    MalformedDefault { column: String },

    /// An `ENUM(...)` or `SET(...)` type without quoted literals.
    #[error("Malformed ENUM/SET value list for column '{column}'")]
    MalformedEnum { column: String },

    /// Dialect identifier outside `sqlite`, `mysql`, `mariadb`, `pgsql`, `postgresql`.
    #[error("Unknown dialect: '{0}'. Expected: sqlite, mysql, mariadb, pgsql or postgresql")]
    UnknownDialect(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (config loading only; the translator itself does no IO).
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ShiftError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl ShiftError {
    /// Create an unrecognized-type error.
    pub fn unrecognized(column: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::UnrecognizedType {
            column: column.into(),
            type_name: type_name.into(),
        }
    }

    /// Whether this error drops the whole statement from the output.
    pub fn drops_statement(&self) -> bool {
        matches!(self, Self::NoTableFound | Self::EmptyTable { .. })
    }
}

/// Result type alias for schemashift operations.
pub type ShiftResult<T> = Result<T, ShiftError>;
