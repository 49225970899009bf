use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ShiftError;
use crate::transpiler::sql::mysql::MysqlGenerator;
use crate::transpiler::sql::postgres::PostgresGenerator;
use crate::transpiler::sql::sqlite::SqliteGenerator;
use crate::transpiler::traits::SqlGenerator;

static SQLITE: SqliteGenerator = SqliteGenerator;
static MYSQL: MysqlGenerator = MysqlGenerator;
static POSTGRES: PostgresGenerator = PostgresGenerator;

/// Supported SQL Dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Dialect {
    #[serde(rename = "sqlite")]
    SQLite,
    #[serde(rename = "mysql")]
    MySQL,
    #[serde(rename = "mariadb")]
    MariaDB,
    #[default]
    #[serde(rename = "pgsql", alias = "postgresql", alias = "postgres")]
    Postgres,
}

impl Dialect {
    pub const ALL: [Dialect; 4] = [
        Dialect::SQLite,
        Dialect::MySQL,
        Dialect::MariaDB,
        Dialect::Postgres,
    ];

    /// The generator rendering this dialect. MariaDB renders as MySQL.
    pub fn generator(&self) -> &'static dyn SqlGenerator {
        match self {
            Dialect::SQLite => &SQLITE,
            Dialect::MySQL | Dialect::MariaDB => &MYSQL,
            Dialect::Postgres => &POSTGRES,
        }
    }

    /// Canonical identifier.
    pub fn name(&self) -> &'static str {
        self.aliases()[0]
    }

    /// Every identifier accepted for this dialect, canonical first.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Dialect::SQLite => &["sqlite"],
            Dialect::MySQL => &["mysql"],
            Dialect::MariaDB => &["mariadb"],
            Dialect::Postgres => &["pgsql", "postgresql", "postgres"],
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = ShiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Dialect::ALL
            .into_iter()
            .find(|d| d.aliases().iter().any(|a| a.eq_ignore_ascii_case(wanted)))
            .ok_or_else(|| ShiftError::UnknownDialect(s.to_string()))
    }
}
