use super::super::traits::{sized, split_event_clause, SqlGenerator};
use crate::ast::SqlType;

/// SQLite Generator.
pub struct SqliteGenerator;

impl SqlGenerator for SqliteGenerator {
    fn quote_identifier(&self, name: &str) -> String {
        name.to_string()
    }

    fn column_type(&self, ty: &SqlType) -> String {
        match ty {
            SqlType::Integer { .. } | SqlType::Boolean | SqlType::Bit { .. } | SqlType::Year => {
                "INTEGER".to_string()
            }
            SqlType::Decimal { .. } | SqlType::Money => "NUMERIC".to_string(),
            SqlType::Float | SqlType::Double => "REAL".to_string(),
            SqlType::Char { length } => sized("NCHAR", *length),
            SqlType::Varchar { length } => sized("NVARCHAR", *length),
            SqlType::Text { .. }
            | SqlType::Date
            | SqlType::Time { .. }
            | SqlType::DateTime
            | SqlType::Timestamp { .. }
            | SqlType::Json { .. }
            | SqlType::Uuid => "TEXT".to_string(),
            SqlType::Blob { .. } | SqlType::Binary { .. } => "BLOB".to_string(),
            SqlType::Enum { values } | SqlType::Set { values } => {
                format!("NVARCHAR({})", SqlType::enum_width(values))
            }
        }
    }

    fn default_value(&self, value: &str) -> Option<String> {
        // No NOW() and no ON UPDATE triggers in column defaults
        let value = match split_event_clause(value) {
            (_, Some(_)) => return None,
            (value, None) => value,
        };
        let upper = value.to_ascii_uppercase();
        if upper.starts_with("NOW(") {
            return None;
        }
        if upper.starts_with("CURRENT_TIMESTAMP(") {
            return Some("CURRENT_TIMESTAMP".to_string());
        }
        if let Some(n) = bit_literal(value) {
            return Some(format!("'{}'", n));
        }
        Some(value.to_string())
    }
}

/// Value of a MySQL bit literal (`b'101'`), which SQLite cannot read.
fn bit_literal(value: &str) -> Option<u64> {
    let digits = value
        .strip_prefix("b'")
        .or_else(|| value.strip_prefix("B'"))?
        .strip_suffix('\'')?;
    u64::from_str_radix(digits, 2).ok()
}
