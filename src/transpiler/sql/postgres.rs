use super::super::traits::{sized, split_event_clause, SqlGenerator};
use crate::ast::{IntSize, SqlType};

/// PostgreSQL Generator.
pub struct PostgresGenerator;

impl SqlGenerator for PostgresGenerator {
    fn quote_identifier(&self, name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    fn column_type(&self, ty: &SqlType) -> String {
        match ty {
            SqlType::Integer { size, .. } => match size {
                IntSize::Tiny | IntSize::Small => "SMALLINT",
                IntSize::Medium | IntSize::Int => "INTEGER",
                IntSize::Big => "BIGINT",
            }
            .to_string(),
            SqlType::Boolean => "BOOLEAN".to_string(),
            SqlType::Bit { length } => sized("BIT", *length),
            SqlType::Decimal { precision: Some(p), scale: Some(s) } => {
                format!("NUMERIC({},{})", p, s)
            }
            SqlType::Decimal { precision, .. } => sized("NUMERIC", *precision),
            SqlType::Float => "REAL".to_string(),
            SqlType::Double => "DOUBLE PRECISION".to_string(),
            SqlType::Money => "MONEY".to_string(),
            SqlType::Char { length } => sized("CHARACTER", *length),
            SqlType::Varchar { length } => sized("CHARACTER VARYING", *length),
            SqlType::Text { .. } => "TEXT".to_string(),
            SqlType::Date => "DATE".to_string(),
            SqlType::Time { with_zone: true } => "TIME WITH TIME ZONE".to_string(),
            SqlType::Time { with_zone: false } => "TIME WITHOUT TIME ZONE".to_string(),
            SqlType::Timestamp { with_zone: true } => "TIMESTAMP WITH TIME ZONE".to_string(),
            SqlType::DateTime | SqlType::Timestamp { with_zone: false } => {
                "TIMESTAMP WITHOUT TIME ZONE".to_string()
            }
            SqlType::Year => "SMALLINT".to_string(),
            SqlType::Json { binary: true } => "JSONB".to_string(),
            SqlType::Json { binary: false } => "JSON".to_string(),
            SqlType::Uuid => "UUID".to_string(),
            SqlType::Blob { .. } | SqlType::Binary { .. } => "BYTEA".to_string(),
            SqlType::Enum { values } | SqlType::Set { values } => {
                format!("CHARACTER VARYING({})", SqlType::enum_width(values))
            }
        }
    }

    fn default_value(&self, value: &str) -> Option<String> {
        let (head, _) = split_event_clause(value);
        Some(head.to_string())
    }
}
