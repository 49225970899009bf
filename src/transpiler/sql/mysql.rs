use super::super::traits::{sized, split_event_clause, SqlGenerator};
use crate::ast::{IntSize, SizeClass, SqlType};

/// MySQL Generator. MariaDB shares it.
pub struct MysqlGenerator;

impl SqlGenerator for MysqlGenerator {
    fn quote_identifier(&self, name: &str) -> String {
        format!("`{}`", name.replace('`', "``"))
    }

    fn column_type(&self, ty: &SqlType) -> String {
        match ty {
            SqlType::Integer { size, width } => {
                let base = match size {
                    IntSize::Tiny => "TINYINT",
                    IntSize::Small => "SMALLINT",
                    IntSize::Medium => "MEDIUMINT",
                    IntSize::Int => "INT",
                    IntSize::Big => "BIGINT",
                };
                sized(base, *width)
            }
            SqlType::Boolean => "TINYINT(1)".to_string(),
            SqlType::Bit { length } => sized("BIT", *length),
            SqlType::Decimal { precision: Some(p), scale: Some(s) } => {
                format!("DECIMAL({},{})", p, s)
            }
            SqlType::Decimal { precision, .. } => sized("DECIMAL", *precision),
            SqlType::Money => "DECIMAL(19,4)".to_string(),
            SqlType::Float => "FLOAT".to_string(),
            SqlType::Double => "DOUBLE".to_string(),
            SqlType::Char { length } => sized("CHAR", *length),
            // VARCHAR requires a length
            SqlType::Varchar { length } => sized("VARCHAR", Some(length.unwrap_or(255))),
            SqlType::Text { size } => size_class("TEXT", *size),
            SqlType::Date => "DATE".to_string(),
            SqlType::Time { .. } => "TIME".to_string(),
            SqlType::DateTime => "DATETIME".to_string(),
            SqlType::Timestamp { .. } => "TIMESTAMP".to_string(),
            SqlType::Year => "YEAR".to_string(),
            SqlType::Json { .. } => "JSON".to_string(),
            SqlType::Uuid => "CHAR(36)".to_string(),
            SqlType::Blob { size } => size_class("BLOB", *size),
            SqlType::Binary { length, varying: false } => sized("BINARY", *length),
            SqlType::Binary { length, varying: true } => {
                sized("VARBINARY", Some(length.unwrap_or(255)))
            }
            SqlType::Enum { values } => format!("enum({})", literal_list(values)),
            SqlType::Set { values } => format!("set({})", literal_list(values)),
        }
    }

    fn default_value(&self, value: &str) -> Option<String> {
        match split_event_clause(value) {
            (head, Some(event)) if event.to_ascii_uppercase().starts_with("ON INSERT") => {
                Some(head.to_string())
            }
            _ => Some(value.to_string()),
        }
    }

    fn auto_increment(&self) -> Option<&str> {
        Some("AUTO_INCREMENT")
    }

    fn column_comment(&self, text: &str) -> Option<String> {
        Some(format!("COMMENT '{}'", text.replace('\'', "''")))
    }

    fn supports_unsigned(&self) -> bool {
        true
    }
}

fn size_class(family: &str, size: SizeClass) -> String {
    let prefix = match size {
        SizeClass::Tiny => "TINY",
        SizeClass::Regular => "",
        SizeClass::Medium => "MEDIUM",
        SizeClass::Long => "LONG",
    };
    format!("{}{}", prefix, family)
}

fn literal_list(values: &[String]) -> String {
    values
        .iter()
        .map(|v| format!("'{}'", v.replace('\'', "''")))
        .collect::<Vec<_>>()
        .join(",")
}
