//! Canonical column types.
//!
//! Source type keywords from any dialect are folded into [`SqlType`], and
//! every generator renders each variant with an exhaustive match.

use serde::{Deserialize, Serialize};

/// Integer storage class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntSize {
    Tiny,
    Small,
    Medium,
    Int,
    Big,
}

/// Size class shared by the MySQL `TEXT` and `BLOB` families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeClass {
    Tiny,
    Regular,
    Medium,
    Long,
}

/// Dialect-neutral logical type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SqlType {
    Integer { size: IntSize, width: Option<u32> },
    Boolean,
    Bit { length: Option<u32> },
    Decimal { precision: Option<u32>, scale: Option<u32> },
    Float,
    Double,
    Money,
    Char { length: Option<u32> },
    Varchar { length: Option<u32> },
    Text { size: SizeClass },
    Date,
    Time { with_zone: bool },
    DateTime,
    Timestamp { with_zone: bool },
    Year,
    Json { binary: bool },
    Uuid,
    Blob { size: SizeClass },
    Binary { length: Option<u32>, varying: bool },
    Enum { values: Vec<String> },
    Set { values: Vec<String> },
}

impl SqlType {
    /// Fold a source type keyword and its raw qualifier into a canonical type.
    ///
    /// `values` are the already-unquoted members of an `ENUM`/`SET` list.
    /// Matching is case-insensitive and tolerant of repeated whitespace in
    /// multi-word names. Returns `None` for keywords outside the vocabulary.
    pub fn from_source(type_name: &str, length: &str, values: &[String]) -> Option<Self> {
        let name = normalize_name(type_name);
        let length = length.trim();
        let n = positive(length);

        let ty = match name.as_str() {
            "serial" | "serial4" => Self::Integer { size: IntSize::Int, width: None },
            "bigserial" | "serial8" => Self::Integer { size: IntSize::Big, width: None },
            "smallserial" | "serial2" => Self::Integer { size: IntSize::Small, width: None },
            "tinyint" => Self::Integer { size: IntSize::Tiny, width: n },
            "smallint" | "int2" => Self::Integer { size: IntSize::Small, width: n },
            "mediumint" => Self::Integer { size: IntSize::Medium, width: n },
            "int" | "integer" | "int4" => Self::Integer { size: IntSize::Int, width: n },
            "bigint" | "int8" => Self::Integer { size: IntSize::Big, width: n },
            "boolean" | "bool" => Self::Boolean,
            "bit" => Self::Bit { length: n },
            "decimal" | "numeric" | "dec" => {
                let (precision, scale) = precision_scale(length);
                Self::Decimal { precision, scale }
            }
            "float" | "float4" | "real" => Self::Float,
            "double" | "double precision" | "float8" => Self::Double,
            "money" => Self::Money,
            "char" | "character" | "nchar" => Self::Char { length: n },
            "varchar" | "nvarchar" | "varchar2" | "character varying" => {
                Self::Varchar { length: n }
            }
            "tinytext" => Self::Text { size: SizeClass::Tiny },
            "text" => Self::Text { size: SizeClass::Regular },
            "mediumtext" => Self::Text { size: SizeClass::Medium },
            "longtext" => Self::Text { size: SizeClass::Long },
            "date" => Self::Date,
            "time" | "time without time zone" => Self::Time { with_zone: false },
            "timetz" | "time with time zone" => Self::Time { with_zone: true },
            "datetime" => Self::DateTime,
            "timestamp" | "timestamp without time zone" => Self::Timestamp { with_zone: false },
            "timestamptz" | "timestamp with time zone" => Self::Timestamp { with_zone: true },
            "year" => Self::Year,
            "json" => Self::Json { binary: false },
            "jsonb" => Self::Json { binary: true },
            "uuid" => Self::Uuid,
            "tinyblob" => Self::Blob { size: SizeClass::Tiny },
            "blob" | "bytea" => Self::Blob { size: SizeClass::Regular },
            "mediumblob" => Self::Blob { size: SizeClass::Medium },
            "longblob" => Self::Blob { size: SizeClass::Long },
            "binary" => Self::Binary { length: n, varying: false },
            "varbinary" => Self::Binary { length: n, varying: true },
            "enum" => Self::Enum { values: values.to_vec() },
            "set" => Self::Set { values: values.to_vec() },
            _ => return None,
        };
        Some(ty)
    }

    /// Whether `type_name` is part of the recognized vocabulary.
    pub fn is_recognized(type_name: &str) -> bool {
        Self::from_source(type_name, "", &[]).is_some()
    }

    /// Serial pseudo-types imply an auto-increment column.
    pub fn is_serial_keyword(type_name: &str) -> bool {
        matches!(
            normalize_name(type_name).as_str(),
            "serial" | "serial2" | "serial4" | "serial8" | "smallserial" | "bigserial"
        )
    }

    /// `ENUM`/`SET` keywords, whose qualifier is a literal list.
    pub fn is_enumeration_keyword(type_name: &str) -> bool {
        matches!(normalize_name(type_name).as_str(), "enum" | "set")
    }

    /// Sized-text width used when an enumeration is stored as a string:
    /// the longest literal plus two.
    pub fn enum_width(values: &[String]) -> u32 {
        let longest = values.iter().map(|v| v.chars().count()).max().unwrap_or(0);
        longest as u32 + 2
    }
}

fn normalize_name(type_name: &str) -> String {
    type_name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn positive(text: &str) -> Option<u32> {
    text.parse::<u32>().ok().filter(|n| *n > 0)
}

fn precision_scale(text: &str) -> (Option<u32>, Option<u32>) {
    let mut parts = text.split(',').map(str::trim);
    let precision = parts.next().and_then(positive);
    let scale = parts.next().and_then(|s| s.parse::<u32>().ok());
    (precision, scale)
}
