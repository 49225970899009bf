//! Transpiler traits and utilities.

use crate::ast::SqlType;

/// Trait for dialect-specific DDL generation.
pub trait SqlGenerator {
    /// Quote an identifier (table or column name).
    fn quote_identifier(&self, name: &str) -> String;

    /// Render a canonical type in this dialect's surface syntax.
    fn column_type(&self, ty: &SqlType) -> String;

    /// Adapt a normalized default value, or drop it when the dialect has
    /// no equivalent. Casts are already stripped when this is called.
    fn default_value(&self, value: &str) -> Option<String> {
        Some(value.to_string())
    }

    /// Column attribute marking an auto-increment column, if the dialect
    /// spells it inline.
    fn auto_increment(&self) -> Option<&str> {
        None
    }

    /// Inline column comment clause.
    fn column_comment(&self, _text: &str) -> Option<String> {
        None
    }

    /// Whether numeric columns may carry `UNSIGNED`.
    fn supports_unsigned(&self) -> bool {
        false
    }
}

/// Split an `X ON UPDATE|INSERT Y` default into `X` and the event clause.
pub(crate) fn split_event_clause(value: &str) -> (&str, Option<&str>) {
    if value.starts_with('\'') {
        return (value, None);
    }
    let upper = value.to_ascii_uppercase();
    match upper.find(" ON UPDATE ").or_else(|| upper.find(" ON INSERT ")) {
        Some(idx) => (value[..idx].trim_end(), Some(value[idx..].trim_start())),
        None => (value, None),
    }
}

/// `base(n)` when a length is present, else `base`.
pub(crate) fn sized(base: &str, length: Option<u32>) -> String {
    match length {
        Some(n) => format!("{}({})", base, n),
        None => base.to_string(),
    }
}
