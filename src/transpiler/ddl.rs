use tracing::debug;

use super::dialect::Dialect;
use super::traits::SqlGenerator;
use super::EmitOptions;
use crate::ast::{ColumnDef, SqlType, TableDef};

/// Generate CREATE TABLE SQL.
pub fn build_create_table(table: &TableDef, dialect: Dialect, opts: &EmitOptions) -> String {
    let generator = dialect.generator();
    let eol = opts.line_ending.as_str();
    let indent = " ".repeat(opts.indent);

    let mut sql = String::new();
    sql.push_str("CREATE TABLE ");
    sql.push_str(&generator.quote_identifier(table.base_name()));
    sql.push_str(" (");
    sql.push_str(eol);

    let mut defs: Vec<String> = table
        .columns
        .iter()
        .map(|col| format!("{}{}", indent, column_definition(table, col, generator)))
        .collect();

    if !table.composite_key.is_empty() {
        let col_list = table
            .composite_key
            .iter()
            .map(|c| generator.quote_identifier(c))
            .collect::<Vec<_>>()
            .join(", ");
        defs.push(format!("{}PRIMARY KEY ({})", indent, col_list));
    }

    sql.push_str(&defs.join(&format!(",{}", eol)));
    sql.push_str(eol);
    sql.push_str(");");
    sql
}

fn column_definition(table: &TableDef, col: &ColumnDef, generator: &dyn SqlGenerator) -> String {
    let sql_type = col.sql_type();
    let type_sql = match &sql_type {
        Some(ty) => generator.column_type(ty),
        None => {
            debug!(column = %col.name, type_name = %col.type_name, "unknown type emitted verbatim");
            col.type_name.to_uppercase()
        }
    };

    let mut line = format!("{} {}", generator.quote_identifier(&col.name), type_sql);

    if col.unsigned && generator.supports_unsigned() && sql_type.as_ref().is_some_and(is_numeric) {
        line.push_str(" UNSIGNED");
    }

    if table.is_primary(&col.name) {
        line.push_str(" NOT NULL PRIMARY KEY");
    } else if col.key || !col.nullable {
        line.push_str(" NOT NULL");
    } else {
        line.push_str(" NULL");
    }

    if col.auto_increment {
        if let Some(marker) = generator.auto_increment() {
            line.push(' ');
            line.push_str(marker);
        }
    }

    if let Some(value) = col.default.as_deref() {
        let value = strip_casts(value);
        if !value.eq_ignore_ascii_case("NULL") {
            if let Some(value) = generator.default_value(value) {
                line.push_str(" DEFAULT ");
                line.push_str(&value);
            }
        }
    }

    if let Some(comment) = col.comment.as_deref() {
        if let Some(clause) = generator.column_comment(comment) {
            line.push(' ');
            line.push_str(&clause);
        }
    }

    line
}

fn is_numeric(ty: &SqlType) -> bool {
    matches!(
        ty,
        SqlType::Integer { .. } | SqlType::Decimal { .. } | SqlType::Float | SqlType::Double
    )
}

/// Remove trailing `::type` casts (`'x'::character varying` becomes `'x'`).
pub fn strip_casts(value: &str) -> &str {
    let mut value = value.trim();
    while let Some(idx) = last_cast(value) {
        value = value[..idx].trim_end();
    }
    value
}

/// Byte offset of the last `::` outside single quotes.
fn last_cast(value: &str) -> Option<usize> {
    let bytes = value.as_bytes();
    let mut in_quote = false;
    let mut last = None;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\'' => in_quote = !in_quote,
            b':' if !in_quote && bytes.get(i + 1) == Some(&b':') => {
                last = Some(i);
                i += 1;
            }
            _ => {}
        }
        i += 1;
    }
    // A cast inside a call (`nextval('s'::regclass)`) is not trailing
    last.filter(|&idx| !closes_group(&value[idx + 2..]))
}

/// Whether `text` closes a parenthesis it did not open.
fn closes_group(text: &str) -> bool {
    let mut depth = 0i32;
    for c in text.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
        if depth < 0 {
            return true;
        }
    }
    false
}
