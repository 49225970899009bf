use super::*;

fn names(table: &TableDef) -> Vec<&str> {
    table.columns.iter().map(|c| c.name.as_str()).collect()
}

#[test]
fn test_columns_in_declaration_order() {
    let table = parse_table(
        "CREATE TABLE users (id INT NOT NULL AUTO_INCREMENT PRIMARY KEY, username VARCHAR(255) NOT NULL, email VARCHAR(255), created_at DATETIME)",
    )
    .unwrap();
    assert_eq!(table.name, "users");
    assert_eq!(names(&table), vec!["id", "username", "email", "created_at"]);
    assert_eq!(table.primary_key.as_deref(), Some("id"));
    assert!(table.columns[0].key);
    assert!(table.columns[0].auto_increment);
    assert!(!table.columns[1].nullable);
    assert!(table.columns[2].nullable);
}

#[test]
fn test_multiline_mysql_dump() {
    let sql = "CREATE TABLE IF NOT EXISTS `orders` (\n  `id` int(11) unsigned NOT NULL AUTO_INCREMENT,\n  `total` decimal(10,2) NOT NULL DEFAULT '0.00',\n  `status` enum('new','paid','shipped') NOT NULL DEFAULT 'new',\n  `note` text COMMENT 'free text',\n  PRIMARY KEY (`id`),\n  KEY `idx_status` (`status`)\n) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4";
    let table = parse_table(sql).unwrap();
    assert_eq!(table.name, "orders");
    assert_eq!(names(&table), vec!["id", "total", "status", "note"]);
    assert_eq!(table.primary_key.as_deref(), Some("id"));
    assert!(table.columns[0].unsigned);
    assert_eq!(table.columns[1].length, "10,2");
    assert_eq!(table.columns[1].default.as_deref(), Some("'0.00'"));
    assert_eq!(
        table.columns[2].enum_values,
        Some(vec!["new".into(), "paid".into(), "shipped".into()])
    );
    assert_eq!(table.columns[3].comment.as_deref(), Some("free text"));
}

#[test]
fn test_inline_and_table_level_primary_key() {
    let table =
        parse_table("CREATE TABLE t (id INT PRIMARY KEY, name TEXT, PRIMARY KEY (id))").unwrap();
    assert!(table.columns[0].key);
    assert!(!table.columns[0].nullable);
    assert_eq!(table.primary_key.as_deref(), Some("id"));
}

#[test]
fn test_composite_primary_key() {
    let table =
        parse_table("CREATE TABLE t (a INT, b INT, c TEXT, PRIMARY KEY (a, b))").unwrap();
    assert!(table.columns[0].key);
    assert!(table.columns[1].key);
    assert!(!table.columns[2].key);
    assert_eq!(table.primary_key, None);
    assert_eq!(table.composite_key, vec!["a", "b"]);
    assert!(!table.columns[0].nullable);
}

#[test]
fn test_duplicate_column_keeps_first() {
    let table =
        parse_table("CREATE TABLE t (name VARCHAR(10) NOT NULL, NAME TEXT DEFAULT 'x')").unwrap();
    assert_eq!(table.columns.len(), 1);
    assert_eq!(table.columns[0].type_name, "VARCHAR");
    assert!(!table.columns[0].nullable);
    assert_eq!(table.columns[0].default, None);
}

#[test]
fn test_unique_key_marks_columns() {
    let table = parse_table(
        "CREATE TABLE t (id INT, email VARCHAR(100), UNIQUE KEY uk_email (email))",
    )
    .unwrap();
    assert!(table.columns[1].key);
    assert!(!table.columns[1].nullable);
    assert_eq!(table.primary_key, None);
}

#[test]
fn test_auto_increment_becomes_primary_key() {
    let table = parse_table("CREATE TABLE t (id SERIAL, name TEXT)").unwrap();
    assert_eq!(table.primary_key.as_deref(), Some("id"));
    assert!(table.columns[0].key);
}

#[test]
fn test_schema_qualified_name() {
    let table = parse_table("CREATE TABLE public.\"accounts\" (id uuid NOT NULL)").unwrap();
    assert_eq!(table.name, "public.accounts");
    assert_eq!(table.base_name(), "accounts");
}

#[test]
fn test_temporary_table_header() {
    let table = parse_table("create temporary table if not exists scratch (v int)").unwrap();
    assert_eq!(table.name, "scratch");
}

#[test]
fn test_not_a_table() {
    assert_eq!(
        parse_table("CREATE INDEX idx ON t (a)"),
        Err(ShiftError::NoTableFound)
    );
    assert_eq!(parse_table("SELECT 1"), Err(ShiftError::NoTableFound));
    assert_eq!(parse_table("CREATE TABLE t AS SELECT 1"), Err(ShiftError::NoTableFound));
}

#[test]
fn test_unrecognized_type_excluded() {
    let mut diagnostics = Vec::new();
    let table =
        parse_table_with("CREATE TABLE t (id INT, shape GEOMETRY, name TEXT)", &mut diagnostics)
            .unwrap();
    assert_eq!(names(&table), vec!["id", "name"]);
    assert_eq!(diagnostics, vec![ShiftError::unrecognized("shape", "GEOMETRY")]);
}

#[test]
fn test_index_named_like_type() {
    let table = parse_table(
        "CREATE TABLE t (`id` int NOT NULL, `uuid` char(36) NOT NULL, PRIMARY KEY (`id`), KEY `uuid` (`uuid`), KEY `date` (`id`, `uuid`))",
    )
    .unwrap();
    assert_eq!(names(&table), vec!["id", "uuid"]);
    assert_eq!(table.primary_key.as_deref(), Some("id"));
    assert!(!table.columns[1].key);
}

#[test]
fn test_table_without_columns_is_dropped() {
    let mut diagnostics = Vec::new();
    assert_eq!(
        parse_table_with("CREATE TABLE t (g GEOMETRY, PRIMARY KEY (g))", &mut diagnostics),
        Err(ShiftError::EmptyTable { table: "t".into() })
    );
    assert_eq!(diagnostics, vec![ShiftError::unrecognized("g", "GEOMETRY")]);

    let report = parse_all("CREATE TABLE t (g GEOMETRY);\nCREATE TABLE u (id INT);");
    assert_eq!(report.tables.len(), 1);
    assert_eq!(report.tables[0].name, "u");
    let skipped: Vec<usize> = report.skipped().map(|d| d.statement).collect();
    assert_eq!(skipped, vec![0]);
}

#[test]
fn test_parse_all_isolates_failures() {
    let script = "CREATE TABLE a (id INT);\nDROP TABLE b;\nCREATE TABLE c (id INT, g GEOMETRY);";
    let report = parse_all(script);
    assert_eq!(report.tables.len(), 2);
    assert_eq!(report.tables[1].name, "c");
    assert_eq!(
        report.diagnostics,
        vec![
            Diagnostic {
                statement: 1,
                error: ShiftError::NoTableFound,
            },
            Diagnostic {
                statement: 2,
                error: ShiftError::unrecognized("g", "GEOMETRY"),
            },
        ]
    );
    assert_eq!(report.skipped().count(), 1);
}

#[test]
fn test_report_serializes_errors_as_text() {
    let report = parse_all("DROP TABLE x;");
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["diagnostics"][0]["statement"], 0);
    assert_eq!(json["diagnostics"][0]["error"], "No CREATE TABLE definition found");
}
