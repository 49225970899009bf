use pretty_assertions::assert_eq;
use schemashift::prelude::*;
use schemashift::translate;

const USERS: &str = "CREATE TABLE users (id INT NOT NULL AUTO_INCREMENT PRIMARY KEY, username VARCHAR(255) NOT NULL, email VARCHAR(255), created_at DATETIME);";

fn crlf(lines: &[&str]) -> String {
    lines.join("\r\n")
}

#[test]
fn test_users_to_postgres() {
    assert_eq!(
        translate(USERS, Dialect::Postgres),
        crlf(&[
            "CREATE TABLE \"users\" (",
            "    \"id\" INTEGER NOT NULL PRIMARY KEY,",
            "    \"username\" CHARACTER VARYING(255) NOT NULL,",
            "    \"email\" CHARACTER VARYING(255) NULL,",
            "    \"created_at\" TIMESTAMP WITHOUT TIME ZONE NULL",
            ");",
        ])
    );
}

#[test]
fn test_users_to_sqlite() {
    assert_eq!(
        translate(USERS, Dialect::SQLite),
        crlf(&[
            "CREATE TABLE users (",
            "    id INTEGER NOT NULL PRIMARY KEY,",
            "    username NVARCHAR(255) NOT NULL,",
            "    email NVARCHAR(255) NULL,",
            "    created_at TEXT NULL",
            ");",
        ])
    );
}

#[test]
fn test_users_to_mysql() {
    assert_eq!(
        translate(USERS, Dialect::MySQL),
        crlf(&[
            "CREATE TABLE `users` (",
            "    `id` INT NOT NULL PRIMARY KEY AUTO_INCREMENT,",
            "    `username` VARCHAR(255) NOT NULL,",
            "    `email` VARCHAR(255) NULL,",
            "    `created_at` DATETIME NULL",
            ");",
        ])
    );
    assert_eq!(
        translate(USERS, Dialect::MariaDB),
        translate(USERS, Dialect::MySQL)
    );
}

#[test]
fn test_sqlite_output_is_stable() {
    let once = translate(USERS, Dialect::SQLite);
    assert_eq!(translate(&once, Dialect::SQLite), once);
}

#[test]
fn test_delimiter_block_is_ignored() {
    let script = "DELIMITER $$\nCREATE PROCEDURE touch()\nBEGIN\n  UPDATE t SET x = 1;\nEND $$\nDELIMITER ;\n\nCREATE TABLE `t` (\n  `x` int(11) DEFAULT NULL\n);\n";
    let translation = Translator::new().translate_with_report(script, Dialect::SQLite);
    assert_eq!(
        translation.sql,
        crlf(&["CREATE TABLE t (", "    x INTEGER NULL", ");"])
    );
    assert_eq!(translation.report.tables.len(), 1);
    assert_eq!(translation.report.skipped().count(), 1);
}

#[test]
fn test_enum_mapping() {
    let script = "CREATE TABLE shirts (size ENUM('a','bb','ccc') NOT NULL DEFAULT 'a');";
    assert_eq!(
        translate(script, Dialect::SQLite),
        crlf(&["CREATE TABLE shirts (", "    size NVARCHAR(5) NOT NULL DEFAULT 'a'", ");"])
    );
    assert_eq!(
        translate(script, Dialect::Postgres),
        crlf(&[
            "CREATE TABLE \"shirts\" (",
            "    \"size\" CHARACTER VARYING(5) NOT NULL DEFAULT 'a'",
            ");",
        ])
    );
    assert_eq!(
        translate(script, Dialect::MySQL),
        crlf(&[
            "CREATE TABLE `shirts` (",
            "    `size` enum('a','bb','ccc') NOT NULL DEFAULT 'a'",
            ");",
        ])
    );
}

#[test]
fn test_now_default_dropped_for_sqlite() {
    let script = "CREATE TABLE log (id INT PRIMARY KEY, at DATETIME DEFAULT now());";
    assert!(translate(script, Dialect::MySQL).contains("`at` DATETIME NULL DEFAULT NOW()"));
    assert!(
        translate(script, Dialect::Postgres)
            .contains("\"at\" TIMESTAMP WITHOUT TIME ZONE NULL DEFAULT NOW()")
    );
    let sqlite = translate(script, Dialect::SQLite);
    assert!(sqlite.contains("    at TEXT NULL\r\n"));
    assert!(!sqlite.contains("DEFAULT"));
}

#[test]
fn test_on_update_default() {
    let script = "CREATE TABLE t (id INT PRIMARY KEY, updated TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP);";
    assert!(translate(script, Dialect::MySQL).contains(
        "`updated` TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP"
    ));
    assert!(translate(script, Dialect::Postgres).contains(
        "\"updated\" TIMESTAMP WITHOUT TIME ZONE NOT NULL DEFAULT CURRENT_TIMESTAMP\r\n"
    ));
    assert!(translate(script, Dialect::SQLite).contains("    updated TEXT NOT NULL\r\n"));
}

#[test]
fn test_standalone_on_update_survives_mysql() {
    let script = "CREATE TABLE t (id INT PRIMARY KEY, updated TIMESTAMP DEFAULT CURRENT_TIMESTAMP NOT NULL ON UPDATE CURRENT_TIMESTAMP);";
    assert!(translate(script, Dialect::MySQL).contains(
        "`updated` TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP"
    ));
}

#[test]
fn test_precise_timestamp_default_to_sqlite() {
    let script = "CREATE TABLE log (id INT PRIMARY KEY, at datetime(6) DEFAULT CURRENT_TIMESTAMP(6));";
    assert!(translate(script, Dialect::SQLite).contains("    at TEXT NULL DEFAULT CURRENT_TIMESTAMP\r\n"));
    assert!(translate(script, Dialect::MySQL).contains("DEFAULT CURRENT_TIMESTAMP(6)"));
}

#[test]
fn test_bit_literal_default() {
    let script = "CREATE TABLE `flags` (\n  `id` int NOT NULL,\n  `flag` bit(1) NOT NULL DEFAULT b'0',\n  PRIMARY KEY (`id`)\n);";
    assert!(translate(script, Dialect::MySQL).contains("`flag` BIT(1) NOT NULL DEFAULT b'0'"));
    assert!(translate(script, Dialect::Postgres).contains("\"flag\" BIT(1) NOT NULL DEFAULT b'0'"));
    assert!(translate(script, Dialect::SQLite).contains("    flag INTEGER NOT NULL DEFAULT '0'"));
}

#[test]
fn test_mysql_dump_index_named_like_type() {
    let script = "CREATE TABLE `tokens` (\n  `id` int NOT NULL,\n  `uuid` char(36) NOT NULL,\n  PRIMARY KEY (`id`),\n  KEY `uuid` (`uuid`)\n) ENGINE=InnoDB;";
    assert_eq!(
        translate(script, Dialect::Postgres),
        crlf(&[
            "CREATE TABLE \"tokens\" (",
            "    \"id\" INTEGER NOT NULL PRIMARY KEY,",
            "    \"uuid\" CHARACTER(36) NOT NULL",
            ");",
        ])
    );
}

#[test]
fn test_table_with_no_known_columns_is_skipped() {
    let translation =
        Translator::new().translate_with_report("CREATE TABLE t (g GEOMETRY);", Dialect::SQLite);
    assert_eq!(translation.sql, "");
    assert_eq!(
        translation.report.skipped().map(|d| &d.error).collect::<Vec<_>>(),
        vec![&ShiftError::EmptyTable { table: "t".into() }]
    );
}

#[test]
fn test_comment_literal_kept_verbatim() {
    let script = "CREATE TABLE t (`note` text COMMENT 'see `x` character varying');";
    assert_eq!(
        translate(script, Dialect::MySQL),
        crlf(&["CREATE TABLE `t` (", "    `note` TEXT NULL COMMENT 'see `x` character varying'", ");"])
    );
}

#[test]
fn test_postgres_dump_to_mysql() {
    let script = r#"
CREATE TABLE public.accounts (
    id integer DEFAULT nextval('accounts_id_seq'::regclass) NOT NULL,
    name character varying(80) COLLATE pg_catalog."default" NOT NULL,
    balance numeric(12,2) DEFAULT 0,
    active boolean DEFAULT true,
    created timestamp with time zone DEFAULT CURRENT_TIMESTAMP,
    CONSTRAINT accounts_pkey PRIMARY KEY (id)
);

ALTER TABLE ONLY public.accounts OWNER TO admin;
"#;
    assert_eq!(
        translate(script, Dialect::MySQL),
        crlf(&[
            "CREATE TABLE `accounts` (",
            "    `id` INT NOT NULL PRIMARY KEY AUTO_INCREMENT,",
            "    `name` VARCHAR(80) NOT NULL,",
            "    `balance` DECIMAL(12,2) NULL DEFAULT '0',",
            "    `active` TINYINT(1) NULL DEFAULT TRUE,",
            "    `created` TIMESTAMP NULL DEFAULT CURRENT_TIMESTAMP",
            ");",
        ])
    );
}

#[test]
fn test_mixed_script_with_lf() {
    let script = "-- dump\nSET NAMES utf8;\nCREATE TABLE a (id INT);\n\nCREATE TABLE b (\n  id BIGINT UNSIGNED NOT NULL,\n  note TEXT COMMENT 'it''s',\n  PRIMARY KEY (id)\n);\nINSERT INTO a VALUES (1);";
    let translator = Translator::with_options(EmitOptions {
        line_ending: LineEnding::Lf,
        indent: 4,
    });
    let translation = translator.translate_with_report(script, Dialect::MySQL);
    assert_eq!(
        translation.sql,
        "CREATE TABLE `a` (\n    `id` INT NULL\n);\n\nCREATE TABLE `b` (\n    `id` BIGINT UNSIGNED NOT NULL PRIMARY KEY,\n    `note` TEXT NULL COMMENT 'it''s'\n);"
    );
    let skipped: Vec<usize> = translation.report.skipped().map(|d| d.statement).collect();
    assert_eq!(skipped, vec![0, 3]);
}

#[test]
fn test_composite_key_to_sqlite() {
    let script = "CREATE TABLE pairs (a INT NOT NULL, b INT NOT NULL, PRIMARY KEY (a, b));";
    assert_eq!(
        translate(script, Dialect::SQLite),
        crlf(&[
            "CREATE TABLE pairs (",
            "    a INTEGER NOT NULL,",
            "    b INTEGER NOT NULL,",
            "    PRIMARY KEY (a, b)",
            ");",
        ])
    );
}

#[test]
fn test_semicolon_inside_default_literal() {
    let script = "CREATE TABLE t (sep VARCHAR(1) DEFAULT ';');\nCREATE TABLE u (id INT);";
    let sql = translate(script, Dialect::Postgres);
    assert!(sql.contains("\"sep\" CHARACTER VARYING(1) NULL DEFAULT ';'"));
    assert!(sql.contains("CREATE TABLE \"u\""));
}

#[test]
fn test_no_tables_yields_empty_output() {
    assert_eq!(translate("DROP TABLE users;\nSELECT 1;", Dialect::Postgres), "");
    assert_eq!(translate("", Dialect::SQLite), "");
}

#[test]
fn test_translate_to_by_name() {
    assert_eq!(
        schemashift::translate_to(USERS, "postgresql").unwrap(),
        translate(USERS, Dialect::Postgres)
    );
    assert_eq!(
        schemashift::translate_to(USERS, "db2"),
        Err(ShiftError::UnknownDialect("db2".to_string()))
    );
}
