use super::*;
use crate::schema::{Column, ColumnType};

fn users() -> Table {
    let mut t = Table::builder("users");
    t.add(
        Column::new("id", ColumnType::big_int())
            .primary_key()
            .auto_increment(),
    );
    t.add(Column::new("email", ColumnType::varchar(255)).unique());
    t.add(Column::new("active", ColumnType::boolean()).default_value(true));
    t.add(Column::new("bio", ColumnType::text().nullable()));
    t.index("idx_users_email", ["email"], true);
    t.build().unwrap()
}

#[test]
fn quoting_doubles_embedded_quotes() {
    assert_eq!(PostgresDialect::new().quote_identifier("a\"b"), "\"a\"\"b\"");
    assert_eq!(MySqlDialect::new().quote_identifier("a`b"), "`a``b`");
    assert_eq!(SqliteDialect::new().quote_identifier("users"), "\"users\"");
}

#[test]
fn string_literals() {
    assert_eq!(PostgresDialect::new().string_literal("it's"), "'it''s'");
    assert_eq!(MySqlDialect::new().string_literal("a\\b'c"), "'a\\\\b''c'");
}

#[test]
fn limit_offset_forms() {
    let pg = PostgresDialect::new();
    assert_eq!(pg.limit_offset_clause(Some(10), Some(20)), "LIMIT 10 OFFSET 20");
    assert_eq!(pg.limit_offset_clause(Some(10), None), "LIMIT 10");
    assert_eq!(pg.limit_offset_clause(None, Some(5)), "OFFSET 5");
    assert_eq!(pg.limit_offset_clause(None, None), "");

    assert_eq!(
        MySqlDialect::new().limit_offset_clause(None, Some(5)),
        "LIMIT 18446744073709551615 OFFSET 5"
    );
    assert_eq!(
        SqliteDialect::new().limit_offset_clause(None, Some(5)),
        "LIMIT -1 OFFSET 5"
    );

    let fetch = GenericDialect::new("fetch", DialectCapabilities::ansi().with_limit_offset(false));
    assert_eq!(
        fetch.limit_offset_clause(Some(10), Some(20)),
        "OFFSET 20 ROWS FETCH NEXT 10 ROWS ONLY"
    );
    assert_eq!(fetch.limit_offset_clause(Some(10), None), "FETCH FIRST 10 ROWS ONLY");
    assert_eq!(fetch.limit_offset_clause(None, Some(3)), "OFFSET 3 ROWS");
}

#[test]
fn returning_is_soft() {
    let cols = ReturningColumns::Columns(vec!["id".into(), "email".into()]);
    assert_eq!(
        PostgresDialect::new().returning_clause(&cols),
        "RETURNING \"id\", \"email\""
    );
    assert_eq!(
        SqliteDialect::new().returning_clause(&ReturningColumns::All),
        "RETURNING *"
    );
    assert_eq!(MySqlDialect::new().returning_clause(&cols), "");
    assert_eq!(GenericDialect::ansi().returning_clause(&ReturningColumns::All), "");
}

#[test]
fn on_conflict_is_hard() {
    let conflict = vec!["email".to_string()];
    let update = vec!["name".to_string()];

    assert_eq!(
        PostgresDialect::new()
            .on_conflict_clause(&conflict, &update)
            .unwrap(),
        "ON CONFLICT (\"email\") DO UPDATE SET \"name\" = EXCLUDED.\"name\""
    );
    assert_eq!(
        SqliteDialect::new().on_conflict_do_nothing(&conflict).unwrap(),
        "ON CONFLICT (\"email\") DO NOTHING"
    );
    assert_eq!(
        MySqlDialect::new()
            .on_conflict_clause(&conflict, &update)
            .unwrap(),
        "ON DUPLICATE KEY UPDATE `name` = VALUES(`name`)"
    );
    assert_eq!(
        MySqlDialect::new().on_conflict_do_nothing(&conflict).unwrap(),
        "ON DUPLICATE KEY UPDATE `email` = `email`"
    );

    let err = GenericDialect::ansi()
        .on_conflict_do_nothing(&conflict)
        .unwrap_err();
    assert_eq!(err, SqlError::unsupported("ansi", "ON CONFLICT"));
}

#[test]
fn postgres_create_table() {
    let sql = PostgresDialect::new().create_table_statement(&users(), true);
    assert_eq!(
        sql,
        "CREATE TABLE IF NOT EXISTS \"users\" (\"id\" BIGSERIAL NOT NULL, \
         \"email\" VARCHAR(255) NOT NULL UNIQUE, \
         \"active\" BOOLEAN NOT NULL DEFAULT TRUE, \
         \"bio\" TEXT, \
         PRIMARY KEY (\"id\"))"
    );
}

#[test]
fn binary_defaults_per_dialect() {
    let mut t = Table::builder("blobs");
    t.add(Column::new("magic", ColumnType::binary()).default_value(vec![0xde, 0xad]));
    let t = t.build().unwrap();

    let sql = PostgresDialect::new().create_table_statement(&t, false);
    assert_eq!(
        sql,
        r#"CREATE TABLE "blobs" ("magic" BYTEA NOT NULL DEFAULT '\xdead'::bytea)"#
    );
    assert_eq!(
        SqliteDialect::new().literal(&Value::Bytes(vec![0xde, 0xad])),
        "X'DEAD'"
    );
}

#[test]
fn mysql_create_table() {
    let sql = MySqlDialect::new().create_table_statement(&users(), false);
    assert_eq!(
        sql,
        "CREATE TABLE `users` (`id` BIGINT AUTO_INCREMENT NOT NULL, \
         `email` VARCHAR(255) NOT NULL UNIQUE, \
         `active` TINYINT(1) NOT NULL DEFAULT 1, \
         `bio` TEXT, \
         PRIMARY KEY (`id`))"
    );
}

#[test]
fn sqlite_inlines_autoincrement_key() {
    let sql = SqliteDialect::new().create_table_statement(&users(), false);
    assert_eq!(
        sql,
        "CREATE TABLE \"users\" (\"id\" INTEGER PRIMARY KEY AUTOINCREMENT, \
         \"email\" VARCHAR(255) NOT NULL UNIQUE, \
         \"active\" INTEGER NOT NULL DEFAULT 1, \
         \"bio\" TEXT)"
    );
}

#[test]
fn composite_key_is_table_level() {
    let mut t = Table::builder("memberships");
    t.add(Column::new("user_id", ColumnType::big_int()));
    t.add(Column::new("group_id", ColumnType::big_int()));
    t.primary_key(["user_id", "group_id"]);
    let table = t.build().unwrap();

    assert_eq!(
        SqliteDialect::new().create_table_statement(&table, false),
        "CREATE TABLE \"memberships\" (\"user_id\" BIGINT NOT NULL, \
         \"group_id\" BIGINT NOT NULL, \
         PRIMARY KEY (\"user_id\", \"group_id\"))"
    );
}

#[test]
fn index_statements() {
    let table = users();
    let index = &table.indexes()[0];
    let pg = PostgresDialect::new();
    assert_eq!(
        pg.create_index_statement(index, true),
        "CREATE UNIQUE INDEX IF NOT EXISTS \"idx_users_email\" ON \"users\" (\"email\")"
    );
    assert_eq!(
        pg.drop_index_statement(index, true),
        "DROP INDEX IF EXISTS \"idx_users_email\""
    );

    let my = MySqlDialect::new();
    assert_eq!(
        my.create_index_statement(index, true),
        "CREATE UNIQUE INDEX `idx_users_email` ON `users` (`email`)"
    );
    assert_eq!(
        my.drop_index_statement(index, true),
        "DROP INDEX `idx_users_email` ON `users`"
    );
}

#[test]
fn drop_table() {
    assert_eq!(
        PostgresDialect::new().drop_table_statement("users", true),
        "DROP TABLE IF EXISTS \"users\""
    );
    assert_eq!(
        users().drop_sql(&MySqlDialect::new(), false),
        "DROP TABLE `users`"
    );
}

#[test]
fn type_names_per_dialect() {
    let pg = PostgresDialect::new();
    assert_eq!(pg.sql_type_name(&SqlType::Json), "JSONB");
    assert_eq!(pg.sql_type_name(&SqlType::Binary), "BYTEA");
    assert_eq!(pg.auto_increment_type(&SqlType::Integer), "SERIAL");

    let no_bool = GenericDialect::new("nobool", DialectCapabilities::ansi().with_boolean_type(false));
    assert_eq!(no_bool.sql_type_name(&SqlType::Boolean), "SMALLINT");
    assert_eq!(
        no_bool.auto_increment_type(&SqlType::BigInt),
        "BIGINT GENERATED BY DEFAULT AS IDENTITY"
    );
}

#[test]
fn capabilities_deserialize_over_ansi_defaults() {
    let caps: DialectCapabilities =
        serde_json::from_str(r#"{"supports_returning": true, "max_insert_batch_size": 100}"#)
            .unwrap();
    assert!(caps.supports_returning);
    assert!(!caps.supports_on_conflict);
    assert!(caps.supports_cte);
    assert_eq!(caps.max_insert_batch_size, Some(100));
}

#[test]
fn presets() {
    let sqlite = SqliteDialect::new();
    assert!(sqlite.supports_returning());
    assert!(!sqlite.supports_ilike());
    assert!(sqlite.for_update_clause().is_none());
    assert_eq!(sqlite.max_insert_batch_size(), Some(500));

    let mysql = MySqlDialect::new();
    assert!(!mysql.supports_returning());
    assert!(mysql.supports_on_conflict());
    assert_eq!(mysql.for_update_clause(), Some("FOR UPDATE"));

    assert!(PostgresDialect::new().supports_ilike());
}
