use sqlforge::prelude::*;

struct Accounts {
    table: Table,
    id: Column<i64>,
    name: Column<String>,
    email: Column<String>,
    age: Column<i32>,
    balance: Column<i64>,
}

fn accounts() -> Accounts {
    let mut t = Table::builder("users");
    let id = t.add(
        Column::new("id", ColumnType::big_int())
            .primary_key()
            .auto_increment(),
    );
    let name = t.add(Column::new("name", ColumnType::varchar(100)));
    let email = t.add(Column::new("email", ColumnType::varchar(255)).unique());
    let age = t.add(Column::new("age", ColumnType::integer()));
    let balance = t.add(Column::new("balance", ColumnType::big_int()).default_value(0));
    Accounts {
        table: t.build().expect("valid schema"),
        id,
        name,
        email,
        age,
        balance,
    }
}

#[test]
fn select_with_filter() {
    let a = accounts();
    let q = select(&a.table)
        .where_(a.age.gt(18))
        .build(&PostgresDialect::new())
        .unwrap();
    assert_eq!(q.sql, r#"SELECT * FROM "users" WHERE "users"."age" > ?"#);
    assert_eq!(q.params, vec![Value::I32(18)]);
    assert_eq!(q.parameter_count(), 1);
}

#[test]
fn insert_in_set_order() {
    let a = accounts();
    let q = insert(&a.table)
        .set(&a.name, "John")
        .set(&a.email, "j@x.com")
        .build(&PostgresDialect::new())
        .unwrap();
    assert_eq!(q.sql, r#"INSERT INTO "users" ("name","email") VALUES (?, ?)"#);
    assert_eq!(q.params, vec![Value::from("John"), Value::from("j@x.com")]);
}

#[test]
fn update_self_referencing() {
    let a = accounts();
    let q = update(&a.table)
        .set(&a.balance, &a.balance - 10i64)
        .where_(a.id.eq(1i64))
        .build(&PostgresDialect::new())
        .unwrap();
    assert_eq!(
        q.sql,
        r#"UPDATE "users" SET "balance" = "users"."balance" - ? WHERE "users"."id" = ?"#
    );
    assert_eq!(q.params, vec![Value::I64(10), Value::I64(1)]);
}

#[test]
fn delete_everything() {
    let a = accounts();
    let q = delete(&a.table).build(&PostgresDialect::new()).unwrap();
    assert_eq!(q.sql, r#"DELETE FROM "users""#);
    assert!(q.params.is_empty());
}

#[test]
fn upsert_without_support_fails() {
    let a = accounts();
    let err = insert(&a.table)
        .set(&a.name, "John")
        .set(&a.email, "j@x.com")
        .on_conflict([&a.email])
        .do_nothing()
        .build(&GenericDialect::ansi())
        .unwrap_err();
    assert!(matches!(err, SqlError::Unsupported { ref feature, .. } if feature == "ON CONFLICT"));
}

#[test]
fn same_statement_across_dialects() {
    let a = accounts();
    let q = select(&a.table)
        .column(&a.id)
        .where_(a.name.ilike("al%"))
        .order_by(a.id.desc())
        .limit(5);

    let pg = q.build(&PostgresDialect::new()).unwrap();
    assert_eq!(
        pg.sql,
        r#"SELECT "users"."id" FROM "users" WHERE "users"."name" ILIKE ? ORDER BY "users"."id" DESC LIMIT 5"#
    );

    let my = q.build(&MySqlDialect::new()).unwrap();
    assert_eq!(
        my.sql,
        "SELECT `users`.`id` FROM `users` WHERE LOWER(`users`.`name`) LIKE LOWER(?) ORDER BY `users`.`id` DESC LIMIT 5"
    );

    let lite = q.build(&SqliteDialect::new()).unwrap();
    assert!(lite.sql.contains(r#"LOWER("users"."name") LIKE LOWER(?)"#));

    assert_eq!(pg.params, my.params);
    assert_eq!(my.params, lite.params);
}

#[test]
fn builder_is_reusable_after_build() {
    let a = accounts();
    let q = delete(&a.table).where_(a.id.eq(3i64));
    let first = q.build(&PostgresDialect::new()).unwrap();
    let second = q.build(&PostgresDialect::new()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn debug_sql_is_for_logging() {
    let a = accounts();
    let q = insert(&a.table)
        .set(&a.name, "it's")
        .set(&a.age, 40)
        .build(&SqliteDialect::new())
        .unwrap();
    assert_eq!(
        q.to_debug_sql(),
        r#"INSERT INTO "users" ("name","age") VALUES ('it''s', 40)"#
    );
    assert_eq!(q.to_string(), q.sql);
}

#[test]
fn prepared_sql_serializes() {
    let a = accounts();
    let q = select(&a.table)
        .where_(a.email.eq("a@b.c"))
        .build(&PostgresDialect::new())
        .unwrap();
    let json = serde_json::to_value(&q).unwrap();
    assert_eq!(json["params"][0]["type"], "string");
    assert_eq!(json["params"][0]["value"], "a@b.c");
    let back: PreparedSql = serde_json::from_value(json).unwrap();
    assert_eq!(back, q);
}

#[test]
fn schema_is_shared_across_threads() {
    let a = std::sync::Arc::new(accounts());
    let handles: Vec<_> = (0..4i32)
        .map(|i| {
            let a = a.clone();
            std::thread::spawn(move || {
                select(&a.table)
                    .where_(a.age.eq(i))
                    .build(&PostgresDialect::new())
                    .unwrap()
            })
        })
        .collect();
    for (i, h) in handles.into_iter().enumerate() {
        let q = h.join().unwrap();
        assert_eq!(q.params, vec![Value::I32(i as i32)]);
    }
}
