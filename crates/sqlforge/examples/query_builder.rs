//! Example demonstrating sqlforge's typed builders across dialects.
//!
//! Run with:
//!   cargo run --example query_builder -p sqlforge

use sqlforge::prelude::*;

struct Users {
    table: Table,
    id: Column<i64>,
    email: Column<String>,
    name: Column<String>,
    age: Column<i32>,
    balance: Column<i64>,
    bio: Column<Option<String>>,
}

fn users() -> SqlResult<Users> {
    let mut t = Table::builder("users");
    let id = t.add(
        Column::new("id", ColumnType::big_int())
            .primary_key()
            .auto_increment(),
    );
    let email = t.add(Column::new("email", ColumnType::varchar(255)).unique());
    let name = t.add(Column::new("name", ColumnType::varchar(100)));
    let age = t.add(Column::new("age", ColumnType::integer()));
    let balance = t.add(Column::new("balance", ColumnType::big_int()).default_value(0));
    let bio = t.add(Column::new("bio", ColumnType::text().nullable()));
    t.index("idx_users_name", ["name"], false);
    Ok(Users {
        table: t.build()?,
        id,
        email,
        name,
        age,
        balance,
        bio,
    })
}

fn show(label: &str, q: &PreparedSql) {
    println!("-- {label}");
    println!("{}", q.sql);
    println!("   params: {:?}", q.params);
    println!("   debug:  {}", q.to_debug_sql());
}

fn main() -> SqlResult<()> {
    let u = users()?;
    let dialects: Vec<Box<dyn SqlDialect>> = vec![
        Box::new(PostgresDialect::new()),
        Box::new(MySqlDialect::new()),
        Box::new(SqliteDialect::new()),
    ];

    for d in &dialects {
        let d = d.as_ref();
        println!("\n==================== {} ====================", d.name());

        println!("{}", u.table.create_sql(d, true));
        for index in u.table.indexes() {
            println!("{}", d.create_index_statement(index, true));
        }

        let adults = select(&u.table)
            .column(&u.id)
            .column(&u.email)
            .where_(u.age.gte(18))
            .and_where(u.name.ilike("a%").or(u.bio.is_not_null()))
            .order_by(u.id.desc())
            .limit(20)
            .offset(40)
            .build(d)?;
        show("paged select", &adults);

        let upsert = insert(&u.table)
            .set(&u.email, "alice@example.com")
            .set(&u.name, "Alice")
            .set(&u.age, 30)
            .on_conflict([&u.email])
            .do_update()
            .returning([&u.id])
            .build(d)?;
        show("upsert", &upsert);

        let debit = update(&u.table)
            .set(&u.balance, &u.balance - 10i64)
            .set_null(&u.bio)
            .where_(u.id.eq(1i64))
            .build(d)?;
        show("debit", &debit);

        let rich = Cte::new(
            "rich",
            select(&u.table).column(&u.id).where_(u.balance.gt(1_000i64)),
        );
        let r = rich.reference();
        let purge = with(rich)
            .delete(delete(&u.table).where_(
                u.id.not_in_subquery(SelectBuilder::from_cte(&r).column(r.column::<i64>("id"))),
            ))
            .build(d)?;
        show("purge via CTE", &purge);

        let mut batch = batch_insert(&u.table);
        for (i, name) in ["ann", "bob", "cy"].into_iter().enumerate() {
            batch = batch.row(|row| {
                row.set(&u.email, format!("{name}@example.com"))
                    .set(&u.name, name)
                    .set(&u.age, 20 + i as i32)
            });
        }
        for (i, q) in batch.build(d)?.iter().enumerate() {
            show(&format!("batch #{i}"), q);
        }
    }

    // Hard-gated features fail loudly.
    let plain = GenericDialect::ansi();
    let err = insert(&u.table)
        .set(&u.email, "x@example.com")
        .on_conflict([&u.email])
        .do_nothing()
        .build(&plain)
        .unwrap_err();
    println!("\n{err}");

    Ok(())
}
