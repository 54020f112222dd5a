use sqlforge::placeholder_count;
use sqlforge::prelude::*;

struct Posts {
    table: Table,
    id: Column<i64>,
    author_id: Column<i64>,
    title: Column<String>,
    score: Column<i32>,
    deleted: Column<bool>,
}

fn posts() -> Posts {
    let mut t = Table::builder("posts");
    let id = t.add(Column::new("id", ColumnType::big_int()).primary_key());
    let author_id = t.add(Column::new("author_id", ColumnType::big_int()));
    let title = t.add(Column::new("title", ColumnType::text()));
    let score = t.add(Column::new("score", ColumnType::integer()));
    let deleted = t.add(Column::new("deleted", ColumnType::boolean()).default_value(false));
    t.index("idx_posts_author", ["author_id"], false);
    Posts {
        table: t.build().unwrap(),
        id,
        author_id,
        title,
        score,
        deleted,
    }
}

fn dialects() -> Vec<Box<dyn SqlDialect>> {
    vec![
        Box::new(PostgresDialect::new()),
        Box::new(MySqlDialect::new()),
        Box::new(SqliteDialect::new()),
        Box::new(GenericDialect::ansi()),
    ]
}

fn check(q: &PreparedSql) {
    assert_eq!(placeholder_count(&q.sql), q.params.len(), "{}", q.sql);
    assert_eq!(placeholder_count(&q.to_debug_sql()), 0, "{}", q.sql);
}

#[test]
fn every_builder_keeps_placeholders_aligned() {
    let p = posts();
    for d in dialects() {
        let d = d.as_ref();

        let top = Cte::new(
            "top",
            select(&p.table)
                .column(&p.author_id)
                .column(sum(&p.score).alias("total"))
                .where_(p.deleted.expr().eq(false))
                .group_by(&p.author_id)
                .having(sum(&p.score).gt(100)),
        );
        let top_ref = top.reference();
        let q = with(top)
            .select(
                select(&p.table)
                    .join_cte(JoinKind::Inner, &top_ref, top_ref.column::<i64>("author_id").eq(&p.author_id))
                    .where_(p.title.contains("50%"))
                    .and_where(p.score.between(1, 10).or(p.id.in_list([7i64, 8, 9])))
                    .limit(3),
            )
            .build(d)
            .unwrap();
        check(&q);
        assert_eq!(q.params[0], Value::Bool(false));
        assert_eq!(q.params[1], Value::I32(100));

        let q = update(&p.table)
            .set(&p.score, (&p.score + 1) * 2)
            .set(&p.title, lower(&p.title))
            .where_(p.author_id.in_subquery(
                SelectBuilder::from_cte(&top_ref).column(top_ref.column::<i64>("author_id")),
            ))
            .build(d)
            .unwrap();
        check(&q);

        let q = delete(&p.table)
            .where_(not_exists(
                select(&p.table).where_(p.author_id.eq(&p.id).and(p.score.lt(0))),
            ))
            .build(d)
            .unwrap();
        check(&q);
        assert_eq!(q.params, vec![Value::I32(0)]);

        for q in batch_insert(&p.table)
            .row(|r| r.set(&p.author_id, 1i64).set(&p.title, "a?"))
            .row(|r| r.set(&p.author_id, 2i64).set(&p.title, "b"))
            .build(d)
            .unwrap()
        {
            check(&q);
        }
    }
}

#[test]
fn batch_equivalence_across_paths() {
    let p = posts();
    let batch = batch_insert(&p.table)
        .row(|r| r.set(&p.author_id, 1i64).set(&p.score, 5))
        .row(|r| r.set(&p.author_id, 2i64).set(&p.score, 6))
        .row(|r| r.set(&p.author_id, 3i64).set(&p.score, 7));

    let multi = batch.build(&PostgresDialect::new()).unwrap();
    assert_eq!(multi.len(), 1);
    assert_eq!(multi[0].params.len(), 3 * 2);

    let single = GenericDialect::new(
        "single",
        DialectCapabilities::postgres().with_multi_row_insert(false),
    );
    let per_row = batch.build(&single).unwrap();
    assert_eq!(per_row.len(), 3);
    assert!(per_row.iter().all(|q| q.params.len() == 2));

    let flattened: Vec<Value> = per_row.into_iter().flat_map(|q| q.params).collect();
    assert_eq!(flattened, multi[0].params);
}

#[test]
fn template_question_marks_in_quotes_are_not_placeholders() {
    let p = posts();
    let q = select(&p.table)
        .where_(Predicate::template("title <> '?' AND score > ?", [Value::I32(3)]))
        .and_where(p.id.gt(5i64))
        .build(&PostgresDialect::new())
        .unwrap();
    check(&q);
    assert_eq!(
        q.to_debug_sql(),
        r#"SELECT * FROM "posts" WHERE (title <> '?' AND score > 3) AND ("posts"."id" > 5)"#
    );
}
