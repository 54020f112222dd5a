use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sqlforge::prelude::*;

struct Events {
    table: Table,
    id: Column<i64>,
    kind: Column<String>,
    weight: Column<i32>,
}

fn events() -> Events {
    let mut t = Table::builder("events");
    let id = t.add(Column::new("id", ColumnType::big_int()).primary_key());
    let kind = t.add(Column::new("kind", ColumnType::varchar(32)));
    let weight = t.add(Column::new("weight", ColumnType::integer()));
    Events {
        table: t.build().expect("valid schema"),
        id,
        kind,
        weight,
    }
}

/// SELECT with `n` AND-ed predicates, each binding one parameter:
/// WHERE ((w > ?) AND (k = ?)) AND (w > ?) ...
fn build_select(e: &Events, n: usize) -> SelectBuilder {
    let mut q = select(&e.table).column(&e.id);
    for i in 0..n {
        q = if i % 2 == 0 {
            q.and_where(e.weight.gt(i as i32))
        } else {
            q.and_where(e.kind.eq(format!("k{i}")))
        };
    }
    q
}

fn bench_select_render(c: &mut Criterion) {
    let e = events();
    let pg = PostgresDialect::new();
    let mut group = c.benchmark_group("render/select_predicates");

    for n in [1, 5, 10, 50, 100] {
        let q = build_select(&e, n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &q, |b, q| {
            b.iter(|| black_box(q.build(&pg)));
        });
    }

    group.finish();
}

fn bench_build_and_render(c: &mut Criterion) {
    let e = events();
    let pg = PostgresDialect::new();
    let mut group = c.benchmark_group("render/build_and_render");

    for n in [1, 5, 10, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| black_box(build_select(&e, n).build(&pg)));
        });
    }

    group.finish();
}

fn bench_in_list(c: &mut Criterion) {
    let e = events();
    let pg = PostgresDialect::new();
    let mut group = c.benchmark_group("render/in_list");

    for n in [5, 20, 100, 500] {
        let ids: Vec<i64> = (0..n).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &ids, |b, ids| {
            b.iter(|| {
                let q = select(&e.table).where_(e.id.in_list(ids.iter().copied()));
                black_box(q.build(&pg))
            });
        });
    }

    group.finish();
}

fn bench_batch_insert(c: &mut Criterion) {
    let e = events();
    let mut group = c.benchmark_group("render/batch_insert");
    let dialects: [(&str, Box<dyn SqlDialect>); 2] = [
        ("postgres", Box::new(PostgresDialect::new())),
        ("sqlite", Box::new(SqliteDialect::new())),
    ];

    for rows in [10, 100, 1000] {
        let mut batch = batch_insert(&e.table);
        for i in 0..rows {
            batch = batch.row(|r| {
                r.set(&e.id, i as i64)
                    .set(&e.kind, "click")
                    .set(&e.weight, 1)
            });
        }
        for (name, dialect) in &dialects {
            group.bench_with_input(BenchmarkId::new(*name, rows), &batch, |b, batch| {
                b.iter(|| black_box(batch.build(dialect.as_ref())));
            });
        }
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_select_render,
    bench_build_and_render,
    bench_in_list,
    bench_batch_insert
);
criterion_main!(benches);
