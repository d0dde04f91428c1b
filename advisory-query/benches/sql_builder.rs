//! Benchmarks for WHERE compilation and statement assembly.
//!
//! Run with: cargo bench -p advisory-query

use advisory_query::{advisories, and, documents, field_eq_string, or, Expr};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

/// A filter of the shape the endpoint layer typically produces: a user
/// filter AND-ed with a TLP visibility scope.
fn scoped_filter() -> Expr {
    let user = and(
        field_eq_string("publisher", "BSI"),
        or(
            Expr::Search {
                query: "heap overflow".to_string(),
                lang: "english".to_string(),
                alias: Some("snippet".to_string()),
            },
            field_eq_string("title", "buffer"),
        ),
    );
    let scope = or(
        field_eq_string("tlp", "WHITE"),
        field_eq_string("tlp", "GREEN"),
    );
    and(user, scope)
}

fn bench_create_where(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_where");

    let simple = field_eq_string("publisher", "BSI");
    group.bench_function("simple_eq", |b| {
        b.iter(|| {
            let mut builder = documents();
            builder.create_where(black_box(&simple))
        })
    });

    let scoped = scoped_filter();
    group.bench_function("scoped_search", |b| {
        b.iter(|| {
            let mut builder = advisories();
            builder.create_where(black_box(&scoped))
        })
    });

    group.finish();
}

fn bench_statement_assembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("assembly");

    let scoped = scoped_filter();
    group.bench_function("query_with_order_and_pagination", |b| {
        b.iter(|| {
            let mut builder = advisories();
            builder.create_where(black_box(&scoped));
            let order = builder
                .create_order(black_box(&["-tracking_id", "title"]))
                .expect("allow-listed order fields");
            builder.create_query(black_box(&["id", "title", "snippet"]), &order, 50, 100)
        })
    });

    group.bench_function("count", |b| {
        b.iter(|| {
            let mut builder = advisories();
            builder.create_where(black_box(&scoped));
            builder.create_count_sql()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_create_where, bench_statement_assembly);
criterion_main!(benches);
