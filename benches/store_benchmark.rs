use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use coursedb::core::sort::{sort_records, SortKey, SortOrder};
use coursedb::core::stats::compute_stats;
use coursedb::core::store::Store;
use coursedb::core::types::Student;
use coursedb::query::ast::{FindFilter, MarkOp, TextOp};
use coursedb::query::matcher::filter_records;
use coursedb::query::parser::CommandParser;
use rand::Rng;

const PROGRAMMES: [&str; 5] = [
    "Computer Science",
    "Software Engineering",
    "Digital Supply Chain",
    "Applied AI",
    "Cybersecurity",
];

/// Helper to create a store of random students with unique IDs
fn create_store(size: usize) -> Store {
    let mut rng = rand::thread_rng();
    let mut store = Store::new();
    for i in 0..size {
        let student = Student::new(
            1_000_000 + i as u32,
            &format!("Student {}", i),
            PROGRAMMES[rng.gen_range(0..PROGRAMMES.len())],
            rng.gen_range(0.0..=100.0),
        );
        store.insert(student).unwrap();
    }
    store
}

/// Insert cost grows with the duplicate scan
fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    for size in [100, 1_000, 5_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| black_box(create_store(size)));
        });
    }

    group.finish();
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");
    let store = create_store(5_000);

    for (label, key, order) in [
        ("id_asc", SortKey::Id, SortOrder::Ascending),
        ("mark_asc", SortKey::Mark, SortOrder::Ascending),
        ("mark_desc", SortKey::Mark, SortOrder::Descending),
    ] {
        group.bench_function(label, |b| {
            b.iter_batched(
                || store.records().to_vec(),
                |mut records| sort_records(&mut records, key, order),
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_stats(c: &mut Criterion) {
    let store = create_store(10_000);
    c.bench_function("compute_stats_10k", |b| {
        b.iter(|| black_box(compute_stats(store.records())));
    });
}

fn bench_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("find");
    let store = create_store(10_000);

    let filters = [
        ("mark_ge", FindFilter::Mark(MarkOp::Ge, 85.0)),
        ("mark_eq", FindFilter::Mark(MarkOp::Eq, 50.0)),
        ("programme_contains", FindFilter::Programme(TextOp::Contains, "science".to_string())),
        ("name_equals", FindFilter::Name(TextOp::Equals, "student 42".to_string())),
    ];

    for (label, filter) in filters.iter() {
        group.bench_function(*label, |b| {
            b.iter(|| black_box(filter_records(store.records(), filter)));
        });
    }

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let parser = CommandParser;
    let line = r#"UPDATE ID=2301234 Name="Joshua Chen" Programme="Software Engineering" Mark=70.5"#;
    c.bench_function("parse_update", |b| {
        b.iter(|| black_box(parser.parse(black_box(line)).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_insert,
    bench_sort,
    bench_stats,
    bench_find,
    bench_parse
);
criterion_main!(benches);
