use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quizclock_core::parser::{parse_questions, validate_questions};

fn problems_csv(rows: usize) -> String {
    let mut s = String::new();
    for i in 0..rows {
        s.push_str(&format!("{i}+{i},{}\n", i * 2));
    }
    s
}

fn bench_parse_questions(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_questions");
    let origin = Path::new("bench.csv");

    let small = problems_csv(12);
    let large = problems_csv(5_000);
    let quoted = {
        let mut s = String::new();
        for i in 0..500 {
            s.push_str(&format!("\"what is {i}, doubled?\",\"{}\"\n", i * 2));
        }
        s
    };

    group.bench_function("small", |b| {
        b.iter(|| parse_questions(black_box(small.as_bytes()), origin))
    });

    group.bench_function("large", |b| {
        b.iter(|| parse_questions(black_box(large.as_bytes()), origin))
    });

    group.bench_function("quoted", |b| {
        b.iter(|| parse_questions(black_box(quoted.as_bytes()), origin))
    });

    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let set = parse_questions(problems_csv(5_000).as_bytes(), Path::new("bench.csv"))
        .expect("bench input parses");

    c.bench_function("validate_questions", |b| {
        b.iter(|| validate_questions(black_box(&set)))
    });
}

criterion_group!(benches, bench_parse_questions, bench_validate);
criterion_main!(benches);
