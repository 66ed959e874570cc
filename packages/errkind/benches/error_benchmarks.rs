//! Benchmarks for error construction and client rendering

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use errkind::{ClassifiedError, ErrorBuilder, Kind};
use std::hint::black_box;
use std::io;

/// Construction cost, dominated by stack capture
fn benchmark_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");

    group.bench_function("new", |b| {
        b.iter(|| black_box(ClassifiedError::new(Kind::Request, "bad input")));
    });

    group.bench_function("wrap_foreign", |b| {
        b.iter(|| {
            black_box(ClassifiedError::wrap(
                io::Error::other("reset"),
                Kind::Io,
                "reading body",
            ))
        });
    });

    let base = ClassifiedError::new(Kind::Domain, "base");
    group.bench_function("same_kind_rewrap", |b| {
        b.iter(|| black_box(ClassifiedError::wrap(base.clone(), Kind::Domain, "again")));
    });

    group.finish();
}

/// JSON rendering for request and redacted errors
fn benchmark_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialization");

    let mut nested = ClassifiedError::wrap(io::Error::other("root"), Kind::Request, "layer");
    for depth in 0..8 {
        nested = nested.with_msg(format!("layer {depth}"));
    }
    let redacted = ClassifiedError::wrap(io::Error::other("secret"), Kind::Io, "failed");

    group.bench_function("request_nested", |b| {
        b.iter(|| black_box(nested.marshal_json()));
    });
    group.bench_function("redacted", |b| {
        b.iter(|| black_box(redacted.marshal_json()));
    });

    for keys in [4usize, 64] {
        let errb = ErrorBuilder::new();
        for idx in 0..keys {
            errb.fork_index(idx).put("field", "invalid");
        }
        let Some(err) = errb.to_error() else {
            continue;
        };
        group.bench_with_input(BenchmarkId::new("aggregate", keys), &err, |b, err| {
            b.iter(|| black_box(err.marshal_json()));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_construction, benchmark_serialization);
criterion_main!(benches);
