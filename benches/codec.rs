//! Benchmarks for the EAN-13 codec.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use barcode_worker::service::ean13;

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");
    group.bench_function("valid", |b| {
        b.iter(|| ean13::validate(black_box("4006381333931")));
    });
    group.bench_function("mismatch", |b| {
        b.iter(|| ean13::validate(black_box("4006381333930")));
    });
    group.bench_function("wrong_length", |b| {
        b.iter(|| ean13::validate(black_box("123")));
    });
    group.finish();
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    group.bench_function("compose", |b| {
        b.iter(|| ean13::compose(black_box("789"), black_box(1_700_000_123_456), black_box(42)));
    });
    group.bench_function("generate", |b| {
        b.iter(|| ean13::generate(black_box("789")));
    });
    group.finish();
}

criterion_group!(benches, bench_validate, bench_generate);
criterion_main!(benches);
