//! Benchmarks for placement noise.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use stray_noise::{
    OffsetNoise, PositionNoise, ScaleNoise, SizeNoise, position_jitter, size_jitter,
};

fn bench_raw(c: &mut Criterion) {
    c.bench_function("position_jitter", |b| {
        b.iter(|| position_jitter(black_box(12), black_box(345)))
    });

    c.bench_function("size_jitter", |b| {
        b.iter(|| size_jitter(black_box(12), black_box(345)))
    });
}

fn bench_scaled(c: &mut Criterion) {
    let position = PositionNoise::new(10.0);
    let size = SizeNoise::new(0.5);

    c.bench_function("position_noise_1k", |b| {
        b.iter(|| {
            (0..1000)
                .map(|i| position.offset(black_box(i / 100), black_box(i % 100)).x)
                .sum::<f32>()
        })
    });

    c.bench_function("size_noise_1k", |b| {
        b.iter(|| {
            (0..1000)
                .map(|i| size.factor(black_box(i / 100), black_box(i % 100)))
                .sum::<f32>()
        })
    });
}

criterion_group!(benches, bench_raw, bench_scaled);
criterion_main!(benches);
