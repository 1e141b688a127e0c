use criterion::{black_box, criterion_group, criterion_main, Criterion};
use urania::aspects::AspectCalculator;
use urania::ephemeris::{Body, BodyPosition};

fn bench_calculate_aspect(c: &mut Criterion) {
    let calculator = AspectCalculator::default();

    c.bench_function("calculate_aspect", |b| {
        b.iter(|| calculator.calculate_aspect(black_box(100.0), black_box(222.5)))
    });
}

fn bench_compute_aspects(c: &mut Criterion) {
    let calculator = AspectCalculator::default();
    let bodies = Body::ALL.map(|body| BodyPosition {
        body,
        longitude: body.index() as f64 * 31.0,
        retrograde: false,
    });

    c.bench_function("compute_aspects_ten_bodies", |b| {
        b.iter(|| calculator.compute_aspects(black_box(&bodies)))
    });
}

criterion_group!(benches, bench_calculate_aspect, bench_compute_aspects);
criterion_main!(benches);
