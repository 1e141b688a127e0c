use criterion::{black_box, criterion_group, criterion_main, Criterion};
use urania::ephemeris::{compute_houses, AnalyticEphemeris, EphemerisBackend, HouseSystem};
use urania::{compute_chart, BirthInput, JulianDay};

fn bench_body_positions(c: &mut Criterion) {
    let backend = AnalyticEphemeris::new();
    let jd = JulianDay::new(2_448_000.5);

    c.bench_function("analytic_body_positions", |b| {
        b.iter(|| backend.body_positions(black_box(jd)))
    });
}

fn bench_houses(c: &mut Criterion) {
    let jd = JulianDay::new(2_448_000.5);

    c.bench_function("houses_simplified", |b| {
        b.iter(|| compute_houses(black_box(jd), 40.7, -74.0, HouseSystem::Simplified))
    });
    c.bench_function("houses_placidus", |b| {
        b.iter(|| compute_houses(black_box(jd), 40.7, -74.0, HouseSystem::Placidus))
    });
}

fn bench_compute_chart(c: &mut Criterion) {
    let input = BirthInput {
        year: 1990,
        month: 6,
        day: 15,
        hour: 14,
        minute: 30,
        latitude: 40.7128,
        longitude: -74.006,
        timezone: "America/New_York".to_string(),
        name: None,
    };

    c.bench_function("compute_chart", |b| b.iter(|| compute_chart(black_box(&input))));
}

criterion_group!(benches, bench_body_positions, bench_houses, bench_compute_chart);
criterion_main!(benches);
