use criterion::{black_box, criterion_group, criterion_main, Criterion};
use heart_core::{Easer, SimpleCurve, Vec2};

fn bench_curve_point_1000(c: &mut Criterion) {
    let curve = SimpleCurve::new(Vec2::new(-40.0, 10.0), Vec2::new(120.0, -30.0), Vec2::new(30.0, 80.0));
    c.bench_function("curve_point_1000", |b| {
        b.iter(|| {
            for i in 0..1000 {
                black_box(curve.point(i as f32 / 1000.0));
            }
        });
    });
}

fn bench_curve_length_10(c: &mut Criterion) {
    let curve = SimpleCurve::new(Vec2::new(-40.0, 10.0), Vec2::new(120.0, -30.0), Vec2::new(30.0, 80.0));
    c.bench_function("curve_length_parametric_10", |b| {
        b.iter(|| black_box(curve.length_parametric(10)));
    });
}

fn bench_all_easers(c: &mut Criterion) {
    c.bench_function("all_easers_100_samples", |b| {
        b.iter(|| {
            for easer in Easer::ALL {
                for i in 0..100 {
                    black_box(easer.apply(i as f32 / 100.0));
                }
            }
        });
    });
}

criterion_group!(benches, bench_curve_point_1000, bench_curve_length_10, bench_all_easers);
criterion_main!(benches);
