//! # Reading Pipeline Benchmarks
//!
//! Measures the per-read numeric work: AQI lookup, outlier-rejecting
//! smoothing, confidence scoring and compensation. Pin sampling is excluded;
//! it is dominated by the sampling window.
//!
//! Run: `cargo bench --bench pipeline`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use airsense_core::{
    aqi::AqiCalculator,
    compensation::EnvironmentalCompensator,
    config::ManagerConfig,
    manager::SensorManager,
    quality::QualityScorer,
    reading::{BaseValues, Quantity},
    smoothing::SmoothingWindow,
};

fn bench_aqi(c: &mut Criterion) {
    let mut group = c.benchmark_group("aqi");
    let calc = AqiCalculator::new();

    for pm25 in [5.0, 40.0, 180.0, 600.0] {
        group.bench_with_input(BenchmarkId::new("calculate", pm25), &pm25, |b, &pm25| {
            b.iter(|| black_box(calc.calculate(black_box(pm25), black_box(pm25 * 1.5))))
        });
    }

    group.finish();
}

fn filled_window<const N: usize>() -> SmoothingWindow<N> {
    let mut window = SmoothingWindow::new(BaseValues::default());
    for i in 0..N {
        let spike = if i % 7 == 0 { 60.0 } else { 0.0 };
        window.push(Quantity::Pm25, 18.0 + (i % 3) as f64 + spike).ok();
        window.push(Quantity::Pm10, 42.0 + (i % 5) as f64).ok();
    }
    window
}

fn bench_smoothing(c: &mut Criterion) {
    let mut group = c.benchmark_group("smoothing");

    let w10: SmoothingWindow<10> = filled_window();
    group.bench_function("average_10", |b| {
        b.iter(|| black_box(w10.average(black_box(Quantity::Pm25))))
    });

    let w64: SmoothingWindow<64> = filled_window();
    group.bench_function("average_64", |b| {
        b.iter(|| black_box(w64.average(black_box(Quantity::Pm25))))
    });

    let scorer = QualityScorer::new();
    group.bench_function("quality_score_10", |b| {
        b.iter(|| black_box(scorer.score(black_box(&w10))))
    });

    group.finish();
}

fn bench_compensation(c: &mut Criterion) {
    let compensator = EnvironmentalCompensator::default();
    c.bench_function("compensate", |b| {
        b.iter(|| {
            black_box(compensator.compensate(
                black_box(22.0),
                black_box(48.0),
                black_box(Some(31.0)),
                black_box(Some(72.0)),
            ))
        })
    });
}

fn bench_simulated_read(c: &mut Criterion) {
    let manager: SensorManager = SensorManager::simulated(ManagerConfig::default().with_seed(1));
    c.bench_function("simulated_read", |b| b.iter(|| black_box(manager.read())));
}

criterion_group!(
    benches,
    bench_aqi,
    bench_smoothing,
    bench_compensation,
    bench_simulated_read
);
criterion_main!(benches);
