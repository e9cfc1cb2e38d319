//! Pose sampling cost per strategy and preview size.

use std::hint::black_box;

use axis_interp_core::{AnimationTime, InterpolationAxis, Pose, RotationStrategy, Vector3};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

const FRAME_COUNTS: &[usize] = &[10, 100, 1000];

fn sample_axis(strategy: RotationStrategy) -> InterpolationAxis {
    let start = Pose::from_euler(Vector3::new(-20.0, 0.0, 10.0), Vector3::new(10.0, 20.0, 30.0));
    let end = Pose::from_euler(Vector3::new(20.0, 0.0, -10.0), Vector3::new(120.0, -45.0, 80.0));
    let length = AnimationTime::from_nanos(7_000_000_000);
    match InterpolationAxis::new(start, end, strategy, length) {
        Ok(axis) => axis,
        Err(err) => panic!("bench axis: {err}"),
    }
}

fn strategies() -> [(&'static str, RotationStrategy); 3] {
    [
        ("euler", RotationStrategy::Euler),
        ("lerp", RotationStrategy::lerp()),
        ("slerp", RotationStrategy::slerp()),
    ]
}

fn pose_at(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("pose_at");
    for (name, strategy) in strategies() {
        let axis = sample_axis(strategy);
        group.bench_function(name, |bencher| {
            let mut nanos = 0u64;
            bencher.iter(|| {
                nanos = (nanos + 1_234_567) % 7_000_000_000;
                black_box(axis.pose_at(AnimationTime::from_nanos(black_box(nanos))))
            });
        });
    }
    group.finish();
}

fn show_all_frames(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("show_all_frames");
    for (name, strategy) in strategies() {
        let mut axis = sample_axis(strategy);
        for n in FRAME_COUNTS {
            group.bench_with_input(BenchmarkId::new(name, n), n, |bencher, n| {
                bencher.iter(|| black_box(axis.show_all_frames(*n).len()));
            });
        }
    }
    group.finish();
}

criterion_group!(benches, pose_at, show_all_frames);
criterion_main!(benches);
