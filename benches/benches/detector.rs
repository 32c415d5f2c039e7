// Copyright 2025 the Tracery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::Point;
use tracery_detector::{MatchParams, ShapeDetector};
use tracery_shape::Shape;

fn square(side: f64, closed: bool) -> Shape {
    Shape::new(
        vec![
            Point::new(0.0, 0.0),
            Point::new(side, 0.0),
            Point::new(side, side),
            Point::new(0.0, side),
        ],
        closed,
    )
    .unwrap()
}

/// Samples along a polyline, roughly `step` units apart.
fn sample_path(corners: &[Point], step: f64) -> Vec<Point> {
    let mut samples = Vec::new();
    for pair in corners.windows(2) {
        let distance = (pair[1] - pair[0]).hypot();
        let steps = (distance / step).ceil().max(1.0) as usize;
        for i in 1..=steps {
            samples.push(pair[0].lerp(pair[1], i as f64 / steps as f64));
        }
    }
    samples
}

fn bench_open_trace(c: &mut Criterion) {
    let mut group = c.benchmark_group("detector/open_trace");

    // One pointer, one forward hypothesis doing all the work: measures the
    // per-sample cost of the extend/pivot path as sampling density grows.
    for step in [5.0_f64, 2.0, 0.5] {
        let corners = [
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
            Point::new(0.0, 100.0),
        ];
        let samples = sample_path(&corners, step);
        group.throughput(Throughput::Elements(samples.len() as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(samples.len()),
            &samples,
            |b, samples| {
                b.iter_batched(
                    || ShapeDetector::new(square(100.0, false), MatchParams::default()),
                    |mut detector| {
                        detector.pointer_down(0_u32, corners[0]);
                        for &sample in samples {
                            detector.pointer_move(0, sample);
                        }
                        black_box(detector.pointer_up(0));
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

fn bench_closed_seed_fan(c: &mut Criterion) {
    let mut group = c.benchmark_group("detector/closed_seed_fan");

    // A closed shape seeds a hypothesis per vertex per direction, most of
    // which die early: measures the full session with culling included.
    let corners = [
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
        Point::new(100.0, 100.0),
        Point::new(0.0, 100.0),
        Point::new(0.0, 0.0),
    ];
    let samples = sample_path(&corners, 2.0);
    group.throughput(Throughput::Elements(samples.len() as u64));

    group.bench_function("full_loop", |b| {
        b.iter_batched(
            || ShapeDetector::new(square(100.0, true), MatchParams::default()),
            |mut detector| {
                detector.pointer_down(0_u32, corners[0]);
                for &sample in &samples {
                    detector.pointer_move(0, sample);
                }
                black_box(detector.pointer_up(0));
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_open_trace, bench_closed_seed_fan);
criterion_main!(benches);
