// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Vec2};
use understory_gesture::{GestureAccumulator, GestureConfig, TouchEvent, TouchSnapshot};

/// Two fingers spreading apart and turning, `n` samples long.
fn pinch_samples(n: u32) -> Vec<TouchEvent> {
    (0..n)
        .map(|i| {
            let f = f64::from(i);
            let b = Point::new(100.0 + f, 0.5 * f);
            TouchEvent::new(TouchSnapshot::from_points([Point::ORIGIN, b]), u64::from(i) * 16)
        })
        .collect()
}

fn drag_samples(n: u32) -> Vec<TouchEvent> {
    (0..n)
        .map(|i| {
            let d = Vec2::new(f64::from(i), f64::from(i) * 0.5);
            TouchEvent::single(Point::ORIGIN + d, u64::from(i) * 16).with_gesture_delta(d)
        })
        .collect()
}

fn bench_accumulator(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_gesture");

    for &n in &[64_u32, 1_024_u32] {
        let pinch = pinch_samples(n);
        group.bench_function(format!("pinch_rotate_session(n={n})"), |b| {
            b.iter_batched(
                || GestureAccumulator::new(GestureConfig::default()),
                |mut acc| {
                    acc.begin(&pinch[0]);
                    for sample in &pinch[1..] {
                        black_box(acc.update(sample));
                    }
                    black_box(acc.transform());
                },
                BatchSize::SmallInput,
            );
        });

        let drag = drag_samples(n);
        group.bench_function(format!("drag_session(n={n})"), |b| {
            b.iter_batched(
                || GestureAccumulator::new(GestureConfig::default()),
                |mut acc| {
                    acc.begin(&drag[0]);
                    for sample in &drag[1..] {
                        black_box(acc.update(sample));
                    }
                    black_box(acc.transform());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_accumulator);
criterion_main!(benches);
