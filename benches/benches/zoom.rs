// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Size};
use understory_gesture::TouchEvent;
use understory_zoom::bounds::clamp_origin;
use understory_zoom::{DecayAnimation, ZoomConfig, ZoomOutput, ZoomView};

const CONTAINER: Rect = Rect::new(0.0, 0.0, 400.0, 600.0);
const PANE: Size = Size::new(800.0, 1200.0);

fn view() -> ZoomView {
    let mut view = ZoomView::new(ZoomConfig::default().with_zoom_range(1.0, 5.0))
        .expect("default range is valid");
    view.set_container(CONTAINER);
    view.set_pane_layout(PANE);
    view
}

fn bench_zoom(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_zoom");

    group.bench_function("clamp_origin", |b| {
        let mut x = -2_000.0;
        b.iter(|| {
            x = if x > 2_000.0 { -2_000.0 } else { x + 7.0 };
            black_box(clamp_origin(
                Point::new(x, -x),
                black_box(2.5),
                Some(PANE),
                CONTAINER.size(),
            ))
        });
    });

    group.bench_function("drag_session(n=256)", |b| {
        b.iter_batched(
            view,
            |mut view| {
                let start = Point::new(300.0, 400.0);
                view.touch_start(&TouchEvent::single(start, 0));
                for i in 1..256_u32 {
                    let p = Point::new(300.0 - f64::from(i), 400.0 - f64::from(i));
                    black_box(view.touch_move(
                        &TouchEvent::single(p, u64::from(i) * 8).with_gesture_delta(p - start),
                    ));
                }
                black_box(view.touch_end(&TouchEvent::release(Point::new(45.0, 145.0), 2_048)));
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("fling_to_rest", |b| {
        b.iter_batched(
            || {
                let mut view = view();
                let from = Point::new(300.0, 400.0);
                let to = Point::new(260.0, 370.0);
                view.touch_start(&TouchEvent::single(from, 0));
                view.touch_move(&TouchEvent::single(to, 60).with_gesture_delta(to - from));
                let out = view.touch_end(&TouchEvent::release(to, 80));
                let request = out.iter().find_map(|o| match o {
                    ZoomOutput::StartFling(r) => Some(*r),
                    _ => None,
                });
                (view, request.expect("flick should fling"))
            },
            |(mut view, request)| {
                let mut anim = DecayAnimation::from_request(&request);
                loop {
                    let frame = anim.step(16);
                    if frame.settled {
                        black_box(view.fling_settled(request.id, frame.value));
                        break;
                    }
                    black_box(view.fling_frame(request.id, frame.value));
                }
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_zoom);
criterion_main!(benches);
