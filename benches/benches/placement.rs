// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Insets, Rect, Size};
use understory_placement::engine::{
    compute_caret_position, compute_overlay_position, evaluate_fit, resolve_placement,
};
use understory_placement::{
    AnchorMeasurement, InputEvent, Placement, PlacementConfig, PositionController, resolve,
};

const VIEWPORT: Size = Size::new(390.0, 844.0);

/// Notch and home-indicator insets of a typical phone in portrait.
fn insets() -> Insets {
    Insets::new(0.0, 47.0, 0.0, 34.0)
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1_u64 << 53) as f64)
    }
}

/// Anchors scattered over (and slightly past) the viewport, so every
/// fallback and clamping branch gets exercised.
fn gen_random_anchors(count: usize) -> Vec<AnchorMeasurement> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| {
            let w = 16.0 + rng.next_f64() * 120.0;
            let h = 16.0 + rng.next_f64() * 40.0;
            let x = rng.next_f64() * (VIEWPORT.width + 40.0) - 20.0;
            let y = rng.next_f64() * (VIEWPORT.height + 40.0) - 20.0;
            AnchorMeasurement::new(0.0, 0.0, w, h, x, y)
        })
        .collect()
}

fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine");
    let overlay = Size::new(220.0, 96.0);
    let insets = insets();
    for &n in &[256_usize, 4096] {
        let anchors = gen_random_anchors(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("steps_n{n}"), |b| {
            b.iter(|| {
                for anchor in &anchors {
                    let fit = evaluate_fit(anchor, overlay, VIEWPORT, 6.0, insets);
                    let placement = resolve_placement(Placement::Top, false, fit);
                    let caret = compute_caret_position(VIEWPORT, anchor, 6.0, placement, insets);
                    let size = if caret.hidden { 0.0 } else { 6.0 };
                    black_box(compute_overlay_position(
                        VIEWPORT, overlay, anchor, size, placement, insets,
                    ));
                }
            });
        });
        let config = PlacementConfig::default();
        group.bench_function(format!("resolve_n{n}"), |b| {
            b.iter(|| {
                for anchor in &anchors {
                    black_box(resolve(anchor, overlay, VIEWPORT, insets, &config, 0.5));
                }
            });
        });
    }
    group.finish();
}

fn bench_controller(c: &mut Criterion) {
    let mut group = c.benchmark_group("controller");
    let anchors = gen_random_anchors(1024);
    group.throughput(Throughput::Elements(anchors.len() as u64));

    // One open cycle per anchor: measure, lay out, commit.
    group.bench_function("open_commit", |b| {
        b.iter_batched(
            || PositionController::new(VIEWPORT, PlacementConfig::default()).unwrap(),
            |mut controller| {
                for anchor in &anchors {
                    controller.set_anchor(*anchor);
                    controller.set_overlay_layout(Rect::new(0.0, 0.0, 220.0, 96.0));
                    black_box(controller.commit());
                }
            },
            BatchSize::SmallInput,
        );
    });

    // Content resizing while open: several layout events folded into each commit.
    group.bench_function("batched_layout_events", |b| {
        b.iter_batched(
            || {
                let mut controller =
                    PositionController::new(VIEWPORT, PlacementConfig::default()).unwrap();
                controller.set_anchor(anchors[0]);
                controller
            },
            |mut controller| {
                for (i, anchor) in anchors.iter().enumerate() {
                    let grow = (i % 8) as f64 * 12.0;
                    let update = controller.handle([
                        InputEvent::AnchorMeasured(*anchor),
                        InputEvent::OverlayLaidOut(Rect::new(0.0, 0.0, 120.0 + grow, 40.0)),
                        InputEvent::OverlayLaidOut(Rect::new(0.0, 0.0, 140.0 + grow, 60.0)),
                    ]);
                    black_box(update.ok());
                }
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_engine, bench_controller);
criterion_main!(benches);
