// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Controller events.
//!
//! Feed a position controller the events a host would send while an overlay
//! is open: measurement, layout, rotation, and a configuration change. Each
//! batch is committed once.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_placement_demos --example controller_events`

use kurbo::{Insets, Rect, Size};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use understory_placement::{
    AnchorMeasurement, InputEvent, Placement, PlacementConfig, PositionController, PositionUpdate,
};

fn report(label: &str, update: Option<PositionUpdate>) {
    match update {
        Some(u) => info!(
            placement = %u.placement,
            left = u.current.content.left,
            top = u.current.content.top,
            caret = ?u.caret,
            changed = ?u.changed,
            "{label}"
        ),
        None => info!("{label}: nothing published"),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut controller = PositionController::new(
        Size::new(390.0, 844.0),
        PlacementConfig::default().with_caret_size(10.0),
    )
    .expect("valid configuration");

    // The overlay opens: the anchor is measured, but the overlay has not rendered yet.
    let anchor = AnchorMeasurement::new(8.0, 12.0, 64.0, 32.0, 300.0, 60.0);
    let update = controller
        .handle([
            InputEvent::InsetsChanged(Insets::new(0.0, 47.0, 0.0, 34.0)),
            InputEvent::AnchorMeasured(anchor),
        ])
        .expect("valid events");
    report("opened", update);
    assert!(controller.content_position().is_none());

    // First layout pass, then the content grows before the next frame.
    let update = controller
        .handle([
            InputEvent::OverlayLaidOut(Rect::new(0.0, 0.0, 180.0, 48.0)),
            InputEvent::OverlayLaidOut(Rect::new(0.0, 0.0, 200.0, 72.0)),
        ])
        .expect("valid events");
    report("laid out", update);

    // Rotate to landscape.
    let update = controller
        .handle([
            InputEvent::ViewportResized(Size::new(844.0, 390.0)),
            InputEvent::InsetsChanged(Insets::new(47.0, 0.0, 47.0, 21.0)),
            InputEvent::AnchorMeasured(AnchorMeasurement { page_x: 600.0, ..anchor }),
        ])
        .expect("valid events");
    report("rotated", update);

    // Ask for the left side without a caret.
    let config = PlacementConfig::default()
        .with_placement(Placement::Left)
        .with_hide_caret(true);
    let update = controller
        .handle([InputEvent::ConfigChanged(config)])
        .expect("valid events");
    report("reconfigured", update);

    // Invalid configuration is rejected and nothing changes.
    let rejected = controller.handle([InputEvent::ConfigChanged(
        PlacementConfig::default().with_caret_size(-4.0),
    )]);
    if let Err(err) = &rejected {
        warn!(%err, "configuration rejected");
    }
    assert!(rejected.is_err());
}
