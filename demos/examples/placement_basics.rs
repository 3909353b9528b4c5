// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement basics.
//!
//! Walk one anchor through the engine step by step, then force a placement
//! that does not fit and watch the overlay get clamped.
//!
//! Run:
//! - `cargo run -p understory_placement_demos --example placement_basics`

use kurbo::{Insets, Size};
use understory_placement::engine::{
    compute_caret_position, compute_overlay_position, evaluate_fit, legal_overlay_range,
    resolve_placement,
};
use understory_placement::geometry::overlay_content_padding;
use understory_placement::{AnchorMeasurement, DEFAULT_CARET_SIZE, Placement};

fn main() {
    let viewport = Size::new(400.0, 800.0);
    let overlay = Size::new(100.0, 40.0);
    let insets = Insets::ZERO;
    let caret = DEFAULT_CARET_SIZE;

    // An anchor close to the top edge: `top` has no room.
    let anchor = AnchorMeasurement::new(0.0, 0.0, 50.0, 20.0, 175.0, 30.0);
    let fit = evaluate_fit(&anchor, overlay, viewport, caret, insets);
    println!("fit: {fit:?}");

    let placement = resolve_placement(Placement::Top, false, fit);
    println!("requested top, placed {placement}");
    assert_eq!(placement, Placement::Bottom, "top is blocked, bottom fits");

    let caret_pos = compute_caret_position(viewport, &anchor, caret, placement, insets);
    let content = compute_overlay_position(
        viewport,
        overlay,
        &anchor,
        if caret_pos.hidden { 0.0 } else { caret },
        placement,
        insets,
    );
    println!("overlay: {content:?}");
    println!("caret:   {caret_pos:?}");
    println!("content padding: {}", overlay_content_padding(caret));

    // Forcing `top` keeps the side but clamps the overlay to the safe edge.
    let forced = resolve_placement(Placement::Top, true, fit);
    let clamped = compute_overlay_position(viewport, overlay, &anchor, caret, forced, insets);
    let range = legal_overlay_range(viewport, overlay, insets);
    println!("forced top: {clamped:?} within {range:?}");
    assert_eq!(clamped.top, range.min_top, "overlay pinned to the top safe edge");
}
