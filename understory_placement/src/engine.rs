// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement engine: fit evaluation, fallback, legal ranges, and final positions.
//!
//! ## Overview
//!
//! Every function here is pure: the same inputs always give the same outputs,
//! and nothing is cached between calls. All coordinates are page-absolute.
//!
//! ## Pipeline
//!
//! 1) [`evaluate_fit`] checks each side of the anchor for enough room.
//! 2) [`resolve_placement`] keeps the requested side or flips to the opposite one.
//! 3) [`compute_caret_position`] places the caret, hiding it if it would leave
//!    [`legal_caret_range`].
//! 4) [`compute_overlay_position`] places the overlay and clamps it into
//!    [`legal_overlay_range`].
//!
//! The [`controller`](crate::controller) runs these steps in that order.
//!
//! ## Fallback is single-axis
//!
//! A blocked side only ever flips to its opposite (top↔bottom, left↔right).
//! When neither side of the axis fits, the requested side is kept and clamping
//! keeps the overlay on screen, possibly over the anchor.

use kurbo::{Insets, Size};

use crate::geometry::{
    BORDER_SPACE_SIZE, PADDING_SPACE_SIZE, SAFE_CARET_PADDING_SIZE_RATIO, caret_width,
    clamp_min_wins, diff_caret_position,
};
use crate::types::{AnchorMeasurement, Placement, Position};

/// Which sides of the anchor have room for the overlay.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Fit {
    /// Room above the anchor.
    pub top: bool,
    /// Room below the anchor.
    pub bottom: bool,
    /// Room left of the anchor.
    pub left: bool,
    /// Room right of the anchor.
    pub right: bool,
}

impl Fit {
    /// Whether the given side has room.
    pub const fn fits(&self, placement: Placement) -> bool {
        match placement {
            Placement::Top => self.top,
            Placement::Bottom => self.bottom,
            Placement::Left => self.left,
            Placement::Right => self.right,
        }
    }
}

/// Evaluate which sides of `anchor` can hold an overlay of size `overlay`.
///
/// The clearance a side needs is the overlay's extent on that axis plus the
/// caret footprint and the anchor and border gaps. Space is measured from the
/// anchor's page origin to the viewport edge minus the matching inset.
pub fn evaluate_fit(
    anchor: &AnchorMeasurement,
    overlay: Size,
    viewport: Size,
    caret_size: f64,
    insets: Insets,
) -> Fit {
    let gaps = caret_width(caret_size) + PADDING_SPACE_SIZE + BORDER_SPACE_SIZE;
    let need_height = overlay.height + gaps;
    let need_width = overlay.width + gaps;

    Fit {
        top: anchor.page_y > need_height + insets.y0,
        bottom: viewport.height - anchor.page_y > need_height + insets.y1,
        left: anchor.page_x > need_width + insets.x0,
        right: viewport.width - anchor.page_x > need_width + insets.x1,
    }
}

/// Pick the side the overlay is finally placed on.
///
/// With `force` the requested side is returned as is. Otherwise a side that
/// does not fit flips to its opposite if that one fits.
pub fn resolve_placement(requested: Placement, force: bool, fit: Fit) -> Placement {
    if force {
        return requested;
    }
    let opposite = requested.opposite();
    if !fit.fits(requested) && fit.fits(opposite) {
        opposite
    } else {
        requested
    }
}

/// Inclusive band of legal top-left coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct LegalRange {
    /// Smallest legal `top`.
    pub min_top: f64,
    /// Largest legal `top`.
    pub max_top: f64,
    /// Smallest legal `left`.
    pub min_left: f64,
    /// Largest legal `left`.
    pub max_left: f64,
}

impl LegalRange {
    /// Whether `top` lies within `[min_top, max_top]`.
    pub fn contains_top(&self, top: f64) -> bool {
        top >= self.min_top && top <= self.max_top
    }

    /// Whether `left` lies within `[min_left, max_left]`.
    pub fn contains_left(&self, left: f64) -> bool {
        left >= self.min_left && left <= self.max_left
    }

    /// Whether both coordinates of `position` are legal.
    pub fn contains(&self, position: Position) -> bool {
        self.contains_top(position.top) && self.contains_left(position.left)
    }

    /// Clamp each axis of `position` into the band.
    ///
    /// When a band is inverted (the element is larger than the space) the
    /// minimum wins, pinning the element to the top or left safe edge.
    #[must_use]
    pub fn clamp(&self, position: Position) -> Position {
        Position {
            top: clamp_min_wins(position.top, self.min_top, self.max_top),
            left: clamp_min_wins(position.left, self.min_left, self.max_left),
            hidden: position.hidden,
        }
    }

    fn shrink(self, start: f64, end: f64) -> Self {
        Self {
            min_top: self.min_top + start,
            max_top: self.max_top - end,
            min_left: self.min_left + start,
            max_left: self.max_left - end,
        }
    }
}

/// The screen band every element must stay in: the viewport minus the safe-area
/// insets and the border gap on each side.
pub fn legal_screen_range(viewport: Size, insets: Insets) -> LegalRange {
    LegalRange {
        min_top: BORDER_SPACE_SIZE + insets.y0,
        max_top: viewport.height - (BORDER_SPACE_SIZE + insets.y1),
        min_left: BORDER_SPACE_SIZE + insets.x0,
        max_left: viewport.width - (BORDER_SPACE_SIZE + insets.x1),
    }
}

/// Legal top-left coordinates for an overlay of size `overlay`, keeping its far
/// edges inside the screen band as well.
pub fn legal_overlay_range(viewport: Size, overlay: Size, insets: Insets) -> LegalRange {
    let screen = legal_screen_range(viewport, insets);
    LegalRange {
        max_top: screen.max_top - overlay.height,
        max_left: screen.max_left - overlay.width,
        ..screen
    }
}

/// Legal top-left coordinates for the unrotated caret square.
///
/// The band is the screen band shrunk at both ends by the rotation offset and a
/// safety margin of [`SAFE_CARET_PADDING_SIZE_RATIO`] caret widths, and at the
/// far end by one more caret width.
pub fn legal_caret_range(viewport: Size, caret_size: f64, insets: Insets) -> LegalRange {
    let width = caret_width(caret_size);
    let margin = diff_caret_position(caret_size, width) + width * SAFE_CARET_PADDING_SIZE_RATIO;
    legal_screen_range(viewport, insets).shrink(margin, margin + width)
}

/// Final top-left position of the overlay box.
///
/// The overlay is offset from the anchor's page origin towards `placement`,
/// centred on the anchor along the other axis, then clamped into
/// [`legal_overlay_range`]. The result is never hidden; pass a `caret_size` of
/// zero to place an overlay without a caret.
///
/// When the overlay is larger than the legal band the minimum bound wins, so
/// the result is pinned to the top or left safe edge and lies outside the band.
pub fn compute_overlay_position(
    viewport: Size,
    overlay: Size,
    anchor: &AnchorMeasurement,
    caret_size: f64,
    placement: Placement,
    insets: Insets,
) -> Position {
    let half_caret = caret_width(caret_size) * 0.5;
    let mut top = anchor.page_y;
    let mut left = anchor.page_x;

    match placement {
        Placement::Top => {
            top -= overlay.height + half_caret + PADDING_SPACE_SIZE;
            left += (anchor.width - overlay.width) * 0.5;
        }
        Placement::Bottom => {
            top += anchor.height + half_caret + PADDING_SPACE_SIZE;
            left += (anchor.width - overlay.width) * 0.5;
        }
        Placement::Left => {
            top += (anchor.height - overlay.height) * 0.5;
            left -= overlay.width + half_caret + PADDING_SPACE_SIZE;
        }
        Placement::Right => {
            top += (anchor.height - overlay.height) * 0.5;
            left += anchor.width + half_caret + PADDING_SPACE_SIZE;
        }
    }

    legal_overlay_range(viewport, overlay, insets).clamp(Position::new(top, left))
}

/// Final top-left position of the unrotated caret square.
///
/// The caret sits in the gap between anchor and overlay, centred on the anchor.
/// It is never clamped: when either coordinate leaves [`legal_caret_range`] the
/// caret is reported hidden, with its computed coordinates kept.
pub fn compute_caret_position(
    viewport: Size,
    anchor: &AnchorMeasurement,
    caret_size: f64,
    placement: Placement,
    insets: Insets,
) -> Position {
    let width = caret_width(caret_size);
    let diff = diff_caret_position(caret_size, width);
    let mut top = anchor.page_y + diff;
    let mut left = anchor.page_x + diff;

    match placement {
        Placement::Top => {
            top -= width + PADDING_SPACE_SIZE;
            left += (anchor.width - width) * 0.5;
        }
        Placement::Bottom => {
            top += anchor.height + PADDING_SPACE_SIZE;
            left += (anchor.width - width) * 0.5;
        }
        Placement::Left => {
            top += (anchor.height - width) * 0.5;
            left -= width + PADDING_SPACE_SIZE;
        }
        Placement::Right => {
            top += (anchor.height - width) * 0.5;
            left += anchor.width + PADDING_SPACE_SIZE;
        }
    }

    let position = Position::new(top, left);
    if legal_caret_range(viewport, caret_size, insets).contains(position) {
        position
    } else {
        position.into_hidden()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size::new(400.0, 800.0);
    const OVERLAY: Size = Size::new(100.0, 40.0);

    fn anchor_at(page_x: f64, page_y: f64) -> AnchorMeasurement {
        AnchorMeasurement::new(0.0, 0.0, 50.0, 20.0, page_x, page_y)
    }

    #[track_caller]
    fn assert_close(actual: f64, expected: f64) {
        let d = actual - expected;
        assert!(
            d < 1e-9 && d > -1e-9,
            "expected {expected}, got {actual}"
        );
    }

    // Anchor in the upper middle of a phone-sized viewport, default caret.
    #[test]
    fn roomy_anchor_keeps_top() {
        let anchor = anchor_at(175.0, 100.0);
        let fit = evaluate_fit(&anchor, OVERLAY, VIEWPORT, 6.0, Insets::ZERO);
        assert!(fit.top, "100 > 40 + 8.484 + 5 + 5");
        assert!(fit.bottom && fit.left && fit.right);
        let placement = resolve_placement(Placement::Top, false, fit);
        assert_eq!(placement, Placement::Top);

        let p = compute_overlay_position(VIEWPORT, OVERLAY, &anchor, 6.0, placement, Insets::ZERO);
        assert_close(p.top, 100.0 - (40.0 + 4.242 + 5.0));
        assert_close(p.left, 150.0);
        assert!(!p.hidden);
        assert!(legal_overlay_range(VIEWPORT, OVERLAY, Insets::ZERO).contains(p));

        let c = compute_caret_position(VIEWPORT, &anchor, 6.0, placement, Insets::ZERO);
        assert_close(c.top, 100.0 + 1.242 - 8.484 - 5.0);
        assert_close(c.left, 197.0);
        assert!(!c.hidden);
    }

    #[test]
    fn anchor_near_top_falls_back_to_bottom() {
        let anchor = anchor_at(175.0, 30.0);
        let fit = evaluate_fit(&anchor, OVERLAY, VIEWPORT, 6.0, Insets::ZERO);
        assert!(!fit.top);
        assert!(fit.bottom);
        assert_eq!(resolve_placement(Placement::Top, false, fit), Placement::Bottom);

        let p = compute_overlay_position(
            VIEWPORT,
            OVERLAY,
            &anchor,
            6.0,
            Placement::Bottom,
            Insets::ZERO,
        );
        assert_close(p.top, 30.0 + 20.0 + 4.242 + 5.0);
    }

    #[test]
    fn forced_placement_is_clamped_to_safe_edge() {
        let anchor = anchor_at(175.0, 30.0);
        let fit = evaluate_fit(&anchor, OVERLAY, VIEWPORT, 6.0, Insets::ZERO);
        let placement = resolve_placement(Placement::Top, true, fit);
        assert_eq!(placement, Placement::Top);
        let p = compute_overlay_position(VIEWPORT, OVERLAY, &anchor, 6.0, placement, Insets::ZERO);
        assert_eq!(p.top, BORDER_SPACE_SIZE);
        assert_close(p.left, 150.0);

        let insets = Insets::new(0.0, 44.0, 0.0, 0.0);
        let p = compute_overlay_position(VIEWPORT, OVERLAY, &anchor, 6.0, placement, insets);
        assert_eq!(p.top, BORDER_SPACE_SIZE + 44.0);
    }

    #[test]
    fn fallback_is_symmetric() {
        let only = |p: Placement| Fit {
            top: p == Placement::Top,
            bottom: p == Placement::Bottom,
            left: p == Placement::Left,
            right: p == Placement::Right,
        };
        for p in Placement::ALL {
            assert_eq!(resolve_placement(p, false, only(p.opposite())), p.opposite());
            assert_eq!(resolve_placement(p, false, only(p)), p);
        }
    }

    #[test]
    fn forced_placement_ignores_fit() {
        let fits = [
            Fit::default(),
            Fit {
                top: true,
                bottom: true,
                left: true,
                right: true,
            },
            Fit {
                bottom: true,
                right: true,
                ..Fit::default()
            },
        ];
        for p in Placement::ALL {
            for fit in fits {
                assert_eq!(resolve_placement(p, true, fit), p);
            }
        }
    }

    // Neither side of the requested axis fits: no diagonal fallback.
    #[test]
    fn blocked_axis_keeps_request() {
        let fit = Fit {
            left: true,
            right: true,
            ..Fit::default()
        };
        assert_eq!(resolve_placement(Placement::Top, false, fit), Placement::Top);
        assert_eq!(
            resolve_placement(Placement::Bottom, false, fit),
            Placement::Bottom
        );
    }

    #[test]
    fn fit_measures_from_page_origin_and_insets() {
        // Clearance needed: 40 + 0 + 5 + 5 = 50 with no caret.
        let anchor = anchor_at(200.0, 60.0);
        let fit = evaluate_fit(&anchor, OVERLAY, VIEWPORT, 0.0, Insets::ZERO);
        assert!(fit.top);
        let fit = evaluate_fit(&anchor, OVERLAY, VIEWPORT, 0.0, Insets::new(0.0, 10.0, 0.0, 0.0));
        assert!(!fit.top, "strictly greater than clearance plus inset");

        let anchor = anchor_at(200.0, 740.0);
        let fit = evaluate_fit(&anchor, OVERLAY, VIEWPORT, 0.0, Insets::ZERO);
        assert!(fit.bottom, "800 - 740 = 60 > 50");
        let fit = evaluate_fit(&anchor, OVERLAY, VIEWPORT, 0.0, Insets::new(0.0, 0.0, 0.0, 10.0));
        assert!(!fit.bottom);

        let anchor = anchor_at(111.0, 400.0);
        let fit = evaluate_fit(&anchor, OVERLAY, VIEWPORT, 0.0, Insets::ZERO);
        assert!(fit.left, "111 > 110");
        assert!(fit.right, "400 - 111 > 110");
        let anchor = anchor_at(290.0, 400.0);
        assert!(!evaluate_fit(&anchor, OVERLAY, VIEWPORT, 0.0, Insets::ZERO).right);
    }

    #[test]
    fn horizontal_placements_centre_vertically() {
        let anchor = anchor_at(200.0, 400.0);
        let left = compute_overlay_position(
            VIEWPORT,
            OVERLAY,
            &anchor,
            6.0,
            Placement::Left,
            Insets::ZERO,
        );
        assert_close(left.top, 400.0 + (20.0 - 40.0) * 0.5);
        assert_close(left.left, 200.0 - (100.0 + 4.242 + 5.0));

        let right = compute_overlay_position(
            VIEWPORT,
            OVERLAY,
            &anchor,
            6.0,
            Placement::Right,
            Insets::ZERO,
        );
        assert_close(right.top, left.top);
        assert_close(right.left, 200.0 + 50.0 + 4.242 + 5.0);

        let caret = compute_caret_position(VIEWPORT, &anchor, 6.0, Placement::Right, Insets::ZERO);
        assert_close(caret.top, 400.0 + 1.242 + (20.0 - 8.484) * 0.5);
        assert_close(caret.left, 200.0 + 1.242 + 50.0 + 5.0);
        assert!(!caret.hidden);
    }

    #[test]
    fn legal_ranges_nest() {
        let insets = Insets::new(1.0, 2.0, 3.0, 4.0);
        let screen = legal_screen_range(VIEWPORT, insets);
        assert_eq!(screen.min_top, 7.0);
        assert_eq!(screen.max_top, 791.0);
        assert_eq!(screen.min_left, 6.0);
        assert_eq!(screen.max_left, 392.0);

        let overlay = legal_overlay_range(VIEWPORT, OVERLAY, insets);
        assert_eq!(overlay.min_top, screen.min_top);
        assert_eq!(overlay.max_top, 751.0);
        assert_eq!(overlay.max_left, 292.0);

        let caret = legal_caret_range(VIEWPORT, 6.0, insets);
        let margin = 1.242 + 8.484 * 0.8;
        assert_close(caret.min_top, 7.0 + margin);
        assert_close(caret.max_top, 791.0 - margin - 8.484);
        assert_close(caret.min_left, 6.0 + margin);
        assert_close(caret.max_left, 392.0 - margin - 8.484);
    }

    #[test]
    fn caret_is_hidden_not_clamped() {
        // Anchor hugging the left edge: centring the caret pushes it out of range.
        let anchor = AnchorMeasurement::new(0.0, 0.0, 10.0, 20.0, 0.0, 300.0);
        let c = compute_caret_position(VIEWPORT, &anchor, 6.0, Placement::Top, Insets::ZERO);
        assert!(c.hidden);
        assert_close(c.left, 1.242 + (10.0 - 8.484) * 0.5);
        assert!(!legal_caret_range(VIEWPORT, 6.0, Insets::ZERO).contains_left(c.left));
    }

    #[test]
    fn pure_functions_are_idempotent() {
        let anchor = anchor_at(12.0, 700.0);
        let insets = Insets::new(4.0, 30.0, 4.0, 20.0);
        for placement in Placement::ALL {
            let fit_a = evaluate_fit(&anchor, OVERLAY, VIEWPORT, 10.0, insets);
            let fit_b = evaluate_fit(&anchor, OVERLAY, VIEWPORT, 10.0, insets);
            assert_eq!(fit_a, fit_b);
            assert_eq!(
                resolve_placement(placement, false, fit_a),
                resolve_placement(placement, false, fit_b)
            );
            assert_eq!(
                compute_overlay_position(VIEWPORT, OVERLAY, &anchor, 10.0, placement, insets),
                compute_overlay_position(VIEWPORT, OVERLAY, &anchor, 10.0, placement, insets)
            );
            assert_eq!(
                compute_caret_position(VIEWPORT, &anchor, 10.0, placement, insets),
                compute_caret_position(VIEWPORT, &anchor, 10.0, placement, insets)
            );
        }
    }

    #[test]
    fn overlay_always_lands_in_legal_range() {
        let viewports = [
            Size::new(400.0, 800.0),
            Size::new(120.0, 60.0),
            Size::new(10.0, 10.0),
        ];
        let overlays = [
            Size::ZERO,
            Size::new(100.0, 40.0),
            Size::new(600.0, 1200.0),
        ];
        let insets = [
            Insets::ZERO,
            Insets::new(10.0, 44.0, 10.0, 34.0),
            Insets::uniform(100.0),
        ];
        let coords = [-200.0, 0.0, 37.5, 190.0, 790.0, 2000.0];
        for viewport in viewports {
            for overlay in overlays {
                for inset in insets {
                    let range = legal_overlay_range(viewport, overlay, inset);
                    for &x in &coords {
                        for &y in &coords {
                            let anchor = anchor_at(x, y);
                            for placement in Placement::ALL {
                                let p = compute_overlay_position(
                                    viewport, overlay, &anchor, 6.0, placement, inset,
                                );
                                if range.min_top <= range.max_top {
                                    assert!(range.contains_top(p.top), "{p:?} outside {range:?}");
                                } else {
                                    assert_eq!(p.top, range.min_top);
                                }
                                if range.min_left <= range.max_left {
                                    assert!(
                                        range.contains_left(p.left),
                                        "{p:?} outside {range:?}"
                                    );
                                } else {
                                    assert_eq!(p.left, range.min_left);
                                }
                                assert!(!p.hidden);
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn shrinking_insets_never_hides_caret() {
        let coords = [0.0, 8.0, 20.0, 45.0, 120.0, 350.0, 380.0, 395.0, 760.0, 790.0];
        let wide = Insets::new(30.0, 50.0, 30.0, 40.0);
        let narrower = Insets::new(15.0, 25.0, 15.0, 20.0);
        for &x in &coords {
            for &y in &coords {
                let anchor = anchor_at(x, y);
                for placement in Placement::ALL {
                    let hidden = |insets| {
                        compute_caret_position(VIEWPORT, &anchor, 6.0, placement, insets).hidden
                    };
                    if !hidden(wide) {
                        assert!(!hidden(narrower), "{anchor:?} {placement}");
                    }
                    if !hidden(narrower) {
                        assert!(!hidden(Insets::ZERO), "{anchor:?} {placement}");
                    }
                }
            }
        }
    }
}
