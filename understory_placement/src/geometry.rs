// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry primitives: caret footprint, rotation offsets, and region containment.
//!
//! The caret is drawn as a square of side `caret_size` rotated by 45° about its
//! centre. Every clearance computation in this crate uses the rotated square's
//! bounding box (see [`caret_width`]) rather than the nominal side.

use kurbo::{Point, Rect, Size};

/// Gap kept between the overlay and the safe edge of the screen.
pub const BORDER_SPACE_SIZE: f64 = 5.0;

/// Gap kept between the anchor and the overlay or caret.
pub const PADDING_SPACE_SIZE: f64 = 5.0;

/// Fraction of the caret width kept as extra inward margin when deciding
/// whether the caret may be shown at all.
pub const SAFE_CARET_PADDING_SIZE_RATIO: f64 = 0.8;

/// Ratio between a 45° rotated square's bounding box and its side (≈ √2).
pub const CARET_DIAGONAL_RATIO: f64 = 1.414;

/// Fraction of the caret width used as tolerance in the caret attachment check.
pub const CARET_VISIBILITY_PADDING_RATIO: f64 = 0.05;

/// Fraction of the caret width applied as inner padding of the overlay box.
pub const CONTENT_PADDING_CARET_RATIO: f64 = 0.55;

/// Lower bound for the overlay box's inner padding.
pub const MIN_CONTENT_PADDING: f64 = 10.0;

/// Side of the bounding box of a caret of nominal size `caret_size`.
#[inline]
pub fn caret_width(caret_size: f64) -> f64 {
    caret_size * CARET_DIAGONAL_RATIO
}

/// Offset that moves the rotated caret's bounding box back over the origin of
/// the unrotated square.
#[inline]
pub fn diff_caret_position(caret_size: f64, caret_width: f64) -> f64 {
    (caret_width - caret_size) * 0.5
}

/// Inner padding the rendering layer applies to the overlay so its content
/// clears the caret.
#[inline]
pub fn overlay_content_padding(caret_size: f64) -> f64 {
    (caret_width(caret_size) * CONTENT_PADDING_CARET_RATIO).max(MIN_CONTENT_PADDING)
}

/// Tolerance used when testing whether a caret still touches its overlay.
///
/// This is the larger of 5% of the caret width and the smallest line the
/// platform can draw, so that a caret sitting exactly on an edge does not
/// flicker between visible and hidden.
#[inline]
pub fn caret_visibility_padding(caret_width: f64, hairline_width: f64) -> f64 {
    (caret_width * CARET_VISIBILITY_PADDING_RATIO).max(hairline_width)
}

/// Page-space bounding box of a rotated caret whose unrotated square has its
/// top-left corner at `origin`.
pub fn caret_bounds(origin: Point, caret_size: f64) -> Rect {
    let half = caret_size * 0.5;
    let width = caret_width(caret_size);
    Rect::from_center_size(
        Point::new(origin.x + half, origin.y + half),
        Size::new(width, width),
    )
}

/// A region described by its centre point and extent.
///
/// Host measurement layers report positions as page points; a `PointRegion`
/// treats that point as the centre of a box of the given size.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointRegion {
    /// Centre of the region, in page coordinates.
    pub center: Point,
    /// Full extent of the region.
    pub size: Size,
}

impl PointRegion {
    /// Create a region centred on `center`.
    pub const fn new(center: Point, size: Size) -> Self {
        Self { center, size }
    }

    /// The region covering `rect`.
    pub fn from_rect(rect: Rect) -> Self {
        let rect = rect.abs();
        Self {
            center: rect.center(),
            size: rect.size(),
        }
    }

    /// The region as a rectangle.
    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.center, self.size)
    }
}

/// Returns true if the region `a` lies within `b` shrunk inward by `padding` on
/// every side.
///
/// Edges are inclusive: a region exactly touching the shrunk boundary is inside.
/// A negative `padding` grows `b` instead.
pub fn is_point_region_inside(a: PointRegion, b: Rect, padding: f64) -> bool {
    let b = b.abs();
    let half_w = a.size.width * 0.5;
    let half_h = a.size.height * 0.5;
    a.center.x - half_w >= b.x0 + padding
        && a.center.x + half_w <= b.x1 - padding
        && a.center.y - half_h >= b.y0 + padding
        && a.center.y + half_h <= b.y1 - padding
}

/// Clamp `value` into `[min, max]`.
///
/// Unlike [`f64::clamp`] this never panics: when the band is inverted
/// (`min > max`) the lower bound wins.
#[inline]
pub(crate) fn clamp_min_wins(value: f64, min: f64, max: f64) -> f64 {
    let value = if value > max { max } else { value };
    if value < min { min } else { value }
}
