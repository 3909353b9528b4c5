// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types: placements, measurements, and resolved positions.

use alloc::string::ToString;
use core::fmt;
use core::str::FromStr;

use kurbo::{Point, Rect, Size};

use crate::error::ConfigError;

/// Side of the anchor the overlay is displayed on.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Placement {
    /// Above the anchor.
    #[default]
    Top,
    /// Below the anchor.
    Bottom,
    /// To the left of the anchor.
    Left,
    /// To the right of the anchor.
    Right,
}

impl Placement {
    /// All placements, in declaration order.
    pub const ALL: [Self; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];

    /// The placement on the other side of the anchor along the same axis.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// True for [`Placement::Top`] and [`Placement::Bottom`].
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// The host spelling of this placement.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Placement {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            other => Err(ConfigError::UnknownPlacement(other.to_string())),
        }
    }
}

/// Gesture that opens the overlay.
///
/// Only the interaction layer acts on this; it is carried in
/// [`PlacementConfig`](crate::config::PlacementConfig) so hosts can keep a
/// single configuration value per overlay.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum ActionType {
    /// Open on a press.
    #[default]
    OnPress,
    /// Open on a long press.
    OnLongPress,
}

impl ActionType {
    /// The host spelling of this action type.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OnPress => "onPress",
            Self::OnLongPress => "onLongPress",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "onPress" => Ok(Self::OnPress),
            "onLongPress" => Ok(Self::OnLongPress),
            other => Err(ConfigError::UnknownActionType(other.to_string())),
        }
    }
}

/// Anchor rectangle as reported by the host's measurement API.
///
/// `x`/`y` are relative to the anchor's parent; `page_x`/`page_y` are
/// page-absolute. Placement math only ever reads the page origin.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct AnchorMeasurement {
    /// Local x relative to the parent.
    pub x: f64,
    /// Local y relative to the parent.
    pub y: f64,
    /// Width of the anchor.
    pub width: f64,
    /// Height of the anchor.
    pub height: f64,
    /// Page-absolute x of the anchor's top-left corner.
    pub page_x: f64,
    /// Page-absolute y of the anchor's top-left corner.
    pub page_y: f64,
}

impl AnchorMeasurement {
    /// Create a measurement from the host's `(x, y, width, height, pageX, pageY)` report.
    pub const fn new(x: f64, y: f64, width: f64, height: f64, page_x: f64, page_y: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            page_x,
            page_y,
        }
    }

    /// Page-absolute top-left corner.
    pub fn page_origin(&self) -> Point {
        Point::new(self.page_x, self.page_y)
    }

    /// Size of the anchor.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Page-absolute rectangle of the anchor.
    pub fn page_rect(&self) -> Rect {
        Rect::from_origin_size(self.page_origin(), self.size())
    }

    /// True if every field is finite and the size is non-negative.
    pub fn is_well_formed(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.page_x.is_finite()
            && self.page_y.is_finite()
            && is_extent(self.width)
            && is_extent(self.height)
    }
}

/// True if `rect` can stand for a measured overlay: finite, with non-negative extent.
pub(crate) fn is_well_formed_layout(rect: Rect) -> bool {
    rect.x0.is_finite()
        && rect.y0.is_finite()
        && is_extent(rect.x1 - rect.x0)
        && is_extent(rect.y1 - rect.y0)
}

#[inline]
pub(crate) fn is_extent(v: f64) -> bool {
    v.is_finite() && v >= 0.0
}

/// Top-left coordinates of a positioned element.
///
/// When `hidden` is set the consumer must not render the element. Coordinates
/// of a hidden element are still the computed ones.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Position {
    /// Page-absolute top edge.
    pub top: f64,
    /// Page-absolute left edge.
    pub left: f64,
    /// Whether the element must not be rendered.
    pub hidden: bool,
}

impl Position {
    /// A visible position.
    pub const fn new(top: f64, left: f64) -> Self {
        Self {
            top,
            left,
            hidden: false,
        }
    }

    /// The placeholder reported for a caret that the configuration hides.
    pub const HIDDEN: Self = Self {
        top: 0.0,
        left: 0.0,
        hidden: true,
    };

    /// This position with `hidden` set.
    #[must_use]
    pub const fn into_hidden(self) -> Self {
        Self {
            hidden: true,
            ..self
        }
    }

    /// The top-left corner as a point (`x = left`, `y = top`).
    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }
}

/// Settled overlay and caret positions from one recomputation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Positions {
    /// Where to place the overlay box.
    pub content: Position,
    /// Where to place the unrotated caret square.
    pub caret: Position,
}
