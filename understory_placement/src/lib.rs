// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Placement: a Kurbo-native placement engine for anchored overlays.
//!
//! Understory Placement positions a floating overlay (a tooltip, popover, or menu) and its
//! caret next to an anchor so the overlay stays on screen and clear of safe-area insets.
//!
//! - Checks which sides of the anchor have room and falls back to the opposite side.
//! - Clamps the overlay into the visible band of the screen.
//! - Hides the caret when it would leave the screen or lose contact with its overlay.
//! - Batches host events and recomputes once per [`PositionController::commit`].
//!
//! ## Not a renderer
//!
//! This crate does not measure, draw, or animate anything.
//! The host reports the anchor's page rectangle and the overlay's laid-out size, and reads
//! back top-left coordinates plus a `hidden` flag for the overlay box and the caret square.
//! The caret is assumed to be a square rotated by 45° about its centre.
//!
//! ## Layers
//!
//! - [`geometry`]: caret footprint, rotation offset, and region containment.
//! - [`engine`]: pure functions for fit, fallback, legal ranges, and final positions.
//! - [`controller`]: [`PositionController`], which holds the latest inputs and publishes
//!   positions on commit.
//!
//! ## Coordinates
//!
//! All coordinates are page-absolute. Viewports are [`kurbo::Size`], safe-area insets are
//! [`kurbo::Insets`] (`x0` left, `y0` top, `x1` right, `y1` bottom), and overlay layouts are
//! [`kurbo::Rect`]. Float inputs are assumed finite; configuration values are validated when
//! they enter the controller.
//!
//! ## Minimal usage
//!
//! ```
//! use kurbo::{Rect, Size};
//! use understory_placement::{
//!     AnchorMeasurement, CaretVisibility, Placement, PlacementConfig, PositionController,
//! };
//!
//! let mut controller =
//!     PositionController::new(Size::new(400.0, 800.0), PlacementConfig::default()).unwrap();
//!
//! // Nothing is published until both the anchor and the overlay are measured.
//! controller.set_anchor(AnchorMeasurement::new(0.0, 0.0, 50.0, 20.0, 175.0, 100.0));
//! assert!(controller.commit().is_none());
//!
//! controller.set_overlay_layout(Rect::new(0.0, 0.0, 100.0, 40.0));
//! let update = controller.commit().unwrap();
//! assert_eq!(update.placement, Placement::Top);
//! assert_eq!(update.caret, CaretVisibility::Visible);
//! assert_eq!(update.current.content.left, 150.0);
//! ```
//!
//! ### Using the engine directly
//!
//! ```
//! use kurbo::{Insets, Size};
//! use understory_placement::engine::{evaluate_fit, resolve_placement, compute_overlay_position};
//! use understory_placement::{AnchorMeasurement, Placement};
//!
//! let viewport = Size::new(400.0, 800.0);
//! let overlay = Size::new(100.0, 40.0);
//! let anchor = AnchorMeasurement::new(0.0, 0.0, 50.0, 20.0, 175.0, 30.0);
//!
//! let fit = evaluate_fit(&anchor, overlay, viewport, 6.0, Insets::ZERO);
//! let placement = resolve_placement(Placement::Top, false, fit);
//! assert_eq!(placement, Placement::Bottom);
//!
//! let position = compute_overlay_position(viewport, overlay, &anchor, 6.0, placement, Insets::ZERO);
//! assert!(position.top > anchor.page_y);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod types;

pub use config::{DEFAULT_CARET_SIZE, DEFAULT_HAIRLINE_WIDTH, PlacementConfig};
pub use controller::{
    CaretVisibility, InputEvent, Inputs, PositionController, PositionUpdate, Resolved, resolve,
};
pub use engine::{Fit, LegalRange};
pub use error::ConfigError;
pub use types::{ActionType, AnchorMeasurement, Placement, Position, Positions};
