// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Position controller: batches input changes and recomputes on commit.
//!
//! ## Usage
//!
//! 1) Push inputs as the host reports them: [`PositionController::set_anchor`]
//!    when the overlay opens, [`PositionController::set_overlay_layout`] after
//!    the overlay renders, and the viewport, insets, or configuration setters
//!    whenever those change. Setters only record the value and mark it dirty.
//! 2) Call [`PositionController::commit`] once per batch of events. It runs a
//!    single recomputation over the latest value of every input and publishes
//!    the result.
//! 3) Read [`PositionController::content_position`] and
//!    [`PositionController::caret_position`] from the rendering layer.
//!
//! [`PositionController::handle`] bundles steps 1 and 2 for a slice of
//! [`InputEvent`]s.
//!
//! ## Readiness
//!
//! Positions stay `None` until both the anchor and the overlay have been
//! measured with well-formed values. After the first successful commit they are
//! always `Some`; later commits that cannot run leave the last positions in place.

use alloc::vec::Vec;

use bitflags::bitflags;
use kurbo::{Insets, Rect, Size};
use tracing::{debug, trace};

use crate::config::{
    DEFAULT_HAIRLINE_WIDTH, PlacementConfig, validate_hairline_width, validate_insets,
    validate_viewport,
};
use crate::engine::{
    compute_caret_position, compute_overlay_position, evaluate_fit, resolve_placement,
};
use crate::error::ConfigError;
use crate::geometry::{
    PointRegion, caret_bounds, caret_visibility_padding, caret_width, is_point_region_inside,
};
use crate::types::{AnchorMeasurement, Placement, Position, Positions, is_well_formed_layout};

bitflags! {
    /// Inputs of the controller, used to report which ones changed.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Inputs: u8 {
        /// Anchor measurement.
        const ANCHOR   = 0b0000_0001;
        /// Overlay layout rectangle.
        const OVERLAY  = 0b0000_0010;
        /// Viewport size.
        const VIEWPORT = 0b0000_0100;
        /// Safe-area insets.
        const INSETS   = 0b0000_1000;
        /// Placement configuration.
        const CONFIG   = 0b0001_0000;
        /// Platform hairline width.
        const HAIRLINE = 0b0010_0000;
    }
}

/// Why the caret ended up visible or hidden.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum CaretVisibility {
    /// The caret is shown.
    Visible,
    /// The configuration hides the caret.
    HiddenByConfig,
    /// The caret would leave the legal caret range.
    OutOfRange,
    /// The caret is in range but no longer sits on its overlay's edge.
    Detached,
}

impl CaretVisibility {
    /// True unless the caret is [`Visible`](Self::Visible).
    pub const fn is_hidden(self) -> bool {
        !matches!(self, Self::Visible)
    }
}

/// Output of one recomputation over a complete set of inputs.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Resolved {
    /// Side the overlay was placed on after fallback.
    pub placement: Placement,
    /// Overlay and caret positions.
    pub positions: Positions,
    /// Why the caret is visible or hidden.
    pub caret: CaretVisibility,
}

/// Summary of a commit that published new positions.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PositionUpdate {
    /// Positions published by the previous commit, if any.
    pub previous: Option<Positions>,
    /// Positions published by this commit.
    pub current: Positions,
    /// Side the overlay was placed on.
    pub placement: Placement,
    /// Why the caret is visible or hidden.
    pub caret: CaretVisibility,
    /// Inputs that changed since the previous commit.
    pub changed: Inputs,
}

impl PositionUpdate {
    /// True if the published positions differ from the previous ones.
    pub fn moved(&self) -> bool {
        self.previous != Some(self.current)
    }
}

/// A change reported by the host.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// The anchor was measured (typically when the overlay opens).
    AnchorMeasured(AnchorMeasurement),
    /// The overlay content was laid out.
    OverlayLaidOut(Rect),
    /// The usable screen area changed size.
    ViewportResized(Size),
    /// The safe-area insets changed.
    InsetsChanged(Insets),
    /// The placement configuration changed.
    ConfigChanged(PlacementConfig),
    /// The platform's smallest visible line width changed.
    HairlineChanged(f64),
}

impl InputEvent {
    fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::AnchorMeasured(_) | Self::OverlayLaidOut(_) => Ok(()),
            Self::ViewportResized(size) => validate_viewport(*size),
            Self::InsetsChanged(insets) => validate_insets(*insets),
            Self::ConfigChanged(config) => config.validate(),
            Self::HairlineChanged(width) => validate_hairline_width(*width),
        }
    }
}

/// Run the full placement pipeline over one consistent set of inputs.
///
/// Steps, in order:
/// 1) resolve the placement from a fit evaluation over `overlay`;
/// 2) place the caret, or report it hidden if the configuration hides it;
/// 3) place the overlay, without caret footprint if the caret is hidden;
/// 4) hide a caret that does not sit on the overlay's anchor-facing edge.
pub fn resolve(
    anchor: &AnchorMeasurement,
    overlay: Size,
    viewport: Size,
    insets: Insets,
    config: &PlacementConfig,
    hairline_width: f64,
) -> Resolved {
    let fit = evaluate_fit(
        anchor,
        overlay,
        viewport,
        config.effective_caret_size(),
        insets,
    );
    let placement = resolve_placement(config.placement, config.force_placement, fit);

    let (mut caret, mut visibility) = if config.hide_caret {
        (Position::HIDDEN, CaretVisibility::HiddenByConfig)
    } else {
        let caret =
            compute_caret_position(viewport, anchor, config.caret_size, placement, insets);
        let visibility = if caret.hidden {
            CaretVisibility::OutOfRange
        } else {
            CaretVisibility::Visible
        };
        (caret, visibility)
    };

    let overlay_caret_size = if caret.hidden { 0.0 } else { config.caret_size };
    let content = compute_overlay_position(
        viewport,
        overlay,
        anchor,
        overlay_caret_size,
        placement,
        insets,
    );

    if !caret.hidden {
        let rendered = Rect::from_origin_size(content.origin(), overlay);
        let padding = caret_visibility_padding(caret_width(config.caret_size), hairline_width);
        if !caret_is_attached(caret, config.caret_size, placement, rendered, padding) {
            caret = caret.into_hidden();
            visibility = CaretVisibility::Detached;
        }
    }

    Resolved {
        placement,
        positions: Positions { content, caret },
        caret: visibility,
    }
}

/// Whether the caret's rotated bounding box sits in the slot along the
/// overlay edge that faces the anchor.
///
/// The slot spans the edge's length and reaches half a caret width to either
/// side of it. `padding` is tolerance across the edge and clearance from the
/// edge's ends.
fn caret_is_attached(
    caret: Position,
    caret_size: f64,
    placement: Placement,
    overlay: Rect,
    padding: f64,
) -> bool {
    let across = caret_width(caret_size) * 0.5 + 2.0 * padding;
    let slot = match placement {
        Placement::Top => {
            Rect::new(overlay.x0, overlay.y1 - across, overlay.x1, overlay.y1 + across)
        }
        Placement::Bottom => {
            Rect::new(overlay.x0, overlay.y0 - across, overlay.x1, overlay.y0 + across)
        }
        Placement::Left => {
            Rect::new(overlay.x1 - across, overlay.y0, overlay.x1 + across, overlay.y1)
        }
        Placement::Right => {
            Rect::new(overlay.x0 - across, overlay.y0, overlay.x0 + across, overlay.y1)
        }
    };
    let region = PointRegion::from_rect(caret_bounds(caret.origin(), caret_size));
    is_point_region_inside(region, slot, padding)
}

/// Holds the latest inputs for one overlay and publishes its positions.
///
/// See the [module docs](self) for the commit protocol.
#[derive(Clone, Debug)]
pub struct PositionController {
    config: PlacementConfig,
    viewport: Size,
    insets: Insets,
    hairline_width: f64,
    anchor: Option<AnchorMeasurement>,
    overlay: Option<Rect>,
    dirty: Inputs,
    placement: Option<Placement>,
    positions: Option<Positions>,
}

impl PositionController {
    /// Create a controller for a viewport of the given size.
    ///
    /// Insets start at zero and the hairline width at [`DEFAULT_HAIRLINE_WIDTH`].
    pub fn new(viewport: Size, config: PlacementConfig) -> Result<Self, ConfigError> {
        validate_viewport(viewport)?;
        config.validate()?;
        Ok(Self {
            config,
            viewport,
            insets: Insets::ZERO,
            hairline_width: DEFAULT_HAIRLINE_WIDTH,
            anchor: None,
            overlay: None,
            dirty: Inputs::all(),
            placement: None,
            positions: None,
        })
    }

    /// Current configuration.
    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Current viewport size.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Current safe-area insets.
    pub fn insets(&self) -> Insets {
        self.insets
    }

    /// Current hairline width.
    pub fn hairline_width(&self) -> f64 {
        self.hairline_width
    }

    /// Last anchor measurement, if the overlay has been opened.
    pub fn anchor(&self) -> Option<&AnchorMeasurement> {
        self.anchor.as_ref()
    }

    /// Last overlay layout rectangle, if the overlay has been laid out.
    pub fn overlay_layout(&self) -> Option<Rect> {
        self.overlay
    }

    /// Inputs changed since the last commit that published positions.
    pub fn pending(&self) -> Inputs {
        self.dirty
    }

    /// True if both measurements are present and well formed.
    pub fn is_ready(&self) -> bool {
        matches!(
            (self.anchor, self.overlay),
            (Some(anchor), Some(overlay)) if anchor.is_well_formed() && is_well_formed_layout(overlay)
        )
    }

    /// Replace the configuration.
    pub fn set_config(&mut self, config: PlacementConfig) -> Result<(), ConfigError> {
        config.validate()?;
        if config != self.config {
            self.config = config;
            self.dirty |= Inputs::CONFIG;
        }
        Ok(())
    }

    /// Replace the viewport size.
    pub fn set_viewport(&mut self, viewport: Size) -> Result<(), ConfigError> {
        validate_viewport(viewport)?;
        if viewport != self.viewport {
            self.viewport = viewport;
            self.dirty |= Inputs::VIEWPORT;
        }
        Ok(())
    }

    /// Replace the safe-area insets.
    pub fn set_insets(&mut self, insets: Insets) -> Result<(), ConfigError> {
        validate_insets(insets)?;
        if insets != self.insets {
            self.insets = insets;
            self.dirty |= Inputs::INSETS;
        }
        Ok(())
    }

    /// Replace the platform hairline width.
    pub fn set_hairline_width(&mut self, width: f64) -> Result<(), ConfigError> {
        validate_hairline_width(width)?;
        if width != self.hairline_width {
            self.hairline_width = width;
            self.dirty |= Inputs::HAIRLINE;
        }
        Ok(())
    }

    /// Replace the anchor measurement.
    ///
    /// A malformed measurement is stored but keeps the controller not ready.
    pub fn set_anchor(&mut self, anchor: AnchorMeasurement) {
        if self.anchor != Some(anchor) {
            self.anchor = Some(anchor);
            self.dirty |= Inputs::ANCHOR;
        }
    }

    /// Replace the overlay's layout rectangle. Only its size is used.
    pub fn set_overlay_layout(&mut self, layout: Rect) {
        if self.overlay != Some(layout) {
            self.overlay = Some(layout);
            self.dirty |= Inputs::OVERLAY;
        }
    }

    /// Apply one event without committing.
    pub fn apply(&mut self, event: InputEvent) -> Result<(), ConfigError> {
        match event {
            InputEvent::AnchorMeasured(anchor) => {
                self.set_anchor(anchor);
                Ok(())
            }
            InputEvent::OverlayLaidOut(layout) => {
                self.set_overlay_layout(layout);
                Ok(())
            }
            InputEvent::ViewportResized(size) => self.set_viewport(size),
            InputEvent::InsetsChanged(insets) => self.set_insets(insets),
            InputEvent::ConfigChanged(config) => self.set_config(config),
            InputEvent::HairlineChanged(width) => self.set_hairline_width(width),
        }
    }

    /// Apply a batch of events and commit once.
    ///
    /// The batch is validated up front; if any event is rejected none of them
    /// is applied.
    pub fn handle(
        &mut self,
        events: impl IntoIterator<Item = InputEvent>,
    ) -> Result<Option<PositionUpdate>, ConfigError> {
        let events: Vec<InputEvent> = events.into_iter().collect();
        for event in &events {
            event.validate()?;
        }
        for event in events {
            self.apply(event)?;
        }
        Ok(self.commit())
    }

    /// Recompute positions from the latest inputs.
    ///
    /// Returns `None` without touching the published positions when nothing
    /// changed or when the measurements are missing or malformed.
    pub fn commit(&mut self) -> Option<PositionUpdate> {
        if self.dirty.is_empty() {
            trace!("placement commit skipped: no pending inputs");
            return None;
        }
        let (Some(anchor), Some(layout)) = (self.anchor, self.overlay) else {
            trace!(pending = ?self.dirty, "placement commit skipped: not measured yet");
            return None;
        };
        if !anchor.is_well_formed() || !is_well_formed_layout(layout) {
            debug!(?anchor, ?layout, "placement commit skipped: malformed measurement");
            return None;
        }

        let changed = core::mem::replace(&mut self.dirty, Inputs::empty());
        let resolved = resolve(
            &anchor,
            layout.size(),
            self.viewport,
            self.insets,
            &self.config,
            self.hairline_width,
        );
        let previous = self.positions.replace(resolved.positions);
        self.placement = Some(resolved.placement);

        debug!(
            requested = %self.config.placement,
            placement = %resolved.placement,
            caret = ?resolved.caret,
            ?changed,
            "placement recomputed"
        );

        Some(PositionUpdate {
            previous,
            current: resolved.positions,
            placement: resolved.placement,
            caret: resolved.caret,
            changed,
        })
    }

    /// Positions published by the last successful commit.
    pub fn positions(&self) -> Option<Positions> {
        self.positions
    }

    /// Overlay position, `None` until the first successful commit.
    pub fn content_position(&self) -> Option<Position> {
        self.positions.map(|p| p.content)
    }

    /// Caret position, `None` until the first successful commit.
    pub fn caret_position(&self) -> Option<Position> {
        self.positions.map(|p| p.caret)
    }

    /// Placement resolved by the last successful commit.
    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }
}
