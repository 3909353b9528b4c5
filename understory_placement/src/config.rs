// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-overlay configuration and boundary validation.

use kurbo::{Insets, Size};

use crate::error::ConfigError;
use crate::types::{ActionType, Placement, is_extent};

/// Caret size used when the host does not supply one.
pub const DEFAULT_CARET_SIZE: f64 = 6.0;

/// Smallest visible line width assumed when the host does not supply one.
pub const DEFAULT_HAIRLINE_WIDTH: f64 = 0.5;

/// How an overlay wants to be placed around its anchor.
///
/// ## Defaults
///
/// - `placement`: [`Placement::Top`]
/// - `force_placement`: `false`
/// - `caret_size`: [`DEFAULT_CARET_SIZE`]
/// - `hide_caret`: `false`
/// - `action_type`: [`ActionType::OnPress`]
///
/// ```
/// use understory_placement::config::PlacementConfig;
/// use understory_placement::types::Placement;
///
/// let config = PlacementConfig::default()
///     .with_placement(Placement::Left)
///     .with_caret_size(10.0);
/// assert!(config.validate().is_ok());
/// assert!(config.with_caret_size(-1.0).validate().is_err());
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlacementConfig {
    /// Requested side of the anchor.
    pub placement: Placement,
    /// Keep the requested side even when it does not fit.
    pub force_placement: bool,
    /// Side of the caret square before rotation.
    pub caret_size: f64,
    /// Never show the caret; the overlay then sits closer to the anchor.
    pub hide_caret: bool,
    /// Gesture that opens the overlay. Not consulted by placement.
    pub action_type: ActionType,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            placement: Placement::Top,
            force_placement: false,
            caret_size: DEFAULT_CARET_SIZE,
            hide_caret: false,
            action_type: ActionType::OnPress,
        }
    }
}

impl PlacementConfig {
    /// Set the requested placement.
    #[must_use]
    pub const fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Set whether the requested placement is kept regardless of fit.
    #[must_use]
    pub const fn with_force_placement(mut self, force: bool) -> Self {
        self.force_placement = force;
        self
    }

    /// Set the caret size.
    #[must_use]
    pub const fn with_caret_size(mut self, caret_size: f64) -> Self {
        self.caret_size = caret_size;
        self
    }

    /// Set whether the caret is hidden.
    #[must_use]
    pub const fn with_hide_caret(mut self, hide: bool) -> Self {
        self.hide_caret = hide;
        self
    }

    /// Set the opening gesture.
    #[must_use]
    pub const fn with_action_type(mut self, action_type: ActionType) -> Self {
        self.action_type = action_type;
        self
    }

    /// Check that the configuration can be fed to the engine.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_extent(self.caret_size) {
            return Err(ConfigError::InvalidCaretSize(self.caret_size));
        }
        Ok(())
    }

    /// Caret size the geometry is computed with: zero when the caret is hidden.
    pub fn effective_caret_size(&self) -> f64 {
        if self.hide_caret { 0.0 } else { self.caret_size }
    }
}

/// Check that safe-area insets are finite and non-negative.
pub fn validate_insets(insets: Insets) -> Result<(), ConfigError> {
    if [insets.x0, insets.y0, insets.x1, insets.y1]
        .into_iter()
        .all(is_extent)
    {
        Ok(())
    } else {
        Err(ConfigError::InvalidInsets)
    }
}

/// Check that viewport extents are finite and non-negative.
pub fn validate_viewport(viewport: Size) -> Result<(), ConfigError> {
    if is_extent(viewport.width) && is_extent(viewport.height) {
        Ok(())
    } else {
        Err(ConfigError::InvalidViewport)
    }
}

/// Check that a hairline width is finite and non-negative.
pub fn validate_hairline_width(width: f64) -> Result<(), ConfigError> {
    if is_extent(width) {
        Ok(())
    } else {
        Err(ConfigError::InvalidHairlineWidth(width))
    }
}
