// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration errors.
//!
//! The placement engine itself is total over well-formed inputs. Bad values
//! are rejected where they enter: when a [`PlacementConfig`](crate::config::PlacementConfig)
//! is validated, when a placement string is parsed, or when the controller is
//! handed a viewport, insets, or hairline width.

use alloc::string::String;

/// A configuration value the engine cannot work with.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Caret size is negative or not finite.
    #[error("caret size must be finite and non-negative, got {0}")]
    InvalidCaretSize(f64),
    /// Placement string is not one of `top`, `bottom`, `left`, `right`.
    #[error("unknown placement `{0}`, expected one of `top`, `bottom`, `left`, `right`")]
    UnknownPlacement(String),
    /// Action type string is not one of `onPress`, `onLongPress`.
    #[error("unknown action type `{0}`, expected `onPress` or `onLongPress`")]
    UnknownActionType(String),
    /// A safe-area inset is negative or not finite.
    #[error("safe-area insets must be finite and non-negative")]
    InvalidInsets,
    /// A viewport extent is negative or not finite.
    #[error("viewport extents must be finite and non-negative")]
    InvalidViewport,
    /// Hairline width is negative or not finite.
    #[error("hairline width must be finite and non-negative, got {0}")]
    InvalidHairlineWidth(f64),
}
