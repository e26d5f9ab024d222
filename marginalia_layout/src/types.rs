// Copyright 2025 the Marginalia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inputs and outputs of the placement functions.

use kurbo::Rect;

/// Vertical placement of a popover relative to its trigger.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Position {
    /// Popover sits above the trigger.
    #[default]
    Above,
    /// Popover sits below the trigger.
    Below,
}

/// Vertical room around a trigger's center, in pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Room {
    /// Distance from the viewport top to the trigger's vertical center.
    pub above: f64,
    /// Distance from the trigger's vertical center to the viewport bottom.
    pub below: f64,
}

impl Room {
    /// Room on the given side.
    pub fn toward(self, position: Position) -> f64 {
        match position {
            Position::Above => self.above,
            Position::Below => self.below,
        }
    }
}

/// Measurements of the element that triggers a popover.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Trigger {
    /// Border box in viewport coordinates.
    pub rect: Rect,
    /// Computed left margin.
    pub margin_left: f64,
}

/// Measurements of the popover itself.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Overlay {
    /// Rendered (offset) height.
    pub height: f64,
    /// Computed vertical margin (top margin; bottom is assumed equal).
    pub margin: f64,
}

impl Overlay {
    /// Height the popover needs including both margins.
    pub fn required_height(&self) -> f64 {
        self.height + 2.0 * self.margin
    }
}

/// A CSS transform origin, both components in percent.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TransformOrigin {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
}

/// A change of placement that the caller must apply.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Flip {
    /// Placement to clear.
    pub from: Position,
    /// Placement to set.
    pub to: Position,
    /// New transform origin, pivoting on the trigger.
    pub origin: TransformOrigin,
}

/// Result of one [`reposition`](crate::reposition) call.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    /// The decided position.
    pub position: Position,
    /// Height available for content on the decided side, after margin and safety pad.
    pub available_height: f64,
    /// Present only when the decision differs from the previous one.
    pub flip: Option<Flip>,
}
