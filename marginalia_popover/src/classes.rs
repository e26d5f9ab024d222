// Copyright 2025 the Marginalia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Class names shared with the stylesheet.
//!
//! These are a visual contract: stylesheets written for the engine key off them,
//! so they never change.

use marginalia_layout::Position;

/// On the button while activated, and on the popover once settled.
pub const ACTIVE: &str = "is-active";
/// On the button between a transition and the step that settles it.
pub const CHANGING: &str = "is-changing";
/// On the popover when its content overflows.
pub const SCROLLABLE: &str = "is-scrollable";
/// On the popover when the content has been scrolled to the bottom.
pub const FULLY_SCROLLED: &str = "is-fully-scrolled";
/// Placement class for [`Position::Above`].
pub const ABOVE: &str = "is-above";
/// Placement class for [`Position::Below`].
pub const BELOW: &str = "is-below";
/// The pointer indicator nested in a popover.
pub const TOOLTIP: &str = "littlefoot__tooltip";

/// Placement class for `position`.
pub fn position_class(position: Position) -> &'static str {
    match position {
        Position::Above => ABOVE,
        Position::Below => BELOW,
    }
}
