// Copyright 2025 the Marginalia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marginalia Layout: viewport-aware popover placement.
//!
//! ## Overview
//!
//! Given the trigger's box, the popover's height and margin, and the viewport size,
//! decide whether the popover opens [above or below](Position) its trigger and how much
//! height its content may use there.
//!
//! - [`reposition`] makes the vertical decision and reports a [`Flip`] only when it changes.
//! - [`left_in_pixels`] aligns a popover whose width is set by its content.
//! - [`tooltip_left`] positions a pointer inside the popover, in percent.
//!
//! All functions are pure. Callers keep the previous [`Position`] and pass it back in.
//!
//! ## Decision rule
//!
//! Room is measured from the trigger's vertical center. The popover goes below when the room
//! below holds its full height (including both margins) or when below is at least as roomy as
//! above; otherwise it goes above. The rule is re-evaluated on every call without hysteresis.
//!
//! ```
//! use kurbo::{Rect, Size};
//! use marginalia_layout::{Overlay, Position, Trigger, reposition};
//!
//! let trigger = Trigger { rect: Rect::new(100.0, 700.0, 120.0, 720.0), margin_left: 0.0 };
//! let overlay = Overlay { height: 300.0, margin: 10.0 };
//! let placement = reposition(&trigger, &overlay, Size::new(1000.0, 800.0), Position::Below);
//! assert_eq!(placement.position, Position::Above);
//! assert!(placement.flip.is_some());
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod placement;
mod types;

pub use placement::{
    SAFETY_PAD, available_room, decide, left_in_pixels, left_relative, reposition, tooltip_left,
    transform_origin,
};
pub use types::{Flip, Overlay, Placement, Position, Room, TransformOrigin, Trigger};
