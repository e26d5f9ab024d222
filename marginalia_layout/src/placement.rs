// Copyright 2025 the Marginalia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement functions.
//!
//! Everything here is a pure function of its arguments. The only state that
//! survives between calls is the previous [`Position`], which the caller threads
//! back into [`reposition`].

use kurbo::{Rect, Size};

use crate::types::{Flip, Overlay, Placement, Position, Room, TransformOrigin, Trigger};

/// Pixels kept free between the clipped content and the viewport edge.
pub const SAFETY_PAD: f64 = 15.0;

/// Room above and below the vertical center of `trigger`.
pub fn available_room(trigger: Rect, viewport_height: f64) -> Room {
    let center = trigger.y0 + trigger.height() / 2.0;
    Room {
        above: center,
        below: viewport_height - center,
    }
}

/// Greedy above/below decision.
///
/// Below wins when it can hold the whole popover, or when it is at least as
/// roomy as above. Ties therefore go below.
pub fn decide(room: Room, required_height: f64) -> Position {
    if room.below >= required_height || room.below >= room.above {
        Position::Below
    } else {
        Position::Above
    }
}

/// Horizontal center of the trigger as a fraction of the viewport width.
///
/// The trigger's left margin is excluded from its width. Returns `0.0` for an
/// empty viewport.
pub fn left_relative(trigger: &Trigger, viewport_width: f64) -> f64 {
    if viewport_width <= 0.0 {
        return 0.0;
    }
    let width = trigger.rect.width() - trigger.margin_left;
    (trigger.rect.x0 + width / 2.0) / viewport_width
}

/// Transform origin that pivots scale/fade animations around the trigger.
pub fn transform_origin(trigger: &Trigger, viewport_width: f64, position: Position) -> TransformOrigin {
    TransformOrigin {
        x: left_relative(trigger, viewport_width) * 100.0,
        y: match position {
            Position::Above => 100.0,
            Position::Below => 0.0,
        },
    }
}

/// Decide the placement for this call.
///
/// `current` is the position returned by the previous call. A [`Flip`] is only
/// produced when the decision changes, so repeated calls with a stable decision
/// ask the caller for no writes; the available height is recomputed every time.
pub fn reposition(trigger: &Trigger, overlay: &Overlay, viewport: Size, current: Position) -> Placement {
    let room = available_room(trigger.rect, viewport.height);
    let next = decide(room, overlay.required_height());
    let flip = (next != current).then(|| Flip {
        from: current,
        to: next,
        origin: transform_origin(trigger, viewport.width, next),
    });
    Placement {
        position: next,
        available_height: room.toward(next) - overlay.margin - SAFETY_PAD,
        flip,
    }
}

/// Left offset in pixels that aligns a popover of `content_width` under its trigger.
pub fn left_in_pixels(trigger: &Trigger, content_width: f64, viewport_width: f64) -> f64 {
    let fraction = left_relative(trigger, viewport_width);
    -fraction * content_width + trigger.margin_left + trigger.rect.width() / 2.0
}

/// Left offset of a tooltip indicator, in percent of its (transformed) container.
pub fn tooltip_left(trigger: &Trigger, viewport_width: f64) -> f64 {
    left_relative(trigger, viewport_width) * 100.0
}
