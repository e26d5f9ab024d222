// Copyright 2025 the Marginalia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement basics.
//!
//! Walks a trigger down an 800px viewport and prints where its popover goes,
//! how much height the content may use, and when the decision flips.
//!
//! Run:
//! - `cargo run -p marginalia_demos --example placement_basics`

use kurbo::{Rect, Size};
use marginalia_layout::{Overlay, Position, Trigger, left_in_pixels, reposition, tooltip_left};

fn main() {
    let viewport = Size::new(1000.0, 800.0);
    let overlay = Overlay {
        height: 300.0,
        margin: 10.0,
    };

    println!("== Vertical decision (required height {}) ==", overlay.required_height());
    let mut position = Position::Above;
    let mut flips = 0;
    for y in (0..=760).step_by(80) {
        let y = f64::from(y);
        let trigger = Trigger {
            rect: Rect::new(480.0, y, 492.0, y + 20.0),
            margin_left: 4.0,
        };
        let placement = reposition(&trigger, &overlay, viewport, position);
        let flip = match placement.flip {
            Some(f) => {
                flips += 1;
                format!("flip {:?} -> {:?}, origin {:.0}% {:.0}%", f.from, f.to, f.origin.x, f.origin.y)
            }
            None => String::from("-"),
        };
        println!(
            "  button y={:>3}  {:?}  available={:>5.1}  {}",
            y, placement.position, placement.available_height, flip
        );
        position = placement.position;
    }
    // Below from the top, then above once below runs out and above is roomier.
    assert_eq!(flips, 2, "Above -> Below on the first call, then Below -> Above once");
    assert_eq!(position, Position::Above);

    println!("== Horizontal alignment ==");
    for x in [0.0, 250.0, 500.0, 990.0] {
        let trigger = Trigger {
            rect: Rect::new(x, 100.0, x + 12.0, 120.0),
            margin_left: 4.0,
        };
        println!(
            "  button x={:>5.1}  popover left={:>7.1}px  tooltip left={:>5.1}%",
            x,
            left_in_pixels(&trigger, 400.0, viewport.width),
            tooltip_left(&trigger, viewport.width)
        );
    }
}
