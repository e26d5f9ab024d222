// Copyright 2025 the Marginalia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll boundary affordance.
//!
//! Marks a popover `is-fully-scrolled` once wheel input pushes its content past
//! the bottom, and clears the mark on any upward wheel input, wherever the
//! content currently is.

use marginalia_dom::{Document, NodeId};
use marginalia_events::abort::AbortSignal;
use marginalia_events::listeners::{Handler, Listeners};
use marginalia_events::throttle::{FRAME, Throttled};
use marginalia_events::types::{Event, EventTarget, EventType};

use crate::classes;
use crate::nodes::FootnoteNodes;

/// Wheel handler for one popover's content region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollBoundary {
    popover: NodeId,
    content: NodeId,
}

impl ScrollBoundary {
    /// Track `content`, marking `popover`.
    pub fn new(popover: NodeId, content: NodeId) -> Self {
        Self { popover, content }
    }

    /// React to one wheel step of `delta_y` (positive scrolls down).
    pub fn on_wheel(&self, doc: &mut Document, delta_y: f64) {
        let delta = -delta_y;
        if delta > 0.0 {
            doc.remove_class(self.popover, classes::FULLY_SCROLLED);
            return;
        }
        let layout = doc.layout(self.content);
        if delta < layout.client_height + layout.scroll_top - layout.scroll_height {
            doc.add_class(self.popover, classes::FULLY_SCROLLED);
        }
    }

    /// Whether the popover currently carries the mark.
    pub fn is_fully_scrolled(&self, doc: &Document) -> bool {
        doc.has_class(self.popover, classes::FULLY_SCROLLED)
    }
}

impl Handler for ScrollBoundary {
    fn handle_event(&mut self, doc: &mut Document, event: &mut Event) {
        self.on_wheel(doc, event.delta_y());
    }
}

/// Listen for wheel input over a footnote's content, throttled to one frame.
pub fn bind_scroll_handler(
    listeners: &mut Listeners,
    nodes: &FootnoteNodes,
    signal: Option<&AbortSignal>,
) {
    listeners.add_event_listener(
        EventTarget::Node(nodes.content),
        EventType::Wheel,
        Throttled::new(FRAME, ScrollBoundary::new(nodes.popover, nodes.content)),
        signal,
    );
}
