// Copyright 2025 the Marginalia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types: event types, targets, payloads, and the propagation path.
//!
//! ## Overview
//!
//! These types describe the raw input the coordination layer consumes.
//! They are produced by the host and fed to [`Listeners::dispatch`](crate::listeners::Listeners::dispatch).

use alloc::string::String;
use alloc::vec::Vec;
use core::time::Duration;

use marginalia_dom::{Document, NodeId};

/// Event types the engine listens for.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum EventType {
    /// `click`
    Click,
    /// `touchend`
    TouchEnd,
    /// `keyup`
    KeyUp,
    /// `mouseover`
    MouseOver,
    /// `mouseout`
    MouseOut,
    /// `scroll`
    Scroll,
    /// `resize`
    Resize,
    /// `gestureend`
    GestureEnd,
    /// `wheel`
    Wheel,
}

/// Where a listener is attached, or where an event is fired.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum EventTarget {
    /// The window. Last stop of every propagation path.
    Window,
    /// The document.
    Document,
    /// An element.
    Node(NodeId),
}

/// Type-specific event payload.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum EventDetail {
    /// No payload.
    #[default]
    None,
    /// Keyboard payload.
    Key {
        /// Modern key name, e.g. `"Escape"`.
        key: String,
        /// Legacy numeric key code.
        key_code: u32,
    },
    /// Wheel payload.
    Wheel {
        /// Vertical scroll delta; positive scrolls toward the bottom.
        delta_y: f64,
    },
}

/// An input or browser event.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    /// Event type.
    pub kind: EventType,
    /// Where the event was fired.
    pub target: EventTarget,
    /// When the event happened, on the document timeline.
    pub time_stamp: Duration,
    /// Type-specific payload.
    pub detail: EventDetail,
    default_prevented: bool,
}

impl Event {
    /// Create an event without payload.
    pub fn new(kind: EventType, target: EventTarget, time_stamp: Duration) -> Self {
        Self {
            kind,
            target,
            time_stamp,
            detail: EventDetail::None,
            default_prevented: false,
        }
    }

    /// A `click` on `node`.
    pub fn click(node: NodeId, time_stamp: Duration) -> Self {
        Self::new(EventType::Click, EventTarget::Node(node), time_stamp)
    }

    /// A `keyup` fired at the document.
    pub fn key_up(key: impl Into<String>, key_code: u32, time_stamp: Duration) -> Self {
        Self {
            detail: EventDetail::Key {
                key: key.into(),
                key_code,
            },
            ..Self::new(EventType::KeyUp, EventTarget::Document, time_stamp)
        }
    }

    /// A `wheel` over `node`.
    pub fn wheel(node: NodeId, delta_y: f64, time_stamp: Duration) -> Self {
        Self {
            detail: EventDetail::Wheel { delta_y },
            ..Self::new(EventType::Wheel, EventTarget::Node(node), time_stamp)
        }
    }

    /// The target node, if the event was fired at an element.
    pub fn target_node(&self) -> Option<NodeId> {
        match self.target {
            EventTarget::Node(id) => Some(id),
            EventTarget::Window | EventTarget::Document => None,
        }
    }

    /// Vertical wheel delta, zero for other payloads.
    pub fn delta_y(&self) -> f64 {
        match self.detail {
            EventDetail::Wheel { delta_y } => delta_y,
            _ => 0.0,
        }
    }

    /// Cancel the event's default action.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether [`prevent_default`](Self::prevent_default) was called.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Legacy key code of the Escape key.
pub const ESCAPE_KEY_CODE: u32 = 27;

/// True for Escape in any of its spellings: key code 27, `"Escape"`, or `"Esc"`.
pub fn is_escape(event: &Event) -> bool {
    match &event.detail {
        EventDetail::Key { key, key_code } => {
            *key_code == ESCAPE_KEY_CODE || key == "Escape" || key == "Esc"
        }
        _ => false,
    }
}

/// Bubble path for an event fired at `target`: the element and its ancestors
/// (innermost first), then the document, then the window.
pub fn propagation_path(doc: &Document, target: EventTarget) -> Vec<EventTarget> {
    let mut out = Vec::new();
    match target {
        EventTarget::Node(id) => {
            out.extend(doc.path_to_root(id).into_iter().rev().map(EventTarget::Node));
            // Detached subtrees do not reach the document.
            if doc.is_connected(id) {
                out.push(EventTarget::Document);
                out.push(EventTarget::Window);
            }
        }
        EventTarget::Document => {
            out.push(EventTarget::Document);
            out.push(EventTarget::Window);
        }
        EventTarget::Window => out.push(EventTarget::Window),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn escape_spellings() {
        let t = Duration::ZERO;
        assert!(is_escape(&Event::key_up("Escape", 0, t)));
        assert!(is_escape(&Event::key_up("Esc", 0, t)));
        assert!(is_escape(&Event::key_up("", 27, t)));
        assert!(!is_escape(&Event::key_up("Enter", 13, t)));
        assert!(!is_escape(&Event::new(EventType::KeyUp, EventTarget::Document, t)));
    }

    #[test]
    fn path_bubbles_to_window() {
        let mut doc = Document::new();
        let body = doc.body();
        let button = doc.create_element("button");
        doc.append_child(body, button).unwrap();
        let path = propagation_path(&doc, EventTarget::Node(button));
        assert_eq!(
            path,
            vec![
                EventTarget::Node(button),
                EventTarget::Node(body),
                EventTarget::Node(doc.root()),
                EventTarget::Document,
                EventTarget::Window,
            ]
        );
        assert_eq!(
            propagation_path(&doc, EventTarget::Window),
            vec![EventTarget::Window]
        );
    }

    #[test]
    fn detached_path_stays_in_subtree() {
        let mut doc = Document::new();
        let popover = doc.create_element("aside");
        let content = doc.create_element("div");
        doc.append_child(popover, content).unwrap();
        assert_eq!(
            propagation_path(&doc, EventTarget::Node(content)),
            vec![EventTarget::Node(content), EventTarget::Node(popover)]
        );
    }

    #[test]
    fn prevent_default_sticks() {
        let mut e = Event::new(EventType::Click, EventTarget::Document, Duration::ZERO);
        assert!(!e.default_prevented());
        e.prevent_default();
        assert!(e.default_prevented());
    }
}
