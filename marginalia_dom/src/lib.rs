// Copyright 2025 the Marginalia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marginalia DOM: a headless, generational document model.
//!
//! The popover engine reads and writes a small slice of the browser DOM: tree
//! structure, attributes, class lists, a handful of inline style properties, and
//! layout metrics. This crate models exactly that slice so the engine can run,
//! and be tested, without a browser.
//!
//! - Represents a hierarchy of elements addressed by generational [`NodeId`]s.
//! - Distinguishes *detached* nodes (alive, reinsertable) from *deleted* ones (slot freed).
//! - Answers ancestry questions with [`Document::closest`] and [`Selector`].
//! - Records effective writes as [`MutationRecord`]s while observed.
//!
//! ## Not a layout engine
//!
//! Geometry is host input. Upstream code measures elements however it likes and stores the
//! results with [`Document::set_layout`] and [`Document::set_computed_style`]; the window size
//! goes in through [`Document::set_viewport`]. Writes the engine performs (inline `max-height`,
//! classes, and so on) do not reflow anything by themselves.
//!
//! ## Timeline
//!
//! The document carries a monotonic clock ([`Document::current_time`]). Event dispatch and
//! polling move it forward, which lets deferred work (throttles, timers) run deterministically.
//!
//! ## Minimal usage
//!
//! ```
//! use marginalia_dom::{Document, Selector};
//!
//! let mut doc = Document::new();
//! let body = doc.body();
//! let button = doc.create_element("button");
//! let popover = doc.create_element("aside");
//! doc.append_child(body, button).unwrap();
//! doc.set_attribute(button, "data-footnote-id", "1");
//!
//! // Place the popover right after its button.
//! doc.insert_after(button, popover).unwrap();
//! assert_eq!(doc.next_sibling(button), Some(popover));
//! assert!(doc.is_connected(popover));
//!
//! // Detach keeps the node around for the next activation.
//! doc.detach(popover);
//! assert!(!doc.is_connected(popover));
//! assert!(doc.is_alive(popover));
//!
//! let marker = Selector::attribute("data-footnote-id");
//! assert_eq!(doc.closest(button, &marker), Some(button));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod document;
mod error;
mod selector;
mod types;

pub use document::Document;
pub use error::DomError;
pub use selector::Selector;
pub use types::{
    ComputedStyle, Layout, Length, MutationKind, MutationRecord, NodeId, Property, StyleValue,
};
