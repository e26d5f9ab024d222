// Copyright 2025 the Marginalia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marginalia Events: a deterministic, `no_std` event coordination layer.
//!
//! ## Overview
//!
//! This crate turns raw input (clicks, touches, keys, scrolls, resizes, pointer movement)
//! into the small action vocabulary of a footnote popover engine. It does not know what a
//! footnote *does*; it only knows which footnote an event is about and when to say so.
//!
//! ## Pieces
//!
//! - [`Listeners`](crate::listeners::Listeners) holds window/document/element listeners and
//!   dispatches an [`Event`](crate::types::Event) along its bubble path: target element,
//!   its ancestors, the document, then the window.
//! - [`AbortController`](crate::abort::AbortController) groups listeners so that one call
//!   detaches all of them.
//! - [`Throttle`](crate::throttle::Throttle) and [`Throttled`](crate::throttle::Throttled) bound
//!   high-frequency events to one leading and one trailing call per window.
//! - [`TimerQueue`](crate::timer::TimerQueue) stores one-shot deferred tasks for the layer above.
//! - [`add_listeners`](crate::actions::add_listeners) wires the whole set to an
//!   [`Actions`](crate::actions::Actions) implementation.
//!
//! ## Time
//!
//! Nothing here reads a clock. Every event carries its timestamp, and dispatch advances the
//! [`Document`](marginalia_dom::Document) timeline to it. Deferred work runs when the host
//! calls [`Listeners::poll`](crate::listeners::Listeners::poll) at or after
//! [`Listeners::next_deadline`](crate::listeners::Listeners::next_deadline), or implicitly
//! before the next dispatched event.
//!
//! ## Minimal usage
//!
//! ```
//! use core::cell::RefCell;
//! use core::time::Duration;
//! use std::rc::Rc;
//!
//! use marginalia_dom::Document;
//! use marginalia_events::actions::{Actions, FOOTNOTE_BUTTON, FOOTNOTE_ID, add_listeners};
//! use marginalia_events::listeners::Listeners;
//! use marginalia_events::types::Event;
//!
//! #[derive(Default)]
//! struct Toggled(Vec<String>);
//!
//! impl Actions for Toggled {
//!     fn toggle(&mut self, _: &mut Document, id: &str) { self.0.push(id.into()); }
//!     fn hover(&mut self, _: &mut Document, _: &str) {}
//!     fn unhover(&mut self, _: &mut Document, _: &str) {}
//!     fn dismiss_all(&mut self, _: &mut Document) {}
//!     fn touch_outside(&mut self, _: &mut Document) {}
//!     fn reposition_all(&mut self, _: &mut Document) {}
//!     fn resize_all(&mut self, _: &mut Document) {}
//! }
//!
//! let mut doc = Document::new();
//! let body = doc.body();
//! let button = doc.create_element("button");
//! doc.append_child(body, button).unwrap();
//! doc.set_attribute(button, FOOTNOTE_BUTTON, "");
//! doc.set_attribute(button, FOOTNOTE_ID, "1");
//!
//! let actions = Rc::new(RefCell::new(Toggled::default()));
//! let mut listeners = Listeners::new();
//! let teardown = add_listeners(&mut listeners, Rc::clone(&actions));
//!
//! let mut click = Event::click(button, Duration::ZERO);
//! listeners.dispatch(&mut doc, &mut click);
//! assert_eq!(actions.borrow().0, ["1"]);
//!
//! teardown.run();
//! listeners.dispatch(&mut doc, &mut Event::click(button, Duration::from_millis(1)));
//! assert_eq!(actions.borrow().0.len(), 1);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod abort;
pub mod actions;
pub mod listeners;
pub mod throttle;
pub mod timer;
pub mod types;
