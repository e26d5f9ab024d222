// Copyright 2025 the Marginalia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marginalia Popover: footnote references as interactive popovers.
//!
//! ## Overview
//!
//! Each footnote is a [`Footnote`] controller over five nodes ([`FootnoteNodes`]): a host in the
//! main flow, a button inside it, and a popover subtree (popover, wrapper, content) that is only
//! attached while the footnote is shown.
//!
//! - [`Footnote`] runs the activation state machine and places its popover with
//!   [`marginalia_layout`].
//! - [`ScrollBoundary`] marks a popover once its content is scrolled to the bottom.
//! - [`UseCases`] owns all footnotes of a page and implements the
//!   [`Actions`](marginalia_events::actions::Actions) the event layer invokes.
//! - [`Marginalia`] mounts everything on a [`Listeners`](marginalia_events::listeners::Listeners)
//!   table and tears it down again.
//!
//! ## Driving the engine
//!
//! The engine never reads a clock. Feed it events with [`Marginalia::dispatch`] and move time
//! with [`Marginalia::advance`]; [`Marginalia::next_deadline`] says when that is next needed.
//!
//! ```
//! use core::time::Duration;
//! use kurbo::{Rect, Size};
//! use marginalia_dom::{Document, Layout};
//! use marginalia_events::types::Event;
//! use marginalia_popover::{Footnote, FootnoteNodes, Marginalia, Settings};
//!
//! let mut doc = Document::new();
//! doc.set_viewport(Size::new(800.0, 600.0));
//! let body = doc.body();
//! let nodes = FootnoteNodes::scaffold(&mut doc, body, "1").unwrap();
//! doc.set_layout(nodes.button, Layout::from_rect(Rect::new(100.0, 80.0, 112.0, 100.0)));
//!
//! let mut engine = Marginalia::mount(&doc, vec![Footnote::new(nodes.clone())], Settings::default());
//! engine.dispatch(&mut doc, &mut Event::click(nodes.button, Duration::ZERO));
//! assert!(engine.is_active(&doc, "1"));
//! assert_eq!(doc.next_sibling(nodes.button), Some(nodes.popover));
//!
//! engine.advance(&mut doc, Duration::from_millis(100));
//! assert!(engine.use_cases().footnote("1").unwrap().is_ready(&doc));
//!
//! engine.unmount(&mut doc);
//! assert!(!doc.is_connected(nodes.host));
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to the sibling crates and Kurbo.
//! - `libm`: `no_std` math through Kurbo.
//! - `serde`: `Serialize`/`Deserialize` for [`Settings`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod classes;
mod footnote;
mod mount;
mod nodes;
mod scroll;
mod settings;
mod use_cases;

pub use footnote::{Footnote, OnTransition};
pub use mount::Marginalia;
pub use nodes::FootnoteNodes;
pub use scroll::{ScrollBoundary, bind_scroll_handler};
pub use settings::Settings;
pub use use_cases::UseCases;
