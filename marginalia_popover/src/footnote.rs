// Copyright 2025 the Marginalia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-footnote lifecycle controller.
//!
//! ## States
//!
//! ```text
//!            activate()             ready()
//! Inactive ─────────────► Activating ───────► Active
//!    ▲                        │                  │
//!    │ remove()               │ dismiss()        │ dismiss()
//!    └──────────── Dismissing ◄──────────────────┘
//! ```
//!
//! The state is not stored as such. It is read back from the button: the
//! `is-active` class answers [`Footnote::is_active`], and the absence of
//! `is-changing` answers [`Footnote::is_ready`]. The two are independent, so a
//! footnote can be toggled again before its transition settles.
//!
//! Removal is a step of its own so that callers can run exit animations
//! between [`Footnote::dismiss`] and [`Footnote::remove`]. A removed popover is
//! kept alive and reinserted by the next activation.

use marginalia_dom::{Document, DomError, NodeId, Property, Selector, StyleValue};
use marginalia_layout::{Overlay, Position, Trigger, left_in_pixels, tooltip_left};

use crate::classes::{self, position_class};
use crate::nodes::FootnoteNodes;

/// Continuation run at the end of [`Footnote::activate`] and [`Footnote::dismiss`].
///
/// Receives the popover and the button.
pub type OnTransition<'a> = dyn FnMut(&mut Document, NodeId, NodeId) + 'a;

/// One activatable footnote bound to its node set.
#[derive(Clone, Debug)]
pub struct Footnote {
    nodes: FootnoteNodes,
    position: Position,
    max_height: f64,
}

impl Footnote {
    /// Wrap a node set. The footnote starts inactive, placed above its button.
    pub fn new(nodes: FootnoteNodes) -> Self {
        Self {
            nodes,
            position: Position::Above,
            max_height: f64::INFINITY,
        }
    }

    /// Identifier.
    pub fn id(&self) -> &str {
        &self.nodes.id
    }

    /// The node set this footnote owns.
    pub fn nodes(&self) -> &FootnoteNodes {
        &self.nodes
    }

    /// Placement decided by the last [`reposition`](Self::reposition).
    pub fn position(&self) -> Position {
        self.position
    }

    /// Content height limit from the stylesheet, measured at the last activation.
    pub fn max_height(&self) -> f64 {
        self.max_height
    }

    /// Show the popover next to the button.
    ///
    /// Fails only if the button can no longer take a sibling (stale or detached).
    /// Nothing is changed in that case.
    pub fn activate(
        &mut self,
        doc: &mut Document,
        on_activate: Option<&mut OnTransition<'_>>,
    ) -> Result<(), DomError> {
        let FootnoteNodes {
            button,
            popover,
            content,
            ..
        } = self.nodes;
        doc.insert_after(button, popover)?;
        tracing::debug!(id = %self.nodes.id, "activate");
        doc.set_attribute(button, "aria-expanded", "true");
        doc.add_class(button, classes::CHANGING);
        doc.add_class(button, classes::ACTIVE);

        let body_width = doc.layout(doc.body()).client_width;
        doc.set_style(popover, Property::MaxWidth, StyleValue::Px(body_width));

        let computed = doc.computed_style(content);
        self.max_height = computed
            .max_height
            .resolve(computed.font_size, doc.root_font_size());

        if let Some(callback) = on_activate {
            callback(doc, popover, button);
        }
        Ok(())
    }

    /// Hide the popover. It stays attached until [`remove`](Self::remove).
    pub fn dismiss(&mut self, doc: &mut Document, on_dismiss: Option<&mut OnTransition<'_>>) {
        let FootnoteNodes {
            button, popover, ..
        } = self.nodes;
        tracing::debug!(id = %self.nodes.id, "dismiss");
        doc.set_attribute(button, "aria-expanded", "false");
        doc.add_class(button, classes::CHANGING);
        doc.remove_class(button, classes::ACTIVE);
        doc.remove_class(popover, classes::ACTIVE);
        if let Some(callback) = on_dismiss {
            callback(doc, popover, button);
        }
    }

    /// Whether the last transition was an activation.
    pub fn is_active(&self, doc: &Document) -> bool {
        doc.has_class(self.nodes.button, classes::ACTIVE)
    }

    /// Whether the last transition has settled.
    pub fn is_ready(&self, doc: &Document) -> bool {
        !doc.has_class(self.nodes.button, classes::CHANGING)
    }

    /// Settle an activation.
    pub fn ready(&mut self, doc: &mut Document) {
        doc.add_class(self.nodes.popover, classes::ACTIVE);
        doc.remove_class(self.nodes.button, classes::CHANGING);
    }

    /// Settle a dismissal by detaching the popover.
    pub fn remove(&mut self, doc: &mut Document) {
        tracing::debug!(id = %self.nodes.id, "remove");
        doc.detach(self.nodes.popover);
        doc.remove_class(self.nodes.button, classes::CHANGING);
    }

    /// Place the popover above or below the button and clip its content.
    ///
    /// Does nothing while the popover is detached. Placement classes and the
    /// transform origin are only written when the placement flips.
    pub fn reposition(&mut self, doc: &mut Document) {
        let FootnoteNodes {
            button,
            popover,
            content,
            ..
        } = self.nodes;
        if !doc.is_connected(popover) {
            return;
        }
        let popover_layout = doc.layout(popover);
        let overlay = Overlay {
            height: popover_layout.offset_height(),
            margin: popover_layout.margin.y0,
        };
        let placement = marginalia_layout::reposition(
            &trigger(doc, button),
            &overlay,
            doc.viewport(),
            self.position,
        );

        if let Some(flip) = placement.flip {
            tracing::trace!(id = %self.nodes.id, from = ?flip.from, to = ?flip.to, "placement flip");
            doc.remove_class(popover, position_class(flip.from));
            doc.add_class(popover, position_class(flip.to));
            doc.set_style(
                popover,
                Property::TransformOrigin,
                StyleValue::Origin {
                    x: flip.origin.x,
                    y: flip.origin.y,
                },
            );
        }
        self.position = placement.position;

        let clip = self.max_height.min(placement.available_height);
        doc.set_style(content, Property::MaxHeight, StyleValue::Px(clip));

        if popover_layout.offset_height() < doc.layout(content).scroll_height {
            doc.add_class(popover, classes::SCROLLABLE);
            doc.set_attribute(content, "tabindex", "0");
        } else {
            doc.remove_class(popover, classes::SCROLLABLE);
            doc.remove_attribute(content, "tabindex");
        }
    }

    /// Align the popover horizontally under the button.
    ///
    /// Does nothing while the popover is detached.
    pub fn resize(&mut self, doc: &mut Document) {
        let FootnoteNodes {
            button,
            popover,
            wrapper,
            content,
            ..
        } = self.nodes;
        if !doc.is_connected(popover) {
            return;
        }
        let trigger = trigger(doc, button);
        let viewport_width = doc.viewport().width;
        let content_width = doc.layout(content).offset_width();

        let left = left_in_pixels(&trigger, content_width, viewport_width);
        doc.set_style(popover, Property::Left, StyleValue::Px(left));
        doc.set_style(wrapper, Property::MaxWidth, StyleValue::Px(content_width));

        if let Some(tooltip) = doc.query_selector(popover, &Selector::class(classes::TOOLTIP)) {
            let left = tooltip_left(&trigger, viewport_width);
            doc.set_style(tooltip, Property::Left, StyleValue::Percent(left));
        }
    }

    /// Remove the whole footnote from the page. Not reversible.
    pub fn destroy(self, doc: &mut Document) {
        tracing::debug!(id = %self.nodes.id, "destroy");
        doc.detach(self.nodes.host);
    }
}

fn trigger(doc: &Document, button: NodeId) -> Trigger {
    let layout = doc.layout(button);
    Trigger {
        rect: layout.rect,
        margin_left: layout.margin.x0,
    }
}
