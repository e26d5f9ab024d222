// Copyright 2025 the Marginalia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The node set owned by one footnote.

use alloc::string::{String, ToString};

use marginalia_dom::{Document, DomError, NodeId};
use marginalia_events::actions::{FOOTNOTE_BUTTON, FOOTNOTE_ID, FOOTNOTE_POPOVER};

use crate::classes;

/// The five nodes of a footnote, plus its identifier.
///
/// The host and button live in the main flow. The popover subtree
/// (popover > wrapper > content) is attached next to the button only while the
/// footnote is shown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FootnoteNodes {
    /// Identifier, stable for the page lifetime.
    pub id: String,
    /// Outer element in the main flow; removed on destroy.
    pub host: NodeId,
    /// Clickable marker.
    pub button: NodeId,
    /// Overlay container.
    pub popover: NodeId,
    /// Width-constraining shell inside the popover.
    pub wrapper: NodeId,
    /// Scrollable region holding the footnote body.
    pub content: NodeId,
}

impl FootnoteNodes {
    /// Build the standard structure for footnote `id` and attach its host to `parent`.
    ///
    /// ```text
    /// span.littlefoot                      (host, appended to parent)
    /// └─ button[data-footnote-button]      (aria-expanded="false")
    ///
    /// aside[data-footnote-popover].is-above   (detached)
    /// ├─ div.littlefoot__wrapper
    /// │  └─ div.littlefoot__content
    /// └─ div.littlefoot__tooltip
    /// ```
    ///
    /// Both the button and the popover carry `data-footnote-id`.
    pub fn scaffold(doc: &mut Document, parent: NodeId, id: &str) -> Result<Self, DomError> {
        let host = doc.create_element("span");
        doc.add_class(host, "littlefoot");
        doc.append_child(parent, host)?;

        let button = doc.create_element("button");
        doc.add_class(button, "littlefoot__button");
        doc.set_attribute(button, FOOTNOTE_BUTTON, "");
        doc.set_attribute(button, FOOTNOTE_ID, id);
        doc.set_attribute(button, "aria-expanded", "false");
        doc.append_child(host, button)?;

        let popover = doc.create_element("aside");
        doc.add_class(popover, "littlefoot__popover");
        doc.add_class(popover, classes::ABOVE);
        doc.set_attribute(popover, FOOTNOTE_POPOVER, "");
        doc.set_attribute(popover, FOOTNOTE_ID, id);

        let wrapper = doc.create_element("div");
        doc.add_class(wrapper, "littlefoot__wrapper");
        doc.append_child(popover, wrapper)?;

        let content = doc.create_element("div");
        doc.add_class(content, "littlefoot__content");
        doc.append_child(wrapper, content)?;

        let tooltip = doc.create_element("div");
        doc.add_class(tooltip, classes::TOOLTIP);
        doc.append_child(popover, tooltip)?;

        Ok(Self {
            id: id.to_string(),
            host,
            button,
            popover,
            wrapper,
            content,
        })
    }

    /// True if every node handle is still live.
    pub fn is_alive(&self, doc: &Document) -> bool {
        [self.host, self.button, self.popover, self.wrapper, self.content]
            .into_iter()
            .all(|n| doc.is_alive(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marginalia_dom::Selector;

    #[test]
    fn scaffold_attaches_only_the_host() {
        let mut doc = Document::new();
        let body = doc.body();
        let nodes = FootnoteNodes::scaffold(&mut doc, body, "7").unwrap();
        assert!(doc.is_connected(nodes.button), "button is in the flow");
        assert!(!doc.is_connected(nodes.popover), "popover waits for activation");
        assert!(doc.contains(nodes.popover, nodes.content));
        assert!(doc.has_class(nodes.popover, classes::ABOVE));
        assert_eq!(doc.attribute(nodes.popover, FOOTNOTE_ID), Some("7"));
        assert_eq!(doc.attribute(nodes.button, "aria-expanded"), Some("false"));
        assert!(
            doc.query_selector(nodes.popover, &Selector::class(classes::TOOLTIP)).is_some(),
            "tooltip indicator is part of the popover"
        );
        assert!(nodes.is_alive(&doc));
    }

    #[test]
    fn deleted_nodes_are_not_alive() {
        let mut doc = Document::new();
        let body = doc.body();
        let nodes = FootnoteNodes::scaffold(&mut doc, body, "1").unwrap();
        doc.delete(nodes.popover);
        assert!(!nodes.is_alive(&doc));
    }
}
