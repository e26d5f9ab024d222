// Copyright 2025 the Marginalia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Translate raw input into the footnote action vocabulary.
//!
//! ## Listeners
//!
//! [`add_listeners`] attaches one fixed set of document/window listeners, all
//! sharing a single [`AbortController`]:
//!
//! | Event | Attached to | Action |
//! |---|---|---|
//! | `touchend`, `click` | document | `toggle(id)` inside a button, else `touch_outside()` unless inside a popover |
//! | `keyup` | document | `dismiss_all()` on Escape |
//! | `gestureend` | document | `reposition_all()`, throttled |
//! | `scroll` | window | `reposition_all()`, throttled |
//! | `resize` | window | `resize_all()`, throttled |
//! | `mouseover` | document, delegated to `[data-footnote-id]` | `hover(id)` |
//! | `mouseout` | document, delegated to `[data-footnote-id]` | `unhover(id)` |
//!
//! Identifiers are read from the `data-footnote-id` attribute of the nearest
//! matching ancestor of the event target.

use alloc::rc::Rc;
use alloc::string::{String, ToString};
use core::cell::RefCell;

use marginalia_dom::{Document, NodeId, Selector};

use crate::abort::{AbortController, AbortSignal};
use crate::listeners::Listeners;
use crate::throttle::{FRAME, Throttled};
use crate::types::{Event, EventTarget, EventType, is_escape};

/// Attribute carrying the footnote identifier, on buttons and popovers.
pub const FOOTNOTE_ID: &str = "data-footnote-id";
/// Marker attribute of footnote buttons.
pub const FOOTNOTE_BUTTON: &str = "data-footnote-button";
/// Marker attribute of footnote popovers.
pub const FOOTNOTE_POPOVER: &str = "data-footnote-popover";

/// The operations the coordination layer invokes.
///
/// Implementations decide what each action means for their footnotes.
pub trait Actions {
    /// Activate or dismiss one footnote.
    fn toggle(&mut self, doc: &mut Document, id: &str);
    /// Pointer entered a footnote's button or popover.
    fn hover(&mut self, doc: &mut Document, id: &str);
    /// Pointer left a footnote's button or popover.
    fn unhover(&mut self, doc: &mut Document, id: &str);
    /// Dismiss every footnote.
    fn dismiss_all(&mut self, doc: &mut Document);
    /// The user touched the page outside any button or popover.
    fn touch_outside(&mut self, doc: &mut Document);
    /// Recompute placement of every footnote.
    fn reposition_all(&mut self, doc: &mut Document);
    /// Recompute size and placement of every footnote.
    fn resize_all(&mut self, doc: &mut Document);
}

/// Handle that detaches every listener registered by one [`add_listeners`] call.
#[must_use = "dropping a Teardown leaves the listeners attached"]
#[derive(Debug)]
pub struct Teardown {
    controller: AbortController,
}

impl Teardown {
    /// Signal of this group, for registering further listeners with the same lifetime.
    pub fn signal(&self) -> AbortSignal {
        self.controller.signal()
    }

    /// Detach the whole group. Pending throttled calls are discarded.
    pub fn run(self) {
        tracing::debug!("tearing down footnote listeners");
        self.controller.abort();
    }
}

/// Footnote identifier of the nearest inclusive ancestor of `node` matching `selector`.
///
/// Empty identifiers count as absent.
pub fn footnote_id(doc: &Document, node: NodeId, selector: &Selector) -> Option<String> {
    let matched = doc.closest(node, selector)?;
    doc.attribute(matched, FOOTNOTE_ID)
        .filter(|id| !id.is_empty())
        .map(ToString::to_string)
}

/// Attach the footnote listener set and return its teardown handle.
///
/// Each call creates a fresh, independent group; calling it again after
/// [`Teardown::run`] re-registers everything.
pub fn add_listeners<A>(listeners: &mut Listeners, actions: Rc<RefCell<A>>) -> Teardown
where
    A: Actions + 'static,
{
    let controller = AbortController::new();
    let signal = controller.signal();

    for kind in [EventType::TouchEnd, EventType::Click] {
        let actions = Rc::clone(&actions);
        listeners.add_event_listener(
            EventTarget::Document,
            kind,
            move |doc: &mut Document, event: &mut Event| toggle_on_touch(&actions, doc, event),
            Some(&signal),
        );
    }

    let on_escape = Rc::clone(&actions);
    listeners.add_event_listener(
        EventTarget::Document,
        EventType::KeyUp,
        move |doc: &mut Document, event: &mut Event| {
            if is_escape(event) {
                on_escape.borrow_mut().dismiss_all(doc);
            }
        },
        Some(&signal),
    );

    let throttled = [
        (EventTarget::Document, EventType::GestureEnd, A::reposition_all as fn(&mut A, &mut Document)),
        (EventTarget::Window, EventType::Scroll, A::reposition_all),
        (EventTarget::Window, EventType::Resize, A::resize_all),
    ];
    for (target, kind, action) in throttled {
        let actions = Rc::clone(&actions);
        listeners.add_event_listener(
            target,
            kind,
            Throttled::new(FRAME, move |doc: &mut Document, _event: &mut Event| {
                action(&mut actions.borrow_mut(), doc);
            }),
            Some(&signal),
        );
    }

    listeners.add_event_listener(
        EventTarget::Document,
        EventType::MouseOver,
        delegate(Selector::attribute(FOOTNOTE_ID), Rc::clone(&actions), A::hover),
        Some(&signal),
    );
    listeners.add_event_listener(
        EventTarget::Document,
        EventType::MouseOut,
        delegate(Selector::attribute(FOOTNOTE_ID), actions, A::unhover),
        Some(&signal),
    );

    tracing::debug!("footnote listeners attached");
    Teardown { controller }
}

fn toggle_on_touch<A: Actions>(actions: &RefCell<A>, doc: &mut Document, event: &mut Event) {
    let target = event.target_node();
    let button = Selector::attribute(FOOTNOTE_BUTTON);
    if let Some(matched) = target.and_then(|t| doc.closest(t, &button)) {
        // A button without an identifier is still a button: neither toggle nor outside.
        if let Some(id) = footnote_id(doc, matched, &button) {
            tracing::trace!(id = %id, kind = ?event.kind, "toggle");
            event.prevent_default();
            actions.borrow_mut().toggle(doc, &id);
        }
        return;
    }
    let popover = Selector::attribute(FOOTNOTE_POPOVER);
    if target.and_then(|t| doc.closest(t, &popover)).is_none() {
        actions.borrow_mut().touch_outside(doc);
    }
}

/// Run `action` with the identifier of the nearest ancestor matching `selector`.
///
/// Events that do not come from inside a match are ignored. Matched events have
/// their default action prevented before the identifier is read.
fn delegate<A: Actions>(
    selector: Selector,
    actions: Rc<RefCell<A>>,
    action: fn(&mut A, &mut Document, &str),
) -> impl FnMut(&mut Document, &mut Event) + 'static
where
    A: 'static,
{
    move |doc, event| {
        let Some(matched) = event.target_node().and_then(|t| doc.closest(t, &selector)) else {
            return;
        };
        event.prevent_default();
        if let Some(id) = footnote_id(doc, matched, &selector) {
            tracing::trace!(id = %id, kind = ?event.kind, "delegated");
            action(&mut actions.borrow_mut(), doc, &id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::time::Duration;

    #[derive(Debug, Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl Actions for Recorder {
        fn toggle(&mut self, _doc: &mut Document, id: &str) {
            self.calls.push(alloc::format!("toggle:{id}"));
        }
        fn hover(&mut self, _doc: &mut Document, id: &str) {
            self.calls.push(alloc::format!("hover:{id}"));
        }
        fn unhover(&mut self, _doc: &mut Document, id: &str) {
            self.calls.push(alloc::format!("unhover:{id}"));
        }
        fn dismiss_all(&mut self, _doc: &mut Document) {
            self.calls.push("dismiss_all".into());
        }
        fn touch_outside(&mut self, _doc: &mut Document) {
            self.calls.push("touch_outside".into());
        }
        fn reposition_all(&mut self, _doc: &mut Document) {
            self.calls.push("reposition_all".into());
        }
        fn resize_all(&mut self, _doc: &mut Document) {
            self.calls.push("resize_all".into());
        }
    }

    struct Page {
        doc: Document,
        listeners: Listeners,
        actions: Rc<RefCell<Recorder>>,
        label: [NodeId; 2],
        popover_text: NodeId,
        paragraph: NodeId,
    }

    impl Page {
        fn new() -> Self {
            let mut doc = Document::new();
            let body = doc.body();
            let paragraph = doc.create_element("p");
            doc.append_child(body, paragraph).unwrap();
            let mut label = [paragraph; 2];
            let mut popover_text = paragraph;
            for (i, id) in ["3", "4"].into_iter().enumerate() {
                let button = doc.create_element("button");
                let sup = doc.create_element("sup");
                doc.append_child(paragraph, button).unwrap();
                doc.append_child(button, sup).unwrap();
                doc.set_attribute(button, FOOTNOTE_BUTTON, "");
                doc.set_attribute(button, FOOTNOTE_ID, id);
                label[i] = sup;
                if i == 0 {
                    let popover = doc.create_element("aside");
                    let text = doc.create_element("span");
                    doc.append_child(popover, text).unwrap();
                    doc.set_attribute(popover, FOOTNOTE_POPOVER, "");
                    doc.set_attribute(popover, FOOTNOTE_ID, id);
                    doc.insert_after(button, popover).unwrap();
                    popover_text = text;
                }
            }
            Self {
                doc,
                listeners: Listeners::new(),
                actions: Rc::default(),
                label,
                popover_text,
                paragraph,
            }
        }

        fn fire(&mut self, mut event: Event) -> bool {
            self.listeners.dispatch(&mut self.doc, &mut event)
        }

        fn calls(&self) -> Vec<String> {
            self.actions.borrow().calls.clone()
        }
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn click_on_button_toggles_that_footnote_only() {
        let mut page = Page::new();
        let _teardown = add_listeners(&mut page.listeners, Rc::clone(&page.actions));
        let not_prevented = page.fire(Event::click(page.label[0], ms(0)));
        assert!(!not_prevented, "toggle suppresses the default action");
        assert_eq!(page.calls(), vec!["toggle:3"]);
    }

    #[test]
    fn touch_inside_popover_is_not_outside() {
        let mut page = Page::new();
        let _teardown = add_listeners(&mut page.listeners, Rc::clone(&page.actions));
        let text = page.popover_text;
        page.fire(Event::new(EventType::TouchEnd, EventTarget::Node(text), ms(0)));
        assert!(page.calls().is_empty());
        let paragraph = page.paragraph;
        assert!(page.fire(Event::new(EventType::TouchEnd, EventTarget::Node(paragraph), ms(1))));
        assert_eq!(page.calls(), vec!["touch_outside"]);
    }

    #[test]
    fn button_without_an_id_is_neither_toggle_nor_outside() {
        let mut page = Page::new();
        let _teardown = add_listeners(&mut page.listeners, Rc::clone(&page.actions));
        let bare = page.doc.create_element("button");
        let paragraph = page.paragraph;
        page.doc.append_child(paragraph, bare).unwrap();
        page.doc.set_attribute(bare, FOOTNOTE_BUTTON, "");
        assert!(page.fire(Event::click(bare, ms(0))));

        page.doc.set_attribute(bare, FOOTNOTE_ID, "");
        page.fire(Event::new(EventType::TouchEnd, EventTarget::Node(bare), ms(1)));
        assert!(page.calls().is_empty(), "{:?}", page.calls());
    }

    #[test]
    fn escape_dismisses_all() {
        let mut page = Page::new();
        let _teardown = add_listeners(&mut page.listeners, Rc::clone(&page.actions));
        page.fire(Event::key_up("Enter", 13, ms(0)));
        page.fire(Event::key_up("Esc", 0, ms(1)));
        page.fire(Event::key_up("", 27, ms(2)));
        assert_eq!(page.calls(), vec!["dismiss_all", "dismiss_all"]);
    }

    #[test]
    fn hover_is_delegated_to_buttons_and_popovers() {
        let mut page = Page::new();
        let _teardown = add_listeners(&mut page.listeners, Rc::clone(&page.actions));
        let over = |n, t| Event::new(EventType::MouseOver, EventTarget::Node(n), ms(t));
        let out = |n, t| Event::new(EventType::MouseOut, EventTarget::Node(n), ms(t));
        assert!(!page.fire(over(page.label[1], 0)));
        page.fire(out(page.label[1], 1));
        page.fire(over(page.popover_text, 2));
        assert!(page.fire(over(page.paragraph, 3)), "unmatched targets are left alone");
        assert_eq!(page.calls(), vec!["hover:4", "unhover:4", "hover:3"]);
    }

    #[test]
    fn scroll_and_resize_are_throttled_per_listener() {
        let mut page = Page::new();
        let _teardown = add_listeners(&mut page.listeners, Rc::clone(&page.actions));
        for t in 0..10 {
            page.fire(Event::new(EventType::Scroll, EventTarget::Window, ms(t)));
        }
        page.fire(Event::new(EventType::Resize, EventTarget::Window, ms(10)));
        page.fire(Event::new(EventType::GestureEnd, EventTarget::Document, ms(11)));
        assert_eq!(page.calls(), vec!["reposition_all", "resize_all", "reposition_all"]);
        page.listeners.poll(&mut page.doc, ms(16));
        assert_eq!(
            page.calls(),
            vec!["reposition_all", "resize_all", "reposition_all", "reposition_all"],
            "one trailing scroll call"
        );
        assert_eq!(page.listeners.next_deadline(), None);
    }

    #[test]
    fn teardown_silences_every_listener() {
        let mut page = Page::new();
        let teardown = add_listeners(&mut page.listeners, Rc::clone(&page.actions));
        page.fire(Event::new(EventType::Scroll, EventTarget::Window, ms(0)));
        page.fire(Event::new(EventType::Scroll, EventTarget::Window, ms(1)));
        teardown.run();
        let label = page.label[0];
        let events = [
            Event::click(label, ms(2)),
            Event::new(EventType::TouchEnd, EventTarget::Node(label), ms(3)),
            Event::key_up("Escape", 27, ms(4)),
            Event::new(EventType::MouseOver, EventTarget::Node(label), ms(5)),
            Event::new(EventType::MouseOut, EventTarget::Node(label), ms(6)),
            Event::new(EventType::Scroll, EventTarget::Window, ms(40)),
            Event::new(EventType::Resize, EventTarget::Window, ms(41)),
            Event::new(EventType::GestureEnd, EventTarget::Document, ms(42)),
        ];
        for e in events {
            assert!(page.fire(e));
        }
        page.listeners.poll(&mut page.doc, ms(100));
        assert_eq!(page.calls(), vec!["reposition_all"], "pending trailing call was discarded");
        assert!(page.listeners.is_empty());
    }

    #[test]
    fn setup_after_teardown_registers_a_fresh_group() {
        let mut page = Page::new();
        add_listeners(&mut page.listeners, Rc::clone(&page.actions)).run();
        let _teardown = add_listeners(&mut page.listeners, Rc::clone(&page.actions));
        page.fire(Event::click(page.label[1], ms(0)));
        assert_eq!(page.calls(), vec!["toggle:4"], "exactly one live group");
    }
}
