// Copyright 2025 the Marginalia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mounting: one object that owns the listeners and the footnotes of a page.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Ref, RefCell};
use core::time::Duration;

use marginalia_dom::{Document, NodeId};
use marginalia_events::actions::{Teardown, add_listeners};
use marginalia_events::listeners::Listeners;
use marginalia_events::types::Event;

use crate::footnote::Footnote;
use crate::scroll::bind_scroll_handler;
use crate::settings::Settings;
use crate::use_cases::UseCases;

/// A mounted footnote engine.
///
/// The host feeds it events with [`dispatch`](Self::dispatch) and drives deferred
/// work with [`advance`](Self::advance), ideally at [`next_deadline`](Self::next_deadline).
#[derive(Debug)]
pub struct Marginalia {
    listeners: Listeners,
    use_cases: Rc<RefCell<UseCases>>,
    teardown: Teardown,
}

impl Marginalia {
    /// Take over `footnotes` and start listening.
    ///
    /// Footnotes whose nodes no longer exist are dropped.
    pub fn mount(doc: &Document, footnotes: Vec<Footnote>, settings: Settings) -> Self {
        let footnotes: Vec<Footnote> = footnotes
            .into_iter()
            .filter(|f| {
                let alive = f.nodes().is_alive(doc);
                if !alive {
                    tracing::warn!(id = %f.id(), "skipping footnote with stale nodes");
                }
                alive
            })
            .collect();
        tracing::debug!(count = footnotes.len(), "mount");

        let use_cases = Rc::new(RefCell::new(UseCases::new(footnotes, settings)));
        let mut listeners = Listeners::new();
        let teardown = add_listeners(&mut listeners, Rc::clone(&use_cases));
        let signal = teardown.signal();
        for footnote in use_cases.borrow().footnotes() {
            bind_scroll_handler(&mut listeners, footnote.nodes(), Some(&signal));
        }
        Self {
            listeners,
            use_cases,
            teardown,
        }
    }

    /// Run `f` after every activation, with the popover and the button.
    pub fn on_activate(&mut self, f: impl FnMut(&mut Document, NodeId, NodeId) + 'static) {
        self.use_cases.borrow_mut().set_on_activate(f);
    }

    /// Run `f` after every dismissal, with the popover and the button.
    pub fn on_dismiss(&mut self, f: impl FnMut(&mut Document, NodeId, NodeId) + 'static) {
        self.use_cases.borrow_mut().set_on_dismiss(f);
    }

    /// Deliver one event. Returns `false` if its default action was prevented.
    ///
    /// Deferred work due before the event's timestamp runs first.
    pub fn dispatch(&mut self, doc: &mut Document, event: &mut Event) -> bool {
        self.advance(doc, event.time_stamp);
        let not_prevented = self.listeners.dispatch(doc, event);
        self.use_cases.borrow_mut().tick(doc);
        not_prevented
    }

    /// Move time forward to `now`, running throttled calls and transitions in
    /// deadline order.
    pub fn advance(&mut self, doc: &mut Document, now: Duration) {
        while let Some(due) = self.next_deadline().filter(|d| *d <= now) {
            self.listeners.poll(doc, due);
            self.use_cases.borrow_mut().tick(doc);
        }
        doc.advance_time(now);
    }

    /// Earliest instant at which [`advance`](Self::advance) has work to do.
    pub fn next_deadline(&self) -> Option<Duration> {
        let listeners = self.listeners.next_deadline();
        let timers = self.use_cases.borrow().next_deadline();
        match (listeners, timers) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Activate footnote `id`. Without a delay, the configured activation delay is used.
    pub fn activate(&mut self, doc: &mut Document, id: &str, delay: Option<Duration>) {
        let mut cases = self.use_cases.borrow_mut();
        let delay = delay.unwrap_or(cases.settings().activate_delay);
        cases.activate_id(doc, id, delay);
    }

    /// Dismiss footnote `id`. Without a delay, the configured dismissal delay is used.
    pub fn dismiss(&mut self, doc: &mut Document, id: &str, delay: Option<Duration>) {
        let mut cases = self.use_cases.borrow_mut();
        let delay = delay.unwrap_or(cases.settings().dismiss_delay);
        cases.dismiss_id(doc, id, delay);
    }

    /// Dismiss every footnote with the configured dismissal delay.
    pub fn dismiss_all(&mut self, doc: &mut Document) {
        let mut cases = self.use_cases.borrow_mut();
        let delay = cases.settings().dismiss_delay;
        cases.dismiss_every(doc, delay);
    }

    /// Whether footnote `id` is active. False for unknown ids.
    pub fn is_active(&self, doc: &Document, id: &str) -> bool {
        self.use_cases
            .borrow()
            .footnote(id)
            .is_some_and(|f| f.is_active(doc))
    }

    /// Read access to the footnotes and their settings.
    pub fn use_cases(&self) -> Ref<'_, UseCases> {
        self.use_cases.borrow()
    }

    /// Current settings.
    pub fn settings(&self) -> Settings {
        self.use_cases.borrow().settings().clone()
    }

    /// Replace the settings.
    pub fn update_settings(&mut self, settings: Settings) {
        self.use_cases.borrow_mut().set_settings(settings);
    }

    /// Stop listening, close everything at once, and remove every footnote from the page.
    pub fn unmount(self, doc: &mut Document) {
        tracing::debug!("unmount");
        self.teardown.run();
        self.use_cases.borrow_mut().unmount(doc);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Rect, Size};
    use marginalia_dom::Layout;
    use marginalia_events::types::{EventTarget, EventType};

    use crate::classes;
    use crate::nodes::FootnoteNodes;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn page(ids: &[&str]) -> (Document, Vec<FootnoteNodes>) {
        let mut doc = Document::new();
        doc.set_viewport(Size::new(800.0, 800.0));
        let body = doc.body();
        let paragraph = doc.create_element("p");
        doc.append_child(body, paragraph).unwrap();
        let nodes: Vec<_> = ids
            .iter()
            .map(|id| FootnoteNodes::scaffold(&mut doc, paragraph, id).unwrap())
            .collect();
        for (i, n) in nodes.iter().enumerate() {
            let x = 100.0 + 50.0 * i as f64;
            doc.set_layout(n.button, Layout::from_rect(Rect::new(x, 100.0, x + 12.0, 120.0)));
            doc.set_layout(n.popover, Layout::from_rect(Rect::new(0.0, 0.0, 300.0, 120.0)));
            doc.set_layout(
                n.content,
                Layout {
                    client_height: 100.0,
                    scroll_height: 200.0,
                    ..Layout::from_rect(Rect::new(0.0, 0.0, 300.0, 100.0))
                },
            );
        }
        (doc, nodes)
    }

    fn mount(doc: &Document, nodes: &[FootnoteNodes], settings: Settings) -> Marginalia {
        let footnotes = nodes.iter().cloned().map(Footnote::new).collect();
        Marginalia::mount(doc, footnotes, settings)
    }

    #[test]
    fn click_on_button_three_toggles_only_three() {
        let (mut doc, nodes) = page(&["1", "3", "5"]);
        let mut engine = mount(&doc, &nodes, Settings::default());
        let not_prevented = engine.dispatch(&mut doc, &mut Event::click(nodes[1].button, ms(0)));
        assert!(!not_prevented);
        assert!(engine.is_active(&doc, "3"));
        assert!(!engine.is_active(&doc, "1") && !engine.is_active(&doc, "5"));
        assert_eq!(doc.next_sibling(nodes[1].button), Some(nodes[1].popover));
    }

    #[test]
    fn full_cycle_through_events_and_time() {
        let (mut doc, nodes) = page(&["1"]);
        let n = &nodes[0];
        let mut engine = mount(&doc, &nodes, Settings::default());
        engine.dispatch(&mut doc, &mut Event::click(n.button, ms(0)));
        assert_eq!(engine.next_deadline(), Some(ms(100)));
        engine.advance(&mut doc, ms(100));
        assert!(doc.has_class(n.popover, classes::ACTIVE), "settled");

        // Escape dismisses; the popover leaves after the dismissal delay.
        engine.dispatch(&mut doc, &mut Event::key_up("Escape", 27, ms(150)));
        assert!(!engine.is_active(&doc, "1"));
        assert!(doc.is_connected(n.popover));
        engine.advance(&mut doc, ms(250));
        assert!(!doc.is_connected(n.popover));
        assert_eq!(engine.next_deadline(), None);
    }

    #[test]
    fn click_elsewhere_dismisses() {
        let (mut doc, nodes) = page(&["1"]);
        let mut engine = mount(&doc, &nodes, Settings::default());
        engine.dispatch(&mut doc, &mut Event::click(nodes[0].button, ms(0)));
        let body = doc.body();
        engine.dispatch(
            &mut doc,
            &mut Event::new(EventType::TouchEnd, EventTarget::Node(body), ms(10)),
        );
        assert!(!engine.is_active(&doc, "1"));
    }

    #[test]
    fn click_inside_popover_keeps_it_open() {
        let (mut doc, nodes) = page(&["1"]);
        let mut engine = mount(&doc, &nodes, Settings::default());
        engine.dispatch(&mut doc, &mut Event::click(nodes[0].button, ms(0)));
        engine.dispatch(&mut doc, &mut Event::click(nodes[0].content, ms(10)));
        assert!(engine.is_active(&doc, "1"));
    }

    #[test]
    fn wheel_over_content_marks_the_bottom() {
        let (mut doc, nodes) = page(&["1"]);
        let n = &nodes[0];
        let mut engine = mount(&doc, &nodes, Settings::default());
        engine.dispatch(&mut doc, &mut Event::click(n.button, ms(0)));
        doc.update_layout(n.content, |l| l.scroll_top = 100.0);
        engine.dispatch(&mut doc, &mut Event::wheel(n.content, 30.0, ms(10)));
        assert!(doc.has_class(n.popover, classes::FULLY_SCROLLED));
    }

    #[test]
    fn programmatic_activation_uses_configured_delays() {
        let (mut doc, nodes) = page(&["1", "2"]);
        let mut engine = mount(&doc, &nodes, Settings::default().with_allow_multiple(true));
        engine.activate(&mut doc, "1", None);
        engine.activate(&mut doc, "2", Some(ms(10)));
        assert_eq!(engine.next_deadline(), Some(ms(10)));
        engine.dismiss_all(&mut doc);
        assert!(!engine.is_active(&doc, "1") && !engine.is_active(&doc, "2"));

        engine.update_settings(Settings::default().with_dismiss_delay(ms(5)));
        assert_eq!(engine.settings().dismiss_delay, ms(5));
    }

    #[test]
    fn stale_footnotes_are_not_mounted() {
        let (mut doc, nodes) = page(&["1", "2"]);
        doc.delete(nodes[0].host);
        doc.delete(nodes[0].popover);
        let engine = mount(&doc, &nodes, Settings::default());
        assert_eq!(engine.use_cases().footnotes().len(), 1);
        assert_eq!(engine.use_cases().footnotes()[0].id(), "2");
    }

    #[test]
    fn unmount_silences_every_listener_and_removes_the_footnotes() {
        let (mut doc, nodes) = page(&["1", "2"]);
        let mut engine = mount(&doc, &nodes, Settings::default());
        engine.dispatch(&mut doc, &mut Event::click(nodes[0].button, ms(0)));
        engine.unmount(&mut doc);
        for n in &nodes {
            assert!(!doc.is_connected(n.host));
            assert!(!doc.is_connected(n.popover));
        }
    }

    #[test]
    fn unmount_aborts_the_listener_group() {
        let (mut doc, nodes) = page(&["1"]);
        let engine = mount(&doc, &nodes, Settings::default());
        let signal = engine.teardown.signal();
        assert!(!engine.listeners.is_empty());
        engine.unmount(&mut doc);
        assert!(signal.aborted(), "wheel listeners share the group");
    }
}
