// Copyright 2025 the Marginalia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The default action registry.
//!
//! [`UseCases`] owns every [`Footnote`] of a page and gives the event layer's
//! action vocabulary its meaning: which footnotes open and close, when they
//! settle, and how hover interacts with both. Deferred steps go through a
//! [`TimerQueue`] that the owner drains with [`UseCases::tick`].

use alloc::boxed::Box;
use alloc::collections::BTreeSet;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::time::Duration;

use marginalia_dom::{Document, NodeId};
use marginalia_events::actions::Actions;
use marginalia_events::timer::{TimerId, TimerQueue};

use crate::footnote::{Footnote, OnTransition};
use crate::settings::Settings;

/// Deferred step, keyed by footnote index.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Task {
    Ready(usize),
    Remove(usize),
    DismissUnhovered(usize),
}

/// Owner of a page's footnotes and of their pending transitions.
pub struct UseCases {
    footnotes: Vec<Footnote>,
    settings: Settings,
    timers: TimerQueue<Task>,
    // Pending `Ready` or `Remove` per footnote; a new transition cancels it.
    transitions: Vec<Option<TimerId>>,
    hovered: BTreeSet<String>,
    on_activate: Option<Box<OnTransition<'static>>>,
    on_dismiss: Option<Box<OnTransition<'static>>>,
}

impl core::fmt::Debug for UseCases {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("UseCases")
            .field("footnotes", &self.footnotes)
            .field("settings", &self.settings)
            .field("timers", &self.timers)
            .field("transitions", &self.transitions)
            .field("hovered", &self.hovered)
            .field("on_activate", &self.on_activate.is_some())
            .field("on_dismiss", &self.on_dismiss.is_some())
            .finish()
    }
}

impl UseCases {
    /// Take ownership of `footnotes`.
    pub fn new(footnotes: Vec<Footnote>, settings: Settings) -> Self {
        Self {
            transitions: alloc::vec![None; footnotes.len()],
            footnotes,
            settings,
            timers: TimerQueue::new(),
            hovered: BTreeSet::new(),
            on_activate: None,
            on_dismiss: None,
        }
    }

    /// Run `f` at the end of every activation, with the popover and the button.
    pub fn set_on_activate(&mut self, f: impl FnMut(&mut Document, NodeId, NodeId) + 'static) {
        self.on_activate = Some(Box::new(f));
    }

    /// Run `f` at the end of every dismissal, with the popover and the button.
    pub fn set_on_dismiss(&mut self, f: impl FnMut(&mut Document, NodeId, NodeId) + 'static) {
        self.on_dismiss = Some(Box::new(f));
    }

    /// Current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the settings. Pending transitions keep the delays they were scheduled with.
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// The footnotes, in page order.
    pub fn footnotes(&self) -> &[Footnote] {
        &self.footnotes
    }

    /// Footnote with identifier `id`.
    pub fn footnote(&self, id: &str) -> Option<&Footnote> {
        self.footnotes.iter().find(|f| f.id() == id)
    }

    /// Earliest pending transition.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// Activate footnote `id`, settling after `delay`. Unknown ids are ignored.
    pub fn activate_id(&mut self, doc: &mut Document, id: &str, delay: Duration) {
        if let Some(index) = self.index_of(id) {
            self.activate(doc, index, delay);
        }
    }

    /// Dismiss footnote `id`, removing it after `delay`. Unknown ids are ignored.
    pub fn dismiss_id(&mut self, doc: &mut Document, id: &str, delay: Duration) {
        if let Some(index) = self.index_of(id) {
            self.dismiss(doc, index, delay);
        }
    }

    /// Dismiss every footnote, removing each after `delay`.
    pub fn dismiss_every(&mut self, doc: &mut Document, delay: Duration) {
        for index in 0..self.footnotes.len() {
            self.dismiss(doc, index, delay);
        }
    }

    /// Run every transition due at the document's current time.
    pub fn tick(&mut self, doc: &mut Document) {
        while let Some(task) = self.timers.pop_due(doc.current_time()) {
            self.run(doc, task);
        }
    }

    /// Dismiss and remove everything at once, then destroy every footnote.
    pub fn unmount(&mut self, doc: &mut Document) {
        self.timers.clear();
        self.transitions.clear();
        self.hovered.clear();
        for mut footnote in self.footnotes.drain(..) {
            if footnote.is_active(doc) {
                footnote.dismiss(doc, self.on_dismiss.as_deref_mut());
            }
            footnote.remove(doc);
            footnote.destroy(doc);
        }
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.footnotes.iter().position(|f| f.id() == id)
    }

    fn activate(&mut self, doc: &mut Document, index: usize, delay: Duration) {
        if !self.settings.allow_multiple {
            for other in (0..self.footnotes.len()).filter(|i| *i != index) {
                let dismiss_delay = self.settings.dismiss_delay;
                self.dismiss(doc, other, dismiss_delay);
            }
        }
        let Some(footnote) = self.footnotes.get_mut(index) else {
            return;
        };
        if footnote.is_active(doc) {
            return;
        }
        if let Err(err) = footnote.activate(doc, self.on_activate.as_deref_mut()) {
            tracing::warn!(id = %footnote.id(), %err, "activation failed");
            return;
        }
        footnote.reposition(doc);
        footnote.resize(doc);
        self.schedule_transition(doc.current_time() + delay, Task::Ready(index), index);
    }

    fn dismiss(&mut self, doc: &mut Document, index: usize, delay: Duration) {
        let Some(footnote) = self.footnotes.get_mut(index) else {
            return;
        };
        if !footnote.is_active(doc) {
            return;
        }
        footnote.dismiss(doc, self.on_dismiss.as_deref_mut());
        self.schedule_transition(doc.current_time() + delay, Task::Remove(index), index);
    }

    fn schedule_transition(&mut self, at: Duration, task: Task, index: usize) {
        let Some(slot) = self.transitions.get_mut(index) else {
            return;
        };
        if let Some(stale) = slot.take() {
            self.timers.cancel(stale);
        }
        *slot = Some(self.timers.schedule(at, task));
    }

    fn settle(&mut self, index: usize) {
        if let Some(slot) = self.transitions.get_mut(index) {
            *slot = None;
        }
    }

    fn run(&mut self, doc: &mut Document, task: Task) {
        match task {
            Task::Ready(index) => {
                self.settle(index);
                if let Some(footnote) = self.footnotes.get_mut(index)
                    && footnote.is_active(doc)
                {
                    footnote.ready(doc);
                }
            }
            Task::Remove(index) => {
                self.settle(index);
                if let Some(footnote) = self.footnotes.get_mut(index)
                    && !footnote.is_active(doc)
                {
                    footnote.remove(doc);
                }
            }
            Task::DismissUnhovered(index) => {
                let still_hovered = self
                    .footnotes
                    .get(index)
                    .is_some_and(|f| self.hovered.contains(f.id()));
                if !still_hovered {
                    let delay = self.settings.dismiss_delay;
                    self.dismiss(doc, index, delay);
                }
            }
        }
    }
}

impl Actions for UseCases {
    fn toggle(&mut self, doc: &mut Document, id: &str) {
        let Some(index) = self.index_of(id) else {
            return;
        };
        if self.footnotes[index].is_active(doc) {
            let delay = self.settings.dismiss_delay;
            self.dismiss(doc, index, delay);
        } else {
            let delay = self.settings.activate_delay;
            self.activate(doc, index, delay);
        }
    }

    fn hover(&mut self, doc: &mut Document, id: &str) {
        self.hovered.insert(id.to_string());
        if !self.settings.activate_on_hover {
            return;
        }
        if let Some(index) = self.index_of(id)
            && !self.footnotes[index].is_active(doc)
        {
            let delay = self.settings.hover_delay;
            self.activate(doc, index, delay);
        }
    }

    fn unhover(&mut self, doc: &mut Document, id: &str) {
        self.hovered.remove(id);
        if !self.settings.dismiss_on_unhover {
            return;
        }
        if let Some(index) = self.index_of(id) {
            let at = doc.current_time() + self.settings.hover_delay;
            self.timers.schedule(at, Task::DismissUnhovered(index));
        }
    }

    fn dismiss_all(&mut self, doc: &mut Document) {
        let delay = self.settings.dismiss_delay;
        self.dismiss_every(doc, delay);
    }

    fn touch_outside(&mut self, doc: &mut Document) {
        if self.settings.dismiss_on_document_touch {
            self.dismiss_all(doc);
        }
    }

    fn reposition_all(&mut self, doc: &mut Document) {
        for footnote in &mut self.footnotes {
            footnote.reposition(doc);
        }
    }

    fn resize_all(&mut self, doc: &mut Document) {
        for footnote in &mut self.footnotes {
            footnote.resize(doc);
            footnote.reposition(doc);
        }
    }
}
