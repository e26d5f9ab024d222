// Copyright 2025 the Marginalia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener table and dispatch.
//!
//! ## Overview
//!
//! Holds `(target, type, signal, handler)` entries and walks the bubble path of
//! each dispatched event, invoking matching handlers in registration order.
//!
//! ## Deferred work
//!
//! Handlers may hold work for later (a throttle's trailing call). The table
//! exposes the earliest [`next_deadline`](Listeners::next_deadline) and runs due
//! work in [`poll`](Listeners::poll). Dispatch polls first, so deferred work due
//! before an event always runs before that event is handled.
//!
//! ## Cancellation
//!
//! An entry whose [`AbortSignal`] has fired is skipped from that moment on. It is
//! pruned on the next dispatch or poll, and its handler is cancelled so that any
//! pending trailing call is discarded rather than run.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::time::Duration;

use marginalia_dom::Document;

use crate::abort::AbortSignal;
use crate::types::{Event, EventTarget, EventType, propagation_path};

/// Something that reacts to events.
///
/// Closures `FnMut(&mut Document, &mut Event)` are handlers.
pub trait Handler {
    /// Handle one event.
    fn handle_event(&mut self, doc: &mut Document, event: &mut Event);

    /// Run deferred work that is due at `now`.
    fn poll(&mut self, _doc: &mut Document, _now: Duration) {}

    /// When deferred work becomes due, if any is pending.
    fn deadline(&self) -> Option<Duration> {
        None
    }

    /// Discard deferred work. Called once the handler's group is aborted.
    fn cancel(&mut self) {}
}

impl<F> Handler for F
where
    F: FnMut(&mut Document, &mut Event),
{
    fn handle_event(&mut self, doc: &mut Document, event: &mut Event) {
        self(doc, event);
    }
}

struct Entry {
    target: EventTarget,
    kind: EventType,
    signal: Option<AbortSignal>,
    handler: Box<dyn Handler>,
}

impl Entry {
    fn aborted(&self) -> bool {
        self.signal.as_ref().is_some_and(AbortSignal::aborted)
    }
}

/// The window/document/element listener table.
#[derive(Default)]
pub struct Listeners {
    entries: Vec<Entry>,
}

impl core::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Listeners")
            .field("entries", &self.entries.len())
            .field("live", &self.len())
            .finish_non_exhaustive()
    }
}

impl Listeners {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `kind` events reaching `target`.
    ///
    /// With a signal, the entry stops running as soon as the signal aborts.
    /// Registering with an already aborted signal does nothing.
    pub fn add_event_listener<H>(
        &mut self,
        target: EventTarget,
        kind: EventType,
        handler: H,
        signal: Option<&AbortSignal>,
    ) where
        H: Handler + 'static,
    {
        if signal.is_some_and(AbortSignal::aborted) {
            return;
        }
        self.entries.push(Entry {
            target,
            kind,
            signal: signal.cloned(),
            handler: Box::new(handler),
        });
    }

    /// Number of entries that can still run.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| !e.aborted()).count()
    }

    /// True if no entry can run.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dispatch `event` along its bubble path.
    ///
    /// Advances the document timeline to the event's timestamp. Returns `false`
    /// if a handler prevented the default action.
    pub fn dispatch(&mut self, doc: &mut Document, event: &mut Event) -> bool {
        self.poll(doc, event.time_stamp);
        let path = propagation_path(doc, event.target);
        for at in path {
            for entry in &mut self.entries {
                if entry.target != at || entry.kind != event.kind || entry.aborted() {
                    continue;
                }
                entry.handler.handle_event(doc, event);
            }
        }
        !event.default_prevented()
    }

    /// Run deferred work due at `now`, advancing the document timeline first.
    pub fn poll(&mut self, doc: &mut Document, now: Duration) {
        self.prune();
        doc.advance_time(now);
        let now = doc.current_time();
        for entry in &mut self.entries {
            if entry.aborted() {
                continue;
            }
            if entry.handler.deadline().is_some_and(|d| d <= now) {
                entry.handler.poll(doc, now);
            }
        }
    }

    /// Earliest deadline among live entries.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries
            .iter()
            .filter(|e| !e.aborted())
            .filter_map(|e| e.handler.deadline())
            .min()
    }

    fn prune(&mut self) {
        self.entries.retain_mut(|e| {
            if e.aborted() {
                e.handler.cancel();
                false
            } else {
                true
            }
        });
    }
}
