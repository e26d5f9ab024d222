// Copyright 2025 the Marginalia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time-based coalescing.
//!
//! [`Throttle`] bounds how often a call goes through: at most one call per
//! interval at the leading edge, plus one trailing call carrying the latest
//! arguments received while the window was closed. It does not own a timer;
//! the caller asks for the [`deadline`](Throttle::deadline) and calls
//! [`poll`](Throttle::poll) once it has passed.
//!
//! ```
//! use core::time::Duration;
//! use marginalia_events::throttle::{Edges, Throttle};
//!
//! let ms = Duration::from_millis;
//! let mut t = Throttle::new(ms(16), Edges::LEADING | Edges::TRAILING);
//! assert_eq!(t.call(ms(0), 'a'), Some('a'));
//! assert_eq!(t.call(ms(5), 'b'), None);
//! assert_eq!(t.call(ms(9), 'c'), None);
//! assert_eq!(t.deadline(), Some(ms(16)));
//! assert_eq!(t.poll(ms(16)), Some('c'));
//! assert_eq!(t.poll(ms(40)), None);
//! ```

use core::time::Duration;

use marginalia_dom::Document;

use crate::listeners::Handler;
use crate::types::Event;

/// One animation frame at 60 Hz.
pub const FRAME: Duration = Duration::from_millis(16);

bitflags::bitflags! {
    /// Which edges of a throttle window invoke the call.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Edges: u8 {
        /// Run the first call of a window immediately.
        const LEADING  = 0b0000_0001;
        /// Run the latest suppressed call when the window closes.
        const TRAILING = 0b0000_0010;
    }
}

impl Default for Edges {
    fn default() -> Self {
        Self::LEADING | Self::TRAILING
    }
}

/// A trailing-edge-preserving throttle over call arguments `A`.
#[derive(Clone, Debug)]
pub struct Throttle<A> {
    interval: Duration,
    edges: Edges,
    window_end: Option<Duration>,
    pending: Option<A>,
}

impl<A> Throttle<A> {
    /// Create a throttle with the given window length and edge policy.
    pub fn new(interval: Duration, edges: Edges) -> Self {
        Self {
            interval,
            edges,
            window_end: None,
            pending: None,
        }
    }

    /// Offer a call at `now`. Returns the arguments if the call should run immediately.
    ///
    /// Inside an open window the arguments replace any pending ones.
    pub fn call(&mut self, now: Duration, args: A) -> Option<A> {
        if let Some(end) = self.window_end
            && now < end
        {
            if self.edges.contains(Edges::TRAILING) {
                self.pending = Some(args);
            }
            return None;
        }
        self.window_end = Some(now + self.interval);
        if self.edges.contains(Edges::LEADING) {
            self.pending = None;
            Some(args)
        } else {
            if self.edges.contains(Edges::TRAILING) {
                self.pending = Some(args);
            }
            None
        }
    }

    /// When the pending trailing call becomes due, if there is one.
    pub fn deadline(&self) -> Option<Duration> {
        self.pending.as_ref().and(self.window_end)
    }

    /// Take the trailing call if it is due at `now`. Running it opens a new window.
    pub fn poll(&mut self, now: Duration) -> Option<A> {
        let end = self.deadline()?;
        if now < end {
            return None;
        }
        self.window_end = Some(now + self.interval);
        self.pending.take()
    }

    /// Drop any pending call and close the window.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.window_end = None;
    }
}

/// A [`Handler`] whose calls go through a [`Throttle`].
///
/// The trailing call replays the latest suppressed event.
pub struct Throttled<H> {
    throttle: Throttle<Event>,
    inner: H,
}

impl<H> core::fmt::Debug for Throttled<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Throttled")
            .field("throttle", &self.throttle)
            .finish_non_exhaustive()
    }
}

impl<H: Handler> Throttled<H> {
    /// Throttle `inner` with leading and trailing edges.
    pub fn new(interval: Duration, inner: H) -> Self {
        Self {
            throttle: Throttle::new(interval, Edges::default()),
            inner,
        }
    }
}

impl<H: Handler> Handler for Throttled<H> {
    fn handle_event(&mut self, doc: &mut Document, event: &mut Event) {
        if let Some(mut now) = self.throttle.call(event.time_stamp, event.clone()) {
            self.inner.handle_event(doc, &mut now);
            if now.default_prevented() {
                event.prevent_default();
            }
        }
    }

    fn poll(&mut self, doc: &mut Document, now: Duration) {
        if let Some(mut trailing) = self.throttle.poll(now) {
            tracing::trace!(kind = ?trailing.kind, "throttled trailing call");
            self.inner.handle_event(doc, &mut trailing);
        }
    }

    fn deadline(&self) -> Option<Duration> {
        self.throttle.deadline()
    }

    fn cancel(&mut self) {
        self.throttle.cancel();
        self.inner.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn burst_yields_one_leading_and_one_trailing() {
        let mut t = Throttle::new(FRAME, Edges::default());
        let mut ran = Vec::new();
        for (i, at) in [0, 2, 4, 8, 12, 15].into_iter().enumerate() {
            if let Some(v) = t.call(ms(at), i) {
                ran.push(v);
            }
        }
        assert_eq!(ran, [0], "only the first call runs immediately");
        assert_eq!(t.poll(ms(15)), None, "window still open");
        assert_eq!(t.poll(ms(16)), Some(5), "trailing call carries the last args");
        assert_eq!(t.poll(ms(64)), None, "exactly one trailing call");
    }

    #[test]
    fn single_call_has_no_trailing() {
        let mut t = Throttle::new(FRAME, Edges::default());
        assert_eq!(t.call(ms(0), ()), Some(()));
        assert_eq!(t.deadline(), None);
        assert_eq!(t.poll(ms(100)), None);
    }

    #[test]
    fn trailing_call_opens_a_new_window() {
        let mut t = Throttle::new(FRAME, Edges::default());
        assert_eq!(t.call(ms(0), 1), Some(1));
        assert_eq!(t.call(ms(10), 2), None);
        assert_eq!(t.poll(ms(16)), Some(2));
        assert_eq!(t.call(ms(20), 3), None, "inside the trailing call's window");
        assert_eq!(t.deadline(), Some(ms(32)));
        assert_eq!(t.poll(ms(32)), Some(3));
        assert_eq!(t.call(ms(100), 4), Some(4), "window long closed");
    }

    #[test]
    fn trailing_only_defers_the_first_call() {
        let mut t = Throttle::new(FRAME, Edges::TRAILING);
        assert_eq!(t.call(ms(0), 'a'), None);
        assert_eq!(t.call(ms(3), 'b'), None);
        assert_eq!(t.poll(ms(16)), Some('b'));
    }

    #[test]
    fn cancel_discards_pending() {
        let mut t = Throttle::new(FRAME, Edges::default());
        let _ = t.call(ms(0), 1);
        let _ = t.call(ms(1), 2);
        t.cancel();
        assert_eq!(t.deadline(), None);
        assert_eq!(t.poll(ms(50)), None);
        assert_eq!(t.call(ms(2), 3), Some(3), "cancel also closes the window");
    }
}
