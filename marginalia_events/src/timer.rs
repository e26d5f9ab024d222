// Copyright 2025 the Marginalia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic one-shot timers.
//!
//! Tasks are plain values. Whoever owns the queue pops the due ones and runs
//! them; nothing fires by itself.

use alloc::vec::Vec;
use core::time::Duration;

/// Handle to a scheduled task.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct TimerId(u64);

#[derive(Clone, Debug)]
struct Timer<T> {
    id: TimerId,
    at: Duration,
    task: T,
}

/// A queue of tasks ordered by deadline, then by scheduling order.
#[derive(Clone, Debug)]
pub struct TimerQueue<T> {
    next_id: u64,
    timers: Vec<Timer<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            timers: Vec::new(),
        }
    }
}

impl<T> TimerQueue<T> {
    /// An empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` to become due at `at`.
    pub fn schedule(&mut self, at: Duration, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer { id, at, task });
        id
    }

    /// Unschedule a task, returning it if it was still pending.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let i = self.timers.iter().position(|t| t.id == id)?;
        Some(self.timers.remove(i).task)
    }

    /// Earliest deadline.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.iter().map(|t| t.at).min()
    }

    /// Remove and return the earliest task due at `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<T> {
        let (i, _) = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.at <= now)
            .min_by_key(|(_, t)| (t.at, t.id))?;
        Some(self.timers.remove(i).task)
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// True if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Drop every pending task.
    pub fn clear(&mut self) {
        self.timers.clear();
    }
}
