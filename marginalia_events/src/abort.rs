// Copyright 2025 the Marginalia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grouped cancellation.
//!
//! One [`AbortController`] hands out any number of [`AbortSignal`]s. Aborting the
//! controller flips every signal at once; listeners registered with a signal never
//! run again after that.

use alloc::rc::Rc;
use core::cell::Cell;

/// Owner side of a cancellation group.
#[derive(Debug, Default)]
pub struct AbortController {
    aborted: Rc<Cell<bool>>,
}

/// Observer side of a cancellation group. Cheap to clone.
#[derive(Clone, Debug)]
pub struct AbortSignal {
    aborted: Rc<Cell<bool>>,
}

impl AbortController {
    /// A fresh, non-aborted group.
    pub fn new() -> Self {
        Self::default()
    }

    /// A signal tied to this controller.
    pub fn signal(&self) -> AbortSignal {
        AbortSignal {
            aborted: Rc::clone(&self.aborted),
        }
    }

    /// Abort the group. Idempotent.
    pub fn abort(&self) {
        self.aborted.set(true);
    }
}

impl AbortSignal {
    /// Whether the owning controller has aborted.
    pub fn aborted(&self) -> bool {
        self.aborted.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abort_reaches_every_signal() {
        let controller = AbortController::new();
        let a = controller.signal();
        let b = a.clone();
        assert!(!a.aborted() && !b.aborted());
        controller.abort();
        assert!(a.aborted() && b.aborted());
        controller.abort();
        assert!(a.aborted(), "abort is idempotent");
    }

    #[test]
    fn controllers_are_independent() {
        let first = AbortController::new();
        let second = AbortController::new();
        first.abort();
        assert!(!second.signal().aborted());
    }
}
