// Copyright 2025 the Marginalia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Behavior settings.
//!
//! With the `serde` feature, [`Settings`] loads from any serde format. Delays are
//! written as whole milliseconds, and missing fields take their defaults:
//!
//! ```json
//! { "activate_on_hover": true, "hover_delay": 400 }
//! ```

use core::time::Duration;

/// How footnotes react to input.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Settings {
    /// Delay between activation and the popover settling.
    #[cfg_attr(feature = "serde", serde(with = "millis"))]
    pub activate_delay: Duration,
    /// Delay between dismissal and the popover being removed.
    #[cfg_attr(feature = "serde", serde(with = "millis"))]
    pub dismiss_delay: Duration,
    /// Delay used by hover activation and unhover dismissal.
    #[cfg_attr(feature = "serde", serde(with = "millis"))]
    pub hover_delay: Duration,
    /// Activate a footnote when the pointer enters it.
    pub activate_on_hover: bool,
    /// Dismiss footnotes shortly after the pointer leaves them.
    pub dismiss_on_unhover: bool,
    /// Dismiss footnotes on a tap or click elsewhere on the page.
    pub dismiss_on_document_touch: bool,
    /// Keep other footnotes open when one is activated.
    pub allow_multiple: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            activate_delay: Duration::from_millis(100),
            dismiss_delay: Duration::from_millis(100),
            hover_delay: Duration::from_millis(250),
            activate_on_hover: false,
            dismiss_on_unhover: false,
            dismiss_on_document_touch: true,
            allow_multiple: false,
        }
    }
}

impl Settings {
    /// Set [`activate_delay`](Self::activate_delay).
    #[must_use]
    pub fn with_activate_delay(mut self, delay: Duration) -> Self {
        self.activate_delay = delay;
        self
    }

    /// Set [`dismiss_delay`](Self::dismiss_delay).
    #[must_use]
    pub fn with_dismiss_delay(mut self, delay: Duration) -> Self {
        self.dismiss_delay = delay;
        self
    }

    /// Set [`hover_delay`](Self::hover_delay).
    #[must_use]
    pub fn with_hover_delay(mut self, delay: Duration) -> Self {
        self.hover_delay = delay;
        self
    }

    /// Set [`activate_on_hover`](Self::activate_on_hover).
    #[must_use]
    pub fn with_activate_on_hover(mut self, on: bool) -> Self {
        self.activate_on_hover = on;
        self
    }

    /// Set [`dismiss_on_unhover`](Self::dismiss_on_unhover).
    #[must_use]
    pub fn with_dismiss_on_unhover(mut self, on: bool) -> Self {
        self.dismiss_on_unhover = on;
        self
    }

    /// Set [`dismiss_on_document_touch`](Self::dismiss_on_document_touch).
    #[must_use]
    pub fn with_dismiss_on_document_touch(mut self, on: bool) -> Self {
        self.dismiss_on_document_touch = on;
        self
    }

    /// Set [`allow_multiple`](Self::allow_multiple).
    #[must_use]
    pub fn with_allow_multiple(mut self, on: bool) -> Self {
        self.allow_multiple = on;
        self
    }
}

#[cfg(feature = "serde")]
mod millis {
    use core::time::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(
        clippy::cast_possible_truncation,
        reason = "Delays beyond u64 milliseconds are not meaningful."
    )]
    pub(super) fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
