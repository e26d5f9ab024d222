// Copyright 2025 the Marginalia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the document: node identifiers, metrics, style values, and mutation records.

use alloc::string::String;
use kurbo::{Insets, Rect};

/// Identifier for a node in the document.
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On creation, a fresh slot is allocated with generation `1`.
/// - On [`Document::delete`](crate::Document::delete), the slot is freed; any existing `NodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// Detaching a node with [`Document::detach`](crate::Document::detach) does not free it:
/// the handle stays live and the node can be reinserted.
///
/// ### Liveness
///
/// Use [`Document::is_alive`](crate::Document::is_alive) to check whether a `NodeId` still refers to a live node.
/// Stale `NodeId`s never alias a different live node because the generation must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Host-supplied layout metrics for a node.
///
/// All rectangles are in viewport coordinates, the same space as a browser's
/// `getBoundingClientRect`. The document never computes these itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    /// Border box. Its width and height double as the offset width and height.
    pub rect: Rect,
    /// Computed margins.
    pub margin: Insets,
    /// Inner width excluding borders and scrollbars.
    pub client_width: f64,
    /// Inner height excluding borders and scrollbars.
    pub client_height: f64,
    /// Vertical scroll offset of the node's own content.
    pub scroll_top: f64,
    /// Total height of the node's scrollable content.
    pub scroll_height: f64,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            rect: Rect::ZERO,
            margin: Insets::ZERO,
            client_width: 0.0,
            client_height: 0.0,
            scroll_top: 0.0,
            scroll_height: 0.0,
        }
    }
}

impl Layout {
    /// Layout with the given border box and matching client/scroll extents.
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            rect,
            client_width: rect.width(),
            client_height: rect.height(),
            scroll_height: rect.height(),
            ..Self::default()
        }
    }

    /// Offset width (border box width).
    pub fn offset_width(&self) -> f64 {
        self.rect.width()
    }

    /// Offset height (border box height).
    pub fn offset_height(&self) -> f64 {
        self.rect.height()
    }
}

/// A CSS length as it appears in computed style.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Length {
    /// Absolute pixels.
    Px(f64),
    /// Relative to the element's parent font size.
    Em(f64),
    /// Relative to the root font size.
    Rem(f64),
    /// No limit (`none`).
    #[default]
    None,
}

impl Length {
    /// Resolve to pixels. [`Length::None`] resolves to `f64::INFINITY`.
    pub fn resolve(self, font_size: f64, root_font_size: f64) -> f64 {
        match self {
            Self::Px(v) => v,
            Self::Em(v) => v * font_size,
            Self::Rem(v) => v * root_font_size,
            Self::None => f64::INFINITY,
        }
    }
}

/// Computed style values supplied by the host stylesheet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComputedStyle {
    /// Computed `max-height`.
    pub max_height: Length,
    /// Computed font size in pixels, used to resolve `em` lengths.
    pub font_size: f64,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            max_height: Length::None,
            font_size: 16.0,
        }
    }
}

/// Inline style properties the engine writes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Property {
    /// `left`
    Left,
    /// `max-width`
    MaxWidth,
    /// `max-height`
    MaxHeight,
    /// `transform-origin`
    TransformOrigin,
}

/// Value of an inline style property.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum StyleValue {
    /// Pixels.
    Px(f64),
    /// Percent of the containing block.
    Percent(f64),
    /// A transform origin, both components in percent.
    Origin {
        /// Horizontal component.
        x: f64,
        /// Vertical component.
        y: f64,
    },
}

/// What changed in a [`MutationRecord`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MutationKind {
    /// Children were added or removed.
    ChildList,
    /// An attribute was set or removed.
    Attribute(String),
    /// A class was added or removed.
    Class(String),
    /// An inline style property was set or removed.
    Style(Property),
}

/// A single effective write, recorded while the document is observed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MutationRecord {
    /// The node that changed. For child list changes this is the parent.
    pub target: NodeId,
    /// The kind of change.
    pub kind: MutationKind,
}
