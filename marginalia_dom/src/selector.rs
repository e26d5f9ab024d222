// Copyright 2025 the Marginalia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simple selectors and ancestry lookup.
//!
//! Only the single-component selectors the engine needs are supported:
//! `[attr]`, `[attr="value"]`, `.class`, and `tag`.

use alloc::string::String;
use alloc::vec::Vec;

use crate::Document;
use crate::types::NodeId;

/// A single-component selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    /// `[name]`
    Attribute(String),
    /// `[name="value"]`
    AttributeValue(String, String),
    /// `.name`
    Class(String),
    /// `tag`
    Tag(String),
}

impl Selector {
    /// `[name]`
    pub fn attribute(name: impl Into<String>) -> Self {
        Self::Attribute(name.into())
    }

    /// `[name="value"]`
    pub fn attribute_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::AttributeValue(name.into(), value.into())
    }

    /// `.name`
    pub fn class(name: impl Into<String>) -> Self {
        Self::Class(name.into())
    }

    /// `tag`
    pub fn tag(name: impl Into<String>) -> Self {
        Self::Tag(name.into())
    }

    /// Returns true if `node` is live and matches.
    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        match self {
            Self::Attribute(name) => doc.has_attribute(node, name),
            Self::AttributeValue(name, value) => doc.attribute(node, name) == Some(value.as_str()),
            Self::Class(name) => doc.has_class(node, name),
            Self::Tag(name) => doc.tag(node) == Some(name.as_str()),
        }
    }
}

impl Document {
    /// Nearest inclusive ancestor of `node` matching `selector`.
    pub fn closest(&self, node: NodeId, selector: &Selector) -> Option<NodeId> {
        let mut cur = Some(node);
        while let Some(id) = cur {
            if !self.is_alive(id) {
                return None;
            }
            if selector.matches(self, id) {
                return Some(id);
            }
            cur = self.parent(id);
        }
        None
    }

    /// First descendant of `root` (excluding `root`) matching `selector`, in pre-order.
    pub fn query_selector(&self, root: NodeId, selector: &Selector) -> Option<NodeId> {
        let mut stack: Vec<NodeId> = self.children(root).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if selector.matches(self, id) {
                return Some(id);
            }
            stack.extend(self.children(id).iter().rev().copied());
        }
        None
    }
}
