// Copyright 2025 the Marginalia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core document implementation: structure, attributes, classes, style, metrics.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::time::Duration;
use kurbo::Size;

use crate::error::DomError;
use crate::types::{
    ComputedStyle, Layout, MutationKind, MutationRecord, NodeId, Property, StyleValue,
};

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// A headless document: a node arena with a root, a body, a viewport, and a timeline.
pub struct Document {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    root: NodeId,
    body: NodeId,
    viewport: Size,
    time: Duration,
    records: Option<Vec<MutationRecord>>,
}

impl core::fmt::Debug for Document {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Document")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("viewport", &self.viewport)
            .field("time", &self.time)
            .field("observed", &self.records.is_some())
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    tag: String,
    attributes: Vec<(String, String)>,
    classes: Vec<String>,
    style: Vec<(Property, StyleValue)>,
    computed: ComputedStyle,
    layout: Layout,
}

impl Node {
    fn new(generation: u32, tag: &str) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            tag: tag.to_string(),
            attributes: Vec::new(),
            classes: Vec::new(),
            style: Vec::new(),
            computed: ComputedStyle::default(),
            layout: Layout::default(),
        }
    }
}

impl Document {
    /// Create a document holding a root element and an empty `body`.
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            root: NodeId::new(0, 0),
            body: NodeId::new(0, 0),
            viewport: Size::ZERO,
            time: Duration::ZERO,
            records: None,
        };
        let root = doc.create_element("html");
        let body = doc.create_element("body");
        doc.root = root;
        doc.body = body;
        doc.link_child(root, body, None);
        doc
    }

    /// The root element. Nodes reachable from it are connected.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The `body` element.
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Allocate a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, tag));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, tag)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        NodeId::new(idx, generation)
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is considered live if its slot exists and its generation matches
    /// the current generation stored in that slot.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some()
    }

    // --- structure ---

    /// Append `child` as the last child of `parent`, detaching it from any previous parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.check_insert(parent, child)?;
        self.detach(child);
        self.link_child(parent, child, None);
        Ok(())
    }

    /// Insert `node` immediately after `reference` in its parent (`afterend`).
    pub fn insert_after(&mut self, reference: NodeId, node: NodeId) -> Result<(), DomError> {
        if !self.is_alive(reference) {
            return Err(DomError::StaleNode(reference));
        }
        let parent = self.parent(reference).ok_or(DomError::NoParent(reference))?;
        if node == reference {
            return Err(DomError::HierarchyRequest { node, parent });
        }
        self.check_insert(parent, node)?;
        self.detach(node);
        let at = self
            .children(parent)
            .iter()
            .position(|c| *c == reference)
            .map(|i| i + 1);
        self.link_child(parent, node, at);
        Ok(())
    }

    /// Unlink `id` from its parent. The node stays alive and can be reinserted.
    ///
    /// No-op for stale or already detached nodes.
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        if let Some(p) = self.node_opt_mut(parent) {
            p.children.retain(|c| *c != id);
        }
        if let Some(n) = self.node_opt_mut(id) {
            n.parent = None;
        }
        self.record(parent, MutationKind::ChildList);
    }

    /// Detach `id` and free it together with its subtree.
    pub fn delete(&mut self, id: NodeId) {
        if !self.is_alive(id) || id == self.root {
            return;
        }
        self.detach(id);
        let mut stack = alloc::vec![id];
        while let Some(cur) = stack.pop() {
            if let Some(node) = self.nodes[cur.idx()].take() {
                stack.extend(node.children);
                self.free_list.push(cur.idx());
            }
        }
    }

    /// Tag name of a live node.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.node_opt(id).map(|n| n.tag.as_str())
    }

    /// Parent of a live node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Children of a live node; empty for stale handles.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Sibling immediately following `id`.
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = self.children(parent);
        let i = siblings.iter().position(|c| *c == id)?;
        siblings.get(i + 1).copied()
    }

    /// Path from the topmost ancestor to `id` (inclusive). Empty for stale handles.
    pub fn path_to_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cur = Some(id);
        while let Some(n) = cur {
            if !self.is_alive(n) {
                break;
            }
            out.push(n);
            cur = self.parent(n);
        }
        out.reverse();
        out
    }

    /// True if `node` is `ancestor` or one of its descendants.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cur = Some(node);
        while let Some(n) = cur {
            if !self.is_alive(n) {
                return false;
            }
            if n == ancestor {
                return true;
            }
            cur = self.parent(n);
        }
        false
    }

    /// True if `id` is reachable from the document root.
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.contains(self.root, id)
    }

    // --- attributes ---

    /// Set an attribute. No-op for stale handles or unchanged values.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        let Some(n) = self.node_opt_mut(id) else {
            return;
        };
        match n.attributes.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) if v.as_str() == value => return,
            Some((_, v)) => *v = value.to_string(),
            None => n.attributes.push((name.to_string(), value.to_string())),
        }
        self.record(id, MutationKind::Attribute(name.to_string()));
    }

    /// Attribute value of a live node.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node_opt(id)?
            .attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// True if the attribute is present, whatever its value.
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.attribute(id, name).is_some()
    }

    /// Remove an attribute if present.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        let Some(n) = self.node_opt_mut(id) else {
            return;
        };
        let before = n.attributes.len();
        n.attributes.retain(|(k, _)| k != name);
        if n.attributes.len() != before {
            self.record(id, MutationKind::Attribute(name.to_string()));
        }
    }

    // --- classes ---

    /// Add a class. Adding a present class changes nothing.
    pub fn add_class(&mut self, id: NodeId, class: &str) {
        let Some(n) = self.node_opt_mut(id) else {
            return;
        };
        if n.classes.iter().any(|c| c == class) {
            return;
        }
        n.classes.push(class.to_string());
        self.record(id, MutationKind::Class(class.to_string()));
    }

    /// Remove a class. Removing an absent class changes nothing.
    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        let Some(n) = self.node_opt_mut(id) else {
            return;
        };
        let before = n.classes.len();
        n.classes.retain(|c| c != class);
        if n.classes.len() != before {
            self.record(id, MutationKind::Class(class.to_string()));
        }
    }

    /// True if a live node carries `class`.
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.node_opt(id)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    /// Classes of a live node, in insertion order.
    pub fn classes(&self, id: NodeId) -> &[String] {
        self.node_opt(id).map(|n| n.classes.as_slice()).unwrap_or(&[])
    }

    // --- style ---

    /// Set an inline style property.
    pub fn set_style(&mut self, id: NodeId, property: Property, value: StyleValue) {
        let Some(n) = self.node_opt_mut(id) else {
            return;
        };
        match n.style.iter_mut().find(|(p, _)| *p == property) {
            Some((_, v)) if *v == value => return,
            Some((_, v)) => *v = value,
            None => n.style.push((property, value)),
        }
        self.record(id, MutationKind::Style(property));
    }

    /// Inline style property of a live node.
    pub fn style(&self, id: NodeId, property: Property) -> Option<StyleValue> {
        self.node_opt(id)?
            .style
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| *v)
    }

    /// Remove an inline style property.
    pub fn remove_style(&mut self, id: NodeId, property: Property) {
        let Some(n) = self.node_opt_mut(id) else {
            return;
        };
        let before = n.style.len();
        n.style.retain(|(p, _)| *p != property);
        if n.style.len() != before {
            self.record(id, MutationKind::Style(property));
        }
    }

    /// Computed style; the default for stale handles.
    pub fn computed_style(&self, id: NodeId) -> ComputedStyle {
        self.node_opt(id).map(|n| n.computed).unwrap_or_default()
    }

    /// Replace the computed style of a node (host stylesheet input).
    pub fn set_computed_style(&mut self, id: NodeId, style: ComputedStyle) {
        if let Some(n) = self.node_opt_mut(id) {
            n.computed = style;
        }
    }

    /// Font size of the root element.
    pub fn root_font_size(&self) -> f64 {
        self.computed_style(self.root).font_size
    }

    // --- metrics ---

    /// Layout metrics; the default for stale handles.
    pub fn layout(&self, id: NodeId) -> Layout {
        self.node_opt(id).map(|n| n.layout).unwrap_or_default()
    }

    /// Replace the layout metrics of a node (host layout input).
    pub fn set_layout(&mut self, id: NodeId, layout: Layout) {
        if let Some(n) = self.node_opt_mut(id) {
            n.layout = layout;
        }
    }

    /// Edit the layout metrics of a node in place.
    pub fn update_layout(&mut self, id: NodeId, f: impl FnOnce(&mut Layout)) {
        if let Some(n) = self.node_opt_mut(id) {
            f(&mut n.layout);
        }
    }

    /// Window inner size.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Set the window inner size.
    pub fn set_viewport(&mut self, size: Size) {
        self.viewport = size;
    }

    // --- timeline ---

    /// Current time on the document timeline.
    pub fn current_time(&self) -> Duration {
        self.time
    }

    /// Move the timeline forward to `now`. Earlier instants are ignored.
    pub fn advance_time(&mut self, now: Duration) {
        if now > self.time {
            self.time = now;
        }
    }

    // --- mutation records ---

    /// Start recording effective writes.
    pub fn observe(&mut self) {
        if self.records.is_none() {
            self.records = Some(Vec::new());
        }
    }

    /// Drain the records collected since the last call.
    pub fn take_records(&mut self) -> Vec<MutationRecord> {
        self.records.as_mut().map(core::mem::take).unwrap_or_default()
    }

    // --- internals ---

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn check_insert(&self, parent: NodeId, node: NodeId) -> Result<(), DomError> {
        if !self.is_alive(parent) {
            return Err(DomError::StaleNode(parent));
        }
        if !self.is_alive(node) {
            return Err(DomError::StaleNode(node));
        }
        if self.contains(node, parent) || node == self.root {
            return Err(DomError::HierarchyRequest { node, parent });
        }
        Ok(())
    }

    fn link_child(&mut self, parent: NodeId, child: NodeId, at: Option<usize>) {
        if let Some(p) = self.node_opt_mut(parent) {
            match at {
                Some(i) if i <= p.children.len() => p.children.insert(i, child),
                _ => p.children.push(child),
            }
        }
        if let Some(c) = self.node_opt_mut(child) {
            c.parent = Some(parent);
        }
        self.record(parent, MutationKind::ChildList);
    }

    fn record(&mut self, target: NodeId, kind: MutationKind) {
        if let Some(records) = self.records.as_mut() {
            records.push(MutationRecord { target, kind });
        }
    }
}
