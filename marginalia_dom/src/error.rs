// Copyright 2025 the Marginalia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors returned by tree edits.

use crate::types::NodeId;

/// Failure of a structural edit on a [`Document`](crate::Document).
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// The handle does not refer to a live node.
    #[error("stale node handle {0:?}")]
    StaleNode(NodeId),
    /// The reference node has no parent to insert next to.
    #[error("node {0:?} has no parent")]
    NoParent(NodeId),
    /// The edit would make a node its own ancestor.
    #[error("cannot insert {node:?} into its own subtree at {parent:?}")]
    HierarchyRequest {
        /// Node being inserted.
        node: NodeId,
        /// Prospective parent.
        parent: NodeId,
    },
}
