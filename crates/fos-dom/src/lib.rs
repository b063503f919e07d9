//! fOS DOM - Render tree read interface
//!
//! The visibility engine never talks to a concrete document. It reads the
//! host through [`RenderHost`], which exposes parent links, geometry, owning
//! documents and windows, and the style surface of each node.
//!
//! [`DomTree`] is an arena-backed, in-memory host used by embedders that
//! already hold layout results, and by tests.

mod geometry;
mod host;
mod node;
mod tree;

pub use geometry::{DOMRect, ElementGeometry, RawRect, ViewportSize};
pub use host::{NodeKind, RenderHost, StyleSource};
pub use node::{DocumentData, ElementData, Node, NodeData};
pub use tree::DomTree;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this refers to a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Window identifier
///
/// `WindowId::GLOBAL` is the top-level window every host has; secondary
/// frames get their own ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub(crate) u32);

impl WindowId {
    /// The top-level window
    pub const GLOBAL: WindowId = WindowId(0);
}

/// Errors raised while building an in-memory tree
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Invalid node: {0:?}")]
    InvalidNode(NodeId),

    #[error("Invalid window: {0:?}")]
    InvalidWindow(WindowId),

    #[error("Node {0:?} is not an element")]
    NotAnElement(NodeId),

    #[error("Node {child:?} already has parent {parent:?}")]
    AlreadyAttached { child: NodeId, parent: NodeId },

    #[error("Document {0:?} cannot be appended to another node")]
    DocumentChild(NodeId),

    #[error("Appending {child:?} under {parent:?} would make it its own ancestor")]
    HierarchyRequest { child: NodeId, parent: NodeId },
}
