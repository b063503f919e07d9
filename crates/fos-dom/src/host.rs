//! Host render-tree interface
//!
//! Everything the visibility engine needs to know about a page, exposed as
//! read-only accessors. Implementations must not trigger layout or mutate
//! the tree when answering.

use std::fmt;

use crate::{RawRect, ViewportSize, WindowId};

/// Kind of node behind a handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Document root
    Document,
    /// Element with a style surface
    Element,
    /// Text content
    Text,
    /// Comments, doctypes, processing instructions
    Other,
}

/// Mechanism the host offers for computing style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StyleSource {
    /// Standard computed style; ancestor `display: none` is already reflected
    #[default]
    Computed,
    /// Legacy per-element current style; values may still read `inherit`
    Current,
    /// No style mechanism at all
    Unavailable,
}

impl StyleSource {
    #[inline]
    pub fn is_available(self) -> bool {
        self != StyleSource::Unavailable
    }
}

/// Read interface over a host render tree
pub trait RenderHost {
    /// Opaque node handle
    type Node: Copy + Eq + fmt::Debug;

    /// Parent node, `None` for detached nodes and document roots
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    fn kind(&self, node: Self::Node) -> NodeKind;

    /// Bounding client rect, `None` if the host cannot measure the node
    fn measure(&self, node: Self::Node) -> Option<RawRect>;

    /// Content-box client dimensions (clientWidth / clientHeight)
    fn client_size(&self, node: Self::Node) -> ViewportSize;

    /// Document containing the node; a document is its own owner
    fn owner_document(&self, node: Self::Node) -> Option<Self::Node>;

    /// Window a document is displayed in
    fn document_window(&self, document: Self::Node) -> Option<WindowId>;

    /// Root element (documentElement) of a document
    fn document_element(&self, document: Self::Node) -> Option<Self::Node>;

    /// Document currently loaded in a window
    fn window_document(&self, window: WindowId) -> Option<Self::Node>;

    /// The ambient top-level window
    fn global_window(&self) -> WindowId {
        WindowId::GLOBAL
    }

    /// innerWidth / innerHeight, `None` if the window does not expose them
    fn inner_size(&self, window: WindowId) -> Option<ViewportSize>;

    fn style_source(&self) -> StyleSource;

    /// Whether the node has a style surface (elements do, text does not)
    fn has_style(&self, node: Self::Node) -> bool {
        self.kind(node) == NodeKind::Element
    }

    /// Read one property through the given style mechanism
    ///
    /// Returns `None` if the node has no style surface or the property is
    /// unknown to the host.
    fn style_value(&self, node: Self::Node, source: StyleSource, property: &str) -> Option<String>;

    /// Whether offsetParent is non-null
    fn has_offset_parent(&self, node: Self::Node) -> bool;
}
