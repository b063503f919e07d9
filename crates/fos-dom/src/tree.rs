//! DOM Tree (arena-based allocation)
//!
//! Holds documents, elements and the windows they are displayed in, together
//! with the layout results a visibility query reads. Style values are stored
//! as the host would report them; `inherit` is left unresolved.

use crate::{
    DOMRect, DomError, ElementData, Node, NodeData, NodeId, NodeKind, RawRect, RenderHost,
    StyleSource, ViewportSize, WindowId,
};

/// Initial values for properties the tree reports without a declaration
const INITIAL_VALUES: &[(&str, &str)] = &[
    ("display", "inline"),
    ("visibility", "visible"),
    ("position", "static"),
    ("opacity", "1"),
];

#[derive(Debug, Clone, Copy)]
struct WindowState {
    inner_size: Option<ViewportSize>,
    document: NodeId,
}

/// Arena-based DOM tree
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
    windows: Vec<WindowState>,
    style_source: StyleSource,
}

impl DomTree {
    /// Create a tree with a global window that exposes no inner size
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            windows: vec![WindowState {
                inner_size: None,
                document: NodeId::NONE,
            }],
            style_source: StyleSource::Computed,
        }
    }

    /// Create a tree whose global window is `width` x `height`
    pub fn with_viewport(width: f64, height: f64) -> Self {
        let mut tree = Self::new();
        tree.windows[0].inner_size = Some(ViewportSize::new(width, height));
        tree
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Switch the style mechanism reported to queries
    pub fn set_style_source(&mut self, source: StyleSource) {
        self.style_source = source;
    }

    /// Add a secondary window (e.g. an iframe)
    pub fn create_window(&mut self, inner_size: Option<ViewportSize>) -> WindowId {
        let id = WindowId(self.windows.len() as u32);
        self.windows.push(WindowState {
            inner_size,
            document: NodeId::NONE,
        });
        tracing::trace!("Created window {:?}", id);
        id
    }

    /// Change or remove a window's inner size
    pub fn set_inner_size(
        &mut self,
        window: WindowId,
        inner_size: Option<ViewportSize>,
    ) -> Result<(), DomError> {
        let state = self
            .windows
            .get_mut(window.0 as usize)
            .ok_or(DomError::InvalidWindow(window))?;
        state.inner_size = inner_size;
        Ok(())
    }

    /// Create a document displayed in `window`
    ///
    /// The first document created for a window becomes its loaded document.
    pub fn create_document(&mut self, window: WindowId) -> Result<NodeId, DomError> {
        if self.windows.get(window.0 as usize).is_none() {
            return Err(DomError::InvalidWindow(window));
        }
        let id = self.push(Node::document(window));
        if let Some(node) = self.get_mut(id) {
            node.document = id;
        }
        let state = &mut self.windows[window.0 as usize];
        if !state.document.is_valid() {
            state.document = id;
        }
        tracing::trace!("Created document {:?} in window {:?}", id, window);
        Ok(id)
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::element(tag))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::comment(content))
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Append `child` as the last child of `parent`
    ///
    /// Elements appended under an element get an offsetParent; the whole
    /// subtree is re-homed to the parent's document.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let parent_node = self.get(parent).ok_or(DomError::InvalidNode(parent))?;
        let parent_is_element = parent_node.is_element();
        let parent_last = parent_node.last_child;
        let document = parent_node.document;

        if self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest { child, parent });
        }

        let child_node = self.get_mut(child).ok_or(DomError::InvalidNode(child))?;
        if child_node.is_document() {
            return Err(DomError::DocumentChild(child));
        }
        if child_node.parent.is_valid() {
            return Err(DomError::AlreadyAttached {
                child,
                parent: child_node.parent,
            });
        }
        child_node.parent = parent;
        if let Some(elem) = child_node.as_element_mut() {
            elem.geometry.has_offset_parent = parent_is_element;
        }

        if parent_last.is_valid() {
            self.nodes[parent_last.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        self.nodes[parent.index()].last_child = child;

        self.set_document(child, document);
        Ok(())
    }

    /// `ancestor` is `node` or one of its ancestors
    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = node;
        while current.is_valid() {
            if current == ancestor {
                return true;
            }
            current = self.get(current).map_or(NodeId::NONE, |n| n.parent);
        }
        false
    }

    fn set_document(&mut self, root: NodeId, document: NodeId) {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let node = &mut self.nodes[id.index()];
            node.document = document;
            let mut child = node.first_child;
            while child.is_valid() {
                stack.push(child);
                child = self.nodes[child.index()].next_sibling;
            }
        }
    }

    /// Iterate over the direct children of a node
    pub fn children(&self, parent: NodeId) -> impl Iterator<Item = (NodeId, &Node)> {
        let mut next = self.get(parent).map_or(NodeId::NONE, |n| n.first_child);
        std::iter::from_fn(move || {
            if !next.is_valid() {
                return None;
            }
            let id = next;
            let node = self.get(id)?;
            next = node.next_sibling;
            Some((id, node))
        })
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut ElementData, DomError> {
        self.get_mut(id)
            .ok_or(DomError::InvalidNode(id))?
            .as_element_mut()
            .ok_or(DomError::NotAnElement(id))
    }

    fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(Node::as_element)
    }

    /// Set a style value on an element
    pub fn set_style(&mut self, id: NodeId, property: &str, value: &str) -> Result<(), DomError> {
        self.element_mut(id)?.set_style(property, value);
        Ok(())
    }

    /// Record the bounding client rect of an element
    pub fn set_bounds(&mut self, id: NodeId, rect: DOMRect) -> Result<(), DomError> {
        self.set_raw_bounds(id, rect.into())
    }

    /// Record a bounding measurement that may lack width/height
    pub fn set_raw_bounds(&mut self, id: NodeId, rect: RawRect) -> Result<(), DomError> {
        self.element_mut(id)?.geometry.rect = Some(rect);
        Ok(())
    }

    /// Record clientWidth / clientHeight
    pub fn set_client_size(&mut self, id: NodeId, width: f64, height: f64) -> Result<(), DomError> {
        let geometry = &mut self.element_mut(id)?.geometry;
        geometry.client_width = width;
        geometry.client_height = height;
        Ok(())
    }

    /// Override whether an element reports an offsetParent
    pub fn set_offset_parent(&mut self, id: NodeId, present: bool) -> Result<(), DomError> {
        self.element_mut(id)?.geometry.has_offset_parent = present;
        Ok(())
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderHost for DomTree {
    type Node = NodeId;

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node)
            .map(|n| n.parent)
            .filter(|parent| parent.is_valid())
    }

    fn kind(&self, node: NodeId) -> NodeKind {
        match self.get(node).map(|n| &n.data) {
            Some(NodeData::Document(_)) => NodeKind::Document,
            Some(NodeData::Element(_)) => NodeKind::Element,
            Some(NodeData::Text(_)) => NodeKind::Text,
            Some(NodeData::Comment(_)) | None => NodeKind::Other,
        }
    }

    fn measure(&self, node: NodeId) -> Option<RawRect> {
        self.element(node)?.geometry.rect
    }

    fn client_size(&self, node: NodeId) -> ViewportSize {
        self.element(node)
            .map(|e| ViewportSize::new(e.geometry.client_width, e.geometry.client_height))
            .unwrap_or_default()
    }

    fn owner_document(&self, node: NodeId) -> Option<NodeId> {
        self.get(node)
            .map(|n| n.document)
            .filter(|doc| doc.is_valid())
    }

    fn document_window(&self, document: NodeId) -> Option<WindowId> {
        self.get(document)?.as_document().map(|d| d.window)
    }

    fn document_element(&self, document: NodeId) -> Option<NodeId> {
        self.children(document)
            .find(|(_, node)| node.is_element())
            .map(|(id, _)| id)
    }

    fn window_document(&self, window: WindowId) -> Option<NodeId> {
        self.windows
            .get(window.0 as usize)
            .map(|w| w.document)
            .filter(|doc| doc.is_valid())
    }

    fn inner_size(&self, window: WindowId) -> Option<ViewportSize> {
        self.windows.get(window.0 as usize)?.inner_size
    }

    fn style_source(&self) -> StyleSource {
        self.style_source
    }

    fn style_value(&self, node: NodeId, source: StyleSource, property: &str) -> Option<String> {
        if !source.is_available() {
            return None;
        }
        let elem = self.element(node)?;
        elem.get_style(property)
            .or_else(|| {
                INITIAL_VALUES
                    .iter()
                    .find(|(name, _)| *name == property)
                    .map(|(_, value)| *value)
            })
            .map(str::to_string)
    }

    fn has_offset_parent(&self, node: NodeId) -> bool {
        self.element(node)
            .is_some_and(|e| e.geometry.has_offset_parent)
    }
}
