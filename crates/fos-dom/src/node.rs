//! DOM Node
//!
//! Nodes link to each other by `NodeId` instead of pointers; the parent link
//! is a plain index used for upward lookups only.

use crate::{ElementGeometry, NodeId, WindowId};

/// DOM Node - Core structure
#[derive(Debug)]
pub struct Node {
    /// Parent node (NONE if root or detached)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Owning document (NONE until attached under one)
    pub document: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            next_sibling: NodeId::NONE,
            document: NodeId::NONE,
            data,
        }
    }

    /// Create a new element node
    pub fn element(tag: &str) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(tag)))
    }

    /// Create a new text node
    pub fn text(content: &str) -> Self {
        Self::with_data(NodeData::Text(content.to_string()))
    }

    /// Create a document node displayed in `window`
    pub fn document(window: WindowId) -> Self {
        Self::with_data(NodeData::Document(DocumentData { window }))
    }

    /// Create a comment node
    pub fn comment(content: &str) -> Self {
        Self::with_data(NodeData::Comment(content.to_string()))
    }

    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    #[inline]
    pub fn is_document(&self) -> bool {
        matches!(self.data, NodeData::Document(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get document data if this is a document
    #[inline]
    pub fn as_document(&self) -> Option<&DocumentData> {
        match &self.data {
            NodeData::Document(d) => Some(d),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    Document(DocumentData),
    Element(ElementData),
    Text(String),
    Comment(String),
}

/// Document-specific data
#[derive(Debug, Clone, Copy)]
pub struct DocumentData {
    /// Window the document is displayed in
    pub window: WindowId,
}

/// Element-specific data
#[derive(Debug, Default)]
pub struct ElementData {
    /// Tag name
    pub tag: String,
    /// Style values as the host reports them, in declaration order
    pub style: Vec<(String, String)>,
    /// Layout results
    pub geometry: ElementGeometry,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    /// Get a style value
    pub fn get_style(&self, property: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value.as_str())
    }

    /// Set a style value, replacing any previous one
    pub fn set_style(&mut self, property: &str, value: &str) {
        for (name, existing) in self.style.iter_mut() {
            if name == property {
                *existing = value.to_string();
                return;
            }
        }
        self.style.push((property.to_string(), value.to_string()));
    }
}
