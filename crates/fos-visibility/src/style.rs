//! Effective style resolution
//!
//! Reads style through whichever mechanism the host offers and walks the
//! ancestor chain where a single computed value is not enough: `inherit`
//! under legacy current style, and `display: none` on an ancestor.

use fos_dom::{NodeKind, RenderHost, StyleSource};

use crate::geometry::owner_window;
use crate::{Result, VisibilityError};

const INHERIT: &str = "inherit";

/// Style surface of one node, queried property by property
pub struct EffectiveStyle<'h, H: RenderHost> {
    host: &'h H,
    node: H::Node,
    source: StyleSource,
}

impl<'h, H: RenderHost> EffectiveStyle<'h, H> {
    /// Value as the host reports it, without inheritance resolution
    pub fn get(&self, property: &str) -> Option<String> {
        self.host.style_value(self.node, self.source, property)
    }

    /// Mechanism this handle reads through
    pub fn source(&self) -> StyleSource {
        self.source
    }
}

/// Style surface of a node
///
/// `Ok(None)` for nodes without one (text, documents). Fails only when the
/// host has no style mechanism at all.
pub fn effective_style<H: RenderHost>(host: &H, node: H::Node) -> Result<Option<EffectiveStyle<'_, H>>> {
    let source = host.style_source();
    if !source.is_available() {
        tracing::warn!("Host offers neither computed nor current style");
        return Err(VisibilityError::StyleUnsupported);
    }

    if !host.has_style(node) {
        return Ok(None);
    }

    Ok(Some(EffectiveStyle { host, node, source }))
}

/// Resolved value of one property
///
/// `inherit` is replaced by the nearest styled ancestor's value. The literal
/// `inherit` is returned if no styled ancestor exists.
pub fn effective_style_property<H: RenderHost>(
    host: &H,
    node: H::Node,
    property: &str,
) -> Result<Option<String>> {
    let mut current = node;
    loop {
        let Some(style) = effective_style(host, current)? else {
            return Ok(None);
        };
        let value = style.get(property);
        if value.as_deref() != Some(INHERIT) {
            return Ok(value);
        }

        match host.parent(current).filter(|parent| host.has_style(*parent)) {
            Some(parent) => {
                tracing::trace!("Resolving inherited {} from {:?}", property, parent);
                current = parent;
            }
            None => return Ok(value),
        }
    }
}

/// Neither the node nor a styled ancestor has `display: none`
///
/// Nodes without a style surface (text) are judged by their ancestors. The
/// walk stops at the first parent without a style surface.
pub fn is_rendered<H: RenderHost>(host: &H, node: H::Node) -> Result<bool> {
    let mut current = node;
    loop {
        if let Some(style) = effective_style(host, current)? {
            if style.get("display").as_deref() == Some("none") {
                return Ok(false);
            }
        }
        match host.parent(current).filter(|parent| host.has_style(*parent)) {
            Some(parent) => current = parent,
            None => return Ok(true),
        }
    }
}

/// The node generated a box
///
/// A missing offsetParent means no box, except for fixed-position elements
/// which never have one.
pub fn is_in_render_tree<H: RenderHost>(host: &H, node: H::Node) -> Result<bool> {
    if host.has_offset_parent(node) {
        return Ok(true);
    }
    let position = effective_style_property(host, node, "position")?;
    Ok(position.as_deref() == Some("fixed"))
}

/// Style allows the node to paint
///
/// The document loaded in a window is always visible; any other document is
/// parentless and therefore not.
pub fn is_visible_by_style<H: RenderHost>(host: &H, node: H::Node) -> Result<bool> {
    if host.kind(node) == NodeKind::Document
        && host.window_document(owner_window(host, Some(node))) == Some(node)
    {
        return Ok(true);
    }
    if host.parent(node).is_none() {
        return Ok(false);
    }
    if !is_in_render_tree(host, node)? || !is_rendered(host, node)? {
        return Ok(false);
    }

    let visibility = effective_style_property(host, node, "visibility")?;
    Ok(!matches!(visibility.as_deref(), Some("hidden" | "collapse")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fos_dom::{DomTree, NodeId, WindowId};

    /// document > html > body > div > span
    fn nested(tree: &mut DomTree) -> [NodeId; 5] {
        let doc = tree.create_document(WindowId::GLOBAL).unwrap();
        let html = tree.create_element("html");
        let body = tree.create_element("body");
        let div = tree.create_element("div");
        let span = tree.create_element("span");
        tree.append_child(doc, html).unwrap();
        tree.append_child(html, body).unwrap();
        tree.append_child(body, div).unwrap();
        tree.append_child(div, span).unwrap();
        [doc, html, body, div, span]
    }

    #[test]
    fn test_effective_style_surfaces() {
        let mut tree = DomTree::new();
        let [doc, _, _, div, _] = nested(&mut tree);
        let text = tree.create_text("hi");
        tree.append_child(div, text).unwrap();

        let style = effective_style(&tree, div).unwrap().unwrap();
        assert_eq!(style.source(), StyleSource::Computed);
        assert_eq!(style.get("display").as_deref(), Some("inline"));
        assert!(effective_style(&tree, text).unwrap().is_none());
        assert!(effective_style(&tree, doc).unwrap().is_none());
        assert_eq!(effective_style_property(&tree, text, "display").unwrap(), None);
    }

    #[test]
    fn test_unsupported_host_is_fatal() {
        let mut tree = DomTree::new();
        let [_, _, _, div, _] = nested(&mut tree);
        tree.set_style_source(StyleSource::Unavailable);

        assert!(matches!(effective_style(&tree, div), Err(VisibilityError::StyleUnsupported)));
        assert_eq!(is_rendered(&tree, div), Err(VisibilityError::StyleUnsupported));
        assert_eq!(is_visible_by_style(&tree, div), Err(VisibilityError::StyleUnsupported));
    }

    #[test]
    fn test_inherit_one_level() {
        let mut tree = DomTree::new();
        tree.set_style_source(StyleSource::Current);
        let [_, _, _, div, span] = nested(&mut tree);
        tree.set_style(div, "display", "block").unwrap();
        tree.set_style(span, "display", "inherit").unwrap();

        assert_eq!(
            effective_style_property(&tree, span, "display").unwrap().as_deref(),
            Some("block")
        );
    }

    #[test]
    fn test_inherit_chain() {
        let mut tree = DomTree::new();
        let [_, html, body, div, span] = nested(&mut tree);
        tree.set_style(html, "visibility", "hidden").unwrap();
        tree.set_style(body, "visibility", "inherit").unwrap();
        tree.set_style(div, "visibility", "inherit").unwrap();
        tree.set_style(span, "visibility", "inherit").unwrap();

        assert_eq!(
            effective_style_property(&tree, span, "visibility").unwrap().as_deref(),
            Some("hidden")
        );
    }

    #[test]
    fn test_inherit_without_styled_parent() {
        let mut tree = DomTree::new();
        let [_, html, _, _, _] = nested(&mut tree);
        tree.set_style(html, "display", "inherit").unwrap();

        assert_eq!(
            effective_style_property(&tree, html, "display").unwrap().as_deref(),
            Some("inherit")
        );
    }

    #[test]
    fn test_display_none_three_levels_up() {
        let mut tree = DomTree::new();
        tree.set_style_source(StyleSource::Current);
        let [_, html, body, div, span] = nested(&mut tree);

        assert!(is_rendered(&tree, span).unwrap());

        tree.set_style(html, "display", "none").unwrap();
        assert!(!is_rendered(&tree, span).unwrap());
        assert!(!is_rendered(&tree, body).unwrap());

        tree.set_style(html, "display", "block").unwrap();
        tree.set_style(div, "display", "none").unwrap();
        assert!(!is_rendered(&tree, span).unwrap());
        assert!(is_rendered(&tree, body).unwrap());
    }

    #[test]
    fn test_render_tree_offset_parent() {
        let mut tree = DomTree::new();
        let [_, _, _, div, span] = nested(&mut tree);
        assert!(is_in_render_tree(&tree, span).unwrap());

        tree.set_offset_parent(span, false).unwrap();
        assert!(!is_in_render_tree(&tree, span).unwrap());

        tree.set_style(span, "position", "fixed").unwrap();
        assert!(is_in_render_tree(&tree, span).unwrap());

        tree.set_offset_parent(div, false).unwrap();
        tree.set_style(div, "position", "static").unwrap();
        assert!(!is_in_render_tree(&tree, div).unwrap());
    }

    #[test]
    fn test_visible_by_style() {
        let mut tree = DomTree::new();
        let [doc, _, body, div, span] = nested(&mut tree);
        let detached = tree.create_element("div");

        assert!(is_visible_by_style(&tree, doc).unwrap());
        assert!(!is_visible_by_style(&tree, detached).unwrap());
        assert!(is_visible_by_style(&tree, span).unwrap());

        tree.set_style(div, "visibility", "hidden").unwrap();
        assert!(!is_visible_by_style(&tree, div).unwrap());

        tree.set_style(div, "visibility", "collapse").unwrap();
        assert!(!is_visible_by_style(&tree, div).unwrap());

        tree.set_style(div, "visibility", "visible").unwrap();
        tree.set_style(body, "display", "none").unwrap();
        assert!(!is_visible_by_style(&tree, span).unwrap());
    }

    #[test]
    fn test_text_under_collapsed_element() {
        let mut tree = DomTree::new();
        tree.set_style_source(StyleSource::Current);
        let [_, html, _, div, _] = nested(&mut tree);
        let text = tree.create_text("hello");
        tree.append_child(div, text).unwrap();

        assert!(is_rendered(&tree, text).unwrap());

        tree.set_style(div, "display", "none").unwrap();
        assert_eq!(is_rendered(&tree, div), Ok(false));
        assert_eq!(is_rendered(&tree, text), Ok(false));

        tree.set_style(div, "display", "block").unwrap();
        tree.set_style(html, "display", "none").unwrap();
        assert_eq!(is_rendered(&tree, text), Ok(false));
    }

    #[test]
    fn test_detached_text_is_rendered() {
        let mut tree = DomTree::new();
        let text = tree.create_text("loose");

        assert_eq!(is_rendered(&tree, text), Ok(true));
    }

    #[test]
    fn test_text_property_reads() {
        let mut tree = DomTree::new();
        tree.set_style_source(StyleSource::Current);
        let [_, _, _, div, _] = nested(&mut tree);
        let text = tree.create_text("hello");
        tree.append_child(div, text).unwrap();
        tree.set_style(div, "visibility", "hidden").unwrap();

        // No style surface of its own, even when the parent has one
        assert_eq!(effective_style_property(&tree, text, "visibility"), Ok(None));
        assert_eq!(effective_style_property(&tree, text, "display"), Ok(None));
    }

    #[test]
    fn test_unloaded_document_not_visible_by_style() {
        let mut tree = DomTree::new();
        let [doc, _, _, _, _] = nested(&mut tree);
        let spare = tree.create_document(WindowId::GLOBAL).unwrap();

        assert!(is_visible_by_style(&tree, doc).unwrap());
        assert!(!is_visible_by_style(&tree, spare).unwrap());
    }

    #[test]
    fn test_text_node_not_visible_by_style() {
        let mut tree = DomTree::new();
        let [_, _, _, div, _] = nested(&mut tree);
        let text = tree.create_text("hello");
        tree.append_child(div, text).unwrap();

        assert!(!is_visible_by_style(&tree, text).unwrap());
    }
}
