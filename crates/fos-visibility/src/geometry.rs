//! Element and viewport geometry
//!
//! Every measurement is read fresh from the host on each call.

use fos_dom::{DOMRect, RenderHost, ViewportSize, WindowId};

use crate::ViewportPolicy;

/// Bounding client rect of an element
///
/// Missing width/height are filled in from clientWidth/clientHeight. An
/// element the host cannot measure yields an all-zero rect.
pub fn bounding_rect<H: RenderHost>(host: &H, element: H::Node) -> DOMRect {
    let Some(raw) = host.measure(element) else {
        tracing::trace!("No measurement for {:?}", element);
        return DOMRect::default();
    };

    let (width, height) = match (raw.width, raw.height) {
        (Some(width), Some(height)) => (width, height),
        (width, height) => {
            let client = host.client_size(element);
            (width.unwrap_or(client.width), height.unwrap_or(client.height))
        }
    };

    DOMRect {
        top: raw.top,
        left: raw.left,
        bottom: raw.bottom,
        right: raw.right,
        width,
        height,
    }
}

/// Window owning the element's document, or the global window
pub fn owner_window<H: RenderHost>(host: &H, element: Option<H::Node>) -> WindowId {
    element
        .and_then(|node| host.owner_document(node))
        .and_then(|doc| host.document_window(doc))
        .unwrap_or_else(|| host.global_window())
}

/// Viewport size of the element's window under the default policy
pub fn viewport_size<H: RenderHost>(host: &H, element: H::Node) -> ViewportSize {
    viewport_size_with(host, element, ViewportPolicy::default())
}

/// Viewport size of the element's window
///
/// Scrollbars are not subtracted.
pub fn viewport_size_with<H: RenderHost>(
    host: &H,
    element: H::Node,
    policy: ViewportPolicy,
) -> ViewportSize {
    let window = owner_window(host, Some(element));

    if policy == ViewportPolicy::InnerWithDocumentFallback {
        if let Some(size) = host.inner_size(window) {
            return size;
        }
        tracing::trace!("Window {:?} has no inner size, using root element", window);
    }

    host.window_document(window)
        .and_then(|doc| host.document_element(doc))
        .map(|root| host.client_size(root))
        .unwrap_or_default()
}
