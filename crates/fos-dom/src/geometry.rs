//! Geometry APIs
//!
//! DOMRect as returned by getBoundingClientRect, raw host measurements,
//! and viewport dimensions.

/// DOMRect - element box in viewport coordinates
///
/// Edges may be negative when the element is scrolled past the top or left
/// of the viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DOMRect {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
    pub width: f64,
    pub height: f64,
}

impl DOMRect {
    /// Create empty rect
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with position and dimensions
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            top: y,
            left: x,
            bottom: y + height,
            right: x + width,
            width,
            height,
        }
    }

    /// Zero or negative extent on either axis
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Area covered by the rect
    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Measurement reported by the host before normalization
///
/// Some hosts only report edges; missing extents are filled in from the
/// element's client dimensions by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawRect {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl RawRect {
    /// Edges only, no reported extents
    pub fn from_edges(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
            width: None,
            height: None,
        }
    }
}

impl From<DOMRect> for RawRect {
    fn from(rect: DOMRect) -> Self {
        Self {
            top: rect.top,
            left: rect.left,
            bottom: rect.bottom,
            right: rect.right,
            width: Some(rect.width),
            height: Some(rect.height),
        }
    }
}

/// Dimensions of a rendering surface
///
/// Scrollbar thickness is included.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl ViewportSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Check if a rect overlaps the viewport at all
    #[inline]
    pub fn intersects(&self, rect: &DOMRect) -> bool {
        rect.bottom > 0.0
            && rect.right > 0.0
            && rect.top < self.height
            && rect.left < self.width
    }

    /// Check if a rect is fully inside the viewport
    #[inline]
    pub fn contains(&self, rect: &DOMRect) -> bool {
        rect.top >= 0.0
            && rect.left >= 0.0
            && rect.bottom <= self.height
            && rect.right <= self.width
    }
}

/// Element geometry state
#[derive(Debug, Clone, Default)]
pub struct ElementGeometry {
    /// Bounding client rect, if layout produced one
    pub rect: Option<RawRect>,

    // Client properties (content + padding, no scrollbar)
    pub client_width: f64,
    pub client_height: f64,

    /// Whether the element generated a box with an offsetParent
    pub has_offset_parent: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_rect_edges() {
        let rect = DOMRect::from_xywh(10.0, 20.0, 100.0, 50.0);

        assert_eq!(rect.top, 20.0);
        assert_eq!(rect.right, 110.0);
        assert_eq!(rect.bottom, 70.0);
        assert_eq!(rect.left, 10.0);
        assert_eq!(rect.area(), 5000.0);
    }

    #[test]
    fn test_degenerate() {
        assert!(DOMRect::from_xywh(0.0, 0.0, 0.0, 10.0).is_degenerate());
        assert!(DOMRect::from_xywh(0.0, 0.0, 10.0, -1.0).is_degenerate());
        assert!(!DOMRect::from_xywh(-50.0, -50.0, 10.0, 10.0).is_degenerate());
    }

    #[test]
    fn test_viewport_intersects() {
        let vp = ViewportSize::new(800.0, 600.0);

        // Fully inside
        assert!(vp.intersects(&DOMRect::from_xywh(10.0, 10.0, 20.0, 20.0)));

        // Partially inside
        assert!(vp.intersects(&DOMRect::from_xywh(-10.0, -10.0, 20.0, 20.0)));

        // Touching the bottom edge is not an overlap
        assert!(!vp.intersects(&DOMRect::from_xywh(0.0, 600.0, 20.0, 20.0)));

        // Fully outside
        assert!(!vp.intersects(&DOMRect::from_xywh(900.0, 100.0, 20.0, 20.0)));
    }

    #[test]
    fn test_viewport_contains() {
        let vp = ViewportSize::new(800.0, 600.0);

        assert!(vp.contains(&DOMRect::from_xywh(0.0, 0.0, 800.0, 600.0)));
        assert!(!vp.contains(&DOMRect::from_xywh(-1.0, 0.0, 20.0, 20.0)));
        assert!(!vp.contains(&DOMRect::from_xywh(790.0, 0.0, 20.0, 20.0)));
    }

    #[test]
    fn test_raw_rect_from_dom_rect() {
        let raw = RawRect::from(DOMRect::from_xywh(1.0, 2.0, 3.0, 4.0));
        assert_eq!(raw.width, Some(3.0));
        assert_eq!(raw.height, Some(4.0));
        assert_eq!(raw.bottom, 6.0);
    }
}
