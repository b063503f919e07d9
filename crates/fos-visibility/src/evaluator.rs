//! Visibility evaluation
//!
//! Combines element geometry, effective style and page visibility into the
//! answers viewability trackers need. Nothing is cached: every call reads
//! the current state of the host.

use fos_dom::{DOMRect, RenderHost, ViewportSize};

use crate::geometry::{bounding_rect, viewport_size_with};
use crate::style::is_visible_by_style;
use crate::{Config, PageVisibilityTracker, Result, VisibilitySnapshot};

/// Visibility queries against one host
pub struct VisibilityEvaluator<'a, H: RenderHost> {
    host: &'a H,
    page: &'a PageVisibilityTracker,
    config: Config,
}

impl<'a, H: RenderHost> VisibilityEvaluator<'a, H> {
    /// Create an evaluator with the default configuration
    pub fn new(host: &'a H, page: &'a PageVisibilityTracker) -> Self {
        Self {
            host,
            page,
            config: Config::default(),
        }
    }

    /// Create an evaluator with a validated configuration
    pub fn with_config(host: &'a H, page: &'a PageVisibilityTracker, config: Config) -> Result<Self> {
        config.validate()?;
        tracing::debug!("Visibility evaluator configured: {:?}", config);
        Ok(Self { host, page, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn measure(&self, element: H::Node) -> (DOMRect, ViewportSize) {
        let rect = bounding_rect(self.host, element);
        let viewport = viewport_size_with(self.host, element, self.config.viewport);
        (rect, viewport)
    }

    /// Any part of the element overlaps the viewport
    pub fn is_in_viewport(&self, element: H::Node) -> bool {
        let (rect, viewport) = self.measure(element);
        !rect.is_degenerate() && viewport.intersects(&rect)
    }

    /// The element lies entirely inside the viewport
    pub fn is_fully_in_viewport(&self, element: H::Node) -> bool {
        let (rect, viewport) = self.measure(element);
        !rect.is_degenerate() && viewport.contains(&rect)
    }

    /// Fraction of the element's area that is actually visible, in `[0, 1]`
    pub fn visible_percentage(&self, element: H::Node) -> Result<f64> {
        let (rect, viewport) = self.measure(element);
        if rect.is_degenerate() || !viewport.intersects(&rect) {
            return Ok(0.0);
        }
        if !is_visible_by_style(self.host, element)? || !self.page.is_page_visible() {
            return Ok(0.0);
        }

        let visible_height = visible_extent(rect.top, rect.bottom, rect.height, viewport.height);
        let visible_width = visible_extent(rect.left, rect.right, rect.width, viewport.width);

        Ok(((visible_height * visible_width) / rect.area()).max(0.0))
    }

    /// Page visible, element fully in viewport and visible by style
    pub fn is_fully_visible(&self, element: H::Node) -> Result<bool> {
        Ok(self.page.is_page_visible()
            && self.is_fully_in_viewport(element)
            && is_visible_by_style(self.host, element)?)
    }

    /// Page visible, element at least partially in viewport and visible by style
    pub fn is_visible(&self, element: H::Node) -> Result<bool> {
        Ok(self.page.is_page_visible()
            && self.is_in_viewport(element)
            && is_visible_by_style(self.host, element)?)
    }

    pub fn is_hidden(&self, element: H::Node) -> Result<bool> {
        Ok(!self.is_visible(element)?)
    }

    /// Measure and classify the element with the configured thresholds
    pub fn state(&self, element: H::Node) -> Result<VisibilitySnapshot> {
        let percentage = self.visible_percentage(element)?;
        Ok(VisibilitySnapshot::new(percentage, &self.config.thresholds))
    }
}

/// Visible length of one axis of an element known to overlap the viewport
///
/// The element either starts inside the viewport, or starts before it and
/// ends past its origin.
#[inline]
fn visible_extent(start: f64, end: f64, size: f64, viewport: f64) -> f64 {
    if start >= 0.0 {
        size.min(viewport - start)
    } else {
        viewport.min(end)
    }
}
