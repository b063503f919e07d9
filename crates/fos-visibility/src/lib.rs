//! fOS Visibility
//!
//! Answers "is this element visible, and how much of it?" for viewability
//! tracking. An element counts as visible only when it overlaps the viewport,
//! its effective style lets it paint, and the page itself is visible.
//!
//! # Example
//! ```rust
//! use fos_dom::{DOMRect, DomTree, WindowId};
//! use fos_visibility::{PageVisibilityTracker, VisibilityEvaluator};
//!
//! let mut tree = DomTree::with_viewport(800.0, 600.0);
//! let doc = tree.create_document(WindowId::GLOBAL).unwrap();
//! let html = tree.create_element("html");
//! let ad = tree.create_element("div");
//! tree.append_child(doc, html).unwrap();
//! tree.append_child(html, ad).unwrap();
//! tree.set_bounds(ad, DOMRect::from_xywh(0.0, 500.0, 300.0, 200.0)).unwrap();
//!
//! let tracker = PageVisibilityTracker::unavailable();
//! let evaluator = VisibilityEvaluator::new(&tree, &tracker);
//! assert!(evaluator.is_visible(ad).unwrap());
//! assert_eq!(evaluator.visible_percentage(ad).unwrap(), 0.5);
//! ```

mod config;
mod evaluator;
pub mod geometry;
mod page;
mod state;
pub mod style;

pub use config::{Config, ViewportPolicy};
pub use evaluator::VisibilityEvaluator;
pub use page::{ChangeCallback, ManualSignal, PageVisibilityTracker, VisibilitySignal};
pub use state::{Thresholds, VisibilitySnapshot, VisibilityState};
pub use style::EffectiveStyle;

/// Visibility query error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VisibilityError {
    /// The host has neither computed style nor a legacy current style
    #[error("Host provides no mechanism for computing style")]
    StyleUnsupported,

    #[error("Invalid thresholds: hidden {hidden} must be below fully visible {fully_visible}, both in [0, 1]")]
    InvalidThresholds { hidden: f64, fully_visible: f64 },
}

pub type Result<T> = std::result::Result<T, VisibilityError>;
