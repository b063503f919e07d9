//! Visibility Configuration

use serde::{Deserialize, Serialize};

use crate::{Result, Thresholds};

/// How the viewport size of an element's window is measured
///
/// Neither policy subtracts scrollbar thickness; callers rely on the
/// scrollbar-inclusive numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewportPolicy {
    /// innerWidth / innerHeight, falling back to the root element's client
    /// size when the window does not expose them
    #[default]
    InnerWithDocumentFallback,

    /// Always the root element's client size
    DocumentElementOnly,
}

/// Visibility query configuration
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Viewport measurement policy
    pub viewport: ViewportPolicy,

    /// Cut-offs for hidden / visible / fully visible
    pub thresholds: Thresholds,
}

impl Config {
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_viewport(mut self, viewport: ViewportPolicy) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.thresholds.validate()
    }
}
