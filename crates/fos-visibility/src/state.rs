//! Visibility classification
//!
//! Buckets a visible percentage into hidden / visible / fully visible using
//! configurable cut-offs.

use serde::{Deserialize, Serialize};

use crate::{Result, VisibilityError};

/// Visibility state of an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisibilityState {
    /// At or below the hidden threshold
    #[default]
    Hidden,

    /// Above the hidden threshold, below fully visible
    Visible,

    /// At or above the fully visible threshold
    #[serde(rename = "fullyvisible")]
    FullyVisible,
}

impl VisibilityState {
    /// Classify a visible fraction in `[0, 1]`
    pub fn from_percentage(percentage: f64, thresholds: &Thresholds) -> Self {
        if percentage >= thresholds.fully_visible {
            VisibilityState::FullyVisible
        } else if percentage > thresholds.hidden {
            VisibilityState::Visible
        } else {
            VisibilityState::Hidden
        }
    }

    #[inline]
    pub fn is_hidden(&self) -> bool {
        matches!(self, VisibilityState::Hidden)
    }

    /// Visible at all (partially or fully)
    #[inline]
    pub fn is_visible(&self) -> bool {
        !self.is_hidden()
    }

    #[inline]
    pub fn is_fully_visible(&self) -> bool {
        matches!(self, VisibilityState::FullyVisible)
    }
}

/// Percentage cut-offs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Percentages at or below this are hidden
    pub hidden: f64,
    /// Percentages at or above this are fully visible
    pub fully_visible: f64,
}

impl Thresholds {
    pub fn new(hidden: f64, fully_visible: f64) -> Result<Self> {
        let thresholds = Self {
            hidden,
            fully_visible,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Both within `[0, 1]` and `hidden < fully_visible`
    pub fn validate(&self) -> Result<()> {
        let in_range = |v: f64| (0.0..=1.0).contains(&v);
        if in_range(self.hidden) && in_range(self.fully_visible) && self.hidden < self.fully_visible {
            Ok(())
        } else {
            Err(VisibilityError::InvalidThresholds {
                hidden: self.hidden,
                fully_visible: self.fully_visible,
            })
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            hidden: 0.0,
            fully_visible: 1.0,
        }
    }
}

/// Result of a single visibility measurement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisibilitySnapshot {
    pub state: VisibilityState,
    /// Visible fraction of the element's area
    pub percentage: f64,
}

impl VisibilitySnapshot {
    pub fn new(percentage: f64, thresholds: &Thresholds) -> Self {
        Self {
            state: VisibilityState::from_percentage(percentage, thresholds),
            percentage,
        }
    }
}
