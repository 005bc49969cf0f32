//! Configuration for detection, bucketing and rendering.
//!
//! All tunables are plain values passed explicitly to the pipeline; nothing
//! here is read from global state.
//!
//! # Example
//!
//! ```rust
//! use chatshelf::config::ShelfConfig;
//!
//! let config = ShelfConfig::new()
//!     .with_max_files(300)
//!     .with_scan_budget(100);
//!
//! assert_eq!(config.max_files, 300);
//! ```

use serde::{Deserialize, Serialize};

use crate::parsing::DateLayout;

/// Default number of lines the format detector examines.
pub const DEFAULT_SCAN_BUDGET: usize = 50;

/// Default maximum number of documents for automatic granularity.
pub const DEFAULT_MAX_FILES: usize = 400;

/// Default text that replaces the content of media messages.
pub const DEFAULT_MEDIA_PLACEHOLDER: &str = "[[MEDIA FILE]]";

/// Settings shared by the whole export pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShelfConfig {
    /// Lines examined by the format detector before it settles (default: 50)
    pub scan_budget: usize,

    /// Document count that `AUTO` granularity must stay under; advisory for
    /// explicit granularities (default: 400)
    pub max_files: usize,

    /// Replacement content for media messages (default: `[[MEDIA FILE]]`)
    pub media_placeholder: String,

    /// Date layout to use instead of detecting one (default: detect)
    pub layout: Option<DateLayout>,
}

impl Default for ShelfConfig {
    fn default() -> Self {
        Self {
            scan_budget: DEFAULT_SCAN_BUDGET,
            max_files: DEFAULT_MAX_FILES,
            media_placeholder: DEFAULT_MEDIA_PLACEHOLDER.to_string(),
            layout: None,
        }
    }
}

impl ShelfConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the detector scan budget. A budget of zero is raised to one line.
    #[must_use]
    pub fn with_scan_budget(mut self, lines: usize) -> Self {
        self.scan_budget = lines.max(1);
        self
    }

    /// Sets the maximum document count.
    #[must_use]
    pub fn with_max_files(mut self, max_files: usize) -> Self {
        self.max_files = max_files;
        self
    }

    /// Sets the media placeholder text.
    #[must_use]
    pub fn with_media_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.media_placeholder = placeholder.into();
        self
    }

    /// Forces a date layout and skips detection.
    #[must_use]
    pub fn with_layout(mut self, layout: DateLayout) -> Self {
        self.layout = Some(layout);
        self
    }
}
