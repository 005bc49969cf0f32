//! The parsed chat message type.
//!
//! A [`MessageRecord`] is produced for every header line of the export, with
//! all continuation lines that follow it folded into its content.
//!
//! # Examples
//!
//! ```
//! use chatshelf::MessageRecord;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2023, 12, 25)
//!     .and_then(|d| d.and_hms_opt(14, 30, 0))
//!     .unwrap();
//! let msg = MessageRecord::new(ts, "Alice", "Merry Christmas!");
//!
//! assert_eq!(msg.sender(), "Alice");
//! assert!(!msg.is_media());
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Marker WhatsApp writes in place of attachments when exporting without media.
pub const MEDIA_OMITTED_MARKER: &str = "<Media omitted>";

/// One chat message assembled from a header line and its continuation lines.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `timestamp` | `NaiveDateTime` | Minute-precision send time, no timezone |
/// | `sender` | `String` | Label between ` - ` and the first `:` of the header |
/// | `content` | `String` | Header text plus continuation lines, `\n`-joined |
/// | `is_media` | `bool` | Whether the raw content held the media-omitted marker |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// When the message was sent, as written in the export.
    pub timestamp: NaiveDateTime,

    /// Display name or phone number of the author.
    pub sender: String,

    /// Text content. Multi-line messages keep their line breaks.
    pub content: String,

    /// `true` if the content contained the media-omitted marker.
    #[serde(default)]
    pub is_media: bool,
}

impl MessageRecord {
    /// Creates a message, deriving `is_media` from the content.
    pub fn new(
        timestamp: NaiveDateTime,
        sender: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let content = content.into();
        let is_media = content.contains(MEDIA_OMITTED_MARKER);
        Self {
            timestamp,
            sender: sender.into(),
            content,
            is_media,
        }
    }

    /// Builder method to override the media flag.
    #[must_use]
    pub fn with_media(mut self, is_media: bool) -> Self {
        self.is_media = is_media;
        self
    }

    /// Returns the send time.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Returns the calendar date the message was sent on.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Returns the sender label.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the message content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns `true` if the message stood in for an omitted attachment.
    pub fn is_media(&self) -> bool {
        self.is_media
    }

    /// Returns the number of lines in the content.
    pub fn line_count(&self) -> usize {
        self.content.lines().count().max(1)
    }
}
