//! Markdown document writer.
//!
//! Every bucket becomes one document:
//!
//! ````text
//! # Conversation: Family
//! ## Period: 2023-01-02 09:00 to 2023-01-04 18:00
//!
//! ---
//!
//! **[2023-01-02 09:00] Alice:**
//! ```
//! first line
//!   second line
//! ```
//!
//! ````

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::{debug, error, info};

use crate::core::bucket::{Bucket, bucket_messages};
use crate::core::granularity::Period;
use crate::error::ShelfError;
use crate::message::MessageRecord;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A rendered bucket, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    /// File name inside the output folder, e.g. `2023-01-02_to_2023-01-04.md`
    pub file_name: String,
    /// Full Markdown text
    pub body: String,
    /// Canonical bucket start
    pub start: NaiveDate,
    /// Date of the last message in the bucket
    pub end: NaiveDate,
    /// Number of messages rendered
    pub message_count: usize,
}

/// Outcome of writing a batch of documents.
#[derive(Debug, Default)]
pub struct WriteReport {
    /// Paths written successfully, in document order
    pub written: Vec<PathBuf>,
    /// One [`ShelfError::OutputWrite`] per failed document
    pub failed: Vec<ShelfError>,
}

impl WriteReport {
    /// Returns `true` if every document was written.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Renders the Markdown text for one bucket.
pub fn to_markdown(bucket: &Bucket<'_>, title: &str) -> String {
    let mut out = String::new();

    let (first, last) = match (bucket.first_timestamp(), bucket.last_timestamp()) {
        (Some(first), Some(last)) => (first, last),
        _ => return out,
    };

    out.push_str(&format!("# Conversation: {title}\n"));
    out.push_str(&format!(
        "## Period: {} to {}\n\n",
        stamp(first),
        stamp(last)
    ));
    out.push_str("---\n\n");

    for msg in &bucket.messages {
        out.push_str(&format!("**[{}] {}:**\n", stamp(msg.timestamp), msg.sender));
        out.push_str("```\n");
        out.push_str(&msg.content.replace('\n', "\n  "));
        out.push_str("\n```\n\n");
    }

    out
}

fn stamp(ts: NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Renders one bucket into a [`Document`].
pub fn render_document(bucket: &Bucket<'_>, title: &str) -> Document {
    Document {
        file_name: bucket.file_name(),
        body: to_markdown(bucket, title),
        start: bucket.start,
        end: bucket.end(),
        message_count: bucket.len(),
    }
}

/// Buckets `messages` under `period` and renders every bucket, ascending by
/// start date.
///
/// # Example
///
/// ```rust
/// use chatshelf::core::{Period, render_documents};
/// use chatshelf::parsers::WhatsAppParser;
///
/// let messages = WhatsAppParser::new()
///     .parse_str("02/01/23, 09:00 - Alice: hi\n04/01/23, 18:00 - Bob: hey")?;
/// let docs = render_documents(&messages, Period::Week, "Family");
///
/// assert_eq!(docs[0].file_name, "2023-01-02_to_2023-01-04.md");
/// assert!(docs[0].body.starts_with("# Conversation: Family\n"));
/// # Ok::<(), chatshelf::ShelfError>(())
/// ```
pub fn render_documents(messages: &[MessageRecord], period: Period, title: &str) -> Vec<Document> {
    bucket_messages(messages, period)
        .iter()
        .map(|bucket| render_document(bucket, title))
        .collect()
}

/// Writes every document into `dir`.
///
/// A failed write is logged and recorded in the report; the remaining
/// documents are still written. `dir` must already exist.
pub fn write_documents(documents: &[Document], dir: &Path) -> WriteReport {
    let mut report = WriteReport::default();

    for doc in documents {
        let path = dir.join(&doc.file_name);
        match fs::write(&path, doc.body.as_bytes()) {
            Ok(()) => {
                debug!(path = %path.display(), messages = doc.message_count, "wrote document");
                report.written.push(path);
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "could not write document");
                report.failed.push(ShelfError::output_write(path, e));
            }
        }
    }

    info!(
        written = report.written.len(),
        failed = report.failed.len(),
        dir = %dir.display(),
        "markdown files saved"
    );
    report
}
