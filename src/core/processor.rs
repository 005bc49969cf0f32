//! The export pipeline: parse, substitute media, bucket, render, write.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::bucket::resolve_period;
use super::granularity::{Granularity, Period};
use super::output::{Document, render_documents, write_documents};
use crate::config::ShelfConfig;
use crate::error::{Result, ShelfError};
use crate::message::MessageRecord;
use crate::parsers::{WhatsAppParser, read_export};
use crate::parsing::Detection;

/// Replaces the content of every media message with `placeholder`.
///
/// Returns the number of messages replaced.
///
/// # Example
///
/// ```rust
/// use chatshelf::core::replace_media;
/// use chatshelf::parsers::WhatsAppParser;
///
/// let mut messages = WhatsAppParser::new()
///     .parse_str("25/12/23, 14:30 - Alice: <Media omitted>\n25/12/23, 14:31 - Bob: nice")?;
/// assert_eq!(replace_media(&mut messages, "[[MEDIA FILE]]"), 1);
/// assert_eq!(messages[0].content, "[[MEDIA FILE]]");
/// assert_eq!(messages[1].content, "nice");
/// # Ok::<(), chatshelf::ShelfError>(())
/// ```
pub fn replace_media(messages: &mut [MessageRecord], placeholder: &str) -> usize {
    let mut replaced = 0;
    for msg in messages.iter_mut().filter(|m| m.is_media) {
        msg.content = placeholder.to_string();
        replaced += 1;
    }
    replaced
}

/// Everything needed to write an export, computed without touching disk.
#[derive(Debug, Clone)]
pub struct ExportPlan {
    /// How dates were read
    pub detection: Detection,
    /// Messages parsed
    pub message_count: usize,
    /// Messages whose content was replaced by the media placeholder
    pub media_count: usize,
    /// Bucket span actually used
    pub period: Period,
    /// Rendered documents, ascending by start date
    pub documents: Vec<Document>,
}

/// Parses `content` and renders every document in memory.
pub fn plan_export(
    content: &str,
    title: &str,
    granularity: Granularity,
    config: &ShelfConfig,
) -> Result<ExportPlan> {
    let parsed = WhatsAppParser::with_config(config.clone()).parse_export(content)?;
    let mut messages = parsed.messages;

    let media_count = replace_media(&mut messages, &config.media_placeholder);
    let period = resolve_period(&messages, granularity, config.max_files);
    let documents = render_documents(&messages, period, title);

    Ok(ExportPlan {
        detection: parsed.detection,
        message_count: messages.len(),
        media_count,
        period,
        documents,
    })
}

/// Result of a full export run.
#[derive(Debug)]
pub struct ExportSummary {
    /// How dates were read
    pub detection: Detection,
    /// Messages parsed
    pub message_count: usize,
    /// Media messages replaced by the placeholder
    pub media_count: usize,
    /// Bucket span actually used
    pub period: Period,
    /// Number of documents rendered
    pub planned: usize,
    /// Paths written successfully
    pub written: Vec<PathBuf>,
    /// Per-document write failures
    pub failed: Vec<ShelfError>,
}

impl ExportSummary {
    /// Returns `true` if the export held no messages and nothing was written.
    pub fn is_empty(&self) -> bool {
        self.message_count == 0
    }

    /// Returns `true` if every planned document was written.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty() && self.written.len() == self.planned
    }
}

/// Full pipeline: read `input`, bucket its messages and write one Markdown
/// file per bucket into `output_dir` (created if missing).
///
/// Detection and parse failures abort before anything is written. A
/// failure to write one document is recorded in the summary and does not
/// stop the others. An export with no messages writes nothing and returns
/// an empty summary.
pub fn process_export(
    input: &Path,
    title: &str,
    output_dir: &Path,
    granularity: Granularity,
    config: &ShelfConfig,
) -> Result<ExportSummary> {
    info!(input = %input.display(), %granularity, "processing export");
    let content = read_export(input)?;
    let plan = plan_export(&content, title, granularity, config)?;

    let mut summary = ExportSummary {
        detection: plan.detection,
        message_count: plan.message_count,
        media_count: plan.media_count,
        period: plan.period,
        planned: plan.documents.len(),
        written: Vec::new(),
        failed: Vec::new(),
    };

    if plan.documents.is_empty() {
        warn!(input = %input.display(), "no messages to write");
        return Ok(summary);
    }

    info!(
        period = %plan.period,
        files = plan.documents.len(),
        "grouping messages"
    );
    fs::create_dir_all(output_dir)?;
    let report = write_documents(&plan.documents, output_dir);
    summary.written = report.written;
    summary.failed = report.failed;

    Ok(summary)
}
