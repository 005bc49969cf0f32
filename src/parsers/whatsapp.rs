//! `WhatsApp` TXT export parser.
//!
//! Handles the Android-style export where every message starts with
//!
//! ```text
//! 25/12/23, 14:30 - Alice: first line
//! continuation line
//! ```
//!
//! The date layout is detected from the first lines of the file (see
//! [`detect_layout`]) unless one is configured explicitly.

use std::fs;
use std::io;
use std::mem;
use std::path::Path;

use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

use crate::config::ShelfConfig;
use crate::error::{Result, ShelfError};
use crate::message::MessageRecord;
use crate::parsing::whatsapp::strip_bom;
use crate::parsing::{Confidence, DateLayout, Detection, HeaderLine, detect_layout};

/// Parser for WhatsApp TXT exports.
///
/// # Example
///
/// ```rust
/// use chatshelf::parsers::WhatsAppParser;
///
/// let export = "25/12/23, 14:30 - Alice: Merry Christmas!\nSee you soon\n25/12/23, 14:31 - Bob: Thanks!";
/// let messages = WhatsAppParser::new().parse_str(export)?;
///
/// assert_eq!(messages.len(), 2);
/// assert_eq!(messages[0].content, "Merry Christmas!\nSee you soon");
/// # Ok::<(), chatshelf::ShelfError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct WhatsAppParser {
    config: ShelfConfig,
}

/// Messages of one export together with the layout used to read them.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedExport {
    /// How the date layout was chosen
    pub detection: Detection,
    /// Messages in input order
    pub messages: Vec<MessageRecord>,
}

impl WhatsAppParser {
    /// Creates a new parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ShelfConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ShelfConfig {
        &self.config
    }

    /// Reads and parses an export file.
    ///
    /// A missing file is reported as [`ShelfError::FileNotFound`].
    pub fn parse(&self, path: &Path) -> Result<ParsedExport> {
        let content = read_export(path)?;
        self.parse_export(&content)
    }

    /// Parses export content and returns only the messages.
    pub fn parse_str(&self, content: &str) -> Result<Vec<MessageRecord>> {
        self.parse_export(content).map(|parsed| parsed.messages)
    }

    /// Parses export content with a known layout, without detection.
    pub fn parse_with_layout(&self, content: &str, layout: DateLayout) -> Result<Vec<MessageRecord>> {
        parse_with_layout(content, layout)
    }

    /// Detects (or applies the configured) layout, then parses every line.
    pub fn parse_export(&self, content: &str) -> Result<ParsedExport> {
        let detection = match self.config.layout {
            Some(layout) => Detection {
                layout,
                confidence: Confidence::Explicit,
                lines_scanned: 0,
            },
            None => detect_layout(content, self.config.scan_budget)?,
        };

        let messages = parse_with_layout(content, detection.layout)?;
        if messages.is_empty() {
            warn!(layout = %detection.layout, "no messages found in export");
        } else {
            info!(count = messages.len(), layout = %detection.layout, "parsed messages");
        }

        Ok(ParsedExport {
            detection,
            messages,
        })
    }
}

/// Reads a whole export into memory.
pub fn read_export(path: &Path) -> Result<String> {
    debug!(path = %path.display(), "reading export");
    fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ShelfError::file_not_found(path),
        _ => ShelfError::Io(e),
    })
}

/// A message whose header has been read but whose continuation lines may
/// still be arriving.
#[derive(Debug)]
struct OpenMessage<'a> {
    timestamp: NaiveDateTime,
    sender: &'a str,
    lines: Vec<&'a str>,
}

impl<'a> OpenMessage<'a> {
    fn start(timestamp: NaiveDateTime, header: &HeaderLine<'a>) -> Self {
        Self {
            timestamp,
            sender: header.sender,
            lines: vec![header.content.trim()],
        }
    }

    fn finish(self) -> MessageRecord {
        MessageRecord::new(self.timestamp, self.sender, self.lines.join("\n"))
    }
}

#[derive(Debug)]
enum ParseState<'a> {
    NoMessageOpen,
    MessageOpen(OpenMessage<'a>),
}

impl ParseState<'_> {
    /// Closes the open message, if any, into `out`.
    fn close_into(&mut self, out: &mut Vec<MessageRecord>) {
        if let ParseState::MessageOpen(open) = mem::replace(self, ParseState::NoMessageOpen) {
            out.push(open.finish());
        }
    }
}

/// Parses every line of `content` with a known layout.
///
/// Content without a single header line yields an empty vector. A header
/// whose date does not parse under `layout` aborts with
/// [`ShelfError::DateParse`].
pub fn parse_with_layout(content: &str, layout: DateLayout) -> Result<Vec<MessageRecord>> {
    let content = strip_bom(content);
    let mut messages = Vec::new();
    let mut state = ParseState::NoMessageOpen;

    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        match HeaderLine::parse(line) {
            Some(header) => {
                state.close_into(&mut messages);
                let timestamp = header
                    .timestamp(layout)
                    .ok_or_else(|| ShelfError::date_parse(index + 1, line))?;
                state = ParseState::MessageOpen(OpenMessage::start(timestamp, &header));
            }
            None => match &mut state {
                ParseState::MessageOpen(open) => open.lines.push(line),
                // Preamble before the first header
                ParseState::NoMessageOpen => {}
            },
        }
    }
    state.close_into(&mut messages);

    Ok(messages)
}
