//! Output writers.
//!
//! - [`render_documents`] / [`to_markdown`] - render buckets as Markdown strings
//! - [`write_documents`] - write rendered documents into a folder
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use chatshelf::core::Period;
//! use chatshelf::core::output::{render_documents, write_documents};
//! use chatshelf::parsers::WhatsAppParser;
//!
//! let messages = WhatsAppParser::new().parse_str("25/12/23, 14:30 - Alice: Hi")?;
//! let docs = render_documents(&messages, Period::Day, "Family");
//!
//! let report = write_documents(&docs, Path::new("output"));
//! println!("{} written, {} failed", report.written.len(), report.failed.len());
//! # Ok::<(), chatshelf::ShelfError>(())
//! ```

mod markdown;

pub use markdown::{
    Document, WriteReport, render_document, render_documents, to_markdown, write_documents,
};
