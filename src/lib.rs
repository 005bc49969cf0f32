//! # Chatshelf
//!
//! A Rust library for turning a WhatsApp chat export into a shelf of
//! time-bucketed Markdown documents, sized for document tools that cap the
//! number of files per corpus (NotebookLM and friends).
//!
//! ## Overview
//!
//! The pipeline has three stages:
//! - **Format detection** - infers whether dates are day-first or
//!   month-first, two- or four-digit year, from the first lines of the file
//! - **Line parsing** - folds header and continuation lines into
//!   [`MessageRecord`]s
//! - **Time bucketing** - groups messages by day, week or month (or picks the
//!   finest that stays under the file limit) and renders one Markdown file
//!   per bucket
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use chatshelf::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let summary = process_export(
//!         Path::new("WhatsApp Chat with Family.txt"),
//!         "Family",
//!         Path::new("output"),
//!         Granularity::Auto,
//!         &ShelfConfig::default(),
//!     )?;
//!
//!     println!("{} messages -> {} files ({})", summary.message_count, summary.written.len(), summary.period);
//!     Ok(())
//! }
//! ```
//!
//! ## Working in Memory
//!
//! ```rust
//! use chatshelf::prelude::*;
//!
//! let export = "\
//! 03/04/23, 10:00 - Alice: is this April or March?
//! 25/12/23, 11:00 - Bob: day-first, this line settles it";
//!
//! let messages = WhatsAppParser::new().parse_str(export)?;
//! let docs = render_documents(&messages, Period::Month, "Family");
//!
//! assert_eq!(docs[0].file_name, "2023-04-01_to_2023-04-03.md");
//! # Ok::<(), ShelfError>(())
//! ```
//!
//! ## Module Structure
//!
//! - [`parsing`] - header grammar, [`DateLayout`](parsing::DateLayout), layout detection
//! - [`parsers`] - [`WhatsAppParser`](parsers::WhatsAppParser)
//! - [`core`] - bucketing, Markdown output, the export pipeline
//! - [`config`] - [`ShelfConfig`](config::ShelfConfig)
//! - [`message`] - [`MessageRecord`]
//! - [`error`] - [`ShelfError`], [`Result`]
//! - `cli` - CLI argument types (feature `cli`)
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod message;
pub mod parsers;
pub mod parsing;

// Re-export the main types at the crate root for convenience
pub use error::{Result, ShelfError};
pub use message::MessageRecord;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatshelf::prelude::*;
/// ```
pub mod prelude {
    pub use crate::MessageRecord;

    pub use crate::error::{Result, ShelfError};

    pub use crate::config::ShelfConfig;

    pub use crate::parsing::{Confidence, DateLayout, Detection, detect_layout};

    pub use crate::parsers::WhatsAppParser;

    pub use crate::core::{
        Bucket, Document, ExportSummary, Granularity, Period, bucket_messages, process_export,
        render_documents, replace_media, resolve_period,
    };
}
