//! Chat export parsers.
//!
//! - [`WhatsAppParser`] - Parses WhatsApp TXT exports into [`MessageRecord`]s
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use chatshelf::parsers::WhatsAppParser;
//!
//! let parsed = WhatsAppParser::new().parse(Path::new("chat.txt"))?;
//! println!("{} messages, dates read as {}", parsed.messages.len(), parsed.detection.layout);
//! # Ok::<(), chatshelf::ShelfError>(())
//! ```
//!
//! [`MessageRecord`]: crate::MessageRecord

mod whatsapp;

pub use whatsapp::{ParsedExport, WhatsAppParser, parse_with_layout, read_export};
