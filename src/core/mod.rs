//! Core processing logic for chatshelf.
//!
//! This module contains:
//! - [`granularity`] - Requested granularity and concrete bucket periods
//! - [`bucket`] - Grouping messages into day, week and month buckets
//! - [`output`] - Markdown rendering and document writing
//! - [`processor`] - Media substitution and the full export pipeline
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use chatshelf::config::ShelfConfig;
//! use chatshelf::core::{Granularity, process_export};
//!
//! let summary = process_export(
//!     Path::new("chat.txt"),
//!     "Family",
//!     Path::new("output"),
//!     Granularity::Auto,
//!     &ShelfConfig::default(),
//! )?;
//! println!("{} files written", summary.written.len());
//! # Ok::<(), chatshelf::ShelfError>(())
//! ```

pub mod bucket;
pub mod granularity;
pub mod output;
pub mod processor;

pub use bucket::{Bucket, bucket_messages, count_buckets, resolve_period};
pub use granularity::{Granularity, Period};
pub use output::{Document, WriteReport, render_documents, write_documents};
pub use processor::{ExportPlan, ExportSummary, plan_export, process_export, replace_media};
