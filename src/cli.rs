//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`TimeGroup`] - Time grouping options
//!
//! [`Args::config`] turns the parsed flags into a [`ShelfConfig`], so the
//! binary stays a thin layer over [`process_export`](crate::core::process_export).

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_MAX_FILES, DEFAULT_SCAN_BUDGET, ShelfConfig};
use crate::core::Granularity;
use crate::parsing::DateLayout;

/// Split a WhatsApp chat export into time-bucketed Markdown files
/// for NotebookLM-style document tools.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatshelf")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatshelf chat.txt \"Family\"
    chatshelf chat.txt \"Family\" -o family_md -t week
    chatshelf chat.txt \"Team\" --max-files 300
    chatshelf chat.txt \"Old phone\" --layout mm/dd/yy")]
pub struct Args {
    /// Path to the WhatsApp export file (.txt)
    pub input: PathBuf,

    /// Name of the conversation, used in Markdown titles
    pub conversation_name: String,

    /// Folder the Markdown files are written to
    #[arg(short, long, default_value = "output")]
    pub output_folder: PathBuf,

    /// Time period to group messages by
    #[arg(short = 't', long, value_enum, ignore_case = true, default_value = "auto")]
    pub time_group: TimeGroup,

    /// File limit used by AUTO grouping
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_FILES)]
    pub max_files: usize,

    /// Lines examined when detecting the date layout
    #[arg(long, value_name = "LINES", default_value_t = DEFAULT_SCAN_BUDGET)]
    pub scan_budget: usize,

    /// Date layout to use instead of detecting it (dd/mm/yy, mm/dd/yy, dd/mm/yyyy, mm/dd/yyyy)
    #[arg(long, value_name = "LAYOUT")]
    pub layout: Option<DateLayout>,
}

impl Args {
    /// Builds the pipeline configuration from the parsed flags.
    pub fn config(&self) -> ShelfConfig {
        let config = ShelfConfig::new()
            .with_max_files(self.max_files)
            .with_scan_budget(self.scan_budget);
        match self.layout {
            Some(layout) => config.with_layout(layout),
            None => config,
        }
    }
}

/// Time grouping options.
///
/// - [`Day`](TimeGroup::Day) - one file per day
/// - [`Week`](TimeGroup::Week) - one file per Monday-started week
/// - [`Month`](TimeGroup::Month) - one file per calendar month
/// - [`Auto`](TimeGroup::Auto) - finest of the above that fits the file limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeGroup {
    /// One file per day
    Day,

    /// One file per week
    Week,

    /// One file per month
    Month,

    /// Pick automatically (default)
    #[default]
    Auto,
}

impl std::fmt::Display for TimeGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&Granularity::from(*self), f)
    }
}

// Conversion to library granularity type
impl From<TimeGroup> for Granularity {
    fn from(group: TimeGroup) -> Granularity {
        match group {
            TimeGroup::Day => Granularity::Day,
            TimeGroup::Week => Granularity::Week,
            TimeGroup::Month => Granularity::Month,
            TimeGroup::Auto => Granularity::Auto,
        }
    }
}
