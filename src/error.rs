//! Unified error types for chatshelf.
//!
//! This module provides a single [`ShelfError`] enum that covers every failure
//! the export pipeline can report. Each variant carries enough context (line
//! number, path, file name) to diagnose the problem without re-running.
//!
//! # Fatal vs. isolated errors
//!
//! - Detection and parse failures ([`ShelfError::FormatUndetected`],
//!   [`ShelfError::DateParse`]) abort the whole run.
//! - A failed document write ([`ShelfError::OutputWrite`]) is recorded in the
//!   run summary and the remaining documents are still written.
//!
//! An export that parses fine but yields no messages is not an error; see
//! [`ExportSummary::is_empty`](crate::core::ExportSummary::is_empty).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatshelf operations.
///
/// # Example
///
/// ```rust
/// use chatshelf::error::Result;
/// use chatshelf::MessageRecord;
///
/// fn my_function() -> Result<Vec<MessageRecord>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ShelfError>;

/// The error type for all chatshelf operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ShelfError {
    /// The input export does not exist.
    #[error("Input file not found: {}", path.display())]
    FileNotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// No header line inside the scan budget parsed under any known date layout.
    #[error(
        "Could not detect the chat date format: {header_lines} header line(s) in the first {scanned_lines} line(s), none parseable"
    )]
    FormatUndetected {
        /// Number of lines examined before giving up
        scanned_lines: usize,
        /// Number of those lines that matched the header pattern
        header_lines: usize,
    },

    /// A header line matched structurally but its date/time did not parse
    /// under the detected layout.
    #[error("Could not parse date/time on line {line_number}: '{line}'")]
    DateParse {
        /// 1-based line number in the input
        line_number: usize,
        /// The offending line, verbatim
        line: String,
    },

    /// The requested granularity is not one of `DAY`, `WEEK`, `MONTH`, `AUTO`.
    #[error("Invalid time group '{input}'. Expected one of: DAY, WEEK, MONTH, AUTO")]
    InvalidGranularity {
        /// The rejected selector
        input: String,
    },

    /// A single document could not be written.
    #[error("Could not write {}: {source}", path.display())]
    OutputWrite {
        /// Destination of the failed document
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Any other I/O error (reading the input, creating the output folder).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ShelfError {
    /// Creates a file-not-found error.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        ShelfError::FileNotFound { path: path.into() }
    }

    /// Creates a date parse error for the given 1-based line.
    pub fn date_parse(line_number: usize, line: impl Into<String>) -> Self {
        ShelfError::DateParse {
            line_number,
            line: line.into(),
        }
    }

    /// Creates an invalid granularity error.
    pub fn invalid_granularity(input: impl Into<String>) -> Self {
        ShelfError::InvalidGranularity {
            input: input.into(),
        }
    }

    /// Creates an output write error.
    pub fn output_write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ShelfError::OutputWrite {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if the input file was missing.
    pub fn is_file_not_found(&self) -> bool {
        matches!(self, ShelfError::FileNotFound { .. })
    }

    /// Returns `true` if the date layout could not be detected.
    pub fn is_format_undetected(&self) -> bool {
        matches!(self, ShelfError::FormatUndetected { .. })
    }

    /// Returns `true` if a header line failed to parse.
    pub fn is_date_parse(&self) -> bool {
        matches!(self, ShelfError::DateParse { .. })
    }

    /// Returns `true` if this is an I/O error (including write failures).
    pub fn is_io(&self) -> bool {
        matches!(self, ShelfError::Io(_) | ShelfError::OutputWrite { .. })
    }
}
