//! Partitioning messages into day, week and month buckets.
//!
//! # Example
//!
//! ```rust
//! use chatshelf::core::{Granularity, Period, bucket_messages, resolve_period};
//! use chatshelf::parsers::WhatsAppParser;
//!
//! let export = "\
//! 02/01/23, 09:00 - Alice: monday
//! 04/01/23, 18:00 - Bob: wednesday
//! 09/01/23, 10:00 - Alice: next monday";
//! let messages = WhatsAppParser::new().parse_str(export)?;
//!
//! let period = resolve_period(&messages, Granularity::Week, 400);
//! let buckets = bucket_messages(&messages, period);
//!
//! assert_eq!(period, Period::Week);
//! assert_eq!(buckets.len(), 2);
//! assert_eq!(buckets[0].len(), 2);
//! # Ok::<(), chatshelf::ShelfError>(())
//! ```

use std::collections::{BTreeMap, BTreeSet};

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info, warn};

use super::granularity::{Granularity, Period};
use crate::message::MessageRecord;

/// Messages falling inside one day, week or month.
///
/// Messages are ordered by timestamp; messages with equal timestamps keep
/// their input order. A bucket is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket<'a> {
    /// Canonical first day of the bucket (the Monday for weeks, the 1st for months)
    pub start: NaiveDate,
    /// Span of the bucket
    pub period: Period,
    /// Messages in ascending timestamp order
    pub messages: Vec<&'a MessageRecord>,
}

impl Bucket<'_> {
    /// Number of messages in the bucket.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always `false` for buckets produced by [`bucket_messages`].
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Earliest message timestamp.
    pub fn first_timestamp(&self) -> Option<NaiveDateTime> {
        self.messages.first().map(|m| m.timestamp)
    }

    /// Latest message timestamp.
    pub fn last_timestamp(&self) -> Option<NaiveDateTime> {
        self.messages.last().map(|m| m.timestamp)
    }

    /// Date of the latest message, or the bucket start if empty.
    pub fn end(&self) -> NaiveDate {
        self.last_timestamp().map_or(self.start, |ts| ts.date())
    }

    /// Output file name: `START.md` for days, `START_to_END.md` otherwise.
    ///
    /// `END` is the date of the last message, not the end of the calendar
    /// span.
    pub fn file_name(&self) -> String {
        match self.period {
            Period::Day => format!("{}.md", self.start.format("%Y-%m-%d")),
            Period::Week | Period::Month => format!(
                "{}_to_{}.md",
                self.start.format("%Y-%m-%d"),
                self.end().format("%Y-%m-%d")
            ),
        }
    }
}

/// Number of non-empty buckets `messages` would produce under `period`.
pub fn count_buckets(messages: &[MessageRecord], period: Period) -> usize {
    messages
        .iter()
        .map(|m| period.start_of(m.date()))
        .collect::<BTreeSet<_>>()
        .len()
}

/// Picks the period to bucket by.
///
/// Explicit granularities are used as given; a warning is logged when they
/// produce more than `max_files` buckets. [`Granularity::Auto`] takes the
/// finest period whose bucket count stays within `max_files`, falling back
/// to [`Period::Month`].
pub fn resolve_period(messages: &[MessageRecord], granularity: Granularity, max_files: usize) -> Period {
    if let Some(period) = granularity.period() {
        let count = count_buckets(messages, period);
        if count > max_files {
            warn!(
                %period,
                files = count,
                max_files,
                "selected time group exceeds the file limit"
            );
        }
        return period;
    }

    for &period in Period::all() {
        let count = count_buckets(messages, period);
        debug!(%period, buckets = count, max_files, "auto granularity candidate");
        if count <= max_files {
            info!(%period, files = count, "auto-selected time group");
            return period;
        }
    }

    let count = count_buckets(messages, Period::Month);
    warn!(
        files = count,
        max_files,
        "monthly grouping still exceeds the file limit, using it anyway"
    );
    Period::Month
}

/// Groups messages into buckets under `period`, ascending by start date.
pub fn bucket_messages(messages: &[MessageRecord], period: Period) -> Vec<Bucket<'_>> {
    let mut groups: BTreeMap<NaiveDate, Vec<&MessageRecord>> = BTreeMap::new();
    for msg in messages {
        groups
            .entry(period.start_of(msg.date()))
            .or_default()
            .push(msg);
    }

    groups
        .into_iter()
        .map(|(start, mut messages)| {
            messages.sort_by_key(|m| m.timestamp);
            Bucket {
                start,
                period,
                messages,
            }
        })
        .collect()
}
