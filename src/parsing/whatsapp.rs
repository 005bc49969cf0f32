//! WhatsApp header-line grammar and date layouts.
//!
//! A message starts with a header line of the form
//!
//! ```text
//! 25/12/23, 14:30 - Alice: Merry Christmas!
//! ```
//!
//! The numeric date is ambiguous: `03/04/23` is the 3rd of April day-first
//! and the 4th of March month-first. [`DateLayout`] enumerates the readings
//! the parser knows; the detector picks one per export.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Structural header pattern: `DATE, TIME - SENDER: CONTENT`.
pub const HEADER_PATTERN: &str =
    r"^(?P<date>\d{1,2}/\d{1,2}/\d{2,4}), (?P<time>\d{1,2}:\d{2}) - (?P<sender>[^:]+): (?P<content>.*)";

static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(HEADER_PATTERN).expect("header pattern is a valid regex"));

/// Candidate date layouts, in detection priority order.
///
/// Day-first layouts come before month-first ones, so an export that stays
/// ambiguous for the whole scan budget is read day-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateLayout {
    /// `DD/MM/YY`, e.g. `25/12/23`
    DayFirstShortYear,
    /// `MM/DD/YY`, e.g. `12/25/23`
    MonthFirstShortYear,
    /// `DD/MM/YYYY`, e.g. `25/12/2023`
    DayFirstLongYear,
    /// `MM/DD/YYYY`, e.g. `12/25/2023`
    MonthFirstLongYear,
}

impl DateLayout {
    /// Returns all layouts in priority order.
    pub fn all() -> &'static [DateLayout] {
        &[
            DateLayout::DayFirstShortYear,
            DateLayout::MonthFirstShortYear,
            DateLayout::DayFirstLongYear,
            DateLayout::MonthFirstLongYear,
        ]
    }

    /// Returns the chrono pattern for a `"<date> <time>"` string.
    pub fn pattern(self) -> &'static str {
        match self {
            DateLayout::DayFirstShortYear => "%d/%m/%y %H:%M",
            DateLayout::MonthFirstShortYear => "%m/%d/%y %H:%M",
            DateLayout::DayFirstLongYear => "%d/%m/%Y %H:%M",
            DateLayout::MonthFirstLongYear => "%m/%d/%Y %H:%M",
        }
    }

    /// Returns the chrono pattern for the date component alone.
    pub fn date_pattern(self) -> &'static str {
        match self {
            DateLayout::DayFirstShortYear => "%d/%m/%y",
            DateLayout::MonthFirstShortYear => "%m/%d/%y",
            DateLayout::DayFirstLongYear => "%d/%m/%Y",
            DateLayout::MonthFirstLongYear => "%m/%d/%Y",
        }
    }

    /// Number of digits the year component must have.
    pub fn year_digits(self) -> usize {
        match self {
            DateLayout::DayFirstShortYear | DateLayout::MonthFirstShortYear => 2,
            DateLayout::DayFirstLongYear | DateLayout::MonthFirstLongYear => 4,
        }
    }

    /// Returns `true` for the day-first layouts.
    pub fn is_day_first(self) -> bool {
        matches!(
            self,
            DateLayout::DayFirstShortYear | DateLayout::DayFirstLongYear
        )
    }

    /// Short names accepted by [`FromStr`].
    pub fn all_names() -> &'static [&'static str] {
        &["dd/mm/yy", "mm/dd/yy", "dd/mm/yyyy", "mm/dd/yyyy"]
    }

    /// Parses a header's date and time captures under this layout.
    ///
    /// Two-digit years follow the usual pivot: `00`-`68` map to 20xx and
    /// `69`-`99` to 19xx. The year width is checked strictly, so `23` never
    /// parses as the year 23 AD under a four-digit layout.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatshelf::parsing::DateLayout;
    ///
    /// assert!(DateLayout::DayFirstShortYear.parse("25/12/23", "14:30").is_some());
    /// assert!(DateLayout::MonthFirstShortYear.parse("25/12/23", "14:30").is_none());
    /// ```
    pub fn parse(self, date: &str, time: &str) -> Option<NaiveDateTime> {
        let (day_month, year) = date.rsplit_once('/')?;
        if year.len() != self.year_digits() {
            return None;
        }
        if self.year_digits() == 4 {
            return NaiveDateTime::parse_from_str(&format!("{date} {time}"), self.pattern()).ok();
        }

        // chrono's %y pivots at 70, exports pivot at 69
        let short: u16 = year.parse().ok()?;
        let full = if short < 69 { 2000 + short } else { 1900 + short };
        NaiveDateTime::parse_from_str(
            &format!("{day_month}/{full} {time}"),
            self.long_year().pattern(),
        )
        .ok()
    }

    /// The four-digit layout with the same day/month order.
    fn long_year(self) -> DateLayout {
        if self.is_day_first() {
            DateLayout::DayFirstLongYear
        } else {
            DateLayout::MonthFirstLongYear
        }
    }
}

impl fmt::Display for DateLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateLayout::DayFirstShortYear => write!(f, "DD/MM/YY"),
            DateLayout::MonthFirstShortYear => write!(f, "MM/DD/YY"),
            DateLayout::DayFirstLongYear => write!(f, "DD/MM/YYYY"),
            DateLayout::MonthFirstLongYear => write!(f, "MM/DD/YYYY"),
        }
    }
}

impl FromStr for DateLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dd/mm/yy" | "dmy" => Ok(DateLayout::DayFirstShortYear),
            "mm/dd/yy" | "mdy" => Ok(DateLayout::MonthFirstShortYear),
            "dd/mm/yyyy" | "dmyyyy" => Ok(DateLayout::DayFirstLongYear),
            "mm/dd/yyyy" | "mdyyyy" => Ok(DateLayout::MonthFirstLongYear),
            _ => Err(format!(
                "Unknown date layout: '{}'. Expected one of: {}",
                s,
                DateLayout::all_names().join(", ")
            )),
        }
    }
}

/// The four captures of a header line, borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderLine<'a> {
    /// Raw date, e.g. `25/12/23`
    pub date: &'a str,
    /// Raw time, e.g. `14:30`
    pub time: &'a str,
    /// Everything between ` - ` and the first colon
    pub sender: &'a str,
    /// Remainder of the line after `: `
    pub content: &'a str,
}

impl<'a> HeaderLine<'a> {
    /// Matches `line` against the header pattern.
    pub fn parse(line: &'a str) -> Option<Self> {
        let caps = HEADER_RE.captures(line)?;
        Some(Self {
            date: caps.name("date")?.as_str(),
            time: caps.name("time")?.as_str(),
            sender: caps.name("sender")?.as_str(),
            content: caps.name("content").map_or("", |m| m.as_str()),
        })
    }

    /// Parses the timestamp under `layout`.
    pub fn timestamp(&self, layout: DateLayout) -> Option<NaiveDateTime> {
        layout.parse(self.date, self.time)
    }
}

/// Drops the UTF-8 byte order mark some exports start with.
pub fn strip_bom(content: &str) -> &str {
    content.strip_prefix('\u{feff}').unwrap_or(content)
}

/// Returns `true` if `line` starts a new message.
pub fn is_header_line(line: &str) -> bool {
    HEADER_RE.is_match(line)
}
