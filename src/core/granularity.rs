//! Time-bucket granularity.
//!
//! [`Granularity`] is what a caller asks for; [`Period`] is what a bucket
//! actually spans once `AUTO` has been resolved.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ShelfError;

/// Requested bucket size.
///
/// # Example
///
/// ```rust
/// use chatshelf::core::Granularity;
///
/// let g: Granularity = "week".parse()?;
/// assert_eq!(g, Granularity::Week);
/// assert!("fortnight".parse::<Granularity>().is_err());
/// # Ok::<(), chatshelf::ShelfError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Granularity {
    /// One document per calendar day
    Day,
    /// One document per Monday-started week
    Week,
    /// One document per calendar month
    Month,
    /// Finest of DAY, WEEK, MONTH that stays under the file limit
    #[default]
    Auto,
}

impl Granularity {
    /// Returns all accepted names.
    pub fn all_names() -> &'static [&'static str] {
        &["DAY", "WEEK", "MONTH", "AUTO"]
    }

    /// Returns the fixed period, or `None` for [`Granularity::Auto`].
    pub fn period(self) -> Option<Period> {
        match self {
            Granularity::Day => Some(Period::Day),
            Granularity::Week => Some(Period::Week),
            Granularity::Month => Some(Period::Month),
            Granularity::Auto => None,
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Granularity::Day => write!(f, "DAY"),
            Granularity::Week => write!(f, "WEEK"),
            Granularity::Month => write!(f, "MONTH"),
            Granularity::Auto => write!(f, "AUTO"),
        }
    }
}

impl FromStr for Granularity {
    type Err = ShelfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DAY" => Ok(Granularity::Day),
            "WEEK" => Ok(Granularity::Week),
            "MONTH" => Ok(Granularity::Month),
            "AUTO" => Ok(Granularity::Auto),
            _ => Err(ShelfError::invalid_granularity(s)),
        }
    }
}

impl From<Period> for Granularity {
    fn from(period: Period) -> Self {
        match period {
            Period::Day => Granularity::Day,
            Period::Week => Granularity::Week,
            Period::Month => Granularity::Month,
        }
    }
}

/// Concrete bucket span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Period {
    /// A single calendar day
    Day,
    /// Monday through Sunday
    Week,
    /// First through last day of a month
    Month,
}

impl Period {
    /// Finest first; the order `AUTO` tries them in.
    pub fn all() -> &'static [Period] {
        &[Period::Day, Period::Week, Period::Month]
    }

    /// Returns the first day of the bucket that contains `date`.
    ///
    /// ```rust
    /// use chatshelf::core::Period;
    /// use chrono::NaiveDate;
    ///
    /// let wed = NaiveDate::from_ymd_opt(2023, 1, 4).unwrap();
    /// assert_eq!(Period::Week.start_of(wed), NaiveDate::from_ymd_opt(2023, 1, 2).unwrap());
    /// assert_eq!(Period::Month.start_of(wed), NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
    /// ```
    pub fn start_of(self, date: NaiveDate) -> NaiveDate {
        let back = match self {
            Period::Day => 0,
            Period::Week => date.weekday().num_days_from_monday(),
            Period::Month => date.day0(),
        };
        date - Days::new(u64::from(back))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Granularity::from(*self), f)
    }
}
