//! Calendar model for paged date-picker navigation
//!
//! The date picker shows one month at a time and can only page forward.
//! Selecting a date therefore is a bounded forward search:
//! - compute the [`TargetDate`] from today plus an offset
//! - parse the visible label into a [`MonthYear`]
//! - page forward until the view equals the target month ([`next_step`])
//! - pick the day cell whose text is the target day number
//!
//! A [`CalendarCursor`] carries the view position from one search into the
//! next, which is how a range picker selects its end date without resetting.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Month, NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Default cap on forward pages per search (three years of months)
pub const DEFAULT_MAX_PAGES: u32 = 36;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A calendar page: one month of one year
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawMonthYear")]
pub struct MonthYear {
    // Field order matters for the derived ordering.
    year: i32,
    month: u32,
}

/// Unchecked wire form of [`MonthYear`]
#[derive(Deserialize)]
struct RawMonthYear {
    year: i32,
    month: u32,
}

impl TryFrom<RawMonthYear> for MonthYear {
    type Error = Error;

    fn try_from(raw: RawMonthYear) -> Result<Self> {
        MonthYear::new(raw.year, raw.month).ok_or(Error::InvalidMonth {
            year: raw.year,
            month: raw.month,
        })
    }
}

impl MonthYear {
    /// Create a month/year, `month` is 1-based
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Full English month name, e.g. "September"
    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }

    /// The page after this one
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Signed number of pages from `self` to `other`
    pub fn months_until(&self, other: &MonthYear) -> i64 {
        (other.year as i64 - self.year as i64) * 12 + (other.month as i64 - self.month as i64)
    }

    /// Number of days in this month
    pub fn days(&self) -> u32 {
        let first = NaiveDate::from_ymd_opt(self.year, self.month, 1);
        let next = self.next();
        let next_first = NaiveDate::from_ymd_opt(next.year, next.month, 1);
        match (first, next_first) {
            (Some(a), Some(b)) => (b - a).num_days() as u32,
            _ => 0,
        }
    }
}

impl fmt::Display for MonthYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month_name(), self.year)
    }
}

impl FromStr for MonthYear {
    type Err = Error;

    /// Parse a calendar view label such as `" September 2024 "`.
    ///
    /// Padding is ignored and the month name must be a whole word.
    fn from_str(label: &str) -> Result<Self> {
        let err = || Error::LabelParse(label.to_string());

        let mut words = label.split_whitespace();
        let (Some(month), Some(year), None) = (words.next(), words.next(), words.next()) else {
            return Err(err());
        };

        let month = Month::from_str(month).map_err(|_| err())?;
        let year: i32 = year.parse().map_err(|_| err())?;

        Ok(Self {
            year,
            month: month.number_from_month(),
        })
    }
}

/// Date derived from today plus a day offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetDate {
    date: NaiveDate,
}

impl TargetDate {
    pub fn from_offset(today: NaiveDate, offset_days: i64) -> Result<Self> {
        TimeDelta::try_days(offset_days)
            .and_then(|delta| today.checked_add_signed(delta))
            .map(|date| Self { date })
            .ok_or(Error::DateOutOfRange {
                offset: offset_days,
                from: today,
            })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    /// Day number as the day cell renders it, no padding
    pub fn day_text(&self) -> String {
        self.date.day().to_string()
    }

    pub fn month_year(&self) -> MonthYear {
        MonthYear::of(self.date)
    }

    /// Short English month name, e.g. "Sep"
    pub fn month_short(&self) -> String {
        self.date.format("%b").to_string()
    }

    /// Long English month name, e.g. "September"
    pub fn month_long(&self) -> &'static str {
        self.month_year().month_name()
    }

    pub fn formatted(&self) -> FormattedDate {
        FormattedDate::from(self.date)
    }
}

/// Date as the picker input renders it: `"Sep 3, 2024"`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormattedDate(String);

impl FormattedDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<NaiveDate> for FormattedDate {
    fn from(date: NaiveDate) -> Self {
        Self(date.format("%b %-d, %Y").to_string())
    }
}

impl fmt::Display for FormattedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for FormattedDate {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for FormattedDate {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Range picker value: `"{start} - {end}"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: FormattedDate,
    pub end: FormattedDate,
}

impl DateRange {
    pub fn new(start: FormattedDate, end: FormattedDate) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

/// Decision for one iteration of the forward search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStep {
    /// The view shows the target month
    Arrived,
    /// Page forward once more
    Forward,
}

/// Decide whether to stop, page forward, or give up.
///
/// `pages` is the number of forward pages already issued by the current
/// search; the search fails once it reaches `max_pages` without arriving.
pub fn next_step(view: MonthYear, target: MonthYear, pages: u32, max_pages: u32) -> Result<PageStep> {
    if view == target {
        return Ok(PageStep::Arrived);
    }
    if view > target {
        return Err(Error::TargetBehindView { target, view });
    }
    if pages >= max_pages {
        return Err(Error::TargetUnreachable {
            target,
            view,
            pages,
        });
    }
    Ok(PageStep::Forward)
}

/// Position of the calendar view shared across consecutive searches
#[derive(Debug, Clone, Default)]
pub struct CalendarCursor {
    view: Option<MonthYear>,
    pages_advanced: u32,
    selections: u32,
}

impl CalendarCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last observed view, if any search ran yet
    pub fn view(&self) -> Option<MonthYear> {
        self.view
    }

    /// Total forward pages issued through this cursor
    pub fn pages_advanced(&self) -> u32 {
        self.pages_advanced
    }

    /// Number of day cells selected through this cursor
    pub fn selections(&self) -> u32 {
        self.selections
    }

    /// Record the view read from the widget
    pub fn observe(&mut self, view: MonthYear) {
        if let Some(previous) = self.view {
            if previous != view {
                debug!("Calendar view moved outside the cursor: {} -> {}", previous, view);
            }
        }
        self.view = Some(view);
    }

    /// Record one forward page and the view it produced
    pub fn advanced(&mut self, view: MonthYear) {
        self.pages_advanced += 1;
        self.view = Some(view);
    }

    /// Record a day selection
    pub fn selected(&mut self) {
        self.selections += 1;
    }
}
