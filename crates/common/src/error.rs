//! Error types for the calendar model

use thiserror::Error;

use crate::calendar::MonthYear;

/// Result type alias using the calendar Error
pub type Result<T> = std::result::Result<T, Error>;

/// Calendar model errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Cannot parse calendar label: {0:?}")]
    LabelParse(String),

    #[error("Invalid month {month} in year {year}")]
    InvalidMonth { year: i32, month: u32 },

    #[error("Date offset out of range: {offset} days from {from}")]
    DateOutOfRange { offset: i64, from: chrono::NaiveDate },

    #[error("Target {target} unreachable: still on {view} after {pages} page(s)")]
    TargetUnreachable {
        target: MonthYear,
        view: MonthYear,
        pages: u32,
    },

    #[error("Target {target} is behind the calendar view {view}; paging only moves forward")]
    TargetBehindView { target: MonthYear, view: MonthYear },
}
