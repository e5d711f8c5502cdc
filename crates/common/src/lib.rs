//! ngx-e2e Common Library
//!
//! Calendar model shared by the page objects and the scenario runner:
//! target dates, parsed calendar labels, formatted picker values and the
//! forward-only paging decision.

pub mod calendar;
pub mod clock;
pub mod error;

// Re-export commonly used types
pub use calendar::{
    next_step, CalendarCursor, DateRange, FormattedDate, MonthYear, PageStep, TargetDate,
    DEFAULT_MAX_PAGES,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{Error, Result};

/// ngx-e2e version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
