//! Datepicker screen and the calendar search behind it
//!
//! The Nebular calendar shows a single month with a forward chevron. To
//! select "today + N days" the [`CalendarNavigator`]:
//!
//! 1. derives the target date from the clock
//! 2. reads the month/year label and parses it into a [`MonthYear`]
//! 3. pages forward until the label shows the target month, failing fast
//!    when the target is behind the view or the page cap is reached
//! 4. clicks the day cell whose text is exactly the target day
//!
//! The range picker runs that search twice on the same widget. The second
//! search continues from wherever the first left the view; the shared
//! [`CalendarCursor`] records that position explicitly. Whether an end date
//! earlier than the start is meaningful is left undefined: it works only if
//! the end falls in the month still on screen, otherwise the search stops
//! with `TargetBehindView`. The start selection is never rolled back.

use tracing::{debug, info, warn};

use ngx_e2e_common::{
    next_step, CalendarCursor, Clock, DateRange, FormattedDate, MonthYear, PageStep, TargetDate,
};

use crate::driver::Driver;
use crate::error::E2eResult;
use crate::locator::Locator;

use super::{Helper, PageSettings};

/// Month/year label of the visible calendar page
pub const CALENDAR_LABEL: &str = "nb-calendar-view-mode";
/// Forward paging control
pub const CALENDAR_NEXT: &str = "nb-calendar-pageable-navigation [data-name=\"chevron-right\"]";
/// Day cells of the visible month, excluding the greyed days of adjacent months
pub const DAY_CELL: &str = ".day-cell.ng-star-inserted:not(.bounding-month)";

pub const FORM_PICKER: &str = "Form Picker";
pub const RANGE_PICKER: &str = "Range Picker";

/// Forward-only search over an open calendar widget
pub struct CalendarNavigator<'a, D: Driver + ?Sized> {
    driver: &'a D,
    clock: &'a dyn Clock,
    max_pages: u32,
}

impl<'a, D: Driver + ?Sized> CalendarNavigator<'a, D> {
    pub fn new(driver: &'a D, clock: &'a dyn Clock, max_pages: u32) -> Self {
        Self {
            driver,
            clock,
            max_pages,
        }
    }

    async fn read_view(&self) -> E2eResult<MonthYear> {
        let label = self.driver.read_text(&Locator::css(CALENDAR_LABEL)).await?;
        Ok(label.parse::<MonthYear>()?)
    }

    /// Page to `today + offset_days` and click its day cell
    pub async fn select_date(
        &self,
        cursor: &mut CalendarCursor,
        offset_days: i64,
    ) -> E2eResult<FormattedDate> {
        let target = TargetDate::from_offset(self.clock.today(), offset_days)?;
        let wanted = target.month_year();

        let mut view = self.read_view().await?;
        cursor.observe(view);
        debug!("Searching {} from {} (offset {})", wanted, view, offset_days);

        let next = Locator::css(CALENDAR_NEXT);
        let mut pages = 0;
        while next_step(view, wanted, pages, self.max_pages)? == PageStep::Forward {
            self.driver.click_on(&next).await?;
            pages += 1;
            view = self.read_view().await?;
            cursor.advanced(view);
        }

        let day = Locator::css(DAY_CELL).exact_text(target.day_text());
        let cells = self.driver.locate_all(&day).await?;
        if cells.len() > 1 {
            warn!(
                "{} day cells read {:?} on {}, clicking the first",
                cells.len(),
                target.day_text(),
                view
            );
        }
        self.driver.click_when_actionable(&day).await?;
        cursor.selected();

        let formatted = target.formatted();
        debug!("Selected {} after {} page(s)", formatted, pages);
        Ok(formatted)
    }

    /// Select a start and then an end date without resetting the view
    pub async fn select_range(
        &self,
        cursor: &mut CalendarCursor,
        start_offset_days: i64,
        end_offset_days: i64,
    ) -> E2eResult<DateRange> {
        let start = self.select_date(cursor, start_offset_days).await?;
        let end = self.select_date(cursor, end_offset_days).await?;
        Ok(DateRange::new(start, end))
    }
}

pub struct DatepickerPage<'a, D: Driver + ?Sized> {
    base: Helper<'a, D>,
    settings: PageSettings,
}

impl<'a, D: Driver + ?Sized> DatepickerPage<'a, D> {
    pub fn new(driver: &'a D, settings: PageSettings) -> Self {
        Self {
            base: Helper::new(driver),
            settings,
        }
    }

    fn navigator(&self) -> CalendarNavigator<'_, D> {
        CalendarNavigator::new(
            self.base.driver(),
            self.settings.clock.as_ref(),
            self.settings.max_calendar_pages,
        )
    }

    /// Pick `today + offset` in the "Form Picker" and verify the input
    pub async fn select_common_datepicker_date_from_today(
        &self,
        number_of_days_from_today: i64,
    ) -> E2eResult<FormattedDate> {
        let driver = self.base.driver();
        let input = Locator::placeholder(FORM_PICKER);
        driver.click_on(&input).await?;

        let mut cursor = CalendarCursor::new();
        let date = self
            .navigator()
            .select_date(&mut cursor, number_of_days_from_today)
            .await?;

        driver.expect_value(&input, date.as_str()).await?;
        info!("Form picker set to {}", date);
        Ok(date)
    }

    /// Pick a start and end in the "Range Picker" and verify the input
    pub async fn select_datepicker_with_range_from_today(
        &self,
        start_date_from_today: i64,
        end_date_from_today: i64,
    ) -> E2eResult<DateRange> {
        let driver = self.base.driver();
        let input = Locator::placeholder(RANGE_PICKER);
        driver.click_on(&input).await?;

        let mut cursor = CalendarCursor::new();
        let range = self
            .navigator()
            .select_range(&mut cursor, start_date_from_today, end_date_from_today)
            .await?;

        driver.expect_value(&input, &range.to_string()).await?;
        info!(
            "Range picker set to {} ({} page(s))",
            range,
            cursor.pages_advanced()
        );
        Ok(range)
    }
}
