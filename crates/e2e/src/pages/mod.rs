//! Page objects for the ngx-admin sample application
//!
//! Tests never touch selectors directly. They go through a [`PageManager`],
//! which hands out one page object per screen:
//!
//! ```ignore
//! let pm = PageManager::new(&session);
//! pm.navigate_to().datepicker_page().await?;
//! let range = pm.on_datepicker_page().select_datepicker_with_range_from_today(6, 15).await?;
//! ```

pub mod datepicker;
pub mod form_layouts;
pub mod helper;
pub mod navigation;

use std::sync::Arc;

use ngx_e2e_common::{Clock, SystemClock, DEFAULT_MAX_PAGES};

use crate::driver::Driver;

pub use datepicker::{CalendarNavigator, DatepickerPage};
pub use form_layouts::FormLayoutsPage;
pub use helper::Helper;
pub use navigation::{AppPage, NavigationPage};

/// Settings shared by all page objects of one manager
#[derive(Clone)]
pub struct PageSettings {
    /// Source of "today" for date offsets
    pub clock: Arc<dyn Clock>,
    /// Forward page cap for one calendar search
    pub max_calendar_pages: u32,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            clock: Arc::new(SystemClock),
            max_calendar_pages: DEFAULT_MAX_PAGES,
        }
    }
}

/// Entry point to the page objects for one browser page
pub struct PageManager<'a, D: Driver + ?Sized> {
    driver: &'a D,
    settings: PageSettings,
}

impl<'a, D: Driver + ?Sized> PageManager<'a, D> {
    pub fn new(driver: &'a D) -> Self {
        Self::with_settings(driver, PageSettings::default())
    }

    pub fn with_settings(driver: &'a D, settings: PageSettings) -> Self {
        Self { driver, settings }
    }

    pub fn driver(&self) -> &'a D {
        self.driver
    }

    pub fn navigate_to(&self) -> NavigationPage<'a, D> {
        NavigationPage::new(self.driver)
    }

    pub fn on_form_layouts_page(&self) -> FormLayoutsPage<'a, D> {
        FormLayoutsPage::new(self.driver)
    }

    pub fn on_datepicker_page(&self) -> DatepickerPage<'a, D> {
        DatepickerPage::new(self.driver, self.settings.clone())
    }
}
