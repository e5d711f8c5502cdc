//! Sidebar menu navigation

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::driver::Driver;
use crate::error::E2eResult;
use crate::locator::Locator;

use super::Helper;

pub const FORMS_GROUP: &str = "Forms";
pub const TABLES_GROUP: &str = "Tables & Data";
pub const OVERLAYS_GROUP: &str = "Modal & Overlays";

/// Screens reachable from the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppPage {
    FormLayouts,
    Datepicker,
    SmartTable,
    Toastr,
    Tooltip,
}

impl AppPage {
    /// Menu item title of the page
    pub fn title(&self) -> &'static str {
        match self {
            AppPage::FormLayouts => "Form Layouts",
            AppPage::Datepicker => "Datepicker",
            AppPage::SmartTable => "Smart Table",
            AppPage::Toastr => "Toastr",
            AppPage::Tooltip => "Tooltip",
        }
    }

    /// Menu group the item lives in
    pub fn group(&self) -> &'static str {
        match self {
            AppPage::FormLayouts | AppPage::Datepicker => FORMS_GROUP,
            AppPage::SmartTable => TABLES_GROUP,
            AppPage::Toastr | AppPage::Tooltip => OVERLAYS_GROUP,
        }
    }
}

pub struct NavigationPage<'a, D: Driver + ?Sized> {
    base: Helper<'a, D>,
    form_layouts_menu_item: Locator,
    datepicker_menu_item: Locator,
    smart_table_menu_item: Locator,
    toastr_menu_item: Locator,
    tooltip_menu_item: Locator,
}

impl<'a, D: Driver + ?Sized> NavigationPage<'a, D> {
    pub fn new(driver: &'a D) -> Self {
        Self {
            base: Helper::new(driver),
            form_layouts_menu_item: Locator::title(AppPage::FormLayouts.title()),
            datepicker_menu_item: Locator::title(AppPage::Datepicker.title()),
            smart_table_menu_item: Locator::title(AppPage::SmartTable.title()),
            toastr_menu_item: Locator::title(AppPage::Toastr.title()),
            tooltip_menu_item: Locator::title(AppPage::Tooltip.title()),
        }
    }

    pub async fn form_layouts_page(&self) -> E2eResult<()> {
        self.select_group_menu_item(FORMS_GROUP).await?;
        self.base.driver().click_on(&self.form_layouts_menu_item).await?;
        // The form cards animate in after the route change.
        self.base.wait_for_number_of_seconds(2).await;
        Ok(())
    }

    pub async fn datepicker_page(&self) -> E2eResult<()> {
        self.select_group_menu_item(FORMS_GROUP).await?;
        self.base.driver().click_on(&self.datepicker_menu_item).await
    }

    pub async fn smart_table_page(&self) -> E2eResult<()> {
        self.select_group_menu_item(TABLES_GROUP).await?;
        self.base.driver().click_on(&self.smart_table_menu_item).await
    }

    pub async fn toastr_page(&self) -> E2eResult<()> {
        self.select_group_menu_item(OVERLAYS_GROUP).await?;
        self.base.driver().click_on(&self.toastr_menu_item).await
    }

    pub async fn tooltip_page(&self) -> E2eResult<()> {
        self.select_group_menu_item(OVERLAYS_GROUP).await?;
        self.base.driver().click_on(&self.tooltip_menu_item).await
    }

    /// Navigate to `page` through its menu group
    pub async fn open(&self, page: AppPage) -> E2eResult<()> {
        match page {
            AppPage::FormLayouts => self.form_layouts_page().await,
            AppPage::Datepicker => self.datepicker_page().await,
            AppPage::SmartTable => self.smart_table_page().await,
            AppPage::Toastr => self.toastr_page().await,
            AppPage::Tooltip => self.tooltip_page().await,
        }
    }

    /// Expand a menu group unless it is already open.
    ///
    /// Clicking an expanded group collapses it, so the state is read first.
    async fn select_group_menu_item(&self, group_title: &str) -> E2eResult<()> {
        let driver = self.base.driver();
        let locator = Locator::title(group_title);
        let group = driver.locate(&locator).await?;
        let expanded = driver.attribute(&group, "aria-expanded").await?;
        debug!("Menu group {:?} aria-expanded={:?}", group_title, expanded);

        if expanded.as_deref() == Some("false") {
            driver.click_when_actionable(&locator).await?;
        }
        Ok(())
    }
}
