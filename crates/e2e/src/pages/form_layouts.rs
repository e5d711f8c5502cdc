//! Form Layouts screen

use tracing::debug;

use crate::driver::Driver;
use crate::error::E2eResult;
use crate::locator::Locator;

use super::Helper;

pub const GRID_FORM_CARD: &str = "Using the Grid";
pub const INLINE_FORM_CARD: &str = "Inline form";
pub const SUBMIT_BUTTON: &str = "button[type=\"submit\"]";

/// `nb-card` whose text contains `title`
fn card(title: &str) -> Locator {
    Locator::css("nb-card").has_text(title)
}

pub struct FormLayoutsPage<'a, D: Driver + ?Sized> {
    base: Helper<'a, D>,
}

impl<'a, D: Driver + ?Sized> FormLayoutsPage<'a, D> {
    pub fn new(driver: &'a D) -> Self {
        Self {
            base: Helper::new(driver),
        }
    }

    /// Fill and submit the "Using the Grid" form.
    ///
    /// `option_text` is the visible label of the radio button, e.g. "Option 1".
    pub async fn submit_using_the_grid_form_with_credentials_and_select_option(
        &self,
        email: &str,
        password: &str,
        option_text: &str,
    ) -> E2eResult<()> {
        let driver = self.base.driver();
        let form = card(GRID_FORM_CARD);
        debug!("Submitting grid form as {}", email);

        driver.fill(&Locator::placeholder("Email").within(form.clone()), email).await?;
        driver.fill(&Locator::placeholder("Password").within(form.clone()), password).await?;
        driver
            .click_on(&Locator::css("nb-radio").exact_text(option_text).within(form.clone()))
            .await?;
        driver.click_on(&Locator::css(SUBMIT_BUTTON).within(form)).await
    }

    /// Fill and submit the "Inline form", leaving "Remember me" as `remember_me`
    pub async fn submit_inline_form_with_name_email_and_checkbox(
        &self,
        name: &str,
        email: &str,
        remember_me: bool,
    ) -> E2eResult<()> {
        let driver = self.base.driver();
        let form = card(INLINE_FORM_CARD);
        debug!("Submitting inline form as {} <{}>", name, email);

        driver.fill(&Locator::placeholder("Jane Doe").within(form.clone()), name).await?;
        driver.fill(&Locator::placeholder("Email").within(form.clone()), email).await?;

        // The input itself is visually hidden; its nb-checkbox host takes the click.
        let input = driver
            .locate(&Locator::css("nb-checkbox input[type=\"checkbox\"]").within(form.clone()))
            .await?;
        let checked = driver.property(&input, "checked").await?.as_deref() == Some("true");
        if checked != remember_me {
            driver.click_on(&Locator::css("nb-checkbox").within(form.clone())).await?;
        }

        driver.click_on(&Locator::css(SUBMIT_BUTTON).within(form)).await
    }
}
