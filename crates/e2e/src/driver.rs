//! Browser automation surface used by the page objects
//!
//! Implementors only provide the primitive W3C-style commands. Locator
//! resolution, auto-waiting and value assertions are provided on top of
//! them, so every backend (the WebDriver session, the in-memory app used by
//! the tests) behaves the same way.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::error::{E2eError, E2eResult};
use crate::locator::{Locator, Selector};

/// Interval between polls while waiting for elements or values
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Opaque reference to an element in the current page
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementHandle(String);

impl ElementHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

#[async_trait]
pub trait Driver: Send + Sync {
    /// Navigate the page to `url`
    async fn goto(&self, url: &str) -> E2eResult<()>;

    /// Find all elements matching `selector`, under `scope` when given
    async fn find_elements(
        &self,
        selector: &Selector,
        scope: Option<&ElementHandle>,
    ) -> E2eResult<Vec<ElementHandle>>;

    async fn click(&self, element: &ElementHandle) -> E2eResult<()>;

    /// Rendered text of the element
    async fn text(&self, element: &ElementHandle) -> E2eResult<String>;

    /// DOM property such as `value` or `checked`
    async fn property(&self, element: &ElementHandle, name: &str) -> E2eResult<Option<String>>;

    /// HTML attribute such as `aria-expanded`
    async fn attribute(&self, element: &ElementHandle, name: &str) -> E2eResult<Option<String>>;

    async fn clear(&self, element: &ElementHandle) -> E2eResult<()>;

    async fn send_keys(&self, element: &ElementHandle, text: &str) -> E2eResult<()>;

    /// How long auto-waiting operations keep polling
    fn action_timeout(&self) -> Duration;

    /// Resolve a locator once, without waiting
    async fn query_all(&self, locator: &Locator) -> E2eResult<Vec<ElementHandle>> {
        let scope = match locator.parent() {
            Some(parent) => match self.query_all(parent).await?.into_iter().next() {
                Some(element) => Some(element),
                None => return Ok(Vec::new()),
            },
            None => None,
        };

        let found = self.find_elements(locator.selector(), scope.as_ref()).await?;
        let Some(text_match) = locator.text() else {
            return Ok(found);
        };

        let mut matched = Vec::new();
        for element in found {
            if text_match.matches(&self.text(&element).await?) {
                matched.push(element);
            }
        }
        Ok(matched)
    }

    /// Wait until the locator matches at least one element
    async fn locate_all(&self, locator: &Locator) -> E2eResult<Vec<ElementHandle>> {
        let deadline = Instant::now() + self.action_timeout();
        loop {
            match self.query_all(locator).await {
                Ok(found) if !found.is_empty() => return Ok(found),
                Ok(_) | Err(E2eError::ElementNotFound { .. }) => {}
                Err(e) => return Err(e),
            }

            if Instant::now() >= deadline {
                return Err(E2eError::ElementNotFound {
                    selector: locator.to_string(),
                });
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    /// Wait for the first element matching the locator
    async fn locate(&self, locator: &Locator) -> E2eResult<ElementHandle> {
        let mut found = self.locate_all(locator).await?;
        Ok(found.swap_remove(0))
    }

    async fn read_text(&self, locator: &Locator) -> E2eResult<String> {
        let element = self.locate(locator).await?;
        self.text(&element).await
    }

    async fn click_on(&self, locator: &Locator) -> E2eResult<()> {
        debug!("click {}", locator);
        self.click_when_actionable(locator).await
    }

    /// Click the first match once it exists and accepts the click.
    ///
    /// Intercepted or non-interactable clicks and stale references are
    /// retried with a fresh lookup until the action timeout.
    async fn click_when_actionable(&self, locator: &Locator) -> E2eResult<()> {
        let deadline = Instant::now() + self.action_timeout();
        let mut attempts = 0u32;
        loop {
            attempts += 1;
            let outcome = match self.query_all(locator).await {
                Ok(found) => match found.into_iter().next() {
                    Some(element) => self.click(&element).await,
                    None => Err(E2eError::ElementNotFound {
                        selector: locator.to_string(),
                    }),
                },
                Err(e) => Err(e),
            };

            match outcome {
                Ok(()) => return Ok(()),
                Err(e @ (E2eError::NotActionable { .. } | E2eError::ElementNotFound { .. })) => {
                    if Instant::now() >= deadline {
                        debug!("giving up on {} after {} attempt(s)", locator, attempts);
                        return Err(e);
                    }
                }
                Err(e) => return Err(e),
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    /// Replace the contents of an input
    async fn fill(&self, locator: &Locator, value: &str) -> E2eResult<()> {
        debug!("fill {} <- {:?}", locator, value);
        let element = self.locate(locator).await?;
        self.clear(&element).await?;
        self.send_keys(&element, value).await
    }

    async fn input_value(&self, locator: &Locator) -> E2eResult<String> {
        let element = self.locate(locator).await?;
        Ok(self.property(&element, "value").await?.unwrap_or_default())
    }

    /// Wait until the input's value equals `expected`
    async fn expect_value(&self, locator: &Locator, expected: &str) -> E2eResult<()> {
        let element = self.locate(locator).await?;
        // The value gets its own window once the element exists.
        let deadline = Instant::now() + self.action_timeout();
        loop {
            let actual = self.property(&element, "value").await?.unwrap_or_default();
            if actual == expected {
                return Ok(());
            }

            if Instant::now() >= deadline {
                return Err(E2eError::AssertionFailed {
                    selector: locator.to_string(),
                    expected: expected.to_string(),
                    actual,
                });
            }
            sleep(POLL_INTERVAL).await;
        }
    }
}
