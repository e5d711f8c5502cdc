//! Browser sessions over WebDriver
//!
//! A [`WebDriverSession`] wraps one `thirtyfour` browser session and exposes
//! it through the [`Driver`] trait. Elements found through the session are
//! kept in a handle table so page objects only ever see [`ElementHandle`]s.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thirtyfour::error::WebDriverError;
use thirtyfour::prelude::*;
use thirtyfour::Capabilities;
use tracing::{debug, info};

use crate::driver::{Driver, ElementHandle};
use crate::error::{E2eError, E2eResult};
use crate::locator::Selector;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    #[default]
    Chrome,
    Firefox,
}

impl Browser {
    pub fn as_str(&self) -> &'static str {
        match self {
            Browser::Chrome => "chrome",
            Browser::Firefox => "firefox",
        }
    }

    /// Driver executable conventionally serving this browser
    pub fn driver_binary(&self) -> &'static str {
        match self {
            Browser::Chrome => "chromedriver",
            Browser::Firefox => "geckodriver",
        }
    }
}

/// Configuration for a WebDriver session
#[derive(Debug, Clone)]
pub struct WebDriverConfig {
    pub endpoint: String,
    pub browser: Browser,
    pub headless: bool,
    pub window_width: u32,
    pub window_height: u32,
    pub action_timeout: Duration,
}

impl Default for WebDriverConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:9515".to_string(),
            browser: Browser::Chrome,
            headless: true,
            window_width: 1280,
            window_height: 720,
            action_timeout: Duration::from_secs(5),
        }
    }
}

/// Session capabilities: browser name plus window size and headless args
pub fn capabilities(config: &WebDriverConfig) -> Capabilities {
    match config.browser {
        Browser::Chrome => {
            let mut args = vec![format!(
                "--window-size={},{}",
                config.window_width, config.window_height
            )];
            if config.headless {
                args.push("--headless=new".to_string());
            }
            let mut caps: Capabilities = DesiredCapabilities::chrome().into();
            caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
            caps
        }
        Browser::Firefox => {
            let mut args = vec![
                "-width".to_string(),
                config.window_width.to_string(),
                "-height".to_string(),
                config.window_height.to_string(),
            ];
            if config.headless {
                args.push("-headless".to_string());
            }
            let mut caps: Capabilities = DesiredCapabilities::firefox().into();
            caps.insert("moz:firefoxOptions".to_string(), json!({ "args": args }));
            caps
        }
    }
}

/// Map a WebDriver failure onto the suite's error kinds
fn driver_error(target: &str, err: WebDriverError) -> E2eError {
    match err {
        WebDriverError::NoSuchElement(_) | WebDriverError::StaleElementReference(_) => {
            E2eError::ElementNotFound {
                selector: target.to_string(),
            }
        }
        e @ (WebDriverError::ElementClickIntercepted(_)
        | WebDriverError::ElementNotInteractable(_)) => E2eError::NotActionable {
            selector: target.to_string(),
            reason: e.to_string(),
        },
        e @ WebDriverError::Timeout(_) => E2eError::Timeout(format!("{}: {}", target, e)),
        other => E2eError::WebDriver(other),
    }
}

fn by(selector: &Selector) -> By {
    match selector {
        Selector::Css(css) => By::Css(css.as_str()),
        Selector::XPath(xpath) => By::XPath(xpath.as_str()),
    }
}

/// A live browser session
pub struct WebDriverSession {
    driver: WebDriver,
    elements: Mutex<HashMap<String, WebElement>>,
    action_timeout: Duration,
}

impl WebDriverSession {
    /// Start a new browser session on the configured endpoint
    pub async fn connect(config: &WebDriverConfig) -> E2eResult<Self> {
        let driver = WebDriver::new(config.endpoint.as_str(), capabilities(config))
            .await
            .map_err(|e| E2eError::DriverStartup(format!("{}: {}", config.endpoint, e)))?;

        info!("Started {} session on {}", config.browser.as_str(), config.endpoint);

        Ok(Self {
            driver,
            elements: Mutex::new(HashMap::new()),
            action_timeout: config.action_timeout,
        })
    }

    /// End the session and close the browser
    pub async fn close(self) -> E2eResult<()> {
        info!("Closing browser session");
        self.driver.quit().await?;
        Ok(())
    }

    /// Register elements and hand out their handles
    fn register(&self, found: Vec<WebElement>) -> Vec<ElementHandle> {
        let mut elements = self.elements.lock();
        found
            .into_iter()
            .map(|element| {
                let id = element.element_id().to_string();
                elements.insert(id.clone(), element);
                ElementHandle::new(id)
            })
            .collect()
    }

    fn element(&self, handle: &ElementHandle) -> E2eResult<WebElement> {
        self.elements
            .lock()
            .get(handle.id())
            .cloned()
            .ok_or_else(|| E2eError::ElementNotFound {
                selector: handle.id().to_string(),
            })
    }
}

#[async_trait]
impl Driver for WebDriverSession {
    async fn goto(&self, url: &str) -> E2eResult<()> {
        debug!("goto {}", url);
        self.driver.goto(url).await.map_err(|e| driver_error(url, e))?;
        // References from the previous page are stale after navigation.
        self.elements.lock().clear();
        Ok(())
    }

    async fn find_elements(
        &self,
        selector: &Selector,
        scope: Option<&ElementHandle>,
    ) -> E2eResult<Vec<ElementHandle>> {
        let target = selector.to_string();
        let found = match scope {
            Some(parent) => self.element(parent)?.find_all(by(selector)).await,
            None => self.driver.find_all(by(selector)).await,
        }
        .map_err(|e| driver_error(&target, e))?;
        Ok(self.register(found))
    }

    async fn click(&self, element: &ElementHandle) -> E2eResult<()> {
        self.element(element)?
            .click()
            .await
            .map_err(|e| driver_error(element.id(), e))
    }

    async fn text(&self, element: &ElementHandle) -> E2eResult<String> {
        self.element(element)?
            .text()
            .await
            .map_err(|e| driver_error(element.id(), e))
    }

    async fn property(&self, element: &ElementHandle, name: &str) -> E2eResult<Option<String>> {
        self.element(element)?
            .prop(name)
            .await
            .map_err(|e| driver_error(element.id(), e))
    }

    async fn attribute(&self, element: &ElementHandle, name: &str) -> E2eResult<Option<String>> {
        self.element(element)?
            .attr(name)
            .await
            .map_err(|e| driver_error(element.id(), e))
    }

    async fn clear(&self, element: &ElementHandle) -> E2eResult<()> {
        self.element(element)?
            .clear()
            .await
            .map_err(|e| driver_error(element.id(), e))
    }

    async fn send_keys(&self, element: &ElementHandle, text: &str) -> E2eResult<()> {
        self.element(element)?
            .send_keys(text)
            .await
            .map_err(|e| driver_error(element.id(), e))
    }

    fn action_timeout(&self) -> Duration {
        self.action_timeout
    }
}
