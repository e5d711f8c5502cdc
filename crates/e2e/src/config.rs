//! Suite configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use ngx_e2e_common::DEFAULT_MAX_PAGES;

use crate::error::{E2eError, E2eResult};
use crate::server::DriverServerConfig;
use crate::webdriver::{Browser, WebDriverConfig};

/// Suite configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Application under test, opened before every spec
    pub base_url: String,

    /// WebDriver endpoint to create sessions on
    pub webdriver_url: String,

    /// Driver binary to spawn; when unset an already running driver is used
    pub driver_binary: Option<PathBuf>,

    pub browser: Browser,

    pub headless: bool,

    pub window_width: u32,

    pub window_height: u32,

    /// Per-action auto-wait window in milliseconds
    pub action_timeout_ms: u64,

    /// Directory of YAML specs
    pub specs_dir: PathBuf,

    /// Output directory for results
    pub output_dir: PathBuf,

    /// Calendar configuration
    pub calendar: CalendarConfig,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4200/".to_string(),
            webdriver_url: "http://127.0.0.1:9515".to_string(),
            driver_binary: None,
            browser: Browser::Chrome,
            headless: true,
            window_width: 1280,
            window_height: 720,
            action_timeout_ms: 5000,
            specs_dir: PathBuf::from("crates/e2e/specs"),
            output_dir: PathBuf::from("test-results"),
            calendar: CalendarConfig::default(),
        }
    }
}

/// Date-picker search limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// Forward pages a single date search may issue before giving up
    pub max_pages: u32,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

impl SuiteConfig {
    /// Load configuration from file, defaults when it does not exist
    pub fn load(path: &Path) -> E2eResult<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> E2eResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| E2eError::Config(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Override fields from `NGX_E2E_*` environment variables
    pub fn apply_env(&mut self) -> E2eResult<()> {
        self.apply_vars(|name| std::env::var(name).ok())
    }

    fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) -> E2eResult<()> {
        if let Some(url) = var("NGX_E2E_BASE_URL") {
            self.base_url = url;
        }
        if let Some(url) = var("NGX_E2E_WEBDRIVER_URL") {
            self.webdriver_url = url;
        }
        if let Some(browser) = var("NGX_E2E_BROWSER") {
            self.browser = match browser.to_ascii_lowercase().as_str() {
                "chrome" => Browser::Chrome,
                "firefox" => Browser::Firefox,
                other => {
                    return Err(E2eError::Config(format!("unknown browser: {}", other)));
                }
            };
        }
        if let Some(headless) = var("NGX_E2E_HEADLESS") {
            self.headless = match headless.as_str() {
                "1" | "true" => true,
                "0" | "false" => false,
                other => {
                    return Err(E2eError::Config(format!("NGX_E2E_HEADLESS: {}", other)));
                }
            };
        }
        self.validate()
    }

    pub fn validate(&self) -> E2eResult<()> {
        if self.calendar.max_pages == 0 {
            return Err(E2eError::Config("calendar.max_pages must be at least 1".into()));
        }
        if self.action_timeout_ms == 0 {
            return Err(E2eError::Config("action_timeout_ms must be positive".into()));
        }
        Ok(())
    }

    pub fn action_timeout(&self) -> Duration {
        Duration::from_millis(self.action_timeout_ms)
    }

    pub fn webdriver(&self) -> WebDriverConfig {
        WebDriverConfig {
            endpoint: self.webdriver_url.clone(),
            browser: self.browser,
            headless: self.headless,
            window_width: self.window_width,
            window_height: self.window_height,
            action_timeout: self.action_timeout(),
        }
    }

    /// Server config when the suite should spawn its own driver
    pub fn driver_server(&self) -> Option<DriverServerConfig> {
        self.driver_binary.as_ref().map(|binary| DriverServerConfig {
            binary_path: binary.clone(),
            ..DriverServerConfig::for_browser(self.browser)
        })
    }
}
