//! Error types for E2E testing

use thiserror::Error;

#[derive(Error, Debug)]
pub enum E2eError {
    #[error("WebDriver server failed to start: {0}")]
    DriverStartup(String),

    #[error("WebDriver health check failed after {0} attempts")]
    DriverHealthCheck(usize),

    #[error("Element not found: {selector}")]
    ElementNotFound { selector: String },

    #[error("Element not actionable: {selector} - {reason}")]
    NotActionable { selector: String, reason: String },

    #[error("WebDriver error: {0}")]
    WebDriver(#[from] thirtyfour::error::WebDriverError),

    #[error("Timeout waiting for: {0}")]
    Timeout(String),

    #[error("Assertion failed on {selector}: expected {expected:?}, got {actual:?}")]
    AssertionFailed {
        selector: String,
        expected: String,
        actual: String,
    },

    #[error("Test spec parse error: {0}")]
    SpecParse(String),

    #[error("Step failed: {step} - {reason}")]
    StepFailed { step: String, reason: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Calendar error: {0}")]
    Calendar(#[from] ngx_e2e_common::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type E2eResult<T> = Result<T, E2eError>;
