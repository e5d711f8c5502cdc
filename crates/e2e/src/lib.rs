//! ngx-admin E2E Test Framework
//!
//! This crate provides a Rust-controlled E2E suite for the ngx-admin sample
//! application that:
//! - Spawns chromedriver/geckodriver as a subprocess (optional)
//! - Drives the browser over the W3C WebDriver protocol
//! - Wraps every screen in a page object
//! - Parses declarative YAML test specs into page-object steps
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    E2E Test Runner (Rust)                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  TestRunner                                                 │
//! │    ├── start_driver() -> DriverServerHandle                 │
//! │    ├── WebDriverSession::connect() -> impl Driver           │
//! │    └── run_spec_on(driver, spec) -> TestResult              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  PageManager                                                │
//! │    ├── navigate_to()          -> NavigationPage             │
//! │    ├── on_form_layouts_page() -> FormLayoutsPage            │
//! │    └── on_datepicker_page()   -> DatepickerPage             │
//! │                                    └── CalendarNavigator    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  TestSpec (YAML)                                            │
//! │    ├── name, description, tags                              │
//! │    └── steps: [Step]                                        │
//! │          ├── open_page { page }                             │
//! │          ├── submit_grid_form { email, password, option }   │
//! │          ├── submit_inline_form { name, email, remember_me }│
//! │          ├── select_date { offset_days }                    │
//! │          └── select_range { start/end_offset_days }         │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod locator;
pub mod pages;
pub mod runner;
pub mod server;
pub mod spec;
pub mod webdriver;

pub use config::SuiteConfig;
pub use driver::{Driver, ElementHandle};
pub use error::{E2eError, E2eResult};
pub use locator::Locator;
pub use pages::{PageManager, PageSettings};
pub use runner::TestRunner;
pub use spec::{TestSpec, TestStep};
pub use webdriver::WebDriverSession;
