//! Main test runner that orchestrates the WebDriver server, sessions and page objects

use std::path::PathBuf;
use std::time::Instant;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::config::SuiteConfig;
use crate::driver::Driver;
use crate::error::{E2eError, E2eResult};
use crate::pages::{PageManager, PageSettings};
use crate::server::DriverServerHandle;
use crate::spec::{TestSpec, TestStep};
use crate::webdriver::WebDriverSession;

/// Result of executing a test step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    pub success: bool,
    pub step_name: String,
    pub duration_ms: u64,
    /// Value the step produced, e.g. the selected date
    pub output: Option<String>,
    pub error: Option<String>,
}

/// Result of running a single test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    pub name: String,
    pub success: bool,
    pub duration_ms: u64,
    pub steps: Vec<StepResult>,
    pub error: Option<String>,
}

/// Result of running all tests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSuiteResult {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub duration_ms: u64,
    pub results: Vec<TestResult>,
}

impl TestSuiteResult {
    fn from_results(results: Vec<TestResult>, duration_ms: u64) -> Self {
        let passed = results.iter().filter(|r| r.success).count();
        Self {
            total: results.len(),
            passed,
            failed: results.len() - passed,
            skipped: 0,
            duration_ms,
            results,
        }
    }
}

/// Execute one step through the page objects
pub async fn execute_step<D: Driver + ?Sized>(
    pm: &PageManager<'_, D>,
    step: &TestStep,
) -> E2eResult<Option<String>> {
    match step {
        TestStep::OpenPage { page } => {
            pm.navigate_to().open(*page).await?;
            Ok(None)
        }
        TestStep::SubmitGridForm {
            email,
            password,
            option,
        } => {
            pm.on_form_layouts_page()
                .submit_using_the_grid_form_with_credentials_and_select_option(
                    email, password, option,
                )
                .await?;
            Ok(None)
        }
        TestStep::SubmitInlineForm {
            name,
            email,
            remember_me,
        } => {
            pm.on_form_layouts_page()
                .submit_inline_form_with_name_email_and_checkbox(name, email, *remember_me)
                .await?;
            Ok(None)
        }
        TestStep::SelectDate { offset_days } => {
            let date = pm
                .on_datepicker_page()
                .select_common_datepicker_date_from_today(*offset_days)
                .await?;
            Ok(Some(date.to_string()))
        }
        TestStep::SelectRange {
            start_offset_days,
            end_offset_days,
        } => {
            let range = pm
                .on_datepicker_page()
                .select_datepicker_with_range_from_today(*start_offset_days, *end_offset_days)
                .await?;
            Ok(Some(range.to_string()))
        }
        TestStep::Wait { seconds } => {
            tokio::time::sleep(std::time::Duration::from_secs(*seconds)).await;
            Ok(None)
        }
        TestStep::Log { message } => {
            info!("[TEST LOG] {}", message);
            Ok(None)
        }
    }
}

/// Run one spec on an already open page: load the app, then each step in order
pub async fn run_spec_on<D: Driver + ?Sized>(
    driver: &D,
    base_url: &str,
    settings: PageSettings,
    spec: &TestSpec,
) -> TestResult {
    let start = Instant::now();
    debug!("Running test: {}", spec.name);

    let mut step_results = Vec::new();
    let mut test_error = None;

    if let Err(e) = driver.goto(base_url).await {
        test_error = Some(format!("navigate to {}: {}", base_url, e));
    }

    let pm = PageManager::with_settings(driver, settings);
    if test_error.is_none() {
        for step in &spec.steps {
            let step_start = Instant::now();
            let step_name = step.name();
            debug!("Executing step: {}", step_name);

            let outcome = execute_step(&pm, step).await;
            let duration_ms = step_start.elapsed().as_millis() as u64;

            match outcome {
                Ok(output) => step_results.push(StepResult {
                    success: true,
                    step_name,
                    duration_ms,
                    output,
                    error: None,
                }),
                Err(e) => {
                    let failure = E2eError::StepFailed {
                        step: step_name.clone(),
                        reason: e.to_string(),
                    };
                    test_error = Some(failure.to_string());
                    step_results.push(StepResult {
                        success: false,
                        step_name,
                        duration_ms,
                        output: None,
                        error: Some(e.to_string()),
                    });
                    break; // Stop on first failure
                }
            }
        }
    }

    TestResult {
        name: spec.name.clone(),
        success: test_error.is_none(),
        duration_ms: start.elapsed().as_millis() as u64,
        steps: step_results,
        error: test_error,
    }
}

/// Main E2E test runner
pub struct TestRunner {
    config: SuiteConfig,

    /// Clock and limits handed to the page objects
    settings: PageSettings,

    /// Running WebDriver server (if the suite spawned one)
    server: Option<DriverServerHandle>,
}

impl TestRunner {
    /// Create a new test runner with default configuration
    pub fn new() -> Self {
        Self::with_config(SuiteConfig::default())
    }

    /// Create a test runner with custom configuration
    pub fn with_config(config: SuiteConfig) -> Self {
        let settings = PageSettings {
            max_calendar_pages: config.calendar.max_pages,
            ..PageSettings::default()
        };
        Self {
            config,
            settings,
            server: None,
        }
    }

    /// Replace the page settings (clock, calendar cap)
    pub fn with_settings(mut self, settings: PageSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// Spawn the WebDriver server when the config names a driver binary
    pub async fn start_driver(&mut self) -> E2eResult<()> {
        if self.server.is_some() {
            return Ok(()); // Already running
        }
        let Some(server_config) = self.config.driver_server() else {
            debug!("Using external WebDriver at {}", self.config.webdriver_url);
            return Ok(());
        };

        let server = DriverServerHandle::spawn(server_config).await?;

        // Sessions go to the driver we just started
        self.config.webdriver_url = server.endpoint().to_string();

        self.server = Some(server);
        Ok(())
    }

    /// Stop the WebDriver server
    pub fn stop_driver(&mut self) -> E2eResult<()> {
        if let Some(mut server) = self.server.take() {
            server.stop()?;
        }
        Ok(())
    }

    /// Run all tests in the specs directory
    pub async fn run_all(&mut self) -> E2eResult<TestSuiteResult> {
        let specs = TestSpec::load_all(&self.config.specs_dir)?;
        self.run_specs(&specs).await
    }

    /// Run tests matching a tag
    pub async fn run_tagged(&mut self, tag: &str) -> E2eResult<TestSuiteResult> {
        let specs = TestSpec::load_all(&self.config.specs_dir)?;
        let filtered: Vec<TestSpec> = TestSpec::filter_by_tag(&specs, tag)
            .into_iter()
            .cloned()
            .collect();
        self.run_specs(&filtered).await
    }

    /// Run a specific test by name
    pub async fn run_test(&mut self, name: &str) -> E2eResult<TestSuiteResult> {
        let specs = TestSpec::load_all(&self.config.specs_dir)?;
        let spec = specs
            .into_iter()
            .find(|s| s.name == name)
            .ok_or_else(|| E2eError::SpecParse(format!("Test not found: {}", name)))?;

        self.run_specs(std::slice::from_ref(&spec)).await
    }

    /// Run specs, each in a fresh browser session
    pub async fn run_specs(&mut self, specs: &[TestSpec]) -> E2eResult<TestSuiteResult> {
        let start = Instant::now();
        self.start_driver().await?;

        info!("Running {} test(s)...", specs.len());

        let mut results = Vec::new();
        for spec in specs {
            let result = match WebDriverSession::connect(&self.config.webdriver()).await {
                Ok(session) => {
                    let result = run_spec_on(
                        &session,
                        &self.config.base_url,
                        self.settings.clone(),
                        spec,
                    )
                    .await;
                    if let Err(e) = session.close().await {
                        warn!("Failed to close session for {}: {}", spec.name, e);
                    }
                    result
                }
                Err(e) => TestResult {
                    name: spec.name.clone(),
                    success: false,
                    duration_ms: 0,
                    steps: vec![],
                    error: Some(e.to_string()),
                },
            };
            log_result(&result);
            results.push(result);
        }

        Ok(self.summarize(results, start))
    }

    /// Run specs one after another on a single page
    pub async fn run_specs_on<D: Driver + ?Sized>(
        &self,
        driver: &D,
        specs: &[TestSpec],
    ) -> TestSuiteResult {
        let start = Instant::now();
        info!("Running {} test(s)...", specs.len());

        let mut results = Vec::new();
        for spec in specs {
            let result = run_spec_on(driver, &self.config.base_url, self.settings.clone(), spec).await;
            log_result(&result);
            results.push(result);
        }

        self.summarize(results, start)
    }

    fn summarize(&self, results: Vec<TestResult>, start: Instant) -> TestSuiteResult {
        let suite = TestSuiteResult::from_results(results, start.elapsed().as_millis() as u64);

        info!("");
        info!(
            "Test Results: {} passed, {} failed, {} skipped ({} ms)",
            suite.passed, suite.failed, suite.skipped, suite.duration_ms
        );
        suite
    }

    /// Write test results to JSON file
    pub fn write_results(&self, results: &TestSuiteResult) -> E2eResult<PathBuf> {
        std::fs::create_dir_all(&self.config.output_dir)?;

        let path = self.config.output_dir.join("test-results.json");
        let json = serde_json::to_string_pretty(results)?;
        std::fs::write(&path, json)?;

        info!("Results written to: {}", path.display());
        Ok(path)
    }
}

impl Default for TestRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TestRunner {
    fn drop(&mut self) {
        let _ = self.stop_driver();
    }
}

fn log_result(result: &TestResult) {
    if result.success {
        info!("✓ {} ({} ms)", result.name, result.duration_ms);
    } else {
        error!(
            "✗ {} - {}",
            result.name,
            result.error.as_deref().unwrap_or("unknown error")
        );
    }
}
