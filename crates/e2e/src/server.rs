//! WebDriver server management - spawning and health checking chromedriver/geckodriver

use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::time::Duration;
use serde_json::Value;
use tokio::time::{sleep, Instant};
use tracing::{info, warn};

use crate::error::{E2eError, E2eResult};
use crate::webdriver::Browser;

/// Handle to a running WebDriver server process
pub struct DriverServerHandle {
    child: Child,
    pub endpoint: String,
    pub port: u16,
}

impl DriverServerHandle {
    /// Spawn the driver binary on a local port
    pub async fn spawn(config: DriverServerConfig) -> E2eResult<Self> {
        let port = match config.port {
            Some(port) => port,
            None => find_free_port()?,
        };
        let endpoint = format!("http://127.0.0.1:{}", port);

        info!("Spawning {} on port {}", config.binary_path.display(), port);

        let mut cmd = Command::new(&config.binary_path);
        cmd.arg(format!("--port={}", port))
            .stdout(Stdio::null())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().map_err(|e| {
            E2eError::DriverStartup(format!(
                "Failed to spawn {}: {}",
                config.binary_path.display(),
                e
            ))
        })?;

        let handle = DriverServerHandle {
            child,
            endpoint: endpoint.clone(),
            port,
        };

        handle.wait_for_ready(config.startup_timeout).await?;

        info!("WebDriver server is ready at {}", endpoint);
        Ok(handle)
    }

    /// Poll `GET /status` until the driver reports it can create sessions
    async fn wait_for_ready(&self, timeout_duration: Duration) -> E2eResult<()> {
        let status_url = format!("{}/status", self.endpoint);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(2))
            .build()?;

        let start = Instant::now();
        let mut attempts = 0;

        while start.elapsed() < timeout_duration {
            attempts += 1;

            match client.get(&status_url).send().await {
                Ok(resp) if resp.status().is_success() => {
                    let body: Value = resp.json().await.unwrap_or(Value::Null);
                    if is_ready(&body) {
                        return Ok(());
                    }
                }
                Ok(resp) => {
                    warn!("Status check returned {}", resp.status());
                }
                Err(e) => {
                    if attempts == 1 {
                        info!("Waiting for WebDriver server to start...");
                    }
                    // Connection refused is expected while the driver boots
                    if !e.is_connect() {
                        warn!("Status check error: {}", e);
                    }
                }
            }

            sleep(Duration::from_millis(100)).await;
        }

        Err(E2eError::DriverHealthCheck(attempts))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Stop the driver
    pub fn stop(&mut self) -> E2eResult<()> {
        info!("Stopping WebDriver server (pid: {})", self.child.id());

        // Try graceful shutdown first
        #[cfg(unix)]
        {
            use nix::sys::signal::{kill, Signal};
            use nix::unistd::Pid;

            let pid = Pid::from_raw(self.child.id() as i32);
            if kill(pid, Signal::SIGTERM).is_ok() {
                std::thread::sleep(Duration::from_millis(200));
            }
        }

        // Force kill if still running
        let _ = self.child.kill();
        let _ = self.child.wait();

        Ok(())
    }
}

impl Drop for DriverServerHandle {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

/// `{"value": {"ready": true, ...}}`
fn is_ready(status: &Value) -> bool {
    status
        .get("value")
        .and_then(|v| v.get("ready"))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// Configuration for spawning a WebDriver server
#[derive(Debug, Clone)]
pub struct DriverServerConfig {
    /// Path to chromedriver or geckodriver
    pub binary_path: PathBuf,

    /// Port to listen on (None = find free port)
    pub port: Option<u16>,

    /// Timeout for driver startup
    pub startup_timeout: Duration,
}

impl DriverServerConfig {
    pub fn for_browser(browser: Browser) -> Self {
        Self {
            binary_path: PathBuf::from(browser.driver_binary()),
            ..Default::default()
        }
    }
}

impl Default for DriverServerConfig {
    fn default() -> Self {
        Self {
            binary_path: PathBuf::from("chromedriver"),
            port: None,
            startup_timeout: Duration::from_secs(30),
        }
    }
}

/// Find a free port to use
fn find_free_port() -> E2eResult<u16> {
    use std::net::TcpListener;

    let listener = TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?.port())
}
