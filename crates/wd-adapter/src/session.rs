//! WebDriver session lifecycle and frame-context management.
//!
//! One session per process run. Frame switching mirrors the platform's
//! nested sub-documents: callers enter a frame, do their work, and must
//! restore an outer context on every exit path, because element lookups
//! silently miss while a stale frame context is active.

use std::process::Stdio;

use serde_json::Value;
use thirtyfour::{Cookie, DesiredCapabilities, WebDriver, WebElement};
use tokio::process::{Child, Command};
use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

use crate::config::AdapterConfig;
use crate::error::AdapterError;
use crate::wait::Waiter;

/// An authenticated-or-not browser handle plus the spawned driver child.
pub struct BrowserSession {
    driver: WebDriver,
    waiter: Waiter,
    driver_process: Option<Child>,
}

impl BrowserSession {
    /// Spawn chromedriver (when configured) and open a WebDriver session
    /// against it, retrying while the driver starts up.
    pub async fn connect(config: &AdapterConfig) -> Result<Self, AdapterError> {
        info!("initializing browser session...");
        let driver_process = if config.spawn_driver {
            Some(spawn_driver(config)?)
        } else {
            None
        };

        let driver = match connect_with_retry(config).await {
            Ok(driver) => driver,
            Err(err) => {
                if let Some(mut child) = driver_process {
                    let _ = child.start_kill();
                }
                return Err(err);
            }
        };

        info!(url = %config.webdriver_url, "webdriver session established");
        Ok(Self {
            driver,
            waiter: Waiter::new(config.wait_timeout, config.poll_interval),
            driver_process,
        })
    }

    pub fn driver(&self) -> &WebDriver {
        &self.driver
    }

    pub fn waiter(&self) -> &Waiter {
        &self.waiter
    }

    pub async fn goto(&self, url: &str) -> Result<(), AdapterError> {
        debug!(url, "navigating");
        self.driver.goto(url).await.map_err(Into::into)
    }

    pub async fn refresh(&self) -> Result<(), AdapterError> {
        self.driver.refresh().await.map_err(Into::into)
    }

    /// Enter the rendering context of `frame`.
    pub async fn enter_frame(&self, frame: &WebElement) -> Result<(), AdapterError> {
        frame.clone().enter_frame().await.map_err(Into::into)
    }

    /// Return to the parent of the current frame context.
    pub async fn enter_parent_frame(&self) -> Result<(), AdapterError> {
        self.driver.enter_parent_frame().await.map_err(Into::into)
    }

    /// Return to the top-level document.
    pub async fn restore_top(&self) -> Result<(), AdapterError> {
        self.driver.enter_default_frame().await.map_err(Into::into)
    }

    /// Evaluate a script in the current frame context and return its
    /// JSON value.
    pub async fn execute_json(&self, script: &str, args: Vec<Value>) -> Result<Value, AdapterError> {
        let ret = self.driver.execute(script, args).await?;
        Ok(ret.json().clone())
    }

    /// Evaluate a script expected to return a number.
    pub async fn execute_f64(&self, script: &str, args: Vec<Value>) -> Result<f64, AdapterError> {
        let value = self.execute_json(script, args).await?;
        value
            .as_f64()
            .ok_or_else(|| AdapterError::script(format!("expected a number, got {value}")))
    }

    /// Apply persisted cookies to the current navigation context.
    /// Individual failures are warnings; the count of applied cookies is
    /// returned.
    pub async fn apply_cookies(&self, cookies: Vec<Cookie>) -> usize {
        let mut applied = 0;
        for cookie in cookies {
            match self.driver.add_cookie(cookie).await {
                Ok(()) => applied += 1,
                Err(err) => warn!(%err, "failed to apply a persisted cookie"),
            }
        }
        applied
    }

    /// All cookies of the current navigation context.
    pub async fn capture_cookies(&self) -> Result<Vec<Cookie>, AdapterError> {
        self.driver.get_all_cookies().await.map_err(Into::into)
    }

    /// End the WebDriver session and reap the spawned driver.
    pub async fn quit(mut self) -> Result<(), AdapterError> {
        info!("closing browser session...");
        let result = self.driver.quit().await;
        if let Some(mut child) = self.driver_process.take() {
            if let Err(err) = child.start_kill() {
                warn!(%err, "failed to stop the chromedriver process");
            }
        }
        result?;
        info!("browser session closed");
        Ok(())
    }
}

fn spawn_driver(config: &AdapterConfig) -> Result<Child, AdapterError> {
    let executable =
        config
            .driver_executable
            .clone()
            .ok_or_else(|| AdapterError::Session {
                url: config.webdriver_url.clone(),
                reason: "chromedriver executable not found on PATH".to_string(),
            })?;

    let mut command = Command::new(&executable);
    if let Some(port) = config.port() {
        command.arg(format!("--port={port}"));
    }
    let child = command
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()?;
    info!(executable = %executable.display(), "chromedriver spawned");
    Ok(child)
}

async fn connect_with_retry(config: &AdapterConfig) -> Result<WebDriver, AdapterError> {
    let deadline = Instant::now() + config.wait_timeout;
    loop {
        let caps = DesiredCapabilities::chrome();
        match WebDriver::new(&config.webdriver_url, caps).await {
            Ok(driver) => return Ok(driver),
            Err(err) => {
                if Instant::now() >= deadline {
                    return Err(AdapterError::Session {
                        url: config.webdriver_url.clone(),
                        reason: err.to_string(),
                    });
                }
                debug!(%err, "webdriver endpoint not ready yet");
            }
        }
        sleep(config.poll_interval).await;
    }
}
