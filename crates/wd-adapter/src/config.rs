//! Configuration for the WebDriver session.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use which::which;

/// Settings for establishing and tuning the WebDriver session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AdapterConfig {
    /// Chromedriver endpoint the session connects to.
    pub webdriver_url: String,
    /// Spawn a chromedriver child process before connecting. When false,
    /// an already-running driver is expected at `webdriver_url`.
    pub spawn_driver: bool,
    /// Explicit chromedriver binary; discovered on PATH when unset.
    pub driver_executable: Option<PathBuf>,
    /// Ceiling for every explicit wait.
    pub wait_timeout: Duration,
    /// Poll interval for explicit waits.
    pub poll_interval: Duration,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:9515".to_string(),
            spawn_driver: true,
            driver_executable: detect_chromedriver_executable(),
            wait_timeout: Duration::from_secs(20),
            poll_interval: Duration::from_millis(500),
        }
    }
}

impl AdapterConfig {
    /// Port component of `webdriver_url`, for the spawned driver's
    /// `--port` flag.
    pub fn port(&self) -> Option<u16> {
        url::Url::parse(&self.webdriver_url)
            .ok()
            .and_then(|url| url.port_or_known_default())
    }
}

fn detect_chromedriver_executable() -> Option<PathBuf> {
    if let Ok(raw) = env::var("MOOCPILOT_CHROMEDRIVER") {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    which("chromedriver").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint_port() {
        let config = AdapterConfig::default();
        assert_eq!(config.port(), Some(9515));
        assert!(config.spawn_driver);
    }

    #[test]
    fn test_port_of_custom_endpoint() {
        let config = AdapterConfig {
            webdriver_url: "http://127.0.0.1:4444".to_string(),
            ..AdapterConfig::default()
        };
        assert_eq!(config.port(), Some(4444));
    }
}
