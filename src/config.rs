//! Run configuration.
//!
//! Loaded once at startup from a YAML key-value document and passed to
//! components explicitly; there is no ambient configuration state.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::PilotError;
use wd_adapter::AdapterConfig;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Platform account; prompted interactively when absent.
    pub username: Option<String>,
    /// Platform password; prompted interactively when absent.
    pub password: Option<String>,
    /// Landing page of the course to drive. Required.
    pub course_url: Option<String>,

    /// Chromedriver endpoint.
    pub webdriver_url: String,
    /// Path of the persisted session cookie blob.
    pub cookie_file: PathBuf,

    /// Skip tasks the platform already reports finished.
    pub skip_finished: bool,
    /// Skip document tasks entirely.
    pub skip_document: bool,
    /// Skip video tasks entirely.
    pub skip_video: bool,

    /// Ceiling for every explicit wait, in seconds.
    pub wait_timeout_secs: u64,
    /// Poll interval for explicit waits, in milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            username: None,
            password: None,
            course_url: None,
            webdriver_url: "http://localhost:9515".to_string(),
            cookie_file: PathBuf::from("cookies.json"),
            skip_finished: true,
            skip_document: false,
            skip_video: false,
            wait_timeout_secs: 20,
            poll_interval_ms: 500,
        }
    }
}

impl Config {
    /// The validated course URL. A run cannot start without one.
    pub fn course_url(&self) -> Result<Url, PilotError> {
        let raw = self
            .course_url
            .as_deref()
            .ok_or_else(|| PilotError::Config("course_url is not set".to_string()))?;
        Url::parse(raw).map_err(|err| PilotError::Config(format!("invalid course_url: {err}")))
    }

    pub fn adapter_config(&self) -> AdapterConfig {
        AdapterConfig {
            webdriver_url: self.webdriver_url.clone(),
            wait_timeout: Duration::from_secs(self.wait_timeout_secs),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            ..AdapterConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.skip_finished);
        assert!(!config.skip_document);
        assert!(!config.skip_video);
        assert_eq!(config.wait_timeout_secs, 20);
        assert!(config.course_url().is_err());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: Config = serde_yaml::from_str(
            "username: alice\ncourse_url: https://mooc.ucas.edu.cn/course/1\nskip_video: true\n",
        )
        .unwrap();
        assert_eq!(config.username.as_deref(), Some("alice"));
        assert!(config.skip_video);
        assert!(config.skip_finished);
        assert_eq!(config.webdriver_url, "http://localhost:9515");
        let url = config.course_url().unwrap();
        assert_eq!(url.host_str(), Some("mooc.ucas.edu.cn"));
    }

    #[test]
    fn test_invalid_course_url_is_rejected() {
        let config = Config {
            course_url: Some("not a url".to_string()),
            ..Config::default()
        };
        assert!(matches!(config.course_url(), Err(PilotError::Config(_))));
    }

    #[test]
    fn test_adapter_config_carries_wait_tuning() {
        let config = Config {
            wait_timeout_secs: 7,
            poll_interval_ms: 125,
            ..Config::default()
        };
        let adapter = config.adapter_config();
        assert_eq!(adapter.wait_timeout, Duration::from_secs(7));
        assert_eq!(adapter.poll_interval, Duration::from_millis(125));
    }
}
