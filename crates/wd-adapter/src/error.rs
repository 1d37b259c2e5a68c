//! Error types for the WebDriver adapter.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors surfaced by the adapter to higher layers.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The WebDriver session could not be established.
    #[error("failed to start webdriver session at {url}: {reason}")]
    Session { url: String, reason: String },

    /// An explicit wait hit its ceiling.
    #[error("wait for {what} timed out after {waited:?}")]
    WaitTimeout { what: String, waited: Duration },

    /// A WebDriver command failed.
    #[error("webdriver command failed: {0}")]
    Command(#[from] thirtyfour::error::WebDriverError),

    /// Scripted evaluation returned something unusable.
    #[error("script evaluation failed: {detail}")]
    Script { detail: String },

    /// The persisted cookie blob could not be read or written.
    #[error("cookie store {path}: {detail}")]
    CookieStore { path: PathBuf, detail: String },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl AdapterError {
    pub fn timeout(what: impl Into<String>, waited: Duration) -> Self {
        Self::WaitTimeout {
            what: what.into(),
            waited,
        }
    }

    pub fn script(detail: impl Into<String>) -> Self {
        Self::Script {
            detail: detail.into(),
        }
    }
}
