//! Error type for the pilot's own operations.

use thiserror::Error;
use wd_adapter::AdapterError;

#[derive(Debug, Error)]
pub enum PilotError {
    /// Browser boundary failure, including element-not-found timeouts.
    #[error(transparent)]
    Adapter(#[from] AdapterError),

    /// The scripted login could not be completed.
    #[error("login failed: {0}")]
    Login(String),

    /// Expected platform markup was absent.
    #[error("course page structure missing: {0}")]
    Structure(String),

    /// The configuration cannot drive a run.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<wd_adapter::WebDriverError> for PilotError {
    fn from(err: wd_adapter::WebDriverError) -> Self {
        PilotError::Adapter(AdapterError::from(err))
    }
}
