//! Persisted session cookies.
//!
//! The blob on disk is opaque: whatever cookie records the WebDriver
//! client hands back get serialized wholesale and replayed on the next
//! run. Whether they still authenticate is decided by probing the page,
//! never by inspecting the blob.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::AdapterError;

/// JSON-file store for the serialized cookie list.
#[derive(Clone, Debug)]
pub struct CookieStore {
    path: PathBuf,
}

impl CookieStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted blob. `Ok(None)` when no blob exists yet.
    pub fn load<T: DeserializeOwned>(&self) -> Result<Option<T>, AdapterError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no persisted cookies");
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)?;
        let value = serde_json::from_str(&raw).map_err(|err| AdapterError::CookieStore {
            path: self.path.clone(),
            detail: err.to_string(),
        })?;
        Ok(Some(value))
    }

    pub fn save<T: Serialize>(&self, value: &T) -> Result<(), AdapterError> {
        let raw = serde_json::to_string_pretty(value).map_err(|err| AdapterError::CookieStore {
            path: self.path.clone(),
            detail: err.to_string(),
        })?;
        fs::write(&self.path, raw)?;
        debug!(path = %self.path.display(), "cookies persisted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_missing_blob_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = CookieStore::new(dir.path().join("cookies.json"));
        assert!(store.load::<Vec<Value>>().unwrap().is_none());
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = CookieStore::new(dir.path().join("cookies.json"));
        let cookies = vec![json!({"name": "session", "value": "abc"})];
        store.save(&cookies).unwrap();
        let loaded: Vec<Value> = store.load().unwrap().unwrap();
        assert_eq!(loaded, cookies);
    }

    #[test]
    fn test_corrupt_blob_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");
        std::fs::write(&path, "not json").unwrap();
        let store = CookieStore::new(path);
        assert!(store.load::<Vec<Value>>().is_err());
    }
}
