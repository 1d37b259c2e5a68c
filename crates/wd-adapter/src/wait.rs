//! Bounded explicit waits.
//!
//! Every wait in the system goes through `Waiter` and therefore has the
//! same fixed ceiling and poll interval. The one exception is video
//! playback polling, which the task layer drives directly off the
//! player's own position accounting.

use std::future::Future;
use std::time::Duration;

use thirtyfour::{By, WebDriver, WebElement};
use tokio::time::{sleep, Instant};

use crate::error::AdapterError;

/// Polls a condition until it holds or the ceiling is hit.
#[derive(Clone, Copy, Debug)]
pub struct Waiter {
    timeout: Duration,
    interval: Duration,
}

impl Waiter {
    pub fn new(timeout: Duration, interval: Duration) -> Self {
        Self { timeout, interval }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Wait until an element matching `by` is present in the current
    /// frame context.
    pub async fn present(&self, driver: &WebDriver, by: By) -> Result<WebElement, AdapterError> {
        let what = format!("presence of {by:?}");
        let deadline = Instant::now() + self.timeout;
        loop {
            if let Ok(element) = driver.find(by.clone()).await {
                return Ok(element);
            }
            if Instant::now() >= deadline {
                return Err(AdapterError::timeout(what, self.timeout));
            }
            sleep(self.interval).await;
        }
    }

    /// Wait until an element matching `by` is present, displayed and
    /// enabled.
    pub async fn clickable(&self, driver: &WebDriver, by: By) -> Result<WebElement, AdapterError> {
        let what = format!("clickable {by:?}");
        let deadline = Instant::now() + self.timeout;
        loop {
            if let Ok(element) = driver.find(by.clone()).await {
                let displayed = element.is_displayed().await.unwrap_or(false);
                let enabled = element.is_enabled().await.unwrap_or(false);
                if displayed && enabled {
                    return Ok(element);
                }
            }
            if Instant::now() >= deadline {
                return Err(AdapterError::timeout(what, self.timeout));
            }
            sleep(self.interval).await;
        }
    }

    /// Wait until `probe` yields a value. Used for scripted probes such
    /// as a media element's reported duration.
    pub async fn until_value<T, F, Fut>(&self, what: &str, mut probe: F) -> Result<T, AdapterError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Option<T>>,
    {
        let deadline = Instant::now() + self.timeout;
        loop {
            if let Some(value) = probe().await {
                return Ok(value);
            }
            if Instant::now() >= deadline {
                return Err(AdapterError::timeout(what, self.timeout));
            }
            sleep(self.interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_waiter() -> Waiter {
        Waiter::new(Duration::from_millis(50), Duration::from_millis(5))
    }

    #[tokio::test]
    async fn test_until_value_returns_probe_result() {
        let mut attempts = 0u32;
        let value = fast_waiter()
            .until_value("countdown", || {
                attempts += 1;
                let ready = attempts >= 3;
                async move { ready.then_some(42) }
            })
            .await
            .unwrap();
        assert_eq!(value, 42);
        assert_eq!(attempts, 3);
    }

    #[tokio::test]
    async fn test_until_value_hits_ceiling() {
        let err = fast_waiter()
            .until_value::<(), _, _>("never", || async { None })
            .await
            .unwrap_err();
        match err {
            AdapterError::WaitTimeout { what, .. } => assert_eq!(what, "never"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
