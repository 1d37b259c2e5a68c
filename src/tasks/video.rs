//! Video task driver.
//!
//! Starts playback, mutes it, and then blocks for the real-time length
//! of the media: completion is tied to the player's own duration and
//! position accounting, with no seeking or speed manipulation.

use std::time::Duration;

use async_trait::async_trait;
use moocpilot_core_types::{Task, TaskKind};
use tokio::time::sleep;
use tracing::{debug, info, warn};
use wd_adapter::{BrowserSession, By};

use crate::errors::PilotError;
use crate::selectors;
use crate::tasks::TaskDriver;

const POLL_INTERVAL: Duration = Duration::from_secs(1);

const DURATION_SCRIPT: &str =
    "return document.getElementById('video_html5_api').duration || 0;";
const POSITION_SCRIPT: &str =
    "return document.getElementById('video_html5_api').currentTime || 0;";

#[derive(Default)]
pub struct VideoDriver;

#[async_trait]
impl TaskDriver for VideoDriver {
    fn kind(&self) -> TaskKind {
        TaskKind::Video
    }

    async fn run(&self, session: &BrowserSession, task: &Task) -> Result<(), PilotError> {
        info!("playing video: {}", task.title);
        let locator = task.frame_locator.as_deref().ok_or_else(|| {
            PilotError::Structure("video task has no frame locator".to_string())
        })?;

        let driver = session.driver();
        let content = session
            .waiter()
            .present(driver, By::Id(selectors::CONTENT_FRAME_ID))
            .await?;
        session.enter_frame(&content).await?;

        let outcome = play_to_end(session, locator).await;

        if let Err(err) = session.enter_parent_frame().await {
            warn!(%err, "failed to return to the parent frame");
        }
        if let Err(err) = session.restore_top().await {
            warn!(%err, "failed to restore the top-level context");
        }

        outcome
    }
}

async fn play_to_end(session: &BrowserSession, locator: &str) -> Result<(), PilotError> {
    let driver = session.driver();
    let waiter = session.waiter();

    debug!(locator, "descending into the player frame");
    let player_frame = waiter.present(driver, By::XPath(locator)).await?;
    session.enter_frame(&player_frame).await?;

    let play = waiter
        .clickable(driver, By::ClassName(selectors::VIDEO_PLAY_BUTTON_CLASS))
        .await?;
    play.click().await?;

    waiter.present(driver, By::Id(selectors::VIDEO_MEDIA_ID)).await?;
    mute_if_needed(session).await?;

    let duration = waiter
        .until_value("reported video duration", || async move {
            session
                .execute_f64(DURATION_SCRIPT, vec![])
                .await
                .ok()
                .filter(|duration| duration.is_finite() && *duration > 0.0)
        })
        .await?;
    info!("video duration: {duration:.1}s");

    // The one wait in the system without a ceiling: a duration the
    // player misreports keeps this loop alive.
    let mut current = 0.0_f64;
    let mut last_decile = decile(current, duration);
    while !playback_finished(current, duration) {
        current = session.execute_f64(POSITION_SCRIPT, vec![]).await?;
        sleep(POLL_INTERVAL).await;

        let reached = decile(current, duration);
        if reached > last_decile {
            info!("playback progress: {current:.1}/{duration:.1}s");
            last_decile = reached;
        }
    }

    info!("video playback finished");
    Ok(())
}

/// Mute via a scripted click; the control can sit under the player
/// overlay, which intercepts a native click.
async fn mute_if_needed(session: &BrowserSession) -> Result<(), PilotError> {
    let control = session
        .driver()
        .find(By::ClassName(selectors::VIDEO_MUTE_CONTROL_CLASS))
        .await?;
    let class = control.attr("class").await?.unwrap_or_default();
    if class.contains(selectors::VIDEO_UNMUTED_CLASS) {
        debug!("muting playback");
        session
            .execute_json("arguments[0].click();", vec![control.to_json()?])
            .await?;
    }
    Ok(())
}

/// True once the reported position has reached the reported duration.
/// A non-positive duration counts as finished, so the polling loop
/// never runs for it.
fn playback_finished(current: f64, duration: f64) -> bool {
    duration <= 0.0 || current >= duration
}

/// Completed tenths of the playback, clamped to 0..=10.
fn decile(current: f64, duration: f64) -> u8 {
    if duration <= 0.0 {
        return 10;
    }
    let ratio = (current / duration).clamp(0.0, 1.0);
    (ratio * 10.0).floor() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playback_finished_at_duration() {
        assert!(!playback_finished(29.9, 30.0));
        assert!(playback_finished(30.0, 30.0));
        assert!(playback_finished(30.4, 30.0));
    }

    #[test]
    fn test_zero_duration_never_polls() {
        assert!(playback_finished(0.0, 0.0));
        assert!(playback_finished(0.0, -1.0));
    }

    #[test]
    fn test_decile_progression() {
        assert_eq!(decile(0.0, 30.0), 0);
        assert_eq!(decile(15.0, 30.0), 5);
        assert_eq!(decile(29.9, 30.0), 9);
        assert_eq!(decile(30.0, 30.0), 10);
    }

    #[test]
    fn test_decile_of_zero_duration_is_complete() {
        assert_eq!(decile(1.0, 0.0), 10);
    }
}
