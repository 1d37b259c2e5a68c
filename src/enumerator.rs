//! Task point enumeration within a chapter's content frame.

use moocpilot_core_types::{LocatorCounter, Task, TaskKind, TaskStats};
use tracing::{debug, error, info, warn};
use wd_adapter::{BrowserSession, By, WebElement};

use crate::errors::PilotError;
use crate::selectors;

pub struct Enumerator<'a> {
    session: &'a BrowserSession,
}

impl<'a> Enumerator<'a> {
    pub fn new(session: &'a BrowserSession) -> Self {
        Self { session }
    }

    /// Scan the content frame for task points, in document order.
    pub async fn scan(&self) -> Result<Vec<Task>, PilotError> {
        info!("scanning for task points...");
        self.enter_content_frame().await?;
        let outcome = self.scan_inner().await;
        if let Err(err) = self.session.restore_top().await {
            warn!(%err, "failed to restore the top-level context");
        }
        outcome
    }

    async fn enter_content_frame(&self) -> Result<(), PilotError> {
        let driver = self.session.driver();
        let frame = self
            .session
            .waiter()
            .present(driver, By::Id(selectors::CONTENT_FRAME_ID))
            .await?;
        self.session.enter_frame(&frame).await?;
        Ok(())
    }

    async fn scan_inner(&self) -> Result<Vec<Task>, PilotError> {
        let driver = self.session.driver();
        if let Err(err) = self
            .session
            .waiter()
            .present(driver, By::ClassName(selectors::TASK_MARKER_CLASS))
            .await
        {
            // A chapter without task points never grows a marker; that
            // ends the chapter, not the run.
            info!("no task points in this chapter ({err})");
            return Ok(Vec::new());
        }

        let markers = driver
            .find_all(By::ClassName(selectors::TASK_MARKER_CLASS))
            .await?;
        info!("found {} task points", markers.len());

        let mut counter = LocatorCounter::new();
        let mut tasks = Vec::with_capacity(markers.len());
        for (position, marker) in markers.iter().enumerate() {
            let index = position + 1;
            match self.inspect(marker, index, &mut counter).await {
                Ok(task) => {
                    info!(
                        "task point {index}: kind={}, finished={}",
                        task.kind, task.finished
                    );
                    tasks.push(task);
                }
                Err(err) => {
                    // One unreadable marker does not fail the pass.
                    error!("failed to inspect task point {index}: {err}");
                    debug!("{err:?}");
                }
            }
        }

        log_statistics(&tasks);
        Ok(tasks)
    }

    async fn inspect(
        &self,
        marker: &WebElement,
        index: usize,
        counter: &mut LocatorCounter,
    ) -> Result<Task, PilotError> {
        let parent = marker.find(By::XPath("./..")).await?;
        let parent_class = parent.attr("class").await?.unwrap_or_default();
        let finished = parent_class.contains(selectors::TASK_FINISHED_CLASS);

        let frame = parent.find(By::Tag("iframe")).await?;
        let frame_class = frame.attr("class").await?.unwrap_or_default();
        let kind = TaskKind::from_frame_class(&frame_class);
        if kind == TaskKind::Unknown {
            debug!(class = %frame_class, "unrecognized task frame signature");
        }

        let title = task_title(marker.attr("title").await?, parent.text().await.ok());
        Ok(Task {
            kind,
            frame_locator: counter.next(kind),
            finished,
            title,
            index,
        })
    }
}

fn task_title(marker_title: Option<String>, parent_text: Option<String>) -> String {
    marker_title
        .into_iter()
        .chain(parent_text)
        .map(|text| text.trim().to_string())
        .find(|text| !text.is_empty())
        .unwrap_or_else(|| "untitled task".to_string())
}

fn log_statistics(tasks: &[Task]) {
    let stats = TaskStats::collect(tasks);
    info!("task point statistics:");
    info!("- finished: {}", stats.finished);
    info!("- unfinished: {}", stats.unfinished);
    info!("- documents: {}", stats.documents);
    info!("- videos: {}", stats.videos);
    if stats.unknown > 0 {
        info!("- unrecognized: {}", stats.unknown);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_title_prefers_marker_title() {
        let title = task_title(Some("1.1 Reading".to_string()), Some("fallback".to_string()));
        assert_eq!(title, "1.1 Reading");
    }

    #[test]
    fn test_task_title_falls_back_to_parent_text() {
        let title = task_title(Some("   ".to_string()), Some("Lecture video".to_string()));
        assert_eq!(title, "Lecture video");
    }

    #[test]
    fn test_task_title_placeholder() {
        assert_eq!(task_title(None, None), "untitled task");
    }
}
