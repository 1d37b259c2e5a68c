//! The run loop: session → navigator → enumerator → drivers.

use moocpilot_core_types::{Task, TaskKind};
use tracing::{info, warn};
use wd_adapter::{BrowserSession, By, CookieStore};

use crate::auth::Login;
use crate::config::Config;
use crate::enumerator::Enumerator;
use crate::errors::PilotError;
use crate::navigator::Navigator;
use crate::selectors;
use crate::tasks::Drivers;

pub struct Pilot<'a> {
    session: &'a BrowserSession,
    config: &'a Config,
    drivers: Drivers,
}

impl<'a> Pilot<'a> {
    pub fn new(session: &'a BrowserSession, config: &'a Config) -> Self {
        Self {
            session,
            config,
            drivers: Drivers::new(),
        }
    }

    /// Drive the whole course once. Fails on the first fatal error; the
    /// caller owns reporting and cleanup.
    pub async fn run(&self) -> Result<(), PilotError> {
        let course_url = self.config.course_url()?;

        let store = CookieStore::new(self.config.cookie_file.clone());
        Login::new(self.session, store).establish(self.config).await?;

        let mut navigator = Navigator::new(self.session, course_url);
        navigator.open_course_page().await?;

        let unfinished = navigator.initialize_unfinished().await?;
        if unfinished == 0 {
            info!("no unfinished chapters found");
            return Ok(());
        }
        info!("{unfinished} unfinished chapters to process");

        loop {
            if !navigator.advance_to_next().await? {
                info!("all chapters processed");
                break;
            }

            // The content page is ready once its chapter header renders.
            self.session
                .waiter()
                .present(
                    self.session.driver(),
                    By::ClassName(selectors::CHAPTER_HEADER_CLASS),
                )
                .await?;

            let tasks = Enumerator::new(self.session).scan().await?;
            self.complete_tasks(&tasks).await?;

            navigator.open_course_page().await?;
        }
        Ok(())
    }

    async fn complete_tasks(&self, tasks: &[Task]) -> Result<(), PilotError> {
        for task in tasks {
            if let Some(reason) = skip_reason(self.config, task) {
                info!("skipping task \"{}\": {reason}", task.title);
                continue;
            }
            match self.drivers.for_task(task) {
                Some(driver) => driver.run(self.session, task).await?,
                None => warn!(
                    "no driver claims task \"{}\" (kind: {})",
                    task.title, task.kind
                ),
            }
        }
        Ok(())
    }
}

/// Why `task` would be skipped under `config`, if at all.
pub fn skip_reason(config: &Config, task: &Task) -> Option<&'static str> {
    if config.skip_finished && task.finished {
        return Some("already finished");
    }
    match task.kind {
        TaskKind::Document if config.skip_document => Some("document tasks disabled"),
        TaskKind::Video if config.skip_video => Some("video tasks disabled"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(kind: TaskKind, finished: bool) -> Task {
        Task {
            kind,
            frame_locator: moocpilot_core_types::nth_frame_locator(kind, 1),
            finished,
            title: "t".to_string(),
            index: 1,
        }
    }

    #[test]
    fn test_finished_tasks_skipped_by_default() {
        let config = Config::default();
        assert_eq!(
            skip_reason(&config, &task(TaskKind::Document, true)),
            Some("already finished")
        );
        assert_eq!(skip_reason(&config, &task(TaskKind::Document, false)), None);
    }

    #[test]
    fn test_finished_tasks_replayed_when_disabled() {
        let config = Config {
            skip_finished: false,
            ..Config::default()
        };
        assert_eq!(skip_reason(&config, &task(TaskKind::Video, true)), None);
    }

    #[test]
    fn test_kind_toggles() {
        let config = Config {
            skip_document: true,
            skip_video: true,
            ..Config::default()
        };
        assert!(skip_reason(&config, &task(TaskKind::Document, false)).is_some());
        assert!(skip_reason(&config, &task(TaskKind::Video, false)).is_some());
        // Unknown kinds are not skipped here; dispatch reports them.
        assert!(skip_reason(&config, &task(TaskKind::Unknown, false)).is_none());
    }
}
