//! Task completion drivers.
//!
//! One driver per recognized task kind, behind a common trait; tasks of
//! unrecognized kinds are dispatched to nobody and reported by the
//! caller.

mod document;
mod video;

pub use document::DocumentDriver;
pub use video::VideoDriver;

use async_trait::async_trait;
use moocpilot_core_types::{Task, TaskKind};
use wd_adapter::BrowserSession;

use crate::errors::PilotError;

#[async_trait]
pub trait TaskDriver: Send + Sync {
    fn kind(&self) -> TaskKind;

    /// Drive the task until the platform should consider it viewed.
    /// Side effects only; the completion flag stays the platform's.
    async fn run(&self, session: &BrowserSession, task: &Task) -> Result<(), PilotError>;
}

/// Dispatch over the two recognized kinds.
#[derive(Default)]
pub struct Drivers {
    document: DocumentDriver,
    video: VideoDriver,
}

impl Drivers {
    pub fn new() -> Self {
        Self::default()
    }

    /// The driver claiming `task`, or `None` for unrecognized kinds.
    pub fn for_task(&self, task: &Task) -> Option<&dyn TaskDriver> {
        match task.kind {
            TaskKind::Document => Some(&self.document),
            TaskKind::Video => Some(&self.video),
            TaskKind::Unknown => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(kind: TaskKind) -> Task {
        Task {
            kind,
            frame_locator: moocpilot_core_types::nth_frame_locator(kind, 1),
            finished: false,
            title: "t".to_string(),
            index: 1,
        }
    }

    #[test]
    fn test_dispatch_by_kind() {
        let drivers = Drivers::new();
        assert_eq!(
            drivers.for_task(&task(TaskKind::Document)).map(|d| d.kind()),
            Some(TaskKind::Document)
        );
        assert_eq!(
            drivers.for_task(&task(TaskKind::Video)).map(|d| d.kind()),
            Some(TaskKind::Video)
        );
        assert!(drivers.for_task(&task(TaskKind::Unknown)).is_none());
    }
}
