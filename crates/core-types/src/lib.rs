//! Shared primitives for the moocpilot workspace.
//!
//! Everything here is plain data: chapter references that survive page
//! navigations, task records produced by one enumeration pass, and the
//! classification of a task's rendering frame. No browser types leak in,
//! so the matching and classification rules stay testable on their own.

use std::fmt;

/// Class substring that marks a document-viewer frame on the platform.
pub const FRAME_CLASS_DOCUMENT: &str = "insertdoc-online-pdf";

/// Class substring that marks a video-player frame on the platform.
pub const FRAME_CLASS_VIDEO: &str = "ans-insertvideo-online";

/// Kind of a completion-trackable task point.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum TaskKind {
    Document,
    Video,
    Unknown,
}

impl TaskKind {
    /// Classify a task by the class attribute of its rendering frame.
    ///
    /// Any class list that carries neither known signature yields
    /// `Unknown`; the caller decides what to do with those.
    pub fn from_frame_class(class: &str) -> Self {
        if class.contains(FRAME_CLASS_DOCUMENT) {
            TaskKind::Document
        } else if class.contains(FRAME_CLASS_VIDEO) {
            TaskKind::Video
        } else {
            TaskKind::Unknown
        }
    }

    /// The frame-class signature for this kind, if it has one.
    pub fn frame_signature(&self) -> Option<&'static str> {
        match self {
            TaskKind::Document => Some(FRAME_CLASS_DOCUMENT),
            TaskKind::Video => Some(FRAME_CLASS_VIDEO),
            TaskKind::Unknown => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TaskKind::Document => "document",
            TaskKind::Video => "video",
            TaskKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Build the XPath that re-finds the `n`-th rendering frame of a kind
/// (1-based), scoped by the kind's class signature.
///
/// Markers are not individually addressable on the platform, so the
/// positional selector is the only stable handle across the enumeration
/// pass and the later driver descent.
pub fn nth_frame_locator(kind: TaskKind, n: usize) -> Option<String> {
    kind.frame_signature()
        .map(|sig| format!("(//iframe[contains(@class, '{sig}')])[{n}]"))
}

/// Assigns positional locators during an enumeration pass, keeping one
/// running count per task kind.
#[derive(Debug, Default)]
pub struct LocatorCounter {
    documents: usize,
    videos: usize,
}

impl LocatorCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one more task of `kind` and return its frame locator.
    pub fn next(&mut self, kind: TaskKind) -> Option<String> {
        let n = match kind {
            TaskKind::Document => {
                self.documents += 1;
                self.documents
            }
            TaskKind::Video => {
                self.videos += 1;
                self.videos
            }
            TaskKind::Unknown => return None,
        };
        nth_frame_locator(kind, n)
    }
}

/// A chapter entry keyed by what survives a page reload: the display
/// title and the source of its activation handler.
///
/// Live element handles are invalid after any navigation, so this pair is
/// the only thing ever cached; the live entry is re-resolved from it
/// immediately before each interaction.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ChapterRef {
    pub title: String,
    pub handler: String,
}

impl ChapterRef {
    pub fn new(title: impl Into<String>, handler: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            handler: handler.into(),
        }
    }
}

impl fmt::Display for ChapterRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

/// Index of the first live entry matching `target`, scanning in document
/// order. Duplicate (title, handler) pairs therefore resolve to the
/// earliest entry, and the scan never blocks.
pub fn first_match(live: &[ChapterRef], target: &ChapterRef) -> Option<usize> {
    live.iter()
        .position(|entry| entry.title == target.title && entry.handler == target.handler)
}

/// One completion unit inside a chapter's content frame.
///
/// `finished` is the platform's own flag, read once at enumeration time;
/// moocpilot never stores a competing notion of completion.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Task {
    pub kind: TaskKind,
    /// Positional XPath for the task's rendering frame; `None` for
    /// unrecognized kinds, which no driver claims.
    pub frame_locator: Option<String>,
    pub finished: bool,
    pub title: String,
    /// 1-based position within the enumeration pass, for log lines only.
    pub index: usize,
}

/// Counts reported after each enumeration pass.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TaskStats {
    pub finished: usize,
    pub unfinished: usize,
    pub documents: usize,
    pub videos: usize,
    pub unknown: usize,
}

impl TaskStats {
    pub fn collect(tasks: &[Task]) -> Self {
        let mut stats = Self::default();
        for task in tasks {
            if task.finished {
                stats.finished += 1;
            } else {
                stats.unfinished += 1;
            }
            match task.kind {
                TaskKind::Document => stats.documents += 1,
                TaskKind::Video => stats.videos += 1,
                TaskKind::Unknown => stats.unknown += 1,
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_frame_class() {
        let class = "ans-attach-online insertdoc-online-pdf";
        assert_eq!(TaskKind::from_frame_class(class), TaskKind::Document);

        let class = "ans-insertvideo-online ans-attach-online";
        assert_eq!(TaskKind::from_frame_class(class), TaskKind::Video);

        assert_eq!(TaskKind::from_frame_class("ans-insertaudio-online"), TaskKind::Unknown);
        assert_eq!(TaskKind::from_frame_class(""), TaskKind::Unknown);
    }

    #[test]
    fn test_nth_frame_locator() {
        assert_eq!(
            nth_frame_locator(TaskKind::Document, 2).as_deref(),
            Some("(//iframe[contains(@class, 'insertdoc-online-pdf')])[2]")
        );
        assert_eq!(
            nth_frame_locator(TaskKind::Video, 1).as_deref(),
            Some("(//iframe[contains(@class, 'ans-insertvideo-online')])[1]")
        );
        assert_eq!(nth_frame_locator(TaskKind::Unknown, 1), None);
    }

    #[test]
    fn test_locator_counter_counts_per_kind() {
        let mut counter = LocatorCounter::new();
        let first_doc = counter.next(TaskKind::Document).unwrap();
        assert!(counter.next(TaskKind::Unknown).is_none());
        let first_video = counter.next(TaskKind::Video).unwrap();
        let second_doc = counter.next(TaskKind::Document).unwrap();

        assert!(first_doc.ends_with("[1]"));
        assert!(first_video.ends_with("[1]"));
        assert!(second_doc.ends_with("[2]"));
    }

    #[test]
    fn test_first_match_is_deterministic_on_duplicates() {
        let target = ChapterRef::new("1.1 Intro", "toChapter(1)");
        let live = vec![
            ChapterRef::new("1.0 Preface", "toChapter(0)"),
            ChapterRef::new("1.1 Intro", "toChapter(1)"),
            ChapterRef::new("1.1 Intro", "toChapter(1)"),
        ];
        assert_eq!(first_match(&live, &target), Some(1));
    }

    #[test]
    fn test_first_match_requires_both_fields() {
        let live = vec![
            ChapterRef::new("1.1 Intro", "toChapter(9)"),
            ChapterRef::new("1.2 Intro", "toChapter(1)"),
        ];
        let target = ChapterRef::new("1.1 Intro", "toChapter(1)");
        assert_eq!(first_match(&live, &target), None);
    }

    #[test]
    fn test_task_stats() {
        let task = |kind, finished| Task {
            kind,
            frame_locator: nth_frame_locator(kind, 1),
            finished,
            title: String::from("t"),
            index: 1,
        };
        let tasks = vec![
            task(TaskKind::Document, true),
            task(TaskKind::Video, false),
            task(TaskKind::Unknown, false),
        ];
        let stats = TaskStats::collect(&tasks);
        assert_eq!(stats.finished, 1);
        assert_eq!(stats.unfinished, 2);
        assert_eq!(stats.documents, 1);
        assert_eq!(stats.videos, 1);
        assert_eq!(stats.unknown, 1);
    }
}
