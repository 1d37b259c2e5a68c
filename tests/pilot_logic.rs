//! Integration tests for the browser-independent pilot logic.

use moocpilot_cli::core_types::{first_match, ChapterRef, LocatorCounter, Task, TaskKind};
use moocpilot_cli::{skip_reason, Config};

fn task(kind: TaskKind, finished: bool, locator: Option<String>) -> Task {
    Task {
        kind,
        frame_locator: locator,
        finished,
        title: "task".to_string(),
        index: 1,
    }
}

/// A chapter holding document, video, document in that order must get
/// per-type positional locators, with the audio insert left unclaimed.
#[test]
fn test_enumeration_order_assigns_per_type_locators() {
    let frame_classes = [
        "ans-attach-online insertdoc-online-pdf",
        "ans-insertvideo-online",
        "ans-insertaudio-online",
        "insertdoc-online-pdf full",
    ];

    let mut counter = LocatorCounter::new();
    let assigned: Vec<_> = frame_classes
        .iter()
        .map(|class| {
            let kind = TaskKind::from_frame_class(class);
            (kind, counter.next(kind))
        })
        .collect();

    assert_eq!(assigned[0].0, TaskKind::Document);
    assert_eq!(
        assigned[0].1.as_deref(),
        Some("(//iframe[contains(@class, 'insertdoc-online-pdf')])[1]")
    );
    assert_eq!(assigned[1].0, TaskKind::Video);
    assert_eq!(
        assigned[1].1.as_deref(),
        Some("(//iframe[contains(@class, 'ans-insertvideo-online')])[1]")
    );
    assert_eq!(assigned[2].0, TaskKind::Unknown);
    assert_eq!(assigned[2].1, None);
    assert_eq!(assigned[3].0, TaskKind::Document);
    assert_eq!(
        assigned[3].1.as_deref(),
        Some("(//iframe[contains(@class, 'insertdoc-online-pdf')])[2]")
    );
}

/// Default policy: platform-finished tasks are skipped, everything else
/// runs, and unrecognized kinds pass through for dispatch to report.
#[test]
fn test_skip_policy_over_a_mixed_chapter() {
    let config = Config::default();
    let chapter = vec![
        task(TaskKind::Document, true, None),
        task(TaskKind::Video, false, None),
        task(TaskKind::Unknown, false, None),
    ];

    let skipped: Vec<_> = chapter
        .iter()
        .map(|t| skip_reason(&config, t).is_some())
        .collect();
    assert_eq!(skipped, vec![true, false, false]);
}

#[test]
fn test_duplicate_chapter_entries_resolve_to_the_first() {
    let target = ChapterRef::new("2.3 Fourier series", "toChapter(23)");
    let live = vec![
        ChapterRef::new("", ""),
        ChapterRef::new("2.3 Fourier series", "toChapter(23)"),
        ChapterRef::new("2.3 Fourier series", "toChapter(23)"),
    ];
    assert_eq!(first_match(&live, &target), Some(1));

    let gone = ChapterRef::new("2.4 Laplace", "toChapter(24)");
    assert_eq!(first_match(&live, &gone), None);
}

#[test]
fn test_full_config_document() {
    let config: Config = serde_yaml::from_str(
        r#"
username: alice
password: hunter2
course_url: https://mooc.ucas.edu.cn/course/42
webdriver_url: http://localhost:4444
cookie_file: /tmp/moocpilot-cookies.json
skip_finished: false
skip_document: true
wait_timeout_secs: 30
poll_interval_ms: 250
"#,
    )
    .unwrap();

    assert_eq!(config.username.as_deref(), Some("alice"));
    assert!(!config.skip_finished);
    assert!(config.skip_document);
    assert!(!config.skip_video);
    assert_eq!(config.course_url().unwrap().path(), "/course/42");

    let adapter = config.adapter_config();
    assert_eq!(adapter.webdriver_url, "http://localhost:4444");
    assert_eq!(adapter.wait_timeout.as_secs(), 30);
}
