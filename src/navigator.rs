//! Course outline navigation.
//!
//! The platform re-renders the outline between navigations, so a live
//! chapter element is only trusted for the one interaction it was just
//! resolved for. Across navigations, a chapter is identified purely by
//! its (title, activation handler) pair.

use moocpilot_core_types::{first_match, ChapterRef};
use tracing::{debug, info, warn};
use url::Url;
use wd_adapter::{BrowserSession, By, WebElement};

use crate::errors::PilotError;
use crate::selectors;

pub struct Navigator<'a> {
    session: &'a BrowserSession,
    course_url: Url,
    chapters: Vec<ChapterRef>,
    cursor: usize,
}

impl<'a> Navigator<'a> {
    pub fn new(session: &'a BrowserSession, course_url: Url) -> Self {
        Self {
            session,
            course_url,
            chapters: Vec::new(),
            cursor: 0,
        }
    }

    pub async fn open_course_page(&self) -> Result<(), PilotError> {
        self.session.goto(self.course_url.as_str()).await?;
        info!("course page opened");
        Ok(())
    }

    /// Enumerate the chapters that still have unviewed task points and
    /// cache their references. Returns how many were found.
    pub async fn initialize_unfinished(&mut self) -> Result<usize, PilotError> {
        info!("collecting unfinished chapters...");
        self.enter_chapter_frame().await?;
        let outcome = self.collect_unfinished().await;
        self.restore_quietly().await;

        self.chapters = outcome?;
        self.cursor = 0;
        Ok(self.chapters.len())
    }

    /// Activate the next cached chapter, re-resolving it against the
    /// live outline first. False once the cached list is drained.
    pub async fn advance_to_next(&mut self) -> Result<bool, PilotError> {
        while self.cursor < self.chapters.len() {
            let target = self.chapters[self.cursor].clone();
            self.cursor += 1;

            if self.activate(&target).await? {
                info!("chapter activated: {target}");
                return Ok(true);
            }
            warn!(chapter = %target, "cached chapter not on the live outline, skipping");
        }
        Ok(false)
    }

    async fn collect_unfinished(&self) -> Result<Vec<ChapterRef>, PilotError> {
        let driver = self.session.driver();
        self.session
            .waiter()
            .present(driver, By::ClassName(selectors::CHAPTER_ITEM_CLASS))
            .await?;

        let entries = driver
            .find_all(By::ClassName(selectors::CHAPTER_ITEM_CLASS))
            .await?;
        let mut chapters = Vec::new();
        for entry in &entries {
            let Some(chapter) = chapter_ref_of(entry).await? else {
                // Entries with no activation handler are collapsed
                // grouping rows, not chapters.
                continue;
            };
            let viewed = entry
                .find_all(By::ClassName(selectors::CHAPTER_DONE_CLASS))
                .await?;
            if !viewed.is_empty() {
                debug!(chapter = %chapter, "chapter already fully viewed");
                continue;
            }
            info!("unfinished chapter: {chapter}");
            chapters.push(chapter);
        }
        Ok(chapters)
    }

    async fn activate(&self, target: &ChapterRef) -> Result<bool, PilotError> {
        self.enter_chapter_frame().await?;
        let outcome = self.click_live_match(target).await;
        self.restore_quietly().await;
        outcome
    }

    async fn click_live_match(&self, target: &ChapterRef) -> Result<bool, PilotError> {
        let driver = self.session.driver();
        self.session
            .waiter()
            .present(driver, By::ClassName(selectors::CHAPTER_ITEM_CLASS))
            .await?;

        let entries = driver
            .find_all(By::ClassName(selectors::CHAPTER_ITEM_CLASS))
            .await?;
        let mut live = Vec::with_capacity(entries.len());
        for entry in &entries {
            // Grouping rows collapse to an empty ref; a cached target
            // always has a handler, so they can never match.
            live.push(
                chapter_ref_of(entry)
                    .await?
                    .unwrap_or_else(|| ChapterRef::new("", "")),
            );
        }

        match first_match(&live, target) {
            Some(index) => {
                entries[index].click().await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn enter_chapter_frame(&self) -> Result<(), PilotError> {
        let driver = self.session.driver();
        let frame = self
            .session
            .waiter()
            .present(driver, By::Id(selectors::CHAPTER_FRAME_ID))
            .await?;
        self.session.enter_frame(&frame).await?;
        Ok(())
    }

    async fn restore_quietly(&self) {
        if let Err(err) = self.session.restore_top().await {
            warn!(%err, "failed to restore the top-level context");
        }
    }
}

/// The (title, handler) pair of a live outline entry, or `None` for
/// presentation-only rows without an activation handler.
async fn chapter_ref_of(entry: &WebElement) -> Result<Option<ChapterRef>, PilotError> {
    let Some(handler) = entry.attr("onclick").await? else {
        return Ok(None);
    };
    if handler.trim().is_empty() {
        return Ok(None);
    }

    let title = match entry.attr("title").await? {
        Some(title) if !title.trim().is_empty() => title,
        _ => entry.text().await?.trim().to_string(),
    };
    Ok(Some(ChapterRef::new(title, handler)))
}
