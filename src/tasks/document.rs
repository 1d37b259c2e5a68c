//! Document task driver.
//!
//! The platform counts a document read once its last rendered page has
//! been scrolled into view, so only the last page image is driven; the
//! incremental scroll keeps the pace within what the platform accepts
//! as reading.

use std::time::Duration;

use async_trait::async_trait;
use moocpilot_core_types::{Task, TaskKind};
use serde_json::json;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};
use wd_adapter::{BrowserSession, By};

use crate::errors::PilotError;
use crate::selectors;
use crate::tasks::TaskDriver;

const SCROLL_STEP_PX: i64 = 100;
const SCROLL_PAUSE: Duration = Duration::from_millis(200);
/// Rendering of the page images lags the frame becoming available.
const RENDER_SETTLE: Duration = Duration::from_secs(5);

#[derive(Default)]
pub struct DocumentDriver;

#[async_trait]
impl TaskDriver for DocumentDriver {
    fn kind(&self) -> TaskKind {
        TaskKind::Document
    }

    async fn run(&self, session: &BrowserSession, task: &Task) -> Result<(), PilotError> {
        info!("reading document: {}", task.title);
        let locator = task.frame_locator.as_deref().ok_or_else(|| {
            PilotError::Structure("document task has no frame locator".to_string())
        })?;

        let driver = session.driver();
        let content = session
            .waiter()
            .present(driver, By::Id(selectors::CONTENT_FRAME_ID))
            .await?;
        session.enter_frame(&content).await?;

        let outcome = read_pages(session, locator).await;

        // Unwind all three levels regardless of where the descent
        // stopped; the final default-content switch resets any mismatch.
        for _ in 0..2 {
            if let Err(err) = session.enter_parent_frame().await {
                warn!(%err, "failed to return to the parent frame");
            }
        }
        if let Err(err) = session.restore_top().await {
            warn!(%err, "failed to restore the top-level context");
        }

        outcome
    }
}

async fn read_pages(session: &BrowserSession, locator: &str) -> Result<(), PilotError> {
    let driver = session.driver();
    let waiter = session.waiter();

    debug!(locator, "descending into the document viewer frame");
    let doc_frame = waiter.present(driver, By::XPath(locator)).await?;
    session.enter_frame(&doc_frame).await?;

    let pan_view = waiter
        .present(driver, By::Id(selectors::DOC_VIEW_FRAME_ID))
        .await?;
    session.enter_frame(&pan_view).await?;

    debug!("waiting for document content to render...");
    sleep(RENDER_SETTLE).await;

    if let Err(err) = waiter
        .present(driver, By::ClassName(selectors::DOC_FILEBOX_CLASS))
        .await
    {
        error!("document page container never appeared: {err}");
        return Ok(());
    }

    let images = driver.find_all(By::Css(selectors::DOC_PAGE_IMAGES_CSS)).await?;
    let Some(last) = images.last() else {
        warn!("no rendered pages found");
        return Ok(());
    };
    info!("found {} rendered pages, reading the last one", images.len());

    last.scroll_into_view().await?;
    sleep(Duration::from_secs(1)).await;

    let height = session
        .execute_f64("return arguments[0].offsetHeight;", vec![last.to_json()?])
        .await? as i64;
    let start = session
        .execute_f64("return window.pageYOffset;", vec![])
        .await? as i64;

    let mut position = start;
    while position < start + height {
        session
            .execute_json("window.scrollTo(0, arguments[0]);", vec![json!(position)])
            .await?;
        sleep(SCROLL_PAUSE).await;
        position += SCROLL_STEP_PX;
    }
    session
        .execute_json(
            "window.scrollTo(0, document.documentElement.scrollHeight);",
            vec![],
        )
        .await?;
    sleep(Duration::from_secs(2)).await;

    info!("document read");
    Ok(())
}
