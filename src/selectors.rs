//! The platform-owned markup contract.
//!
//! Every selector below addresses markup the MOOC platform renders and
//! can change without notice. A lookup that stops matching is an
//! external-interface break, so the literals live here in one place
//! rather than scattered through the components.

/// Landing page that hosts the login entry and receives the cookies.
pub const PORTAL_URL: &str = "https://mooc.ucas.edu.cn/";

/// Login entry link on the landing page; present only while logged out,
/// which doubles as the authentication probe.
pub const LOGIN_ENTRY_XPATH: &str = "/html/body/div[1]/div[1]/div/a";

pub const LOGIN_USERNAME_XPATH: &str =
    "/html/body/div/section/div[2]/div/div[1]/div/div[1]/div/form[2]/div[1]/div/div/div[1]/input";
pub const LOGIN_PASSWORD_XPATH: &str =
    "/html/body/div/section/div[2]/div/div[1]/div/div[1]/div/form[2]/div[1]/div/div/div[2]/input";
pub const LOGIN_SUBMIT_XPATH: &str =
    "/html/body/div/section/div[2]/div/div[1]/div/div[1]/div/form[2]/div[3]/div/div/button";

/// Frame that renders the chapter outline on the course page.
pub const CHAPTER_FRAME_ID: &str = "frame_content-zj";

/// One chapter entry in the outline.
pub const CHAPTER_ITEM_CLASS: &str = "chapter_item";

/// Marker inside a chapter entry meaning every task point is viewed.
pub const CHAPTER_DONE_CLASS: &str = "icon_yiwanc";

/// Header that appears once a chapter's content page has loaded.
pub const CHAPTER_HEADER_CLASS: &str = "prev_title_pos";

/// Frame that renders a chapter's content, including task points.
pub const CONTENT_FRAME_ID: &str = "iframe";

/// Task point marker inside the content frame.
pub const TASK_MARKER_CLASS: &str = "ans-job-icon";

/// Class on a task marker's parent meaning the platform counts it done.
pub const TASK_FINISHED_CLASS: &str = "ans-job-finished";

/// Inner frame of the document viewer that holds the rendered pages.
pub const DOC_VIEW_FRAME_ID: &str = "panView";

/// Container of the rendered page images.
pub const DOC_FILEBOX_CLASS: &str = "fileBox";

/// The rendered page images themselves.
pub const DOC_PAGE_IMAGES_CSS: &str = ".fileBox img";

pub const VIDEO_PLAY_BUTTON_CLASS: &str = "vjs-big-play-button";
pub const VIDEO_MEDIA_ID: &str = "video_html5_api";
pub const VIDEO_MUTE_CONTROL_CLASS: &str = "vjs-mute-control";

/// Volume-control class present while the player is unmuted.
pub const VIDEO_UNMUTED_CLASS: &str = "vjs-vol-3";
