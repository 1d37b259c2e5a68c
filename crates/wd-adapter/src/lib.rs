//! WebDriver adapter for moocpilot.
//!
//! Owns the browser automation boundary: one WebDriver session against a
//! chromedriver endpoint, bounded explicit waits, frame-context switching,
//! scripted evaluation, and the persisted cookie blob. Higher layers reach
//! the client crate only through the re-exports below.

pub mod config;
pub mod cookies;
pub mod error;
pub mod session;
pub mod wait;

pub use config::AdapterConfig;
pub use cookies::CookieStore;
pub use error::AdapterError;
pub use session::BrowserSession;
pub use wait::Waiter;

// Client types the upper layers address elements and cookies with.
pub use thirtyfour::error::WebDriverError;
pub use thirtyfour::{By, Cookie, WebDriver, WebElement};
