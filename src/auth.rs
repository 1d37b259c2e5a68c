//! Session establishment.
//!
//! Tries the persisted cookie blob first; only when the platform still
//! shows its login prompt afterwards does the scripted credential login
//! run. Credentials come from configuration or, failing that, from an
//! interactive prompt.

use std::io::{self, Write};
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info};
use wd_adapter::{BrowserSession, By, Cookie, CookieStore};

use crate::config::Config;
use crate::errors::PilotError;
use crate::selectors;

/// How long the platform gets to settle after cookie replay or form
/// submission before the login prompt is probed.
const LOGIN_SETTLE: Duration = Duration::from_secs(5);

pub struct Login<'a> {
    session: &'a BrowserSession,
    store: CookieStore,
}

impl<'a> Login<'a> {
    pub fn new(session: &'a BrowserSession, store: CookieStore) -> Self {
        Self { session, store }
    }

    /// Leave the browser session authenticated, or fail the run.
    pub async fn establish(&self, config: &Config) -> Result<(), PilotError> {
        if let Some(cookies) = self.store.load::<Vec<Cookie>>()? {
            info!("found persisted cookies, attempting cookie login...");
            if self.restore(cookies).await? {
                info!("cookie login succeeded");
                return Ok(());
            }
            info!("persisted cookies no longer authenticate, falling back to credential login...");
        }

        let (username, password) = resolve_credentials(config)?;
        self.scripted_login(&username, &password).await
    }

    /// Replay persisted cookies and probe whether the login prompt is
    /// gone. True means the session is authenticated.
    async fn restore(&self, cookies: Vec<Cookie>) -> Result<bool, PilotError> {
        self.session.goto(selectors::PORTAL_URL).await?;
        let applied = self.session.apply_cookies(cookies).await;
        debug!(applied, "persisted cookies applied");
        self.session.refresh().await?;
        sleep(LOGIN_SETTLE).await;

        let prompts = self
            .session
            .driver()
            .find_all(By::XPath(selectors::LOGIN_ENTRY_XPATH))
            .await?;
        Ok(prompts.is_empty())
    }

    async fn scripted_login(&self, username: &str, password: &str) -> Result<(), PilotError> {
        info!("starting credential login...");
        self.session.goto(selectors::PORTAL_URL).await?;

        let driver = self.session.driver();
        let waiter = self.session.waiter();

        let entry = waiter
            .clickable(driver, By::XPath(selectors::LOGIN_ENTRY_XPATH))
            .await
            .map_err(|err| PilotError::Login(format!("login entry not found: {err}")))?;
        entry.click().await?;

        let username_input = waiter
            .present(driver, By::XPath(selectors::LOGIN_USERNAME_XPATH))
            .await
            .map_err(|err| PilotError::Login(format!("login form did not appear: {err}")))?;
        let password_input = driver.find(By::XPath(selectors::LOGIN_PASSWORD_XPATH)).await?;

        username_input.send_keys(username).await?;
        password_input.send_keys(password).await?;

        let submit = driver.find(By::XPath(selectors::LOGIN_SUBMIT_XPATH)).await?;
        submit.click().await?;
        sleep(LOGIN_SETTLE).await;

        let cookies = self.session.capture_cookies().await?;
        self.store.save(&cookies)?;
        info!("login complete, cookies persisted");
        Ok(())
    }
}

fn resolve_credentials(config: &Config) -> Result<(String, String), PilotError> {
    let username = match &config.username {
        Some(username) => username.clone(),
        None => prompt_line("Account: ")?,
    };
    let password = match &config.password {
        Some(password) => password.clone(),
        None => prompt_line("Password: ")?,
    };
    Ok((username, password))
}

fn prompt_line(label: &str) -> Result<String, PilotError> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
