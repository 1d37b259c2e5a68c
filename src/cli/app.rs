use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;
use tracing::{debug, error, info};
use wd_adapter::BrowserSession;

use super::env::CliArgs;
use super::runtime::{apply_cli_overrides, init_logging, load_config, LoadedConfig};
use crate::runner::Pilot;

pub async fn run() -> Result<()> {
    let cli = CliArgs::parse();
    let _log_guard = init_logging(&cli.log_level, cli.debug)?;

    info!("Starting moocpilot v{}", env!("CARGO_PKG_VERSION"));

    let LoadedConfig { mut config, .. } = load_config(cli.config.as_ref()).await?;
    apply_cli_overrides(&mut config, &cli);

    let session = match BrowserSession::connect(&config.adapter_config()).await {
        Ok(session) => session,
        Err(err) => {
            error!("Failed to establish a browser session: {err}");
            wait_for_ack();
            return Err(err.into());
        }
    };

    // The one top-level catch: everything below reports here, and the
    // session is closed no matter how the run went.
    let outcome = Pilot::new(&session, &config).run().await;
    match &outcome {
        Ok(()) => info!("Run completed"),
        Err(err) => {
            error!("Run failed: {err}");
            debug!("{err:?}");
        }
    }

    wait_for_ack();
    if let Err(err) = session.quit().await {
        error!("Failed to close the browser session: {err}");
    }

    outcome.map_err(Into::into)
}

/// Keep the browser inspectable until the user acknowledges.
fn wait_for_ack() {
    println!("Press Enter to exit...");
    let _ = io::stdout().flush();
    let mut line = String::new();
    let _ = io::stdin().read_line(&mut line);
}
