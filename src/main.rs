use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    moocpilot_cli::cli::app::run().await
}
