use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    pub log_level: String,

    /// Enable debug mode
    #[arg(short, long)]
    pub debug: bool,

    /// Platform account, overriding the config file
    #[arg(long)]
    pub username: Option<String>,

    /// Platform password, overriding the config file
    #[arg(long)]
    pub password: Option<String>,

    /// Course landing page, overriding the config file
    #[arg(long)]
    pub course_url: Option<String>,

    /// Chromedriver endpoint, overriding the config file
    #[arg(long)]
    pub webdriver_url: Option<String>,
}
