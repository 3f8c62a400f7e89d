//! CLI command definitions and dispatch.

pub mod compose;
pub mod config;
pub mod feedback;
pub mod migrate;
pub mod notifications;
pub mod port_day;
pub mod serve;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tender_core::config::AppConfig;
use tender_core::config::logging::LoggingConfig;
use tender_database::DocumentStore;

use crate::output::OutputFormat;

/// Tender console administration
#[derive(Debug, Parser)]
#[command(name = "tender", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml", global = true)]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the console server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Configuration management
    Config(config::ConfigArgs),
    /// Preview the sentence a notification would carry
    Compose(compose::ComposeArgs),
    /// Port day management
    PortDay(port_day::PortDayArgs),
    /// Guest notification management
    Notifications(notifications::NotificationArgs),
    /// Guest feedback analytics
    Feedback(feedback::FeedbackArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> anyhow::Result<()> {
        if !matches!(self.command, Commands::Serve(_)) {
            init_logging(&LoggingConfig {
                level: "warn".to_string(),
                format: "pretty".to_string(),
            });
        }
        match &self.command {
            Commands::Serve(args) => serve::execute(args, &self.config).await,
            Commands::Migrate(args) => migrate::execute(args, &self.config).await,
            Commands::Config(args) => config::execute(args, &self.config, self.format),
            Commands::Compose(args) => compose::execute(args, &self.config, self.format),
            Commands::PortDay(args) => port_day::execute(args, &self.config, self.format).await,
            Commands::Notifications(args) => {
                notifications::execute(args, &self.config, self.format).await
            }
            Commands::Feedback(args) => feedback::execute(args, &self.config, self.format).await,
        }
    }
}

/// Helper: load configuration from file and environment
pub fn load_config(config_path: &str) -> anyhow::Result<AppConfig> {
    AppConfig::load(config_path)
        .with_context(|| format!("Failed to load configuration from '{config_path}'"))
}

/// Helper: open the configured document store
pub async fn open_store(config: &AppConfig) -> anyhow::Result<DocumentStore> {
    if config.database.provider == tender_core::config::database::PROVIDER_MEMORY {
        crate::output::print_warning(
            "database.provider is \"memory\"; this command works on an empty, temporary store",
        );
    }
    DocumentStore::connect(&config.database)
        .await
        .context("Failed to open the document store")
}

/// Initialize tracing once for the process.
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    let result = match config.format.as_str() {
        "json" => builder.json().try_init(),
        _ => builder.try_init(),
    };
    if let Err(e) = result {
        eprintln!("Logging already initialized: {e}");
    }
}
