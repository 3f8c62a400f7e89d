//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use tender_core::config::AppConfig;
use tender_database::connection::mask_password;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration with secrets masked
    Show,
    /// Validate the configuration file
    Validate,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, config_path: &str, format: OutputFormat) -> anyhow::Result<()> {
    match &args.command {
        ConfigCommand::Show => {
            let config = redacted(super::load_config(config_path)?);
            match format {
                OutputFormat::Json => output::print_json(&config),
                OutputFormat::Table => {
                    output::print_kv("server", &format!("{}:{}", config.server.host, config.server.port));
                    output::print_kv("database.provider", &config.database.provider);
                    output::print_kv("database.url", &config.database.url);
                    output::print_kv("auth.provider", &config.auth.provider);
                    output::print_kv("auth.allowed_email_domain", &config.auth.allowed_email_domain);
                    output::print_kv("auth.allowed_federated_email", &config.auth.allowed_federated_email);
                    output::print_kv("auth.public_base_url", &config.auth.public_base_url);
                    output::print_kv("realtime.feed_limit", &config.realtime.feed_limit.to_string());
                    output::print_kv("console.vessel_name", &config.console.vessel_name);
                    output::print_kv("console.tender_labels", &config.console.tender_labels.join(", "));
                    output::print_kv("logging", &format!("{} ({})", config.logging.level, config.logging.format));
                }
            }
        }
        ConfigCommand::Validate => {
            let config = super::load_config(config_path)?;
            output::print_success(&format!("Configuration '{config_path}' is valid"));
            output::print_kv("Server", &format!("{}:{}", config.server.host, config.server.port));
            output::print_kv("Store", &config.database.provider);
            output::print_kv("Database", &mask_password(&config.database.url));
            output::print_kv("Identity provider", &config.auth.provider);
        }
    }
    Ok(())
}

fn redacted(mut config: AppConfig) -> AppConfig {
    config.database.url = mask_password(&config.database.url);
    if !config.auth.api_key.is_empty() {
        config.auth.api_key = "****".to_string();
    }
    config.auth.session_secret = "****".to_string();
    config
}
