//! Database migration management commands.

use anyhow::{Context, bail};
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use tender_core::config::database::PROVIDER_POSTGRES;
use tender_database::DatabasePool;
use tender_database::migration;

use crate::output::{self, OutputFormat};

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
    /// Show migration status
    Status,
}

#[derive(Debug, Serialize, Tabled)]
struct MigrationRow {
    version: i64,
    description: String,
    applied: bool,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config_path: &str) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    if config.database.provider != PROVIDER_POSTGRES {
        bail!(
            "Migrations apply to the postgres store only (database.provider = \"{}\")",
            config.database.provider
        );
    }
    let pool = DatabasePool::connect(&config.database)
        .await
        .context("Failed to connect to PostgreSQL")?;

    let result = async {
        match &args.command {
            MigrateCommand::Run => {
                println!("Running database migrations...");
                migration::run_migrations(pool.pool()).await?;
                output::print_success("All migrations applied successfully.");
            }
            MigrateCommand::Status => {
                let rows: Vec<MigrationRow> = migration::migration_status(pool.pool())
                    .await?
                    .into_iter()
                    .map(|m| MigrationRow {
                        version: m.version,
                        description: m.description,
                        applied: m.applied,
                    })
                    .collect();
                output::print_list(&rows, OutputFormat::Table);
            }
        }
        Ok::<(), anyhow::Error>(())
    }
    .await;

    pool.close().await;
    result
}
