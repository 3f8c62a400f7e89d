//! Guest notification management commands.

use anyhow::Context;
use clap::{Args, Subcommand};
use dialoguer::Confirm;
use serde::Serialize;
use tabled::Tabled;

use tender_core::types::NotificationId;
use tender_entity::notification::Notification;
use tender_service::{MessageComposer, NotificationBroadcaster, PortDayService};

use crate::output::{self, OutputFormat};

/// Arguments for notification commands
#[derive(Debug, Args)]
pub struct NotificationArgs {
    /// Notification subcommand
    #[command(subcommand)]
    pub command: NotificationCommand,
}

/// Notification subcommands
#[derive(Debug, Subcommand)]
pub enum NotificationCommand {
    /// List the most recent notifications, newest first
    List {
        /// Maximum number to show; defaults to the live feed size
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Delete one notification
    Delete {
        /// Notification ID
        id: NotificationId,
    },
    /// Delete every notification
    Clear {
        /// Skip confirmation
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct NotificationRow {
    id: String,
    time: String,
    message: String,
    tender: String,
}

impl From<&Notification> for NotificationRow {
    fn from(n: &Notification) -> Self {
        Self {
            id: n.id.to_string(),
            time: n.display_time().unwrap_or_else(|| "-".to_string()),
            message: n.message.clone(),
            tender: if n.tender.is_empty() {
                "-".to_string()
            } else {
                n.tender.clone()
            },
        }
    }
}

/// Execute notification commands
pub async fn execute(
    args: &NotificationArgs,
    config_path: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let store = super::open_store(&config).await?;
    let broadcaster = NotificationBroadcaster::new(
        store.notifications.clone(),
        PortDayService::new(store.port_days.clone()),
        MessageComposer::from_config(&config.console),
        config.realtime.feed_limit,
    );

    let result = async {
        match &args.command {
            NotificationCommand::List { limit } => {
                let list = broadcaster
                    .latest(limit.unwrap_or(config.realtime.feed_limit))
                    .await?;
                match format {
                    OutputFormat::Json => output::print_json(&list),
                    OutputFormat::Table => {
                        let rows: Vec<NotificationRow> = list.iter().map(NotificationRow::from).collect();
                        output::print_list(&rows, format);
                    }
                }
            }
            NotificationCommand::Delete { id } => {
                broadcaster.delete(*id).await?;
                output::print_success(&format!("Notification {id} deleted"));
            }
            NotificationCommand::Clear { yes } => {
                if !yes {
                    let confirm = Confirm::new()
                        .with_prompt("Delete ALL guest notifications? This cannot be undone.")
                        .default(false)
                        .interact()
                        .context("Failed to read confirmation")?;
                    if !confirm {
                        println!("Cancelled.");
                        return Ok(());
                    }
                }
                let removed = broadcaster.clear_all().await?;
                output::print_success(&format!("{removed} notification(s) deleted"));
            }
        }
        Ok::<(), anyhow::Error>(())
    }
    .await;

    store.close().await;
    result
}
