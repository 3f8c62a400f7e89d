//! Port day management commands.

use anyhow::Context;
use clap::{Args, Subcommand};
use dialoguer::{Confirm, Input};
use serde::Serialize;
use tabled::Tabled;

use tender_core::types::PortDayId;
use tender_entity::port_day::{PierLocation, PortDay};
use tender_service::PortDayInput;
use tender_service::PortDayService;
use tender_service::port_day::PORT_CONFIRMATION;

use crate::output::{self, OutputFormat};

/// Arguments for port day commands
#[derive(Debug, Args)]
pub struct PortDayArgs {
    /// Port day subcommand
    #[command(subcommand)]
    pub command: PortDayCommand,
}

/// Port day subcommands
#[derive(Debug, Subcommand)]
pub enum PortDayCommand {
    /// Show the active port day
    Active,
    /// List every port day, most recent first
    List,
    /// Start a new port day, ending the active one
    Create {
        /// Port name
        #[arg(long)]
        name: String,
        /// Pier latitude
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Pier longitude
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        /// Average tender ride in minutes
        #[arg(long)]
        avg_time: i64,
        /// UTC offset, e.g. "+2", "-3", "5.5"
        #[arg(long, allow_hyphen_values = true)]
        timezone: String,
        /// Last tender back, HH:MM
        #[arg(long)]
        last_tender_time: Option<String>,
        /// Skip the PORT confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// End a port day
    End {
        /// Port day ID
        id: PortDayId,
        /// Skip confirmation
        #[arg(long)]
        yes: bool,
    },
}

/// Port day display row
#[derive(Debug, Serialize, Tabled)]
struct PortDayRow {
    id: String,
    name: String,
    active: bool,
    started: String,
    timezone: String,
    pier: String,
    avg_time: String,
    last_tender: String,
}

impl From<&PortDay> for PortDayRow {
    fn from(day: &PortDay) -> Self {
        Self {
            id: day.id.to_string(),
            name: day.name.clone(),
            active: day.is_active,
            started: day.start_date.format("%Y-%m-%d %H:%M UTC").to_string(),
            timezone: utc_label(day),
            pier: day
                .pier_location
                .map(|p| format!("{:.5}, {:.5}", p.lat, p.lng))
                .unwrap_or_else(|| "-".to_string()),
            avg_time: day
                .avg_time
                .map(|m| format!("{m} min"))
                .unwrap_or_else(|| "-".to_string()),
            last_tender: day
                .last_tender_time
                .map(|t| t.format("%H:%M").to_string())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

fn utc_label(day: &PortDay) -> String {
    let offset = day.utc_offset();
    if offset.hours() < 0.0 {
        format!("UTC{offset}")
    } else {
        format!("UTC+{offset}")
    }
}

fn print_days(days: &[PortDay], format: OutputFormat) {
    match format {
        OutputFormat::Json => output::print_json(days),
        OutputFormat::Table => {
            let rows: Vec<PortDayRow> = days.iter().map(PortDayRow::from).collect();
            output::print_list(&rows, format);
        }
    }
}

/// Execute port day commands
pub async fn execute(args: &PortDayArgs, config_path: &str, format: OutputFormat) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let store = super::open_store(&config).await?;
    let service = PortDayService::new(store.port_days.clone());

    let result = async {
        match &args.command {
            PortDayCommand::Active => match service.active_port_day().await? {
                Some(day) => print_days(&[day], format),
                None => output::print_warning("No active port day."),
            },
            PortDayCommand::List => print_days(&service.list().await?, format),
            PortDayCommand::Create {
                name,
                lat,
                lng,
                avg_time,
                timezone,
                last_tender_time,
                yes,
            } => {
                let input = PortDayInput {
                    name: Some(name.clone()),
                    pier_location: Some(PierLocation { lat: *lat, lng: *lng }),
                    avg_time: Some(*avg_time),
                    last_tender_time: last_tender_time.clone(),
                    timezone: Some(serde_json::Value::String(timezone.clone())),
                };
                // Surface field errors before asking for confirmation.
                input.validate()?;

                let confirmation = if *yes {
                    PORT_CONFIRMATION.to_string()
                } else {
                    Input::<String>::new()
                        .with_prompt(format!(
                            "Creating a port day ends the active one. Type {PORT_CONFIRMATION} to confirm"
                        ))
                        .allow_empty(true)
                        .interact_text()
                        .context("Failed to read confirmation")?
                };

                let day = service.create(&input, &confirmation).await?;
                output::print_success(&format!("Port day '{}' created ({})", day.name, day.id));
                print_days(&[day], format);
            }
            PortDayCommand::End { id, yes } => {
                if !yes {
                    let confirm = Confirm::new()
                        .with_prompt(format!("End port day {id}? Guests will no longer see its status."))
                        .default(false)
                        .interact()
                        .context("Failed to read confirmation")?;
                    if !confirm {
                        println!("Cancelled.");
                        return Ok(());
                    }
                }
                service.end(*id).await?;
                output::print_success(&format!("Port day {id} ended"));
            }
        }
        Ok::<(), anyhow::Error>(())
    }
    .await;

    store.close().await;
    result
}
