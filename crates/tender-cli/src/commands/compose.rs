//! Preview a notification sentence without sending it.

use anyhow::bail;
use clap::Args;
use serde::Serialize;

use tender_entity::notification::{Direction, TenderAction};
use tender_service::{MessageChoice, MessageComposer};

use crate::output::{self, OutputFormat};

/// Arguments for the compose command
#[derive(Debug, Args)]
pub struct ComposeArgs {
    /// Action: ARRIVED, DEPARTED, or ARRIVING
    #[arg(short, long)]
    pub action: Option<String>,

    /// Direction: SHORESIDE or SHIPSIDE
    #[arg(short, long)]
    pub direction: Option<String>,

    /// Tender label, e.g. "Tender 2"
    #[arg(short, long, default_value = "")]
    pub tender: String,

    /// Custom text; replaces the templated sentence
    #[arg(long)]
    pub custom: Option<String>,
}

#[derive(Debug, Serialize)]
struct Composed {
    choice: MessageChoice,
    message: String,
}

/// Execute the compose command
pub fn execute(args: &ComposeArgs, config_path: &str, format: OutputFormat) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let composer = MessageComposer::from_config(&config.console);

    let choice = match args.custom.as_deref().filter(|t| !t.trim().is_empty()) {
        Some(text) => MessageChoice::Custom {
            text: text.to_string(),
        },
        None => MessageChoice::Templated {
            action: args.action.as_deref().map(str::parse::<TenderAction>).transpose()?,
            direction: args.direction.as_deref().map(str::parse::<Direction>).transpose()?,
            tender: args.tender.clone(),
        },
    };

    let message = composer.compose_choice(&choice);
    if message.is_empty() {
        bail!("Select both --action and --direction, or pass --custom text");
    }

    match format {
        OutputFormat::Table => println!("{message}"),
        OutputFormat::Json => output::print_json(&Composed { choice, message }),
    }
    Ok(())
}
