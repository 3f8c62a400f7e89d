//! Guest feedback analytics commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use tender_service::FeedbackService;
use tender_service::feedback::{CommentEntry, ServiceStats};

use crate::output::{self, OutputFormat};

/// Arguments for feedback commands
#[derive(Debug, Args)]
pub struct FeedbackArgs {
    /// Feedback subcommand
    #[command(subcommand)]
    pub command: FeedbackCommand,
}

/// Feedback subcommands
#[derive(Debug, Subcommand)]
pub enum FeedbackCommand {
    /// Rating statistics per service
    Summary,
    /// Guest comments, newest first
    Comments {
        /// Only comments from this UTC day, YYYY-MM-DD
        #[arg(short, long)]
        date: Option<String>,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct StatsRow {
    service: String,
    count: usize,
    average: String,
    #[tabled(rename = "1★")]
    one: usize,
    #[tabled(rename = "2★")]
    two: usize,
    #[tabled(rename = "3★")]
    three: usize,
    #[tabled(rename = "4★")]
    four: usize,
    #[tabled(rename = "5★")]
    five: usize,
}

impl From<&ServiceStats> for StatsRow {
    fn from(s: &ServiceStats) -> Self {
        let [one, two, three, four, five] = s.distribution;
        Self {
            service: s.label.clone(),
            count: s.count,
            average: format!("{:.2}", s.average),
            one,
            two,
            three,
            four,
            five,
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
struct CommentRow {
    date: String,
    comment: String,
}

impl From<&CommentEntry> for CommentRow {
    fn from(c: &CommentEntry) -> Self {
        Self {
            date: c.date.clone().unwrap_or_else(|| "-".to_string()),
            comment: c.comment.clone(),
        }
    }
}

/// Execute feedback commands
pub async fn execute(args: &FeedbackArgs, config_path: &str, format: OutputFormat) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let store = super::open_store(&config).await?;
    let service = FeedbackService::new(store.feedback.clone());

    let result = async {
        match &args.command {
            FeedbackCommand::Summary => {
                let summary = service.summary().await?;
                match format {
                    OutputFormat::Json => output::print_json(&summary),
                    OutputFormat::Table => {
                        output::print_kv("Feedback records", &summary.total_records.to_string());
                        output::print_kv("Days with comments", &summary.comment_dates.len().to_string());
                        let rows = [StatsRow::from(&summary.website), StatsRow::from(&summary.tender)];
                        output::print_list(&rows, format);
                    }
                }
            }
            FeedbackCommand::Comments { date } => {
                let comments = match date {
                    Some(day) => service.comments_on(day).await?,
                    None => service.summary().await?.comments,
                };
                match format {
                    OutputFormat::Json => output::print_json(&comments),
                    OutputFormat::Table => {
                        let rows: Vec<CommentRow> = comments.iter().map(CommentRow::from).collect();
                        output::print_list(&rows, format);
                    }
                }
            }
        }
        Ok::<(), anyhow::Error>(())
    }
    .await;

    store.close().await;
    result
}
