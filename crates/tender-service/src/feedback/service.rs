//! One-shot read of the `guestFeedback` collection.

use std::sync::Arc;

use tracing::{debug, error};

use tender_core::error::AppError;
use tender_database::repositories::FeedbackRepository;

use super::aggregate::{CommentEntry, FeedbackSummary, aggregate};

/// Loads and aggregates guest feedback.
#[derive(Debug, Clone)]
pub struct FeedbackService {
    repo: Arc<dyn FeedbackRepository>,
}

impl FeedbackService {
    /// Creates a new feedback service.
    pub fn new(repo: Arc<dyn FeedbackRepository>) -> Self {
        Self { repo }
    }

    /// Read every record and compute the analytics summary.
    pub async fn summary(&self) -> Result<FeedbackSummary, AppError> {
        let records = self.repo.find_all().await.map_err(|e| {
            error!(error = %e, "Failed to load feedback");
            AppError::with_source(e.kind, "Failed to load feedback data.", e)
        })?;
        debug!(count = records.len(), "Loaded feedback records");
        Ok(aggregate(&records))
    }

    /// Comments for one `YYYY-MM-DD` UTC day, newest first.
    pub async fn comments_on(&self, date: &str) -> Result<Vec<CommentEntry>, AppError> {
        if chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
            return Err(AppError::validation(format!(
                "'{date}' is not a YYYY-MM-DD date"
            )));
        }
        Ok(self.summary().await?.comments_on(date))
    }
}
