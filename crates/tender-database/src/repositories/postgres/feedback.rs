use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use tender_core::result::AppResult;
use tender_core::types::FeedbackId;
use tender_entity::feedback::FeedbackRecord;

use super::db_error;
use crate::repositories::FeedbackRepository;

#[derive(Debug, FromRow)]
struct FeedbackRow {
    id: Uuid,
    website_rating: Option<serde_json::Value>,
    tender_rating: Option<serde_json::Value>,
    comments: Option<String>,
    submitted_at: Option<DateTime<Utc>>,
}

impl From<FeedbackRow> for FeedbackRecord {
    fn from(row: FeedbackRow) -> Self {
        Self {
            id: FeedbackId::from_uuid(row.id),
            website_rating: row.website_rating,
            tender_rating: row.tender_rating,
            comments: row.comments,
            timestamp: row.submitted_at,
        }
    }
}

/// PostgreSQL `guest_feedback` table.
#[derive(Debug, Clone)]
pub struct PgFeedbackRepository {
    pool: PgPool,
}

impl PgFeedbackRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeedbackRepository for PgFeedbackRepository {
    async fn find_all(&self) -> AppResult<Vec<FeedbackRecord>> {
        let rows = sqlx::query_as::<_, FeedbackRow>(
            "SELECT id, website_rating, tender_rating, comments, submitted_at FROM guest_feedback",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to read guest feedback"))?;
        Ok(rows.into_iter().map(FeedbackRecord::from).collect())
    }

    async fn insert(&self, record: &FeedbackRecord) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO guest_feedback (id, website_rating, tender_rating, comments, submitted_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(record.id.into_uuid())
        .bind(&record.website_rating)
        .bind(&record.tender_rating)
        .bind(&record.comments)
        .bind(record.timestamp)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to insert guest feedback"))?;
        Ok(())
    }
}
