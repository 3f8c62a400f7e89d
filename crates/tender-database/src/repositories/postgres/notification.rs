use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Offset, Utc};
use sqlx::{FromRow, PgPool};
use tracing::warn;
use uuid::Uuid;

use tender_core::result::AppResult;
use tender_core::types::{NotificationId, PortDayId};
use tender_entity::notification::Notification;

use super::db_error;
use crate::repositories::NotificationRepository;

const COLUMNS: &str = "id, message, action, direction, tender, timestamp_display, \
                       timestamp_sort, utc_offset_seconds, server_timestamp, port_day_id";

#[derive(Debug, FromRow)]
struct NotificationRow {
    id: Uuid,
    message: String,
    action: Option<String>,
    direction: Option<String>,
    tender: String,
    timestamp_display: Option<String>,
    timestamp_sort: Option<DateTime<Utc>>,
    utc_offset_seconds: Option<i32>,
    server_timestamp: Option<DateTime<Utc>>,
    port_day_id: Option<Uuid>,
}

impl From<NotificationRow> for Notification {
    fn from(row: NotificationRow) -> Self {
        let offset = row
            .utc_offset_seconds
            .and_then(FixedOffset::east_opt)
            .unwrap_or(Utc.fix());
        let action = row.action.as_deref().filter(|a| !a.is_empty()).and_then(|a| {
            a.parse()
                .inspect_err(|_| warn!(id = %row.id, action = a, "Unreadable stored action"))
                .ok()
        });
        let direction = row
            .direction
            .as_deref()
            .filter(|d| !d.is_empty())
            .and_then(|d| d.parse().ok());
        Self {
            id: NotificationId::from_uuid(row.id),
            message: row.message,
            action,
            direction,
            tender: row.tender,
            timestamp: row.timestamp_display,
            timestamp_sort: row.timestamp_sort.map(|t| t.with_timezone(&offset)),
            server_timestamp: row.server_timestamp,
            port_day_id: row.port_day_id.map(PortDayId::from_uuid),
        }
    }
}

/// PostgreSQL `guest_notifications` table.
#[derive(Debug, Clone)]
pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    async fn create(&self, n: &Notification) -> AppResult<()> {
        sqlx::query(&format!(
            "INSERT INTO guest_notifications ({COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)"
        ))
        .bind(n.id.into_uuid())
        .bind(&n.message)
        .bind(n.action.map(|a| a.as_str()))
        .bind(n.direction.map(|d| d.as_str()))
        .bind(&n.tender)
        .bind(&n.timestamp)
        .bind(n.timestamp_sort.map(|t| t.with_timezone(&Utc)))
        .bind(n.timestamp_sort.map(|t| t.offset().local_minus_utc()))
        .bind(n.server_timestamp)
        .bind(n.port_day_id.map(PortDayId::into_uuid))
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to create notification"))?;
        Ok(())
    }

    async fn find_by_id(&self, id: NotificationId) -> AppResult<Option<Notification>> {
        let row = sqlx::query_as::<_, NotificationRow>(&format!(
            "SELECT {COLUMNS} FROM guest_notifications WHERE id = $1"
        ))
        .bind(id.into_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to find notification"))?;
        Ok(row.map(Notification::from))
    }

    async fn latest(&self, limit: usize) -> AppResult<Vec<Notification>> {
        let rows = sqlx::query_as::<_, NotificationRow>(&format!(
            "SELECT {COLUMNS} FROM guest_notifications \
             ORDER BY COALESCE(timestamp_sort, server_timestamp) DESC NULLS LAST, id DESC \
             LIMIT $1"
        ))
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list notifications"))?;
        Ok(rows.into_iter().map(Notification::from).collect())
    }

    async fn delete(&self, id: NotificationId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM guest_notifications WHERE id = $1")
            .bind(id.into_uuid())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete notification"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM guest_notifications")
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to clear notifications"))?;
        Ok(result.rows_affected())
    }

    async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM guest_notifications")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to count notifications"))?;
        Ok(count as u64)
    }
}
