use async_trait::async_trait;
use chrono::{DateTime, NaiveTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::{info, warn};
use uuid::Uuid;

use tender_core::result::AppResult;
use tender_core::types::PortDayId;
use tender_entity::port_day::model::hh_mm;
use tender_entity::port_day::{PierLocation, PortDay};

use super::db_error;
use crate::repositories::PortDayRepository;

const COLUMNS: &str =
    "id, name, is_active, start_date, pier_lat, pier_lng, avg_time, last_tender_time, timezone";

#[derive(Debug, FromRow)]
struct PortDayRow {
    id: Uuid,
    name: String,
    is_active: bool,
    start_date: DateTime<Utc>,
    pier_lat: Option<f64>,
    pier_lng: Option<f64>,
    avg_time: Option<i32>,
    last_tender_time: Option<String>,
    timezone: Option<String>,
}

impl From<PortDayRow> for PortDay {
    fn from(row: PortDayRow) -> Self {
        let pier_location = match (row.pier_lat, row.pier_lng) {
            (Some(lat), Some(lng)) => Some(PierLocation { lat, lng }),
            _ => None,
        };
        let timezone = row.timezone.as_deref().filter(|t| !t.trim().is_empty()).and_then(|t| {
            t.parse()
                .inspect_err(|e| warn!(id = %row.id, timezone = t, error = %e, "Ignoring stored timezone"))
                .ok()
        });
        Self {
            id: PortDayId::from_uuid(row.id),
            name: row.name,
            is_active: row.is_active,
            start_date: row.start_date,
            pier_location,
            avg_time: row.avg_time.and_then(|m| u32::try_from(m).ok()),
            last_tender_time: row
                .last_tender_time
                .as_deref()
                .and_then(|t| NaiveTime::parse_from_str(t, hh_mm::FORMAT).ok()),
            timezone,
        }
    }
}

fn last_tender_text(day: &PortDay) -> Option<String> {
    day.last_tender_time
        .map(|t| t.format(hh_mm::FORMAT).to_string())
}

/// PostgreSQL `port_days` table.
#[derive(Debug, Clone)]
pub struct PgPortDayRepository {
    pool: PgPool,
}

impl PgPortDayRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_with<'e, E>(executor: E, day: &PortDay, active: bool) -> Result<(), sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = Postgres>,
    {
        sqlx::query(&format!(
            "INSERT INTO port_days ({COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)"
        ))
        .bind(day.id.into_uuid())
        .bind(&day.name)
        .bind(active)
        .bind(day.start_date)
        .bind(day.pier_location.map(|p| p.lat))
        .bind(day.pier_location.map(|p| p.lng))
        .bind(day.avg_time.and_then(|m| i32::try_from(m).ok()))
        .bind(last_tender_text(day))
        .bind(day.timezone.map(|t| t.to_string()))
        .execute(executor)
        .await
        .map(|_| ())
    }
}

#[async_trait]
impl PortDayRepository for PgPortDayRepository {
    async fn find_all(&self) -> AppResult<Vec<PortDay>> {
        let rows = sqlx::query_as::<_, PortDayRow>(&format!("SELECT {COLUMNS} FROM port_days"))
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list port days"))?;
        Ok(rows.into_iter().map(PortDay::from).collect())
    }

    async fn find_by_id(&self, id: PortDayId) -> AppResult<Option<PortDay>> {
        let row = sqlx::query_as::<_, PortDayRow>(&format!(
            "SELECT {COLUMNS} FROM port_days WHERE id = $1"
        ))
        .bind(id.into_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to find port day"))?;
        Ok(row.map(PortDay::from))
    }

    async fn insert(&self, port_day: &PortDay) -> AppResult<()> {
        Self::insert_with(&self.pool, port_day, port_day.is_active)
            .await
            .map_err(db_error("Failed to insert port day"))
    }

    async fn create_active(&self, port_day: &PortDay) -> AppResult<u64> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin port day transaction"))?;

        // Serializes concurrent creations; the second waits and then sees the first as active.
        sqlx::query("LOCK TABLE port_days IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to lock port days"))?;

        let deactivated = sqlx::query("UPDATE port_days SET is_active = FALSE WHERE is_active")
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to deactivate port days"))?
            .rows_affected();

        Self::insert_with(&mut *tx, port_day, true)
            .await
            .map_err(db_error("Failed to insert port day"))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit port day creation"))?;

        info!(id = %port_day.id, deactivated, "Port day created as active");
        Ok(deactivated)
    }

    async fn update_details(&self, port_day: &PortDay) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE port_days SET name = $2, pier_lat = $3, pier_lng = $4, avg_time = $5, \
             last_tender_time = $6, timezone = $7 WHERE id = $1",
        )
        .bind(port_day.id.into_uuid())
        .bind(&port_day.name)
        .bind(port_day.pier_location.map(|p| p.lat))
        .bind(port_day.pier_location.map(|p| p.lng))
        .bind(port_day.avg_time.and_then(|m| i32::try_from(m).ok()))
        .bind(last_tender_text(port_day))
        .bind(port_day.timezone.map(|t| t.to_string()))
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to update port day"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn deactivate(&self, ids: &[PortDayId]) -> AppResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE port_days SET is_active = FALSE WHERE is_active AND id IN (");
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id.into_uuid());
        }
        separated.push_unseparated(")");
        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to deactivate port days"))?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: PortDayId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM port_days WHERE id = $1")
            .bind(id.into_uuid())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete port day"))?;
        Ok(result.rows_affected() > 0)
    }
}
