use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use tender_core::result::AppResult;
use tender_entity::display::DisplayImage;

use super::db_error;
use crate::repositories::DisplayImageRepository;

#[derive(Debug, FromRow)]
struct DisplayImageRow {
    id: String,
    image_data: Option<String>,
    updated_at: Option<DateTime<Utc>>,
}

/// PostgreSQL `display_images` table.
#[derive(Debug, Clone)]
pub struct PgDisplayImageRepository {
    pool: PgPool,
}

impl PgDisplayImageRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DisplayImageRepository for PgDisplayImageRepository {
    async fn get(&self, id: &str) -> AppResult<Option<DisplayImage>> {
        let row = sqlx::query_as::<_, DisplayImageRow>(
            "SELECT id, image_data, updated_at FROM display_images WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to read display image"))?;
        Ok(row.map(|r| DisplayImage {
            id: r.id,
            image_data: r.image_data,
            updated_at: r.updated_at,
        }))
    }

    async fn set_image(&self, id: &str, image_data: &str, updated_at: DateTime<Utc>) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO display_images (id, image_data, updated_at) VALUES ($1, $2, $3) \
             ON CONFLICT (id) DO UPDATE SET image_data = EXCLUDED.image_data, updated_at = EXCLUDED.updated_at",
        )
        .bind(id)
        .bind(image_data)
        .bind(updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to store display image"))?;
        Ok(())
    }

    async fn clear_image(&self, id: &str) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE display_images SET image_data = NULL WHERE id = $1 AND image_data IS NOT NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to remove display image"))?;
        Ok(result.rows_affected() > 0)
    }
}
