//! Upload and removal of the TV display image.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::Utc;
use tracing::info;

use tender_core::config::console::ConsoleConfig;
use tender_core::error::AppError;
use tender_database::repositories::DisplayImageRepository;
use tender_entity::display::{DisplayImage, TV_DISPLAY_DOCUMENT};

const MIB: usize = 1024 * 1024;

/// Manages the `displayImages/tvDisplay` document.
#[derive(Debug, Clone)]
pub struct DisplayService {
    repo: Arc<dyn DisplayImageRepository>,
    max_bytes: usize,
}

impl DisplayService {
    /// Creates a display service accepting images up to `max_bytes`.
    pub fn new(repo: Arc<dyn DisplayImageRepository>, max_bytes: usize) -> Self {
        Self { repo, max_bytes }
    }

    /// Creates a display service from console configuration.
    pub fn from_config(repo: Arc<dyn DisplayImageRepository>, config: &ConsoleConfig) -> Self {
        Self::new(repo, config.max_display_image_bytes)
    }

    /// The current display document, if one exists.
    pub async fn current(&self) -> Result<Option<DisplayImage>, AppError> {
        self.repo.get(TV_DISPLAY_DOCUMENT).await
    }

    /// Replace the display image with `bytes`, stored as a data URL.
    pub async fn upload(&self, bytes: &[u8]) -> Result<DisplayImage, AppError> {
        if bytes.is_empty() {
            return Err(AppError::validation("Please select an image first"));
        }
        if bytes.len() > self.max_bytes {
            return Err(AppError::validation(format!(
                "Image must be less than {}",
                size_label(self.max_bytes)
            )));
        }
        let format = image::guess_format(bytes)
            .map_err(|_| AppError::validation("The selected file is not a supported image"))?;

        let data_url = format!(
            "data:{};base64,{}",
            format.to_mime_type(),
            STANDARD.encode(bytes)
        );
        let updated_at = Utc::now();
        self.repo
            .set_image(TV_DISPLAY_DOCUMENT, &data_url, updated_at)
            .await?;
        info!(bytes = bytes.len(), mime = format.to_mime_type(), "TV display image updated");

        Ok(DisplayImage {
            id: TV_DISPLAY_DOCUMENT.to_string(),
            image_data: Some(data_url),
            updated_at: Some(updated_at),
        })
    }

    /// Remove the display image, keeping the document.
    pub async fn delete(&self) -> Result<(), AppError> {
        if !self.repo.clear_image(TV_DISPLAY_DOCUMENT).await? {
            return Err(AppError::not_found("No image to delete"));
        }
        info!("TV display image removed");
        Ok(())
    }
}

fn size_label(bytes: usize) -> String {
    if bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else {
        format!("{}KB", bytes.div_ceil(1024))
    }
}
