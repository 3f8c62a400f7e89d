//! TV display image entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Document key of the lobby TV image.
pub const TV_DISPLAY_DOCUMENT: &str = "tvDisplay";

/// The image shown on a guest-facing display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayImage {
    /// Document key, e.g. `tvDisplay`.
    pub id: String,
    /// `data:` URL of the image; absent once the image was removed.
    #[serde(default)]
    pub image_data: Option<String>,
    /// Last time the image was set.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl DisplayImage {
    /// Whether an image is currently set.
    pub fn has_image(&self) -> bool {
        self.image_data.as_deref().is_some_and(|d| !d.is_empty())
    }
}
