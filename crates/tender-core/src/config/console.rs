//! Vessel and operator console configuration.

use serde::{Deserialize, Serialize};

/// Operator console settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Vessel name used as the shipside location in notifications.
    #[serde(default = "default_vessel_name")]
    pub vessel_name: String,
    /// Tender labels offered to the operator.
    #[serde(default = "default_tender_labels")]
    pub tender_labels: Vec<String>,
    /// Maximum size of the TV display image in bytes.
    #[serde(default = "default_max_display_image_bytes")]
    pub max_display_image_bytes: usize,
    /// Default toast lifetime in milliseconds.
    #[serde(default = "default_toast_duration")]
    pub toast_duration_ms: u64,
    /// Map center `[lat, lng]` used when no pier location is set.
    #[serde(default = "default_map_center")]
    pub default_map_center: [f64; 2],
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            vessel_name: default_vessel_name(),
            tender_labels: default_tender_labels(),
            max_display_image_bytes: default_max_display_image_bytes(),
            toast_duration_ms: default_toast_duration(),
            default_map_center: default_map_center(),
        }
    }
}

fn default_vessel_name() -> String {
    "Evrima".to_string()
}

fn default_tender_labels() -> Vec<String> {
    (1..=5).map(|n| format!("Tender {n}")).collect()
}

fn default_max_display_image_bytes() -> usize {
    1024 * 1024
}

fn default_toast_duration() -> u64 {
    4000
}

// Gibraltar
fn default_map_center() -> [f64; 2] {
    [36.143, -5.353]
}
