//! Port day entity model.

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tender_core::types::PortDayId;

use super::offset::UtcOffset;

/// Geographic position of the tender pier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PierLocation {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl PierLocation {
    /// Whether both coordinates are on the globe.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

/// The operational configuration for one cycle of tender operations.
///
/// At most one port day is active at a settled time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortDay {
    /// Unique port day identifier.
    pub id: PortDayId,
    /// Port name shown to the operator.
    pub name: String,
    /// Whether this is the active port day.
    pub is_active: bool,
    /// When the port day was created.
    pub start_date: DateTime<Utc>,
    /// Where the tenders land.
    #[serde(default)]
    pub pier_location: Option<PierLocation>,
    /// Expected ride duration in minutes.
    #[serde(default)]
    pub avg_time: Option<u32>,
    /// Departure time of the last tender, port-local.
    #[serde(default, with = "hh_mm")]
    pub last_tender_time: Option<NaiveTime>,
    /// Port timezone. Older records carry none and are treated as UTC.
    #[serde(default)]
    pub timezone: Option<UtcOffset>,
}

impl PortDay {
    /// The offset used for notification timestamps.
    pub fn utc_offset(&self) -> UtcOffset {
        self.timezone.unwrap_or(UtcOffset::UTC)
    }
}

/// Serde adapter for optional `HH:MM` times.
pub mod hh_mm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Time format of `lastTenderTime`.
    pub const FORMAT: &str = "%H:%M";

    /// Serialize as `HH:MM`.
    pub fn serialize<S: Serializer>(value: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(time) => serializer.collect_str(&time.format(FORMAT)),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize from `HH:MM`; an empty string reads as absent.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => NaiveTime::parse_from_str(value, FORMAT)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
