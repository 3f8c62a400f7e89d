//! Guest notification entity model.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tender_core::types::{NotificationId, PortDayId};

use super::action::{Direction, TenderAction};

/// Display format of notification times, e.g. `17/10/2026, 3:45 PM`.
const DISPLAY_FORMAT: &str = "%d/%m/%Y, %-I:%M %p";

/// A status message broadcast to guests.
///
/// Records written before the port-local timestamp existed carry only
/// `serverTimestamp`; [`Notification::sort_key`] and
/// [`Notification::display_time`] fall back to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Unique notification identifier.
    pub id: NotificationId,
    /// The sentence shown to guests.
    pub message: String,
    /// Templated action, absent for custom messages.
    #[serde(default)]
    pub action: Option<TenderAction>,
    /// Templated direction, absent for custom messages.
    #[serde(default)]
    pub direction: Option<Direction>,
    /// Tender label, may be empty.
    #[serde(default)]
    pub tender: String,
    /// Port-local time, pre-formatted for display.
    #[serde(default)]
    pub timestamp: Option<String>,
    /// Port-local time carrying the port's UTC offset.
    #[serde(default)]
    pub timestamp_sort: Option<DateTime<FixedOffset>>,
    /// Store-assigned UTC time of older records.
    #[serde(default)]
    pub server_timestamp: Option<DateTime<Utc>>,
    /// The port day that was active when the notification was sent.
    #[serde(default)]
    pub port_day_id: Option<PortDayId>,
}

impl Notification {
    /// Build a notification stamped with a port-local time.
    pub fn new(
        message: String,
        action: Option<TenderAction>,
        direction: Option<Direction>,
        tender: String,
        local_time: DateTime<FixedOffset>,
        port_day_id: PortDayId,
    ) -> Self {
        Self {
            id: NotificationId::new(),
            message,
            action,
            direction,
            tender,
            timestamp: Some(format_display_time(&local_time)),
            timestamp_sort: Some(local_time),
            server_timestamp: None,
            port_day_id: Some(port_day_id),
        }
    }

    /// The instant used to order the feed, newest first.
    pub fn sort_key(&self) -> Option<DateTime<Utc>> {
        self.timestamp_sort
            .map(|t| t.with_timezone(&Utc))
            .or(self.server_timestamp)
    }

    /// The time string shown next to the message.
    pub fn display_time(&self) -> Option<String> {
        self.timestamp
            .clone()
            .or_else(|| self.server_timestamp.map(|t| format_display_time(&t)))
    }

    /// Whether this record predates port-local timestamps.
    pub fn is_legacy(&self) -> bool {
        self.timestamp_sort.is_none()
    }
}

/// Format a time the way notification times are displayed.
pub fn format_display_time<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.format(DISPLAY_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn plus_two() -> FixedOffset {
        FixedOffset::east_opt(2 * 3600).unwrap()
    }

    #[test]
    fn test_display_format() {
        let local = plus_two().with_ymd_and_hms(2026, 10, 17, 15, 5, 0).unwrap();
        assert_eq!(format_display_time(&local), "17/10/2026, 3:05 PM");
        let morning = Utc.with_ymd_and_hms(2026, 1, 2, 0, 30, 0).unwrap();
        assert_eq!(format_display_time(&morning), "02/01/2026, 12:30 AM");
    }

    #[test]
    fn test_new_sets_both_forms() {
        let local = plus_two().with_ymd_and_hms(2026, 10, 17, 9, 0, 0).unwrap();
        let n = Notification::new(
            "Tender 1 has departed Evrima.".to_string(),
            Some(TenderAction::Departed),
            Some(Direction::Shipside),
            "Tender 1".to_string(),
            local,
            PortDayId::new(),
        );
        assert_eq!(n.timestamp.as_deref(), Some("17/10/2026, 9:00 AM"));
        assert_eq!(
            n.sort_key(),
            Some(Utc.with_ymd_and_hms(2026, 10, 17, 7, 0, 0).unwrap())
        );
        assert!(!n.is_legacy());
    }

    #[test]
    fn test_legacy_record_is_readable() {
        let json = serde_json::json!({
            "id": NotificationId::new(),
            "message": "A tender has arrived at the pier.",
            "action": "ARRIVED",
            "direction": "SHORESIDE",
            "serverTimestamp": "2024-06-01T10:15:00Z"
        });
        let n: Notification = serde_json::from_value(json).unwrap();
        assert!(n.is_legacy());
        assert_eq!(n.tender, "");
        assert_eq!(n.display_time().as_deref(), Some("01/06/2024, 10:15 AM"));
        assert_eq!(
            n.sort_key(),
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 10, 15, 0).unwrap())
        );
    }
}
