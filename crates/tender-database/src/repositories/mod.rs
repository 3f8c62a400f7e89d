//! Repository traits for the four document collections and their
//! PostgreSQL and in-memory implementations.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use tender_core::result::AppResult;
use tender_core::types::{NotificationId, PortDayId};
use tender_entity::display::DisplayImage;
use tender_entity::feedback::FeedbackRecord;
use tender_entity::notification::Notification;
use tender_entity::port_day::PortDay;

/// The `guestNotifications` collection.
#[async_trait]
pub trait NotificationRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a notification.
    async fn create(&self, notification: &Notification) -> AppResult<()>;

    /// Fetch one notification.
    async fn find_by_id(&self, id: NotificationId) -> AppResult<Option<Notification>>;

    /// The most recent notifications, newest first.
    ///
    /// Ordered by the port-local sort time, falling back to the legacy
    /// server timestamp.
    async fn latest(&self, limit: usize) -> AppResult<Vec<Notification>>;

    /// Remove a notification. Returns whether it existed.
    async fn delete(&self, id: NotificationId) -> AppResult<bool>;

    /// Remove every notification. Returns how many were removed.
    async fn delete_all(&self) -> AppResult<u64>;

    /// Number of stored notifications.
    async fn count(&self) -> AppResult<u64>;
}

/// The `portDays` collection.
#[async_trait]
pub trait PortDayRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Every port day, in no particular order.
    async fn find_all(&self) -> AppResult<Vec<PortDay>>;

    /// Fetch one port day.
    async fn find_by_id(&self, id: PortDayId) -> AppResult<Option<PortDay>>;

    /// Insert a port day exactly as given, touching no other record.
    async fn insert(&self, port_day: &PortDay) -> AppResult<()>;

    /// Deactivate every existing port day and insert `port_day` as one atomic step.
    ///
    /// Returns how many records were deactivated.
    async fn create_active(&self, port_day: &PortDay) -> AppResult<u64>;

    /// Overwrite the editable fields of a port day; `is_active` and
    /// `start_date` are left untouched. Returns whether it existed.
    async fn update_details(&self, port_day: &PortDay) -> AppResult<bool>;

    /// Set `is_active = false` on the given records. Returns how many changed.
    async fn deactivate(&self, ids: &[PortDayId]) -> AppResult<u64>;

    /// Remove a port day entirely. Returns whether it existed.
    async fn delete(&self, id: PortDayId) -> AppResult<bool>;
}

/// The `guestFeedback` collection. Written by the guest app.
#[async_trait]
pub trait FeedbackRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Every feedback record.
    async fn find_all(&self) -> AppResult<Vec<FeedbackRecord>>;

    /// Insert a feedback record.
    async fn insert(&self, record: &FeedbackRecord) -> AppResult<()>;
}

/// The `displayImages` collection.
#[async_trait]
pub trait DisplayImageRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch a display document.
    async fn get(&self, id: &str) -> AppResult<Option<DisplayImage>>;

    /// Set the image of a display document, creating it when missing.
    async fn set_image(&self, id: &str, image_data: &str, updated_at: DateTime<Utc>) -> AppResult<()>;

    /// Remove the image field of a display document. Returns whether an image was set.
    async fn clear_image(&self, id: &str) -> AppResult<bool>;
}
