//! Document collection change events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The document collections the console reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Collection {
    /// Guest-facing tender notifications.
    #[serde(rename = "guestNotifications")]
    GuestNotifications,
    /// Port day configurations.
    #[serde(rename = "portDays")]
    PortDays,
    /// Guest feedback submissions.
    #[serde(rename = "guestFeedback")]
    GuestFeedback,
    /// TV display images.
    #[serde(rename = "displayImages")]
    DisplayImages,
}

impl Collection {
    /// Return the collection name as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GuestNotifications => "guestNotifications",
            Self::PortDays => "portDays",
            Self::GuestFeedback => "guestFeedback",
            Self::DisplayImages => "displayImages",
        }
    }

    /// Parse a stored collection name.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "guestNotifications" => Some(Self::GuestNotifications),
            "portDays" => Some(Self::PortDays),
            "guestFeedback" => Some(Self::GuestFeedback),
            "displayImages" => Some(Self::DisplayImages),
            _ => None,
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened to the documents of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// A document was inserted.
    Created,
    /// A document was modified in place.
    Updated,
    /// A document was removed.
    Deleted,
    /// Every document of the collection was removed.
    Cleared,
}

/// A single change observed on a collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionChange {
    /// The affected collection.
    pub collection: Collection,
    /// The kind of change.
    pub kind: ChangeKind,
    /// The affected document, when a single one changed.
    pub document_id: Option<String>,
    /// When the change was observed.
    pub observed_at: DateTime<Utc>,
}

impl CollectionChange {
    /// Create a change event stamped with the current time.
    pub fn new(collection: Collection, kind: ChangeKind, document_id: Option<String>) -> Self {
        Self {
            collection,
            kind,
            document_id,
            observed_at: Utc::now(),
        }
    }
}
