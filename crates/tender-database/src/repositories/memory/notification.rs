use std::cmp::Reverse;

use async_trait::async_trait;
use dashmap::DashMap;

use tender_core::events::{ChangeKind, Collection, CollectionChange};
use tender_core::result::AppResult;
use tender_core::types::NotificationId;
use tender_entity::notification::Notification;

use crate::change_feed::ChangeFeed;
use crate::repositories::NotificationRepository;

/// In-memory `guestNotifications` collection.
#[derive(Debug)]
pub struct MemoryNotificationRepository {
    entries: DashMap<NotificationId, Notification>,
    feed: ChangeFeed,
}

impl MemoryNotificationRepository {
    /// Create an empty collection publishing to `feed`.
    pub fn new(feed: ChangeFeed) -> Self {
        Self {
            entries: DashMap::new(),
            feed,
        }
    }
}

#[async_trait]
impl NotificationRepository for MemoryNotificationRepository {
    async fn create(&self, notification: &Notification) -> AppResult<()> {
        self.entries.insert(notification.id, notification.clone());
        self.feed
            .publish_document(Collection::GuestNotifications, ChangeKind::Created, notification.id);
        Ok(())
    }

    async fn find_by_id(&self, id: NotificationId) -> AppResult<Option<Notification>> {
        Ok(self.entries.get(&id).map(|e| e.value().clone()))
    }

    async fn latest(&self, limit: usize) -> AppResult<Vec<Notification>> {
        let mut all: Vec<Notification> = self.entries.iter().map(|e| e.value().clone()).collect();
        // Records without any timestamp sort last.
        all.sort_by_key(|n| Reverse((n.sort_key(), n.id)));
        all.truncate(limit);
        Ok(all)
    }

    async fn delete(&self, id: NotificationId) -> AppResult<bool> {
        let removed = self.entries.remove(&id).is_some();
        if removed {
            self.feed
                .publish_document(Collection::GuestNotifications, ChangeKind::Deleted, id);
        }
        Ok(removed)
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let count = self.entries.len() as u64;
        self.entries.clear();
        self.feed.publish(CollectionChange::new(
            Collection::GuestNotifications,
            ChangeKind::Cleared,
            None,
        ));
        Ok(count)
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.entries.len() as u64)
    }
}
