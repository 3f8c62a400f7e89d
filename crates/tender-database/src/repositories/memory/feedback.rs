use async_trait::async_trait;
use tokio::sync::RwLock;

use tender_core::events::{ChangeKind, Collection};
use tender_core::result::AppResult;
use tender_entity::feedback::FeedbackRecord;

use crate::change_feed::ChangeFeed;
use crate::repositories::FeedbackRepository;

/// In-memory `guestFeedback` collection.
#[derive(Debug)]
pub struct MemoryFeedbackRepository {
    records: RwLock<Vec<FeedbackRecord>>,
    feed: ChangeFeed,
}

impl MemoryFeedbackRepository {
    /// Create an empty collection publishing to `feed`.
    pub fn new(feed: ChangeFeed) -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            feed,
        }
    }
}

#[async_trait]
impl FeedbackRepository for MemoryFeedbackRepository {
    async fn find_all(&self) -> AppResult<Vec<FeedbackRecord>> {
        Ok(self.records.read().await.clone())
    }

    async fn insert(&self, record: &FeedbackRecord) -> AppResult<()> {
        self.records.write().await.push(record.clone());
        self.feed
            .publish_document(Collection::GuestFeedback, ChangeKind::Created, record.id);
        Ok(())
    }
}
