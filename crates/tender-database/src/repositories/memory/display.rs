use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use tender_core::events::{ChangeKind, Collection};
use tender_core::result::AppResult;
use tender_entity::display::DisplayImage;

use crate::change_feed::ChangeFeed;
use crate::repositories::DisplayImageRepository;

/// In-memory `displayImages` collection.
#[derive(Debug)]
pub struct MemoryDisplayImageRepository {
    documents: DashMap<String, DisplayImage>,
    feed: ChangeFeed,
}

impl MemoryDisplayImageRepository {
    /// Create an empty collection publishing to `feed`.
    pub fn new(feed: ChangeFeed) -> Self {
        Self {
            documents: DashMap::new(),
            feed,
        }
    }
}

#[async_trait]
impl DisplayImageRepository for MemoryDisplayImageRepository {
    async fn get(&self, id: &str) -> AppResult<Option<DisplayImage>> {
        Ok(self.documents.get(id).map(|d| d.value().clone()))
    }

    async fn set_image(&self, id: &str, image_data: &str, updated_at: DateTime<Utc>) -> AppResult<()> {
        let mut entry = self
            .documents
            .entry(id.to_string())
            .or_insert_with(|| DisplayImage {
                id: id.to_string(),
                image_data: None,
                updated_at: None,
            });
        entry.image_data = Some(image_data.to_string());
        entry.updated_at = Some(updated_at);
        drop(entry);
        self.feed
            .publish_document(Collection::DisplayImages, ChangeKind::Updated, id);
        Ok(())
    }

    async fn clear_image(&self, id: &str) -> AppResult<bool> {
        let cleared = match self.documents.get_mut(id) {
            Some(mut doc) if doc.has_image() => {
                doc.image_data = None;
                true
            }
            _ => false,
        };
        if cleared {
            self.feed
                .publish_document(Collection::DisplayImages, ChangeKind::Updated, id);
        }
        Ok(cleared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_then_clear_field() {
        let repo = MemoryDisplayImageRepository::new(ChangeFeed::default());
        let now = Utc::now();
        repo.set_image("tvDisplay", "data:image/png;base64,AAAA", now)
            .await
            .unwrap();
        assert!(repo.clear_image("tvDisplay").await.unwrap());
        assert!(!repo.clear_image("tvDisplay").await.unwrap());

        let doc = repo.get("tvDisplay").await.unwrap().unwrap();
        assert!(doc.image_data.is_none());
        assert_eq!(doc.updated_at, Some(now));
    }
}
