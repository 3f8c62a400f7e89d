use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use tender_core::error::AppError;
use tender_core::events::{ChangeKind, Collection};
use tender_core::result::AppResult;
use tender_core::types::PortDayId;
use tender_entity::port_day::PortDay;

use crate::change_feed::ChangeFeed;
use crate::repositories::PortDayRepository;

/// In-memory `portDays` collection.
///
/// A single write lock covers `create_active`, so deactivation and insert
/// are observed together.
#[derive(Debug)]
pub struct MemoryPortDayRepository {
    entries: RwLock<HashMap<PortDayId, PortDay>>,
    feed: ChangeFeed,
}

impl MemoryPortDayRepository {
    /// Create an empty collection publishing to `feed`.
    pub fn new(feed: ChangeFeed) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            feed,
        }
    }
}

#[async_trait]
impl PortDayRepository for MemoryPortDayRepository {
    async fn find_all(&self) -> AppResult<Vec<PortDay>> {
        Ok(self.entries.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: PortDayId) -> AppResult<Option<PortDay>> {
        Ok(self.entries.read().await.get(&id).cloned())
    }

    async fn insert(&self, port_day: &PortDay) -> AppResult<()> {
        let mut entries = self.entries.write().await;
        if entries.contains_key(&port_day.id) {
            return Err(AppError::conflict(format!("Port day {} already exists", port_day.id)));
        }
        entries.insert(port_day.id, port_day.clone());
        drop(entries);
        self.feed
            .publish_document(Collection::PortDays, ChangeKind::Created, port_day.id);
        Ok(())
    }

    async fn create_active(&self, port_day: &PortDay) -> AppResult<u64> {
        let mut entries = self.entries.write().await;
        if entries.contains_key(&port_day.id) {
            return Err(AppError::conflict(format!("Port day {} already exists", port_day.id)));
        }
        let mut deactivated = Vec::new();
        for existing in entries.values_mut().filter(|d| d.is_active) {
            existing.is_active = false;
            deactivated.push(existing.id);
        }
        let mut created = port_day.clone();
        created.is_active = true;
        entries.insert(created.id, created);
        drop(entries);

        for id in &deactivated {
            self.feed
                .publish_document(Collection::PortDays, ChangeKind::Updated, id);
        }
        self.feed
            .publish_document(Collection::PortDays, ChangeKind::Created, port_day.id);
        Ok(deactivated.len() as u64)
    }

    async fn update_details(&self, port_day: &PortDay) -> AppResult<bool> {
        let mut entries = self.entries.write().await;
        let Some(existing) = entries.get_mut(&port_day.id) else {
            return Ok(false);
        };
        existing.name = port_day.name.clone();
        existing.pier_location = port_day.pier_location;
        existing.avg_time = port_day.avg_time;
        existing.last_tender_time = port_day.last_tender_time;
        existing.timezone = port_day.timezone;
        drop(entries);
        self.feed
            .publish_document(Collection::PortDays, ChangeKind::Updated, port_day.id);
        Ok(true)
    }

    async fn deactivate(&self, ids: &[PortDayId]) -> AppResult<u64> {
        let mut entries = self.entries.write().await;
        let mut changed = Vec::new();
        for id in ids {
            if let Some(day) = entries.get_mut(id) {
                if day.is_active {
                    day.is_active = false;
                    changed.push(*id);
                }
            }
        }
        drop(entries);
        for id in &changed {
            self.feed
                .publish_document(Collection::PortDays, ChangeKind::Updated, id);
        }
        Ok(changed.len() as u64)
    }

    async fn delete(&self, id: PortDayId) -> AppResult<bool> {
        let removed = self.entries.write().await.remove(&id).is_some();
        if removed {
            self.feed
                .publish_document(Collection::PortDays, ChangeKind::Deleted, id);
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn day(name: &str, active: bool, age_hours: i64) -> PortDay {
        PortDay {
            id: PortDayId::new(),
            name: name.to_string(),
            is_active: active,
            start_date: Utc::now() - Duration::hours(age_hours),
            pier_location: None,
            avg_time: Some(15),
            last_tender_time: None,
            timezone: None,
        }
    }

    #[tokio::test]
    async fn test_create_active_deactivates_everything_else() {
        let repo = MemoryPortDayRepository::new(ChangeFeed::default());
        repo.insert(&day("Cadiz", true, 48)).await.unwrap();
        repo.insert(&day("Malaga", true, 24)).await.unwrap();
        repo.insert(&day("Lisbon", false, 72)).await.unwrap();

        let fresh = day("Gibraltar", false, 0);
        assert_eq!(repo.create_active(&fresh).await.unwrap(), 2);

        let actives: Vec<_> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .filter(|d| d.is_active)
            .collect();
        assert_eq!(actives.len(), 1);
        assert_eq!(actives[0].id, fresh.id);
    }

    #[tokio::test]
    async fn test_update_details_keeps_activation_and_start() {
        let repo = MemoryPortDayRepository::new(ChangeFeed::default());
        let original = day("Cadiz", true, 5);
        repo.insert(&original).await.unwrap();

        let mut edited = original.clone();
        edited.name = "Cádiz".to_string();
        edited.is_active = false;
        edited.start_date = Utc::now();
        edited.avg_time = Some(25);
        assert!(repo.update_details(&edited).await.unwrap());

        let stored = repo.find_by_id(original.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Cádiz");
        assert_eq!(stored.avg_time, Some(25));
        assert!(stored.is_active);
        assert_eq!(stored.start_date, original.start_date);
    }

    #[tokio::test]
    async fn test_missing_records() {
        let repo = MemoryPortDayRepository::new(ChangeFeed::default());
        let ghost = day("Nowhere", true, 1);
        assert!(!repo.update_details(&ghost).await.unwrap());
        assert!(!repo.delete(ghost.id).await.unwrap());
        assert_eq!(repo.deactivate(&[ghost.id]).await.unwrap(), 0);
    }
}
