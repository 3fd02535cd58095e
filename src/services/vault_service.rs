// src/services/vault_service.rs
//
// In-memory view of the Vault, kept newest first.
//
// RULES:
// - The store is written first; the cache only changes after it succeeds
// - The cache never holds two records with the same id
// - Failures are logged and returned, never retried

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::record::{validate_record, ResultRecord};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, RecordDeleted, RecordSaved, VaultHydrated};
use crate::repositories::VaultStore;

/// Cached and stored record counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VaultSummary {
    pub cached: usize,
    pub stored: u64,
}

pub struct VaultService {
    store: Arc<dyn VaultStore>,
    event_bus: Arc<EventBus>,
    cache: RwLock<Vec<ResultRecord>>,
}

impl VaultService {
    pub fn new(store: Arc<dyn VaultStore>, event_bus: Arc<EventBus>) -> Self {
        Self {
            store,
            event_bus,
            cache: RwLock::new(Vec::new()),
        }
    }

    /// Load every stored record into the cache.
    ///
    /// On failure the cache keeps whatever it had, so callers can carry on
    /// with an empty or stale collection.
    pub async fn hydrate(&self) -> AppResult<usize> {
        let mut cache = self.cache.write().await;

        let records = self.store.list_all().await.map_err(|e| {
            log::error!("Failed to load collection from vault: {}", e);
            e
        })?;

        let count = records.len();
        *cache = records;
        drop(cache);

        log::info!("Vault hydrated with {} records", count);
        self.event_bus.emit(VaultHydrated::new(count));
        Ok(count)
    }

    /// Validate, persist, then put the record at the front of the cache
    pub async fn save(&self, record: ResultRecord) -> AppResult<()> {
        validate_record(&record).map_err(AppError::Domain)?;

        let mut cache = self.cache.write().await;

        let replaced = self.store.save(&record).await.map_err(|e| {
            log::error!("Failed to save record {} to vault: {}", record.id, e);
            e
        })?;

        let previous = cache.iter().position(|r| r.id == record.id);
        if let Some(idx) = previous {
            cache.remove(idx);
        }
        let record_id = record.id.clone();
        cache.insert(0, record);
        drop(cache);

        self.event_bus.emit(RecordSaved::new(record_id, replaced));
        Ok(())
    }

    /// Delete from the store, then drop the id from the cache.
    /// Unknown ids are not an error.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let mut cache = self.cache.write().await;

        self.store.delete(id).await.map_err(|e| {
            log::error!("Failed to delete record {} from vault: {}", id, e);
            e
        })?;

        let before = cache.len();
        cache.retain(|r| r.id != id);
        let was_cached = cache.len() != before;
        drop(cache);

        self.event_bus
            .emit(RecordDeleted::new(id.to_string(), was_cached));
        Ok(())
    }

    /// Snapshot of the cached collection, newest first
    pub async fn items(&self) -> Vec<ResultRecord> {
        self.cache.read().await.clone()
    }

    pub async fn get(&self, id: &str) -> Option<ResultRecord> {
        self.cache.read().await.iter().find(|r| r.id == id).cloned()
    }

    pub async fn summary(&self) -> AppResult<VaultSummary> {
        let stored = self.store.count().await?;
        let cached = self.cache.read().await.len();
        Ok(VaultSummary { cached, stored })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_in_memory_pool;
    use crate::domain::record::GroundingSource;
    use crate::repositories::{MockVaultStore, SqliteVaultStore};

    fn record(id: &str, timestamp: i64) -> ResultRecord {
        ResultRecord {
            id: id.to_string(),
            prompt: format!("prompt {}", id),
            story: String::new(),
            image_url: None,
            video_url: None,
            audio_data: None,
            sources: vec![],
            neural_paths: None,
            timestamp,
        }
    }

    fn service_with(store: MockVaultStore) -> (VaultService, Arc<EventBus>) {
        let bus = Arc::new(EventBus::new());
        (VaultService::new(Arc::new(store), bus.clone()), bus)
    }

    fn ids(records: &[ResultRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_hydrate_loads_store_contents() {
        let mut store = MockVaultStore::new();
        store
            .expect_list_all()
            .times(1)
            .returning(|| Ok(vec![record("b", 2), record("a", 1)]));

        let (service, bus) = service_with(store);
        assert_eq!(service.hydrate().await.unwrap(), 2);

        assert_eq!(ids(&service.items().await), vec!["b", "a"]);
        assert_eq!(bus.get_event_log()[0].event_type, "VaultHydrated");
    }

    #[tokio::test]
    async fn test_hydrate_failure_keeps_cache() {
        let mut store = MockVaultStore::new();
        store.expect_save().returning(|_| Ok(false));
        store
            .expect_list_all()
            .returning(|| Err(AppError::unavailable("storage disabled")));

        let (service, bus) = service_with(store);
        service.save(record("kept", 1)).await.unwrap();

        let err = service.hydrate().await.unwrap_err();
        assert!(matches!(err, AppError::StorageUnavailable(_)));
        assert_eq!(ids(&service.items().await), vec!["kept"]);
        assert_eq!(bus.get_event_log().len(), 1);
    }

    #[tokio::test]
    async fn test_save_prepends_and_replaces_same_id() {
        let mut store = MockVaultStore::new();
        store.expect_save().times(3).returning(|_| Ok(false));

        let (service, bus) = service_with(store);
        service.save(record("a", 1)).await.unwrap();
        service.save(record("b", 2)).await.unwrap();

        let mut updated = record("a", 1);
        updated.story = "second take".to_string();
        service.save(updated).await.unwrap();

        let items = service.items().await;
        assert_eq!(ids(&items), vec!["a", "b"]);
        assert_eq!(items[0].story, "second take");

        let saved: Vec<bool> = bus
            .get_event_log()
            .iter()
            .map(|e| e.event_type == "RecordSaved")
            .collect();
        assert_eq!(saved, vec![true, true, true]);
    }

    #[tokio::test]
    async fn test_replaced_flag_comes_from_store() {
        let pool = Arc::new(create_in_memory_pool().unwrap());
        let store = Arc::new(SqliteVaultStore::from_pool(pool).unwrap());
        let bus = Arc::new(EventBus::new());

        let flags = Arc::new(std::sync::Mutex::new(Vec::new()));
        let seen = Arc::clone(&flags);
        bus.subscribe::<RecordSaved, _>(move |event| {
            seen.lock().unwrap().push(event.replaced);
        });

        VaultService::new(store.clone(), bus.clone())
            .save(record("a", 1))
            .await
            .unwrap();

        // Not hydrated, so "a" is only in the store
        let cold = VaultService::new(store, bus);
        cold.save(record("a", 2)).await.unwrap();

        assert_eq!(*flags.lock().unwrap(), vec![false, true]);
        assert_eq!(ids(&cold.items().await), vec!["a"]);
    }

    #[tokio::test]
    async fn test_save_failure_leaves_cache_untouched() {
        let mut store = MockVaultStore::new();
        store
            .expect_save()
            .withf(|r| r.id == "big")
            .returning(|_| Err(AppError::write("quota exceeded")));

        let (service, bus) = service_with(store);
        let err = service.save(record("big", 1)).await.unwrap_err();

        assert!(matches!(err, AppError::StorageWrite(_)));
        assert!(service.items().await.is_empty());
        assert!(bus.get_event_log().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_record_never_reaches_store() {
        let mut store = MockVaultStore::new();
        store.expect_save().never();

        let (service, _bus) = service_with(store);
        let err = service.save(record(" ", 1)).await.unwrap_err();
        assert!(matches!(err, AppError::Domain(_)));
    }

    #[tokio::test]
    async fn test_delete_filters_cache() {
        let mut store = MockVaultStore::new();
        store.expect_save().returning(|_| Ok(false));
        store.expect_delete().times(2).returning(|_| Ok(()));

        let (service, bus) = service_with(store);
        service.save(record("a", 1)).await.unwrap();
        service.save(record("b", 2)).await.unwrap();

        service.delete("a").await.unwrap();
        service.delete("missing").await.unwrap();

        assert_eq!(ids(&service.items().await), vec!["b"]);
        assert!(service.get("a").await.is_none());
        assert!(service.get("b").await.is_some());

        let log = bus.get_event_log();
        assert_eq!(log.last().unwrap().event_type, "RecordDeleted");
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_record() {
        let mut store = MockVaultStore::new();
        store.expect_save().returning(|_| Ok(false));
        store
            .expect_delete()
            .returning(|_| Err(AppError::write("engine fault")));

        let (service, _bus) = service_with(store);
        service.save(record("a", 1)).await.unwrap();

        assert!(service.delete("a").await.is_err());
        assert_eq!(ids(&service.items().await), vec!["a"]);
    }

    #[tokio::test]
    async fn test_summary_reports_both_counts() {
        let mut store = MockVaultStore::new();
        store.expect_count().returning(|| Ok(5));

        let (service, _bus) = service_with(store);
        let summary = service.summary().await.unwrap();
        assert_eq!(summary, VaultSummary { cached: 0, stored: 5 });
    }

    #[tokio::test]
    async fn test_against_sqlite_store() {
        let pool = Arc::new(create_in_memory_pool().unwrap());
        let store = Arc::new(SqliteVaultStore::from_pool(pool).unwrap());
        let bus = Arc::new(EventBus::new());

        let first = VaultService::new(store.clone(), bus.clone());
        first
            .save(record("old", 10).with_sources(vec![GroundingSource::new(
                "Ref",
                "https://ref.example",
            )]))
            .await
            .unwrap();
        first.save(record("new", 20)).await.unwrap();

        // A fresh session sees the same collection, newest first
        let second = VaultService::new(store, bus);
        second.hydrate().await.unwrap();
        let items = second.items().await;
        assert_eq!(ids(&items), vec!["new", "old"]);
        assert_eq!(items[1].sources.len(), 1);

        second.delete("old").await.unwrap();
        assert_eq!(
            second.summary().await.unwrap(),
            VaultSummary { cached: 1, stored: 1 }
        );
    }
}
