//! In-memory religion store.
//!
//! All mutation goes through the write half of one `RwLock`, so there is a
//! single writer at a time. Expansion appends to the record that is current
//! when the lock is taken; it never writes back a stale copy.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::religion::models::{Component, Religion};

/// A stored religion with its bookkeeping.
#[derive(Debug, Clone, Serialize)]
pub struct StoredReligion {
    pub id: String,
    pub religion: Religion,
    pub created_at: DateTime<Utc>,
    /// Seconds spent in the generation pipeline (0 for variations).
    pub generation_time: f64,
    #[serde(skip)]
    sequence: u64,
}

#[derive(Default)]
pub struct ReligionStore {
    records: RwLock<HashMap<String, StoredReligion>>,
    next_sequence: AtomicU64,
}

impl ReligionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_sequence(&self) -> u64 {
        self.next_sequence.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Inserts without ever replacing an existing record. A taken ID gets
    /// `_<seq>` appended until it is free.
    async fn insert(&self, mut record: StoredReligion) -> StoredReligion {
        let mut records = self.records.write().await;
        while records.contains_key(&record.id) {
            let id = format!("{}_{}", record.id, record.sequence);
            warn!("Religion store: id {} already taken, storing as {id}", record.id);
            record.id = id;
        }
        let stored = records.entry(record.id.clone()).or_insert(record).clone();
        debug!("Religion store: inserted {}, count={}", stored.id, records.len());
        stored
    }

    /// Stores a religion from the single-generation path as `religion_<seq>_<unix>`.
    pub async fn insert_generated(
        &self,
        religion: Religion,
        created_at: DateTime<Utc>,
        generation_time: f64,
    ) -> StoredReligion {
        let sequence = self.next_sequence();
        let id = format!("religion_{sequence}_{}", created_at.timestamp());
        self.insert(StoredReligion {
            id,
            religion,
            created_at,
            generation_time,
            sequence,
        })
        .await
    }

    /// Stores one variation as `variation_<theme>_<index>_<unix>`; `index` is 1-based.
    pub async fn insert_variation(
        &self,
        base_theme: &str,
        index: usize,
        religion: Religion,
    ) -> StoredReligion {
        let created_at = Utc::now();
        let id = format!("variation_{base_theme}_{index}_{}", created_at.timestamp());
        self.insert(StoredReligion {
            id,
            religion,
            created_at,
            generation_time: 0.0,
            sequence: self.next_sequence(),
        })
        .await
    }

    pub async fn get(&self, id: &str) -> Option<StoredReligion> {
        self.records.read().await.get(id).cloned()
    }

    /// All records in creation order.
    pub async fn list(&self) -> Vec<StoredReligion> {
        let mut all: Vec<_> = self.records.read().await.values().cloned().collect();
        all.sort_by_key(|r| r.sequence);
        all
    }

    /// Appends `component` to the stored religion and returns the updated record.
    pub async fn append_component(&self, id: &str, component: Component) -> Option<Religion> {
        let mut records = self.records.write().await;
        let record = records.get_mut(id)?;
        record.religion.append_component(component);
        Some(record.religion.clone())
    }

    pub async fn remove(&self, id: &str) -> Option<StoredReligion> {
        let removed = self.records.write().await.remove(id);
        if removed.is_some() {
            debug!("Religion store: removed {id}");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::religion::models::{Deity, Legend};

    fn religion(name: &str) -> Religion {
        Religion {
            name: name.to_string(),
            ..Religion::default()
        }
    }

    #[tokio::test]
    async fn test_generated_ids_use_sequence_and_timestamp() {
        let store = ReligionStore::new();
        let created_at = Utc::now();

        let first = store.insert_generated(religion("A"), created_at, 1.5).await;
        let second = store.insert_generated(religion("B"), created_at, 0.5).await;

        assert_eq!(first.id, format!("religion_1_{}", created_at.timestamp()));
        assert_eq!(second.id, format!("religion_2_{}", created_at.timestamp()));
        assert_eq!(store.len().await, 2);
        assert_eq!(store.get(&first.id).await.unwrap().generation_time, 1.5);
    }

    #[tokio::test]
    async fn test_sequence_is_not_reused_after_delete() {
        let store = ReligionStore::new();
        let created_at = Utc::now();
        let first = store.insert_generated(religion("A"), created_at, 0.0).await;
        store.remove(&first.id).await.unwrap();

        let next = store.insert_generated(religion("B"), created_at, 0.0).await;

        assert!(next.id.starts_with("religion_2_"));
    }

    #[tokio::test]
    async fn test_variation_ids_and_zero_generation_time() {
        let store = ReligionStore::new();
        let stored = store.insert_variation("nature", 2, religion("V")).await;
        assert!(stored.id.starts_with("variation_nature_2_"));
        assert_eq!(stored.generation_time, 0.0);
    }

    #[tokio::test]
    async fn test_taken_id_is_suffixed_not_overwritten() {
        let store = ReligionStore::new();
        for name in ["First", "Second"] {
            store
                .insert(StoredReligion {
                    id: "variation_nature_1_0".to_string(),
                    religion: religion(name),
                    created_at: Utc::now(),
                    generation_time: 0.0,
                    sequence: store.next_sequence(),
                })
                .await;
        }

        assert_eq!(store.len().await, 2);
        let first = store.get("variation_nature_1_0").await.unwrap();
        assert_eq!(first.religion.name, "First");
        let second = store.get("variation_nature_1_0_2").await.unwrap();
        assert_eq!(second.religion.name, "Second");
    }

    #[tokio::test]
    async fn test_same_theme_variations_in_one_second_are_both_kept() {
        let store = ReligionStore::new();
        let a = store.insert_variation("nature", 1, religion("A")).await;
        let b = store.insert_variation("nature", 1, religion("B")).await;

        assert_ne!(a.id, b.id);
        assert_eq!(store.len().await, 2);
        assert_eq!(store.get(&a.id).await.unwrap().religion.name, "A");
        assert_eq!(store.get(&b.id).await.unwrap().religion.name, "B");
    }

    #[tokio::test]
    async fn test_list_preserves_creation_order() {
        let store = ReligionStore::new();
        let now = Utc::now();
        for name in ["C", "A", "B"] {
            store.insert_generated(religion(name), now, 0.0).await;
        }
        let names: Vec<_> = store.list().await.into_iter().map(|r| r.religion.name).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[tokio::test]
    async fn test_append_component_updates_stored_record() {
        let store = ReligionStore::new();
        let stored = store.insert_generated(religion("A"), Utc::now(), 0.0).await;

        store
            .append_component(&stored.id, Component::Deity(Deity::default()))
            .await
            .unwrap();
        let updated = store
            .append_component(&stored.id, Component::Legend(Legend::default()))
            .await
            .unwrap();

        assert_eq!(updated.deities.len(), 1);
        assert_eq!(updated.legends.len(), 1);
        assert_eq!(store.get(&stored.id).await.unwrap().religion, updated);
    }

    #[tokio::test]
    async fn test_append_to_missing_record_is_none() {
        let store = ReligionStore::new();
        assert!(store
            .append_component("religion_9_0", Component::Deity(Deity::default()))
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_remove_missing_record_is_none() {
        let store = ReligionStore::new();
        assert!(store.remove("nope").await.is_none());
        assert!(store.get("nope").await.is_none());
    }
}
