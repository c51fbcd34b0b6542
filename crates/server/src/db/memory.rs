//! Process-local waifu store.
//!
//! Used when no database URL is configured, and by the router tests. Records
//! are lost on restart.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use waifu_tracker_core::{NewWaifu, OwnerId, WaifuId, WaifuRecord};

use super::RepositoryError;

#[derive(Debug)]
struct Records {
    /// `None` once the id space is used up.
    next_id: Option<i32>,
    by_id: BTreeMap<i32, WaifuRecord>,
}

/// In-memory record store. Cloning shares the same records.
#[derive(Debug, Clone)]
pub struct InMemoryWaifuStore {
    inner: Arc<RwLock<Records>>,
}

impl Default for InMemoryWaifuStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryWaifuStore {
    /// Create an empty store. Ids start at 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Records {
                next_id: Some(1),
                by_id: BTreeMap::new(),
            })),
        }
    }

    pub async fn find_by_name(&self, owner: &OwnerId, name: &str) -> Option<WaifuRecord> {
        let records = self.inner.read().await;
        records
            .by_id
            .values()
            .find(|r| &r.owner_id == owner && r.name == name)
            .cloned()
    }

    /// Store a record under the next free id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::IdsExhausted` once `i32::MAX` has been handed out.
    pub async fn create(&self, waifu: NewWaifu) -> Result<WaifuRecord, RepositoryError> {
        let mut records = self.inner.write().await;
        let id = records.next_id.ok_or(RepositoryError::IdsExhausted)?;
        records.next_id = id.checked_add(1);

        let record = WaifuRecord {
            id: WaifuId::new(id),
            owner_id: waifu.owner_id,
            name: waifu.name,
            image_url: waifu.image_url,
            about: waifu.about,
            birthday_month: waifu.birthday_month,
            birthday_day: waifu.birthday_day,
            created_at: Utc::now(),
        };
        records.by_id.insert(id, record.clone());
        Ok(record)
    }

    /// Records for `owner` in id order.
    pub async fn list_by_owner(&self, owner: &OwnerId) -> Vec<WaifuRecord> {
        let records = self.inner.read().await;
        records
            .by_id
            .values()
            .filter(|r| &r.owner_id == owner)
            .cloned()
            .collect()
    }

    pub async fn delete(&self, owner: &OwnerId, id: WaifuId) -> bool {
        let mut records = self.inner.write().await;
        let owned = records
            .by_id
            .get(&id.as_i32())
            .is_some_and(|r| &r.owner_id == owner);
        if owned {
            records.by_id.remove(&id.as_i32());
        }
        owned
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn owner(s: &str) -> OwnerId {
        OwnerId::parse(s).unwrap()
    }

    fn new_waifu(owner_id: &OwnerId, name: &str) -> NewWaifu {
        NewWaifu {
            owner_id: owner_id.clone(),
            name: name.to_string(),
            image_url: None,
            about: None,
            birthday_month: Some(8),
            birthday_day: Some(21),
        }
    }

    #[tokio::test]
    async fn test_ids_are_assigned_from_one() {
        let store = InMemoryWaifuStore::new();
        let a = owner("a");
        let first = store.create(new_waifu(&a, "Sinon")).await.unwrap();
        let second = store.create(new_waifu(&a, "Asuna")).await.unwrap();
        assert_eq!(first.id.as_i32(), 1);
        assert_eq!(second.id.as_i32(), 2);
    }

    #[tokio::test]
    async fn test_list_is_scoped_to_owner() {
        let store = InMemoryWaifuStore::new();
        let (a, b) = (owner("a"), owner("b"));
        store.create(new_waifu(&a, "Sinon")).await.unwrap();
        store.create(new_waifu(&b, "Asuna")).await.unwrap();
        store.create(new_waifu(&a, "Llenn")).await.unwrap();

        let listed = store.list_by_owner(&a).await;
        let names: Vec<&str> = listed.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Sinon", "Llenn"]);
        assert!(store.list_by_owner(&owner("c")).await.is_empty());
    }

    #[tokio::test]
    async fn test_find_by_name_is_scoped_to_owner() {
        let store = InMemoryWaifuStore::new();
        let (a, b) = (owner("a"), owner("b"));
        store.create(new_waifu(&a, "Sinon")).await.unwrap();

        assert!(store.find_by_name(&a, "Sinon").await.is_some());
        assert!(store.find_by_name(&b, "Sinon").await.is_none());
        assert!(store.find_by_name(&a, "sinon").await.is_none());
    }

    #[tokio::test]
    async fn test_delete_requires_ownership() {
        let store = InMemoryWaifuStore::new();
        let (a, b) = (owner("a"), owner("b"));
        let record = store.create(new_waifu(&a, "Sinon")).await.unwrap();

        assert!(!store.delete(&b, record.id).await);
        assert_eq!(store.list_by_owner(&a).await.len(), 1);

        assert!(store.delete(&a, record.id).await);
        assert!(store.list_by_owner(&a).await.is_empty());
        assert!(!store.delete(&a, record.id).await);
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let store = InMemoryWaifuStore::new();
        let a = owner("a");
        let first = store.create(new_waifu(&a, "Sinon")).await.unwrap();
        store.delete(&a, first.id).await;
        let second = store.create(new_waifu(&a, "Sinon")).await.unwrap();
        assert_eq!(second.id.as_i32(), 2);
    }

    #[tokio::test]
    async fn test_create_fails_once_ids_run_out() {
        let store = InMemoryWaifuStore::new();
        store.inner.write().await.next_id = Some(i32::MAX);
        let a = owner("a");

        let last = store.create(new_waifu(&a, "Sinon")).await.unwrap();
        assert_eq!(last.id.as_i32(), i32::MAX);

        let err = store.create(new_waifu(&a, "Asuna")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::IdsExhausted));

        let names: Vec<String> = store
            .list_by_owner(&a)
            .await
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["Sinon".to_string()]);
    }
}
