use crate::model::{generate_id, Id, TagValue};
use crate::store::traits::{StoreError, TagStore};
use parking_lot::RwLock;
use std::collections::HashMap;

/// In-memory tag store.
///
/// Stands in for the remote service in tests and fixtures, so each test can
/// construct its own store handle instead of leaning on process-wide
/// sandbox state. Tag values live in a plain map of object id to
/// path-to-value map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: RwLock<HashMap<Id, HashMap<String, TagValue>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of objects currently held.
    pub fn object_count(&self) -> usize {
        self.objects.read().len()
    }

    /// Snapshot of all tag values on one object, when it exists.
    pub fn tag_values(&self, object_id: &Id) -> Option<HashMap<String, TagValue>> {
        self.objects.read().get(object_id).cloned()
    }
}

#[async_trait::async_trait]
impl TagStore for MemoryStore {
    async fn create_object(&self) -> Result<Id, StoreError> {
        let id = generate_id();
        self.objects.write().insert(id.clone(), HashMap::new());
        Ok(id)
    }

    async fn get_tag(&self, object_id: &Id, tag_path: &str) -> Result<TagValue, StoreError> {
        let objects = self.objects.read();
        let tags = objects
            .get(object_id)
            .ok_or_else(|| StoreError::UnknownObject(object_id.clone()))?;
        tags.get(tag_path).cloned().ok_or_else(|| StoreError::NotFound {
            tag_path: tag_path.to_string(),
        })
    }

    async fn set_tag(
        &self,
        object_id: &Id,
        tag_path: &str,
        value: TagValue,
    ) -> Result<(), StoreError> {
        let mut objects = self.objects.write();
        let tags = objects
            .get_mut(object_id)
            .ok_or_else(|| StoreError::UnknownObject(object_id.clone()))?;
        tags.insert(tag_path.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_tag_round_trip() {
        let store = MemoryStore::new();
        let id = store.create_object().await.unwrap();
        store
            .set_tag(&id, "test/description", TagValue::from("foo"))
            .await
            .unwrap();
        let value = store.get_tag(&id, "test/description").await.unwrap();
        assert_eq!(value, TagValue::from("foo"));
    }

    #[tokio::test]
    async fn test_missing_tag_is_not_found() {
        let store = MemoryStore::new();
        let id = store.create_object().await.unwrap();
        let err = store.get_tag(&id, "test/absent").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_unknown_object_is_rejected() {
        let store = MemoryStore::new();
        let err = store
            .set_tag(&"nope".to_string(), "test/x", TagValue::from(1i64))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UnknownObject(_)));
    }
}
