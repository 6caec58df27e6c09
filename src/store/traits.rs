use crate::model::{Id, TagValue};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The tag carries no value on the object in question.
    #[error("no value found for tag '{tag_path}'")]
    NotFound { tag_path: String },
    /// The object id does not exist in the store.
    #[error("unknown object '{0}'")]
    UnknownObject(Id),
    /// Opaque transport or backend failure. Never recovered at this layer.
    #[error("store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// The remote tag store, as consumed by models and forms.
///
/// Objects are opaque ids carrying named tag values addressed by slash
/// paths. Timeouts, retries and connection reuse are entirely the
/// implementation's responsibility.
#[async_trait::async_trait]
pub trait TagStore: Send + Sync {
    /// Mint a new object and return its id.
    async fn create_object(&self) -> Result<Id, StoreError>;
    /// Read the value of one tag on an object. Absence of a value is
    /// `StoreError::NotFound`.
    async fn get_tag(&self, object_id: &Id, tag_path: &str) -> Result<TagValue, StoreError>;
    /// Write the value of one tag on an object.
    async fn set_tag(&self, object_id: &Id, tag_path: &str, value: TagValue)
        -> Result<(), StoreError>;
}
