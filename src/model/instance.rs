use crate::model::{Id, ModelSchema, TagValue};
use crate::store::{StoreError, TagStore};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum InstanceError {
    #[error("field '{field}' is not declared on model '{model}'")]
    UnknownField { field: String, model: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl InstanceError {
    /// True when the underlying failure is "no such tag value", which
    /// callers may recover from by substituting an empty value.
    pub fn is_not_found(&self) -> bool {
        matches!(self, InstanceError::Store(e) if e.is_not_found())
    }
}

/// A handle to one remote object viewed through a model schema.
///
/// An instance either wraps an object that already exists in the store
/// (constructed with [`ModelInstance::open`]) or starts out unpersisted with
/// no id ([`ModelInstance::new`]); in the latter case the store assigns the
/// id on the first `save`. Writes are staged locally and pushed by `save`;
/// reads prefer staged values and otherwise fetch from the store.
///
/// An instance is exclusively owned by whatever request is processing it.
/// Nothing here locks, and nothing here deletes remote objects.
pub struct ModelInstance {
    schema: Arc<ModelSchema>,
    store: Arc<dyn TagStore>,
    id: Option<Id>,
    staged: HashMap<String, TagValue>,
}

impl ModelInstance {
    /// A fresh instance with no remote counterpart yet.
    pub fn new(schema: Arc<ModelSchema>, store: Arc<dyn TagStore>) -> Self {
        Self {
            schema,
            store,
            id: None,
            staged: HashMap::new(),
        }
    }

    /// Wrap an object that already exists in the store.
    pub fn open(schema: Arc<ModelSchema>, store: Arc<dyn TagStore>, id: Id) -> Self {
        Self {
            schema,
            store,
            id: Some(id),
            staged: HashMap::new(),
        }
    }

    pub fn schema(&self) -> &Arc<ModelSchema> {
        &self.schema
    }

    pub fn store(&self) -> &Arc<dyn TagStore> {
        &self.store
    }

    /// The remote object id, once assigned.
    pub fn id(&self) -> Option<&Id> {
        self.id.as_ref()
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn has_staged_changes(&self) -> bool {
        !self.staged.is_empty()
    }

    /// Stage a value for the next `save`. The field must be declared on the
    /// model schema.
    pub fn set(&mut self, field_name: &str, value: impl Into<TagValue>) -> Result<(), InstanceError> {
        if !self.schema.has_field(field_name) {
            return Err(InstanceError::UnknownField {
                field: field_name.to_string(),
                model: self.schema.name.clone(),
            });
        }
        self.staged.insert(field_name.to_string(), value.into());
        Ok(())
    }

    /// Read the current value of a declared field. Staged values win over
    /// whatever the store holds; an unpersisted instance with nothing staged
    /// reports not-found just like a missing tag would.
    pub async fn get(&self, field_name: &str) -> Result<TagValue, InstanceError> {
        if let Some(value) = self.staged.get(field_name) {
            return Ok(value.clone());
        }
        let descriptor =
            self.schema
                .descriptor(field_name)
                .ok_or_else(|| InstanceError::UnknownField {
                    field: field_name.to_string(),
                    model: self.schema.name.clone(),
                })?;
        let id = match &self.id {
            Some(id) => id,
            None => {
                return Err(StoreError::NotFound {
                    tag_path: descriptor.tag_path.clone(),
                }
                .into())
            }
        };
        let value = self.store.get_tag(id, &descriptor.tag_path).await?;
        Ok(value)
    }

    /// Persist pending changes: mint the remote object if this instance has
    /// no id yet, then push every staged tag value and drain the staging
    /// map. One call per edit cycle; the store round-trips per tag are its
    /// own business.
    pub async fn save(&mut self) -> Result<Id, InstanceError> {
        let id = match &self.id {
            Some(id) => id.clone(),
            None => {
                let id = self.store.create_object().await?;
                log::debug!("model '{}': created object {}", self.schema.name, id);
                self.id = Some(id.clone());
                id
            }
        };

        // Push in declaration order so writes are deterministic.
        for name in &self.schema.ordered_fields {
            if let Some(value) = self.staged.get(name) {
                if let Some(descriptor) = self.schema.descriptor(name) {
                    self.store
                        .set_tag(&id, &descriptor.tag_path, value.clone())
                        .await?;
                }
            }
        }
        self.staged.clear();
        Ok(id)
    }
}
