use crate::model::TagDescriptor;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// The declared shape of one model: which named fields it has and which tag
/// descriptor backs each of them.
///
/// A schema is built exactly once per model type through
/// [`ModelSchemaBuilder`] and shared from there; instances and forms only
/// read it. `ordered_fields` lists field names in the order they were
/// declared on the builder, and every name in it is a key of `fields`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSchema {
    /// Name of the model (e.g. "Meeting")
    pub name: String,
    /// Mapping from field name to its tag descriptor
    pub fields: HashMap<String, TagDescriptor>,
    /// Field names in declaration order
    pub ordered_fields: Vec<String>,
}

impl ModelSchema {
    pub fn builder(name: impl Into<String>) -> ModelSchemaBuilder {
        ModelSchemaBuilder {
            name: name.into(),
            fields: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Look up the descriptor declared under a field name
    pub fn descriptor(&self, field_name: &str) -> Option<&TagDescriptor> {
        self.fields.get(field_name)
    }

    pub fn has_field(&self, field_name: &str) -> bool {
        self.fields.contains_key(field_name)
    }

    pub fn len(&self) -> usize {
        self.ordered_fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered_fields.is_empty()
    }
}

/// Collects field declarations for one model type.
///
/// This is the registration step that runs once at type-definition time:
/// each `field` call records a (name, descriptor) pair, and `build` freezes
/// the result. Redeclaring a name replaces its descriptor without moving it,
/// so the name still appears exactly once in `ordered_fields`. A model with
/// no fields at all is legal.
pub struct ModelSchemaBuilder {
    name: String,
    fields: HashMap<String, TagDescriptor>,
    order: Vec<String>,
}

impl ModelSchemaBuilder {
    pub fn field(mut self, name: impl Into<String>, descriptor: TagDescriptor) -> Self {
        let name = name.into();
        if self.fields.insert(name.clone(), descriptor).is_none() {
            self.order.push(name);
        }
        self
    }

    /// Copy every field of an existing schema into this builder, keeping the
    /// base schema's declaration order. Fields declared afterwards extend or
    /// override the inherited set.
    pub fn extend(mut self, base: &ModelSchema) -> Self {
        for name in &base.ordered_fields {
            if let Some(descriptor) = base.descriptor(name) {
                self = self.field(name.clone(), descriptor.clone());
            }
        }
        self
    }

    pub fn build(self) -> Arc<ModelSchema> {
        Arc::new(ModelSchema {
            name: self.name,
            fields: self.fields,
            ordered_fields: self.order,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldKind;

    fn meeting() -> Arc<ModelSchema> {
        ModelSchema::builder("Meeting")
            .field("description", TagDescriptor::text("test/description"))
            .field("timestamp", TagDescriptor::integer("test/timestamp"))
            .build()
    }

    #[test]
    fn test_ordered_fields_matches_fields() {
        let schema = meeting();
        assert_eq!(schema.ordered_fields.len(), schema.fields.len());
        for name in &schema.ordered_fields {
            assert!(schema.fields.contains_key(name));
        }
    }

    #[test]
    fn test_fields_keep_declaration_order() {
        // Names come out in the order they were declared, not reversed.
        let schema = meeting();
        assert_eq!(schema.ordered_fields, vec!["description", "timestamp"]);
    }

    #[test]
    fn test_redeclared_field_overrides_in_place() {
        let schema = ModelSchema::builder("Meeting")
            .field("description", TagDescriptor::text("test/description"))
            .field("timestamp", TagDescriptor::integer("test/timestamp"))
            .field("description", TagDescriptor::opaque("test/blob"))
            .build();

        assert_eq!(schema.ordered_fields, vec!["description", "timestamp"]);
        assert_eq!(schema.fields.len(), 2);
        let descriptor = schema.descriptor("description").unwrap();
        assert_eq!(descriptor.kind, FieldKind::Opaque);
        assert_eq!(descriptor.tag_path, "test/blob");
    }

    #[test]
    fn test_extend_inherits_and_overrides() {
        let base = meeting();
        let schema = ModelSchema::builder("Standup")
            .extend(&base)
            .field("timestamp", TagDescriptor::float("test/when"))
            .field("attendees", TagDescriptor::integer("test/attendees"))
            .build();

        assert_eq!(
            schema.ordered_fields,
            vec!["description", "timestamp", "attendees"]
        );
        assert_eq!(
            schema.descriptor("timestamp").unwrap().kind,
            FieldKind::Float
        );
        // the base schema is untouched
        assert_eq!(base.descriptor("timestamp").unwrap().kind, FieldKind::Integer);
    }

    #[test]
    fn test_empty_schema_is_legal() {
        let schema = ModelSchema::builder("Bare").build();
        assert!(schema.is_empty());
        assert!(schema.ordered_fields.is_empty());
        assert!(schema.fields.is_empty());
    }
}
