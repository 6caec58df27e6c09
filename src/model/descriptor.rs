use crate::model::FieldKind;
use serde::{Deserialize, Serialize};

/// A declared tag field: one slash-delimited tag path plus the semantic
/// kind its values are expected to have.
///
/// The kind is advisory. The store itself is schemaless and will happily
/// hold anything under the path; the kind only tells the form layer which
/// widget to render and how to parse submitted data. Descriptors are
/// immutable once declared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagDescriptor {
    /// Namespace/tag identifier, e.g. `test/description`
    pub tag_path: String,
    pub kind: FieldKind,
}

impl TagDescriptor {
    pub fn new(tag_path: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            tag_path: tag_path.into(),
            kind,
        }
    }

    /// A generic tag with no specifically declared type. Same as `text`.
    pub fn tag(tag_path: impl Into<String>) -> Self {
        Self::new(tag_path, FieldKind::default())
    }

    pub fn text(tag_path: impl Into<String>) -> Self {
        Self::new(tag_path, FieldKind::Text)
    }

    pub fn integer(tag_path: impl Into<String>) -> Self {
        Self::new(tag_path, FieldKind::Integer)
    }

    pub fn float(tag_path: impl Into<String>) -> Self {
        Self::new(tag_path, FieldKind::Float)
    }

    pub fn boolean(tag_path: impl Into<String>) -> Self {
        Self::new(tag_path, FieldKind::Boolean)
    }

    pub fn opaque(tag_path: impl Into<String>) -> Self {
        Self::new(tag_path, FieldKind::Opaque)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_kinds() {
        assert_eq!(TagDescriptor::tag("dummy/path").kind, FieldKind::Text);
        assert_eq!(TagDescriptor::text("dummy/path").kind, FieldKind::Text);
        assert_eq!(TagDescriptor::integer("dummy/path").kind, FieldKind::Integer);
        assert_eq!(TagDescriptor::float("dummy/path").kind, FieldKind::Float);
        assert_eq!(TagDescriptor::boolean("dummy/path").kind, FieldKind::Boolean);
        assert_eq!(TagDescriptor::opaque("dummy/path").kind, FieldKind::Opaque);
    }

    #[test]
    fn test_descriptor_keeps_tag_path() {
        let d = TagDescriptor::text("test/namespace/bar_tag");
        assert_eq!(d.tag_path, "test/namespace/bar_tag");
    }
}
