use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type Id = String;

/// Semantic kinds a declared tag field can take. Kept as an explicit
/// enumeration rather than keying behavior off native value types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    Integer,
    Float,
    Boolean,
    Opaque,
}

/// A primitive tag value as stored against a remote object.
///
/// Values serialize to bare JSON primitives, matching what the store keeps
/// on the wire for a single tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl TagValue {
    /// The empty value: what an absent tag resolves to when a caller asks
    /// for "whatever is there".
    pub fn empty() -> Self {
        TagValue::Text(String::new())
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            TagValue::Boolean(_) => FieldKind::Boolean,
            TagValue::Integer(_) => FieldKind::Integer,
            TagValue::Float(_) => FieldKind::Float,
            TagValue::Text(_) => FieldKind::Text,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            TagValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            TagValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            TagValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            TagValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl std::fmt::Display for TagValue {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            TagValue::Boolean(b) => write!(f, "{}", b),
            TagValue::Integer(n) => write!(f, "{}", n),
            TagValue::Float(x) => write!(f, "{}", x),
            TagValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for TagValue {
    fn from(s: &str) -> Self {
        TagValue::Text(s.to_string())
    }
}

impl From<String> for TagValue {
    fn from(s: String) -> Self {
        TagValue::Text(s)
    }
}

impl From<i64> for TagValue {
    fn from(n: i64) -> Self {
        TagValue::Integer(n)
    }
}

impl From<f64> for TagValue {
    fn from(x: f64) -> Self {
        TagValue::Float(x)
    }
}

impl From<bool> for TagValue {
    fn from(b: bool) -> Self {
        TagValue::Boolean(b)
    }
}

pub fn generate_id() -> Id {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_value_kinds() {
        assert_eq!(TagValue::from("hello").kind(), FieldKind::Text);
        assert_eq!(TagValue::from(42i64).kind(), FieldKind::Integer);
        assert_eq!(TagValue::from(1.5f64).kind(), FieldKind::Float);
        assert_eq!(TagValue::from(true).kind(), FieldKind::Boolean);
    }

    #[test]
    fn test_tag_value_serializes_to_bare_primitives() {
        assert_eq!(
            serde_json::to_string(&TagValue::from("foo")).unwrap(),
            "\"foo\""
        );
        assert_eq!(
            serde_json::to_string(&TagValue::from(1000i64)).unwrap(),
            "1000"
        );
        assert_eq!(serde_json::to_string(&TagValue::from(true)).unwrap(), "true");

        let value: TagValue = serde_json::from_str("1000").unwrap();
        assert_eq!(value, TagValue::Integer(1000));
        let value: TagValue = serde_json::from_str("2.5").unwrap();
        assert_eq!(value, TagValue::Float(2.5));
    }

    #[test]
    fn test_empty_value_is_empty_text() {
        assert_eq!(TagValue::empty(), TagValue::Text(String::new()));
        assert_eq!(TagValue::empty().to_string(), "");
    }
}
