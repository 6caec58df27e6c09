use crate::model::{FieldKind, TagValue};
use std::collections::HashMap;

/// The input widget a form renders for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    TextInput,
    IntegerInput,
    DecimalInput,
    Checkbox,
    /// Fallback for values the form cannot edit structurally.
    FileUpload,
}

impl WidgetKind {
    /// Fixed lookup from semantic field kind to widget.
    pub fn for_field_kind(kind: FieldKind) -> WidgetKind {
        match kind {
            FieldKind::Text => WidgetKind::TextInput,
            FieldKind::Integer => WidgetKind::IntegerInput,
            FieldKind::Float => WidgetKind::DecimalInput,
            FieldKind::Boolean => WidgetKind::Checkbox,
            FieldKind::Opaque => WidgetKind::FileUpload,
        }
    }
}

/// One form field: where it renders, how submitted input is parsed, and the
/// value it starts out with.
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub name: String,
    pub kind: FieldKind,
    pub widget: WidgetKind,
    /// Whether a blank submission is an error. Blank is permitted by
    /// default.
    pub required: bool,
    pub initial: Option<TagValue>,
}

impl FormField {
    /// A field for the given semantic kind, widget chosen from the fixed
    /// lookup.
    pub fn for_kind(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            widget: WidgetKind::for_field_kind(kind),
            required: false,
            initial: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Swap the widget while keeping parsing semantics; bespoke forms use
    /// this to override presentation.
    pub fn with_widget(mut self, widget: WidgetKind) -> Self {
        self.widget = widget;
        self
    }

    pub fn with_initial(mut self, value: TagValue) -> Self {
        self.initial = Some(value);
        self
    }
}

/// Insertion-ordered mapping from field name to [`FormField`].
///
/// Re-inserting a name replaces the field in place without moving it.
#[derive(Debug, Clone, Default)]
pub struct FieldMap {
    order: Vec<String>,
    by_name: HashMap<String, FormField>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FormField) {
        if self.by_name.insert(field.name.clone(), field.clone()).is_none() {
            self.order.push(field.name);
        }
    }

    pub fn get(&self, name: &str) -> Option<&FormField> {
        self.by_name.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.by_name.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Field names in insertion order.
    pub fn names(&self) -> &[String] {
        &self.order
    }

    /// Fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &FormField> {
        self.order.iter().filter_map(|name| self.by_name.get(name))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_lookup() {
        assert_eq!(
            WidgetKind::for_field_kind(FieldKind::Text),
            WidgetKind::TextInput
        );
        assert_eq!(
            WidgetKind::for_field_kind(FieldKind::Integer),
            WidgetKind::IntegerInput
        );
        assert_eq!(
            WidgetKind::for_field_kind(FieldKind::Float),
            WidgetKind::DecimalInput
        );
        assert_eq!(
            WidgetKind::for_field_kind(FieldKind::Boolean),
            WidgetKind::Checkbox
        );
        assert_eq!(
            WidgetKind::for_field_kind(FieldKind::Opaque),
            WidgetKind::FileUpload
        );
    }

    #[test]
    fn test_field_map_keeps_insertion_order() {
        let mut map = FieldMap::new();
        map.insert(FormField::for_kind("description", FieldKind::Text));
        map.insert(FormField::for_kind("timestamp", FieldKind::Integer));
        assert_eq!(map.names(), ["description", "timestamp"]);

        // replacing does not move the field
        map.insert(FormField::for_kind("description", FieldKind::Opaque));
        assert_eq!(map.names(), ["description", "timestamp"]);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("description").unwrap().widget, WidgetKind::FileUpload);
    }
}
