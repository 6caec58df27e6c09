use crate::model::InstanceError;
use std::collections::HashMap;

/// Reserved key for errors that belong to the whole form rather than to a
/// single field.
pub const NON_FIELD_ERRORS: &str = "__all__";

const NO_ERRORS: &[String] = &[];

/// Validation messages collected per field, plus a whole-form bucket under
/// [`NON_FIELD_ERRORS`]. Validation problems accumulate here instead of
/// aborting the pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorList {
    by_field: HashMap<String, Vec<String>>,
}

impl ErrorList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field_name: &str, message: impl Into<String>) {
        self.by_field
            .entry(field_name.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn add_non_field(&mut self, message: impl Into<String>) {
        self.add(NON_FIELD_ERRORS, message);
    }

    /// Messages attached to one field, in the order they were recorded.
    pub fn field(&self, field_name: &str) -> &[String] {
        self.by_field
            .get(field_name)
            .map(Vec::as_slice)
            .unwrap_or(NO_ERRORS)
    }

    /// Whole-form messages.
    pub fn non_field(&self) -> &[String] {
        self.field(NON_FIELD_ERRORS)
    }

    pub fn is_empty(&self) -> bool {
        self.by_field.is_empty()
    }

    /// Total number of messages across all fields.
    pub fn len(&self) -> usize {
        self.by_field.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.by_field.iter()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// The form's data did not validate; nothing was written back.
    #[error("the object could not be saved because the data didn't validate")]
    NotSaved(ErrorList),
    /// Saving a form that was never bound to submitted data.
    #[error("an unbound form cannot be saved")]
    Unbound,
    #[error(transparent)]
    Instance(#[from] InstanceError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_list_accumulates_per_field() {
        let mut errors = ErrorList::new();
        assert!(errors.is_empty());

        errors.add("description", "foo!");
        errors.add("description", "still wrong");
        errors.add_non_field("form foo!");

        assert_eq!(errors.field("description"), ["foo!", "still wrong"]);
        assert_eq!(errors.non_field(), ["form foo!"]);
        assert_eq!(errors.field("timestamp"), Vec::<String>::new().as_slice());
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.iter().count(), 2);
    }
}
