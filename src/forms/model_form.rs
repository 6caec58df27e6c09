use crate::forms::errors::{ErrorList, FormError};
use crate::forms::fields::{FieldMap, FormField};
use crate::model::{InstanceError, ModelInstance, ModelSchema, TagValue};
use crate::store::TagStore;
use std::collections::HashMap;
use std::sync::Arc;

/// Raw submitted data, keyed by field name, as it comes off the wire.
pub type FormData = HashMap<String, String>;

/// Per-field validation hook. Receives the parsed value and either returns
/// the value to keep (possibly rewritten) or a message to attach to the
/// field.
pub type FieldCleaner = Arc<dyn Fn(&TagValue) -> Result<TagValue, String> + Send + Sync>;

/// Whole-form validation hook. Runs after every field has been processed
/// and sees whatever made it into `cleaned_data`; a message it returns is
/// attached under the non-field key.
pub type FormCleaner = Arc<dyn Fn(&HashMap<String, TagValue>) -> Result<(), String> + Send + Sync>;

/// Field names of a schema after applying include/exclude filters.
///
/// With an `include` list the output follows that list's order, otherwise
/// declaration order. `exclude` removes names even when they are also
/// listed in `include`. Included names not declared on the schema are
/// skipped.
fn applicable_names(
    schema: &ModelSchema,
    include: Option<&[String]>,
    exclude: Option<&[String]>,
) -> Vec<String> {
    let source: Vec<String> = match include {
        Some(include) => include
            .iter()
            .filter(|name| {
                if schema.has_field(name) {
                    true
                } else {
                    log::warn!(
                        "model '{}' has no field '{}' named in the include list",
                        schema.name,
                        name
                    );
                    false
                }
            })
            .cloned()
            .collect(),
        None => schema.ordered_fields.clone(),
    };
    match exclude {
        Some(exclude) => source
            .into_iter()
            .filter(|name| !exclude.contains(name))
            .collect(),
        None => source,
    }
}

/// Generate form fields for a model schema, one per applicable declared
/// field, widgets chosen from the descriptors' semantic kinds.
pub fn fields_for_model(
    schema: &ModelSchema,
    include: Option<&[String]>,
    exclude: Option<&[String]>,
) -> FieldMap {
    let mut map = FieldMap::new();
    for name in applicable_names(schema, include, exclude) {
        if let Some(descriptor) = schema.descriptor(&name) {
            map.insert(FormField::for_kind(name, descriptor.kind));
        }
    }
    map
}

/// Read the current tag values of an instance into a map suitable as a
/// form's initial data. A tag that carries no value resolves to the empty
/// value; any other store failure propagates.
pub async fn model_to_dict(
    instance: &ModelInstance,
    include: Option<&[String]>,
    exclude: Option<&[String]>,
) -> Result<HashMap<String, TagValue>, InstanceError> {
    let mut data = HashMap::new();
    for name in applicable_names(instance.schema(), include, exclude) {
        match instance.get(&name).await {
            Ok(value) => {
                data.insert(name, value);
            }
            Err(e) if e.is_not_found() => {
                data.insert(name, TagValue::empty());
            }
            Err(e) => return Err(e),
        }
    }
    Ok(data)
}

/// Write a validated form back onto its instance and persist it.
///
/// Validates the form first if nobody has yet; refuses outright when any
/// error is present, so fields are never partially written. Cleaned values
/// are staged field by field and the instance's persist operation runs
/// exactly once at the end.
pub async fn save_instance(
    mut form: ModelForm<'_>,
    include: Option<&[String]>,
    exclude: Option<&[String]>,
) -> Result<ModelInstance, FormError> {
    if !form.is_bound() {
        return Err(FormError::Unbound);
    }
    if !form.is_valid() {
        return Err(FormError::NotSaved(form.errors().clone()));
    }

    let schema = form.instance.schema().clone();
    let names = applicable_names(&schema, include, exclude);
    let ModelForm {
        mut instance,
        cleaned_data,
        ..
    } = form;
    for name in names {
        // optional fields left blank have no cleaned value and stay as-is
        if let Some(value) = cleaned_data.get(&name) {
            instance.set(&name, value.clone())?;
        }
    }
    instance.save().await?;
    Ok(instance)
}

/// The reusable definition of a model form: which model it maps, which
/// fields are in play, and the validation hooks. Built once per form type
/// and shared; the per-request state lives in [`ModelForm`].
#[derive(Clone)]
pub struct FormDef {
    schema: Arc<ModelSchema>,
    include: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
    base_fields: FieldMap,
    field_cleaners: HashMap<String, FieldCleaner>,
    form_cleaner: Option<FormCleaner>,
}

impl FormDef {
    pub fn builder(schema: Arc<ModelSchema>) -> FormDefBuilder {
        FormDefBuilder {
            schema,
            include: None,
            exclude: None,
            overrides: Vec::new(),
            required: Vec::new(),
            field_cleaners: HashMap::new(),
            form_cleaner: None,
        }
    }

    pub fn schema(&self) -> &Arc<ModelSchema> {
        &self.schema
    }

    /// The generated field set, before any instance data is bound.
    pub fn base_fields(&self) -> &FieldMap {
        &self.base_fields
    }

    /// A form editing an existing instance. Initial values come from the
    /// instance's current tag values, overridden key by key by the explicit
    /// `initial` argument. Pass `data` to bind a submission.
    pub async fn form_for(
        &self,
        instance: ModelInstance,
        data: Option<FormData>,
        initial: Option<HashMap<String, TagValue>>,
    ) -> Result<ModelForm<'_>, FormError> {
        let object_data =
            model_to_dict(&instance, self.include.as_deref(), self.exclude.as_deref()).await?;
        Ok(self.bind(instance, object_data, data, initial))
    }

    /// A form for a brand-new, not-yet-persisted instance. Instance-derived
    /// initial data is empty.
    pub fn form_for_new(
        &self,
        store: Arc<dyn TagStore>,
        data: Option<FormData>,
        initial: Option<HashMap<String, TagValue>>,
    ) -> ModelForm<'_> {
        let instance = ModelInstance::new(self.schema.clone(), store);
        self.bind(instance, HashMap::new(), data, initial)
    }

    fn bind(
        &self,
        instance: ModelInstance,
        mut object_data: HashMap<String, TagValue>,
        data: Option<FormData>,
        initial: Option<HashMap<String, TagValue>>,
    ) -> ModelForm<'_> {
        if let Some(initial) = initial {
            // explicit initial values take precedence, key by key
            object_data.extend(initial);
        }
        let mut fields = self.base_fields.clone();
        for (name, value) in &object_data {
            if let Some(field) = fields.get_mut(name) {
                field.initial = Some(value.clone());
            }
        }
        ModelForm {
            def: self,
            fields,
            data,
            instance,
            cleaned_data: HashMap::new(),
            errors: ErrorList::new(),
            validated: false,
        }
    }
}

pub struct FormDefBuilder {
    schema: Arc<ModelSchema>,
    include: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
    overrides: Vec<FormField>,
    required: Vec<String>,
    field_cleaners: HashMap<String, FieldCleaner>,
    form_cleaner: Option<FormCleaner>,
}

impl FormDefBuilder {
    /// Restrict the form to the named model fields, in this order.
    pub fn include<I>(mut self, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.include = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Drop the named model fields from the form, even when included.
    pub fn exclude<I>(mut self, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.exclude = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Replace a generated field (or add one the model does not declare).
    /// Overrides win over generated fields of the same name.
    pub fn field_override(mut self, field: FormField) -> Self {
        self.overrides.push(field);
        self
    }

    /// Mark a generated field as refusing blank submissions.
    pub fn required(mut self, name: impl Into<String>) -> Self {
        self.required.push(name.into());
        self
    }

    /// Attach a per-field validation hook.
    pub fn clean_field<F>(mut self, name: impl Into<String>, hook: F) -> Self
    where
        F: Fn(&TagValue) -> Result<TagValue, String> + Send + Sync + 'static,
    {
        self.field_cleaners.insert(name.into(), Arc::new(hook));
        self
    }

    /// Attach the whole-form validation hook.
    pub fn clean<F>(mut self, hook: F) -> Self
    where
        F: Fn(&HashMap<String, TagValue>) -> Result<(), String> + Send + Sync + 'static,
    {
        self.form_cleaner = Some(Arc::new(hook));
        self
    }

    pub fn build(self) -> FormDef {
        let mut base_fields =
            fields_for_model(&self.schema, self.include.as_deref(), self.exclude.as_deref());
        for field in self.overrides {
            base_fields.insert(field);
        }
        for name in &self.required {
            if let Some(field) = base_fields.get_mut(name) {
                field.required = true;
            }
        }
        FormDef {
            schema: self.schema,
            include: self.include,
            exclude: self.exclude,
            base_fields,
            field_cleaners: self.field_cleaners,
            form_cleaner: self.form_cleaner,
        }
    }
}

/// One edit/submission cycle over one instance.
///
/// Transient and request-scoped: the form owns its instance for the
/// duration, accumulates validation errors instead of raising them, and on
/// a successful `save` hands the instance back.
pub struct ModelForm<'d> {
    def: &'d FormDef,
    fields: FieldMap,
    data: Option<FormData>,
    instance: ModelInstance,
    cleaned_data: HashMap<String, TagValue>,
    errors: ErrorList,
    validated: bool,
}

impl ModelForm<'_> {
    /// Whether submitted data was bound. Unbound forms are never valid.
    pub fn is_bound(&self) -> bool {
        self.data.is_some()
    }

    /// The form's fields, with initial values filled in.
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    pub fn instance(&self) -> &ModelInstance {
        &self.instance
    }

    /// Errors recorded by the last validation pass. Empty until `is_valid`
    /// has run.
    pub fn errors(&self) -> &ErrorList {
        &self.errors
    }

    /// Validated values, populated only by a successful validation pass.
    pub fn cleaned_data(&self) -> &HashMap<String, TagValue> {
        &self.cleaned_data
    }

    /// Run the validation pass (once; later calls reuse the outcome).
    ///
    /// Each field's raw submission is parsed according to its kind, then the
    /// per-field hook runs on the parsed value. The whole-form hook runs
    /// after all fields regardless of individual failures, seeing whatever
    /// values cleaned successfully.
    pub fn is_valid(&mut self) -> bool {
        if !self.validated {
            self.validated = true;
            self.full_clean();
        }
        self.is_bound() && self.errors.is_empty()
    }

    /// Give up on the edit and take the instance back unsaved.
    pub fn into_instance(self) -> ModelInstance {
        self.instance
    }

    /// Validate if needed, write every cleaned value back and persist the
    /// instance once. Refuses with `FormError::NotSaved` when any
    /// validation error is present.
    pub async fn save(self) -> Result<ModelInstance, FormError> {
        let include = self.def.include.clone();
        let exclude = self.def.exclude.clone();
        save_instance(self, include.as_deref(), exclude.as_deref()).await
    }

    fn full_clean(&mut self) {
        let Some(data) = self.data.clone() else {
            return;
        };
        let fields: Vec<FormField> = self.fields.iter().cloned().collect();
        for field in &fields {
            let raw = data.get(&field.name).map(String::as_str);
            match clean_field_value(field, raw) {
                Ok(Some(value)) => {
                    let value = match self.def.field_cleaners.get(&field.name) {
                        Some(hook) => match hook(&value) {
                            Ok(value) => value,
                            Err(message) => {
                                self.errors.add(&field.name, message);
                                continue;
                            }
                        },
                        None => value,
                    };
                    self.cleaned_data.insert(field.name.clone(), value);
                }
                // optional field left blank: no cleaned value
                Ok(None) => {}
                Err(message) => self.errors.add(&field.name, message),
            }
        }
        if let Some(hook) = &self.def.form_cleaner {
            if let Err(message) = hook(&self.cleaned_data) {
                self.errors.add_non_field(message);
            }
        }
        log::debug!(
            "form for model '{}' cleaned with {} error(s)",
            self.def.schema.name,
            self.errors.len()
        );
    }
}

/// Parse one field's raw submission into a tag value.
///
/// `Ok(None)` means an optional field was left blank and contributes no
/// cleaned value. Checkboxes never error: absence and the usual falsy
/// spellings mean false, anything else present means true.
fn clean_field_value(field: &FormField, raw: Option<&str>) -> Result<Option<TagValue>, String> {
    match field.kind {
        crate::model::FieldKind::Boolean => {
            let checked = match raw.map(|s| s.trim().to_ascii_lowercase()) {
                None => false,
                Some(s) => !matches!(s.as_str(), "" | "false" | "off" | "0"),
            };
            Ok(Some(TagValue::Boolean(checked)))
        }
        crate::model::FieldKind::Integer => match raw.map(str::trim) {
            None | Some("") => blank_value(field),
            Some(s) => s
                .parse::<i64>()
                .map(|n| Some(TagValue::Integer(n)))
                .map_err(|_| "Enter a whole number.".to_string()),
        },
        crate::model::FieldKind::Float => match raw.map(str::trim) {
            None | Some("") => blank_value(field),
            Some(s) => s
                .parse::<f64>()
                .map(|x| Some(TagValue::Float(x)))
                .map_err(|_| "Enter a number.".to_string()),
        },
        crate::model::FieldKind::Text | crate::model::FieldKind::Opaque => {
            let s = raw.unwrap_or("").to_string();
            if s.is_empty() && field.required {
                Err("This field is required.".to_string())
            } else {
                Ok(Some(TagValue::Text(s)))
            }
        }
    }
}

fn blank_value(field: &FormField) -> Result<Option<TagValue>, String> {
    if field.required {
        Err("This field is required.".to_string())
    } else {
        Ok(None)
    }
}
