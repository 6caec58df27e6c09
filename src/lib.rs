pub mod config;
pub mod forms;
pub mod model;
pub mod store;

// Export form types
pub use forms::{
    fields_for_model, model_to_dict, save_instance, ErrorList, FieldCleaner, FieldMap, FormCleaner,
    FormData, FormDef, FormDefBuilder, FormError, FormField, ModelForm, WidgetKind,
    NON_FIELD_ERRORS,
};

// Export all model types
pub use model::*;

// Export store types
pub use store::{MemoryStore, StoreError, TagStore};
