pub mod errors;
pub mod fields;
pub mod model_form;

pub use errors::*;
pub use fields::*;
pub use model_form::*;
