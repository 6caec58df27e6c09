pub mod common;
pub mod descriptor;
pub mod instance;
pub mod schema;

pub use common::*;
pub use descriptor::*;
pub use instance::*;
pub use schema::*;
