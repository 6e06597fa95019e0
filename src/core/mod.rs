//! Core building blocks: the value model, capability traits, the error
//! taxonomy, and the process-wide message table.

pub mod error;
pub mod messages;
pub mod traits;
pub mod value;

pub use error::ConfigError;
pub use traits::{FieldMap, Filter, Rule};
pub use value::Value;
