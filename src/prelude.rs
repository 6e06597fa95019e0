//! Commonly used items, for glob import.
//!
//! ```
//! use formcheck::prelude::*;
//! ```

pub use crate::collab::{
    BuiltinCards, CardType, CardTypes, FixedSeparator, Locale, MxLookup, NoMxLookup,
    NoTranslation, PointLocale, ProfileGuard, Profiler, StaticMxLookup, TraceProfiler, Translate,
};
pub use crate::core::error::ConfigError;
pub use crate::core::messages;
pub use crate::core::traits::{FieldMap, Filter, Rule};
pub use crate::core::value::Value;
pub use crate::params;
pub use crate::validation::{
    Callback, Errors, Report, Status, Target, Validation, callback_fn,
};
