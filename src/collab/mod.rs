//! External collaborator seams.
//!
//! Everything the engine needs from the outside world (translation, locale
//! conventions, DNS, card-type configuration, profiling) enters through
//! the traits here. Each seam ships an in-crate default so a bare
//! [`Validation`](crate::Validation) works out of the box.

mod cards;
mod dns;
mod locale;
mod profile;
mod translate;

pub use cards::{BuiltinCards, CardType, CardTypes};
pub use dns::{MxLookup, NoMxLookup, StaticMxLookup};
pub use locale::{FixedSeparator, Locale, PointLocale};
pub use profile::{ProfileGuard, Profiler, TraceProfiler};
pub use translate::{NoTranslation, Translate};
