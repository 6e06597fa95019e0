//! Locale seam for number formatting conventions.

/// Supplies the active locale's numeric conventions.
///
/// Consulted once per `numeric`/`decimal` evaluation, so a live
/// implementation may change the separator between passes.
pub trait Locale: Send + Sync {
    /// The decimal separator, e.g. `.` or `,`.
    fn decimal_separator(&self) -> char;
}

/// Locale with `.` as the decimal separator (the default).
#[derive(Debug, Clone, Copy, Default)]
pub struct PointLocale;

impl Locale for PointLocale {
    fn decimal_separator(&self) -> char {
        '.'
    }
}

/// Locale with a fixed, caller-chosen separator.
#[derive(Debug, Clone, Copy)]
pub struct FixedSeparator(pub char);

impl Locale for FixedSeparator {
    fn decimal_separator(&self) -> char {
        self.0
    }
}
