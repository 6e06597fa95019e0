//! Card-type configuration seam for the `credit_card` rule.

use std::borrow::Cow;

/// One card-type definition.
#[derive(Debug, Clone)]
pub struct CardType {
    /// Allowed digit counts, non-digit separated (`"13,16"` or `"13 16"`).
    pub lengths: Cow<'static, str>,
    /// Regex fragment the number must start with; empty means any prefix.
    pub prefix: Cow<'static, str>,
    /// Whether the Luhn checksum is required.
    pub luhn: bool,
}

/// Supplies card-type definitions by lowercase name.
pub trait CardTypes: Send + Sync {
    /// Looks up a definition; `None` means the type is not recognized (the
    /// rule then fails for that record).
    fn definition(&self, name: &str) -> Option<CardType>;
}

/// The stock card table.
///
/// `"default"` accepts any 13–19 digit number that passes Luhn; the named
/// types add prefix and length constraints.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCards;

impl CardTypes for BuiltinCards {
    fn definition(&self, name: &str) -> Option<CardType> {
        let (lengths, prefix, luhn) = match name {
            "default" => ("13,14,15,16,17,18,19", "", true),
            "american express" => ("15", "3[47]", true),
            "diners club" => ("14,16", "36|55|30[0-5]", true),
            "discover" => ("16", "6(?:011|5[0-9]{2})", true),
            "jcb" => ("15,16", "3|1800|2131", true),
            "maestro" => ("16,18", "50(?:20|38)|6(?:304|759)", true),
            "mastercard" => ("16", "5[1-5]", true),
            "visa" => ("13,16", "4", true),
            _ => return None,
        };
        Some(CardType {
            lengths: Cow::Borrowed(lengths),
            prefix: Cow::Borrowed(prefix),
            luhn,
        })
    }
}
