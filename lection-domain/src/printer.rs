//! Pretty printers: pure text transforms applied to display names.

use std::iter;

use serde::{Deserialize, Serialize};

/// Turns a name into its display form. Implementations must be pure.
pub trait PrettyPrinter: Send + Sync {
    fn prettify(&self, name: &str) -> String;
}

/// Uppercases the first character and leaves the rest alone.
///
/// Only one-to-one case mappings apply: a first character whose
/// uppercase form is several characters (`ß`, `ŉ`) is kept as is.
///
/// ```
/// use lection_domain::printer::{CapitalizePrettyPrinter, PrettyPrinter};
///
/// let printer = CapitalizePrettyPrinter;
/// assert_eq!(printer.prettify("plato"), "Plato");
/// assert_eq!(printer.prettify(""), "");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CapitalizePrettyPrinter;

impl PrettyPrinter for CapitalizePrettyPrinter {
    fn prettify(&self, name: &str) -> String {
        let mut chars = name.chars();
        let Some(first) = chars.next() else {
            return String::new();
        };

        let mut upper = first.to_uppercase();
        match (upper.next(), upper.next()) {
            (Some(single), None) => iter::once(single).chain(chars).collect(),
            _ => name.to_string(),
        }
    }
}

/// Which printer the application wires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrinterKind {
    #[default]
    Capitalize,
    /// No printer: names are returned as stored.
    None,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalizes_first_letter_only() {
        assert_eq!(CapitalizePrettyPrinter.prettify("plato"), "Plato");
        assert_eq!(CapitalizePrettyPrinter.prettify("de beauvoir"), "De beauvoir");
        assert_eq!(CapitalizePrettyPrinter.prettify("mARX"), "MARX");
    }

    #[test]
    fn leaves_empty_and_non_letters_unchanged() {
        assert_eq!(CapitalizePrettyPrinter.prettify(""), "");
        assert_eq!(CapitalizePrettyPrinter.prettify("42nd"), "42nd");
        assert_eq!(CapitalizePrettyPrinter.prettify(" plato"), " plato");
    }

    #[test]
    fn handles_non_ascii() {
        assert_eq!(CapitalizePrettyPrinter.prettify("éluard"), "Éluard");
        assert_eq!(CapitalizePrettyPrinter.prettify("σωκράτης"), "Σωκράτης");
    }

    #[test]
    fn multi_char_uppercase_is_left_alone() {
        assert_eq!(CapitalizePrettyPrinter.prettify("ßtraße"), "ßtraße");
        assert_eq!(CapitalizePrettyPrinter.prettify("ŉx"), "ŉx");
        assert_eq!(CapitalizePrettyPrinter.prettify("ǆungla"), "Ǆungla");
    }

    #[test]
    fn idempotent() {
        for name in ["plato", "Aristotle", "", "ßtraße", "éluard", "x"] {
            let once = CapitalizePrettyPrinter.prettify(name);
            assert_eq!(CapitalizePrettyPrinter.prettify(&once), once, "name: {name:?}");
        }
    }

    #[test]
    fn printer_kind_from_lowercase() {
        let kind: PrinterKind = serde_json::from_str("\"none\"").unwrap();
        assert_eq!(kind, PrinterKind::None);
        assert_eq!(PrinterKind::default(), PrinterKind::Capitalize);
    }
}
