//! Removal of characters that would corrupt the tab-delimited structure.
//!
//! The diagnostics capability is an explicit argument so the cleaning logic
//! carries no global state: production code passes [`LogDiagnostics`], tests
//! pass a recording implementation.

use log::warn;
use std::borrow::Cow;

/// Receiver for advisory notices emitted while cleaning field values.
///
/// Replacements are advisory, never fatal; the run continues with the
/// cleaned value. The two conditions are independent and may both fire for
/// the same input.
pub trait FieldDiagnostics {
    /// The value contained at least one horizontal tab.
    fn tabs_replaced(&self, value: &str);
    /// The value contained at least one carriage return or line feed.
    fn line_breaks_replaced(&self, value: &str);
}

/// Forwards advisories to the `log` crate at WARN level.
pub struct LogDiagnostics;

impl FieldDiagnostics for LogDiagnostics {
    fn tabs_replaced(&self, value: &str) {
        warn!(
            "Value {:?} contains tabs. These will be replaced with spaces.",
            value
        );
    }

    fn line_breaks_replaced(&self, value: &str) {
        warn!(
            "Value {:?} contains line breaks. These will be replaced with spaces.",
            value
        );
    }
}

/// Replaces every tab, carriage return and line feed with a single space.
///
/// Length-preserving, idempotent, and borrow-returning when no replacement
/// is needed.
pub fn clean_field<'a>(value: &'a str, diag: &dyn FieldDiagnostics) -> Cow<'a, str> {
    let has_tabs = value.contains('\t');
    let has_breaks = value.contains('\r') || value.contains('\n');

    if !has_tabs && !has_breaks {
        return Cow::Borrowed(value);
    }

    if has_tabs {
        diag.tabs_replaced(value);
    }
    if has_breaks {
        diag.line_breaks_replaced(value);
    }

    Cow::Owned(
        value
            .chars()
            .map(|c| if matches!(c, '\t' | '\r' | '\n') { ' ' } else { c })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    struct Recording {
        tabs: Cell<usize>,
        breaks: Cell<usize>,
    }

    impl FieldDiagnostics for Recording {
        fn tabs_replaced(&self, _value: &str) {
            self.tabs.set(self.tabs.get() + 1);
        }

        fn line_breaks_replaced(&self, _value: &str) {
            self.breaks.set(self.breaks.get() + 1);
        }
    }

    #[test]
    fn test_clean_plain_value_unchanged() {
        let diag = Recording::default();
        let out = clean_field("qwerty", &diag);

        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(out, "qwerty");
        assert_eq!(diag.tabs.get(), 0);
        assert_eq!(diag.breaks.get(), 0);
    }

    #[test]
    fn test_clean_replaces_tabs() {
        let diag = Recording::default();
        assert_eq!(clean_field("a\tb\t c", &diag), "a b  c");
        assert_eq!(diag.tabs.get(), 1);
        assert_eq!(diag.breaks.get(), 0);
    }

    #[test]
    fn test_clean_replaces_line_breaks() {
        let diag = Recording::default();
        assert_eq!(clean_field("a \rt\n c", &diag), "a  t  c");
        assert_eq!(diag.tabs.get(), 0);
        assert_eq!(diag.breaks.get(), 1);
    }

    #[test]
    fn test_clean_fires_both_advisories() {
        let diag = Recording::default();
        assert_eq!(clean_field("a\r\t\nb", &diag), "a   b");
        assert_eq!(diag.tabs.get(), 1);
        assert_eq!(diag.breaks.get(), 1);
    }

    #[test]
    fn test_clean_preserves_length() {
        let diag = Recording::default();
        for input in ["", "plain", "a\tb", "\r\n\r\n", "mixed\tand\nbroken\r"] {
            assert_eq!(clean_field(input, &diag).len(), input.len());
        }
    }

    #[test]
    fn test_clean_is_idempotent() {
        let diag = Recording::default();
        for input in ["qwerty", "a\tb\t c", "a \rt\n c", "a\r\t\nb"] {
            let once = clean_field(input, &diag).into_owned();
            let twice = clean_field(&once, &diag).into_owned();
            assert_eq!(once, twice);
        }
    }
}
