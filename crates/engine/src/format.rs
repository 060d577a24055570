//! Formatting seam between the controller and the host's locale handling.

use chrono::NaiveDateTime;
use datepick_util::DatePattern;

/// Turns a committed value into the string handed to the host.
///
/// Implementations receive the control's compiled pattern and its locale
/// identifier. Closures with the same shape implement this trait, so hosts
/// can plug in their own locale-aware formatting.
pub trait ValueFormatter {
    fn format(&self, value: NaiveDateTime, pattern: &DatePattern, locale: &str) -> String;
}

/// Renders the pattern with chrono. The locale is not consulted.
#[derive(Debug, Default, Clone, Copy)]
pub struct PatternFormatter;

impl ValueFormatter for PatternFormatter {
    fn format(&self, value: NaiveDateTime, pattern: &DatePattern, _locale: &str) -> String {
        pattern.format(value)
    }
}

impl<F> ValueFormatter for F
where
    F: Fn(NaiveDateTime, &DatePattern, &str) -> String,
{
    fn format(&self, value: NaiveDateTime, pattern: &DatePattern, locale: &str) -> String {
        self(value, pattern, locale)
    }
}
