//! # Date Handling Utilities
//!
//! This module compiles moment-style display patterns (`YYYY-MM-DD HH:mm`)
//! into chrono format strings and uses them to parse externally supplied
//! values and to format committed values.

use std::fmt::Write as _;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};
use datepick_types::DateInput;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::warn;

/// Date-time layouts accepted when the configured pattern does not match.
const FALLBACK_DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];
/// Date-only layouts accepted as a fallback; the time of day becomes midnight.
const FALLBACK_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];
/// Time-only layouts accepted as a fallback; the date comes from the anchor.
const FALLBACK_TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M"];

/// Error returned when a textual value cannot be turned into a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not parse '{input}' with pattern '{pattern}'")]
pub struct ParseError {
    /// The rejected input
    pub input: String,
    /// The display pattern that was tried first
    pub pattern: String,
}

/// A display pattern compiled into a chrono format string.
///
/// Supported tokens: `YYYY YY MMMM MMM MM M DD D dddd ddd HH H hh h mm m ss s SSS A a`.
/// Text inside `[...]` is copied literally; any other character is a literal.
///
/// # Example
/// ```rust
/// use datepick_util::date_handling::DatePattern;
///
/// let pattern = DatePattern::compile("YYYY-MM-DD HH:mm");
/// assert_eq!(pattern.chrono_format(), "%Y-%m-%d %H:%M");
/// assert!(pattern.has_date() && pattern.has_time());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePattern {
    source: String,
    chrono_format: String,
    has_date: bool,
    has_time: bool,
}

impl DatePattern {
    /// Translates a moment-style pattern. Unknown characters are kept as literals.
    pub fn compile(pattern: &str) -> Self {
        static TOKENS: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"(?s)\[[^\]]*\]|YYYY|YY|MMMM|MMM|MM|M|DD|D|dddd|ddd|HH|H|hh|h|mm|m|ss|s|SSS|A|a|.").unwrap()
        });

        let mut chrono_format = String::with_capacity(pattern.len() * 2);
        let mut has_date = false;
        let mut has_time = false;

        for token in TOKENS.find_iter(pattern).map(|m| m.as_str()) {
            let (spec, is_date, is_time) = match token {
                "YYYY" => ("%Y", true, false),
                "YY" => ("%y", true, false),
                "MMMM" => ("%B", true, false),
                "MMM" => ("%b", true, false),
                "MM" => ("%m", true, false),
                "M" => ("%-m", true, false),
                "DD" => ("%d", true, false),
                "D" => ("%-d", true, false),
                "dddd" => ("%A", true, false),
                "ddd" => ("%a", true, false),
                "HH" => ("%H", false, true),
                "H" => ("%-H", false, true),
                "hh" => ("%I", false, true),
                "h" => ("%-I", false, true),
                "mm" => ("%M", false, true),
                "m" => ("%-M", false, true),
                "ss" => ("%S", false, true),
                "s" => ("%-S", false, true),
                "SSS" => ("%3f", false, true),
                "A" => ("%p", false, true),
                "a" => ("%P", false, true),
                literal => {
                    let literal = literal
                        .strip_prefix('[')
                        .and_then(|inner| inner.strip_suffix(']'))
                        .unwrap_or(literal);
                    chrono_format.push_str(&literal.replace('%', "%%"));
                    continue;
                }
            };
            chrono_format.push_str(spec);
            has_date |= is_date;
            has_time |= is_time;
        }

        Self {
            source: pattern.to_string(),
            chrono_format,
            has_date,
            has_time,
        }
    }

    /// The moment-style source pattern.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The translated chrono format string.
    pub fn chrono_format(&self) -> &str {
        &self.chrono_format
    }

    /// True when the pattern carries any calendar field.
    pub fn has_date(&self) -> bool {
        self.has_date
    }

    /// True when the pattern carries any time-of-day field.
    pub fn has_time(&self) -> bool {
        self.has_time
    }

    /// Renders `value` with this pattern.
    pub fn format(&self, value: NaiveDateTime) -> String {
        let mut rendered = String::new();
        if write!(rendered, "{}", value.format(&self.chrono_format)).is_err() {
            warn!(pattern = %self.source, "Pattern could not be rendered; falling back to ISO-8601");
            return value.format("%Y-%m-%dT%H:%M:%S").to_string();
        }
        rendered
    }

    /// Parses text with this pattern only.
    ///
    /// Date-only patterns yield midnight; time-only patterns take the date of `anchor`.
    fn parse_strict(&self, text: &str, anchor: NaiveDateTime) -> Option<NaiveDateTime> {
        match (self.has_date, self.has_time) {
            (true, true) => NaiveDateTime::parse_from_str(text, &self.chrono_format).ok(),
            (true, false) => NaiveDate::parse_from_str(text, &self.chrono_format)
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN)),
            (false, true) => NaiveTime::parse_from_str(text, &self.chrono_format)
                .ok()
                .map(|time| anchor.date().and_time(time)),
            (false, false) => None,
        }
    }
}

/// Converts an external value into a point in time.
///
/// Native values pass through untouched. Text is tried against `pattern`
/// first, then against RFC 3339 and common ISO-8601 layouts.
///
/// # Arguments
/// * `input` - The value supplied by the host or the picker widget
/// * `pattern` - The control's effective display pattern
/// * `anchor` - Supplies the date for time-only text
///
/// # Example
/// ```rust
/// use chrono::NaiveDate;
/// use datepick_types::DateInput;
/// use datepick_util::date_handling::{parse_date_input, DatePattern};
///
/// let anchor = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
/// let pattern = DatePattern::compile("HH:mm");
/// let parsed = parse_date_input(&DateInput::from("14:30"), &pattern, anchor).unwrap();
/// assert_eq!(parsed, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(14, 30, 0).unwrap());
/// ```
pub fn parse_date_input(input: &DateInput, pattern: &DatePattern, anchor: NaiveDateTime) -> Result<NaiveDateTime, ParseError> {
    let text = match input {
        DateInput::Native(value) => return Ok(*value),
        DateInput::Text(text) => text.trim(),
    };

    let error = || ParseError {
        input: text.to_string(),
        pattern: pattern.source().to_string(),
    };

    if text.is_empty() {
        return Err(error());
    }

    pattern
        .parse_strict(text, anchor)
        .or_else(|| parse_fallback(text, anchor))
        .ok_or_else(error)
}

/// Tries RFC 3339 and the fallback ISO layouts in order.
///
/// RFC 3339 input names an instant, so it is converted to local wall time.
fn parse_fallback(text: &str, anchor: NaiveDateTime) -> Option<NaiveDateTime> {
    if let Ok(date_time) = DateTime::parse_from_rfc3339(text) {
        return Some(date_time.with_timezone(&Local).naive_local());
    }

    FALLBACK_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            FALLBACK_DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
                .map(|date| date.and_time(NaiveTime::MIN))
        })
        .or_else(|| {
            FALLBACK_TIME_FORMATS
                .iter()
                .find_map(|format| NaiveTime::parse_from_str(text, format).ok())
                .map(|time| anchor.date().and_time(time))
        })
}
