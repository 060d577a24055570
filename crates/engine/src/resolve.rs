//! # Bounds & Default Resolution
//!
//! Computes the value a control starts from when it opens. An explicit value
//! supplied by the host always wins and is never clamped; otherwise the
//! current time is used, pulled inside the optional `[min, max]` range.
//!
//! Every function here is pure: the current time is a parameter, never a
//! clock read, so the results are deterministic in tests.
//!
//! ## Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use datepick_engine::resolve::resolve_default;
//! use datepick_types::DateInput;
//! use datepick_util::DatePattern;
//!
//! let pattern = DatePattern::compile("YYYY-MM-DD");
//! let now = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
//! let min = DateInput::from("2024-01-01");
//!
//! let start = resolve_default(None, Some(&min), None, now, &pattern)?;
//! assert_eq!(start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap());
//! # Ok::<(), datepick_util::ParseError>(())
//! ```

use chrono::NaiveDateTime;
use datepick_types::{Bounds, DateInput};
use datepick_util::{DatePattern, ParseError, parse_date_input};
use tracing::warn;

/// Resolves the starting value of an interaction.
///
/// # Arguments
///
/// * `explicit` - Host-supplied value; returned as-is once parsed
/// * `min` / `max` - Optional bounds for the computed default
/// * `now` - The current time
/// * `pattern` - The control's effective pattern, tried first for text inputs
///
/// # Errors
///
/// Returns [`ParseError`] when the explicit value (or, without one, a bound)
/// cannot be parsed. The caller decides whether to fall back to `now`.
pub fn resolve_default(
    explicit: Option<&DateInput>,
    min: Option<&DateInput>,
    max: Option<&DateInput>,
    now: NaiveDateTime,
    pattern: &DatePattern,
) -> Result<NaiveDateTime, ParseError> {
    if let Some(explicit) = explicit {
        return parse_date_input(explicit, pattern, now);
    }
    let bounds = resolve_bounds(min, max, now, pattern)?;
    Ok(clamp_default(now, &bounds))
}

/// Parses the optional bounds. Time-only bounds take the date of `now`.
pub fn resolve_bounds(
    min: Option<&DateInput>,
    max: Option<&DateInput>,
    now: NaiveDateTime,
    pattern: &DatePattern,
) -> Result<Bounds, ParseError> {
    let min = min.map(|input| parse_date_input(input, pattern, now)).transpose()?;
    let max = max.map(|input| parse_date_input(input, pattern, now)).transpose()?;
    let bounds = Bounds::new(min, max);
    if bounds.is_inverted() {
        warn!(min = ?bounds.min, max = ?bounds.max, "min lies after max; no value is selectable");
    }
    Ok(bounds)
}

/// Pulls `now` inside `bounds`: below `min` gives `min`, above `max` gives `max`.
///
/// With inverted bounds the `min` check runs first, mirroring how the host's
/// configuration error surfaces as an empty range rather than a fault.
pub fn clamp_default(now: NaiveDateTime, bounds: &Bounds) -> NaiveDateTime {
    if let Some(min) = bounds.min
        && now < min
    {
        return min;
    }
    if let Some(max) = bounds.max
        && now > max
    {
        return max;
    }
    now
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(hh, mm, 0).unwrap()
    }

    fn pattern() -> DatePattern {
        DatePattern::compile("YYYY-MM-DD HH:mm")
    }

    #[test]
    fn now_within_range_is_kept() {
        let now = at(2024, 6, 1, 12, 0);
        let min = DateInput::from("2024-01-01 00:00");
        let max = DateInput::from("2024-12-31 23:59");
        assert_eq!(resolve_default(None, Some(&min), Some(&max), now, &pattern()), Ok(now));
    }

    #[test]
    fn now_before_min_yields_min() {
        let now = at(2023, 6, 1, 12, 0);
        let min = DateInput::from("2024-01-01 08:00");
        assert_eq!(resolve_default(None, Some(&min), None, now, &pattern()), Ok(at(2024, 1, 1, 8, 0)));
    }

    #[test]
    fn now_after_max_yields_max() {
        let now = at(2025, 6, 1, 12, 0);
        let max = DateInput::from("2024-12-31 23:59");
        assert_eq!(resolve_default(None, None, Some(&max), now, &pattern()), Ok(at(2024, 12, 31, 23, 59)));
    }

    #[test]
    fn explicit_value_bypasses_bounds() {
        let now = at(2024, 6, 1, 12, 0);
        let explicit = DateInput::from("2030-01-01 10:00");
        let max = DateInput::from("2024-12-31 23:59");
        assert_eq!(
            resolve_default(Some(&explicit), None, Some(&max), now, &pattern()),
            Ok(at(2030, 1, 1, 10, 0))
        );
    }

    #[test]
    fn explicit_value_ignores_malformed_bounds() {
        let now = at(2024, 6, 1, 12, 0);
        let explicit = DateInput::Native(at(2020, 2, 2, 2, 2));
        let min = DateInput::from("garbage");
        assert_eq!(resolve_default(Some(&explicit), Some(&min), None, now, &pattern()), Ok(at(2020, 2, 2, 2, 2)));
    }

    #[test]
    fn malformed_values_surface_parse_errors() {
        let now = at(2024, 6, 1, 12, 0);
        let explicit = DateInput::from("not a date");
        let error = resolve_default(Some(&explicit), None, None, now, &pattern()).unwrap_err();
        assert_eq!(error.input, "not a date");

        let min = DateInput::from("2024-02-30");
        assert!(resolve_default(None, Some(&min), None, now, &pattern()).is_err());
    }

    #[test]
    fn inverted_bounds_resolve_and_clamp_to_min() {
        let now = at(2024, 6, 1, 12, 0);
        let min = DateInput::from("2024-08-01 00:00");
        let max = DateInput::from("2024-07-01 00:00");
        let bounds = resolve_bounds(Some(&min), Some(&max), now, &pattern()).unwrap();
        assert!(bounds.is_inverted());
        assert_eq!(resolve_default(None, Some(&min), Some(&max), now, &pattern()), Ok(at(2024, 8, 1, 0, 0)));
    }

    #[test]
    fn clamping_stays_within_bounds_for_sampled_times() {
        let bounds = Bounds::new(Some(at(2024, 3, 1, 0, 0)), Some(at(2024, 3, 31, 23, 59)));
        for day in [1, 15, 28] {
            for month in 1..=12 {
                let now = at(2024, month, day, 9, 30);
                let clamped = clamp_default(now, &bounds);
                assert!(bounds.contains(clamped), "{clamped} escaped bounds for now={now}");
                if bounds.contains(now) {
                    assert_eq!(clamped, now);
                }
            }
        }
    }
}
