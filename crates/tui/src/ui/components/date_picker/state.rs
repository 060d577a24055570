use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use datepick_types::{Bounds, WidgetMode, WidgetRequest};

/// One adjustable segment of the spinner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinnerField {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Meridiem,
}

impl SpinnerField {
    /// Separator drawn before this segment.
    pub fn separator(self) -> &'static str {
        match self {
            Self::Year | Self::Hour => "",
            Self::Month | Self::Day => "-",
            Self::Minute => ":",
            Self::Meridiem => " ",
        }
    }
}

const DATE_FIELDS: &[SpinnerField] = &[SpinnerField::Year, SpinnerField::Month, SpinnerField::Day];
const TIME_FIELDS_24: &[SpinnerField] = &[SpinnerField::Hour, SpinnerField::Minute];
const TIME_FIELDS_12: &[SpinnerField] = &[SpinnerField::Hour, SpinnerField::Minute, SpinnerField::Meridiem];

/// Terminal stand-in for the platform date or time widget.
///
/// Seeded from a `WidgetRequest`; the user steps individual segments and
/// picks the result, which is reported back as a native value.
/// Date segments refuse steps that would leave the requested bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinnerState {
    mode: WidgetMode,
    value: NaiveDateTime,
    bounds: Bounds,
    is_24_hour: bool,
    focused: usize,
}

impl SpinnerState {
    pub fn from_request(request: &WidgetRequest) -> Self {
        let mut state = Self {
            mode: request.mode,
            value: request.value,
            bounds: request.bounds,
            is_24_hour: request.is_24_hour,
            focused: 0,
        };
        if state.mode == WidgetMode::Date {
            state.value = state.clamp_date(state.value);
        }
        state
    }

    pub fn mode(&self) -> WidgetMode {
        self.mode
    }

    pub fn value(&self) -> NaiveDateTime {
        self.value
    }

    pub fn fields(&self) -> &'static [SpinnerField] {
        match (self.mode, self.is_24_hour) {
            (WidgetMode::Date, _) => DATE_FIELDS,
            (WidgetMode::Time, true) => TIME_FIELDS_24,
            (WidgetMode::Time, false) => TIME_FIELDS_12,
        }
    }

    pub fn focused_field(&self) -> SpinnerField {
        self.fields()[self.focused]
    }

    pub fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % self.fields().len();
    }

    pub fn focus_previous(&mut self) {
        let len = self.fields().len();
        self.focused = (self.focused + len - 1) % len;
    }

    pub fn increment(&mut self) {
        self.step(1);
    }

    pub fn decrement(&mut self) {
        self.step(-1);
    }

    /// Display text of one segment.
    pub fn segment_text(&self, field: SpinnerField) -> String {
        let format = match field {
            SpinnerField::Year => "%Y",
            SpinnerField::Month => "%m",
            SpinnerField::Day => "%d",
            SpinnerField::Hour if self.is_24_hour => "%H",
            SpinnerField::Hour => "%I",
            SpinnerField::Minute => "%M",
            SpinnerField::Meridiem => "%p",
        };
        self.value.format(format).to_string()
    }

    /// The value reported when the user picks: the day at midnight in date
    /// mode, the minute with seconds cleared in time mode.
    pub fn picked_value(&self) -> NaiveDateTime {
        let date = self.value.date();
        match self.mode {
            WidgetMode::Date => date.and_time(NaiveTime::MIN),
            WidgetMode::Time => date.and_hms_opt(self.value.hour(), self.value.minute(), 0).unwrap_or(self.value),
        }
    }

    /// Human-readable range for date mode, if any bound is set.
    pub fn bounds_hint(&self) -> Option<String> {
        if self.mode != WidgetMode::Date {
            return None;
        }
        let day = |value: Option<NaiveDateTime>| value.map(|v| v.format("%Y-%m-%d").to_string());
        match (day(self.bounds.min), day(self.bounds.max)) {
            (None, None) => None,
            (Some(min), None) => Some(format!("from {min}")),
            (None, Some(max)) => Some(format!("until {max}")),
            (Some(min), Some(max)) if self.has_empty_range() => Some(format!("{min} to {max} (empty range)")),
            (Some(min), Some(max)) => Some(format!("{min} to {max}")),
        }
    }

    /// True in date mode when `min` lies after `max`.
    pub fn has_empty_range(&self) -> bool {
        self.mode == WidgetMode::Date && self.bounds.is_inverted()
    }

    fn step(&mut self, delta: i32) {
        let Some(next) = self.stepped(self.focused_field(), delta) else {
            return;
        };
        if self.allows(next) {
            self.value = next;
        }
    }

    fn stepped(&self, field: SpinnerField, delta: i32) -> Option<NaiveDateTime> {
        let value = self.value;
        match field {
            SpinnerField::Year => shift_months(value, delta * 12),
            SpinnerField::Month => shift_months(value, delta),
            SpinnerField::Day => value.checked_add_signed(TimeDelta::days(i64::from(delta))),
            SpinnerField::Hour => value.with_hour(wrap(value.hour(), delta, 24)),
            SpinnerField::Minute => value.with_minute(wrap(value.minute(), delta, 60)),
            SpinnerField::Meridiem => value.with_hour((value.hour() + 12) % 24),
        }
    }

    fn allows(&self, candidate: NaiveDateTime) -> bool {
        if self.mode != WidgetMode::Date {
            return true;
        }
        let date = candidate.date();
        let above_min = self.bounds.min.is_none_or(|min| date >= min.date());
        let below_max = self.bounds.max.is_none_or(|max| date <= max.date());
        above_min && below_max
    }

    fn clamp_date(&self, value: NaiveDateTime) -> NaiveDateTime {
        let with_date = |date: NaiveDate| date.and_time(value.time());
        match (self.bounds.min, self.bounds.max) {
            (Some(min), _) if value.date() < min.date() => with_date(min.date()),
            (_, Some(max)) if value.date() > max.date() => with_date(max.date()),
            _ => value,
        }
    }
}

fn shift_months(value: NaiveDateTime, delta: i32) -> Option<NaiveDateTime> {
    let months = Months::new(delta.unsigned_abs());
    if delta >= 0 { value.checked_add_months(months) } else { value.checked_sub_months(months) }
}

fn wrap(current: u32, delta: i32, modulus: u32) -> u32 {
    (current as i32 + delta).rem_euclid(modulus as i32) as u32
}
