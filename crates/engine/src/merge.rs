//! Date/time merge rules applied when a widget pick lands on the candidate.

use chrono::NaiveDateTime;
use datepick_types::InteractionStep;

/// Date fields from `date_source`, time-of-day fields from `time_source`.
pub fn combine(date_source: NaiveDateTime, time_source: NaiveDateTime) -> NaiveDateTime {
    date_source.date().and_time(time_source.time())
}

/// Applies a widget pick to the candidate according to the current step.
///
/// `Single` replaces the candidate wholesale. `PickingDate` keeps the
/// candidate's time of day; `PickingTime` keeps the candidate's date.
pub fn merge_pick(step: InteractionStep, candidate: NaiveDateTime, picked: NaiveDateTime) -> NaiveDateTime {
    match step {
        InteractionStep::Single => picked,
        InteractionStep::PickingDate => combine(picked, candidate),
        InteractionStep::PickingTime => combine(candidate, picked),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(hh, mm, 0).unwrap()
    }

    #[test]
    fn date_step_keeps_time_of_day() {
        let merged = merge_pick(InteractionStep::PickingDate, at(2024, 1, 1, 9, 15), at(2024, 3, 15, 0, 0));
        assert_eq!(merged, at(2024, 3, 15, 9, 15));
    }

    #[test]
    fn time_step_keeps_date() {
        let merged = merge_pick(InteractionStep::PickingTime, at(2024, 3, 15, 0, 0), at(1999, 12, 31, 14, 30));
        assert_eq!(merged, at(2024, 3, 15, 14, 30));
    }

    #[test]
    fn single_step_replaces_everything() {
        let merged = merge_pick(InteractionStep::Single, at(2024, 3, 15, 8, 0), at(2025, 7, 4, 18, 45));
        assert_eq!(merged, at(2025, 7, 4, 18, 45));
    }
}
