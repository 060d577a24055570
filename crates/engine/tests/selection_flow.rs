use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use datepick_engine::{DatePicker, Disposition, FixedClock, IgnoreReason, RecordingHost};
use datepick_types::{DateInput, Effect, InteractionStep, PickerConfig, PresentationState, PresentationStrategy, SelectionMode, WidgetMode};
use datepick_util::DatePattern;

fn at(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(hh, mm, 0).unwrap()
}

fn picker(config: PickerConfig, now: NaiveDateTime) -> DatePicker {
    DatePicker::new(config).with_clock(FixedClock(now))
}

fn inline(mode: SelectionMode) -> PickerConfig {
    PickerConfig::new(mode).with_presentation(PresentationStrategy::Inline)
}

#[test]
fn default_is_pulled_up_to_min() {
    let mut picker = picker(inline(SelectionMode::Date).with_min("2024-01-01"), at(2023, 6, 1, 12, 0));
    let mut host = RecordingHost::default();

    picker.open(&mut host);
    assert_eq!(picker.candidate(), Some(at(2024, 1, 1, 0, 0)));
}

#[test]
fn default_is_pulled_down_to_max() {
    let mut picker = picker(inline(SelectionMode::Date).with_max("2024-01-01"), at(2025, 6, 1, 12, 0));
    let mut host = RecordingHost::default();

    picker.open(&mut host);
    assert_eq!(picker.candidate(), Some(at(2024, 1, 1, 0, 0)));
}

#[test]
fn explicit_value_bypasses_bounds() {
    let config = inline(SelectionMode::Date).with_value("2020-05-05").with_min("2024-01-01");
    let mut picker = picker(config, at(2023, 6, 1, 12, 0));
    let mut host = RecordingHost::default();

    picker.open(&mut host);
    assert_eq!(picker.candidate(), Some(at(2020, 5, 5, 0, 0)));
}

#[test]
fn datetime_flow_merges_date_then_time() {
    let mut picker = picker(inline(SelectionMode::DateTime), at(2024, 1, 1, 0, 0));
    let mut host = RecordingHost::default();

    let opened = picker.open(&mut host);
    assert!(opened.disposition.is_applied());
    assert_eq!(picker.step(), Some(InteractionStep::PickingDate));

    let date_pick = picker.widget_changed("2024-03-15", &mut host);
    assert!(matches!(&date_pick.effects[..], [Effect::ShowWidget(request)] if request.mode == WidgetMode::Time));
    assert_eq!(picker.step(), Some(InteractionStep::PickingTime));
    assert_eq!(picker.candidate(), Some(at(2024, 3, 15, 0, 0)));
    assert!(host.selections.is_empty());

    picker.widget_changed("14:30", &mut host);
    assert_eq!(host.selections.len(), 1);
    assert_eq!(host.selections[0].formatted, "2024-03-15 14:30");
    assert_eq!(host.selections[0].value, at(2024, 3, 15, 14, 30));
    assert_eq!(picker.presentation(), PresentationState::Closed);
}

#[test]
fn single_step_commits_once_and_closes() {
    let mut picker = picker(inline(SelectionMode::Time), at(2024, 2, 2, 8, 0));
    let mut host = RecordingHost::default();

    picker.open(&mut host);
    let commit = picker.widget_changed(DateInput::from(at(2024, 2, 2, 17, 5)), &mut host);

    assert_eq!(host.selections.len(), 1);
    assert_eq!(host.selections[0].formatted, "17:05");
    assert_eq!(commit.effects.last(), Some(&Effect::Closed));
    assert_eq!(picker.presentation(), PresentationState::Closed);

    let late = picker.widget_changed("18:00", &mut host);
    assert_eq!(late.disposition, Disposition::Ignored(IgnoreReason::NotOpen));
    assert_eq!(host.selections.len(), 1);
}

#[test]
fn dismiss_never_commits() {
    for mode in [SelectionMode::Date, SelectionMode::Time, SelectionMode::DateTime] {
        let mut picker = picker(inline(mode), at(2024, 1, 1, 0, 0));
        let mut host = RecordingHost::default();

        picker.open(&mut host);
        picker.widget_dismissed(&mut host);
        assert!(host.selections.is_empty(), "{mode} committed on dismiss");
        assert_eq!(picker.state().presentation(), PresentationState::Closed);
    }
}

#[test]
fn disabled_control_never_opens() {
    let mut picker = picker(inline(SelectionMode::Date).with_disabled(true), at(2024, 1, 1, 0, 0));
    let mut host = RecordingHost::default();

    let dispatch = picker.open(&mut host);
    assert_eq!(dispatch.disposition, Disposition::Ignored(IgnoreReason::Disabled));
    assert_eq!(host.opens, 0);
    assert_eq!(picker.presentation(), PresentationState::Closed);

    picker.set_disabled(false);
    picker.open(&mut host);
    assert_eq!(host.opens, 1);
}

#[test]
fn reopening_keeps_the_candidate() {
    let mut picker = picker(inline(SelectionMode::DateTime), at(2024, 1, 1, 0, 0));
    let mut host = RecordingHost::default();

    picker.open(&mut host);
    picker.widget_changed("2024-03-15", &mut host);
    let again = picker.open(&mut host);

    assert_eq!(again.disposition, Disposition::Ignored(IgnoreReason::AlreadyOpen));
    assert_eq!(picker.step(), Some(InteractionStep::PickingTime));
    assert_eq!(picker.candidate(), Some(at(2024, 3, 15, 0, 0)));
    assert_eq!(host.opens, 1);
}

#[test]
fn modal_close_completes_after_transition() {
    let config = PickerConfig::new(SelectionMode::Date).with_value("2024-04-04");
    let mut picker = picker(config, at(2024, 1, 1, 0, 0));
    let mut host = RecordingHost::default();
    let frame = Duration::from_millis(150);

    picker.open(&mut host);
    assert!(picker.is_animating());
    assert!(picker.tick(frame, &mut host).is_none());
    let shown = picker.tick(frame, &mut host).expect("open transition finishes");
    assert_eq!(shown.disposition, Disposition::Ignored(IgnoreReason::NoPendingClose));
    assert_eq!(picker.transition().value(), 1.0);

    picker.confirm_pressed(&mut host);
    assert_eq!(host.selections.len(), 1);
    assert_eq!(host.selections[0].formatted, "2024-04-04");
    assert_eq!(picker.presentation(), PresentationState::Closed);
    assert!(picker.state().is_closing());
    assert!(picker.widget_request().is_some());

    picker.tick(frame, &mut host);
    let hidden = picker.tick(frame, &mut host).expect("close transition finishes");
    assert_eq!(hidden.effects, vec![Effect::HideWidget, Effect::Closed]);
    assert!(!picker.state().is_closing());
    assert!(picker.widget_request().is_none());
    assert_eq!(host.selections.len(), 1);
}

#[test]
fn modal_cancel_discards_candidate() {
    let mut picker = picker(PickerConfig::new(SelectionMode::DateTime), at(2024, 1, 1, 0, 0));
    let mut host = RecordingHost::default();

    picker.open(&mut host);
    picker.widget_changed("2024-03-15", &mut host);
    picker.cancel_pressed(&mut host);
    picker.tick(Duration::from_secs(1), &mut host);

    assert!(host.selections.is_empty());
    assert_eq!(picker.candidate(), None);
}

#[test]
fn malformed_config_value_is_rejected_on_open() {
    let mut picker = picker(inline(SelectionMode::Date).with_value("not a date"), at(2024, 1, 1, 0, 0));
    let mut host = RecordingHost::default();

    let dispatch = picker.open(&mut host);
    assert!(matches!(dispatch.disposition, Disposition::Rejected(ref error) if error.input == "not a date"));
    assert_eq!(host.opens, 0);
    assert_eq!(picker.display_text(), "Select date");
}

#[test]
fn display_text_follows_set_value() {
    let mut picker = picker(inline(SelectionMode::Date).with_format("DD/MM/YYYY"), at(2024, 1, 1, 0, 0));
    assert_eq!(picker.display_text(), "Select date");

    picker.set_value(Some("2024-07-09".into()));
    assert_eq!(picker.display_text(), "09/07/2024");

    picker.set_value(None);
    assert_eq!(picker.display_text(), "Select date");
}

#[test]
fn custom_formatter_receives_pattern_and_locale() {
    let formatter = |value: NaiveDateTime, pattern: &DatePattern, locale: &str| format!("{locale}|{}", pattern.format(value));
    let mut picker = picker(inline(SelectionMode::Date), at(2024, 1, 1, 0, 0)).with_formatter(formatter);
    let mut host = RecordingHost::default();

    picker.open(&mut host);
    picker.widget_changed("2024-02-29", &mut host);
    assert_eq!(host.selections[0].formatted, "en-US|2024-02-29");
}
