//! # Selection State Machine
//!
//! The pure transition function behind every date picker control. Given the
//! current [`PickerState`] and a [`PickerEvent`], [`transition`] computes the
//! next state together with the [`Effect`]s the caller must carry out. It
//! never touches a clock, a formatter or the screen, so every `(state,
//! event)` pair can be exercised directly in tests.
//!
//! ## States
//!
//! - `Closed`: nothing on screen, no candidate.
//! - `Open`: a candidate plus the current interaction step.
//! - `Closing`: a close was requested under the modal strategy and the hide
//!   transition is still running. Observers see `PresentationState::Closed`;
//!   the step and candidate are only discarded once
//!   `TransitionFinished(Close)` arrives.
//!
//! Every pair not listed in the transition table resolves to an explicit
//! [`Disposition::Ignored`] with a reason; parse failures resolve to
//! [`Disposition::Rejected`] and leave the state untouched.

use std::fmt;

use chrono::NaiveDateTime;
use datepick_types::{
    Bounds, DateInput, Effect, InteractionStep, PickerConfig, PickerEvent, PresentationState, TransitionDirection, WidgetRequest,
};
use datepick_util::{DatePattern, ParseError, parse_date_input};

use crate::merge::{combine, merge_pick};
use crate::resolve::{resolve_bounds, resolve_default};

/// Candidate and step of an interaction in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenState {
    /// Current position in the interaction
    pub step: InteractionStep,
    /// In-progress selection
    pub candidate: NaiveDateTime,
    /// Bounds resolved when the control opened, forwarded to the widget
    pub bounds: Bounds,
}

/// State of a single control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PickerState {
    #[default]
    Closed,
    Open(OpenState),
    Closing(OpenState),
}

impl PickerState {
    /// Presentation as seen by the host. `Closing` already reads as closed.
    pub fn presentation(&self) -> PresentationState {
        match self {
            Self::Open(_) => PresentationState::Open,
            Self::Closed | Self::Closing(_) => PresentationState::Closed,
        }
    }

    /// Step of an open interaction.
    pub fn step(&self) -> Option<InteractionStep> {
        match self {
            Self::Open(open) => Some(open.step),
            _ => None,
        }
    }

    /// Candidate of an open interaction.
    pub fn candidate(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Open(open) => Some(open.candidate),
            _ => None,
        }
    }

    /// True while a modal hide transition is pending.
    pub fn is_closing(&self) -> bool {
        matches!(self, Self::Closing(_))
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Open(_) => "open",
            Self::Closing(_) => "closing",
        }
    }
}

impl fmt::Display for PickerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open(open) | Self::Closing(open) => write!(f, "{}({:?}, {})", self.name(), open.step, open.candidate),
            Self::Closed => f.write_str(self.name()),
        }
    }
}

/// Why an event left the state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// `open` while the control is disabled
    Disabled,
    /// `open` while already open
    AlreadyOpen,
    /// Widget or chrome event with no open interaction
    NotOpen,
    /// Cancel/Confirm under a strategy without those actions
    NoConfirmActions,
    /// Transition completion that does not finish a pending close
    NoPendingClose,
}

/// How the machine handled an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// The event caused a transition
    Applied,
    /// Documented no-op
    Ignored(IgnoreReason),
    /// A value could not be parsed; the state was kept
    Rejected(ParseError),
}

impl Disposition {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Next state, requested effects and the disposition of one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionOutcome {
    pub state: PickerState,
    pub effects: Vec<Effect>,
    pub disposition: Disposition,
}

impl TransitionOutcome {
    fn applied(state: PickerState, effects: Vec<Effect>) -> Self {
        Self {
            state,
            effects,
            disposition: Disposition::Applied,
        }
    }

    fn unchanged(state: &PickerState, disposition: Disposition) -> Self {
        Self {
            state: *state,
            effects: Vec::new(),
            disposition,
        }
    }
}

/// Read-only inputs to a transition.
#[derive(Debug, Clone, Copy)]
pub struct TransitionContext<'a> {
    /// Control configuration
    pub config: &'a PickerConfig,
    /// Compiled form of `config.pattern()`
    pub pattern: &'a DatePattern,
    /// The current time, used only when opening
    pub now: NaiveDateTime,
}

/// Computes the next state for `event`.
pub fn transition(state: &PickerState, event: &PickerEvent, ctx: &TransitionContext<'_>) -> TransitionOutcome {
    let ignored = |reason| TransitionOutcome::unchanged(state, Disposition::Ignored(reason));
    let has_confirm_actions = ctx.config.presentation.has_confirm_actions();

    match (state, event) {
        (_, PickerEvent::Open) if ctx.config.disabled => ignored(IgnoreReason::Disabled),
        (PickerState::Open(_), PickerEvent::Open) => ignored(IgnoreReason::AlreadyOpen),
        (PickerState::Closed | PickerState::Closing(_), PickerEvent::Open) => open(state, ctx),

        (PickerState::Open(open), PickerEvent::WidgetChanged(input)) => widget_changed(state, open, input, ctx),
        (PickerState::Open(open), PickerEvent::WidgetDismissed) => close(open, false, ctx),
        (PickerState::Open(_), PickerEvent::CancelPressed | PickerEvent::ConfirmPressed) if !has_confirm_actions => {
            ignored(IgnoreReason::NoConfirmActions)
        }
        (PickerState::Open(open), PickerEvent::CancelPressed) => close(open, false, ctx),
        (PickerState::Open(open), PickerEvent::ConfirmPressed) => close(open, true, ctx),

        (PickerState::Closing(_), PickerEvent::TransitionFinished(TransitionDirection::Close)) => {
            TransitionOutcome::applied(PickerState::Closed, vec![Effect::HideWidget, Effect::Closed])
        }
        (_, PickerEvent::TransitionFinished(_)) => ignored(IgnoreReason::NoPendingClose),

        (
            PickerState::Closed | PickerState::Closing(_),
            PickerEvent::WidgetChanged(_) | PickerEvent::WidgetDismissed | PickerEvent::CancelPressed | PickerEvent::ConfirmPressed,
        ) => ignored(IgnoreReason::NotOpen),
    }
}

/// Builds the widget request serving `open`.
pub fn widget_request(open: &OpenState, config: &PickerConfig) -> WidgetRequest {
    WidgetRequest {
        mode: open.step.widget_mode(config.mode),
        value: open.candidate,
        bounds: open.bounds,
        is_24_hour: config.is_24_hour,
    }
}

fn open(state: &PickerState, ctx: &TransitionContext<'_>) -> TransitionOutcome {
    let config = ctx.config;
    let resolved = resolve_bounds(config.min.as_ref(), config.max.as_ref(), ctx.now, ctx.pattern).and_then(|bounds| {
        resolve_default(config.value.as_ref(), config.min.as_ref(), config.max.as_ref(), ctx.now, ctx.pattern)
            .map(|candidate| (bounds, candidate))
    });
    let (bounds, candidate) = match resolved {
        Ok(resolved) => resolved,
        Err(error) => return TransitionOutcome::unchanged(state, Disposition::Rejected(error)),
    };

    let open = OpenState {
        step: config.mode.initial_step(),
        candidate,
        bounds,
    };

    let mut effects = Vec::with_capacity(3);
    if config.presentation.is_animated() {
        effects.push(Effect::StartTransition(TransitionDirection::Open));
    }
    effects.push(Effect::ShowWidget(widget_request(&open, config)));
    effects.push(Effect::Opened);

    TransitionOutcome::applied(PickerState::Open(open), effects)
}

fn widget_changed(state: &PickerState, open: &OpenState, input: &DateInput, ctx: &TransitionContext<'_>) -> TransitionOutcome {
    let picked = match parse_date_input(input, ctx.pattern, open.candidate) {
        Ok(picked) => picked,
        Err(error) => return TransitionOutcome::unchanged(state, Disposition::Rejected(error)),
    };

    match open.step {
        InteractionStep::PickingDate => {
            let next = OpenState {
                step: InteractionStep::PickingTime,
                candidate: combine(picked, open.candidate),
                bounds: open.bounds,
            };
            let request = widget_request(&next, ctx.config);
            TransitionOutcome::applied(PickerState::Open(next), vec![Effect::ShowWidget(request)])
        }
        InteractionStep::Single | InteractionStep::PickingTime => {
            let committed = OpenState {
                candidate: merge_pick(open.step, open.candidate, picked),
                ..*open
            };
            close(&committed, true, ctx)
        }
    }
}

fn close(open: &OpenState, commit: bool, ctx: &TransitionContext<'_>) -> TransitionOutcome {
    let mut effects = Vec::with_capacity(3);
    if commit {
        effects.push(Effect::Commit(open.candidate));
    }

    if ctx.config.presentation.is_animated() {
        effects.push(Effect::StartTransition(TransitionDirection::Close));
        TransitionOutcome::applied(PickerState::Closing(*open), effects)
    } else {
        effects.push(Effect::HideWidget);
        effects.push(Effect::Closed);
        TransitionOutcome::applied(PickerState::Closed, effects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use datepick_types::{PresentationStrategy, SelectionMode, WidgetMode};

    fn at(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(hh, mm, 0).unwrap()
    }

    fn run(state: &PickerState, event: PickerEvent, config: &PickerConfig) -> TransitionOutcome {
        let pattern = DatePattern::compile(config.pattern());
        let ctx = TransitionContext {
            config,
            pattern: &pattern,
            now: at(2024, 6, 1, 12, 0),
        };
        transition(state, &event, &ctx)
    }

    fn open_state(step: InteractionStep, candidate: NaiveDateTime) -> PickerState {
        PickerState::Open(OpenState {
            step,
            candidate,
            bounds: Bounds::unbounded(),
        })
    }

    #[test]
    fn open_from_closed_resolves_candidate_and_shows_widget() {
        let config = PickerConfig::new(SelectionMode::Date).with_presentation(PresentationStrategy::Inline);
        let outcome = run(&PickerState::Closed, PickerEvent::Open, &config);

        assert_eq!(outcome.disposition, Disposition::Applied);
        assert_eq!(outcome.state, open_state(InteractionStep::Single, at(2024, 6, 1, 12, 0)));
        assert_eq!(outcome.effects.len(), 2);
        assert!(matches!(&outcome.effects[0], Effect::ShowWidget(request) if request.mode == WidgetMode::Date));
        assert_eq!(outcome.effects[1], Effect::Opened);
    }

    #[test]
    fn modal_open_starts_transition_first() {
        let config = PickerConfig::new(SelectionMode::DateTime);
        let outcome = run(&PickerState::Closed, PickerEvent::Open, &config);

        assert_eq!(outcome.effects[0], Effect::StartTransition(TransitionDirection::Open));
        assert_eq!(outcome.state.step(), Some(InteractionStep::PickingDate));
    }

    #[test]
    fn open_with_malformed_value_is_rejected() {
        let config = PickerConfig::new(SelectionMode::Date).with_value("31/31/2024");
        let outcome = run(&PickerState::Closed, PickerEvent::Open, &config);

        assert!(matches!(outcome.disposition, Disposition::Rejected(_)));
        assert_eq!(outcome.state, PickerState::Closed);
        assert!(outcome.effects.is_empty());
    }

    #[test]
    fn open_with_malformed_bound_is_rejected_even_with_explicit_value() {
        let config = PickerConfig::new(SelectionMode::Date).with_value("2024-01-01").with_max("later");
        let outcome = run(&PickerState::Closed, PickerEvent::Open, &config);
        assert!(matches!(outcome.disposition, Disposition::Rejected(ref error) if error.input == "later"));
    }

    #[test]
    fn disabled_open_is_ignored() {
        let config = PickerConfig::new(SelectionMode::Date).with_disabled(true);
        let outcome = run(&PickerState::Closed, PickerEvent::Open, &config);
        assert_eq!(outcome.disposition, Disposition::Ignored(IgnoreReason::Disabled));
        assert_eq!(outcome.state, PickerState::Closed);
    }

    #[test]
    fn open_while_open_keeps_candidate() {
        let config = PickerConfig::new(SelectionMode::Date);
        let state = open_state(InteractionStep::Single, at(2000, 1, 1, 0, 0));
        let outcome = run(&state, PickerEvent::Open, &config);
        assert_eq!(outcome.disposition, Disposition::Ignored(IgnoreReason::AlreadyOpen));
        assert_eq!(outcome.state, state);
    }

    #[test]
    fn date_step_advances_to_time_step() {
        let config = PickerConfig::new(SelectionMode::DateTime);
        let state = open_state(InteractionStep::PickingDate, at(2024, 1, 1, 0, 0));
        let outcome = run(&state, PickerEvent::WidgetChanged("2024-03-15".into()), &config);

        assert_eq!(outcome.state, open_state(InteractionStep::PickingTime, at(2024, 3, 15, 0, 0)));
        assert!(matches!(&outcome.effects[..], [Effect::ShowWidget(request)] if request.mode == WidgetMode::Time));
    }

    #[test]
    fn time_step_commits_merged_candidate() {
        let config = PickerConfig::new(SelectionMode::DateTime);
        let state = open_state(InteractionStep::PickingTime, at(2024, 3, 15, 0, 0));
        let outcome = run(&state, PickerEvent::WidgetChanged("14:30".into()), &config);

        assert_eq!(outcome.effects[0], Effect::Commit(at(2024, 3, 15, 14, 30)));
        assert!(outcome.state.is_closing());
        assert_eq!(outcome.state.presentation(), PresentationState::Closed);
    }

    #[test]
    fn malformed_widget_value_keeps_state() {
        let config = PickerConfig::new(SelectionMode::DateTime);
        let state = open_state(InteractionStep::PickingDate, at(2024, 1, 1, 0, 0));
        let outcome = run(&state, PickerEvent::WidgetChanged("tomorrow-ish".into()), &config);

        assert!(matches!(outcome.disposition, Disposition::Rejected(_)));
        assert_eq!(outcome.state, state);
        assert!(outcome.effects.is_empty());
    }

    #[test]
    fn dismiss_closes_without_commit() {
        for presentation in [PresentationStrategy::Inline, PresentationStrategy::ModalConfirm] {
            let config = PickerConfig::new(SelectionMode::DateTime).with_presentation(presentation);
            let state = open_state(InteractionStep::PickingTime, at(2024, 3, 15, 0, 0));
            let outcome = run(&state, PickerEvent::WidgetDismissed, &config);

            assert!(!outcome.effects.iter().any(|effect| matches!(effect, Effect::Commit(_))));
            assert_eq!(outcome.state.presentation(), PresentationState::Closed);
        }
    }

    #[test]
    fn confirm_commits_incomplete_datetime() {
        let config = PickerConfig::new(SelectionMode::DateTime);
        let state = open_state(InteractionStep::PickingDate, at(2024, 1, 1, 7, 45));
        let outcome = run(&state, PickerEvent::ConfirmPressed, &config);

        assert_eq!(
            outcome.effects,
            vec![Effect::Commit(at(2024, 1, 1, 7, 45)), Effect::StartTransition(TransitionDirection::Close)]
        );
    }

    #[test]
    fn inline_ignores_confirm_actions() {
        let config = PickerConfig::new(SelectionMode::Date).with_presentation(PresentationStrategy::Inline);
        let state = open_state(InteractionStep::Single, at(2024, 1, 1, 0, 0));
        for event in [PickerEvent::ConfirmPressed, PickerEvent::CancelPressed] {
            let outcome = run(&state, event, &config);
            assert_eq!(outcome.disposition, Disposition::Ignored(IgnoreReason::NoConfirmActions));
            assert_eq!(outcome.state, state);
        }
    }

    #[test]
    fn closing_completes_only_on_close_transition() {
        let config = PickerConfig::new(SelectionMode::Date);
        let closing = PickerState::Closing(OpenState {
            step: InteractionStep::Single,
            candidate: at(2024, 1, 1, 0, 0),
            bounds: Bounds::unbounded(),
        });

        let stale = run(&closing, PickerEvent::TransitionFinished(TransitionDirection::Open), &config);
        assert_eq!(stale.disposition, Disposition::Ignored(IgnoreReason::NoPendingClose));
        assert_eq!(stale.state, closing);

        let finished = run(&closing, PickerEvent::TransitionFinished(TransitionDirection::Close), &config);
        assert_eq!(finished.state, PickerState::Closed);
        assert_eq!(finished.effects, vec![Effect::HideWidget, Effect::Closed]);
    }

    #[test]
    fn events_while_closing_are_ignored() {
        let config = PickerConfig::new(SelectionMode::Date);
        let closing = PickerState::Closing(OpenState {
            step: InteractionStep::Single,
            candidate: at(2024, 1, 1, 0, 0),
            bounds: Bounds::unbounded(),
        });
        for event in [
            PickerEvent::WidgetChanged("2024-02-02".into()),
            PickerEvent::WidgetDismissed,
            PickerEvent::CancelPressed,
            PickerEvent::ConfirmPressed,
        ] {
            let outcome = run(&closing, event, &config);
            assert_eq!(outcome.disposition, Disposition::Ignored(IgnoreReason::NotOpen));
        }
    }

    #[test]
    fn reopen_while_closing_starts_fresh_interaction() {
        let config = PickerConfig::new(SelectionMode::DateTime);
        let closing = PickerState::Closing(OpenState {
            step: InteractionStep::PickingTime,
            candidate: at(2024, 1, 1, 0, 0),
            bounds: Bounds::unbounded(),
        });
        let outcome = run(&closing, PickerEvent::Open, &config);

        assert_eq!(outcome.state, open_state(InteractionStep::PickingDate, at(2024, 6, 1, 12, 0)));
        assert_eq!(outcome.effects[0], Effect::StartTransition(TransitionDirection::Open));
    }
}
