//! The host-facing date picker controller.
//!
//! [`DatePicker`] owns one control's configuration, its [`PickerState`] and
//! its chrome transition. It feeds events through the pure transition
//! function, performs the host-facing effects (open notification, formatted
//! commit, transition start) and hands the remaining presentation effects
//! back to the caller.

use std::fmt;
use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use datepick_types::{DateInput, Effect, InteractionStep, PickerConfig, PickerEvent, PresentationState, Selection, WidgetRequest};
use datepick_util::{DatePattern, parse_date_input};
use tracing::{debug, warn};

use crate::animation::VisualTransition;
use crate::format::{PatternFormatter, ValueFormatter};
use crate::machine::{Disposition, PickerState, TransitionContext, transition, widget_request};

/// Receives the control's notifications.
pub trait PickerHost {
    /// Called exactly once per committed interaction.
    fn on_change(&mut self, formatted: &str, value: NaiveDateTime);

    /// Called once per successful open.
    fn on_open(&mut self) {}
}

/// A host that simply records what it was told. Handy for previews and tests.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordingHost {
    /// Every committed selection, oldest first
    pub selections: Vec<Selection>,
    /// Number of `on_open` notifications
    pub opens: usize,
}

impl PickerHost for RecordingHost {
    fn on_change(&mut self, formatted: &str, value: NaiveDateTime) {
        self.selections.push(Selection {
            formatted: formatted.to_string(),
            value,
        });
    }

    fn on_open(&mut self) {
        self.opens += 1;
    }
}

/// Source of the current wall-clock time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Reads the local wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// What happened to a dispatched event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    /// How the state machine handled the event
    pub disposition: Disposition,
    /// All effects of the transition; presentation effects are left for the caller
    pub effects: Vec<Effect>,
}

/// A single date/time selection control.
pub struct DatePicker {
    config: PickerConfig,
    pattern: DatePattern,
    display_value: Option<NaiveDateTime>,
    state: PickerState,
    transition: VisualTransition,
    formatter: Box<dyn ValueFormatter>,
    clock: Box<dyn Clock>,
}

impl fmt::Debug for DatePicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatePicker")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("transition", &self.transition)
            .finish_non_exhaustive()
    }
}

impl DatePicker {
    /// Creates a closed control using the system clock and the pattern formatter.
    pub fn new(config: PickerConfig) -> Self {
        let pattern = DatePattern::compile(config.pattern());
        let transition = VisualTransition::new(config.transition_duration());
        let mut picker = Self {
            config,
            pattern,
            display_value: None,
            state: PickerState::Closed,
            transition,
            formatter: Box::new(PatternFormatter),
            clock: Box::new(SystemClock),
        };
        picker.refresh_display_value();
        picker
    }

    /// Replaces the formatting collaborator.
    pub fn with_formatter(mut self, formatter: impl ValueFormatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Replaces the clock used to compute defaults.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self.refresh_display_value();
        self
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn pattern(&self) -> &DatePattern {
        &self.pattern
    }

    pub fn state(&self) -> &PickerState {
        &self.state
    }

    pub fn presentation(&self) -> PresentationState {
        self.state.presentation()
    }

    pub fn step(&self) -> Option<InteractionStep> {
        self.state.step()
    }

    pub fn candidate(&self) -> Option<NaiveDateTime> {
        self.state.candidate()
    }

    /// The chrome transition; its value drives the modal's visible height.
    pub fn transition(&self) -> &VisualTransition {
        &self.transition
    }

    /// True while a show or hide transition is running.
    pub fn is_animating(&self) -> bool {
        self.transition.is_running()
    }

    /// Widget request for the current interaction, including while closing.
    pub fn widget_request(&self) -> Option<WidgetRequest> {
        match &self.state {
            PickerState::Open(open) | PickerState::Closing(open) => Some(widget_request(open, &self.config)),
            PickerState::Closed => None,
        }
    }

    /// Replaces the host-supplied value. Takes effect on the next open.
    pub fn set_value(&mut self, value: Option<DateInput>) {
        self.config.value = value;
        self.refresh_display_value();
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.config.disabled = disabled;
    }

    /// Formats `value` with the control's pattern and locale.
    pub fn format(&self, value: NaiveDateTime) -> String {
        self.formatter.format(value, &self.pattern, &self.config.locale)
    }

    /// Text for the trigger: the formatted host value, or the placeholder.
    pub fn display_text(&self) -> String {
        match self.display_value {
            Some(value) => self.format(value),
            None => self.config.placeholder.clone(),
        }
    }

    /// Feeds one event through the state machine and performs host effects.
    pub fn dispatch(&mut self, event: PickerEvent, host: &mut dyn PickerHost) -> Dispatch {
        let ctx = TransitionContext {
            config: &self.config,
            pattern: &self.pattern,
            now: self.clock.now(),
        };
        let outcome = transition(&self.state, &event, &ctx);

        match &outcome.disposition {
            Disposition::Applied => debug!(from = %self.state, to = %outcome.state, ?event, "picker transition"),
            Disposition::Ignored(reason) => debug!(state = %self.state, ?event, ?reason, "picker event ignored"),
            Disposition::Rejected(error) => warn!(state = %self.state, %error, "picker value could not be parsed; state kept"),
        }
        self.state = outcome.state;

        for effect in &outcome.effects {
            match effect {
                Effect::Opened => host.on_open(),
                Effect::Commit(value) => {
                    let formatted = self.format(*value);
                    host.on_change(&formatted, *value);
                }
                Effect::StartTransition(direction) => self.transition.start(*direction),
                Effect::ShowWidget(_) | Effect::HideWidget | Effect::Closed => {}
            }
        }

        Dispatch {
            disposition: outcome.disposition,
            effects: outcome.effects,
        }
    }

    pub fn open(&mut self, host: &mut dyn PickerHost) -> Dispatch {
        self.dispatch(PickerEvent::Open, host)
    }

    pub fn widget_changed(&mut self, value: impl Into<DateInput>, host: &mut dyn PickerHost) -> Dispatch {
        self.dispatch(PickerEvent::WidgetChanged(value.into()), host)
    }

    pub fn widget_dismissed(&mut self, host: &mut dyn PickerHost) -> Dispatch {
        self.dispatch(PickerEvent::WidgetDismissed, host)
    }

    pub fn cancel_pressed(&mut self, host: &mut dyn PickerHost) -> Dispatch {
        self.dispatch(PickerEvent::CancelPressed, host)
    }

    pub fn confirm_pressed(&mut self, host: &mut dyn PickerHost) -> Dispatch {
        self.dispatch(PickerEvent::ConfirmPressed, host)
    }

    /// Advances the chrome transition and delivers its completion, if any.
    pub fn tick(&mut self, delta: Duration, host: &mut dyn PickerHost) -> Option<Dispatch> {
        let direction = self.transition.advance(delta)?;
        Some(self.dispatch(PickerEvent::TransitionFinished(direction), host))
    }

    fn refresh_display_value(&mut self) {
        self.display_value = match &self.config.value {
            None => None,
            Some(input) => match parse_date_input(input, &self.pattern, self.clock.now()) {
                Ok(value) => Some(value),
                Err(error) => {
                    warn!(%error, "host value could not be parsed; showing placeholder");
                    None
                }
            },
        };
    }
}
