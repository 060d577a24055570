//! Application state for the picker TUI.
//!
//! `App` owns the date picker controller, the host that records its
//! notifications and the spinner standing in for the platform widget. Input
//! handlers never touch the controller directly: they return [`Effect`]s that
//! the runtime feeds back through [`App::apply`].

use std::time::Duration;

use datepick_engine::{DatePicker, Dispatch, Disposition, RecordingHost};
use datepick_types::{DateInput, Effect as PickerEffect, PickerConfig, PickerEvent, Selection};
use tracing::debug;

use crate::ui::components::date_picker::SpinnerState;
use crate::ui::theme::{self, Theme};

/// Side effects requested by components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Feed an event to the picker
    Picker(PickerEvent),
    /// Leave the application
    Quit,
}

/// Application-level messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    /// Time passed since the previous tick
    Tick(Duration),
    Resize(u16, u16),
}

/// Which part of the open picker receives keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PickerFocus {
    #[default]
    Widget,
    Cancel,
    Confirm,
}

pub struct App {
    pub picker: DatePicker,
    pub host: RecordingHost,
    /// Present while the picker shows its widget
    pub spinner: Option<SpinnerState>,
    pub focus: PickerFocus,
    pub theme: Box<dyn Theme>,
    /// Last rejected input, shown until the next successful event
    pub error: Option<String>,
    /// Leave once a committed interaction has fully closed
    pub exit_on_commit: bool,
    pub should_quit: bool,
    pub dirty: bool,
}

impl App {
    pub fn new(config: PickerConfig) -> Self {
        Self::with_picker(DatePicker::new(config))
    }

    pub fn with_picker(picker: DatePicker) -> Self {
        Self {
            picker,
            host: RecordingHost::default(),
            spinner: None,
            focus: PickerFocus::default(),
            theme: theme::load(),
            error: None,
            exit_on_commit: true,
            should_quit: false,
            dirty: true,
        }
    }

    /// Most recent committed selection, if any.
    pub fn last_selection(&self) -> Option<&Selection> {
        self.host.selections.last()
    }

    /// Carries out one component effect.
    pub fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::Picker(event) => {
                let dispatch = self.picker.dispatch(event, &mut self.host);
                self.present(dispatch);
            }
            Effect::Quit => self.should_quit = true,
        }
        self.dirty = true;
    }

    pub fn update(&mut self, msg: Msg) {
        match msg {
            Msg::Tick(delta) => {
                let was_animating = self.picker.is_animating();
                if let Some(dispatch) = self.picker.tick(delta, &mut self.host) {
                    self.present(dispatch);
                }
                self.dirty |= was_animating;
            }
            Msg::Resize(..) => self.dirty = true,
        }
    }

    fn present(&mut self, dispatch: Dispatch) {
        match &dispatch.disposition {
            Disposition::Applied => self.error = None,
            Disposition::Rejected(error) => self.error = Some(error.to_string()),
            Disposition::Ignored(_) => {}
        }

        for effect in dispatch.effects {
            match effect {
                PickerEffect::ShowWidget(request) => {
                    self.spinner = Some(SpinnerState::from_request(&request));
                    self.focus = PickerFocus::Widget;
                }
                PickerEffect::HideWidget => self.spinner = None,
                PickerEffect::Commit(value) => {
                    // The trigger reflects the committed value, as a controlled host would.
                    self.picker.set_value(Some(DateInput::Native(value)));
                }
                PickerEffect::Closed => {
                    debug!(committed = self.host.selections.len(), "picker closed");
                    if self.exit_on_commit && self.last_selection().is_some() {
                        self.should_quit = true;
                    }
                }
                PickerEffect::Opened | PickerEffect::StartTransition(_) => {}
            }
        }
    }
}
