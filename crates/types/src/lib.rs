use std::{error::Error, fmt, str::FromStr, time::Duration};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Output pattern used when `mode` is [`SelectionMode::Date`] and no explicit format is set.
pub const DEFAULT_DATE_PATTERN: &str = "YYYY-MM-DD";
/// Output pattern used when `mode` is [`SelectionMode::Time`] and no explicit format is set.
pub const DEFAULT_TIME_PATTERN: &str = "HH:mm";
/// Output pattern used when `mode` is [`SelectionMode::DateTime`] and no explicit format is set.
pub const DEFAULT_DATETIME_PATTERN: &str = "YYYY-MM-DD HH:mm";

/// Which parts of a point in time the control lets the user select.
///
/// Fixed when the control is configured; a control never switches modes.
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Calendar date only
    #[default]
    Date,
    /// Time of day only
    Time,
    /// Date first, then time of day
    DateTime,
}

impl SelectionMode {
    /// Pattern applied to committed values when the host did not supply one.
    pub const fn default_pattern(self) -> &'static str {
        match self {
            Self::Date => DEFAULT_DATE_PATTERN,
            Self::Time => DEFAULT_TIME_PATTERN,
            Self::DateTime => DEFAULT_DATETIME_PATTERN,
        }
    }

    /// Step the interaction starts in after a successful open.
    pub const fn initial_step(self) -> InteractionStep {
        match self {
            Self::Date | Self::Time => InteractionStep::Single,
            Self::DateTime => InteractionStep::PickingDate,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTime => "datetime",
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SelectionMode {
    type Err = ParseSelectionModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "time" => Ok(Self::Time),
            "datetime" | "date-time" | "date_time" => Ok(Self::DateTime),
            _ => Err(ParseSelectionModeError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSelectionModeError(String);

impl fmt::Display for ParseSelectionModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid selection mode '{}'; expected 'date', 'time' or 'datetime'", self.0)
    }
}

impl Error for ParseSelectionModeError {}

/// The single-purpose mode requested from the picker widget.
///
/// The widget only ever picks a date or a time; combined selection is
/// assembled by the state machine from two widget picks.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetMode {
    Date,
    Time,
}

/// Position inside an open interaction.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionStep {
    /// Date-only or time-only: one widget pick completes the interaction
    Single,
    /// First half of a combined interaction
    PickingDate,
    /// Second half of a combined interaction
    PickingTime,
}

impl InteractionStep {
    /// Widget mode required to serve this step for the given selection mode.
    pub const fn widget_mode(self, mode: SelectionMode) -> WidgetMode {
        match (self, mode) {
            (Self::Single, SelectionMode::Time) | (Self::PickingTime, _) => WidgetMode::Time,
            _ => WidgetMode::Date,
        }
    }
}

/// Whether the picker surface and its chrome are logically visible.
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresentationState {
    #[default]
    Closed,
    Open,
}

/// How the control presents the picker widget.
///
/// Selected once at construction so the state machine itself stays free of
/// platform branching.
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationStrategy {
    /// Widget appears in place; no confirm chrome, no transition.
    Inline,
    /// Widget sits in an animated modal with Cancel and Confirm actions.
    #[default]
    ModalConfirm,
}

impl PresentationStrategy {
    /// True when Cancel/Confirm actions are rendered and honored.
    pub const fn has_confirm_actions(self) -> bool {
        matches!(self, Self::ModalConfirm)
    }

    /// True when opening and closing run through a visual transition.
    pub const fn is_animated(self) -> bool {
        matches!(self, Self::ModalConfirm)
    }
}

impl FromStr for PresentationStrategy {
    type Err = ParsePresentationStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inline" => Ok(Self::Inline),
            "modal" | "modal_confirm" | "modal-confirm" => Ok(Self::ModalConfirm),
            _ => Err(ParsePresentationStrategyError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePresentationStrategyError(String);

impl fmt::Display for ParsePresentationStrategyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid presentation '{}'; expected 'inline' or 'modal'", self.0)
    }
}

impl Error for ParsePresentationStrategyError {}

/// Target of a chrome show/hide transition.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum TransitionDirection {
    Open,
    Close,
}

/// A value supplied from outside the control: either already a point in
/// time or text that still needs parsing against the configured pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateInput {
    Native(NaiveDateTime),
    Text(String),
}

impl From<NaiveDateTime> for DateInput {
    fn from(value: NaiveDateTime) -> Self {
        Self::Native(value)
    }
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for DateInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl fmt::Display for DateInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Optional lower and upper limits for the computed default value.
///
/// `min <= max` is expected when both are present; an inverted pair is a
/// configuration error that simply yields an empty range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Option<NaiveDateTime>,
    pub max: Option<NaiveDateTime>,
}

impl Bounds {
    pub const fn new(min: Option<NaiveDateTime>, max: Option<NaiveDateTime>) -> Self {
        Self { min, max }
    }

    pub const fn unbounded() -> Self {
        Self { min: None, max: None }
    }

    /// Returns true when `value` satisfies every present limit.
    pub fn contains(&self, value: NaiveDateTime) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }

    /// Returns true when both limits are present and inverted.
    pub fn is_inverted(&self) -> bool {
        matches!((self.min, self.max), (Some(min), Some(max)) if min > max)
    }
}

/// Everything the picker widget needs to render one pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetRequest {
    /// Date or time surface
    pub mode: WidgetMode,
    /// Value the widget starts from
    pub value: NaiveDateTime,
    /// Limits forwarded to the widget as hints
    pub bounds: Bounds,
    /// Whether hours are shown on a 24-hour clock
    pub is_24_hour: bool,
}

/// Host-facing configuration of a single control.
///
/// Every field has a default so partial JSON documents deserialize cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Selection mode (`date`, `time` or `datetime`)
    pub mode: SelectionMode,
    /// Current value supplied by the host, if any
    pub value: Option<DateInput>,
    /// Lower bound for the computed default
    pub min: Option<DateInput>,
    /// Upper bound for the computed default
    pub max: Option<DateInput>,
    /// Explicit moment-style output pattern; falls back to the mode default
    pub format: Option<String>,
    /// Suppresses opening
    pub disabled: bool,
    /// Locale identifier passed to the formatter
    pub locale: String,
    /// Text shown when no value is set
    pub placeholder: String,
    /// Leaves the trigger blank instead of showing the value or placeholder
    pub hide_text: bool,
    /// Widget hint for 24-hour clocks
    pub is_24_hour: bool,
    /// Inline or modal presentation
    pub presentation: PresentationStrategy,
    /// Duration of the modal show/hide transition
    pub transition_duration_ms: u64,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            mode: SelectionMode::default(),
            value: None,
            min: None,
            max: None,
            format: None,
            disabled: false,
            locale: "en-US".to_string(),
            placeholder: "Select date".to_string(),
            hide_text: false,
            is_24_hour: true,
            presentation: PresentationStrategy::default(),
            transition_duration_ms: 300,
        }
    }
}

impl PickerConfig {
    pub fn new(mode: SelectionMode) -> Self {
        Self { mode, ..Self::default() }
    }

    /// The effective output pattern: the explicit `format` or the mode default.
    pub fn pattern(&self) -> &str {
        self.format
            .as_deref()
            .filter(|format| !format.trim().is_empty())
            .unwrap_or_else(|| self.mode.default_pattern())
    }

    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_duration_ms)
    }

    pub fn with_value(mut self, value: impl Into<DateInput>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_min(mut self, min: impl Into<DateInput>) -> Self {
        self.min = Some(min.into());
        self
    }

    pub fn with_max(mut self, max: impl Into<DateInput>) -> Self {
        self.max = Some(max.into());
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_presentation(mut self, presentation: PresentationStrategy) -> Self {
        self.presentation = presentation;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// Inputs consumed by the selection state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEvent {
    /// Host asked to open the control
    Open,
    /// The widget reported a newly picked value
    WidgetChanged(DateInput),
    /// The widget closed without a pick
    WidgetDismissed,
    /// Cancel action in the modal chrome
    CancelPressed,
    /// Confirm action in the modal chrome
    ConfirmPressed,
    /// A chrome transition ran to completion
    TransitionFinished(TransitionDirection),
}

/// Side effects requested by a state transition.
///
/// The transition function only describes them; the controller and the
/// presentation layer carry them out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Notify the host that the control opened
    Opened,
    /// Present (or re-present) the picker widget
    ShowWidget(WidgetRequest),
    /// Remove the picker widget from screen
    HideWidget,
    /// Start the chrome transition, retargeting any running one
    StartTransition(TransitionDirection),
    /// Hand the final candidate to the host
    Commit(NaiveDateTime),
    /// Closing completed; step and candidate were discarded
    Closed,
}

/// A committed selection as delivered to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Candidate rendered with the effective pattern
    pub formatted: String,
    /// Raw candidate value
    pub value: NaiveDateTime,
}
