//! # Datepick Engine
//!
//! The selection logic behind a date/time picker control: default and bounds
//! resolution, the date/time merge rules, the pure selection state machine
//! and the [`DatePicker`] controller that ties them to a host.
//!
//! ## Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use datepick_engine::{DatePicker, FixedClock, RecordingHost};
//! use datepick_types::{PickerConfig, PresentationStrategy, SelectionMode};
//!
//! let now = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let config = PickerConfig::new(SelectionMode::DateTime).with_presentation(PresentationStrategy::Inline);
//! let mut picker = DatePicker::new(config).with_clock(FixedClock(now));
//! let mut host = RecordingHost::default();
//!
//! picker.open(&mut host);
//! picker.widget_changed("2024-03-15", &mut host);
//! picker.widget_changed("14:30", &mut host);
//!
//! assert_eq!(host.selections[0].formatted, "2024-03-15 14:30");
//! ```
//!
//! ## Architecture
//!
//! - **`resolve`**: starting value and bounds for an interaction
//! - **`merge`**: how date and time picks combine into one candidate
//! - **`machine`**: the `(state, event) -> (state, effects)` transition function
//! - **`animation`**: the modal show/hide transition
//! - **`format`**: the formatting seam used for committed values
//! - **`controller`**: the host-facing control

pub mod animation;
pub mod controller;
pub mod format;
pub mod machine;
pub mod merge;
pub mod resolve;

pub use animation::VisualTransition;
pub use controller::{Clock, DatePicker, Dispatch, FixedClock, PickerHost, RecordingHost, SystemClock};
pub use format::{PatternFormatter, ValueFormatter};
pub use machine::{Disposition, IgnoreReason, OpenState, PickerState, TransitionContext, TransitionOutcome, transition, widget_request};
pub use merge::{combine, merge_pick};
pub use resolve::{clamp_default, resolve_bounds, resolve_default};
