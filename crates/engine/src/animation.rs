//! Show/hide transition for the modal chrome.
//!
//! The transition is a linear interpolation between 0.0 (hidden) and 1.0
//! (fully shown), advanced by explicit time deltas. Completion is reported
//! once per run so the controller can feed it back to the state machine as
//! `PickerEvent::TransitionFinished`.

use std::time::Duration;

use datepick_types::TransitionDirection;

/// A single retargetable show/hide transition.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualTransition {
    duration: Duration,
    elapsed: Duration,
    from: f32,
    value: f32,
    running: Option<TransitionDirection>,
}

impl VisualTransition {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            elapsed: Duration::ZERO,
            from: 0.0,
            value: 0.0,
            running: None,
        }
    }

    /// Starts a run toward `direction`'s target from the current value.
    ///
    /// A run already in flight is retargeted rather than queued.
    pub fn start(&mut self, direction: TransitionDirection) {
        self.from = self.value;
        self.elapsed = Duration::ZERO;
        self.running = Some(direction);
    }

    /// Advances the run by `delta`. Returns the direction once it completes.
    pub fn advance(&mut self, delta: Duration) -> Option<TransitionDirection> {
        let direction = self.running?;
        self.elapsed = self.elapsed.saturating_add(delta);
        let target = target_of(direction);

        if self.elapsed >= self.duration {
            self.value = target;
            self.running = None;
            return Some(direction);
        }

        let progress = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.value = self.from + (target - self.from) * progress;
        None
    }

    /// Current visibility fraction in `0.0..=1.0`.
    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }
}

fn target_of(direction: TransitionDirection) -> f32 {
    match direction {
        TransitionDirection::Open => 1.0,
        TransitionDirection::Close => 0.0,
    }
}
