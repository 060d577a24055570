//! Component system for the picker TUI.
//!
//! Components are self-contained UI elements that own their local behavior,
//! translate input into [`Effect`]s and render themselves into a provided
//! `Rect`. They never mutate the picker directly; the runtime applies the
//! effects they return.

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

use crate::app::{App, Effect, Msg};

/// A UI component with its own state and behavior.
///
/// # Component Lifecycle
///
/// 1. **Event Handling**: keys arrive through `handle_key_events()`
/// 2. **State Updates**: `handle_message()` sees application messages
/// 3. **Rendering**: `render()` draws the component into the provided area
pub(crate) trait Component {
    /// Handle an application-level message the component cares about.
    fn handle_message(&mut self, _app: &mut App, _msg: &Msg) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle key events when this component has focus.
    ///
    /// # Returns
    ///
    /// Effects the application should carry out, in order.
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Render the component into the given area.
    ///
    /// Implementations should be side-effect free except for frame drawing.
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App);

    /// Key hints shown beneath the component.
    fn get_hint_spans<'a>(&self, _app: &'a App) -> Vec<Span<'a>> {
        Vec::new()
    }
}
