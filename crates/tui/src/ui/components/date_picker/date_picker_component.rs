use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use datepick_types::{PickerEvent, PresentationState, SelectionMode, WidgetMode};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use super::state::SpinnerState;
use crate::app::{App, Effect, PickerFocus};
use crate::ui::components::Component;
use crate::ui::theme::Theme;
use crate::ui::theme::theme_helpers as th;

/// Rows of the widget panel: borders, spinner and range line.
const WIDGET_PANEL_HEIGHT: u16 = 4;
/// Rows added by the Cancel/Confirm button row.
const BUTTON_ROW_HEIGHT: u16 = 3;
const MIN_PANEL_WIDTH: u16 = 28;

/// Trigger line plus the spinner panel, inline or as an animated modal.
#[derive(Debug, Default)]
pub struct DatePickerComponent;

impl DatePickerComponent {
    fn handle_closed_keys(&self, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => vec![Effect::Picker(PickerEvent::Open)],
            KeyCode::Esc | KeyCode::Char('q') => vec![Effect::Quit],
            _ => Vec::new(),
        }
    }

    fn handle_open_keys(&self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let has_buttons = app.picker.config().presentation.has_confirm_actions();
        match key.code {
            KeyCode::Esc => return vec![Effect::Picker(PickerEvent::WidgetDismissed)],
            KeyCode::Tab if has_buttons => {
                app.focus = match app.focus {
                    PickerFocus::Widget => PickerFocus::Cancel,
                    PickerFocus::Cancel => PickerFocus::Confirm,
                    PickerFocus::Confirm => PickerFocus::Widget,
                };
                return Vec::new();
            }
            KeyCode::BackTab if has_buttons => {
                app.focus = match app.focus {
                    PickerFocus::Widget => PickerFocus::Confirm,
                    PickerFocus::Cancel => PickerFocus::Widget,
                    PickerFocus::Confirm => PickerFocus::Cancel,
                };
                return Vec::new();
            }
            _ => {}
        }

        match app.focus {
            PickerFocus::Cancel if key.code == KeyCode::Enter => vec![Effect::Picker(PickerEvent::CancelPressed)],
            PickerFocus::Confirm if key.code == KeyCode::Enter => vec![Effect::Picker(PickerEvent::ConfirmPressed)],
            PickerFocus::Cancel | PickerFocus::Confirm => Vec::new(),
            PickerFocus::Widget => {
                let Some(spinner) = app.spinner.as_mut() else {
                    return Vec::new();
                };
                match key.code {
                    KeyCode::Left | KeyCode::Char('h') => spinner.focus_previous(),
                    KeyCode::Right | KeyCode::Char('l') => spinner.focus_next(),
                    KeyCode::Up | KeyCode::Char('k') => spinner.increment(),
                    KeyCode::Down | KeyCode::Char('j') => spinner.decrement(),
                    KeyCode::Enter | KeyCode::Char(' ') => {
                        return vec![Effect::Picker(PickerEvent::WidgetChanged(spinner.picked_value().into()))];
                    }
                    _ => {}
                }
                Vec::new()
            }
        }
    }

    fn render_trigger(&self, frame: &mut Frame, area: Rect, app: &App) {
        let theme = &*app.theme;
        let config = app.picker.config();
        let title = match config.mode {
            SelectionMode::Date => "Date",
            SelectionMode::Time => "Time",
            SelectionMode::DateTime => "Date & time",
        };
        let focused = app.picker.presentation() == PresentationState::Closed && !config.disabled;
        let mut block = th::block(theme, Some(title), focused);
        if app.spinner.is_none()
            && let Some(error) = &app.error
        {
            block = block.title_bottom(Span::styled(error.as_str(), theme.status_error()));
        }

        let mut spans = Vec::with_capacity(2);
        if !config.hide_text {
            let style = if config.value.is_none() || config.disabled {
                theme.text_muted_style()
            } else {
                theme.text_primary_style().add_modifier(Modifier::BOLD)
            };
            spans.push(Span::styled(app.picker.display_text(), style));
        }
        if config.disabled {
            spans.push(Span::styled("  (disabled)", theme.text_muted_style()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }

    fn spinner_line<'a>(spinner: &SpinnerState, widget_focused: bool, theme: &dyn Theme) -> Line<'a> {
        let mut spans = Vec::with_capacity(spinner.fields().len() * 2);
        for field in spinner.fields() {
            spans.push(Span::styled(field.separator(), theme.text_muted_style()));
            let style = if *field == spinner.focused_field() {
                if widget_focused {
                    theme.selection_style().add_modifier(Modifier::BOLD)
                } else {
                    theme.accent_emphasis_style()
                }
            } else {
                theme.text_primary_style()
            };
            spans.push(Span::styled(spinner.segment_text(*field), style));
        }
        Line::from(spans).centered()
    }

    fn render_panel(&self, frame: &mut Frame, area: Rect, spinner: &SpinnerState, app: &App) {
        let theme = &*app.theme;
        let title = match spinner.mode() {
            WidgetMode::Date => "Select date",
            WidgetMode::Time => "Select time",
        };
        let block = th::block(theme, Some(title), true);
        let inner = block.inner(area);
        frame.render_widget(Clear, area);
        frame.render_widget(block, area);

        let has_buttons = app.picker.config().presentation.has_confirm_actions();
        let [spinner_area, range_area, button_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(if has_buttons { BUTTON_ROW_HEIGHT } else { 0 }),
        ])
        .areas(inner);

        let widget_focused = app.focus == PickerFocus::Widget;
        frame.render_widget(Paragraph::new(Self::spinner_line(spinner, widget_focused, theme)), spinner_area);

        let range = match (&app.error, spinner.bounds_hint()) {
            (Some(error), _) => Line::from(Span::styled(error.clone(), theme.status_error())),
            (None, Some(hint)) if spinner.has_empty_range() => Line::from(Span::styled(hint, theme.status_warning())),
            (None, Some(hint)) => Line::from(Span::styled(hint, theme.text_muted_style())),
            (None, None) => Line::default(),
        };
        frame.render_widget(Paragraph::new(range.centered()), range_area);

        if has_buttons {
            let [_, cancel_area, confirm_area] =
                Layout::horizontal([Constraint::Fill(1), Constraint::Length(10), Constraint::Length(11)]).areas(button_area);
            th::render_button(frame, cancel_area, "Cancel", app.focus == PickerFocus::Cancel, theme);
            th::render_button(frame, confirm_area, "Confirm", app.focus == PickerFocus::Confirm, theme);
        }
    }

    fn panel_size(spinner: &SpinnerState, app: &App) -> (u16, u16) {
        let spinner_width: usize = spinner
            .fields()
            .iter()
            .map(|field| field.separator().width() + spinner.segment_text(*field).width())
            .sum();
        let hint_width = spinner.bounds_hint().map_or(0, |hint| hint.width());
        let error_width = app.error.as_deref().map_or(0, UnicodeWidthStr::width);
        let content = spinner_width.max(hint_width).max(error_width) as u16;
        let width = content.saturating_add(4).max(MIN_PANEL_WIDTH);

        let mut height = WIDGET_PANEL_HEIGHT;
        if app.picker.config().presentation.has_confirm_actions() {
            height += BUTTON_ROW_HEIGHT;
        }
        (width, height)
    }
}

impl Component for DatePickerComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return vec![Effect::Quit];
        }
        match app.picker.presentation() {
            PresentationState::Open => self.handle_open_keys(app, key),
            PresentationState::Closed => self.handle_closed_keys(key),
        }
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let [trigger_area, body_area] = Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(rect);
        self.render_trigger(frame, trigger_area, app);

        let Some(spinner) = app.spinner.as_ref() else {
            return;
        };
        let (width, full_height) = Self::panel_size(spinner, app);

        if !app.picker.config().presentation.is_animated() {
            let [panel_area, _] = Layout::vertical([Constraint::Length(full_height), Constraint::Min(0)]).areas(body_area);
            let [panel_area, _] = Layout::horizontal([Constraint::Length(width), Constraint::Min(0)]).areas(panel_area);
            self.render_panel(frame, panel_area, spinner, app);
            return;
        }

        // Modal height follows the show/hide transition.
        let visible = (f32::from(full_height) * app.picker.transition().value()).ceil() as u16;
        frame.render_widget(Block::default().style(app.theme.modal_background_style()), body_area);
        if visible < 2 {
            return;
        }
        let panel_area = th::centered_rect(width, visible, body_area);
        self.render_panel(frame, panel_area, spinner, app);
    }

    fn get_hint_spans<'a>(&self, app: &'a App) -> Vec<Span<'a>> {
        let theme = &*app.theme;
        match (app.picker.presentation(), app.focus) {
            (PresentationState::Closed, _) => th::build_hint_spans(theme, &[(" Enter", " Open  "), (" Esc", " Quit ")]),
            (PresentationState::Open, PickerFocus::Widget) => {
                let mut hints = vec![(" ←/→", " Field  "), (" ↑/↓", " Adjust  "), (" Enter", " Pick  "), (" Esc", " Dismiss ")];
                if app.picker.config().presentation.has_confirm_actions() {
                    hints.push((" Tab", " Buttons "));
                }
                th::build_hint_spans(theme, &hints)
            }
            (PresentationState::Open, _) => th::build_hint_spans(theme, &[(" Tab", " Next  "), (" Enter", " Press  "), (" Esc", " Dismiss ")]),
        }
    }
}
