use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Padding, Paragraph},
};

use super::roles::{Theme, ThemeRoles};

/// Build a standard Block with theme surfaces and borders.
pub fn block<'a, T: Theme + ?Sized>(theme: &'a T, title: Option<&'a str>, focused: bool) -> Block<'a> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border_style(focused))
        .style(panel_style(theme));
    if let Some(t) = title {
        block = block.title(Span::styled(t, theme.text_secondary_style().add_modifier(Modifier::BOLD)));
    }
    block
}

/// Style for panel-like containers.
pub fn panel_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { surface, text, .. } = *theme.roles();
    Style::default().bg(surface).fg(text)
}

/// Lighten an RGB color toward white by `amount` (0.0..=1.0).
/// Non-RGB colors are returned unchanged.
pub fn lighten_rgb(color: Color, amount: f32) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let a = amount.clamp(0.0, 1.0);
            let lift = |channel: u8| (channel as f32 + (255.0 - channel as f32) * a).round().clamp(0.0, 255.0) as u8;
            Color::Rgb(lift(r), lift(g), lift(b))
        }
        other => other,
    }
}

/// Secondary button style: accent text, selection background when highlighted.
pub fn button_secondary_style<T: Theme + ?Sized>(theme: &T, enabled: bool, selected: bool) -> Style {
    if !enabled {
        return theme.text_muted_style();
    }
    let ThemeRoles {
        accent_secondary,
        selection_bg,
        ..
    } = *theme.roles();
    let style = Style::default().fg(accent_secondary);
    if selected { style.bg(selection_bg) } else { style }
}

/// Draws a bordered, centered button label.
pub fn render_button<T: Theme + ?Sized>(frame: &mut Frame, area: Rect, label: &str, is_focused: bool, theme: &T) {
    frame.render_widget(
        Paragraph::new(label)
            .centered()
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(theme.border_style(is_focused))
                    .padding(Padding::uniform(0)),
            )
            .style(button_secondary_style(theme, true, is_focused)),
        area,
    );
}

/// Key/description pairs rendered as a hint line.
pub fn build_hint_spans<'a, T: Theme + ?Sized>(theme: &T, hints: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, description) in hints {
        spans.push(Span::styled(*key, theme.accent_emphasis_style()));
        spans.push(Span::styled(*description, theme.text_muted_style()));
    }
    spans
}

/// A rect of fixed size centered in `area`, shrunk to fit when needed.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(ratatui::layout::Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(ratatui::layout::Flex::Center)
        .areas(row);
    cell
}
