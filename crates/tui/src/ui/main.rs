//! Top-level frame layout: the picker above a single hint line.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};

use crate::app::App;
use crate::ui::components::Component;

pub fn draw(frame: &mut Frame, app: &mut App, component: &mut dyn Component) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(app.theme.roles().background)), area);

    let [content_area, hint_area] = Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(area);
    component.render(frame, content_area, app);

    let hints = Line::from(component.get_hint_spans(app));
    frame.render_widget(Paragraph::new(hints), hint_area);
}
