//! Generic renderer for the single-page forms

use super::field_renderer::draw_field;
use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

/// Draw whichever single-page form is open, one boxed field per row
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let Some(form) = app.state.form.as_form() else {
        return;
    };

    let block = Block::default()
        .title(format!(" {} ", form.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    let mut constraints: Vec<Constraint> = Vec::new();
    for idx in 0..form.view_field_count() {
        let multiline = form
            .view_field(idx)
            .map(|f| f.is_multiline)
            .unwrap_or(false);
        constraints.push(Constraint::Length(if multiline { 5 } else { 3 }));
    }
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(area);

    for idx in 0..form.view_field_count() {
        let Some(field) = form.view_field(idx) else {
            continue;
        };
        // Never echo credentials
        let value = if field.name == "password" {
            "•".repeat(field.as_text().chars().count())
        } else {
            field.display_value()
        };
        draw_field(
            frame,
            chunks[idx],
            &field.label,
            &value,
            idx == form.view_active_field(),
            field.is_multiline,
            field.error.as_deref(),
        );
    }
}
