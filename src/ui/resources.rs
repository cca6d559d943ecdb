//! Resource library browser

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Draw the resource library with search, category filter, and pagination
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search box
            Constraint::Min(0),    // List
            Constraint::Length(1), // Pager
        ])
        .split(area);

    draw_search(frame, chunks[0], app);
    draw_list(frame, chunks[1], app);
    draw_pager(frame, chunks[2], app);
}

fn draw_search(frame: &mut Frame, area: Rect, app: &App) {
    let editing = app.state.resource_search_editing;
    let cursor = if editing { "▌" } else { "" };
    let border = if editing { Color::Cyan } else { Color::DarkGray };

    let line = Line::from(vec![
        Span::styled(
            app.state.resource_search.as_str(),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
        Span::raw("   "),
        Span::styled(
            format!("category: {}", app.state.active_resource_category()),
            Style::default().fg(Color::Yellow),
        ),
    ]);

    let search = Paragraph::new(line).block(
        Block::default()
            .title(" Search ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    frame.render_widget(search, area);
}

fn draw_list(frame: &mut Frame, area: Rect, app: &App) {
    let page = app.state.resource_page_slice();

    if page.is_empty() {
        let message = Paragraph::new("No resources match the current filters.")
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .title(" Resource Library ")
                    .borders(Borders::ALL),
            );
        frame.render_widget(message, area);
        return;
    }

    let items: Vec<ListItem> = page
        .iter()
        .enumerate()
        .map(|(idx, resource)| {
            let is_selected = idx == app.state.selected_index;
            let prefix = if is_selected { "▸" } else { " " };
            let style = if is_selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };
            let line = Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(
                    format!("[{}] ", resource.category),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(resource.title.as_str(), style),
                Span::raw("  "),
                Span::styled(
                    resource.description.as_str(),
                    Style::default().fg(Color::DarkGray),
                ),
            ]);
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Resource Library ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(list, area);
}

fn draw_pager(frame: &mut Frame, area: Rect, app: &App) {
    let total = app.state.resource_total_pages().max(1);
    let current = app.state.resource_page.clamp(1, total);
    let pager = Paragraph::new(Line::from(Span::styled(
        format!("page {current}/{total}  (←/→ to change)"),
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(pager, area);
}
