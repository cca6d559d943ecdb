//! Training programs list (public)

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Draw the public training programs list
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let editing = app.state.program_search_editing;
    let cursor = if editing { "▌" } else { "" };
    let category = app.state.active_program_category().unwrap_or("all");
    let filter_line = Line::from(vec![
        Span::styled(
            app.state.program_search.as_str(),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
        Span::raw("   "),
        Span::styled(
            format!("category: {category}"),
            Style::default().fg(Color::Yellow),
        ),
    ]);
    let search = Paragraph::new(filter_line).block(
        Block::default()
            .title(" Search (Enter to apply) ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if editing { Color::Cyan } else { Color::DarkGray })),
    );
    frame.render_widget(search, chunks[0]);

    if app.state.programs.is_empty() {
        let message = Paragraph::new("No programs found.\nPress 'r' to reload.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().title(" Training Programs ").borders(Borders::ALL));
        frame.render_widget(message, chunks[1]);
        return;
    }

    let items: Vec<ListItem> = app
        .state
        .programs
        .iter()
        .enumerate()
        .map(|(idx, program)| {
            let is_selected = idx == app.state.selected_index;
            let prefix = if is_selected { "▸" } else { " " };
            let style = if is_selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };
            let dates = match (&program.start_date, &program.end_date) {
                (Some(start), Some(end)) => format!("  {start} → {end}"),
                (Some(start), None) => format!("  from {start}"),
                _ => String::new(),
            };
            ListItem::new(Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(
                    format!("[{}] ", program.category),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(program.name.as_str(), style),
                Span::styled(dates, Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Training Programs — Enter to register ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(list, chunks[1]);
}
