//! Admin bookings list with server-side filters

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Draw the admin bookings view
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    draw_filters(frame, chunks[0], app);
    draw_list(frame, chunks[1], app);
}

fn draw_filters(frame: &mut Frame, area: Rect, app: &App) {
    let filters = &app.state.booking_filters;
    let hall = app.state.active_hall_filter().unwrap_or("all");

    let search_cursor = if app.state.booking_search_editing { "▌" } else { "" };
    let date_cursor = if app.state.booking_date_editing { "▌" } else { "" };

    let line = Line::from(vec![
        Span::styled("hall: ", Style::default().fg(Color::DarkGray)),
        Span::styled(hall, Style::default().fg(Color::Yellow)),
        Span::raw("   "),
        Span::styled("date: ", Style::default().fg(Color::DarkGray)),
        Span::styled(filters.date.as_str(), Style::default().fg(Color::Gray)),
        Span::styled(date_cursor, Style::default().fg(Color::Cyan)),
        Span::raw("   "),
        Span::styled("search: ", Style::default().fg(Color::DarkGray)),
        Span::styled(filters.search.as_str(), Style::default().fg(Color::Gray)),
        Span::styled(search_cursor, Style::default().fg(Color::Cyan)),
    ]);

    let editing = app.state.booking_search_editing || app.state.booking_date_editing;
    let block = Paragraph::new(line).block(
        Block::default()
            .title(" Filters (Enter to apply) ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if editing { Color::Cyan } else { Color::DarkGray })),
    );
    frame.render_widget(block, area);
}

fn draw_list(frame: &mut Frame, area: Rect, app: &App) {
    if app.state.bookings.is_empty() {
        let message = Paragraph::new("No bookings match the current filters.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().title(" Admin — Bookings ").borders(Borders::ALL));
        frame.render_widget(message, area);
        return;
    }

    let items: Vec<ListItem> = app
        .state
        .bookings
        .iter()
        .enumerate()
        .map(|(idx, booking)| {
            let is_selected = idx == app.state.selected_index;
            let prefix = if is_selected { "▸" } else { " " };
            let style = if is_selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(
                    format!("{} {} ", booking.date, booking.time),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(
                    format!("[{}] ", booking.hall_id),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(booking.full_name.as_str(), style),
                Span::styled(
                    format!("  {}", booking.phone),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Admin — Bookings ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(list, area);
}
