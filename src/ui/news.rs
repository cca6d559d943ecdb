//! News, events, and media tabs

use crate::app::App;
use crate::state::NewsTab;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Draw the news view with its three tabs
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    draw_tabs(frame, chunks[0], app.state.news_tab);

    let lines: Vec<Line> = match app.state.news_tab {
        NewsTab::Articles => app
            .state
            .articles
            .iter()
            .map(|a| {
                let date = a.date.as_deref().unwrap_or("");
                Line::from(vec![
                    Span::styled(format!("{date:<12}"), Style::default().fg(Color::DarkGray)),
                    Span::raw(a.title.as_str()),
                    Span::styled(
                        format!("  {}", a.summary),
                        Style::default().fg(Color::DarkGray),
                    ),
                ])
            })
            .collect(),
        NewsTab::Events => app
            .state
            .events
            .iter()
            .map(|e| {
                let date = e.date.as_deref().unwrap_or("");
                Line::from(vec![
                    Span::styled(format!("{date:<12}"), Style::default().fg(Color::DarkGray)),
                    Span::raw(e.title.as_str()),
                    Span::styled(
                        format!("  @ {}", e.location),
                        Style::default().fg(Color::Yellow),
                    ),
                ])
            })
            .collect(),
        NewsTab::Media => app
            .state
            .media
            .iter()
            .map(|m| {
                Line::from(vec![
                    Span::raw(m.title.as_str()),
                    Span::styled(format!("  {}", m.url), Style::default().fg(Color::Blue)),
                ])
            })
            .collect(),
    };

    if lines.is_empty() {
        let message = Paragraph::new("Nothing here yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().title(" News & Events ").borders(Borders::ALL));
        frame.render_widget(message, chunks[1]);
        return;
    }

    let items: Vec<ListItem> = lines
        .into_iter()
        .enumerate()
        .map(|(idx, line)| {
            if idx == app.state.selected_index {
                ListItem::new(line).style(Style::default().bg(Color::DarkGray))
            } else {
                ListItem::new(line)
            }
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" News & Events ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(list, chunks[1]);
}

fn draw_tabs(frame: &mut Frame, area: Rect, active: NewsTab) {
    let mut spans = Vec::new();
    for tab in [NewsTab::Articles, NewsTab::Events, NewsTab::Media] {
        let style = if tab == active {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {} ", tab.label()), style));
        spans.push(Span::raw("|"));
    }
    spans.pop();
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
