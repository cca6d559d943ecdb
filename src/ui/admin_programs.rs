//! Admin programs list

use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Draw the admin programs view
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let programs = app.state.visible_programs();
    let trashed = app.state.programs.iter().filter(|p| p.is_deleted).count();

    let title = if app.state.show_deleted_programs {
        format!(" Admin — Programs ({trashed} trashed shown) ")
    } else if trashed > 0 {
        format!(" Admin — Programs (hiding {trashed} trashed) ")
    } else {
        " Admin — Programs ".to_string()
    };

    if programs.is_empty() {
        let message = Paragraph::new("No programs. Press 'n' to create one.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().title(title).borders(Borders::ALL));
        frame.render_widget(message, area);
        return;
    }

    let items: Vec<ListItem> = programs
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

            let mut spans = vec![
                Span::styled(prefix, style),
                Span::styled(
                    format!("[{}] ", program.category),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(program.name.as_str(), style),
            ];
            if program.is_deleted {
                spans.push(Span::styled(
                    "  [trashed]",
                    Style::default().fg(Color::Red),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(list, area);
}
