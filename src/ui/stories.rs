//! Success stories list (public and admin share this view)

use crate::app::App;
use crate::state::View;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Draw the stories list
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let is_admin = app.state.current_view == View::AdminStories;
    let stories = app.state.visible_stories();

    let title = if is_admin {
        " Admin — Success Stories "
    } else {
        " Success Stories — press 'n' to share yours "
    };

    if stories.is_empty() {
        let message = Paragraph::new("No stories yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().title(title).borders(Borders::ALL));
        frame.render_widget(message, area);
        return;
    }

    let items: Vec<ListItem> = stories
        .iter()
        .enumerate()
        .map(|(idx, story)| {
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
                    format!("{} — ", story.name),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(story.short_story.as_str(), style),
            ];
            if story.is_deleted {
                spans.push(Span::styled(
                    "  [trashed]",
                    Style::default().fg(Color::Red),
                ));
            }
            if !story.image_url.is_empty() {
                spans.push(Span::styled("  📷", Style::default().fg(Color::Yellow)));
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
