//! Centered modal dialogs: notices and yes/no confirmations

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::state::{Notice, NoticeKind, PendingAction};

/// Rect centered in `area`, clamped to its size
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Draw a dismissible notice over the current view
pub fn draw_notice(frame: &mut Frame, notice: &Notice) {
    let (title, color) = match notice.kind {
        NoticeKind::Success => (" Success ", Color::Green),
        NoticeKind::Error => (" Error ", Color::Red),
    };

    let area = centered_rect(frame.area(), 60, 7);
    frame.render_widget(Clear, area);

    let body = Paragraph::new(vec![
        Line::from(""),
        Line::from(notice.text.as_str()),
        Line::from(""),
        Line::from(Span::styled(
            "Enter/Esc to dismiss",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(Span::styled(
                title,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );

    frame.render_widget(body, area);
}

/// Draw the confirmation prompt for a destructive admin action
pub fn draw_confirm(frame: &mut Frame, action: &PendingAction) {
    let question = match action {
        PendingAction::DeleteProgram(_) => "Permanently delete this program?",
        PendingAction::DeleteBooking(_) => "Delete this booking?",
    };

    let area = centered_rect(frame.area(), 50, 7);
    frame.render_widget(Clear, area);

    let body = Paragraph::new(vec![
        Line::from(""),
        Line::from(question),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(Color::Red)),
            Span::raw(": yes   "),
            Span::styled("n/Esc", Style::default().fg(Color::Cyan)),
            Span::raw(": cancel"),
        ]),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .title(" Confirm ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );

    frame.render_widget(body, area);
}
