//! Layout components (sidebar, status bar)

use super::components::{render_button, BUTTON_HEIGHT};
use crate::app::App;
use crate::state::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Sidebar items: label plus the views they highlight for
const SIDEBAR_ITEMS: &[&str] = &[
    "Home", "Partner", "Booking", "Library", "Programs", "News", "Stories", "Admin",
];

/// Create the main layout with sidebar; returns (sidebar, content)
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(18), // Sidebar
            Constraint::Min(0),     // Main content
        ])
        .split(area);

    // Reserve bottom line for status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(chunks[1]);

    let sidebar_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Sidebar content
            Constraint::Length(1), // Status bar continuation
        ])
        .split(chunks[0]);

    (sidebar_chunks[0], main_chunks[0])
}

fn sidebar_selection(view: View) -> usize {
    match view {
        View::Home => 0,
        View::Partner => 1,
        View::Booking => 2,
        View::Resources => 3,
        View::Programs | View::Register => 4,
        View::News => 5,
        View::Stories | View::StorySubmit => 6,
        View::Login
        | View::AdminPrograms
        | View::AdminProgramEdit
        | View::AdminBookings
        | View::AdminStories => 7,
    }
}

/// Draw the sidebar with boxed buttons
pub fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let mut constraints = vec![Constraint::Min(0)];
    constraints.extend(std::iter::repeat(Constraint::Length(BUTTON_HEIGHT)).take(SIDEBAR_ITEMS.len()));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let selected = sidebar_selection(app.state.current_view);
    for (idx, label) in SIDEBAR_ITEMS.iter().enumerate() {
        // The admin entry dims until a session exists
        let is_enabled = *label != "Admin" || app.state.auth.is_some();
        render_button(frame, chunks[idx + 1], label, idx == selected, is_enabled);
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![];

    // Connection status
    let conn_status = if app.state.backend_connected {
        Span::styled(" ● ", Style::default().fg(Color::Green))
    } else {
        Span::styled(" ○ ", Style::default().fg(Color::Red))
    };
    spans.push(conn_status);

    // One request in flight at a time
    if app.state.busy {
        spans.push(Span::styled(
            "sending… | ",
            Style::default().fg(Color::Yellow),
        ));
    }

    // View-specific hints
    let hints = get_view_hints(app.state.current_view);
    spans.push(Span::styled(hints, Style::default().fg(Color::DarkGray)));

    // Signed-in admin
    if let Some(auth) = &app.state.auth {
        let who = auth.display_name.as_deref().unwrap_or("admin");
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!("signed in: {who}"),
            Style::default().fg(Color::Blue),
        ));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    // Quit hint on the right
    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: quit_hint.len() as u16,
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(view: View) -> String {
    match view {
        View::Home => "j/k:nav  Enter:open  q:quit".to_string(),
        View::Partner => {
            "Tab:field  ←/→:step  Space:toggle  ^S:submit  Esc:back".to_string()
        }
        View::Booking | View::Login | View::Register | View::StorySubmit
        | View::AdminProgramEdit => "Tab:field  ^S:submit  Esc:cancel".to_string(),
        View::Resources => {
            "/:search  c:category  ←/→:page  j/k:nav  Enter:download  Esc:back".to_string()
        }
        View::Programs => "/:search  c:category  j/k:nav  Enter:register  Esc:back".to_string(),
        View::News => "Tab:section  j/k:nav  Esc:back".to_string(),
        View::Stories => "j/k:nav  n:share yours  Esc:back".to_string(),
        View::AdminPrograms => {
            "n:new  e:edit  d:trash  u:restore  x:delete  a:show-deleted  Esc:back".to_string()
        }
        View::AdminBookings => "h:hall  t:date  /:search  x:delete  r:reload  Esc:back".to_string(),
        View::AdminStories => "e:edit  d:trash  u:restore  a:show-deleted  Esc:back".to_string(),
    }
}
