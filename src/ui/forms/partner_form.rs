//! Three-page partnership form view

use super::field_renderer::{draw_field, draw_flag_field};
use crate::app::App;
use crate::state::forms::partner::{
    PartnerForm, CONFIRMATION, DIRECTOR_EMAIL, DIRECTOR_NAME, DIRECTOR_PHONE, DURATION,
    EXPECTATIONS, INDUSTRY, IS_LICENSED, LIAISON_EMAIL, LIAISON_NAME, LIAISON_PHONE,
    LICENSE_IMAGE, ORGANIZATION_LOCATION, ORGANIZATION_NAME, OUR_OFFER, PARTNERSHIP_TYPE,
    SOCIAL_MEDIA,
};
use crate::state::forms::FieldPath;
use crate::state::TOTAL_STEPS;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const STEP_TITLES: [&str; 3] = ["Organization", "Contacts", "Partnership"];

/// Draw the partnership form for the current step
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.partner;

    let block = Block::default()
        .title(" Become a Partner ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Step indicator
            Constraint::Min(0),    // Fields
        ])
        .margin(1)
        .split(area);

    draw_step_indicator(frame, chunks[0], form.step);

    match form.step {
        1 => draw_step_one(frame, chunks[1], form),
        2 => draw_step_two(frame, chunks[1], form),
        _ => draw_step_three(frame, chunks[1], form),
    }
}

/// Row of numbered step markers, completed ones in green
fn draw_step_indicator(frame: &mut Frame, area: Rect, step: u8) {
    let mut spans = Vec::new();
    for (idx, title) in STEP_TITLES.iter().enumerate() {
        let number = idx as u8 + 1;
        let style = if number == step {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else if number < step {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let marker = if number < step {
            "✓".to_string()
        } else {
            number.to_string()
        };
        spans.push(Span::styled(format!(" ({marker}) {title} "), style));
        if number < TOTAL_STEPS {
            spans.push(Span::styled("──", Style::default().fg(Color::DarkGray)));
        }
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn is_active(form: &PartnerForm, path: FieldPath) -> bool {
    form.focused_field() == path
}

fn text_row(
    frame: &mut Frame,
    area: Rect,
    form: &PartnerForm,
    path: FieldPath,
    label: &str,
    multiline: bool,
) {
    draw_field(
        frame,
        area,
        label,
        form.text(path).unwrap_or(""),
        is_active(form, path),
        multiline,
        form.error(path),
    );
}

fn draw_step_one(frame: &mut Frame, area: Rect, form: &PartnerForm) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Organization name
            Constraint::Length(3), // Location
            Constraint::Length(3), // Industry
            Constraint::Length(3), // Social media
            Constraint::Length(1), // Licensed checkbox
            Constraint::Length(3), // License image path
            Constraint::Length(1), // Attachment state
            Constraint::Min(0),
        ])
        .split(area);

    text_row(frame, chunks[0], form, ORGANIZATION_NAME, "Organization Name *", false);
    text_row(frame, chunks[1], form, ORGANIZATION_LOCATION, "Location (city / country) *", false);
    text_row(frame, chunks[2], form, INDUSTRY, "Field of Work *", false);
    text_row(frame, chunks[3], form, SOCIAL_MEDIA, "Social Media Links", false);

    draw_flag_field(
        frame,
        chunks[4],
        "Is the organization licensed?",
        form.is_licensed,
        is_active(form, IS_LICENSED),
        form.error(IS_LICENSED),
    );

    if form.is_licensed {
        draw_field(
            frame,
            chunks[5],
            "License image file (Enter to attach)",
            &form.license_path_input,
            is_active(form, LICENSE_IMAGE),
            false,
            form.error(LICENSE_IMAGE),
        );
        let attachment = if form.license_image.is_empty() {
            Span::styled("no image attached", Style::default().fg(Color::DarkGray))
        } else {
            Span::styled(
                format!("attached ({} bytes)", form.license_image.len()),
                Style::default().fg(Color::Green),
            )
        };
        frame.render_widget(Paragraph::new(Line::from(attachment)), chunks[6]);
    }
}

fn draw_step_two(frame: &mut Frame, area: Rect, form: &PartnerForm) {
    let halves = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(11), Constraint::Length(11), Constraint::Min(0)])
        .split(area);

    draw_contact_box(
        frame,
        halves[0],
        form,
        "Director",
        [DIRECTOR_NAME, DIRECTOR_PHONE, DIRECTOR_EMAIL],
    );
    draw_contact_box(
        frame,
        halves[1],
        form,
        "Liaison",
        [LIAISON_NAME, LIAISON_PHONE, LIAISON_EMAIL],
    );
}

fn draw_contact_box(
    frame: &mut Frame,
    area: Rect,
    form: &PartnerForm,
    title: &str,
    fields: [FieldPath; 3],
) {
    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .margin(1)
        .split(area);

    text_row(frame, rows[0], form, fields[0], "Name *", false);
    text_row(frame, rows[1], form, fields[1], "Phone (10 digits) *", false);
    text_row(frame, rows[2], form, fields[2], "Email *", false);
}

fn draw_step_three(frame: &mut Frame, area: Rect, form: &PartnerForm) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Partnership type
            Constraint::Length(3), // Duration
            Constraint::Length(4), // Expectations
            Constraint::Length(4), // Our offer
            Constraint::Length(1), // Confirmation
            Constraint::Min(0),
        ])
        .split(area);

    text_row(frame, chunks[0], form, PARTNERSHIP_TYPE, "Partnership Type *", false);
    text_row(frame, chunks[1], form, DURATION, "Duration (e.g. 6 months) *", false);
    text_row(frame, chunks[2], form, EXPECTATIONS, "Expectations", true);
    text_row(frame, chunks[3], form, OUR_OFFER, "What We Can Offer", true);

    draw_flag_field(
        frame,
        chunks[4],
        "I confirm the entered information is correct",
        form.confirmation,
        is_active(form, CONFIRMATION),
        form.error(CONFIRMATION),
    );
}
