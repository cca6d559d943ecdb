//! UI module for rendering the TUI

mod admin_programs;
mod bookings;
mod components;
mod forms;
mod home;
mod layout;
mod news;
mod programs;
mod resources;
mod stories;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let (sidebar_area, main_area) = layout::create_layout(area);
    layout::draw_sidebar(frame, sidebar_area, app);

    match app.state.current_view {
        View::Home => home::draw(frame, main_area, app),
        View::Partner => forms::draw_partner(frame, main_area, app),
        View::Resources => resources::draw(frame, main_area, app),
        View::Programs => programs::draw(frame, main_area, app),
        View::News => news::draw(frame, main_area, app),
        View::Stories | View::AdminStories => stories::draw(frame, main_area, app),
        View::AdminPrograms => admin_programs::draw(frame, main_area, app),
        View::AdminBookings => bookings::draw(frame, main_area, app),
        View::Booking
        | View::Login
        | View::StorySubmit
        | View::Register
        | View::AdminProgramEdit => forms::draw_simple_form(frame, main_area, app),
    }

    layout::draw_status_bar(frame, app);

    // Modal overlays go last
    if let Some(action) = &app.state.confirm_action {
        components::draw_confirm(frame, action);
    }
    if let Some(notice) = app.state.current_notice() {
        components::draw_notice(frame, notice);
    }
}
