//! Application controller: key handling and backend actions

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::api::{
    ApiError, BookingPayload, BookingQuery, HttpPortalApi, PortalApi, ProgramPayload,
    RegistrationPayload, StoryPayload,
};
use crate::config::PortalConfig;
use crate::media;
use crate::state::forms::submit::{submit_partnership, SubmitOutcome, SUBMIT_SUCCESS_MESSAGE};
use crate::state::{
    AppState, BookingForm, Form, FormState, LoginForm, PendingAction, ProgramForm,
    RegistrationForm, StoryForm, View,
};

/// Entries of the home menu, in display order
pub const HOME_ITEMS: &[(&str, View)] = &[
    ("Become a Partner", View::Partner),
    ("Book a Hall", View::Booking),
    ("Resource Library", View::Resources),
    ("Training Programs", View::Programs),
    ("News & Events", View::News),
    ("Success Stories", View::Stories),
    ("Admin Login", View::Login),
    ("Admin: Programs", View::AdminPrograms),
    ("Admin: Bookings", View::AdminBookings),
    ("Admin: Stories", View::AdminStories),
];

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// REST client for backend communication
    pub api: Box<dyn PortalApi>,
    /// Loaded user configuration
    pub config: PortalConfig,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance against the configured backend
    pub async fn new() -> Result<Self> {
        let config = PortalConfig::load().unwrap_or_default();
        let api = HttpPortalApi::from_env(config.backend_url.clone());
        Ok(Self::with_api(Box::new(api), config).await)
    }

    /// Create an App over any API implementation (mocked in tests)
    pub async fn with_api(api: Box<dyn PortalApi>, config: PortalConfig) -> Self {
        let mut state = AppState {
            resource_page: 1,
            ..Default::default()
        };
        state.show_deleted_programs = config.show_deleted_programs.unwrap_or(false);
        state.show_deleted_stories = config.show_deleted_stories.unwrap_or(false);
        state.backend_connected = api.check_connection().await;

        Self {
            state,
            api,
            config,
            quit: false,
        }
    }

    /// Check if the app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Surface an API failure; expired sessions bounce to the login form
    fn report_api_error(&mut self, err: ApiError, fallback: &str) {
        if err.is_unauthorized() {
            self.state.auth = None;
            self.state.push_error("Session expired. Please log in again.");
            self.state.form = FormState::Login(LoginForm::new());
            self.state.current_view = View::Login;
        } else {
            self.state.push_error(err.user_message(fallback));
        }
    }

    // ── Navigation ──────────────────────────────────────────────────

    /// Switch views, loading whatever the target screen shows
    pub async fn open_view(&mut self, view: View) {
        if matches!(
            view,
            View::AdminPrograms | View::AdminBookings | View::AdminStories
        ) && self.state.auth.is_none()
        {
            self.state.push_error("Please log in first");
            self.state.form = FormState::Login(LoginForm::new());
            self.state.current_view = View::Login;
            return;
        }

        self.state.current_view = view;
        self.state.reset_selection();

        match view {
            View::Resources => self.load_resources().await,
            View::Programs => self.load_programs().await,
            View::News => self.load_news().await,
            View::Stories => self.load_stories().await,
            View::Booking => {
                if !matches!(self.state.form, FormState::Booking(_)) {
                    self.state.form = FormState::Booking(BookingForm::new());
                }
            }
            View::Login => self.state.form = FormState::Login(LoginForm::new()),
            View::StorySubmit => {
                if !matches!(self.state.form, FormState::Story(_)) {
                    self.state.form = FormState::Story(StoryForm::new());
                }
            }
            View::AdminPrograms => self.load_admin_programs().await,
            View::AdminBookings => self.load_admin_bookings().await,
            View::AdminStories => self.load_admin_stories().await,
            _ => {}
        }
    }

    // ── Data loading ────────────────────────────────────────────────

    async fn load_resources(&mut self) {
        match self.api.list_resources().await {
            Ok(resources) => {
                self.state.resources = resources;
                self.state.resource_page = 1;
            }
            Err(err) => self.report_api_error(err, "Could not load the resource library"),
        }
    }

    async fn load_programs(&mut self) {
        let category = self.state.active_program_category().map(str::to_string);
        let search = self.state.program_search.clone();
        let search = (!search.trim().is_empty()).then_some(search);
        match self
            .api
            .list_programs(category.as_deref(), search.as_deref())
            .await
        {
            Ok(programs) => {
                if self.state.program_categories.is_empty() {
                    let mut categories: Vec<String> = programs
                        .iter()
                        .map(|p| p.category.clone())
                        .filter(|c| !c.is_empty())
                        .collect();
                    categories.sort();
                    categories.dedup();
                    self.state.program_categories = categories;
                }
                self.state.programs = programs;
            }
            Err(err) => self.report_api_error(err, "Could not load training programs"),
        }
    }

    async fn load_news(&mut self) {
        match self.api.list_news().await {
            Ok(bundle) => {
                self.state.articles = bundle.articles;
                self.state.events = bundle.events;
                self.state.media = bundle.media;
            }
            Err(err) => self.report_api_error(err, "Could not load news"),
        }
    }

    async fn load_stories(&mut self) {
        match self.api.list_stories().await {
            Ok(stories) => self.state.stories = stories,
            Err(err) => self.report_api_error(err, "Could not load success stories"),
        }
    }

    async fn load_admin_programs(&mut self) {
        let Some(auth) = self.state.auth.clone() else {
            return;
        };
        match self.api.admin_list_programs(&auth).await {
            Ok(programs) => self.state.programs = programs,
            Err(err) => return self.report_api_error(err, "Failed to load programs"),
        }
        match self.api.program_categories(&auth).await {
            Ok(categories) => self.state.program_categories = categories,
            Err(err) => self.report_api_error(err, "Failed to load categories"),
        }
    }

    async fn load_admin_bookings(&mut self) {
        let Some(auth) = self.state.auth.clone() else {
            return;
        };
        let query = BookingQuery {
            hall_id: self.state.active_hall_filter().map(str::to_string),
            date: Some(self.state.booking_filters.date.clone()),
            search: Some(self.state.booking_filters.search.clone()),
        };
        match self.api.admin_list_bookings(&auth, &query).await {
            Ok(bookings) => self.state.bookings = bookings,
            Err(err) => return self.report_api_error(err, "Failed to load bookings"),
        }
        match self.api.list_halls(&auth).await {
            Ok(halls) => self.state.halls = halls,
            Err(err) => self.report_api_error(err, "Failed to load halls"),
        }
    }

    async fn load_admin_stories(&mut self) {
        let Some(auth) = self.state.auth.clone() else {
            return;
        };
        match self.api.admin_list_stories(&auth).await {
            Ok(stories) => self.state.stories = stories,
            Err(err) => self.report_api_error(err, "Failed to load stories"),
        }
    }

    // ── Key handling ────────────────────────────────────────────────

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Notice dismissal is modal
        if self.state.current_notice().is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_notice();
            }
            return Ok(());
        }

        // Pending destructive action is modal
        if let Some(action) = self.state.confirm_action.clone() {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    self.state.confirm_action = None;
                    self.run_pending_action(action).await;
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.state.confirm_action = None;
                }
                _ => {}
            }
            return Ok(());
        }

        match self.state.current_view {
            View::Home => self.handle_home_key(key).await,
            View::Partner => self.handle_partner_key(key).await,
            View::Resources => self.handle_resources_key(key).await,
            View::Programs => self.handle_programs_key(key).await,
            View::News => self.handle_news_key(key),
            View::Stories => self.handle_stories_key(key).await,
            View::Booking | View::Login | View::StorySubmit | View::Register
            | View::AdminProgramEdit => self.handle_form_key(key).await,
            View::AdminPrograms => self.handle_admin_programs_key(key).await,
            View::AdminBookings => self.handle_admin_bookings_key(key).await,
            View::AdminStories => self.handle_admin_stories_key(key).await,
        }
    }

    async fn handle_home_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Down | KeyCode::Char('j') => {
                if self.state.home_index + 1 < HOME_ITEMS.len() {
                    self.state.home_index += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.home_index = self.state.home_index.saturating_sub(1);
            }
            KeyCode::Enter => {
                let (_, view) = HOME_ITEMS[self.state.home_index.min(HOME_ITEMS.len() - 1)];
                self.open_view(view).await;
            }
            _ => {}
        }
        Ok(())
    }

    async fn handle_partner_key(&mut self, key: KeyEvent) -> Result<()> {
        use crate::state::forms::partner::{CONFIRMATION, IS_LICENSED, LICENSE_IMAGE};

        if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.submit_partner().await;
            return Ok(());
        }

        let focused = self.state.partner.focused_field();
        match key.code {
            KeyCode::Esc => self.state.current_view = View::Home,
            KeyCode::Tab | KeyCode::Down => self.state.partner.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.partner.prev_field(),
            KeyCode::Right => {
                self.state.partner.advance();
            }
            KeyCode::Left => self.state.partner.retreat(),
            KeyCode::Char(' ') if focused == IS_LICENSED || focused == CONFIRMATION => {
                self.state.partner.toggle_flag(focused);
            }
            KeyCode::Enter if focused == LICENSE_IMAGE => self.attach_license_image().await,
            KeyCode::Enter if focused == IS_LICENSED || focused == CONFIRMATION => {
                self.state.partner.toggle_flag(focused);
            }
            KeyCode::Enter => {
                self.state.partner.advance();
            }
            KeyCode::Backspace => self.state.partner.backspace(focused),
            KeyCode::Char(c) => self.state.partner.push_char(focused, c),
            _ => {}
        }
        Ok(())
    }

    async fn handle_resources_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.state.resource_search_editing {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => self.state.resource_search_editing = false,
                KeyCode::Backspace => self.state.pop_resource_search_char(),
                KeyCode::Char(c) => self.state.push_resource_search_char(c),
                _ => {}
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Esc => self.state.current_view = View::Home,
            KeyCode::Char('/') => self.state.resource_search_editing = true,
            KeyCode::Char('c') => self.state.cycle_resource_category(),
            KeyCode::Right | KeyCode::Char('n') => self.state.next_resource_page(),
            KeyCode::Left | KeyCode::Char('p') => self.state.prev_resource_page(),
            KeyCode::Down | KeyCode::Char('j') => {
                let max = self.state.resource_page_slice().len();
                self.state.move_selection_down(max);
            }
            KeyCode::Up | KeyCode::Char('k') => self.state.move_selection_up(),
            KeyCode::Enter | KeyCode::Char('d') => self.download_selected_resource().await,
            KeyCode::Char('r') => self.load_resources().await,
            _ => {}
        }
        Ok(())
    }

    async fn handle_programs_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.state.program_search_editing {
            match key.code {
                KeyCode::Esc => self.state.program_search_editing = false,
                KeyCode::Enter => {
                    self.state.program_search_editing = false;
                    self.load_programs().await;
                }
                KeyCode::Backspace => {
                    self.state.program_search.pop();
                }
                KeyCode::Char(c) => self.state.program_search.push(c),
                _ => {}
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Esc => self.state.current_view = View::Home,
            KeyCode::Char('/') => self.state.program_search_editing = true,
            KeyCode::Char('c') => {
                self.state.cycle_program_category();
                self.load_programs().await;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let max = self.state.programs.len();
                self.state.move_selection_down(max);
            }
            KeyCode::Up | KeyCode::Char('k') => self.state.move_selection_up(),
            KeyCode::Enter | KeyCode::Char('g') => {
                let program_id = self
                    .state
                    .programs
                    .get(self.state.selected_index)
                    .map(|p| p.id.clone());
                if let Some(id) = program_id {
                    self.state.form = FormState::Register(RegistrationForm::for_program(id));
                    self.state.current_view = View::Register;
                }
            }
            KeyCode::Char('r') => self.load_programs().await,
            _ => {}
        }
        Ok(())
    }

    fn handle_news_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => self.state.current_view = View::Home,
            KeyCode::Tab => {
                self.state.news_tab = self.state.news_tab.next();
                self.state.reset_selection();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let max = match self.state.news_tab {
                    crate::state::NewsTab::Articles => self.state.articles.len(),
                    crate::state::NewsTab::Events => self.state.events.len(),
                    crate::state::NewsTab::Media => self.state.media.len(),
                };
                self.state.move_selection_down(max);
            }
            KeyCode::Up | KeyCode::Char('k') => self.state.move_selection_up(),
            _ => {}
        }
        Ok(())
    }

    async fn handle_stories_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => self.state.current_view = View::Home,
            KeyCode::Down | KeyCode::Char('j') => {
                let max = self.state.visible_stories().len();
                self.state.move_selection_down(max);
            }
            KeyCode::Up | KeyCode::Char('k') => self.state.move_selection_up(),
            KeyCode::Char('n') => {
                self.state.form = FormState::Story(StoryForm::new());
                self.state.current_view = View::StorySubmit;
            }
            KeyCode::Char('r') => self.load_stories().await,
            _ => {}
        }
        Ok(())
    }

    /// Shared key handling for the single-page forms
    async fn handle_form_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.submit_current_form().await;
            return Ok(());
        }

        let multiline = self
            .state
            .form
            .get_active_field_mut()
            .map(|f| f.is_multiline)
            .unwrap_or(false);

        match key.code {
            KeyCode::Esc => {
                self.state.form = FormState::None;
                self.state.current_view = match self.state.current_view {
                    View::Register => View::Programs,
                    View::AdminProgramEdit => View::AdminPrograms,
                    View::StorySubmit if self.state.auth.is_some() => View::AdminStories,
                    View::StorySubmit => View::Stories,
                    _ => View::Home,
                };
            }
            KeyCode::Tab | KeyCode::Down => self.state.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.form.prev_field(),
            KeyCode::Enter if multiline => {
                if let Some(field) = self.state.form.get_active_field_mut() {
                    field.push_char('\n');
                }
            }
            KeyCode::Enter => self.state.form.next_field(),
            KeyCode::Backspace => {
                if let Some(field) = self.state.form.get_active_field_mut() {
                    field.pop_char();
                }
            }
            KeyCode::Char(' ') => {
                if let Some(field) = self.state.form.get_active_field_mut() {
                    if matches!(field.value, crate::state::FieldValue::Flag(_)) {
                        field.toggle();
                    } else {
                        field.push_char(' ');
                    }
                }
            }
            KeyCode::Char(c) => {
                if let Some(field) = self.state.form.get_active_field_mut() {
                    field.push_char(c);
                }
            }
            _ => {}
        }
        Ok(())
    }

    async fn handle_admin_programs_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => self.state.current_view = View::Home,
            KeyCode::Down | KeyCode::Char('j') => {
                let max = self.state.visible_programs().len();
                self.state.move_selection_down(max);
            }
            KeyCode::Up | KeyCode::Char('k') => self.state.move_selection_up(),
            KeyCode::Char('n') => {
                self.state.form = FormState::Program(ProgramForm::new());
                self.state.current_view = View::AdminProgramEdit;
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                let program = self
                    .state
                    .visible_programs()
                    .get(self.state.selected_index)
                    .map(|p| (*p).clone());
                if let Some(program) = program {
                    self.state.form = FormState::Program(ProgramForm::from_program(&program));
                    self.state.current_view = View::AdminProgramEdit;
                }
            }
            KeyCode::Char('d') => self.soft_delete_selected_program().await,
            KeyCode::Char('u') => self.restore_selected_program().await,
            KeyCode::Char('x') => {
                let program_id = self
                    .state
                    .visible_programs()
                    .get(self.state.selected_index)
                    .map(|p| p.id.clone());
                if let Some(id) = program_id {
                    self.state.confirm_action = Some(PendingAction::DeleteProgram(id));
                }
            }
            KeyCode::Char('a') => {
                self.state.show_deleted_programs = !self.state.show_deleted_programs;
                self.state.reset_selection();
                self.config.show_deleted_programs = Some(self.state.show_deleted_programs);
                if let Err(err) = self.config.save() {
                    tracing::warn!("failed to save config: {err}");
                }
            }
            KeyCode::Char('r') => self.load_admin_programs().await,
            _ => {}
        }
        Ok(())
    }

    async fn handle_admin_bookings_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.state.booking_search_editing {
            match key.code {
                KeyCode::Esc => self.state.booking_search_editing = false,
                KeyCode::Enter => {
                    self.state.booking_search_editing = false;
                    self.load_admin_bookings().await;
                }
                KeyCode::Backspace => {
                    self.state.booking_filters.search.pop();
                }
                KeyCode::Char(c) => self.state.booking_filters.search.push(c),
                _ => {}
            }
            return Ok(());
        }
        if self.state.booking_date_editing {
            match key.code {
                KeyCode::Esc => self.state.booking_date_editing = false,
                KeyCode::Enter => {
                    self.state.booking_date_editing = false;
                    self.load_admin_bookings().await;
                }
                KeyCode::Backspace => {
                    self.state.booking_filters.date.pop();
                }
                KeyCode::Char(c) => self.state.booking_filters.date.push(c),
                _ => {}
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Esc => self.state.current_view = View::Home,
            KeyCode::Down | KeyCode::Char('j') => {
                let max = self.state.bookings.len();
                self.state.move_selection_down(max);
            }
            KeyCode::Up | KeyCode::Char('k') => self.state.move_selection_up(),
            KeyCode::Char('/') => self.state.booking_search_editing = true,
            KeyCode::Char('t') => self.state.booking_date_editing = true,
            KeyCode::Char('h') => {
                self.state.cycle_hall_filter();
                self.load_admin_bookings().await;
            }
            KeyCode::Char('x') => {
                let booking_id = self
                    .state
                    .bookings
                    .get(self.state.selected_index)
                    .map(|b| b.id.clone());
                if let Some(id) = booking_id {
                    self.state.confirm_action = Some(PendingAction::DeleteBooking(id));
                }
            }
            KeyCode::Char('r') => self.load_admin_bookings().await,
            _ => {}
        }
        Ok(())
    }

    async fn handle_admin_stories_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => self.state.current_view = View::Home,
            KeyCode::Down | KeyCode::Char('j') => {
                let max = self.state.visible_stories().len();
                self.state.move_selection_down(max);
            }
            KeyCode::Up | KeyCode::Char('k') => self.state.move_selection_up(),
            KeyCode::Char('e') | KeyCode::Enter => {
                let story = self
                    .state
                    .visible_stories()
                    .get(self.state.selected_index)
                    .map(|s| (*s).clone());
                if let Some(story) = story {
                    self.state.form = FormState::Story(StoryForm::from_story(&story));
                    self.state.current_view = View::StorySubmit;
                }
            }
            KeyCode::Char('d') => self.soft_delete_selected_story().await,
            KeyCode::Char('u') => self.restore_selected_story().await,
            KeyCode::Char('a') => {
                self.state.show_deleted_stories = !self.state.show_deleted_stories;
                self.state.reset_selection();
                self.config.show_deleted_stories = Some(self.state.show_deleted_stories);
                if let Err(err) = self.config.save() {
                    tracing::warn!("failed to save config: {err}");
                }
            }
            KeyCode::Char('r') => self.load_admin_stories().await,
            _ => {}
        }
        Ok(())
    }

    // ── Actions ─────────────────────────────────────────────────────

    /// Run the partnership submission with the busy flag held
    async fn submit_partner(&mut self) {
        if self.state.busy {
            return;
        }
        self.state.busy = true;
        let outcome = submit_partnership(&mut self.state.partner, self.api.as_ref()).await;
        self.state.busy = false;

        match outcome {
            SubmitOutcome::Accepted => self.state.push_success(SUBMIT_SUCCESS_MESSAGE),
            SubmitOutcome::Rejected { message } => self.state.push_error(message),
            // Field errors are already highlighted on the failing step
            SubmitOutcome::Blocked { .. } => {}
        }
    }

    /// Read, bound, and attach the license image named in the path input
    async fn attach_license_image(&mut self) {
        let path = self.state.partner.license_path_input.trim().to_string();
        if path.is_empty() {
            return;
        }
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::debug!("license file read failed: {err}");
                self.state
                    .partner
                    .set_attachment_error("Could not open the selected file".into());
                return;
            }
        };
        match media::prepare_license_image(&bytes, media::mime_for_path(&path)) {
            Ok(data_uri) => {
                self.state.partner.set_license_image(data_uri);
                self.state.push_success("License image attached");
            }
            Err(err) => self.state.partner.set_attachment_error(err.to_string()),
        }
    }

    async fn submit_current_form(&mut self) {
        match self.state.current_view {
            View::Booking => self.submit_booking().await,
            View::Login => self.submit_login().await,
            View::StorySubmit => self.submit_story().await,
            View::Register => self.submit_registration().await,
            View::AdminProgramEdit => self.submit_program_form().await,
            _ => {}
        }
    }

    async fn submit_booking(&mut self) {
        let payload = match &mut self.state.form {
            FormState::Booking(form) => {
                if !form.validate() {
                    return;
                }
                BookingPayload::from_form(form)
            }
            _ => return,
        };
        if self.state.busy {
            return;
        }
        self.state.busy = true;
        let result = self.api.create_booking(&payload).await;
        self.state.busy = false;

        match result {
            Ok(()) => {
                self.state.form = FormState::Booking(BookingForm::new());
                self.state.push_success("Booking request sent");
            }
            Err(err) => {
                self.report_api_error(err, "Something went wrong while sending the booking")
            }
        }
    }

    async fn submit_login(&mut self) {
        let credentials = match &mut self.state.form {
            FormState::Login(form) => {
                if !form.validate() {
                    return;
                }
                (
                    form.email.trimmed().to_string(),
                    form.password.as_text().to_string(),
                )
            }
            _ => return,
        };
        if self.state.busy {
            return;
        }
        self.state.busy = true;
        let result = self.api.login(&credentials.0, &credentials.1).await;
        self.state.busy = false;

        match result {
            Ok(session) => {
                let name = session.display_name.clone().unwrap_or_default();
                self.state.auth = Some(session);
                self.state.form = FormState::None;
                self.state.current_view = View::Home;
                if name.is_empty() {
                    self.state.push_success("Logged in");
                } else {
                    self.state.push_success(format!("Logged in as {name}"));
                }
            }
            Err(err) => self.report_api_error(err, "Something went wrong while logging in"),
        }
    }

    async fn submit_story(&mut self) {
        let (name, short_story, image_path, editing_id) = match &mut self.state.form {
            FormState::Story(form) => {
                if !form.validate() {
                    return;
                }
                (
                    form.name.trimmed().to_string(),
                    form.short_story.trimmed().to_string(),
                    form.image_path.trimmed().to_string(),
                    form.editing_id.clone(),
                )
            }
            _ => return,
        };
        if self.state.busy {
            return;
        }
        self.state.busy = true;

        let mut image_url = String::new();
        if !image_path.is_empty() {
            match tokio::fs::read(&image_path).await {
                Ok(bytes) => {
                    let file_name = image_path.rsplit('/').next().unwrap_or("photo.jpg");
                    match self.api.upload_image(bytes, file_name).await {
                        Ok(url) => image_url = url,
                        Err(err) => {
                            self.state.busy = false;
                            return self.report_api_error(err, "Photo upload failed");
                        }
                    }
                }
                Err(_) => {
                    self.state.busy = false;
                    if let FormState::Story(form) = &mut self.state.form {
                        form.image_path.fail("Could not open the photo file");
                    }
                    return;
                }
            }
        }

        let payload = StoryPayload {
            name,
            image_url,
            short_story,
        };
        let result = match (&editing_id, self.state.auth.clone()) {
            (Some(id), Some(auth)) => self.api.update_story(&auth, id, &payload).await,
            _ => self.api.create_story(&payload).await,
        };
        self.state.busy = false;

        match result {
            Ok(()) => {
                self.state.form = FormState::None;
                if editing_id.is_some() {
                    self.state.current_view = View::AdminStories;
                    self.load_admin_stories().await;
                    self.state.push_success("Story updated");
                } else {
                    self.state.current_view = View::Stories;
                    self.load_stories().await;
                    self.state.push_success("Thank you! Your story was submitted.");
                }
            }
            Err(err) => {
                self.report_api_error(err, "Something went wrong while sending the story")
            }
        }
    }

    async fn submit_registration(&mut self) {
        let payload = match &mut self.state.form {
            FormState::Register(form) => {
                if !form.validate() {
                    return;
                }
                RegistrationPayload::from_form(form)
            }
            _ => return,
        };
        if self.state.busy {
            return;
        }
        self.state.busy = true;
        let result = self.api.register_for_program(&payload).await;
        self.state.busy = false;

        match result {
            Ok(()) => {
                self.state.form = FormState::None;
                self.state.current_view = View::Programs;
                self.state
                    .push_success("Registered! Thank you for joining the program.");
            }
            Err(err) => {
                self.report_api_error(err, "Something went wrong during the registration")
            }
        }
    }

    async fn submit_program_form(&mut self) {
        let (payload, editing_id) = match &mut self.state.form {
            FormState::Program(form) => {
                if !form.validate() {
                    return;
                }
                (ProgramPayload::from_form(form), form.editing_id.clone())
            }
            _ => return,
        };
        let Some(auth) = self.state.auth.clone() else {
            return self.report_api_error(
                ApiError::Rejected {
                    status: 401,
                    message: None,
                },
                "Please log in first",
            );
        };
        if self.state.busy {
            return;
        }
        self.state.busy = true;
        let result = match &editing_id {
            Some(id) => self.api.update_program(&auth, id, &payload).await,
            None => self.api.create_program(&auth, &payload).await,
        };
        self.state.busy = false;

        match result {
            Ok(()) => {
                self.state.form = FormState::None;
                self.state.current_view = View::AdminPrograms;
                self.load_admin_programs().await;
                self.state.push_success(if editing_id.is_some() {
                    "Program updated"
                } else {
                    "Program created"
                });
            }
            Err(err) => self.report_api_error(err, "Saving the program failed"),
        }
    }

    async fn download_selected_resource(&mut self) {
        let Some(resource) = self
            .state
            .resource_page_slice()
            .get(self.state.selected_index)
            .copied()
            .cloned()
        else {
            return;
        };
        if self.state.busy {
            return;
        }
        self.state.busy = true;
        let result = self.api.fetch_resource_file(&resource.id).await;
        self.state.busy = false;

        let bytes = match result {
            Ok(bytes) => bytes,
            Err(err) => return self.report_api_error(err, "Download failed"),
        };

        let dir = self
            .config
            .download_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().to_string_lossy().into_owned());
        let file_name = download_file_name(&resource.title, resource.file_url.as_deref());
        let path = std::path::Path::new(&dir).join(file_name);
        match tokio::fs::write(&path, &bytes).await {
            Ok(()) => self
                .state
                .push_success(format!("Saved to {}", path.display())),
            Err(err) => self.state.push_error(format!("Could not save the file: {err}")),
        }
    }

    async fn run_pending_action(&mut self, action: PendingAction) {
        let Some(auth) = self.state.auth.clone() else {
            return;
        };
        match action {
            PendingAction::DeleteProgram(id) => {
                match self.api.delete_program(&auth, &id).await {
                    Ok(()) => {
                        self.load_admin_programs().await;
                        self.state.push_success("Program permanently deleted");
                    }
                    Err(err) => self.report_api_error(err, "Deleting the program failed"),
                }
            }
            PendingAction::DeleteBooking(id) => {
                match self.api.delete_booking(&auth, &id).await {
                    Ok(()) => {
                        self.load_admin_bookings().await;
                        self.state.push_success("Booking deleted");
                    }
                    Err(err) => self.report_api_error(err, "Deleting the booking failed"),
                }
            }
        }
    }

    async fn soft_delete_selected_program(&mut self) {
        let Some(auth) = self.state.auth.clone() else {
            return;
        };
        let Some(id) = self
            .state
            .visible_programs()
            .get(self.state.selected_index)
            .map(|p| p.id.clone())
        else {
            return;
        };
        match self.api.soft_delete_program(&auth, &id).await {
            Ok(()) => {
                self.load_admin_programs().await;
                self.state.push_success("Program moved to trash");
            }
            Err(err) => self.report_api_error(err, "Could not delete the program"),
        }
    }

    async fn restore_selected_program(&mut self) {
        let Some(auth) = self.state.auth.clone() else {
            return;
        };
        let Some(id) = self
            .state
            .visible_programs()
            .get(self.state.selected_index)
            .map(|p| p.id.clone())
        else {
            return;
        };
        match self.api.restore_program(&auth, &id).await {
            Ok(()) => {
                self.load_admin_programs().await;
                self.state.push_success("Program restored");
            }
            Err(err) => self.report_api_error(err, "Could not restore the program"),
        }
    }

    async fn soft_delete_selected_story(&mut self) {
        let Some(auth) = self.state.auth.clone() else {
            return;
        };
        let Some(id) = self
            .state
            .visible_stories()
            .get(self.state.selected_index)
            .map(|s| s.id.clone())
        else {
            return;
        };
        match self.api.soft_delete_story(&auth, &id).await {
            Ok(()) => {
                self.load_admin_stories().await;
                self.state.push_success("Story moved to trash");
            }
            Err(err) => self.report_api_error(err, "Could not delete the story"),
        }
    }

    async fn restore_selected_story(&mut self) {
        let Some(auth) = self.state.auth.clone() else {
            return;
        };
        let Some(id) = self
            .state
            .visible_stories()
            .get(self.state.selected_index)
            .map(|s| s.id.clone())
        else {
            return;
        };
        match self.api.restore_story(&auth, &id).await {
            Ok(()) => {
                self.load_admin_stories().await;
                self.state.push_success("Story restored");
            }
            Err(err) => self.report_api_error(err, "Could not restore the story"),
        }
    }
}

/// File name a downloaded resource is saved under
fn download_file_name(title: &str, file_url: Option<&str>) -> String {
    let stem: String = title
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();
    let stem = if stem.is_empty() { "resource".to_string() } else { stem };
    let ext = file_url
        .and_then(|url| url.rsplit('.').next())
        .filter(|ext| !ext.is_empty() && ext.len() <= 5 && !ext.contains('/'))
        .unwrap_or("dat");
    format!("{stem}.{ext}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockPortalApi;
    use crate::state::NoticeKind;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    async fn app_with(mut api: MockPortalApi) -> App {
        api.expect_check_connection().returning(|| true);
        App::with_api(Box::new(api), PortalConfig::default()).await
    }

    #[tokio::test]
    async fn test_typing_flows_into_the_focused_partner_field() {
        let mut app = app_with(MockPortalApi::new()).await;
        app.state.current_view = View::Partner;

        for c in "Manar".chars() {
            app.handle_key(key(KeyCode::Char(c))).await.unwrap();
        }
        assert_eq!(app.state.partner.organization_name, "Manar");

        app.handle_key(key(KeyCode::Backspace)).await.unwrap();
        assert_eq!(app.state.partner.organization_name, "Mana");
    }

    #[tokio::test]
    async fn test_right_arrow_blocked_on_invalid_step() {
        let mut app = app_with(MockPortalApi::new()).await;
        app.state.current_view = View::Partner;

        app.handle_key(key(KeyCode::Right)).await.unwrap();
        assert_eq!(app.state.partner.step, 1);
        assert!(!app.state.partner.errors.is_empty());
    }

    #[tokio::test]
    async fn test_ctrl_s_submits_valid_partner_form_once() {
        let mut api = MockPortalApi::new();
        api.expect_submit_partnership()
            .times(1)
            .returning(|_| Ok(()));
        let mut app = app_with(api).await;
        app.state.current_view = View::Partner;
        app.state.partner = crate::state::forms::partner::filled_form();

        app.handle_key(ctrl('s')).await.unwrap();

        assert_eq!(app.state.partner.step, 1);
        assert_eq!(
            app.state.current_notice().map(|n| n.kind),
            Some(NoticeKind::Success)
        );
        assert!(!app.state.busy);
    }

    #[tokio::test]
    async fn test_submit_blocked_jumps_to_failing_step_without_notice() {
        let mut api = MockPortalApi::new();
        api.expect_submit_partnership().times(0);
        let mut app = app_with(api).await;
        app.state.current_view = View::Partner;
        app.state.partner = crate::state::forms::partner::filled_form();
        app.state.partner.director.email = "broken".into();
        app.state.partner.step = 3;

        app.handle_key(ctrl('s')).await.unwrap();

        assert_eq!(app.state.partner.step, 2);
        assert!(app.state.current_notice().is_none());
    }

    #[tokio::test]
    async fn test_admin_view_requires_login() {
        let mut app = app_with(MockPortalApi::new()).await;
        app.open_view(View::AdminPrograms).await;

        assert_eq!(app.state.current_view, View::Login);
        assert_eq!(
            app.state.current_notice().map(|n| n.kind),
            Some(NoticeKind::Error)
        );
    }

    #[tokio::test]
    async fn test_notice_is_modal_until_dismissed() {
        let mut app = app_with(MockPortalApi::new()).await;
        app.state.push_error("boom");
        app.state.current_view = View::Partner;

        // Keys other than Enter/Esc are swallowed
        app.handle_key(key(KeyCode::Char('x'))).await.unwrap();
        assert_eq!(app.state.partner.organization_name, "");
        assert!(app.state.current_notice().is_some());

        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert!(app.state.current_notice().is_none());
    }

    #[tokio::test]
    async fn test_hard_delete_waits_for_confirmation() {
        let mut api = MockPortalApi::new();
        api.expect_delete_program().times(0);
        let mut app = app_with(api).await;
        app.state.auth = Some(crate::state::AuthSession {
            token: "t".into(),
            display_name: None,
        });
        app.state.current_view = View::AdminPrograms;
        app.state.confirm_action = Some(PendingAction::DeleteProgram("p1".into()));

        app.handle_key(key(KeyCode::Esc)).await.unwrap();
        assert!(app.state.confirm_action.is_none());
    }

    #[tokio::test]
    async fn test_confirmed_delete_calls_backend() {
        let mut api = MockPortalApi::new();
        api.expect_delete_program()
            .times(1)
            .returning(|_, _| Ok(()));
        api.expect_admin_list_programs()
            .returning(|_| Ok(vec![]));
        api.expect_program_categories().returning(|_| Ok(vec![]));
        let mut app = app_with(api).await;
        app.state.auth = Some(crate::state::AuthSession {
            token: "t".into(),
            display_name: None,
        });
        app.state.current_view = View::AdminPrograms;
        app.state.confirm_action = Some(PendingAction::DeleteProgram("p1".into()));

        app.handle_key(key(KeyCode::Char('y'))).await.unwrap();
        assert!(app.state.confirm_action.is_none());
        assert_eq!(
            app.state.current_notice().map(|n| n.kind),
            Some(NoticeKind::Success)
        );
    }

    #[tokio::test]
    async fn test_expired_session_bounces_to_login() {
        let mut api = MockPortalApi::new();
        api.expect_admin_list_programs().returning(|_| {
            Err(ApiError::Rejected {
                status: 401,
                message: None,
            })
        });
        let mut app = app_with(api).await;
        app.state.auth = Some(crate::state::AuthSession {
            token: "stale".into(),
            display_name: None,
        });

        app.open_view(View::AdminPrograms).await;

        assert!(app.state.auth.is_none());
        assert_eq!(app.state.current_view, View::Login);
    }

    #[test]
    fn test_download_file_name_sanitizes_title() {
        assert_eq!(
            download_file_name("Annual Report 2026!", Some("/files/report.pdf")),
            "annual-report-2026.pdf"
        );
        assert_eq!(download_file_name("///", None), "resource.dat");
    }
}
