//! Application state definitions

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::forms::{FormState, PartnerForm};

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Home,
    Partner,
    Booking,
    Resources,
    Programs,
    Register,
    News,
    Stories,
    StorySubmit,
    Login,
    AdminPrograms,
    AdminProgramEdit,
    AdminBookings,
    AdminStories,
}

/// Resource categories offered by the library filter, `all` first
pub const RESOURCE_CATEGORIES: &[&str] = &["all", "articles", "videos", "presentations", "pdf"];

/// Resources shown per page in the library browser
pub const RESOURCES_PER_PAGE: usize = 9;

/// Published library resource
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub file_url: Option<String>,
}

/// Training program
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub is_deleted: bool,
}

/// Hall booking record (admin view)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: String,
    pub full_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub notes: String,
    pub hall_id: String,
    pub date: String,
    #[serde(default)]
    pub time: String,
}

/// Published success story
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessStory {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub short_story: String,
    #[serde(default)]
    pub is_deleted: bool,
}

/// News article
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub date: Option<String>,
}

/// Calendar event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventItem {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub date: Option<String>,
}

/// Media gallery entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub url: String,
}

/// Bearer token obtained from the login endpoint.
///
/// Passed explicitly into every admin API call rather than read from
/// ambient shared state, so the client stays testable in isolation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub token: String,
    pub display_name: Option<String>,
}

/// Tab of the news view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NewsTab {
    #[default]
    Articles,
    Events,
    Media,
}

impl NewsTab {
    pub fn next(&self) -> Self {
        match self {
            Self::Articles => Self::Events,
            Self::Events => Self::Media,
            Self::Media => Self::Articles,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Articles => "Articles",
            Self::Events => "Events",
            Self::Media => "Media",
        }
    }
}

/// Severity of a transient notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Dismissible notification shown over the current view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

/// Admin action awaiting a yes/no confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    DeleteProgram(String),
    DeleteBooking(String),
}

/// Client-side filters for the admin bookings list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingFilters {
    pub hall_index: usize,
    pub date: String,
    pub search: String,
}

/// Main application state
#[derive(Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,

    // Session
    pub backend_connected: bool,
    pub auth: Option<AuthSession>,
    /// One request in flight at a time; disables the submit controls
    pub busy: bool,

    // Notices
    pub notices: VecDeque<Notice>,
    pub confirm_action: Option<PendingAction>,

    // Forms
    pub partner: PartnerForm,
    pub form: FormState,

    // Resource library
    pub resources: Vec<Resource>,
    pub resource_search: String,
    pub resource_search_editing: bool,
    pub resource_category_index: usize,
    pub resource_page: usize,

    // Programs
    pub programs: Vec<Program>,
    pub program_categories: Vec<String>,
    pub program_category_index: usize,
    pub program_search: String,
    pub program_search_editing: bool,

    // News
    pub news_tab: NewsTab,
    pub articles: Vec<NewsArticle>,
    pub events: Vec<EventItem>,
    pub media: Vec<MediaItem>,

    // Stories
    pub stories: Vec<SuccessStory>,
    pub show_deleted_stories: bool,

    // Admin bookings
    pub bookings: Vec<Booking>,
    pub halls: Vec<String>,
    pub booking_filters: BookingFilters,
    pub booking_search_editing: bool,
    pub booking_date_editing: bool,

    // Admin programs
    pub show_deleted_programs: bool,

    // Lists
    pub selected_index: usize,
    pub home_index: usize,
}

impl AppState {
    // ── Notices ─────────────────────────────────────────────────────

    pub fn push_success(&mut self, text: impl Into<String>) {
        self.notices.push_back(Notice {
            kind: NoticeKind::Success,
            text: text.into(),
        });
    }

    pub fn push_error(&mut self, text: impl Into<String>) {
        self.notices.push_back(Notice {
            kind: NoticeKind::Error,
            text: text.into(),
        });
    }

    pub fn current_notice(&self) -> Option<&Notice> {
        self.notices.front()
    }

    pub fn dismiss_notice(&mut self) {
        self.notices.pop_front();
    }

    // ── Selection ───────────────────────────────────────────────────

    pub fn move_selection_down(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn reset_selection(&mut self) {
        self.selected_index = 0;
    }

    // ── Resource library ────────────────────────────────────────────

    pub fn active_resource_category(&self) -> &'static str {
        RESOURCE_CATEGORIES
            .get(self.resource_category_index)
            .copied()
            .unwrap_or("all")
    }

    /// Resources matching the active category and the search query,
    /// title or description, case-insensitive
    pub fn filtered_resources(&self) -> Vec<&Resource> {
        let query = self.resource_search.to_lowercase();
        let category = self.active_resource_category();
        self.resources
            .iter()
            .filter(|r| category == "all" || r.category == category)
            .filter(|r| {
                query.is_empty()
                    || r.title.to_lowercase().contains(&query)
                    || r.description.to_lowercase().contains(&query)
            })
            .collect()
    }

    pub fn resource_total_pages(&self) -> usize {
        self.filtered_resources().len().div_ceil(RESOURCES_PER_PAGE)
    }

    /// Current page of the filtered list (page index is clamped elsewhere)
    pub fn resource_page_slice(&self) -> Vec<&Resource> {
        self.filtered_resources()
            .into_iter()
            .skip(self.resource_page.saturating_sub(1) * RESOURCES_PER_PAGE)
            .take(RESOURCES_PER_PAGE)
            .collect()
    }

    /// Any filter change snaps back to the first page
    pub fn set_resource_search(&mut self, query: String) {
        self.resource_search = query;
        self.resource_page = 1;
        self.reset_selection();
    }

    pub fn push_resource_search_char(&mut self, c: char) {
        self.resource_search.push(c);
        self.resource_page = 1;
        self.reset_selection();
    }

    pub fn pop_resource_search_char(&mut self) {
        self.resource_search.pop();
        self.resource_page = 1;
        self.reset_selection();
    }

    pub fn cycle_resource_category(&mut self) {
        self.resource_category_index =
            (self.resource_category_index + 1) % RESOURCE_CATEGORIES.len();
        self.resource_page = 1;
        self.reset_selection();
    }

    pub fn next_resource_page(&mut self) {
        let total = self.resource_total_pages();
        if self.resource_page < total {
            self.resource_page += 1;
            self.reset_selection();
        }
    }

    pub fn prev_resource_page(&mut self) {
        if self.resource_page > 1 {
            self.resource_page -= 1;
            self.reset_selection();
        }
    }

    // ── Programs ────────────────────────────────────────────────────

    pub fn active_program_category(&self) -> Option<&str> {
        if self.program_category_index == 0 {
            None
        } else {
            self.program_categories
                .get(self.program_category_index - 1)
                .map(String::as_str)
        }
    }

    pub fn cycle_program_category(&mut self) {
        // Index 0 means "all categories"
        self.program_category_index =
            (self.program_category_index + 1) % (self.program_categories.len() + 1);
        self.reset_selection();
    }

    /// Programs visible on the admin screen
    pub fn visible_programs(&self) -> Vec<&Program> {
        self.programs
            .iter()
            .filter(|p| self.show_deleted_programs || !p.is_deleted)
            .collect()
    }

    // ── Stories ─────────────────────────────────────────────────────

    pub fn visible_stories(&self) -> Vec<&SuccessStory> {
        self.stories
            .iter()
            .filter(|s| self.show_deleted_stories || !s.is_deleted)
            .collect()
    }

    // ── Admin bookings ──────────────────────────────────────────────

    pub fn active_hall_filter(&self) -> Option<&str> {
        if self.booking_filters.hall_index == 0 {
            None
        } else {
            self.halls
                .get(self.booking_filters.hall_index - 1)
                .map(String::as_str)
        }
    }

    pub fn cycle_hall_filter(&mut self) {
        self.booking_filters.hall_index =
            (self.booking_filters.hall_index + 1) % (self.halls.len() + 1);
        self.reset_selection();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn resource(id: &str, title: &str, description: &str, category: &str) -> Resource {
        Resource {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            category: category.into(),
            images: vec![],
            file_url: None,
        }
    }

    fn state_with_resources(count: usize) -> AppState {
        let mut state = AppState {
            resource_page: 1,
            ..Default::default()
        };
        state.resources = (0..count)
            .map(|i| resource(&format!("r{i}"), &format!("Resource {i}"), "", "articles"))
            .collect();
        state
    }

    mod notices {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_notices_queue_in_order() {
            let mut state = AppState::default();
            state.push_error("first");
            state.push_success("second");
            assert_eq!(state.current_notice().unwrap().text, "first");
            state.dismiss_notice();
            assert_eq!(state.current_notice().unwrap().kind, NoticeKind::Success);
            state.dismiss_notice();
            assert!(state.current_notice().is_none());
        }
    }

    mod resource_filtering {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_search_matches_title_or_description_case_insensitive() {
            let mut state = AppState::default();
            state.resources = vec![
                resource("1", "Budget Guide", "", "pdf"),
                resource("2", "Other", "annual BUDGET figures", "articles"),
                resource("3", "Unrelated", "nothing", "videos"),
            ];
            state.set_resource_search("budget".into());
            let hits = state.filtered_resources();
            assert_eq!(hits.len(), 2);
        }

        #[test]
        fn test_category_filter_composes_with_search() {
            let mut state = AppState::default();
            state.resources = vec![
                resource("1", "Budget Guide", "", "pdf"),
                resource("2", "Budget Talk", "", "videos"),
            ];
            state.set_resource_search("budget".into());
            // Cycle to "articles", then "videos", then "presentations", then "pdf"
            while state.active_resource_category() != "pdf" {
                state.cycle_resource_category();
            }
            let hits = state.filtered_resources();
            assert_eq!(hits.len(), 1);
            assert_eq!(hits[0].id, "1");
        }

        #[test]
        fn test_filter_change_resets_page() {
            let mut state = state_with_resources(20);
            state.next_resource_page();
            assert_eq!(state.resource_page, 2);
            state.push_resource_search_char('r');
            assert_eq!(state.resource_page, 1);

            state.next_resource_page();
            state.cycle_resource_category();
            assert_eq!(state.resource_page, 1);
        }

        #[test]
        fn test_pagination_slices_nine_per_page() {
            let mut state = state_with_resources(20);
            assert_eq!(state.resource_total_pages(), 3);
            assert_eq!(state.resource_page_slice().len(), 9);
            state.next_resource_page();
            assert_eq!(state.resource_page_slice().len(), 9);
            state.next_resource_page();
            assert_eq!(state.resource_page_slice().len(), 2);
            // No page beyond the last
            state.next_resource_page();
            assert_eq!(state.resource_page, 3);
        }

        #[test]
        fn test_prev_page_floors_at_one() {
            let mut state = state_with_resources(20);
            state.prev_resource_page();
            assert_eq!(state.resource_page, 1);
        }
    }

    mod admin_filters {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_hall_filter_cycles_through_all() {
            let mut state = AppState::default();
            state.halls = vec!["main".into(), "annex".into()];
            assert_eq!(state.active_hall_filter(), None);
            state.cycle_hall_filter();
            assert_eq!(state.active_hall_filter(), Some("main"));
            state.cycle_hall_filter();
            assert_eq!(state.active_hall_filter(), Some("annex"));
            state.cycle_hall_filter();
            assert_eq!(state.active_hall_filter(), None);
        }

        #[test]
        fn test_deleted_programs_hidden_by_default() {
            let mut state = AppState::default();
            state.programs = vec![
                Program {
                    id: "a".into(),
                    name: "Active".into(),
                    description: String::new(),
                    category: String::new(),
                    start_date: None,
                    end_date: None,
                    is_deleted: false,
                },
                Program {
                    id: "b".into(),
                    name: "Gone".into(),
                    description: String::new(),
                    category: String::new(),
                    start_date: None,
                    end_date: None,
                    is_deleted: true,
                },
            ];
            assert_eq!(state.visible_programs().len(), 1);
            state.show_deleted_programs = true;
            assert_eq!(state.visible_programs().len(), 2);
        }
    }

    mod selection {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_selection_bounds() {
            let mut state = AppState::default();
            state.move_selection_up();
            assert_eq!(state.selected_index, 0);
            state.move_selection_down(3);
            state.move_selection_down(3);
            state.move_selection_down(3);
            assert_eq!(state.selected_index, 2);
            state.move_selection_down(0);
            assert_eq!(state.selected_index, 2);
        }
    }

    mod wire_format {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_resource_decodes_backend_shape() {
            let json = r#"{
                "_id": "abc",
                "title": "Guide",
                "description": "d",
                "category": "pdf",
                "images": ["/uploads/a.png"],
                "fileUrl": "/files/guide.pdf"
            }"#;
            let r: Resource = serde_json::from_str(json).unwrap();
            assert_eq!(r.id, "abc");
            assert_eq!(r.file_url.as_deref(), Some("/files/guide.pdf"));
        }

        #[test]
        fn test_program_tolerates_missing_optionals() {
            let json = r#"{"_id": "p", "name": "Sewing"}"#;
            let p: Program = serde_json::from_str(json).unwrap();
            assert_eq!(p.name, "Sewing");
            assert!(!p.is_deleted);
            assert!(p.start_date.is_none());
        }

        #[test]
        fn test_booking_decodes_camel_case() {
            let json = r#"{
                "_id": "b1",
                "fullName": "Rana",
                "hallId": "main",
                "date": "2026-09-01",
                "time": "18:00"
            }"#;
            let b: Booking = serde_json::from_str(json).unwrap();
            assert_eq!(b.full_name, "Rana");
            assert_eq!(b.hall_id, "main");
        }
    }
}
