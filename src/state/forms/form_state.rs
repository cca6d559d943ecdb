//! Single-page form structs and the active-form enum
//!
//! The three-page partnership form lives in [`super::partner`]; everything
//! here is a plain one-page form with field-local validation.

use chrono::NaiveDate;

use super::field::FormField;
use super::rules::{is_valid_email, is_valid_phone, EMAIL_FORMAT_MESSAGE, PHONE_FORMAT_MESSAGE};
use crate::state::{Program, SuccessStory};

pub const DATE_FORMAT_MESSAGE: &str = "Use the YYYY-MM-DD date format";

/// Calendar-valid ISO date
fn is_valid_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> &mut FormField;
    fn get_field(&self, index: usize) -> Option<&FormField>;
    /// Run the form's checks, recording errors on the failing fields.
    /// Returns true when every field is valid.
    fn validate(&mut self) -> bool;
}

/// Enum representing whichever single-page form is open
#[derive(Debug, Clone, Default)]
pub enum FormState {
    #[default]
    None,
    Login(LoginForm),
    Booking(BookingForm),
    Story(StoryForm),
    Program(ProgramForm),
    Register(RegistrationForm),
}

impl FormState {
    pub fn as_form_mut(&mut self) -> Option<&mut dyn Form> {
        match self {
            FormState::None => None,
            FormState::Login(f) => Some(f),
            FormState::Booking(f) => Some(f),
            FormState::Story(f) => Some(f),
            FormState::Program(f) => Some(f),
            FormState::Register(f) => Some(f),
        }
    }

    pub fn as_form(&self) -> Option<&dyn FormView> {
        match self {
            FormState::None => None,
            FormState::Login(f) => Some(f),
            FormState::Booking(f) => Some(f),
            FormState::Story(f) => Some(f),
            FormState::Program(f) => Some(f),
            FormState::Register(f) => Some(f),
        }
    }

    pub fn next_field(&mut self) {
        if let Some(form) = self.as_form_mut() {
            form.next_field();
        }
    }

    pub fn prev_field(&mut self) {
        if let Some(form) = self.as_form_mut() {
            form.prev_field();
        }
    }

    pub fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        self.as_form_mut().map(|f| f.get_active_field_mut())
    }
}

/// Read-only subset of [`Form`] used by the renderer
pub trait FormView {
    fn title(&self) -> &str;
    fn view_field_count(&self) -> usize;
    fn view_active_field(&self) -> usize;
    fn view_field(&self, index: usize) -> Option<&FormField>;
}

impl<T: Form + Titled> FormView for T {
    fn title(&self) -> &str {
        Titled::title(self)
    }
    fn view_field_count(&self) -> usize {
        self.field_count()
    }
    fn view_active_field(&self) -> usize {
        self.active_field()
    }
    fn view_field(&self, index: usize) -> Option<&FormField> {
        self.get_field(index)
    }
}

/// Display title for a form
pub trait Titled {
    fn title(&self) -> &str;
}

macro_rules! indexed_form {
    ($name:ident, $title:expr, [$($idx:literal => $field:ident),+ $(,)?]) => {
        impl Titled for $name {
            fn title(&self) -> &str {
                $title
            }
        }

        impl Form for $name {
            fn field_count(&self) -> usize {
                [$($idx),+].len()
            }
            fn active_field(&self) -> usize {
                self.active_field_index
            }
            fn set_active_field(&mut self, index: usize) {
                self.active_field_index = index.min(self.field_count() - 1);
            }
            fn get_active_field_mut(&mut self) -> &mut FormField {
                match self.active_field_index {
                    $($idx => &mut self.$field,)+
                    _ => unreachable!("active field index is clamped"),
                }
            }
            fn get_field(&self, index: usize) -> Option<&FormField> {
                match index {
                    $($idx => Some(&self.$field),)+
                    _ => None,
                }
            }
            fn validate(&mut self) -> bool {
                self.run_checks()
            }
        }
    };
}

// Admin login
#[derive(Debug, Clone)]
pub struct LoginForm {
    pub email: FormField,
    pub password: FormField,
    pub active_field_index: usize,
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            email: FormField::text("email", "Email", false),
            password: FormField::text("password", "Password", false),
            active_field_index: 0,
        }
    }

    fn run_checks(&mut self) -> bool {
        let mut ok = true;
        if self.email.trimmed().is_empty() {
            self.email.fail("Email is required");
            ok = false;
        } else if !is_valid_email(self.email.trimmed()) {
            self.email.fail(EMAIL_FORMAT_MESSAGE);
            ok = false;
        }
        if self.password.as_text().is_empty() {
            self.password.fail("Password is required");
            ok = false;
        }
        ok
    }
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

indexed_form!(LoginForm, "Admin Login", [0 => email, 1 => password]);

// Hall booking
#[derive(Debug, Clone)]
pub struct BookingForm {
    pub full_name: FormField,
    pub phone: FormField,
    pub email: FormField,
    pub hall_id: FormField,
    pub date: FormField,
    pub time: FormField,
    pub notes: FormField,
    pub active_field_index: usize,
}

impl BookingForm {
    pub fn new() -> Self {
        Self {
            full_name: FormField::text("fullName", "Full Name", false),
            phone: FormField::text("phone", "Phone", false),
            email: FormField::text("email", "Email (optional)", false),
            hall_id: FormField::text("hallId", "Hall", false),
            date: FormField::text("date", "Date (YYYY-MM-DD)", false),
            time: FormField::text("time", "Time", false),
            notes: FormField::text("notes", "Notes", true),
            active_field_index: 0,
        }
    }

    fn run_checks(&mut self) -> bool {
        let mut ok = true;
        for (field, message) in [
            (&mut self.full_name, "Full name is required"),
            (&mut self.hall_id, "Hall is required"),
            (&mut self.time, "Time is required"),
        ] {
            if field.trimmed().is_empty() {
                field.fail(message);
                ok = false;
            }
        }
        let date = self.date.trimmed();
        if date.is_empty() {
            self.date.fail("Date is required");
            ok = false;
        } else if !is_valid_date(date) {
            self.date.fail(DATE_FORMAT_MESSAGE);
            ok = false;
        }
        let phone = self.phone.trimmed();
        if phone.is_empty() {
            self.phone.fail("Phone number is required");
            ok = false;
        } else if !is_valid_phone(phone) {
            self.phone.fail(PHONE_FORMAT_MESSAGE);
            ok = false;
        }
        let email = self.email.trimmed();
        if !email.is_empty() && !is_valid_email(email) {
            self.email.fail(EMAIL_FORMAT_MESSAGE);
            ok = false;
        }
        ok
    }
}

impl Default for BookingForm {
    fn default() -> Self {
        Self::new()
    }
}

indexed_form!(
    BookingForm,
    "Book a Hall",
    [0 => full_name, 1 => phone, 2 => email, 3 => hall_id, 4 => date, 5 => time, 6 => notes]
);

// Success story submission
#[derive(Debug, Clone)]
pub struct StoryForm {
    pub name: FormField,
    pub short_story: FormField,
    pub image_path: FormField,
    pub active_field_index: usize,
    /// Set when editing an existing story from the admin screen
    pub editing_id: Option<String>,
}

impl StoryForm {
    pub fn new() -> Self {
        Self {
            name: FormField::text("name", "Your Name", false),
            short_story: FormField::text("shortStory", "Your Story", true),
            image_path: FormField::text("image", "Photo file (optional)", false),
            active_field_index: 0,
            editing_id: None,
        }
    }

    pub fn from_story(story: &SuccessStory) -> Self {
        Self {
            name: FormField::text_with_value("name", "Your Name", story.name.clone(), false),
            short_story: FormField::text_with_value(
                "shortStory",
                "Your Story",
                story.short_story.clone(),
                true,
            ),
            image_path: FormField::text("image", "Photo file (optional)", false),
            active_field_index: 0,
            editing_id: Some(story.id.clone()),
        }
    }

    fn run_checks(&mut self) -> bool {
        let mut ok = true;
        if self.name.trimmed().is_empty() {
            self.name.fail("Name is required");
            ok = false;
        }
        if self.short_story.trimmed().is_empty() {
            self.short_story.fail("The story text is required");
            ok = false;
        }
        ok
    }
}

impl Default for StoryForm {
    fn default() -> Self {
        Self::new()
    }
}

indexed_form!(StoryForm, "Share Your Story", [0 => name, 1 => short_story, 2 => image_path]);

// Admin program create/edit
#[derive(Debug, Clone)]
pub struct ProgramForm {
    pub name: FormField,
    pub description: FormField,
    pub category: FormField,
    pub start_date: FormField,
    pub end_date: FormField,
    pub active_field_index: usize,
    pub editing_id: Option<String>,
}

impl ProgramForm {
    pub fn new() -> Self {
        Self {
            name: FormField::text("name", "Name", false),
            description: FormField::text("description", "Description", true),
            category: FormField::text("category", "Category", false),
            start_date: FormField::text("startDate", "Start Date (YYYY-MM-DD)", false),
            end_date: FormField::text("endDate", "End Date (YYYY-MM-DD)", false),
            active_field_index: 0,
            editing_id: None,
        }
    }

    pub fn from_program(program: &Program) -> Self {
        // Backend dates arrive as ISO timestamps; keep the date part only
        let date_part = |value: &Option<String>| {
            value
                .as_deref()
                .map(|v| v.split('T').next().unwrap_or(v).to_string())
                .unwrap_or_default()
        };
        Self {
            name: FormField::text_with_value("name", "Name", program.name.clone(), false),
            description: FormField::text_with_value(
                "description",
                "Description",
                program.description.clone(),
                true,
            ),
            category: FormField::text_with_value(
                "category",
                "Category",
                program.category.clone(),
                false,
            ),
            start_date: FormField::text_with_value(
                "startDate",
                "Start Date (YYYY-MM-DD)",
                date_part(&program.start_date),
                false,
            ),
            end_date: FormField::text_with_value(
                "endDate",
                "End Date (YYYY-MM-DD)",
                date_part(&program.end_date),
                false,
            ),
            active_field_index: 0,
            editing_id: Some(program.id.clone()),
        }
    }

    fn run_checks(&mut self) -> bool {
        let mut ok = true;
        for (field, message) in [
            (&mut self.name, "Program name is required"),
            (&mut self.description, "Description is required"),
            (&mut self.category, "Category is required"),
        ] {
            if field.trimmed().is_empty() {
                field.fail(message);
                ok = false;
            }
        }
        // Dates are optional but must be calendar-valid when given
        for field in [&mut self.start_date, &mut self.end_date] {
            let value = field.trimmed();
            if !value.is_empty() && !is_valid_date(value) {
                field.fail(DATE_FORMAT_MESSAGE);
                ok = false;
            }
        }
        ok
    }
}

impl Default for ProgramForm {
    fn default() -> Self {
        Self::new()
    }
}

indexed_form!(
    ProgramForm,
    "Program",
    [0 => name, 1 => description, 2 => category, 3 => start_date, 4 => end_date]
);

// Training program registration
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    pub name: FormField,
    pub email: FormField,
    pub phone: FormField,
    pub active_field_index: usize,
    pub program_id: String,
}

impl RegistrationForm {
    pub fn for_program(program_id: impl Into<String>) -> Self {
        Self {
            name: FormField::text("name", "Name", false),
            email: FormField::text("email", "Email", false),
            phone: FormField::text("phone", "Phone", false),
            active_field_index: 0,
            program_id: program_id.into(),
        }
    }

    fn run_checks(&mut self) -> bool {
        let mut ok = true;
        if self.name.trimmed().is_empty() {
            self.name.fail("Name is required");
            ok = false;
        }
        let email = self.email.trimmed();
        if email.is_empty() {
            self.email.fail("Email is required");
            ok = false;
        } else if !is_valid_email(email) {
            self.email.fail(EMAIL_FORMAT_MESSAGE);
            ok = false;
        }
        let phone = self.phone.trimmed();
        if phone.is_empty() {
            self.phone.fail("Phone number is required");
            ok = false;
        } else if !is_valid_phone(phone) {
            self.phone.fail(PHONE_FORMAT_MESSAGE);
            ok = false;
        }
        ok
    }
}

indexed_form!(
    RegistrationForm,
    "Program Registration",
    [0 => name, 1 => email, 2 => phone]
);
