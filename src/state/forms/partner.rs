//! Partnership registration form state and step controller

use super::path::FieldPath;
use super::rules::{validate_step, ErrorMap};

/// Number of pages in the partnership form
pub const TOTAL_STEPS: u8 = 3;

// Field addresses, named after the backend's payload keys
pub const ORGANIZATION_NAME: FieldPath = FieldPath::root("organizationName");
pub const ORGANIZATION_LOCATION: FieldPath = FieldPath::root("organizationLocation");
pub const INDUSTRY: FieldPath = FieldPath::root("industry");
pub const SOCIAL_MEDIA: FieldPath = FieldPath::root("socialMedia");
pub const IS_LICENSED: FieldPath = FieldPath::root("isLicensed");
pub const LICENSE_IMAGE: FieldPath = FieldPath::root("licenseImage");
pub const DIRECTOR_NAME: FieldPath = FieldPath::director("name");
pub const DIRECTOR_PHONE: FieldPath = FieldPath::director("phone");
pub const DIRECTOR_EMAIL: FieldPath = FieldPath::director("email");
pub const LIAISON_NAME: FieldPath = FieldPath::liaison("name");
pub const LIAISON_PHONE: FieldPath = FieldPath::liaison("phone");
pub const LIAISON_EMAIL: FieldPath = FieldPath::liaison("email");
pub const PARTNERSHIP_TYPE: FieldPath = FieldPath::root("partnershipType");
pub const DURATION: FieldPath = FieldPath::root("duration");
pub const EXPECTATIONS: FieldPath = FieldPath::root("expectations");
pub const OUR_OFFER: FieldPath = FieldPath::root("ourOffer");
pub const CONFIRMATION: FieldPath = FieldPath::root("confirmation");

/// Borrowed view of a single field value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRef<'a> {
    Text(&'a str),
    Flag(bool),
}

/// Contact sub-section (director or liaison), always present
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub phone: String,
    pub email: String,
}

/// Accumulated state of the three-page partnership form.
///
/// Leaf values are strings or booleans only. The `director` and `liaison`
/// sub-sections exist even when empty. `step` is in `1..=TOTAL_STEPS`.
#[derive(Debug, Clone, PartialEq)]
pub struct PartnerForm {
    pub organization_name: String,
    pub organization_location: String,
    pub is_licensed: bool,
    pub industry: String,
    pub director: ContactFields,
    pub liaison: ContactFields,
    pub partnership_type: String,
    pub duration: String,
    pub expectations: String,
    pub our_offer: String,
    pub social_media: String,
    /// Bounded JPEG data URI produced by the image preprocessor, or empty
    pub license_image: String,
    pub confirmation: bool,

    pub step: u8,
    pub errors: ErrorMap,
    /// Focused field index within the current step (TUI focus, not data)
    pub active_field: usize,
    /// Path input box for selecting the license image file (UI only)
    pub license_path_input: String,
}

impl Default for PartnerForm {
    fn default() -> Self {
        Self {
            organization_name: String::new(),
            organization_location: String::new(),
            is_licensed: false,
            industry: String::new(),
            director: ContactFields::default(),
            liaison: ContactFields::default(),
            partnership_type: String::new(),
            duration: String::new(),
            expectations: String::new(),
            our_offer: String::new(),
            social_media: String::new(),
            license_image: String::new(),
            confirmation: false,
            step: 1,
            errors: ErrorMap::new(),
            active_field: 0,
            license_path_input: String::new(),
        }
    }
}

impl PartnerForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a field by its address
    pub fn value(&self, path: FieldPath) -> Option<FieldRef<'_>> {
        match path {
            p if p == ORGANIZATION_NAME => Some(FieldRef::Text(&self.organization_name)),
            p if p == ORGANIZATION_LOCATION => Some(FieldRef::Text(&self.organization_location)),
            p if p == INDUSTRY => Some(FieldRef::Text(&self.industry)),
            p if p == SOCIAL_MEDIA => Some(FieldRef::Text(&self.social_media)),
            p if p == IS_LICENSED => Some(FieldRef::Flag(self.is_licensed)),
            p if p == LICENSE_IMAGE => Some(FieldRef::Text(&self.license_image)),
            p if p == DIRECTOR_NAME => Some(FieldRef::Text(&self.director.name)),
            p if p == DIRECTOR_PHONE => Some(FieldRef::Text(&self.director.phone)),
            p if p == DIRECTOR_EMAIL => Some(FieldRef::Text(&self.director.email)),
            p if p == LIAISON_NAME => Some(FieldRef::Text(&self.liaison.name)),
            p if p == LIAISON_PHONE => Some(FieldRef::Text(&self.liaison.phone)),
            p if p == LIAISON_EMAIL => Some(FieldRef::Text(&self.liaison.email)),
            p if p == PARTNERSHIP_TYPE => Some(FieldRef::Text(&self.partnership_type)),
            p if p == DURATION => Some(FieldRef::Text(&self.duration)),
            p if p == EXPECTATIONS => Some(FieldRef::Text(&self.expectations)),
            p if p == OUR_OFFER => Some(FieldRef::Text(&self.our_offer)),
            p if p == CONFIRMATION => Some(FieldRef::Flag(self.confirmation)),
            _ => None,
        }
    }

    /// Text value of a field, `None` for flags and unknown paths
    pub fn text(&self, path: FieldPath) -> Option<&str> {
        match self.value(path) {
            Some(FieldRef::Text(s)) => Some(s),
            _ => None,
        }
    }

    /// Boolean value of a field, `None` for text fields and unknown paths
    pub fn flag(&self, path: FieldPath) -> Option<bool> {
        match self.value(path) {
            Some(FieldRef::Flag(b)) => Some(b),
            _ => None,
        }
    }

    fn text_mut(&mut self, path: FieldPath) -> Option<&mut String> {
        match path {
            p if p == ORGANIZATION_NAME => Some(&mut self.organization_name),
            p if p == ORGANIZATION_LOCATION => Some(&mut self.organization_location),
            p if p == INDUSTRY => Some(&mut self.industry),
            p if p == SOCIAL_MEDIA => Some(&mut self.social_media),
            // The license image box edits the path input; the artifact itself
            // is only written by the preprocessor.
            p if p == LICENSE_IMAGE => Some(&mut self.license_path_input),
            p if p == DIRECTOR_NAME => Some(&mut self.director.name),
            p if p == DIRECTOR_PHONE => Some(&mut self.director.phone),
            p if p == DIRECTOR_EMAIL => Some(&mut self.director.email),
            p if p == LIAISON_NAME => Some(&mut self.liaison.name),
            p if p == LIAISON_PHONE => Some(&mut self.liaison.phone),
            p if p == LIAISON_EMAIL => Some(&mut self.liaison.email),
            p if p == PARTNERSHIP_TYPE => Some(&mut self.partnership_type),
            p if p == DURATION => Some(&mut self.duration),
            p if p == EXPECTATIONS => Some(&mut self.expectations),
            p if p == OUR_OFFER => Some(&mut self.our_offer),
            _ => None,
        }
    }

    /// Append a character to a text field; clears that field's error
    pub fn push_char(&mut self, path: FieldPath, c: char) {
        if let Some(s) = self.text_mut(path) {
            s.push(c);
            self.errors.remove(&path);
        }
    }

    /// Remove the last character of a text field; clears that field's error
    pub fn backspace(&mut self, path: FieldPath) {
        if let Some(s) = self.text_mut(path) {
            s.pop();
            self.errors.remove(&path);
        }
    }

    /// Flip a boolean field; clears that field's error
    pub fn toggle_flag(&mut self, path: FieldPath) {
        match path {
            p if p == IS_LICENSED => self.is_licensed = !self.is_licensed,
            p if p == CONFIRMATION => self.confirmation = !self.confirmation,
            _ => return,
        }
        self.errors.remove(&path);
    }

    /// Store the preprocessed license image, replacing any prior artifact
    pub fn set_license_image(&mut self, data_uri: String) {
        self.license_image = data_uri;
        self.errors.remove(&LICENSE_IMAGE);
    }

    /// Report a file precondition failure on the attachment field only
    pub fn set_attachment_error(&mut self, message: String) {
        self.errors.insert(LICENSE_IMAGE, message);
    }

    /// Error message for a field, if it currently fails validation
    pub fn error(&self, path: FieldPath) -> Option<&str> {
        self.errors.get(&path).map(String::as_str)
    }

    /// Fields shown on a step, in focus order
    pub fn step_fields(step: u8) -> &'static [FieldPath] {
        match step {
            1 => &[
                ORGANIZATION_NAME,
                ORGANIZATION_LOCATION,
                INDUSTRY,
                SOCIAL_MEDIA,
                IS_LICENSED,
                LICENSE_IMAGE,
            ],
            2 => &[
                DIRECTOR_NAME,
                DIRECTOR_PHONE,
                DIRECTOR_EMAIL,
                LIAISON_NAME,
                LIAISON_PHONE,
                LIAISON_EMAIL,
            ],
            _ => &[
                PARTNERSHIP_TYPE,
                DURATION,
                EXPECTATIONS,
                OUR_OFFER,
                CONFIRMATION,
            ],
        }
    }

    /// Address of the currently focused field
    pub fn focused_field(&self) -> FieldPath {
        let fields = Self::step_fields(self.step);
        fields[self.active_field.min(fields.len() - 1)]
    }

    pub fn next_field(&mut self) {
        let count = Self::step_fields(self.step).len();
        self.active_field = (self.active_field + 1) % count;
    }

    pub fn prev_field(&mut self) {
        let count = Self::step_fields(self.step).len();
        if self.active_field == 0 {
            self.active_field = count - 1;
        } else {
            self.active_field -= 1;
        }
    }

    /// Validate the current step and, if clean, move forward one page.
    ///
    /// Publishes the step's ErrorMap either way. Past the last step the
    /// counter stays put. Returns whether the step validated.
    pub fn advance(&mut self) -> bool {
        let errors = validate_step(self, self.step);
        let ok = errors.is_empty();
        self.errors = errors;
        if ok && self.step < TOTAL_STEPS {
            self.step += 1;
            self.active_field = 0;
        }
        ok
    }

    /// Move back one page. Never validates; floor is step 1.
    pub fn retreat(&mut self) {
        if self.step > 1 {
            self.step -= 1;
            self.active_field = 0;
        }
    }

    /// First step (1..=TOTAL_STEPS) that fails validation, with its errors
    pub fn first_invalid_step(&self) -> Option<(u8, ErrorMap)> {
        (1..=TOTAL_STEPS).find_map(|step| {
            let errors = validate_step(self, step);
            if errors.is_empty() {
                None
            } else {
                Some((step, errors))
            }
        })
    }

    /// Back to the initial empty shape, step 1
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A form that validates cleanly on every step (test fixture)
#[cfg(test)]
pub(crate) fn filled_form() -> PartnerForm {
    let mut form = PartnerForm::new();
    form.organization_name = "Manar Foundation".into();
    form.organization_location = "Amman".into();
    form.industry = "Education".into();
    form.director = ContactFields {
        name: "Dana".into(),
        phone: "0791234567".into(),
        email: "dana@example.org".into(),
    };
    form.liaison = ContactFields {
        name: "Sami".into(),
        phone: "0787654321".into(),
        email: "sami@example.org".into(),
    };
    form.partnership_type = "Training".into();
    form.duration = "6 months".into();
    form.confirmation = true;
    form
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_starts_at_step_one_and_empty() {
        let form = PartnerForm::new();
        assert_eq!(form.step, 1);
        assert!(form.errors.is_empty());
        assert_eq!(form.organization_name, "");
        assert!(!form.is_licensed);
    }

    #[test]
    fn test_advance_blocked_on_empty_step_one() {
        let mut form = PartnerForm::new();
        assert!(!form.advance());
        assert_eq!(form.step, 1);
        assert!(form.errors.contains_key(&ORGANIZATION_NAME));
        assert!(form.errors.contains_key(&ORGANIZATION_LOCATION));
        assert!(form.errors.contains_key(&INDUSTRY));
    }

    #[test]
    fn test_advance_moves_forward_when_step_valid() {
        let mut form = filled_form();
        assert!(form.advance());
        assert_eq!(form.step, 2);
        assert!(form.errors.is_empty());
        assert_eq!(form.active_field, 0);
    }

    #[test]
    fn test_advance_idempotent_under_repeated_valid_state() {
        // Prior error state must not affect a now-valid advance
        let mut form = filled_form();
        form.errors.insert(ORGANIZATION_NAME, "stale".into());
        assert!(form.advance());
        assert_eq!(form.step, 2);

        let mut again = filled_form();
        assert!(again.advance());
        assert_eq!(again.step, 2);
    }

    #[test]
    fn test_advance_noop_past_last_step() {
        let mut form = filled_form();
        form.step = TOTAL_STEPS;
        assert!(form.advance());
        assert_eq!(form.step, TOTAL_STEPS);
    }

    #[test]
    fn test_retreat_floors_at_one_and_skips_validation() {
        let mut form = PartnerForm::new();
        form.step = 2;
        form.retreat();
        assert_eq!(form.step, 1);
        form.retreat();
        assert_eq!(form.step, 1);
        // Backward navigation never repopulates errors
        assert!(form.errors.is_empty());
    }

    #[test]
    fn test_editing_clears_only_that_fields_error() {
        let mut form = PartnerForm::new();
        form.advance();
        assert!(form.errors.contains_key(&ORGANIZATION_NAME));
        assert!(form.errors.contains_key(&INDUSTRY));

        form.push_char(ORGANIZATION_NAME, 'M');
        assert!(!form.errors.contains_key(&ORGANIZATION_NAME));
        assert!(form.errors.contains_key(&INDUSTRY));
    }

    #[test]
    fn test_toggle_flag_clears_confirmation_error() {
        let mut form = filled_form();
        form.confirmation = false;
        form.step = 3;
        assert!(!form.advance());
        assert!(form.errors.contains_key(&CONFIRMATION));

        form.toggle_flag(CONFIRMATION);
        assert!(form.confirmation);
        assert!(!form.errors.contains_key(&CONFIRMATION));
    }

    #[test]
    fn test_set_license_image_replaces_artifact_and_clears_error() {
        let mut form = PartnerForm::new();
        form.set_attachment_error("too big".into());
        form.set_license_image("data:image/jpeg;base64,AAAA".into());
        assert_eq!(form.license_image, "data:image/jpeg;base64,AAAA");
        assert!(form.error(LICENSE_IMAGE).is_none());

        form.set_license_image("data:image/jpeg;base64,BBBB".into());
        assert_eq!(form.license_image, "data:image/jpeg;base64,BBBB");
    }

    #[test]
    fn test_first_invalid_step_finds_earliest_failure() {
        let mut form = filled_form();
        form.director.phone.clear();
        let (step, errors) = form.first_invalid_step().expect("step 2 must fail");
        assert_eq!(step, 2);
        assert!(errors.contains_key(&DIRECTOR_PHONE));
    }

    #[test]
    fn test_first_invalid_step_none_when_fully_valid() {
        assert!(filled_form().first_invalid_step().is_none());
    }

    #[test]
    fn test_reset_restores_initial_shape() {
        let mut form = filled_form();
        form.step = 3;
        form.license_image = "data:image/jpeg;base64,AAAA".into();
        form.reset();
        assert_eq!(form, PartnerForm::default());
        assert_eq!(form.step, 1);
    }

    #[test]
    fn test_field_focus_wraps_within_step() {
        let mut form = PartnerForm::new();
        let count = PartnerForm::step_fields(1).len();
        for _ in 0..count {
            form.next_field();
        }
        assert_eq!(form.active_field, 0);
        form.prev_field();
        assert_eq!(form.active_field, count - 1);
    }

    #[test]
    fn test_value_lookup_by_path() {
        let form = filled_form();
        assert_eq!(form.text(DIRECTOR_PHONE), Some("0791234567"));
        assert_eq!(form.flag(CONFIRMATION), Some(true));
        assert_eq!(form.text(CONFIRMATION), None);
        assert_eq!(form.flag(DIRECTOR_PHONE), None);
    }
}
