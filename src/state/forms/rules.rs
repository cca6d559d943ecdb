//! Declarative validation rules for the partnership form
//!
//! Each rule names a field, the check to apply, and the step it belongs to,
//! so individual rules stay unit-testable without touching the form UI.

use std::collections::HashMap;

use super::partner::{
    PartnerForm, CONFIRMATION, DIRECTOR_EMAIL, DIRECTOR_NAME, DIRECTOR_PHONE, DURATION, INDUSTRY,
    IS_LICENSED, LIAISON_EMAIL, LIAISON_NAME, LIAISON_PHONE, LICENSE_IMAGE, ORGANIZATION_LOCATION,
    ORGANIZATION_NAME, PARTNERSHIP_TYPE,
};
use super::path::FieldPath;

/// Active validation failures, keyed by field address
pub type ErrorMap = HashMap<FieldPath, String>;

pub const PHONE_FORMAT_MESSAGE: &str = "Phone number must be exactly 10 digits";
pub const EMAIL_FORMAT_MESSAGE: &str = "Please enter a valid email address";

/// Check applied to a single field
#[derive(Debug, Clone, Copy)]
pub enum RuleKind {
    /// Trimmed value must be non-empty
    Required,
    /// Required, and the trimmed value must be exactly 10 ASCII digits
    Phone,
    /// Required, and the trimmed value must look like `local@domain.tld`
    Email,
    /// Required only while the named boolean field is set
    RequiredIf(FieldPath),
    /// Boolean field must be true
    Confirmed,
}

/// One entry of the per-step rule table
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub path: FieldPath,
    pub kind: RuleKind,
    pub step: u8,
    pub required_message: &'static str,
}

const PARTNER_RULES: [Rule; 13] = [
    Rule {
        path: ORGANIZATION_NAME,
        kind: RuleKind::Required,
        step: 1,
        required_message: "Organization name is required",
    },
    Rule {
        path: ORGANIZATION_LOCATION,
        kind: RuleKind::Required,
        step: 1,
        required_message: "Organization location is required",
    },
    Rule {
        path: INDUSTRY,
        kind: RuleKind::Required,
        step: 1,
        required_message: "Field of work is required",
    },
    Rule {
        path: LICENSE_IMAGE,
        kind: RuleKind::RequiredIf(IS_LICENSED),
        step: 1,
        required_message: "Please attach the license image",
    },
    Rule {
        path: DIRECTOR_NAME,
        kind: RuleKind::Required,
        step: 2,
        required_message: "Director name is required",
    },
    Rule {
        path: DIRECTOR_PHONE,
        kind: RuleKind::Phone,
        step: 2,
        required_message: "Director phone number is required",
    },
    Rule {
        path: DIRECTOR_EMAIL,
        kind: RuleKind::Email,
        step: 2,
        required_message: "Director email is required",
    },
    Rule {
        path: LIAISON_NAME,
        kind: RuleKind::Required,
        step: 2,
        required_message: "Liaison name is required",
    },
    Rule {
        path: LIAISON_PHONE,
        kind: RuleKind::Phone,
        step: 2,
        required_message: "Liaison phone number is required",
    },
    Rule {
        path: LIAISON_EMAIL,
        kind: RuleKind::Email,
        step: 2,
        required_message: "Liaison email is required",
    },
    Rule {
        path: PARTNERSHIP_TYPE,
        kind: RuleKind::Required,
        step: 3,
        required_message: "Partnership type is required",
    },
    Rule {
        path: DURATION,
        kind: RuleKind::Required,
        step: 3,
        required_message: "Partnership duration is required",
    },
    Rule {
        path: CONFIRMATION,
        kind: RuleKind::Confirmed,
        step: 3,
        required_message: "Please confirm the entered information",
    },
];

/// The full rule table, exposed for rule-level tests
pub fn partner_rules() -> &'static [Rule] {
    &PARTNER_RULES
}

/// Exactly 10 ASCII digits
pub fn is_valid_phone(value: &str) -> bool {
    value.len() == 10 && value.bytes().all(|b| b.is_ascii_digit())
}

/// Basic `local@domain.tld` shape; no whitespace, single `@`
pub fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty()
        && !tld.is_empty()
        && !value.contains(char::is_whitespace)
}

/// Validate one step of the form. Pure: returns only the failures for that
/// step, empty when the step is fully valid.
pub fn validate_step(form: &PartnerForm, step: u8) -> ErrorMap {
    let mut errors = ErrorMap::new();

    for rule in PARTNER_RULES.iter().filter(|r| r.step == step) {
        match rule.kind {
            RuleKind::Required => {
                if trimmed(form, rule.path).is_empty() {
                    errors.insert(rule.path, rule.required_message.to_string());
                }
            }
            RuleKind::Phone => {
                let value = trimmed(form, rule.path);
                if value.is_empty() {
                    errors.insert(rule.path, rule.required_message.to_string());
                } else if !is_valid_phone(value) {
                    errors.insert(rule.path, PHONE_FORMAT_MESSAGE.to_string());
                }
            }
            RuleKind::Email => {
                let value = trimmed(form, rule.path);
                if value.is_empty() {
                    errors.insert(rule.path, rule.required_message.to_string());
                } else if !is_valid_email(value) {
                    errors.insert(rule.path, EMAIL_FORMAT_MESSAGE.to_string());
                }
            }
            RuleKind::RequiredIf(flag) => {
                let wanted = form.flag(flag).unwrap_or(false);
                if wanted && trimmed(form, rule.path).is_empty() {
                    errors.insert(rule.path, rule.required_message.to_string());
                }
            }
            RuleKind::Confirmed => {
                if !form.flag(rule.path).unwrap_or(false) {
                    errors.insert(rule.path, rule.required_message.to_string());
                }
            }
        }
    }

    errors
}

fn trimmed(form: &PartnerForm, path: FieldPath) -> &str {
    form.text(path).unwrap_or("").trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::partner::filled_form;

    mod phone {
        use super::*;

        #[test]
        fn test_ten_digits_pass() {
            assert!(is_valid_phone("1234567890"));
        }

        #[test]
        fn test_short_long_and_mixed_fail() {
            assert!(!is_valid_phone("123"));
            assert!(!is_valid_phone("12345678901"));
            assert!(!is_valid_phone("12345abcde"));
        }

        #[test]
        fn test_whitespace_is_not_a_digit() {
            assert!(!is_valid_phone("123456789 "));
        }
    }

    mod email {
        use super::*;

        #[test]
        fn test_basic_shape_passes() {
            assert!(is_valid_email("a@b.com"));
            assert!(is_valid_email("first.last@mail.example.org"));
        }

        #[test]
        fn test_missing_at_or_tld_fails() {
            assert!(!is_valid_email("abc"));
            assert!(!is_valid_email("a@b"));
            assert!(!is_valid_email("@b.com"));
            assert!(!is_valid_email("a@.com"));
            assert!(!is_valid_email("a@b."));
        }

        #[test]
        fn test_whitespace_fails() {
            assert!(!is_valid_email("a @b.com"));
            assert!(!is_valid_email("a@b .com"));
        }
    }

    mod steps {
        use super::*;

        #[test]
        fn test_valid_form_has_no_errors_on_any_step() {
            let form = filled_form();
            for step in 1..=3 {
                assert!(validate_step(&form, step).is_empty(), "step {step}");
            }
        }

        #[test]
        fn test_whitespace_only_counts_as_empty() {
            let mut form = filled_form();
            form.organization_name = "   ".into();
            let errors = validate_step(&form, 1);
            assert_eq!(errors.len(), 1);
            assert!(errors.contains_key(&crate::state::forms::partner::ORGANIZATION_NAME));
        }

        #[test]
        fn test_one_bad_field_reports_only_that_field() {
            let mut form = filled_form();
            form.director.email = "not-an-email".into();
            let errors = validate_step(&form, 2);
            assert_eq!(errors.len(), 1);
            assert_eq!(
                errors.get(&crate::state::forms::partner::DIRECTOR_EMAIL).map(String::as_str),
                Some(EMAIL_FORMAT_MESSAGE)
            );
        }

        #[test]
        fn test_phone_present_but_malformed_gets_format_message() {
            let mut form = filled_form();
            form.liaison.phone = "12345".into();
            let errors = validate_step(&form, 2);
            assert_eq!(
                errors.get(&crate::state::forms::partner::LIAISON_PHONE).map(String::as_str),
                Some(PHONE_FORMAT_MESSAGE)
            );
        }

        #[test]
        fn test_phone_absent_gets_required_message() {
            let mut form = filled_form();
            form.liaison.phone.clear();
            let errors = validate_step(&form, 2);
            assert_eq!(
                errors.get(&crate::state::forms::partner::LIAISON_PHONE).map(String::as_str),
                Some("Liaison phone number is required")
            );
        }

        #[test]
        fn test_license_image_required_only_when_licensed() {
            let mut form = filled_form();
            form.is_licensed = false;
            assert!(validate_step(&form, 1).is_empty());

            form.is_licensed = true;
            let errors = validate_step(&form, 1);
            assert!(errors.contains_key(&crate::state::forms::partner::LICENSE_IMAGE));

            form.license_image = "data:image/jpeg;base64,AAAA".into();
            assert!(validate_step(&form, 1).is_empty());
        }

        #[test]
        fn test_confirmation_required_on_final_step() {
            let mut form = filled_form();
            form.confirmation = false;
            let errors = validate_step(&form, 3);
            assert!(errors.contains_key(&crate::state::forms::partner::CONFIRMATION));
        }

        #[test]
        fn test_steps_validate_independently() {
            // A hole in step 2 must not leak into step 1 or 3 results
            let mut form = filled_form();
            form.director.name.clear();
            assert!(validate_step(&form, 1).is_empty());
            assert!(!validate_step(&form, 2).is_empty());
            assert!(validate_step(&form, 3).is_empty());
        }

        #[test]
        fn test_rule_table_covers_all_three_steps() {
            for step in 1..=3u8 {
                assert!(partner_rules().iter().any(|r| r.step == step));
            }
        }
    }
}
