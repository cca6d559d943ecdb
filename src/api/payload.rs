//! Request payloads, serialized with the backend's field names

use serde::{Deserialize, Serialize};

use crate::state::forms::partner::PartnerForm;
use crate::state::forms::{BookingForm, ProgramForm, RegistrationForm};

/// Contact sub-object of the partnership payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPayload {
    pub name: String,
    pub phone: String,
    pub email: String,
}

/// Body of `POST /api/partner/submit`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnershipPayload {
    pub organization_name: String,
    pub organization_location: String,
    pub is_licensed: bool,
    pub industry: String,
    pub director: ContactPayload,
    pub liaison: ContactPayload,
    pub partnership_type: String,
    pub duration: String,
    pub expectations: String,
    pub our_offer: String,
    pub social_media: String,
    /// Bounded JPEG data URI, or empty when no license was attached
    pub license_image: String,
    pub confirmation: bool,
}

impl PartnershipPayload {
    /// Serialize the accumulated form, trimming every leaf string
    pub fn from_form(form: &PartnerForm) -> Self {
        let trim = |s: &str| s.trim().to_string();
        Self {
            organization_name: trim(&form.organization_name),
            organization_location: trim(&form.organization_location),
            is_licensed: form.is_licensed,
            industry: trim(&form.industry),
            director: ContactPayload {
                name: trim(&form.director.name),
                phone: trim(&form.director.phone),
                email: trim(&form.director.email),
            },
            liaison: ContactPayload {
                name: trim(&form.liaison.name),
                phone: trim(&form.liaison.phone),
                email: trim(&form.liaison.email),
            },
            partnership_type: trim(&form.partnership_type),
            duration: trim(&form.duration),
            expectations: trim(&form.expectations),
            our_offer: trim(&form.our_offer),
            social_media: trim(&form.social_media),
            license_image: form.license_image.clone(),
            confirmation: form.confirmation,
        }
    }
}

/// Body of `POST /api/bookings`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPayload {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub notes: String,
    pub hall_id: String,
    pub date: String,
    pub time: String,
}

impl BookingPayload {
    pub fn from_form(form: &BookingForm) -> Self {
        Self {
            full_name: form.full_name.trimmed().to_string(),
            phone: form.phone.trimmed().to_string(),
            email: form.email.trimmed().to_string(),
            notes: form.notes.trimmed().to_string(),
            hall_id: form.hall_id.trimmed().to_string(),
            date: form.date.trimmed().to_string(),
            time: form.time.trimmed().to_string(),
        }
    }
}

/// Body of `POST /api/register`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationPayload {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub program_id: String,
}

impl RegistrationPayload {
    pub fn from_form(form: &RegistrationForm) -> Self {
        Self {
            name: form.name.trimmed().to_string(),
            email: form.email.trimmed().to_string(),
            phone: form.phone.trimmed().to_string(),
            program_id: form.program_id.clone(),
        }
    }
}

/// Body of `POST /api/success` and `PUT /api/success/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryPayload {
    pub name: String,
    pub image_url: String,
    pub short_story: String,
}

/// Body of `POST /api/programs` and `PUT /api/programs/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramPayload {
    pub name: String,
    pub description: String,
    pub category: String,
    pub start_date: String,
    pub end_date: String,
}

impl ProgramPayload {
    pub fn from_form(form: &ProgramForm) -> Self {
        Self {
            name: form.name.trimmed().to_string(),
            description: form.description.trimmed().to_string(),
            category: form.category.trimmed().to_string(),
            start_date: form.start_date.trimmed().to_string(),
            end_date: form.end_date.trimmed().to_string(),
        }
    }
}

/// Query filters for `GET /api/bookings`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingQuery {
    pub hall_id: Option<String>,
    pub date: Option<String>,
    pub search: Option<String>,
}

impl BookingQuery {
    /// Non-empty filters as query pairs, in a stable order
    pub fn as_params(&self) -> Vec<(&'static str, &str)> {
        let mut params = Vec::new();
        if let Some(hall_id) = self.hall_id.as_deref().filter(|v| !v.is_empty()) {
            params.push(("hallId", hall_id));
        }
        if let Some(date) = self.date.as_deref().filter(|v| !v.is_empty()) {
            params.push(("date", date));
        }
        if let Some(search) = self.search.as_deref().filter(|v| !v.is_empty()) {
            params.push(("search", search));
        }
        params
    }
}

/// Combined result of the three news endpoints
#[derive(Debug, Clone, Default)]
pub struct NewsBundle {
    pub articles: Vec<crate::state::NewsArticle>,
    pub events: Vec<crate::state::EventItem>,
    pub media: Vec<crate::state::MediaItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::partner::filled_form;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partnership_payload_trims_every_leaf_string() {
        let mut form = filled_form();
        form.organization_name = "  Manar Foundation  ".into();
        form.director.phone = " 0791234567 ".into();
        form.liaison.email = " sami@example.org ".into();
        form.expectations = "  shared goals  ".into();

        let payload = PartnershipPayload::from_form(&form);
        assert_eq!(payload.organization_name, "Manar Foundation");
        assert_eq!(payload.director.phone, "0791234567");
        assert_eq!(payload.liaison.email, "sami@example.org");
        assert_eq!(payload.expectations, "shared goals");
    }

    #[test]
    fn test_partnership_payload_uses_backend_field_names() {
        let form = filled_form();
        let value = serde_json::to_value(PartnershipPayload::from_form(&form)).unwrap();
        let object = value.as_object().unwrap();

        for key in [
            "organizationName",
            "organizationLocation",
            "isLicensed",
            "industry",
            "director",
            "liaison",
            "partnershipType",
            "duration",
            "expectations",
            "ourOffer",
            "socialMedia",
            "licenseImage",
            "confirmation",
        ] {
            assert!(object.contains_key(key), "missing {key}");
        }
        assert!(value["director"].get("phone").is_some());
        assert!(value["liaison"].get("email").is_some());
    }

    #[test]
    fn test_partnership_payload_nested_sections_always_present() {
        let payload = PartnershipPayload::from_form(&PartnerForm::default());
        assert_eq!(payload.director.name, "");
        assert_eq!(payload.liaison.name, "");
        assert_eq!(payload.license_image, "");
        let value = serde_json::to_value(&payload).unwrap();
        assert!(value["director"].is_object());
        assert!(value["liaison"].is_object());
    }

    #[test]
    fn test_booking_query_skips_empty_filters() {
        let query = BookingQuery {
            hall_id: Some("main".into()),
            date: Some(String::new()),
            search: None,
        };
        assert_eq!(query.as_params(), vec![("hallId", "main")]);

        let full = BookingQuery {
            hall_id: Some("main".into()),
            date: Some("2026-09-01".into()),
            search: Some("rana".into()),
        };
        assert_eq!(
            full.as_params(),
            vec![
                ("hallId", "main"),
                ("date", "2026-09-01"),
                ("search", "rana"),
            ]
        );
    }

    #[test]
    fn test_registration_payload_camel_case() {
        let payload = RegistrationPayload {
            name: "Omar".into(),
            email: "omar@x.io".into(),
            phone: "0780000000".into(),
            program_id: "p1".into(),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert!(value.get("programId").is_some());
    }
}
