//! Partnership submission dispatcher
//!
//! Re-validates every step, serializes the trimmed form, and issues at most
//! one network call. The form survives a failed submission untouched so the
//! user can retry without re-entering anything.

use crate::api::{PartnershipPayload, PortalApi};

use super::partner::PartnerForm;

/// Shown when the backend gives no structured message
pub const SUBMIT_FALLBACK_MESSAGE: &str = "Something went wrong while submitting the request";

/// Shown after a 201 from the backend
pub const SUBMIT_SUCCESS_MESSAGE: &str =
    "Partnership request registered successfully! We will be in touch soon.";

/// Result of a submission attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Backend accepted; the form has been reset to its initial shape
    Accepted,
    /// Backend rejected or was unreachable; the form is unchanged
    Rejected { message: String },
    /// Local validation failed first; the form jumped to the failing step
    Blocked { step: u8 },
}

/// Validate all steps in order and, only if every one passes, submit the
/// trimmed form. The first failing step becomes the current step and no
/// network call is made.
pub async fn submit_partnership(form: &mut PartnerForm, api: &dyn PortalApi) -> SubmitOutcome {
    if let Some((step, errors)) = form.first_invalid_step() {
        form.step = step;
        form.errors = errors;
        return SubmitOutcome::Blocked { step };
    }

    let payload = PartnershipPayload::from_form(form);
    match api.submit_partnership(&payload).await {
        Ok(()) => {
            form.reset();
            SubmitOutcome::Accepted
        }
        Err(err) => {
            tracing::warn!("partnership submission failed: {err}");
            SubmitOutcome::Rejected {
                message: err.user_message(SUBMIT_FALLBACK_MESSAGE),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, MockPortalApi};
    use crate::state::forms::partner::{filled_form, DIRECTOR_PHONE};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_valid_form_makes_exactly_one_call_and_resets() {
        let mut api = MockPortalApi::new();
        api.expect_submit_partnership()
            .times(1)
            .returning(|_| Ok(()));

        let mut form = filled_form();
        let outcome = submit_partnership(&mut form, &api).await;

        assert_eq!(outcome, SubmitOutcome::Accepted);
        assert_eq!(form, PartnerForm::default());
        assert_eq!(form.step, 1);
    }

    #[tokio::test]
    async fn test_invalid_step_two_makes_zero_calls() {
        let mut api = MockPortalApi::new();
        api.expect_submit_partnership().times(0);

        let mut form = filled_form();
        form.step = 3;
        form.director.phone = "123".into();

        let outcome = submit_partnership(&mut form, &api).await;

        assert_eq!(outcome, SubmitOutcome::Blocked { step: 2 });
        assert_eq!(form.step, 2);
        assert!(form.errors.contains_key(&DIRECTOR_PHONE));
    }

    #[tokio::test]
    async fn test_server_message_is_surfaced_and_form_kept() {
        let mut api = MockPortalApi::new();
        api.expect_submit_partnership().times(1).returning(|_| {
            Err(ApiError::Rejected {
                status: 409,
                message: Some("An application for this organization already exists".into()),
            })
        });

        let mut form = filled_form();
        let before = form.clone();
        let outcome = submit_partnership(&mut form, &api).await;

        assert_eq!(
            outcome,
            SubmitOutcome::Rejected {
                message: "An application for this organization already exists".into()
            }
        );
        // Retry must not lose any entered data
        assert_eq!(form, before);
    }

    #[tokio::test]
    async fn test_missing_server_message_falls_back() {
        let mut api = MockPortalApi::new();
        api.expect_submit_partnership()
            .times(1)
            .returning(|_| Err(ApiError::Transport("connection refused".into())));

        let mut form = filled_form();
        let outcome = submit_partnership(&mut form, &api).await;

        assert_eq!(
            outcome,
            SubmitOutcome::Rejected {
                message: SUBMIT_FALLBACK_MESSAGE.into()
            }
        );
    }

    #[tokio::test]
    async fn test_payload_reaches_api_trimmed() {
        let mut api = MockPortalApi::new();
        api.expect_submit_partnership()
            .times(1)
            .withf(|payload| {
                payload.organization_name == "Manar Foundation"
                    && payload.director.phone == "0791234567"
            })
            .returning(|_| Ok(()));

        let mut form = filled_form();
        form.organization_name = "  Manar Foundation  ".into();
        form.director.phone = " 0791234567 ".into();

        let outcome = submit_partnership(&mut form, &api).await;
        assert_eq!(outcome, SubmitOutcome::Accepted);
    }
}
