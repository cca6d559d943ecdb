//! Trait abstraction for the portal API to enable mocking in tests

use async_trait::async_trait;

use super::error::ApiError;
use super::payload::{
    BookingPayload, BookingQuery, NewsBundle, PartnershipPayload, ProgramPayload,
    RegistrationPayload, StoryPayload,
};
use crate::state::{AuthSession, Booking, Program, Resource, SuccessStory};

/// Operations against the foundation's REST backend.
///
/// Admin calls take the bearer session as an explicit argument; there is no
/// ambient token storage anywhere in the client.
#[allow(dead_code)]
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PortalApi: Send + Sync {
    /// Check if the backend is reachable
    async fn check_connection(&self) -> bool;

    /// Submit a partnership request; Ok only on 201 Created
    async fn submit_partnership(&self, payload: &PartnershipPayload) -> Result<(), ApiError>;

    /// List all published library resources
    async fn list_resources(&self) -> Result<Vec<Resource>, ApiError>;

    /// Download the file behind a resource
    async fn fetch_resource_file(&self, resource_id: &str) -> Result<Vec<u8>, ApiError>;

    /// List training programs, optionally narrowed by category and search
    async fn list_programs<'a>(
        &'a self,
        category: Option<&'a str>,
        search: Option<&'a str>,
    ) -> Result<Vec<Program>, ApiError>;

    /// Register a participant for a training program
    async fn register_for_program(&self, payload: &RegistrationPayload) -> Result<(), ApiError>;

    /// Fetch articles, events, and media in one go
    async fn list_news(&self) -> Result<NewsBundle, ApiError>;

    /// List published success stories
    async fn list_stories(&self) -> Result<Vec<SuccessStory>, ApiError>;

    /// Upload an image; returns the URL the backend stored it under
    async fn upload_image(&self, bytes: Vec<u8>, file_name: &str) -> Result<String, ApiError>;

    /// Submit a new success story
    async fn create_story(&self, payload: &StoryPayload) -> Result<(), ApiError>;

    /// Submit a hall booking
    async fn create_booking(&self, payload: &BookingPayload) -> Result<(), ApiError>;

    /// Exchange credentials for a bearer session
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ApiError>;

    // ── Admin ───────────────────────────────────────────────────────

    /// List programs including soft-deleted ones
    async fn admin_list_programs(&self, auth: &AuthSession) -> Result<Vec<Program>, ApiError>;

    /// Distinct program categories
    async fn program_categories(&self, auth: &AuthSession) -> Result<Vec<String>, ApiError>;

    /// Create a program
    async fn create_program(
        &self,
        auth: &AuthSession,
        payload: &ProgramPayload,
    ) -> Result<(), ApiError>;

    /// Update an existing program
    async fn update_program(
        &self,
        auth: &AuthSession,
        id: &str,
        payload: &ProgramPayload,
    ) -> Result<(), ApiError>;

    /// Mark a program deleted without removing it
    async fn soft_delete_program(&self, auth: &AuthSession, id: &str) -> Result<(), ApiError>;

    /// Bring a soft-deleted program back
    async fn restore_program(&self, auth: &AuthSession, id: &str) -> Result<(), ApiError>;

    /// Permanently remove a program
    async fn delete_program(&self, auth: &AuthSession, id: &str) -> Result<(), ApiError>;

    /// List bookings, filtered server-side
    async fn admin_list_bookings(
        &self,
        auth: &AuthSession,
        query: &BookingQuery,
    ) -> Result<Vec<Booking>, ApiError>;

    /// Distinct hall identifiers that have bookings
    async fn list_halls(&self, auth: &AuthSession) -> Result<Vec<String>, ApiError>;

    /// Remove a booking
    async fn delete_booking(&self, auth: &AuthSession, id: &str) -> Result<(), ApiError>;

    /// List stories including soft-deleted ones
    async fn admin_list_stories(&self, auth: &AuthSession) -> Result<Vec<SuccessStory>, ApiError>;

    /// Update an existing story
    async fn update_story(
        &self,
        auth: &AuthSession,
        id: &str,
        payload: &StoryPayload,
    ) -> Result<(), ApiError>;

    /// Mark a story deleted without removing it
    async fn soft_delete_story(&self, auth: &AuthSession, id: &str) -> Result<(), ApiError>;

    /// Bring a soft-deleted story back
    async fn restore_story(&self, auth: &AuthSession, id: &str) -> Result<(), ApiError>;
}
