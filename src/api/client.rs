//! REST client for the foundation's backend
//!
//! One client serves both the public screens and the admin back-office;
//! the base URL comes from a single resolution chain (env var, then config
//! file, then the compiled default).

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::error::ApiError;
use super::payload::{
    BookingPayload, BookingQuery, NewsBundle, PartnershipPayload, ProgramPayload,
    RegistrationPayload, StoryPayload,
};
use super::traits::PortalApi;
use crate::state::{AuthSession, Booking, Program, Resource, SuccessStory};

/// Fallback backend address for local development
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:4000";

/// Environment variable that overrides any configured base URL
pub const BASE_URL_ENV: &str = "MANAR_BACKEND_URL";

/// Pick the backend base URL: env var beats config file beats default
pub fn resolve_base_url(env_value: Option<String>, configured: Option<String>) -> String {
    env_value
        .filter(|v| !v.trim().is_empty())
        .or(configured)
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

/// reqwest-backed implementation of [`PortalApi`]
pub struct HttpPortalApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpPortalApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Build a client from the environment and the config file's URL
    pub fn from_env(configured: Option<String>) -> Self {
        Self::new(resolve_base_url(std::env::var(BASE_URL_ENV).ok(), configured))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    fn bearer(builder: RequestBuilder, auth: &AuthSession) -> RequestBuilder {
        builder.bearer_auth(&auth.token)
    }

    /// Turn a non-success response into an [`ApiError::Rejected`], probing
    /// the body for a `message` field.
    async fn rejection(resp: Response) -> ApiError {
        let status = resp.status().as_u16();
        let message = resp
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| {
                body.get("message")
                    .and_then(|m| m.as_str())
                    .map(String::from)
            });
        ApiError::Rejected { status, message }
    }

    async fn expect_success(resp: Response) -> Result<Response, ApiError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            Err(Self::rejection(resp).await)
        }
    }

    async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        resp.json::<T>()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        auth: Option<&AuthSession>,
    ) -> Result<T, ApiError> {
        let mut builder = self.client.get(self.url(path));
        if let Some(auth) = auth {
            builder = Self::bearer(builder, auth);
        }
        let resp = Self::expect_success(builder.send().await?).await?;
        Self::decode(resp).await
    }
}

/// `GET /api/resources` wraps its list in a `data` envelope
#[derive(Debug, Deserialize)]
struct ResourceEnvelope {
    #[serde(default)]
    data: Vec<Resource>,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(rename = "imageUrl")]
    image_url: String,
}

#[derive(Debug, Deserialize)]
struct LoginUser {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    #[serde(default)]
    user: Option<LoginUser>,
}

#[async_trait]
impl PortalApi for HttpPortalApi {
    async fn check_connection(&self) -> bool {
        // Any HTTP answer counts as reachable, even an error status
        self.client.get(self.url("/")).send().await.is_ok()
    }

    async fn submit_partnership(&self, payload: &PartnershipPayload) -> Result<(), ApiError> {
        let resp = self
            .client
            .post(self.url("/api/partner/submit"))
            .json(payload)
            .send()
            .await?;
        // The backend signals acceptance with 201 specifically
        if resp.status() == StatusCode::CREATED {
            Ok(())
        } else {
            Err(Self::rejection(resp).await)
        }
    }

    async fn list_resources(&self) -> Result<Vec<Resource>, ApiError> {
        let envelope: ResourceEnvelope = self.get_json("/api/resources", None).await?;
        Ok(envelope.data)
    }

    async fn fetch_resource_file(&self, resource_id: &str) -> Result<Vec<u8>, ApiError> {
        let resp = self
            .client
            .get(self.url(&format!("/api/resources/{resource_id}/download")))
            .send()
            .await?;
        let resp = Self::expect_success(resp).await?;
        let bytes = resp.bytes().await?;
        Ok(bytes.to_vec())
    }

    async fn list_programs<'a>(
        &'a self,
        category: Option<&'a str>,
        search: Option<&'a str>,
    ) -> Result<Vec<Program>, ApiError> {
        let mut params: Vec<(&str, &str)> = Vec::new();
        if let Some(category) = category.filter(|c| !c.is_empty()) {
            params.push(("category", category));
        }
        if let Some(search) = search.filter(|s| !s.is_empty()) {
            params.push(("search", search));
        }
        let resp = self
            .client
            .get(self.url("/api/programs"))
            .query(&params)
            .send()
            .await?;
        Self::decode(Self::expect_success(resp).await?).await
    }

    async fn register_for_program(&self, payload: &RegistrationPayload) -> Result<(), ApiError> {
        let resp = self
            .client
            .post(self.url("/api/register"))
            .json(payload)
            .send()
            .await?;
        Self::expect_success(resp).await.map(|_| ())
    }

    async fn list_news(&self) -> Result<NewsBundle, ApiError> {
        // The news service predates the /api prefix
        let articles = self.get_json("/news/articles", None).await?;
        let events = self.get_json("/news/events", None).await?;
        let media = self.get_json("/news/media", None).await?;
        Ok(NewsBundle {
            articles,
            events,
            media,
        })
    }

    async fn list_stories(&self) -> Result<Vec<SuccessStory>, ApiError> {
        self.get_json("/api/success", None).await
    }

    async fn upload_image(&self, bytes: Vec<u8>, file_name: &str) -> Result<String, ApiError> {
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new().part("image", part);
        let resp = self
            .client
            .post(self.url("/api/upload"))
            .multipart(form)
            .send()
            .await?;
        let upload: UploadResponse = Self::decode(Self::expect_success(resp).await?).await?;
        Ok(upload.image_url)
    }

    async fn create_story(&self, payload: &StoryPayload) -> Result<(), ApiError> {
        let resp = self
            .client
            .post(self.url("/api/success"))
            .json(payload)
            .send()
            .await?;
        Self::expect_success(resp).await.map(|_| ())
    }

    async fn create_booking(&self, payload: &BookingPayload) -> Result<(), ApiError> {
        let resp = self
            .client
            .post(self.url("/api/bookings"))
            .json(payload)
            .send()
            .await?;
        Self::expect_success(resp).await.map(|_| ())
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ApiError> {
        let resp = self
            .client
            .post(self.url("/api/auth/login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;
        let login: LoginResponse = Self::decode(Self::expect_success(resp).await?).await?;
        Ok(AuthSession {
            token: login.token,
            display_name: login.user.and_then(|u| u.name),
        })
    }

    async fn admin_list_programs(&self, auth: &AuthSession) -> Result<Vec<Program>, ApiError> {
        let resp = Self::bearer(
            self.client
                .get(self.url("/api/programs"))
                .query(&[("includeDeleted", "true")]),
            auth,
        )
        .send()
        .await?;
        Self::decode(Self::expect_success(resp).await?).await
    }

    async fn program_categories(&self, auth: &AuthSession) -> Result<Vec<String>, ApiError> {
        self.get_json("/api/programs/categories", Some(auth)).await
    }

    async fn create_program(
        &self,
        auth: &AuthSession,
        payload: &ProgramPayload,
    ) -> Result<(), ApiError> {
        let resp = Self::bearer(self.client.post(self.url("/api/programs")), auth)
            .json(payload)
            .send()
            .await?;
        Self::expect_success(resp).await.map(|_| ())
    }

    async fn update_program(
        &self,
        auth: &AuthSession,
        id: &str,
        payload: &ProgramPayload,
    ) -> Result<(), ApiError> {
        let resp = Self::bearer(
            self.client.put(self.url(&format!("/api/programs/{id}"))),
            auth,
        )
        .json(payload)
        .send()
        .await?;
        Self::expect_success(resp).await.map(|_| ())
    }

    async fn soft_delete_program(&self, auth: &AuthSession, id: &str) -> Result<(), ApiError> {
        let resp = Self::bearer(
            self.client
                .patch(self.url(&format!("/api/programs/{id}/soft-delete"))),
            auth,
        )
        .json(&serde_json::json!({}))
        .send()
        .await?;
        Self::expect_success(resp).await.map(|_| ())
    }

    async fn restore_program(&self, auth: &AuthSession, id: &str) -> Result<(), ApiError> {
        let resp = Self::bearer(
            self.client
                .patch(self.url(&format!("/api/programs/{id}/restore"))),
            auth,
        )
        .json(&serde_json::json!({}))
        .send()
        .await?;
        Self::expect_success(resp).await.map(|_| ())
    }

    async fn delete_program(&self, auth: &AuthSession, id: &str) -> Result<(), ApiError> {
        let resp = Self::bearer(
            self.client
                .delete(self.url(&format!("/api/programs/{id}"))),
            auth,
        )
        .send()
        .await?;
        Self::expect_success(resp).await.map(|_| ())
    }

    async fn admin_list_bookings(
        &self,
        auth: &AuthSession,
        query: &BookingQuery,
    ) -> Result<Vec<Booking>, ApiError> {
        let resp = Self::bearer(
            self.client
                .get(self.url("/api/bookings"))
                .query(&query.as_params()),
            auth,
        )
        .send()
        .await?;
        Self::decode(Self::expect_success(resp).await?).await
    }

    async fn list_halls(&self, auth: &AuthSession) -> Result<Vec<String>, ApiError> {
        self.get_json("/api/bookings/unique-halls", Some(auth)).await
    }

    async fn delete_booking(&self, auth: &AuthSession, id: &str) -> Result<(), ApiError> {
        let resp = Self::bearer(
            self.client
                .delete(self.url(&format!("/api/bookings/{id}"))),
            auth,
        )
        .send()
        .await?;
        Self::expect_success(resp).await.map(|_| ())
    }

    async fn admin_list_stories(&self, auth: &AuthSession) -> Result<Vec<SuccessStory>, ApiError> {
        let resp = Self::bearer(
            self.client
                .get(self.url("/api/success"))
                .query(&[("includeDeleted", "true")]),
            auth,
        )
        .send()
        .await?;
        Self::decode(Self::expect_success(resp).await?).await
    }

    async fn update_story(
        &self,
        auth: &AuthSession,
        id: &str,
        payload: &StoryPayload,
    ) -> Result<(), ApiError> {
        let resp = Self::bearer(
            self.client.put(self.url(&format!("/api/success/{id}"))),
            auth,
        )
        .json(payload)
        .send()
        .await?;
        Self::expect_success(resp).await.map(|_| ())
    }

    async fn soft_delete_story(&self, auth: &AuthSession, id: &str) -> Result<(), ApiError> {
        let resp = Self::bearer(
            self.client
                .patch(self.url(&format!("/api/success/{id}/soft-delete"))),
            auth,
        )
        .json(&serde_json::json!({}))
        .send()
        .await?;
        Self::expect_success(resp).await.map(|_| ())
    }

    async fn restore_story(&self, auth: &AuthSession, id: &str) -> Result<(), ApiError> {
        let resp = Self::bearer(
            self.client
                .patch(self.url(&format!("/api/success/{id}/restore"))),
            auth,
        )
        .json(&serde_json::json!({}))
        .send()
        .await?;
        Self::expect_success(resp).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let api = HttpPortalApi::new("http://localhost:4000/");
        assert_eq!(
            api.url("/api/partner/submit"),
            "http://localhost:4000/api/partner/submit"
        );

        let api = HttpPortalApi::new("http://localhost:4000");
        assert_eq!(api.url("/api/resources"), "http://localhost:4000/api/resources");
    }

    #[test]
    fn test_base_url_resolution_order() {
        // Env var wins
        assert_eq!(
            resolve_base_url(Some("http://env:1".into()), Some("http://cfg:2".into())),
            "http://env:1"
        );
        // Blank env var is ignored
        assert_eq!(
            resolve_base_url(Some("  ".into()), Some("http://cfg:2".into())),
            "http://cfg:2"
        );
        // Config file next
        assert_eq!(
            resolve_base_url(None, Some("http://cfg:2".into())),
            "http://cfg:2"
        );
        // Compiled default last
        assert_eq!(resolve_base_url(None, None), DEFAULT_BASE_URL);
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_not_connected() {
        // Port 1 on loopback refuses immediately
        let api = HttpPortalApi::new("http://127.0.0.1:1");
        assert!(!api.check_connection().await);
    }

    #[test]
    fn test_resource_envelope_tolerates_missing_data() {
        let envelope: ResourceEnvelope = serde_json::from_str("{}").unwrap();
        assert!(envelope.data.is_empty());
    }

    #[test]
    fn test_login_response_without_user_object() {
        let login: LoginResponse = serde_json::from_str(r#"{"token": "t"}"#).unwrap();
        assert_eq!(login.token, "t");
        assert!(login.user.is_none());
    }
}
