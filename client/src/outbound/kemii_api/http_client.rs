//! Reqwest-backed Kemii API client.
//!
//! This adapter owns transport details only: URL building, bearer token
//! attachment, timeout and HTTP error mapping, and JSON decoding into
//! roster types.

use std::time::Duration;

use kemii_departments::{RosterMember, UserSkill};
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, StatusCode};
use tracing::debug;
use url::Url;

use super::dto::{SaveSkillsRequestDto, parse_user_skills, parse_users};
use crate::error::ApiError;
use crate::session::SessionStore;

/// HTTP client for the Kemii backend.
///
/// Every request carries `Authorization: Bearer <token>` while the shared
/// [`SessionStore`] holds a session. A `401` response clears the session.
#[derive(Debug, Clone)]
pub struct KemiiApiClient {
    client: Client,
    base_url: Url,
    session: SessionStore,
}

impl KemiiApiClient {
    /// Build a client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when the reqwest client cannot be
    /// constructed.
    pub fn new(base_url: Url, timeout: Duration, session: SessionStore) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| ApiError::transport(format!("failed to build client: {error}")))?;
        Ok(Self {
            client,
            base_url,
            session,
        })
    }

    /// The session whose token this client sends.
    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Fetch the user roster from `GET /users`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-success status, or an
    /// undecodable body.
    pub async fn fetch_users(&self) -> Result<Vec<RosterMember>, ApiError> {
        let url = self.endpoint(&["users"])?;
        let body = self.execute(self.client.get(url)).await?;
        parse_users(&body)
    }

    /// Fetch one user's skills from `GET /users/{id}/skills`.
    ///
    /// The body may be a list or a JSON-encoded list, bare or under a
    /// `skills` key.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-success status, or an
    /// undecodable body.
    pub async fn fetch_user_skills(&self, user_id: &str) -> Result<Vec<UserSkill>, ApiError> {
        let url = self.endpoint(&["users", require_user_id(user_id)?, "skills"])?;
        let body = self.execute(self.client.get(url)).await?;
        parse_user_skills(&body)
    }

    /// Replace one user's whole skill list with `PUT /users/{id}/skills`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or non-success status.
    pub async fn save_user_skills(
        &self,
        user_id: &str,
        skills: &[UserSkill],
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&["users", require_user_id(user_id)?, "skills"])?;
        let request = self
            .client
            .put(url)
            .json(&SaveSkillsRequestDto { skills });
        self.execute(request).await.map(drop)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::invalid_request("api base url cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorise(&self, request: RequestBuilder) -> RequestBuilder {
        let with_accept = request.header(ACCEPT, "application/json");
        let Some(token) = self.session.bearer_token() else {
            return with_accept;
        };
        with_accept.bearer_auth(token.as_str())
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let response = self
            .authorise(request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(self.reject(status, body.as_ref()));
        }
        Ok(body.to_vec())
    }

    fn reject(&self, status: StatusCode, body: &[u8]) -> ApiError {
        let error = map_status_error(status, body);
        debug!(status = status.as_u16(), %error, "kemii api request failed");
        if status == StatusCode::UNAUTHORIZED && self.session.clear() {
            debug!("session cleared after credentials were rejected");
        }
        error
    }
}

fn require_user_id(user_id: &str) -> Result<&str, ApiError> {
    let trimmed = user_id.trim();
    if trimmed.is_empty() {
        return Err(ApiError::invalid_request("user id must not be empty"));
    }
    Ok(trimmed)
}

fn map_transport_error(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::timeout(error.to_string())
    } else {
        ApiError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ApiError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {preview}", status.as_u16())
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::unauthorized(message),
        StatusCode::NOT_FOUND => ApiError::not_found(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => ApiError::timeout(message),
        _ if status.is_client_error() => ApiError::invalid_request(message),
        _ => ApiError::transport(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
