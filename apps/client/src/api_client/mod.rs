//! Typed client for the Wevolve backend.
//!
//! Every command goes through `ApiClient`; nothing else builds HTTP requests.
//! Each operation is exactly one request/response round-trip and every
//! failure comes back as [`ApiError`].
use std::time::Duration;

use bytes::Bytes;
use reqwest::{multipart, Client, Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::job::{Job, JobListing};
use crate::models::matching::{MatchBreakdown, MatchRequest, MatchWeights};
use crate::models::resume::{ParsedResume, SaveResumeResponse};
use crate::models::roadmap::{RoadmapRequest, RoadmapResponse, SkillTaxonomy};
use crate::models::user::{ChangePassword, Token, User, UserCreate, UserUpdate};

pub mod endpoints;

/// Normalized remote failure.
///
/// `message` prefers the server's `detail` field; `status` is `None` for
/// transport failures (connection refused, timeout, TLS) where no response
/// arrived; `payload` is the response body, parsed as JSON when possible.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    pub status: Option<u16>,
    pub payload: Option<Value>,
}

impl ApiError {
    pub fn transport(err: &reqwest::Error) -> Self {
        Self {
            message: format!("request failed: {err}"),
            status: err.status().map(|s| s.as_u16()),
            payload: None,
        }
    }

    /// Builds the error for a non-2xx response from its raw body.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let payload = parse_payload(body);
        let message = payload
            .as_ref()
            .and_then(extract_server_message)
            .or_else(|| {
                let trimmed = body.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .unwrap_or_else(|| format!("HTTP {status}"));

        Self {
            message,
            status: Some(status.as_u16()),
            payload,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::transport(&err)
    }
}

fn parse_payload(body: &str) -> Option<Value> {
    if body.trim().is_empty() {
        return None;
    }
    Some(serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string())))
}

/// Pulls a human-readable message out of a JSON error body.
///
/// Understands `{"detail": "..."}`, validation lists
/// (`{"detail": [{"msg": "..."}]}`), `{"message": "..."}` and
/// `{"error": {"message": "..."}}`.
fn extract_server_message(payload: &Value) -> Option<String> {
    match payload.get("detail") {
        Some(Value::String(detail)) => return Some(detail.clone()),
        Some(Value::Array(items)) => {
            if let Some(msg) = items
                .iter()
                .find_map(|item| item.get("msg").and_then(Value::as_str))
            {
                return Some(msg.to_string());
            }
        }
        _ => {}
    }
    payload
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| {
            payload
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str)
        })
        .map(str::to_string)
}

/// A validated local file ready for multipart upload as field `file`.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub mime: &'static str,
    pub content: Bytes,
}

/// Typed wrapper around one `reqwest::Client`.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    #[cfg(test)]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sets or clears the bearer token attached to every subsequent request.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    #[cfg(test)]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends the request and returns the raw body of a 2xx response.
    async fn execute(&self, method: &Method, path: &str, builder: RequestBuilder) -> Result<String, ApiError> {
        let response = builder.send().await.map_err(|e| {
            warn!("{method} {path} failed before a response: {e}");
            ApiError::transport(&e)
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            warn!("{method} {path} returned {} but the body could not be read: {e}", status.as_u16());
            ApiError {
                message: format!("failed to read response body: {e}"),
                status: Some(status.as_u16()),
                payload: None,
            }
        })?;
        debug!("{method} {path} -> {}", status.as_u16());

        if !status.is_success() {
            let err = ApiError::from_response(status, &body);
            warn!("{method} {path} returned {}: {}", status.as_u16(), err.message);
            return Err(err);
        }
        Ok(body)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let body = self.execute(&method, path, builder).await?;
        serde_json::from_str(&body).map_err(|e| ApiError {
            message: format!("invalid response from {path}: {e}"),
            status: Some(200),
            payload: parse_payload(&body),
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let builder = self.request(Method::GET, path);
        self.send_json(Method::GET, path, builder).await
    }

    async fn upload<T: DeserializeOwned>(&self, path: &str, upload: FileUpload) -> Result<T, ApiError> {
        let part = multipart::Part::stream(upload.content)
            .file_name(upload.file_name)
            .mime_str(upload.mime)?;
        let form = multipart::Form::new().part("file", part);
        let builder = self.request(Method::POST, path).multipart(form);
        self.send_json(Method::POST, path, builder).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let builder = self.request(Method::POST, path).json(body);
        self.send_json(Method::POST, path, builder).await
    }

    // ── Service ─────────────────────────────────────────────────────────────

    pub async fn health(&self) -> Result<Value, ApiError> {
        self.get(endpoints::HEALTH).await
    }

    // ── Résumé ──────────────────────────────────────────────────────────────

    /// Uploads a résumé and returns the parsed fields.
    pub async fn parse_resume(&self, upload: FileUpload) -> Result<ParsedResume, ApiError> {
        self.upload(endpoints::RESUME_PARSE, upload).await
    }

    pub async fn save_resume(
        &self,
        candidate_id: i64,
        resume: &ParsedResume,
    ) -> Result<SaveResumeResponse, ApiError> {
        self.post(&endpoints::resume_save(candidate_id), resume).await
    }

    // ── Matching ────────────────────────────────────────────────────────────

    pub async fn calculate_matches(&self, request: &MatchRequest) -> Result<Vec<MatchBreakdown>, ApiError> {
        self.post(endpoints::MATCH_CALCULATE, request).await
    }

    pub async fn match_weights(&self) -> Result<MatchWeights, ApiError> {
        self.get(endpoints::MATCH_WEIGHTS).await
    }

    // ── Roadmap ─────────────────────────────────────────────────────────────

    pub async fn generate_roadmap(&self, request: &RoadmapRequest) -> Result<RoadmapResponse, ApiError> {
        self.post(endpoints::ROADMAP_GENERATE, request).await
    }

    pub async fn skill_taxonomy(&self) -> Result<SkillTaxonomy, ApiError> {
        self.get(endpoints::ROADMAP_SKILLS).await
    }

    // ── Jobs ────────────────────────────────────────────────────────────────

    pub async fn list_jobs(&self) -> Result<Vec<Job>, ApiError> {
        let listing: JobListing = self.get(endpoints::JOBS).await?;
        Ok(listing.into_jobs())
    }

    // ── Auth ────────────────────────────────────────────────────────────────

    pub async fn register(&self, user: &UserCreate) -> Result<User, ApiError> {
        self.post(endpoints::AUTH_REGISTER, user).await
    }

    /// OAuth2 password grant: form-encoded `username` (the email) and `password`.
    pub async fn login(&self, email: &str, password: &str) -> Result<Token, ApiError> {
        let form = [
            ("grant_type", "password"),
            ("username", email),
            ("password", password),
        ];
        let builder = self.request(Method::POST, endpoints::AUTH_LOGIN).form(&form);
        self.send_json(Method::POST, endpoints::AUTH_LOGIN, builder)
            .await
    }

    pub async fn me(&self) -> Result<User, ApiError> {
        self.get(endpoints::AUTH_ME).await
    }

    pub async fn update_me(&self, update: &UserUpdate) -> Result<User, ApiError> {
        let builder = self.request(Method::PUT, endpoints::AUTH_ME).json(update);
        self.send_json(Method::PUT, endpoints::AUTH_ME, builder).await
    }

    pub async fn change_password(&self, change: &ChangePassword) -> Result<Value, ApiError> {
        self.post(endpoints::AUTH_CHANGE_PASSWORD, change).await
    }

    /// Soft-deletes the account; the server answers 204 with no body.
    pub async fn delete_me(&self) -> Result<(), ApiError> {
        let builder = self.request(Method::DELETE, endpoints::AUTH_ME);
        self.execute(&Method::DELETE, endpoints::AUTH_ME, builder)
            .await
            .map(|_| ())
    }

    pub async fn upload_profile_photo(&self, upload: FileUpload) -> Result<User, ApiError> {
        self.upload(endpoints::AUTH_PROFILE_PHOTO, upload).await
    }

    pub async fn upload_cover_photo(&self, upload: FileUpload) -> Result<User, ApiError> {
        self.upload(endpoints::AUTH_COVER_PHOTO, upload).await
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        let builder = self.request(Method::POST, endpoints::AUTH_LOGOUT);
        self.execute(&Method::POST, endpoints::AUTH_LOGOUT, builder)
            .await
            .map(|_| ())
    }
}
