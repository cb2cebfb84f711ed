//
//  codeship-client
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Codeship API Client
//!
//! [`CodeshipClient`] owns the organization identity, the credentials, the
//! session token and the last-touched project/build pointers. Every request
//! goes through [`CodeshipClient::request`], which makes sure a session token
//! is held and attaches it as a Bearer credential.
//!
//! ## Authentication Flow
//!
//! ```text
//! builds().list(p) ──► ensure_authenticated ──► token held? ──yes──► request
//!                                                   │
//!                                                   no
//!                                                   ▼
//!                               POST /auth (Basic) ─► resolve organization
//!                                                   ─► store token
//! ```
//!
//! Authentication is single-flight: callers that find no token queue on an
//! auth gate, and all but the first find the token already stored once they
//! get through.
//!
//! ## Example
//!
//! ```rust,no_run
//! use codeship_client::{ClientConfig, CodeshipClient};
//!
//! # async fn run() -> codeship_client::api::common::Result<()> {
//! let client = CodeshipClient::try_new(
//!     ClientConfig::new("me@example.com", "secret").with_org_name("acme"),
//! )?;
//!
//! for project in client.projects().list().await? {
//!     println!("{:?}", project.name);
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, error, warn};

use super::builds::Builds;
use super::common::{build_url, error_message, error_message_from_text, ApiError, Result};
use super::projects::Projects;
use super::transport::{HttpRequest, ReqwestTransport, Transport};
use crate::auth::{AuthResponse, Credentials, OrganizationRef, SessionToken};
use crate::config::ClientConfig;

/// Mutable per-client state. Never locked across a network call.
#[derive(Debug, Default)]
struct Session {
    org_uuid: Option<String>,
    org_name: Option<String>,
    token: Option<SessionToken>,
    last_project_uuid: Option<String>,
    last_build_uuid: Option<String>,
}

struct ClientInner {
    api_root: String,
    credentials: Option<Credentials>,
    transport: Arc<dyn Transport>,
    session: Mutex<Session>,
    auth_gate: Mutex<()>,
}

/// The Codeship API client.
///
/// Cloning is cheap; clones share the same session.
#[derive(Clone)]
pub struct CodeshipClient {
    inner: Arc<ClientInner>,
}

impl CodeshipClient {
    /// Creates a client that talks to Codeship over HTTPS.
    ///
    /// Missing credentials or organization identifiers only produce a warning
    /// here; the first authentication attempt will fail instead. Use
    /// [`try_new`](Self::try_new) to reject them up front.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new()?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Like [`new`](Self::new), but fails when required options are missing.
    pub fn try_new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        Self::new(config)
    }

    /// Creates a client that dispatches through the given transport.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        let missing = config.missing_fields();
        if !missing.is_empty() {
            warn!(
                org_uuid = ?config.org_uuid,
                org_name = ?config.org_name,
                username = ?config.username,
                "Credentials not supplied to Codeship client: missing {}",
                missing.join(", ")
            );
        }

        Self {
            inner: Arc::new(ClientInner {
                api_root: config.api_root.trim_end_matches('/').to_string(),
                credentials: config.credentials(),
                transport,
                session: Mutex::new(Session {
                    org_uuid: config.org_uuid,
                    org_name: config.org_name,
                    ..Session::default()
                }),
                auth_gate: Mutex::new(()),
            }),
        }
    }

    /// Build operations: `get`, `list`, `restart`.
    pub fn builds(&self) -> Builds<'_> {
        Builds::new(self)
    }

    /// Project operations: `get`, `list`.
    pub fn projects(&self) -> Projects<'_> {
        Projects::new(self)
    }

    pub fn api_root(&self) -> &str {
        &self.inner.api_root
    }

    pub async fn org_uuid(&self) -> Option<String> {
        self.inner.session.lock().await.org_uuid.clone()
    }

    pub async fn org_name(&self) -> Option<String> {
        self.inner.session.lock().await.org_name.clone()
    }

    pub async fn session_token(&self) -> Option<SessionToken> {
        self.inner.session.lock().await.token.clone()
    }

    pub async fn has_session(&self) -> bool {
        self.inner.session.lock().await.token.is_some()
    }

    /// Replaces (or clears) the held session token.
    pub async fn set_session_token(&self, token: Option<SessionToken>) {
        self.inner.session.lock().await.token = token;
    }

    pub async fn last_project_uuid(&self) -> Option<String> {
        self.inner.session.lock().await.last_project_uuid.clone()
    }

    pub async fn last_build_uuid(&self) -> Option<String> {
        self.inner.session.lock().await.last_build_uuid.clone()
    }

    /// Exchanges the username and password for a session token.
    ///
    /// The organization is resolved against the `/auth` response: the first
    /// listed organization whose UUID or name matches the configured one is
    /// selected, and both identifiers are replaced with the server's values.
    /// The token is stored and returned.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Config`] when no username/password was configured
    /// - [`ApiError::AuthFailed`] when the request fails, is rejected, or
    ///   carries no token
    /// - [`ApiError::OrganizationNotFound`] when no organization matches
    pub async fn authenticate(&self) -> Result<SessionToken> {
        let _gate = self.inner.auth_gate.lock().await;
        self.authenticate_locked().await
    }

    /// Authenticates only if no session token is held. No expiry check is made.
    pub async fn ensure_authenticated(&self) -> Result<()> {
        if self.has_session().await {
            return Ok(());
        }

        let _gate = self.inner.auth_gate.lock().await;
        // Another caller may have authenticated while we waited on the gate.
        if self.has_session().await {
            return Ok(());
        }
        self.authenticate_locked().await.map(|_| ())
    }

    async fn authenticate_locked(&self) -> Result<SessionToken> {
        let credentials = self.inner.credentials.as_ref().ok_or_else(|| {
            ApiError::Config("username and password are required to authenticate".to_string())
        })?;

        let url = build_url(&self.inner.api_root, "/auth", None)?;
        let request = HttpRequest::new(Method::POST, url)
            .header("Authorization", credentials.basic_header())
            .header("Content-Type", "application/x-www-form-urlencoded");

        debug!(username = credentials.username(), "Authenticating with Codeship");

        let response = self.inner.transport.send(request).await.map_err(|e| {
            error!("Error authorising: {}", e);
            ApiError::auth_failed("request to /auth failed", e)
        })?;

        if !response.status.is_success() {
            let message = error_message_from_text(&response.body);
            error!(status = %response.status, "Authentication rejected: {}", message);
            return Err(ApiError::AuthFailed {
                message: format!("{} ({})", message, response.status),
                source: None,
            });
        }

        let payload: AuthResponse = serde_json::from_str(&response.body).map_err(|e| {
            error!("Error authorising: malformed /auth response: {}", e);
            ApiError::auth_failed("malformed /auth response", e.into())
        })?;

        let mut session = self.inner.session.lock().await;
        let wanted = OrganizationRef::new(session.org_uuid.clone(), session.org_name.clone());
        let organization = wanted.resolve(&payload.organizations).cloned().ok_or_else(|| {
            error!(
                available = payload.organizations.len(),
                "No organization in the /auth response matches the configured one"
            );
            ApiError::OrganizationNotFound {
                org_uuid: wanted.uuid.clone(),
                org_name: wanted.name.clone(),
            }
        })?;

        let token = payload
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ApiError::AuthFailed {
                message: "response did not include an access token".to_string(),
                source: None,
            })?;

        debug!(org = %organization.name, org_uuid = %organization.uuid, "Authenticated");
        session.org_uuid = Some(organization.uuid);
        session.org_name = Some(organization.name);
        session.token = Some(token.clone());

        Ok(token)
    }

    /// Sends an authenticated request and returns the parsed JSON body.
    ///
    /// If no session token is held the client authenticates first and then
    /// sends the request once. The body of a `202 Accepted` response is
    /// ignored and `None` is returned; every other status has its body parsed
    /// and returned as is, including 4xx and 5xx error bodies.
    ///
    /// # Parameters
    ///
    /// * `method` - HTTP method
    /// * `path` - route below the API root, e.g. `/organizations/{uuid}/projects`
    /// * `query` - optional query pairs, appended in order
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: Option<&[(String, String)]>,
    ) -> Result<Option<Value>> {
        self.request_with_status(method, path, query)
            .await
            .map(|(_, body)| body)
    }

    /// Same as [`request`](Self::request), also returning the HTTP status.
    pub async fn request_with_status(
        &self,
        method: Method,
        path: &str,
        query: Option<&[(String, String)]>,
    ) -> Result<(StatusCode, Option<Value>)> {
        let token = match self.session_token().await {
            Some(token) => token,
            None => {
                debug!(%method, path, "No session token held; authenticating first");
                self.ensure_authenticated().await?;
                self.session_token().await.ok_or(ApiError::AuthRequired)?
            }
        };

        let url = build_url(&self.inner.api_root, path, query)?;
        let request =
            HttpRequest::new(method.clone(), url.clone()).header("Authorization", token.bearer_header());

        debug!(%method, %url, "Sending Codeship request");

        let response = self.inner.transport.send(request).await.map_err(|e| {
            error!("Error making request to {}: {}", url, e);
            e
        })?;

        if response.status == StatusCode::ACCEPTED {
            return Ok((response.status, None));
        }

        let body = serde_json::from_str(&response.body).map_err(|e| {
            error!("Error making request to {}: invalid JSON body: {}", url, e);
            ApiError::Decode(e)
        })?;

        Ok((response.status, Some(body)))
    }

    /// Sends a request whose whole body deserializes into `T`.
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: Option<&[(String, String)]>,
    ) -> Result<T> {
        let body = self.checked_request(method, path, query).await?;
        let body = body.ok_or_else(|| {
            ApiError::UnexpectedResponse(format!("{} returned no body", path))
        })?;
        Ok(serde_json::from_value(body)?)
    }

    /// Sends a request and unwraps one field of the response envelope.
    pub(crate) async fn fetch_field<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        field: &str,
    ) -> Result<T> {
        let body = self.checked_request(method, path, None).await?;
        let value = body
            .and_then(|mut body| body.get_mut(field).map(Value::take))
            .ok_or_else(|| {
                ApiError::UnexpectedResponse(format!("{} response has no `{}` field", path, field))
            })?;
        Ok(serde_json::from_value(value)?)
    }

    /// Sends a request that is expected to have no useful response body.
    pub(crate) async fn send_action(&self, method: Method, path: &str) -> Result<()> {
        self.checked_request(method, path, None).await.map(|_| ())
    }

    async fn checked_request(
        &self,
        method: Method,
        path: &str,
        query: Option<&[(String, String)]>,
    ) -> Result<Option<Value>> {
        let (status, body) = self.request_with_status(method, path, query).await?;
        if status.is_success() {
            return Ok(body);
        }

        let message = body
            .as_ref()
            .map(error_message)
            .unwrap_or_else(|| status.to_string());
        Err(ApiError::Upstream {
            status: status.as_u16(),
            message,
        })
    }

    /// `/organizations/{org_uuid}` for the resolved organization.
    pub(crate) async fn organization_path(&self) -> Result<String> {
        let org_uuid = self.org_uuid().await.ok_or(ApiError::AuthRequired)?;
        Ok(format!("/organizations/{}", org_uuid))
    }

    /// Picks the explicit project, else the last-touched one.
    pub(crate) async fn resolve_project(&self, explicit: Option<&str>) -> Result<String> {
        match explicit {
            Some(uuid) => Ok(uuid.to_string()),
            None => self
                .last_project_uuid()
                .await
                .ok_or(ApiError::MissingProjectContext),
        }
    }

    pub(crate) async fn touch_project(&self, uuid: &str) {
        self.inner.session.lock().await.last_project_uuid = Some(uuid.to_string());
    }

    pub(crate) async fn touch_build(&self, uuid: &str) {
        self.inner.session.lock().await.last_build_uuid = Some(uuid.to_string());
    }
}

impl std::fmt::Debug for CodeshipClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodeshipClient")
            .field("api_root", &self.inner.api_root)
            .finish_non_exhaustive()
    }
}
