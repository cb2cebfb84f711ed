//
//  codeship-client
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for the Codeship client
//!
//! This module provides the types shared by every part of the API layer:
//! the [`ApiError`] taxonomy, the crate-wide [`Result`] alias, URL
//! construction and the extraction of human readable messages from Codeship
//! error bodies.
//!
//! # Example
//!
//! ```rust
//! use codeship_client::api::common::ApiError;
//!
//! fn describe(err: &ApiError) -> &'static str {
//!     match err {
//!         ApiError::AuthFailed { .. } => "check your username and password",
//!         ApiError::OrganizationNotFound { .. } => "check the organization name",
//!         ApiError::MissingProjectContext => "pass a project UUID",
//!         _ => "request failed",
//!     }
//! }
//! ```
//!
//! # Notes
//!
//! - Codeship reports errors as `{"errors": ["message", ...]}`
//! - [`build_url`] percent-encodes query keys and values, so spaces become `%20`

use serde_json::Value;
use thiserror::Error;
use url::Url;

mod pagination;

pub use pagination::*;

/// A `Result` alias where the error is an [`ApiError`].
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors produced by the Codeship API layer.
///
/// Transport failures, authentication failures and upstream error
/// responses are kept apart so callers can react to each of them
/// differently (the CLI maps them onto distinct exit codes).
#[derive(Error, Debug)]
pub enum ApiError {
    /// The client configuration is missing required values.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// No session token is held and none could be obtained.
    #[error("Authentication required")]
    AuthRequired,

    /// The exchange of basic credentials for a session token failed.
    #[error("Authentication failed: {message}")]
    AuthFailed {
        message: String,
        #[source]
        source: Option<Box<ApiError>>,
    },

    /// The `/auth` response did not list the configured organization.
    #[error(
        "Organization not found (uuid: {}, name: {})",
        .org_uuid.as_deref().unwrap_or("-"),
        .org_name.as_deref().unwrap_or("-")
    )]
    OrganizationNotFound {
        org_uuid: Option<String>,
        org_name: Option<String>,
    },

    /// A build operation had neither an explicit nor a last-touched project.
    #[error("Missing project context: pass a project UUID or fetch a project first")]
    MissingProjectContext,

    /// The server answered with a non-success status.
    #[error("Codeship API error ({status}): {message}")]
    Upstream { status: u16, message: String },

    /// A success response did not have the expected shape.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ApiError {
    pub(crate) fn auth_failed(message: impl Into<String>, source: ApiError) -> Self {
        Self::AuthFailed {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns `true` for errors caused by credentials or organization identity.
    pub fn is_auth_error(&self) -> bool {
        match self {
            Self::AuthRequired | Self::AuthFailed { .. } | Self::OrganizationNotFound { .. } => {
                true
            }
            Self::Upstream { status, .. } => *status == 401,
            _ => false,
        }
    }

    /// Returns `true` when the server reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Upstream { status: 404, .. })
    }
}

/// Builds a fully qualified request URL from the API root, a route and an
/// optional list of query pairs.
///
/// Query pairs are appended in the order given, each value percent-encoded.
/// An empty list leaves the URL without a `?`.
///
/// # Example
///
/// ```rust
/// use codeship_client::api::common::build_url;
///
/// let query = vec![("per_page".to_string(), "30".to_string())];
/// let url = build_url("https://api.codeship.com/v2", "/organizations/o/projects", Some(&query)).unwrap();
/// assert_eq!(url, "https://api.codeship.com/v2/organizations/o/projects?per_page=30");
/// ```
pub fn build_url(api_root: &str, path: &str, query: Option<&[(String, String)]>) -> Result<String> {
    let mut url = Url::parse(&format!("{}{}", api_root.trim_end_matches('/'), path))?;

    if let Some(pairs) = query.filter(|pairs| !pairs.is_empty()) {
        let encoded: Vec<String> = pairs
            .iter()
            .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
            .collect();
        url.set_query(Some(&encoded.join("&")));
    }

    Ok(url.to_string())
}

/// Percent-encodes one query component. Only ASCII alphanumerics and
/// `-`, `.`, `_`, `*` are left as they are; a space becomes `%20`.
fn encode_component(value: &str) -> String {
    // The form serializer writes a literal `+` as `%2B`, so every `+` left in
    // its output stands for a space.
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Extracts a user-friendly message from a Codeship error body.
///
/// Codeship returns errors as `{"errors": ["..."]}`; objects inside the array
/// with a `message` field, a top level `error` or `message` string are also
/// recognised. Anything else is rendered as compact JSON.
pub fn error_message(body: &Value) -> String {
    if let Some(errors) = body.get("errors").and_then(Value::as_array) {
        let messages: Vec<String> = errors
            .iter()
            .filter_map(|e| match e {
                Value::String(s) => Some(s.clone()),
                other => other
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            })
            .collect();
        if !messages.is_empty() {
            return messages.join("; ");
        }
    }

    for key in ["error", "message"] {
        if let Some(message) = body.get(key).and_then(Value::as_str) {
            return message.to_string();
        }
    }

    body.to_string()
}

/// Same as [`error_message`] for a raw response body that may not be JSON.
pub fn error_message_from_text(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => error_message(&value),
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}
