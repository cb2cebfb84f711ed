//
//  codeship-client
//  config/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! The construction record for [`CodeshipClient`](crate::api::CodeshipClient).

use std::fmt;

use crate::api::common::{ApiError, Result};
use crate::auth::Credentials;

/// Root of the Codeship v2 REST API.
pub const DEFAULT_API_ROOT: &str = "https://api.codeship.com/v2";

/// Options recognised when constructing a client.
///
/// At least one of `org_uuid` / `org_name` is required, as are `username` and
/// `password`. Construction through [`CodeshipClient::new`] only warns about
/// missing values; [`ClientConfig::validate`] and
/// [`CodeshipClient::try_new`] reject them.
///
/// [`CodeshipClient::new`]: crate::api::CodeshipClient::new
/// [`CodeshipClient::try_new`]: crate::api::CodeshipClient::try_new
///
/// # Example
///
/// ```rust
/// use codeship_client::ClientConfig;
///
/// let config = ClientConfig::new("me@example.com", "secret").with_org_name("acme");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub org_uuid: Option<String>,
    pub org_name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub api_root: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            org_uuid: None,
            org_name: None,
            username: None,
            password: None,
            api_root: DEFAULT_API_ROOT.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
            ..Self::default()
        }
    }

    pub fn with_org_uuid(mut self, uuid: impl Into<String>) -> Self {
        self.org_uuid = Some(uuid.into());
        self
    }

    pub fn with_org_name(mut self, name: impl Into<String>) -> Self {
        self.org_name = Some(name.into());
        self
    }

    pub fn with_api_root(mut self, api_root: impl Into<String>) -> Self {
        self.api_root = api_root.into();
        self
    }

    /// Names of the required options that are absent or blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.org_uuid) && is_blank(&self.org_name) {
            missing.push("org_uuid or org_name");
        }
        if is_blank(&self.username) {
            missing.push("username");
        }
        if is_blank(&self.password) {
            missing.push("password");
        }
        missing
    }

    pub fn validate(&self) -> Result<()> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Config(format!(
                "credentials not supplied: missing {}",
                missing.join(", ")
            )))
        }
    }

    /// The username/password pair, if neither is absent or blank.
    pub fn credentials(&self) -> Option<Credentials> {
        if is_blank(&self.username) || is_blank(&self.password) {
            return None;
        }
        let username = self.username.clone()?;
        let password = self.password.clone()?;
        Some(Credentials::new(username, password))
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("org_uuid", &self.org_uuid)
            .field("org_name", &self.org_name)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("api_root", &self.api_root)
            .finish()
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}
