//
//  codeship-client
//  auth/organization.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Organizations and the `/auth` response payload.

use serde::{Deserialize, Serialize};

use super::SessionToken;

/// An organization the authenticated user belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub uuid: String,
    pub name: String,

    #[serde(default)]
    pub scopes: Vec<String>,
}

/// Body of a `POST /auth` response.
///
/// ```json
/// {
///   "access_token": "...",
///   "organizations": [{"uuid": "...", "name": "acme", "scopes": ["project.read"]}]
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub access_token: Option<SessionToken>,

    #[serde(default)]
    pub organizations: Vec<Organization>,
}

/// The organization a client was configured with: a UUID, a name, or both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizationRef {
    pub uuid: Option<String>,
    pub name: Option<String>,
}

impl OrganizationRef {
    pub fn new(uuid: Option<String>, name: Option<String>) -> Self {
        Self { uuid, name }
    }

    /// An organization matches when its UUID equals the configured UUID or its
    /// name equals the configured name. An identifier that was not configured
    /// never matches.
    pub fn matches(&self, organization: &Organization) -> bool {
        self.uuid.as_deref() == Some(organization.uuid.as_str())
            || self.name.as_deref() == Some(organization.name.as_str())
    }

    /// Picks the first organization in server order that matches.
    pub fn resolve<'a>(&self, organizations: &'a [Organization]) -> Option<&'a Organization> {
        organizations.iter().find(|org| self.matches(org))
    }
}
