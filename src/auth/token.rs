//
//  codeship-client
//  auth/token.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Session Tokens
//!
//! The bearer credential returned by `POST /auth`. The client keeps it until
//! the process ends; Codeship tokens do expire, but the client does not track
//! expiry and only fetches a token when none is held.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque Codeship access token.
///
/// `Debug` shows only a short prefix so tokens do not leak into logs.
#[derive(Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `Authorization` header value for API calls.
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<SessionToken> for String {
    fn from(token: SessionToken) -> String {
        token.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix: String = self.0.chars().take(4).collect();
        write!(f, "SessionToken({}…)", prefix)
    }
}
