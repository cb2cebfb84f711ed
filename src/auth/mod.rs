//
//  codeship-client
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Codeship authenticates in two steps. The username and password are sent
//! once, as HTTP Basic credentials, to `POST /auth`. The response carries an
//! access token and the organizations the user belongs to; every later call
//! presents the token as a Bearer credential.
//!
//! ## Module Structure
//!
//! - [`Credentials`]: the username/password pair and its Basic header
//! - [`organization`]: the `/auth` payload and organization resolution
//! - [`token`]: the [`SessionToken`] newtype
//!
//! ## Example
//!
//! ```rust
//! use codeship_client::auth::Credentials;
//!
//! let credentials = Credentials::new("u", "p");
//! assert_eq!(credentials.basic_header(), "Basic dTpw");
//! ```

mod organization;
mod token;

pub use organization::*;
pub use token::*;

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// A Codeship username and password.
///
/// The password is never printed by the `Debug` implementation.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// The `Authorization` header value for the `/auth` exchange:
    /// `Basic base64(username:password)`.
    pub fn basic_header(&self) -> String {
        let encoded = STANDARD.encode(format!("{}:{}", self.username, self.password));
        format!("Basic {}", encoded)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
