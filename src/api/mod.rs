//
//  codeship-client
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the client for the Codeship v2 REST API at
//! `https://api.codeship.com/v2`.
//!
//! ## Architecture
//!
//! - [`client`]: [`CodeshipClient`], authentication and request dispatch
//! - [`builds`]: build operations (`get`, `list`, `restart`)
//! - [`projects`]: project operations (`get`, `list`)
//! - [`transport`]: the [`Transport`] seam and its `reqwest` implementation
//! - [`common`]: errors, pagination and URL helpers
//!
//! ## Usage
//!
//! ```rust,no_run
//! use codeship_client::api::CodeshipClient;
//! use codeship_client::ClientConfig;
//!
//! # async fn run() -> codeship_client::api::common::Result<()> {
//! let client = CodeshipClient::new(
//!     ClientConfig::new("me@example.com", "secret").with_org_name("acme"),
//! )?;
//!
//! let project = client.projects().get("0b7f3a30-6a5b-0133-1b3c-4a8d7e6f7d12").await?;
//! // The project fetched above is used when no project is given.
//! let builds = client.builds().list(project.uuid.as_deref().unwrap_or_default()).await?;
//! if let Some(latest) = builds.first().and_then(|b| b.uuid.as_deref()) {
//!     client.builds().restart(latest, None).await?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Operations return [`ApiError`]. Resource operations turn non-2xx
//! responses into [`ApiError::Upstream`]; the lower level
//! [`CodeshipClient::request`] returns error bodies unchanged.

pub mod builds;
pub mod client;
pub mod common;
pub mod projects;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use builds::{Build, Builds};
pub use client::CodeshipClient;
pub use common::{ApiError, PageOptions};
pub use projects::{Project, Projects};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
