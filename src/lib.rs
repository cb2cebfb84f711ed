//
//  codeship-client
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Codeship Client Library
//!
//! A credential-managing client for the Codeship continuous-integration API,
//! and the `codeship` command-line tool built on top of it.
//!
//! ## Overview
//!
//! The client authenticates with a username and password, exchanges them for
//! a session token, and exposes build and project operations. Build listings
//! are paginated transparently.
//!
//! ## Module Structure
//!
//! - [`api`]: the API client, resource operations and HTTP transport
//! - [`auth`]: credentials, session tokens and organization resolution
//! - [`config`]: client construction options and the CLI config file
//! - [`cli`]: command-line interface definitions using clap
//! - [`output`]: table and JSON output for the CLI
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use codeship_client::{ClientConfig, CodeshipClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = CodeshipClient::try_new(
//!         ClientConfig::new("me@example.com", "secret").with_org_name("acme"),
//!     )?;
//!
//!     for project in client.projects().list().await? {
//!         println!("{}", project.name.unwrap_or_default());
//!     }
//!     Ok(())
//! }
//! ```

/// API client for Codeship.
///
/// Handles authentication, request dispatch, pagination and error mapping.
pub mod api;

/// Credentials, session tokens and organizations.
pub mod auth;

/// Command-line interface definitions.
pub mod cli;

/// Client options and the CLI configuration file.
pub mod config;

/// Output formatting for the CLI.
pub mod output;

pub use api::{ApiError, CodeshipClient};
pub use cli::Cli;
pub use config::{ClientConfig, Config};

/// Name of the CLI binary, also used for the config directory and User-Agent.
pub const APP_NAME: &str = "codeship";

/// Crate version, from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// - `0`: Success
/// - `1-3`: General errors and usage issues
/// - `4-7`: Authentication-related issues
/// - `8-15`: Resource-related issues
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error.
    pub const ERROR: i32 = 1;

    /// Invalid usage, arguments or configuration.
    pub const USAGE: i32 = 2;

    /// Credentials rejected, or the organization could not be resolved.
    pub const AUTH_ERROR: i32 = 4;

    /// The requested project or build does not exist.
    pub const NOT_FOUND: i32 = 8;
}
