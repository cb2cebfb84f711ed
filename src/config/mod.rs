//
//  codeship-client
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Two kinds of configuration live here:
//!
//! - [`ClientConfig`]: the construction record of the API client
//!   (organization, credentials, API root)
//! - [`Config`]: the CLI's TOML file, which supplies account details and
//!   defaults when they are not given as flags or environment variables
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/codeship/config.toml`
//! - **macOS**: `~/Library/Application Support/codeship/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\codeship\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! [account]
//! username = "me@example.com"
//! org_name = "acme"
//!
//! [defaults]
//! project = "0b7f3a30-6a5b-0133-1b3c-4a8d7e6f7d12"
//! per_page = 50
//! ```
//!
//! The password may also be stored in the file, but `CODESHIP_PASSWORD` is
//! preferred.

mod client;

pub use client::*;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Contents of the CLI configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub account: AccountConfig,

    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Account identity and credentials.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AccountConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_uuid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_name: Option<String>,
}

impl AccountConfig {
    /// Fills every field that is unset here from `fallback`.
    pub fn or(self, fallback: &AccountConfig) -> AccountConfig {
        AccountConfig {
            username: self.username.or_else(|| fallback.username.clone()),
            password: self.password.or_else(|| fallback.password.clone()),
            org_uuid: self.org_uuid.or_else(|| fallback.org_uuid.clone()),
            org_name: self.org_name.or_else(|| fallback.org_name.clone()),
        }
    }

    /// Turns the account into a client construction record.
    pub fn into_client_config(self, api_root: Option<String>) -> ClientConfig {
        ClientConfig {
            org_uuid: self.org_uuid,
            org_name: self.org_name,
            username: self.username,
            password: self.password,
            api_root: api_root.unwrap_or_else(|| DEFAULT_API_ROOT.to_string()),
        }
    }
}

/// Defaults applied to commands.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct DefaultsConfig {
    /// Project used by build commands when `--project` is omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

impl Config {
    /// Loads the configuration from `path`, or returns the default
    /// configuration if no file exists there yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// A copy safe to print: the password is replaced by a marker.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.account.password.is_some() {
            copy.account.password = Some("********".to_string());
        }
        copy
    }
}
