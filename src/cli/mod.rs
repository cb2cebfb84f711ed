//
//  codeship-client
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod auth;
mod build;
mod completion;
mod config;
mod project;

pub use auth::AuthCommand;
pub use build::BuildCommand;
pub use completion::CompletionCommand;
pub use config::ConfigCommand;
pub use project::ProjectCommand;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::api::CodeshipClient;
use crate::config::{AccountConfig, Config};
use crate::output::{OutputFormat, OutputWriter};

/// Work with Codeship from the command line
#[derive(Parser, Debug)]
#[command(
    name = "codeship",
    version,
    about = "Work with Codeship from the command line",
    long_about = "codeship is a CLI for the Codeship CI API.\n\n\
                  It lists projects and builds and restarts builds from your terminal.",
    propagate_version = true,
    after_help = "Use 'codeship <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Options accepted by every command.
///
/// Account options fall back to environment variables and then to the
/// `[account]` section of the config file.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Organization UUID
    #[arg(long, global = true, env = "CODESHIP_ORG_UUID")]
    pub org_uuid: Option<String>,

    /// Organization name, matched exactly
    #[arg(long, short = 'o', global = true, env = "CODESHIP_ORG_NAME")]
    pub org_name: Option<String>,

    /// Codeship account username
    #[arg(long, short = 'u', global = true, env = "CODESHIP_USERNAME")]
    pub username: Option<String>,

    /// Codeship account password
    #[arg(long, global = true, env = "CODESHIP_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Override the API root
    #[arg(long, global = true, env = "CODESHIP_API_ROOT", hide = true)]
    pub api_root: Option<String>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true, env = "CODESHIP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,
}

impl GlobalOptions {
    /// Account details given on the command line or in the environment.
    pub fn account(&self) -> AccountConfig {
        AccountConfig {
            username: self.username.clone(),
            password: self.password.clone(),
            org_uuid: self.org_uuid.clone(),
            org_name: self.org_name.clone(),
        }
    }

    /// Path of the config file in use.
    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Config::config_path(),
        }
    }

    pub fn load_config(&self) -> Result<Config> {
        Config::load_from(&self.config_path()?)
    }

    /// Builds a client from flags, environment and the config file, in that
    /// order of precedence. Missing credentials are rejected here.
    pub fn client(&self, config: &Config) -> Result<CodeshipClient> {
        let client_config = self
            .account()
            .or(&config.account)
            .into_client_config(self.api_root.clone());
        Ok(CodeshipClient::try_new(client_config)?)
    }

    pub fn format(&self) -> OutputFormat {
        OutputFormat::from_json_flag(self.json)
    }

    pub fn writer(&self) -> OutputWriter {
        OutputWriter::new(self.format())
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check credentials against Codeship
    #[command(visible_alias = "login")]
    Auth(AuthCommand),

    /// List and view projects
    #[command(visible_alias = "proj")]
    Project(ProjectCommand),

    /// List, view and restart builds
    Build(BuildCommand),

    /// Show the configuration file
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completion(CompletionCommand),

    /// Print the version
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_options_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "codeship", "project", "list", "--org-name", "acme", "-u", "me", "--json",
        ])
        .unwrap();

        assert_eq!(cli.global.org_name.as_deref(), Some("acme"));
        assert_eq!(cli.global.username.as_deref(), Some("me"));
        assert!(cli.global.json);
    }

    #[test]
    fn test_client_rejects_missing_credentials() {
        let options = GlobalOptions {
            org_name: Some("acme".to_string()),
            ..GlobalOptions::default()
        };

        let err = options.client(&Config::default()).unwrap_err();
        assert!(err.to_string().contains("username"));
    }

    #[test]
    fn test_client_fills_gaps_from_config_file() {
        let options = GlobalOptions {
            password: Some("secret".to_string()),
            api_root: Some("http://localhost:9999".to_string()),
            ..GlobalOptions::default()
        };
        let mut config = Config::default();
        config.account.username = Some("me".to_string());
        config.account.org_uuid = Some("org-1".to_string());

        let client = options.client(&config).unwrap();
        assert_eq!(client.api_root(), "http://localhost:9999");
    }
}
